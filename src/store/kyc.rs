//! KYC document repository

use uuid::Uuid;

use crate::domain::{DocumentStatus, KycDocument};
use crate::error::{CoreError, CoreResult};

use super::Store;

#[derive(Debug, Clone)]
pub struct KycRepository {
    store: Store,
}

impl KycRepository {
    pub(crate) fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn insert(&self, document: KycDocument) -> KycDocument {
        let mut documents = self.store.inner.documents.write().await;
        documents.insert(document.id, document.clone());
        document
    }

    pub async fn get(&self, document_id: Uuid) -> CoreResult<KycDocument> {
        let documents = self.store.inner.documents.read().await;
        documents
            .get(&document_id)
            .cloned()
            .ok_or_else(|| CoreError::DocumentNotFound(document_id.to_string()))
    }

    /// Atomic read-modify-write on one document.
    pub async fn update<F>(&self, document_id: Uuid, f: F) -> CoreResult<KycDocument>
    where
        F: FnOnce(&mut KycDocument) -> CoreResult<()>,
    {
        let mut documents = self.store.inner.documents.write().await;
        let document = documents
            .get_mut(&document_id)
            .ok_or_else(|| CoreError::DocumentNotFound(document_id.to_string()))?;
        f(document)?;
        Ok(document.clone())
    }

    pub async fn count_approved(&self, customer_id: Uuid) -> usize {
        let documents = self.store.inner.documents.read().await;
        documents
            .values()
            .filter(|d| d.customer_id == customer_id && d.status == DocumentStatus::Approved)
            .count()
    }

    pub async fn list_by_customer(&self, customer_id: Uuid) -> Vec<KycDocument> {
        let documents = self.store.inner.documents.read().await;
        documents
            .values()
            .filter(|d| d.customer_id == customer_id)
            .cloned()
            .collect()
    }
}
