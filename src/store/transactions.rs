//! Transaction record repository (append-only)

use crate::domain::TransactionRecord;

use super::Store;

#[derive(Debug, Clone)]
pub struct TransactionRepository {
    store: Store,
}

impl TransactionRepository {
    pub(crate) fn new(store: Store) -> Self {
        Self { store }
    }

    /// Append a record. Records are immutable once appended.
    pub async fn append(&self, record: TransactionRecord) -> TransactionRecord {
        let mut transactions = self.store.inner.transactions.write().await;
        transactions.push(record.clone());
        record
    }

    pub async fn list_by_account(&self, account_number: &str) -> Vec<TransactionRecord> {
        let transactions = self.store.inner.transactions.read().await;
        transactions
            .iter()
            .filter(|t| t.account_number == account_number)
            .cloned()
            .collect()
    }

    pub async fn find_by_reference(&self, reference: &str) -> Option<TransactionRecord> {
        let transactions = self.store.inner.transactions.read().await;
        transactions
            .iter()
            .find(|t| t.reference_number == reference)
            .cloned()
    }

    pub async fn count(&self) -> usize {
        self.store.inner.transactions.read().await.len()
    }
}
