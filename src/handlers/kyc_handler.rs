//! KYC aggregation
//!
//! Documents are reviewed individually; this handler derives the
//! customer-level status from the per-document outcomes. Approval promotes
//! the customer once the configured number of distinct documents is
//! approved. Rejections apply to the document alone and never move the
//! aggregate status.

use std::sync::Arc;

use crate::audit::{AuditAction, AuditRecord, AuditSink};
use crate::config::Config;
use crate::domain::{
    DocumentStatus, KycDocument, KycStatus, OperationContext, ReviewAction,
};
use crate::error::CoreResult;
use crate::notify::{Notification, NotificationSink};
use crate::store::{CustomerRepository, KycRepository, Store};

use super::commands::{KycDecision, KycUpload};

pub struct KycHandler {
    documents: KycRepository,
    customers: CustomerRepository,
    notifier: Arc<dyn NotificationSink>,
    audit: Arc<dyn AuditSink>,
    config: Config,
}

impl KycHandler {
    pub fn new(
        store: Store,
        notifier: Arc<dyn NotificationSink>,
        audit: Arc<dyn AuditSink>,
        config: Config,
    ) -> Self {
        Self {
            documents: store.kyc_documents(),
            customers: store.customers(),
            notifier,
            audit,
            config,
        }
    }

    /// Register an uploaded identity document.
    ///
    /// The first upload moves a PENDING customer to SUBMITTED.
    pub async fn upload(&self, upload: KycUpload, ctx: &OperationContext) -> CoreResult<KycDocument> {
        let customer = self.customers.get(upload.customer_id).await?;

        let document = self
            .documents
            .insert(KycDocument::new(
                upload.customer_id,
                upload.document_type,
                upload.document_number,
            ))
            .await;

        if customer.kyc_status == KycStatus::Pending {
            self.customers
                .update(customer.id, |c| c.kyc_status = KycStatus::Submitted)
                .await?;
        }

        self.audit.record(
            AuditRecord::new(AuditAction::KycDocumentUploaded, "kyc_document")
                .actor(ctx.actor_user_id)
                .resource_id(document.id.to_string())
                .details(serde_json::json!({ "document_type": document.document_type })),
        );
        Ok(document)
    }

    /// Record a staff decision on one document and re-derive the customer's
    /// aggregate status.
    pub async fn record_decision(
        &self,
        decision: KycDecision,
        ctx: &OperationContext,
    ) -> CoreResult<KycDocument> {
        let document = self
            .documents
            .update(decision.document_id, |document| {
                match decision.action {
                    ReviewAction::Approve => document.approve(decision.reviewer),
                    ReviewAction::Reject => {
                        document.reject(decision.rejection_reason.clone(), decision.reviewer)
                    }
                }
                Ok(())
            })
            .await?;

        self.reaggregate(document.customer_id, &document).await?;

        self.audit.record(
            AuditRecord::new(AuditAction::KycDecisionRecorded, "kyc_document")
                .actor(ctx.actor_user_id)
                .resource_id(document.id.to_string())
                .details(serde_json::json!({ "outcome": decision.action.as_outcome() })),
        );
        Ok(document)
    }

    /// Derive the customer-level status after a document decision.
    ///
    /// Promotion to APPROVED happens when the approved-document count reaches
    /// the configured threshold and fires its notification exactly once.
    /// A rejection touches only the document: the aggregate status never
    /// moves on rejection, but the customer is told about it every time.
    async fn reaggregate(
        &self,
        customer_id: uuid::Uuid,
        decided: &KycDocument,
    ) -> CoreResult<()> {
        let approved_count = self.documents.count_approved(customer_id).await;
        let required = self.config.kyc_required_approvals;

        let mut promoted = false;
        let customer = self
            .customers
            .update(customer_id, |customer| {
                if customer.kyc_status != KycStatus::Approved && approved_count >= required {
                    customer.kyc_status = KycStatus::Approved;
                    promoted = true;
                }
            })
            .await?;

        if promoted {
            self.notifier
                .notify(Notification::kyc_status(customer.user_id, "APPROVED"));
            tracing::info!(%customer_id, approved_count, "customer KYC approved");
        } else if decided.status == DocumentStatus::Rejected {
            self.notifier
                .notify(Notification::kyc_status(customer.user_id, "REJECTED"));
        }
        Ok(())
    }

    pub async fn documents_for_customer(&self, customer_id: uuid::Uuid) -> Vec<KycDocument> {
        self.documents.list_by_customer(customer_id).await
    }
}
