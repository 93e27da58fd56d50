//! KYC documents
//!
//! Each identity document is reviewed on its own; the customer-level trust
//! status is aggregated from the per-document outcomes by the KYC handler.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    Aadhaar,
    Pan,
    Passport,
    DrivingLicense,
    VoterId,
    UtilityBill,
    BankStatement,
    SalarySlip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentStatus {
    Uploaded,
    UnderReview,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KycDocument {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub document_type: DocumentType,
    pub document_number: String,
    pub status: DocumentStatus,
    pub rejection_reason: Option<String>,
    pub verified_by: Option<Uuid>,
    pub verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl KycDocument {
    pub fn new(customer_id: Uuid, document_type: DocumentType, document_number: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            customer_id,
            document_type,
            document_number,
            status: DocumentStatus::Uploaded,
            rejection_reason: None,
            verified_by: None,
            verified_at: None,
            created_at: Utc::now(),
        }
    }

    pub fn approve(&mut self, reviewer: Uuid) {
        self.status = DocumentStatus::Approved;
        self.verified_by = Some(reviewer);
        self.verified_at = Some(Utc::now());
    }

    pub fn reject(&mut self, reason: Option<String>, reviewer: Uuid) {
        self.status = DocumentStatus::Rejected;
        self.rejection_reason = reason;
        self.verified_by = Some(reviewer);
    }
}
