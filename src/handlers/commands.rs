//! Command types
//!
//! Inputs to the handlers, built by the transport layer from
//! already-validated requests.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{DocumentType, LoanType, ReviewAction, TransactionMode};

/// Move money out of `from_account`, optionally into `to_account`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferCommand {
    pub from_account: String,
    pub to_account: Option<String>,
    pub amount: Decimal,
    pub mode: TransactionMode,
    pub description: Option<String>,
    pub passcode: Option<String>,
    /// Customer the caller authenticated as; must own `from_account`
    pub requester: Uuid,
}

impl TransferCommand {
    pub fn new(from_account: String, amount: Decimal, mode: TransactionMode, requester: Uuid) -> Self {
        Self {
            from_account,
            to_account: None,
            amount,
            mode,
            description: None,
            passcode: None,
            requester,
        }
    }

    pub fn with_to_account(mut self, to_account: String) -> Self {
        self.to_account = Some(to_account);
        self
    }

    pub fn with_description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }

    pub fn with_passcode(mut self, passcode: String) -> Self {
        self.passcode = Some(passcode);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanApplication {
    pub customer_id: Uuid,
    pub loan_type: LoanType,
    pub principal: Decimal,
    pub tenure_months: u32,
    pub purpose: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KycDecision {
    pub document_id: Uuid,
    pub action: ReviewAction,
    pub rejection_reason: Option<String>,
    /// Staff member recording the decision
    pub reviewer: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KycUpload {
    pub customer_id: Uuid,
    pub document_type: DocumentType,
    pub document_number: String,
}
