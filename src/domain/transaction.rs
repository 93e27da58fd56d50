//! Transaction records
//!
//! A transaction record is a fact: once appended it is never edited.
//! Corrections are expressed as new reversal records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Amount, Balance};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Credit,
    Debit,
}

/// Channel the movement was requested over. Modeled as a label only; no
/// payment-network protocol is implemented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionMode {
    Neft,
    Rtgs,
    Imps,
    Upi,
    Atm,
    Cash,
    Online,
    Cheque,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Success,
    Failed,
    Pending,
    Reversed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: Uuid,
    pub reference_number: String,
    pub account_number: String,
    pub transaction_type: TransactionType,
    pub mode: TransactionMode,
    pub amount: Amount,
    pub balance_after: Balance,
    pub counterparty: Option<String>,
    pub status: TransactionStatus,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TransactionRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        reference_number: String,
        account_number: String,
        transaction_type: TransactionType,
        mode: TransactionMode,
        amount: Amount,
        balance_after: Balance,
        counterparty: Option<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            reference_number,
            account_number,
            transaction_type,
            mode,
            amount,
            balance_after,
            counterparty,
            status: TransactionStatus::Success,
            description,
            created_at: Utc::now(),
        }
    }

    pub fn with_status(mut self, status: TransactionStatus) -> Self {
        self.status = status;
        self
    }
}
