//! Notification sink
//!
//! The core emits user-facing events; delivery (email, push, inbox) lives
//! outside. Emission is fire-and-forget: a sink must never fail the financial
//! operation that triggered it, so the trait is infallible at the call site
//! and implementations swallow their own delivery problems.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    Account,
    Transaction,
    Loan,
    Kyc,
    Card,
    Otp,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub user_id: Uuid,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub reference_id: Option<String>,
    pub reference_type: Option<&'static str>,
}

impl Notification {
    pub fn transaction_alert(
        user_id: Uuid,
        account_number: &str,
        amount: &str,
        direction: &str,
    ) -> Self {
        Self {
            user_id,
            kind: NotificationKind::Transaction,
            title: "Transaction Alert".to_string(),
            message: format!(
                "A {} of Rs. {} has been processed on account {}",
                direction, amount, account_number
            ),
            reference_id: Some(account_number.to_string()),
            reference_type: Some("ACCOUNT"),
        }
    }

    pub fn loan_status(user_id: Uuid, loan_number: &str, status: &str) -> Self {
        Self {
            user_id,
            kind: NotificationKind::Loan,
            title: "Loan Status Update".to_string(),
            message: format!(
                "Your loan application {} has been {}",
                loan_number, status
            ),
            reference_id: Some(loan_number.to_string()),
            reference_type: Some("LOAN"),
        }
    }

    pub fn kyc_status(user_id: Uuid, status: &str) -> Self {
        Self {
            user_id,
            kind: NotificationKind::Kyc,
            title: "KYC Status Update".to_string(),
            message: format!("Your KYC verification has been {}", status),
            reference_id: None,
            reference_type: None,
        }
    }

    pub fn account_opened(user_id: Uuid, account_type: &str, account_number: &str) -> Self {
        Self {
            user_id,
            kind: NotificationKind::Account,
            title: "Account Opened".to_string(),
            message: format!(
                "Your {} account {} has been created.",
                account_type, account_number
            ),
            reference_id: Some(account_number.to_string()),
            reference_type: Some("ACCOUNT"),
        }
    }

    pub fn card_issued(user_id: Uuid, card_id: Uuid, masked_number: &str) -> Self {
        Self {
            user_id,
            kind: NotificationKind::Card,
            title: "Card Issued".to_string(),
            message: format!("Your card {} has been issued successfully.", masked_number),
            reference_id: Some(card_id.to_string()),
            reference_type: Some("CARD"),
        }
    }

    /// Carries the code for out-of-band delivery by the external sink.
    pub fn otp_delivery(user_id: Uuid, code: &str, purpose: &str, expiry_minutes: i64) -> Self {
        Self {
            user_id,
            kind: NotificationKind::Otp,
            title: "One-Time Passcode".to_string(),
            message: format!(
                "Your OTP for {} is {}. It expires in {} minutes.",
                purpose, code, expiry_minutes
            ),
            reference_id: None,
            reference_type: None,
        }
    }
}

pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Sink that logs every notification through `tracing`.
#[derive(Debug, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, notification: Notification) {
        tracing::info!(
            user_id = %notification.user_id,
            kind = ?notification.kind,
            title = %notification.title,
            "{}",
            notification.message
        );
    }
}

/// Sink that records notifications in memory, for assertions in tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications.lock().expect("sink poisoned"))
    }

    pub fn count_of(&self, kind: NotificationKind) -> usize {
        self.notifications
            .lock()
            .expect("sink poisoned")
            .iter()
            .filter(|n| n.kind == kind)
            .count()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, notification: Notification) {
        self.notifications
            .lock()
            .expect("sink poisoned")
            .push(notification);
    }
}
