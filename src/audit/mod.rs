//! Audit log
//!
//! The core emits audit facts; retention and querying belong to an external
//! sink. The in-memory `AuditLog` keeps a tamper-evident hash chain over the
//! entries it receives: each entry's hash covers its content plus the
//! previous hash, so any rewrite breaks verification from that point on.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const GENESIS_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    AccountOpened,
    AccountClosed,
    DepositProcessed,
    TransferExecuted,
    TransferReversed,
    OtpIssued,
    OtpVerified,
    LoanApplied,
    LoanReviewed,
    KycDocumentUploaded,
    KycDecisionRecorded,
    CardIssued,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::AccountOpened => "account.opened",
            AuditAction::AccountClosed => "account.closed",
            AuditAction::DepositProcessed => "deposit.processed",
            AuditAction::TransferExecuted => "transfer.executed",
            AuditAction::TransferReversed => "transfer.reversed",
            AuditAction::OtpIssued => "otp.issued",
            AuditAction::OtpVerified => "otp.verified",
            AuditAction::LoanApplied => "loan.applied",
            AuditAction::LoanReviewed => "loan.reviewed",
            AuditAction::KycDocumentUploaded => "kyc.document_uploaded",
            AuditAction::KycDecisionRecorded => "kyc.decision_recorded",
            AuditAction::CardIssued => "card.issued",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditOutcome {
    Success,
    Failure,
}

/// One audit fact emitted by a handler.
#[derive(Debug, Clone)]
pub struct AuditRecord {
    pub actor: Option<Uuid>,
    pub action: AuditAction,
    pub resource: &'static str,
    pub resource_id: Option<String>,
    pub details: Option<serde_json::Value>,
    pub outcome: AuditOutcome,
    pub at: DateTime<Utc>,
}

impl AuditRecord {
    pub fn new(action: AuditAction, resource: &'static str) -> Self {
        Self {
            actor: None,
            action,
            resource,
            resource_id: None,
            details: None,
            outcome: AuditOutcome::Success,
            at: Utc::now(),
        }
    }

    pub fn actor(mut self, actor: Option<Uuid>) -> Self {
        self.actor = actor;
        self
    }

    pub fn resource_id(mut self, id: impl Into<String>) -> Self {
        self.resource_id = Some(id.into());
        self
    }

    pub fn details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn failed(mut self) -> Self {
        self.outcome = AuditOutcome::Failure;
        self
    }
}

pub trait AuditSink: Send + Sync {
    fn record(&self, record: AuditRecord);
}

/// A chained entry as stored by `AuditLog`.
#[derive(Debug, Clone)]
pub struct ChainedEntry {
    pub sequence: u64,
    pub record: AuditRecord,
    pub previous_hash: String,
    pub current_hash: String,
}

/// Result of hash chain verification.
#[derive(Debug, Clone)]
pub struct ChainVerification {
    pub is_valid: bool,
    pub entries_checked: u64,
    pub first_invalid_sequence: Option<u64>,
}

/// In-memory, hash-chained audit log.
#[derive(Debug, Default)]
pub struct AuditLog {
    entries: Mutex<Vec<ChainedEntry>>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("audit log poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn entries(&self) -> Vec<ChainedEntry> {
        self.entries.lock().expect("audit log poisoned").clone()
    }

    /// Walk the chain from genesis and recompute every hash.
    pub fn verify_chain(&self) -> ChainVerification {
        let entries = self.entries.lock().expect("audit log poisoned");
        let mut previous_hash = GENESIS_HASH.to_string();

        for entry in entries.iter() {
            let expected = entry_hash(entry.sequence, &entry.record, &previous_hash);
            if entry.previous_hash != previous_hash || entry.current_hash != expected {
                return ChainVerification {
                    is_valid: false,
                    entries_checked: entry.sequence,
                    first_invalid_sequence: Some(entry.sequence),
                };
            }
            previous_hash = entry.current_hash.clone();
        }

        ChainVerification {
            is_valid: true,
            entries_checked: entries.len() as u64,
            first_invalid_sequence: None,
        }
    }

    #[cfg(test)]
    fn tamper(&self, sequence: u64, action: AuditAction) {
        let mut entries = self.entries.lock().expect("audit log poisoned");
        if let Some(entry) = entries.iter_mut().find(|e| e.sequence == sequence) {
            entry.record.action = action;
        }
    }
}

impl AuditSink for AuditLog {
    fn record(&self, record: AuditRecord) {
        let mut entries = self.entries.lock().expect("audit log poisoned");
        let sequence = entries.len() as u64 + 1;
        let previous_hash = entries
            .last()
            .map(|e| e.current_hash.clone())
            .unwrap_or_else(|| GENESIS_HASH.to_string());
        let current_hash = entry_hash(sequence, &record, &previous_hash);

        tracing::debug!(
            sequence,
            action = %record.action,
            resource = record.resource,
            "audit entry recorded"
        );

        entries.push(ChainedEntry {
            sequence,
            record,
            previous_hash,
            current_hash,
        });
    }
}

fn entry_hash(sequence: u64, record: &AuditRecord, previous_hash: &str) -> String {
    let input = format!(
        "{}{}{}{}{}{}",
        sequence,
        record.action,
        record.actor.map(|a| a.to_string()).unwrap_or_default(),
        record.resource_id.clone().unwrap_or_default(),
        record
            .details
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_default(),
        previous_hash
    );
    sha256_hex(&input)
}

/// Calculate SHA-256 hash and return as hex string
fn sha256_hex(input: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}
