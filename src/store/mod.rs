//! Backing store
//!
//! In-memory state with the contracts the core needs from persistence:
//! load by key, save, and atomic read-modify-write. `Store` is a cheap
//! cloneable handle shared by every repository, the way a connection pool
//! would be. Each collection is guarded by its own `RwLock`; a write guard is
//! the serialization point that makes lost updates impossible.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{Account, Card, Customer, KycDocument, Loan, Otp, TransactionRecord};

mod accounts;
mod cards;
mod customers;
mod kyc;
mod ledger;
mod loans;
mod otps;
mod transactions;

pub use accounts::AccountRepository;
pub use cards::CardRepository;
pub use customers::CustomerRepository;
pub use kyc::KycRepository;
pub use ledger::AccountLedger;
pub use loans::LoanRepository;
pub use otps::OtpRepository;
pub use transactions::TransactionRepository;

#[derive(Debug, Default)]
pub(crate) struct StoreInner {
    pub(crate) customers: RwLock<HashMap<Uuid, Customer>>,
    /// Keyed by account number
    pub(crate) accounts: RwLock<HashMap<String, Account>>,
    /// Append-only
    pub(crate) transactions: RwLock<Vec<TransactionRecord>>,
    pub(crate) otps: RwLock<Vec<Otp>>,
    pub(crate) loans: RwLock<HashMap<Uuid, Loan>>,
    pub(crate) documents: RwLock<HashMap<Uuid, KycDocument>>,
    pub(crate) cards: RwLock<HashMap<Uuid, Card>>,
}

/// Shared handle to the backing store.
#[derive(Debug, Clone, Default)]
pub struct Store {
    pub(crate) inner: Arc<StoreInner>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn customers(&self) -> CustomerRepository {
        CustomerRepository::new(self.clone())
    }

    pub fn accounts(&self) -> AccountRepository {
        AccountRepository::new(self.clone())
    }

    pub fn ledger(&self) -> AccountLedger {
        AccountLedger::new(self.clone())
    }

    pub fn transactions(&self) -> TransactionRepository {
        TransactionRepository::new(self.clone())
    }

    pub fn otps(&self) -> OtpRepository {
        OtpRepository::new(self.clone())
    }

    pub fn loans(&self) -> LoanRepository {
        LoanRepository::new(self.clone())
    }

    pub fn kyc_documents(&self) -> KycRepository {
        KycRepository::new(self.clone())
    }

    pub fn cards(&self) -> CardRepository {
        CardRepository::new(self.clone())
    }
}
