//! bankcore - Retail banking back-office core
//!
//! Account ledger, transfer orchestration with passcode step-up, KYC
//! aggregation, loan origination and card issuance, backed by an in-memory
//! store with the contracts persistence would provide.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod audit;
pub mod domain;
pub mod handlers;
pub mod notify;
pub mod refgen;
pub mod store;

pub mod config;
mod error;

pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use domain::{Amount, AmountError, Balance, OperationContext};

/// Initialize tracing/logging
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bankcore=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
