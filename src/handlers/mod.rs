//! Command handlers
//!
//! Each handler owns the repositories it needs plus the shared sinks, and
//! exposes the operations of one functional area. Handlers are constructed
//! from a `Store` handle and are cheap to build per use.

mod account_handler;
mod card_handler;
mod commands;
mod kyc_handler;
mod loan_handler;
mod otp_handler;
mod transfer_handler;

pub use account_handler::AccountHandler;
pub use card_handler::CardHandler;
pub use commands::{KycDecision, KycUpload, LoanApplication, TransferCommand};
pub use kyc_handler::KycHandler;
pub use loan_handler::LoanHandler;
pub use otp_handler::OtpHandler;
pub use transfer_handler::TransferHandler;
