//! Domain types
//!
//! Entities and validated primitives for the banking core. No I/O here;
//! everything is pure state plus invariant checks.

mod account;
mod amount;
mod card;
mod context;
mod customer;
mod kyc;
mod loan;
mod otp;
mod review;
mod transaction;

pub use account::{Account, AccountStatus, AccountType};
pub use amount::{Amount, AmountError, Balance};
pub use card::{Card, CardStatus, CardType};
pub use context::OperationContext;
pub use customer::{Customer, KycStatus};
pub use kyc::{DocumentStatus, DocumentType, KycDocument};
pub use loan::{
    monthly_installment, Loan, LoanStatus, LoanType, MAX_TENURE_MONTHS, MIN_TENURE_MONTHS,
};
pub use otp::{Otp, OtpPurpose};
pub use review::ReviewAction;
pub use transaction::{TransactionMode, TransactionRecord, TransactionStatus, TransactionType};
