//! Error handling module
//!
//! Centralized error taxonomy for the banking core. Every variant is a
//! recoverable, caller-facing failure; the transport layer maps `code()` to
//! its own response format without re-deriving intent.

use rust_decimal::Decimal;

use crate::domain::AmountError;

/// Core-wide Result type
pub type CoreResult<T> = Result<T, CoreError>;

/// Core error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    // Lookup failures
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    #[error("Loan not found: {0}")]
    LoanNotFound(String),

    #[error("KYC document not found: {0}")]
    DocumentNotFound(String),

    // Financial state violations
    #[error("Account is not active")]
    AccountNotActive,

    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds {
        required: Decimal,
        available: Decimal,
    },

    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),

    // Authorization failures
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("A passcode is required for this operation")]
    PasscodeRequired,

    #[error("No valid passcode found")]
    NoValidCode,

    #[error("Incorrect passcode")]
    IncorrectCode,

    // Business rule violations
    #[error("KYC must be approved before this operation")]
    KycNotApproved,

    #[error("Invalid review action: {0}. Use APPROVE or REJECT")]
    InvalidAction(String),

    #[error("Duplicate resource: {0}")]
    DuplicateResource(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl CoreError {
    /// Stable machine-readable code for the transport layer.
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::AccountNotFound(_) => "account_not_found",
            CoreError::CustomerNotFound(_) => "customer_not_found",
            CoreError::LoanNotFound(_) => "loan_not_found",
            CoreError::DocumentNotFound(_) => "document_not_found",
            CoreError::AccountNotActive => "account_not_active",
            CoreError::InsufficientFunds { .. } => "insufficient_funds",
            CoreError::InvalidAmount(_) => "invalid_amount",
            CoreError::Unauthorized(_) => "unauthorized",
            CoreError::PasscodeRequired => "passcode_required",
            CoreError::NoValidCode => "no_valid_code",
            CoreError::IncorrectCode => "incorrect_code",
            CoreError::KycNotApproved => "kyc_not_approved",
            CoreError::InvalidAction(_) => "invalid_action",
            CoreError::DuplicateResource(_) => "duplicate_resource",
            CoreError::InvalidRequest(_) => "invalid_request",
        }
    }

    /// True when the failure should be rendered as a missing resource.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CoreError::AccountNotFound(_)
                | CoreError::CustomerNotFound(_)
                | CoreError::LoanNotFound(_)
                | CoreError::DocumentNotFound(_)
        )
    }
}
