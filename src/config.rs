//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;

use rust_decimal::Decimal;

/// Core configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Transfers above this amount require a one-time passcode
    pub high_value_threshold: Decimal,

    /// Passcode lifetime in minutes
    pub otp_expiry_minutes: i64,

    /// Failed verification attempts before a passcode is invalidated
    pub otp_max_attempts: u32,

    /// Approved documents required to promote a customer's KYC status
    pub kyc_required_approvals: usize,

    /// Minimum balance assigned to newly opened accounts
    pub default_minimum_balance: Decimal,

    /// Currency code for newly opened accounts
    pub currency: String,
}

impl Config {
    /// Load configuration from the environment, falling back to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let high_value_threshold = parse_or(
            "BANKCORE_HIGH_VALUE_THRESHOLD",
            Decimal::from(10_000),
        )?;
        let otp_expiry_minutes = parse_or("BANKCORE_OTP_EXPIRY_MINUTES", 5)?;
        let otp_max_attempts = parse_or("BANKCORE_OTP_MAX_ATTEMPTS", 5)?;
        let kyc_required_approvals = parse_or("BANKCORE_KYC_REQUIRED_APPROVALS", 2)?;
        let default_minimum_balance =
            parse_or("BANKCORE_DEFAULT_MINIMUM_BALANCE", Decimal::from(500))?;
        let currency = env::var("BANKCORE_CURRENCY").unwrap_or_else(|_| "INR".to_string());

        Ok(Self {
            high_value_threshold,
            otp_expiry_minutes,
            otp_max_attempts,
            kyc_required_approvals,
            default_minimum_balance,
            currency,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            high_value_threshold: Decimal::from(10_000),
            otp_expiry_minutes: 5,
            otp_max_attempts: 5,
            kyc_required_approvals: 2,
            default_minimum_balance: Decimal::from(500),
            currency: "INR".to_string(),
        }
    }
}

fn parse_or<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue(key)),
        Err(_) => Ok(default),
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
