//! One-time passcodes
//!
//! A passcode belongs to an (email, purpose) pair. At most one valid code may
//! exist per pair at any time; issuing a new code invalidates its
//! predecessors. A code becomes permanently unusable after first successful
//! use or after expiry.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OtpPurpose {
    EmailVerification,
    Login,
    Transaction,
    PasswordReset,
    CardActivation,
}

impl OtpPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            OtpPurpose::EmailVerification => "EMAIL_VERIFICATION",
            OtpPurpose::Login => "LOGIN",
            OtpPurpose::Transaction => "TRANSACTION",
            OtpPurpose::PasswordReset => "PASSWORD_RESET",
            OtpPurpose::CardActivation => "CARD_ACTIVATION",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Otp {
    pub id: Uuid,
    pub email: String,
    pub code: String,
    pub purpose: OtpPurpose,
    pub expires_at: DateTime<Utc>,
    pub used: bool,
    pub attempt_count: u32,
    pub created_at: DateTime<Utc>,
}

impl Otp {
    pub fn new(email: String, code: String, purpose: OtpPurpose, ttl_minutes: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            code,
            purpose,
            expires_at: now + Duration::minutes(ttl_minutes),
            used: false,
            attempt_count: 0,
            created_at: now,
        }
    }

    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        !self.used && self.expires_at > now
    }
}
