//! Customer entity
//!
//! The aggregate `kyc_status` is derived state owned by the KYC handler;
//! nothing else may set it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KycStatus {
    Pending,
    Submitted,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,
    pub user_id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub kyc_status: KycStatus,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    pub fn new(user_id: Uuid, email: String, first_name: String, last_name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            email,
            first_name,
            last_name,
            kyc_status: KycStatus::Pending,
            email_verified: false,
            created_at: Utc::now(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_kyc_approved(&self) -> bool {
        self.kyc_status == KycStatus::Approved
    }
}
