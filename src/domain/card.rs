//! Cards
//!
//! Only a masked number and a digest of the full number are retained; the
//! clear number leaves the core immediately after issuance.

use chrono::{DateTime, Months, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardType {
    Debit,
    Credit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardStatus {
    Active,
    Blocked,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: Uuid,
    pub account_number: String,
    pub card_type: CardType,
    pub masked_number: String,
    pub number_hash: String,
    pub holder_name: String,
    pub expiry_date: NaiveDate,
    pub status: CardStatus,
    pub credit_limit: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

impl Card {
    pub fn new(
        card_number: &str,
        account_number: String,
        card_type: CardType,
        holder_name: String,
        credit_limit: Option<Decimal>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_number,
            card_type,
            masked_number: mask_card_number(card_number),
            number_hash: hash_card_number(card_number),
            holder_name,
            expiry_date: Utc::now().date_naive() + Months::new(60),
            status: CardStatus::Active,
            credit_limit,
            created_at: Utc::now(),
        }
    }
}

fn mask_card_number(card_number: &str) -> String {
    let last4 = &card_number[card_number.len().saturating_sub(4)..];
    format!("**** **** **** {}", last4)
}

fn hash_card_number(card_number: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(card_number.as_bytes());
    hex::encode(hasher.finalize())
}
