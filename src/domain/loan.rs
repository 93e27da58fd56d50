//! Loan entity and repayment math
//!
//! EMI follows standard reducing-balance amortization computed in exact
//! decimal arithmetic: the monthly rate is held at 10 fractional digits and
//! the stored installment is rounded half-up to 2 decimal places, so derived
//! figures are reproducible bit-for-bit.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};

use super::ReviewAction;

pub const MIN_TENURE_MONTHS: u32 = 6;
pub const MAX_TENURE_MONTHS: u32 = 360;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanType {
    Home,
    Personal,
    Car,
    Education,
    Business,
    Gold,
}

impl LoanType {
    /// Fixed annual interest rate in percent. Not user input.
    pub fn interest_rate(&self) -> Decimal {
        match self {
            LoanType::Home => Decimal::new(85, 1),
            LoanType::Car => Decimal::new(95, 1),
            LoanType::Personal => Decimal::new(125, 1),
            LoanType::Education => Decimal::new(75, 1),
            LoanType::Business => Decimal::new(110, 1),
            LoanType::Gold => Decimal::new(100, 1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanStatus {
    Applied,
    UnderReview,
    Approved,
    Rejected,
    Disbursed,
    Active,
    Closed,
    Defaulted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    pub id: Uuid,
    pub loan_number: String,
    pub customer_id: Uuid,
    pub loan_type: LoanType,
    pub principal: Decimal,
    pub interest_rate: Decimal,
    pub tenure_months: u32,
    pub emi: Decimal,
    pub outstanding: Decimal,
    pub total_interest: Decimal,
    pub status: LoanStatus,
    pub purpose: Option<String>,
    pub rejection_reason: Option<String>,
    pub reviewed_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Loan {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        loan_number: String,
        customer_id: Uuid,
        loan_type: LoanType,
        principal: Decimal,
        tenure_months: u32,
        purpose: Option<String>,
    ) -> Self {
        let interest_rate = loan_type.interest_rate();
        let emi = monthly_installment(principal, interest_rate, tenure_months);
        let total_interest = emi * Decimal::from(tenure_months) - principal;
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            loan_number,
            customer_id,
            loan_type,
            principal,
            interest_rate,
            tenure_months,
            emi,
            outstanding: principal,
            total_interest,
            status: LoanStatus::Applied,
            purpose,
            rejection_reason: None,
            reviewed_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a review decision. Only pending loans can be reviewed.
    pub fn review(
        &mut self,
        action: ReviewAction,
        rejection_reason: Option<String>,
        reviewer: Uuid,
    ) -> CoreResult<()> {
        if !matches!(self.status, LoanStatus::Applied | LoanStatus::UnderReview) {
            return Err(CoreError::InvalidRequest(
                "loan is not pending review".to_string(),
            ));
        }

        match action {
            ReviewAction::Approve => {
                self.status = LoanStatus::Approved;
            }
            ReviewAction::Reject => {
                self.status = LoanStatus::Rejected;
                self.rejection_reason = rejection_reason;
            }
        }
        self.reviewed_by = Some(reviewer);
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Equated monthly installment for a reducing-balance loan.
///
/// `EMI = P * r * (1+r)^n / ((1+r)^n - 1)` with `r = annual_rate / 1200`
/// rounded half-up to 10 fractional digits, result rounded half-up to 2.
pub fn monthly_installment(principal: Decimal, annual_rate: Decimal, tenure_months: u32) -> Decimal {
    let monthly_rate = (annual_rate / Decimal::from(1200))
        .round_dp_with_strategy(10, RoundingStrategy::MidpointAwayFromZero);
    let factor = pow(Decimal::ONE + monthly_rate, tenure_months);
    let numerator = principal * monthly_rate * factor;
    let denominator = factor - Decimal::ONE;
    (numerator / denominator).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn pow(base: Decimal, exp: u32) -> Decimal {
    let mut acc = Decimal::ONE;
    for _ in 0..exp {
        acc *= base;
    }
    acc
}
