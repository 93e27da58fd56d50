//! Loan origination
//!
//! Applications are gated on approved KYC; the interest rate comes from the
//! product table, never from the caller. Review happens exactly once.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::audit::{AuditAction, AuditRecord, AuditSink};
use crate::domain::{
    Loan, OperationContext, ReviewAction, MAX_TENURE_MONTHS, MIN_TENURE_MONTHS,
};
use crate::error::{CoreError, CoreResult};
use crate::notify::{Notification, NotificationSink};
use crate::refgen::RefGen;
use crate::store::{CustomerRepository, LoanRepository, Store};

use super::commands::LoanApplication;

pub struct LoanHandler {
    loans: LoanRepository,
    customers: CustomerRepository,
    refgen: Arc<RefGen>,
    notifier: Arc<dyn NotificationSink>,
    audit: Arc<dyn AuditSink>,
}

impl LoanHandler {
    pub fn new(
        store: Store,
        refgen: Arc<RefGen>,
        notifier: Arc<dyn NotificationSink>,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        Self {
            loans: store.loans(),
            customers: store.customers(),
            refgen,
            notifier,
            audit,
        }
    }

    /// Record a loan application with its amortization figures.
    ///
    /// Fails before anything is written if the customer's KYC is not
    /// approved or the terms are out of range.
    pub async fn apply(
        &self,
        application: LoanApplication,
        ctx: &OperationContext,
    ) -> CoreResult<Loan> {
        let customer = self.customers.get(application.customer_id).await?;
        if !customer.is_kyc_approved() {
            return Err(CoreError::KycNotApproved);
        }
        if application.principal <= Decimal::ZERO {
            return Err(CoreError::InvalidRequest(
                "loan principal must be positive".to_string(),
            ));
        }
        if !(MIN_TENURE_MONTHS..=MAX_TENURE_MONTHS).contains(&application.tenure_months) {
            return Err(CoreError::InvalidRequest(format!(
                "tenure must be between {} and {} months",
                MIN_TENURE_MONTHS, MAX_TENURE_MONTHS
            )));
        }

        let loan = Loan::new(
            self.refgen.loan_number(),
            application.customer_id,
            application.loan_type,
            application.principal,
            application.tenure_months,
            application.purpose,
        );
        let loan = self.loans.insert(loan).await?;

        self.notifier.notify(Notification::loan_status(
            customer.user_id,
            &loan.loan_number,
            "submitted",
        ));
        self.audit.record(
            AuditRecord::new(AuditAction::LoanApplied, "loan")
                .actor(ctx.actor_user_id)
                .resource_id(loan.loan_number.clone())
                .details(serde_json::json!({
                    "loan_type": loan.loan_type,
                    "principal": loan.principal,
                    "tenure_months": loan.tenure_months,
                    "emi": loan.emi,
                })),
        );

        tracing::info!(
            loan_number = %loan.loan_number,
            emi = %loan.emi,
            "loan application recorded"
        );
        Ok(loan)
    }

    /// Apply a staff review decision to a pending loan.
    pub async fn review(
        &self,
        loan_id: uuid::Uuid,
        action: ReviewAction,
        rejection_reason: Option<String>,
        reviewer: uuid::Uuid,
        ctx: &OperationContext,
    ) -> CoreResult<Loan> {
        let loan = self
            .loans
            .update(loan_id, |loan| {
                loan.review(action, rejection_reason.clone(), reviewer)
            })
            .await?;

        if let Ok(customer) = self.customers.get(loan.customer_id).await {
            self.notifier.notify(Notification::loan_status(
                customer.user_id,
                &loan.loan_number,
                action.as_outcome(),
            ));
        }
        self.audit.record(
            AuditRecord::new(AuditAction::LoanReviewed, "loan")
                .actor(ctx.actor_user_id)
                .resource_id(loan.loan_number.clone())
                .details(serde_json::json!({ "outcome": action.as_outcome() })),
        );
        Ok(loan)
    }

    pub async fn list_for_customer(&self, customer_id: uuid::Uuid) -> Vec<Loan> {
        self.loans.list_by_customer(customer_id).await
    }
}
