//! Passcode guard
//!
//! Issues and verifies one-time passcodes. Sensitive operations call
//! `verify` as their step-up check; the code itself travels to the user
//! through the notification sink.

use std::sync::Arc;

use rand::rngs::OsRng;
use rand::Rng;

use crate::audit::{AuditAction, AuditRecord, AuditSink};
use crate::config::Config;
use crate::domain::{OperationContext, Otp, OtpPurpose};
use crate::error::{CoreError, CoreResult};
use crate::notify::{Notification, NotificationSink};
use crate::store::{CustomerRepository, OtpRepository, Store};

pub struct OtpHandler {
    otps: OtpRepository,
    customers: CustomerRepository,
    notifier: Arc<dyn NotificationSink>,
    audit: Arc<dyn AuditSink>,
    config: Config,
}

impl OtpHandler {
    pub fn new(
        store: Store,
        notifier: Arc<dyn NotificationSink>,
        audit: Arc<dyn AuditSink>,
        config: Config,
    ) -> Self {
        Self {
            otps: store.otps(),
            customers: store.customers(),
            notifier,
            audit,
            config,
        }
    }

    /// Issue a fresh passcode for (email, purpose).
    ///
    /// Any previously valid code for the pair is invalidated atomically with
    /// the insert, so at most one valid code exists at a time. Returns the
    /// code for out-of-band delivery.
    pub async fn issue(
        &self,
        email: &str,
        purpose: OtpPurpose,
        ctx: &OperationContext,
    ) -> CoreResult<String> {
        let customer = self
            .customers
            .find_by_email(email)
            .await
            .ok_or_else(|| CoreError::CustomerNotFound(email.to_string()))?;

        let code = generate_code();
        let otp = Otp::new(
            email.to_string(),
            code.clone(),
            purpose,
            self.config.otp_expiry_minutes,
        );
        self.otps.replace(otp).await;

        self.notifier.notify(Notification::otp_delivery(
            customer.user_id,
            &code,
            purpose.as_str(),
            self.config.otp_expiry_minutes,
        ));
        self.audit.record(
            AuditRecord::new(AuditAction::OtpIssued, "otp")
                .actor(ctx.actor_user_id)
                .resource_id(purpose.as_str()),
        );

        tracing::debug!(purpose = purpose.as_str(), "passcode issued");
        Ok(code)
    }

    /// Verify and consume the latest valid passcode for (email, purpose).
    pub async fn verify(
        &self,
        email: &str,
        purpose: OtpPurpose,
        submitted_code: &str,
        ctx: &OperationContext,
    ) -> CoreResult<()> {
        self.otps
            .verify_and_consume(email, purpose, submitted_code, self.config.otp_max_attempts)
            .await?;

        // First successful email-verification use marks the address verified.
        if purpose == OtpPurpose::EmailVerification {
            if let Some(customer) = self.customers.find_by_email(email).await {
                self.customers
                    .update(customer.id, |c| c.email_verified = true)
                    .await?;
            }
        }

        self.audit.record(
            AuditRecord::new(AuditAction::OtpVerified, "otp")
                .actor(ctx.actor_user_id)
                .resource_id(purpose.as_str()),
        );
        Ok(())
    }
}

/// Cryptographically random 6-digit code, zero-padded.
fn generate_code() -> String {
    format!("{:06}", OsRng.gen_range(0..1_000_000u32))
}
