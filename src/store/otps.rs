//! Passcode repository
//!
//! Both operations here are single critical sections under the write lock,
//! which is what upholds the "at most one valid code per (email, purpose)"
//! invariant under concurrent issuance and verification.

use chrono::Utc;

use crate::domain::{Otp, OtpPurpose};
use crate::error::{CoreError, CoreResult};

use super::Store;

#[derive(Debug, Clone)]
pub struct OtpRepository {
    store: Store,
}

impl OtpRepository {
    pub(crate) fn new(store: Store) -> Self {
        Self { store }
    }

    /// Store a fresh code, invalidating every predecessor for the same
    /// (email, purpose) pair in the same critical section.
    pub async fn replace(&self, otp: Otp) {
        let mut otps = self.store.inner.otps.write().await;
        for existing in otps.iter_mut() {
            if existing.email == otp.email && existing.purpose == otp.purpose && !existing.used {
                existing.used = true;
            }
        }
        otps.push(otp);
    }

    /// Verify a submitted code against the latest valid one and consume it.
    ///
    /// A superseded or already-consumed code fails with `NoValidCode` even
    /// when it matches what was once issued. A genuine mismatch increments
    /// the attempt counter and fails with `IncorrectCode`; once
    /// `max_attempts` is reached the code is invalidated outright. A
    /// successful match marks the code used, so it can never verify twice.
    pub async fn verify_and_consume(
        &self,
        email: &str,
        purpose: OtpPurpose,
        submitted_code: &str,
        max_attempts: u32,
    ) -> CoreResult<Otp> {
        let now = Utc::now();
        let mut otps = self.store.inner.otps.write().await;

        let candidate = otps
            .iter()
            .enumerate()
            .filter(|(_, o)| o.email == email && o.purpose == purpose && o.is_valid(now))
            .max_by_key(|(_, o)| o.created_at)
            .map(|(index, _)| index);

        let index = candidate.ok_or(CoreError::NoValidCode)?;

        if otps[index].code != submitted_code {
            let superseded = otps.iter().any(|o| {
                o.email == email
                    && o.purpose == purpose
                    && o.code == submitted_code
                    && !o.is_valid(now)
            });
            if superseded {
                return Err(CoreError::NoValidCode);
            }

            let otp = &mut otps[index];
            otp.attempt_count += 1;
            if otp.attempt_count >= max_attempts {
                otp.used = true;
            }
            return Err(CoreError::IncorrectCode);
        }

        let otp = &mut otps[index];
        otp.used = true;
        Ok(otp.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn otp(email: &str, code: &str, purpose: OtpPurpose) -> Otp {
        Otp::new(email.to_string(), code.to_string(), purpose, 5)
    }

    #[tokio::test]
    async fn test_verify_consumes_code() {
        let store = Store::new();
        let otps = store.otps();
        otps.replace(otp("a@example.com", "123456", OtpPurpose::Transaction))
            .await;

        otps.verify_and_consume("a@example.com", OtpPurpose::Transaction, "123456", 5)
            .await
            .unwrap();

        // Second use of the same code fails with NoValidCode
        let err = otps
            .verify_and_consume("a@example.com", OtpPurpose::Transaction, "123456", 5)
            .await
            .unwrap_err();
        assert_eq!(err, CoreError::NoValidCode);
    }

    #[tokio::test]
    async fn test_replace_invalidates_predecessor() {
        let store = Store::new();
        let otps = store.otps();
        otps.replace(otp("a@example.com", "111111", OtpPurpose::Transaction))
            .await;
        otps.replace(otp("a@example.com", "222222", OtpPurpose::Transaction))
            .await;

        // The old code is gone even though it was correct
        let err = otps
            .verify_and_consume("a@example.com", OtpPurpose::Transaction, "111111", 5)
            .await
            .unwrap_err();
        assert_eq!(err, CoreError::NoValidCode);

        otps.verify_and_consume("a@example.com", OtpPurpose::Transaction, "222222", 5)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_purposes_are_independent() {
        let store = Store::new();
        let otps = store.otps();
        otps.replace(otp("a@example.com", "111111", OtpPurpose::Transaction))
            .await;
        otps.replace(otp("a@example.com", "222222", OtpPurpose::Login))
            .await;

        otps.verify_and_consume("a@example.com", OtpPurpose::Transaction, "111111", 5)
            .await
            .unwrap();
        otps.verify_and_consume("a@example.com", OtpPurpose::Login, "222222", 5)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_lockout_after_max_attempts() {
        let store = Store::new();
        let otps = store.otps();
        otps.replace(otp("a@example.com", "123456", OtpPurpose::Transaction))
            .await;

        for _ in 0..3 {
            let err = otps
                .verify_and_consume("a@example.com", OtpPurpose::Transaction, "000000", 3)
                .await
                .unwrap_err();
            assert_eq!(err, CoreError::IncorrectCode);
        }

        // Code invalidated by the lockout; even the correct code fails now
        let err = otps
            .verify_and_consume("a@example.com", OtpPurpose::Transaction, "123456", 3)
            .await
            .unwrap_err();
        assert_eq!(err, CoreError::NoValidCode);
    }
}
