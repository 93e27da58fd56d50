//! Reference number generation
//!
//! Produces unique, human-presentable identifiers for accounts, loans,
//! transactions and cards. A process-wide monotonic sequence is combined with
//! a random suffix so that numbers stay collision-resistant under high
//! request rates and across restarts, without depending on wall-clock
//! granularity.

use std::sync::atomic::{AtomicU64, Ordering};

use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::Rng;

const SUFFIX_LEN: usize = 6;

/// Generator for reference numbers.
#[derive(Debug, Default)]
pub struct RefGen {
    sequence: AtomicU64,
}

impl RefGen {
    pub fn new() -> Self {
        Self {
            sequence: AtomicU64::new(1),
        }
    }

    /// Transaction reference, e.g. `TXN00000042K7QX2M`.
    pub fn transaction_ref(&self) -> String {
        self.next("TXN")
    }

    /// Loan number, e.g. `LN00000007A3ZR9B`.
    pub fn loan_number(&self) -> String {
        self.next("LN")
    }

    /// Account number, e.g. `FINS00000001QW8T4C`.
    pub fn account_number(&self) -> String {
        self.next("FINS")
    }

    /// 16-digit card number with a retail prefix.
    pub fn card_number(&self) -> String {
        let mut number = String::with_capacity(16);
        number.push('4');
        for _ in 0..15 {
            let digit: u8 = OsRng.gen_range(0..10);
            number.push(char::from(b'0' + digit));
        }
        number
    }

    fn next(&self, prefix: &str) -> String {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        format!("{}{:08}{}", prefix, seq, random_suffix(SUFFIX_LEN))
    }
}

fn random_suffix(len: usize) -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(|b| char::from(b).to_ascii_uppercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_prefixes() {
        let refgen = RefGen::new();
        assert!(refgen.transaction_ref().starts_with("TXN"));
        assert!(refgen.loan_number().starts_with("LN"));
        assert!(refgen.account_number().starts_with("FINS"));
    }

    #[test]
    fn test_card_number_shape() {
        let refgen = RefGen::new();
        let number = refgen.card_number();
        assert_eq!(number.len(), 16);
        assert!(number.starts_with('4'));
        assert!(number.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_unique_under_concurrent_generation() {
        let refgen = Arc::new(RefGen::new());
        let mut handles = Vec::new();

        for _ in 0..8 {
            let refgen = Arc::clone(&refgen);
            handles.push(std::thread::spawn(move || {
                (0..250)
                    .map(|_| refgen.transaction_ref())
                    .collect::<Vec<_>>()
            }));
        }

        let mut seen = HashSet::new();
        for handle in handles {
            for reference in handle.join().unwrap() {
                assert!(seen.insert(reference), "duplicate reference generated");
            }
        }
        assert_eq!(seen.len(), 2000);
    }
}
