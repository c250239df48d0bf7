//! Account number generation domain service.

use rand::Rng;

/// Smallest account number ever issued.
pub const ACCOUNT_NUMBER_MIN: i64 = 1_000_000_000;

/// Exclusive upper bound of issued account numbers.
pub const ACCOUNT_NUMBER_MAX: i64 = 1_900_000_000;

/// Source of candidate account numbers.
///
/// Candidates are not guaranteed unique; the caller checks each one against
/// the store before accepting it.
pub trait AccountNumberGenerator: Send + Sync {
    /// Produce the next candidate account number.
    fn next_candidate(&self) -> i64;
}

/// Uniformly random ten-digit account numbers in
/// `[ACCOUNT_NUMBER_MIN, ACCOUNT_NUMBER_MAX)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomAccountNumberGenerator;

impl RandomAccountNumberGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl AccountNumberGenerator for RandomAccountNumberGenerator {
    fn next_candidate(&self) -> i64 {
        rand::rng().random_range(ACCOUNT_NUMBER_MIN..ACCOUNT_NUMBER_MAX)
    }
}

/// Whether a number lies in the issued account number range.
pub fn is_issued_range(account_number: i64) -> bool {
    (ACCOUNT_NUMBER_MIN..ACCOUNT_NUMBER_MAX).contains(&account_number)
}
