//! # Reward policy
//!
//! Pure functions deciding what a single contribution earns. No storage, no
//! cross-contract calls; the campaign invokes the issuers with the results.

use crate::Error;

/// Credits earned by a contribution: `amount * rate`.
///
/// Overflow is an error, never a wrapped value.
pub fn compute_credit(amount: i128, rate: i128) -> Result<i128, Error> {
    amount.checked_mul(rate).ok_or(Error::ArithmeticOverflow)
}

/// Whether a single contribution qualifies for a badge.
///
/// Only the contribution's own amount counts. Several smaller contributions
/// that add up past the threshold do not qualify.
pub fn is_badge_eligible(amount: i128, threshold: i128) -> bool {
    amount >= threshold
}
