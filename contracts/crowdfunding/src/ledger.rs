//! # Ledger
//!
//! Per-contributor accounting and campaign totals.
//!
//! Updates are two-phase: [`stage`] computes the post-contribution values
//! without touching storage, and [`commit`] writes them. The campaign commits
//! only after every issuer call for the contribution has succeeded, so ledger
//! storage is never written for a contribution that ends up rejected.

use soroban_sdk::{Address, Env};

use crate::storage;
use crate::Error;

/// A contribution whose ledger effects have been computed but not yet written.
#[derive(Clone, Debug)]
pub struct StagedContribution {
    pub contributor: Address,
    pub amount: i128,
    /// Contributor's cumulative amount after the contribution.
    pub cumulative: i128,
    /// Campaign total before the contribution.
    pub previous_total: i128,
    /// Campaign total after the contribution.
    pub total_raised: i128,
    /// First contribution from this address.
    pub first_time: bool,
}

impl StagedContribution {
    /// True when this contribution moves the total from below `goal` to at or above it.
    pub fn crosses_goal(&self, goal: i128) -> bool {
        self.previous_total < goal && self.total_raised >= goal
    }
}

/// Compute the ledger effect of `contributor` adding `amount`.
pub fn stage(env: &Env, contributor: &Address, amount: i128) -> Result<StagedContribution, Error> {
    if amount <= 0 {
        return Err(Error::InvalidAmount);
    }

    let previous = storage::get_contribution(env, contributor);
    let cumulative = previous
        .unwrap_or(0)
        .checked_add(amount)
        .ok_or(Error::ArithmeticOverflow)?;

    let previous_total = storage::get_total_raised(env);
    let total_raised = previous_total
        .checked_add(amount)
        .ok_or(Error::ArithmeticOverflow)?;

    Ok(StagedContribution {
        contributor: contributor.clone(),
        amount,
        cumulative,
        previous_total,
        total_raised,
        first_time: previous.is_none(),
    })
}

/// Write a staged contribution. Entry and total are updated together.
pub fn commit(env: &Env, staged: &StagedContribution) {
    storage::set_contribution(env, &staged.contributor, staged.cumulative);
    storage::set_total_raised(env, staged.total_raised);

    if staged.first_time {
        let count = storage::get_contributor_count(env);
        storage::set_contributor_count(env, count.saturating_add(1));
    }
}

/// Cumulative amount contributed by `contributor`; zero if none.
pub fn contribution_of(env: &Env, contributor: &Address) -> i128 {
    storage::get_contribution(env, contributor).unwrap_or(0)
}
