//! # Crowdfunding Campaign Contract
//!
//! A single-campaign Soroban contract that pools contributions toward a fixed
//! goal, rewards contributors through two issuer contracts, and releases the
//! pooled funds to its owner once the goal is met.
//!
//! | Phase        | Entry Point(s)                                        |
//! |--------------|-------------------------------------------------------|
//! | Deployment   | `__constructor`                                       |
//! | Funding      | [`Crowdfunding::contribute`]                          |
//! | Release      | [`Crowdfunding::withdraw_funds`]                      |
//! | Owner admin  | [`Crowdfunding::transfer_ownership`]                  |
//! | Queries      | `funding_goal`, `nft_threshold`, `token_conversion_rate`, `owner`, `contributions`, `total_raised`, ... |
//!
//! ## Architecture
//!
//! Accounting lives in [`ledger`], reward rules in [`reward`], the owner and
//! goal gates in [`funds`]. Storage access is fully delegated to [`storage`].
//! The issuers are reached through the interfaces in [`issuers`].
//!
//! ## Atomicity
//!
//! `contribute` stages its ledger update, collects payment, calls both
//! issuers and only then commits. Any failure along the way aborts the
//! invocation and the host discards every effect, including the payment.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, panic_with_error, token, Address, Env};

mod events;
mod funds;
pub mod issuers;
mod ledger;
pub mod reward;
mod storage;
mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_events;

use events::{BadgeAwarded, Contributed, GoalReached};
use issuers::{BadgeIssuerClient, CreditIssuerClient};
pub use types::{CampaignConfig, Contribution};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// Contribution of zero (or a negative amount).
    InvalidAmount = 1,
    /// Owner-gated operation called by someone else.
    Unauthorized = 2,
    /// Withdrawal attempted before the funding goal was met.
    GoalNotMet = 3,
    /// Credit or total computation overflowed.
    ArithmeticOverflow = 4,
    /// Constructor parameters out of range.
    InvalidConfig = 5,
    /// Withdrawal attempted with no funds held.
    NothingToWithdraw = 6,
}

#[contract]
pub struct Crowdfunding;

#[contractimpl]
impl Crowdfunding {
    /// Deploy the campaign.
    ///
    /// - `funding_goal` must be positive.
    /// - `nft_threshold` and `token_conversion_rate` must not be negative.
    /// - The campaign must afterwards be set as minter on both issuers.
    #[allow(clippy::too_many_arguments)]
    pub fn __constructor(
        env: Env,
        owner: Address,
        asset: Address,
        funding_goal: i128,
        nft_threshold: i128,
        token_conversion_rate: i128,
        credit_issuer: Address,
        badge_issuer: Address,
    ) {
        if funding_goal <= 0 || nft_threshold < 0 || token_conversion_rate < 0 {
            panic_with_error!(&env, Error::InvalidConfig);
        }

        let config = CampaignConfig {
            asset,
            funding_goal,
            nft_threshold,
            token_conversion_rate,
            credit_issuer,
            badge_issuer,
        };
        storage::init_campaign(&env, &config, &owner);
    }

    // ─────────────────────────────────────────────────────────
    // Funding
    // ─────────────────────────────────────────────────────────

    /// Contribute `amount` of the campaign asset.
    ///
    /// Mints `amount * token_conversion_rate` credits to the contributor and,
    /// when this single contribution reaches `nft_threshold` and the
    /// contributor holds no badge yet, mints their badge.
    pub fn contribute(env: Env, contributor: Address, amount: i128) -> Result<Contribution, Error> {
        contributor.require_auth();

        let config = storage::load_config(&env);

        // Stage: nothing is written until both issuers have accepted.
        let staged = ledger::stage(&env, &contributor, amount)?;
        let credits = reward::compute_credit(amount, config.token_conversion_rate)?;

        token::Client::new(&env, &config.asset).transfer(
            &contributor,
            &env.current_contract_address(),
            &amount,
        );

        CreditIssuerClient::new(&env, &config.credit_issuer).mint(&contributor, &credits);

        let badges = BadgeIssuerClient::new(&env, &config.badge_issuer);
        let badge_awarded = reward::is_badge_eligible(amount, config.nft_threshold)
            && badges.balance_of(&contributor) == 0;
        if badge_awarded {
            badges.mint(&contributor);
        }

        // Commit.
        ledger::commit(&env, &staged);

        events::emit_contributed(
            &env,
            Contributed {
                contributor: contributor.clone(),
                amount,
                cumulative: staged.cumulative,
                total_raised: staged.total_raised,
                credits,
            },
        );
        if badge_awarded {
            events::emit_badge_awarded(
                &env,
                BadgeAwarded {
                    contributor: contributor.clone(),
                    amount,
                },
            );
        }
        if staged.crosses_goal(config.funding_goal) {
            events::emit_goal_reached(
                &env,
                GoalReached {
                    total_raised: staged.total_raised,
                    funding_goal: config.funding_goal,
                },
            );
        }

        Ok(Contribution {
            contributor,
            amount,
            cumulative: staged.cumulative,
            total_raised: staged.total_raised,
            credits,
            badge_awarded,
        })
    }

    // ─────────────────────────────────────────────────────────
    // Owner operations
    // ─────────────────────────────────────────────────────────

    /// Release every held unit of the campaign asset to the owner.
    ///
    /// Fails with `Unauthorized` for anyone but the owner, then with
    /// `GoalNotMet` while `total_raised < funding_goal`. Returns the amount
    /// transferred.
    pub fn withdraw_funds(env: Env, caller: Address) -> Result<i128, Error> {
        caller.require_auth();
        funds::withdraw(&env, &caller)
    }

    /// Hand the campaign to `new_owner`. Effective immediately.
    pub fn transfer_ownership(env: Env, caller: Address, new_owner: Address) -> Result<(), Error> {
        caller.require_auth();
        funds::transfer_ownership(&env, &caller, &new_owner)
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn funding_goal(env: Env) -> i128 {
        storage::load_config(&env).funding_goal
    }

    pub fn nft_threshold(env: Env) -> i128 {
        storage::load_config(&env).nft_threshold
    }

    pub fn token_conversion_rate(env: Env) -> i128 {
        storage::load_config(&env).token_conversion_rate
    }

    pub fn owner(env: Env) -> Address {
        storage::get_owner(&env)
    }

    /// Cumulative amount contributed by `contributor` (zero if none).
    pub fn contributions(env: Env, contributor: Address) -> i128 {
        ledger::contribution_of(&env, &contributor)
    }

    pub fn total_raised(env: Env) -> i128 {
        storage::get_total_raised(&env)
    }

    pub fn total_withdrawn(env: Env) -> i128 {
        storage::get_total_withdrawn(&env)
    }

    pub fn contributor_count(env: Env) -> u32 {
        storage::get_contributor_count(&env)
    }

    pub fn goal_reached(env: Env) -> bool {
        funds::goal_reached(&env)
    }

    /// Amount of the campaign asset the contract currently holds.
    pub fn held_balance(env: Env) -> i128 {
        funds::held_balance(&env)
    }

    pub fn config(env: Env) -> CampaignConfig {
        storage::load_config(&env)
    }
}
