//! # Storage
//!
//! Typed helpers over the two Soroban storage tiers used by the campaign.
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key                | Type             | Description                          |
//! |--------------------|------------------|--------------------------------------|
//! | `Config`           | `CampaignConfig` | Immutable campaign parameters        |
//! | `Owner`            | `Address`        | Current campaign owner               |
//! | `TotalRaised`      | `i128`           | Sum of all contributions             |
//! | `TotalWithdrawn`   | `i128`           | Sum of all withdrawals to the owner  |
//! | `ContributorCount` | `u32`            | Number of distinct contributors      |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                     | Type   | Description                          |
//! |-------------------------|--------|--------------------------------------|
//! | `Contribution(address)` | `i128` | Cumulative amount from one address   |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.
//! Contribution entries are never removed.

use soroban_sdk::{contracttype, Address, Env};

use crate::types::CampaignConfig;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Campaign parameters (Instance).
    Config,
    /// Campaign owner (Instance).
    Owner,
    /// Running sum of contributions (Instance).
    TotalRaised,
    /// Running sum of withdrawals (Instance).
    TotalWithdrawn,
    /// Distinct contributor counter (Instance).
    ContributorCount,
    /// Cumulative contribution keyed by contributor (Persistent).
    Contribution(Address),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// Write the campaign parameters, owner and zeroed totals.
/// Called once, from the constructor.
pub fn init_campaign(env: &Env, config: &CampaignConfig, owner: &Address) {
    let instance = env.storage().instance();
    instance.set(&DataKey::Config, config);
    instance.set(&DataKey::Owner, owner);
    instance.set(&DataKey::TotalRaised, &0i128);
    instance.set(&DataKey::TotalWithdrawn, &0i128);
    instance.set(&DataKey::ContributorCount, &0u32);
    bump_instance(env);
}

/// Load the campaign parameters.
/// Panics if the contract was deployed without its constructor.
pub fn load_config(env: &Env) -> CampaignConfig {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .expect("campaign not initialized")
}

pub fn get_owner(env: &Env) -> Address {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Owner)
        .expect("campaign not initialized")
}

pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&DataKey::Owner, owner);
    bump_instance(env);
}

pub fn get_total_raised(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalRaised)
        .unwrap_or(0)
}

pub fn set_total_raised(env: &Env, total: i128) {
    env.storage().instance().set(&DataKey::TotalRaised, &total);
}

pub fn get_total_withdrawn(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalWithdrawn)
        .unwrap_or(0)
}

pub fn set_total_withdrawn(env: &Env, total: i128) {
    env.storage().instance().set(&DataKey::TotalWithdrawn, &total);
    bump_instance(env);
}

pub fn get_contributor_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::ContributorCount)
        .unwrap_or(0)
}

pub fn set_contributor_count(env: &Env, count: u32) {
    env.storage()
        .instance()
        .set(&DataKey::ContributorCount, &count);
}

// ── Persistent Storage Helpers ───────────────────────────────────────

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Cumulative amount contributed by `contributor`, or `None` if they never contributed.
pub fn get_contribution(env: &Env, contributor: &Address) -> Option<i128> {
    let key = DataKey::Contribution(contributor.clone());
    let amount: Option<i128> = env.storage().persistent().get(&key);
    if amount.is_some() {
        bump_persistent(env, &key);
    }
    amount
}

pub fn set_contribution(env: &Env, contributor: &Address, amount: i128) {
    let key = DataKey::Contribution(contributor.clone());
    env.storage().persistent().set(&key, &amount);
    bump_persistent(env, &key);
}
