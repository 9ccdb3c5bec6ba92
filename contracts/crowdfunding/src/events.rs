//! # Events
//!
//! Structured events published by the campaign. The off-chain indexer keys on
//! the leading topic symbol.
//!
//! | Topic                     | Data                   |
//! |---------------------------|------------------------|
//! | (`contrib`, contributor)  | [`Contributed`]        |
//! | (`badge`, contributor)    | [`BadgeAwarded`]       |
//! | (`goal_met`,)             | [`GoalReached`]        |
//! | (`withdrawn`, owner)      | [`FundsWithdrawn`]     |
//! | (`owner_set`,)            | [`OwnershipTransferred`] |

use soroban_sdk::{contracttype, symbol_short, Address, Env};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Contributed {
    pub contributor: Address,
    pub amount: i128,
    pub cumulative: i128,
    pub total_raised: i128,
    pub credits: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BadgeAwarded {
    pub contributor: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GoalReached {
    pub total_raised: i128,
    pub funding_goal: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundsWithdrawn {
    pub owner: Address,
    pub amount: i128,
    pub total_raised: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnershipTransferred {
    pub previous: Address,
    pub new_owner: Address,
}

pub fn emit_contributed(env: &Env, event: Contributed) {
    env.events().publish(
        (symbol_short!("contrib"), event.contributor.clone()),
        event,
    );
}

pub fn emit_badge_awarded(env: &Env, event: BadgeAwarded) {
    env.events()
        .publish((symbol_short!("badge"), event.contributor.clone()), event);
}

pub fn emit_goal_reached(env: &Env, event: GoalReached) {
    env.events().publish((symbol_short!("goal_met"),), event);
}

pub fn emit_funds_withdrawn(env: &Env, event: FundsWithdrawn) {
    env.events()
        .publish((symbol_short!("withdrawn"), event.owner.clone()), event);
}

pub fn emit_ownership_transferred(env: &Env, event: OwnershipTransferred) {
    env.events().publish((symbol_short!("owner_set"),), event);
}
