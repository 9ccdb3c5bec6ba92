//! # Types
//!
//! Shared data structures of the crowdfunding campaign.
//!
//! ## Config / ledger split
//!
//! A campaign is stored as one immutable [`CampaignConfig`] entry written by the
//! constructor, plus small mutable entries (owner, totals, per-contributor
//! amounts) that change on contributions and withdrawals. Only the owner can
//! change after deployment, and only through `transfer_ownership`.

use soroban_sdk::{contracttype, Address};

/// Immutable campaign parameters, fixed at deployment.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignConfig {
    /// Token contract carrying the contributed funds.
    pub asset: Address,
    /// Amount that must be raised before funds can be withdrawn.
    pub funding_goal: i128,
    /// Minimum single contribution that earns a badge.
    pub nft_threshold: i128,
    /// Credits issued per unit of contribution.
    pub token_conversion_rate: i128,
    /// Fungible credit issuer invoked on every contribution.
    pub credit_issuer: Address,
    /// Badge issuer invoked at most once per contributor.
    pub badge_issuer: Address,
}

/// Receipt returned by `contribute`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Contribution {
    pub contributor: Address,
    /// Amount of this single contribution.
    pub amount: i128,
    /// Contributor's cumulative amount after this contribution.
    pub cumulative: i128,
    /// Campaign total after this contribution.
    pub total_raised: i128,
    /// Credits minted to the contributor for this contribution.
    pub credits: i128,
    /// Whether this contribution minted the contributor's badge.
    pub badge_awarded: bool,
}
