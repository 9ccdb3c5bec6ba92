//! # Issuer interfaces
//!
//! Capability interfaces for the two reward collaborators. Their addresses are
//! injected at construction; any contract exposing these functions can serve,
//! including the `crowd_token` and `crowd_badge` contracts of this workspace.

use soroban_sdk::{contractclient, Address, Env};

/// Fungible credit issuer. The campaign must be its authorized minter.
#[contractclient(name = "CreditIssuerClient")]
pub trait CreditIssuer {
    fn mint(env: Env, to: Address, amount: i128);
}

/// Badge issuer. The campaign must be its authorized minter.
///
/// The campaign checks `balance_of` before minting and never mints twice for
/// the same address, whether or not the issuer itself caps balances at one.
#[contractclient(name = "BadgeIssuerClient")]
pub trait BadgeIssuer {
    fn mint(env: Env, to: Address);
    fn balance_of(env: Env, owner: Address) -> u32;
}
