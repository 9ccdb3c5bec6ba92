//! # Funds controller
//!
//! Owner gate, goal gate, fund release and ownership transfer.
//!
//! Withdrawal releases the campaign's entire held balance of the funding
//! asset, which includes everything contributed past the goal. It may be
//! called again later to release contributions that arrived after a previous
//! withdrawal; with nothing held it fails with `NothingToWithdraw`.

use soroban_sdk::{token, Address, Env};

use crate::events::{self, FundsWithdrawn, OwnershipTransferred};
use crate::storage;
use crate::Error;

/// Return the owner if `caller` is the owner.
pub fn require_owner(env: &Env, caller: &Address) -> Result<Address, Error> {
    let owner = storage::get_owner(env);
    if *caller != owner {
        return Err(Error::Unauthorized);
    }
    Ok(owner)
}

/// True once cumulative contributions meet or exceed the funding goal.
pub fn goal_reached(env: &Env) -> bool {
    storage::get_total_raised(env) >= storage::load_config(env).funding_goal
}

/// Amount of the funding asset currently held by the campaign.
pub fn held_balance(env: &Env) -> i128 {
    let config = storage::load_config(env);
    token::Client::new(env, &config.asset).balance(&env.current_contract_address())
}

/// Release the held balance to the owner.
///
/// The asset transfer is the last step; if it fails the host discards the
/// bookkeeping written before it.
pub fn withdraw(env: &Env, caller: &Address) -> Result<i128, Error> {
    let owner = require_owner(env, caller)?;

    let config = storage::load_config(env);
    let total_raised = storage::get_total_raised(env);
    if total_raised < config.funding_goal {
        return Err(Error::GoalNotMet);
    }

    let contract = env.current_contract_address();
    let asset = token::Client::new(env, &config.asset);
    let amount = asset.balance(&contract);
    if amount <= 0 {
        return Err(Error::NothingToWithdraw);
    }

    let withdrawn = storage::get_total_withdrawn(env)
        .checked_add(amount)
        .ok_or(Error::ArithmeticOverflow)?;
    storage::set_total_withdrawn(env, withdrawn);

    events::emit_funds_withdrawn(
        env,
        FundsWithdrawn {
            owner: owner.clone(),
            amount,
            total_raised,
        },
    );

    asset.transfer(&contract, &owner, &amount);
    Ok(amount)
}

pub fn transfer_ownership(env: &Env, caller: &Address, new_owner: &Address) -> Result<(), Error> {
    let previous = require_owner(env, caller)?;
    storage::set_owner(env, new_owner);

    events::emit_ownership_transferred(
        env,
        OwnershipTransferred {
            previous,
            new_owner: new_owner.clone(),
        },
    );
    Ok(())
}
