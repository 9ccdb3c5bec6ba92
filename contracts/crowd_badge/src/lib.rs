//! # Crowd Badge
//!
//! Non-fungible supporter badges, at most one per address. Only the
//! configured minter (normally the crowdfunding contract) can mint.
//!
//! Minting for an address that already owns a badge is a no-op, so
//! `balance_of` is always 0 or 1.

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, symbol_short, Address, Env,
};


const DAY_IN_LEDGERS: u32 = 17_280;
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    MinterNotSet = 1,
    BadgeNotFound = 2,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Admin,
    Minter,
    /// Number of badges minted so far; also the next badge id.
    Minted,
    /// Badge id held by an address (Persistent).
    BadgeOf(Address),
    /// Owner of a badge id (Persistent).
    OwnerOf(u64),
}

#[contract]
pub struct CrowdBadge;

#[contractimpl]
impl CrowdBadge {
    pub fn __constructor(env: Env, admin: Address) {
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Minted, &0u64);
        bump_instance(&env);
    }

    /// Authorize `minter` to mint badges. Admin only.
    pub fn set_minter(env: Env, minter: Address) {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .expect("admin not set");
        admin.require_auth();

        env.storage().instance().set(&DataKey::Minter, &minter);
        bump_instance(&env);

        env.events().publish((symbol_short!("minter"),), minter);
    }

    pub fn minter(env: Env) -> Option<Address> {
        env.storage().instance().get(&DataKey::Minter)
    }

    /// Mint a badge to `to` unless they already own one.
    pub fn mint(env: Env, to: Address) -> Result<(), Error> {
        let minter: Address = env
            .storage()
            .instance()
            .get(&DataKey::Minter)
            .ok_or(Error::MinterNotSet)?;
        minter.require_auth();

        if read_badge_of(&env, &to).is_some() {
            return Ok(());
        }

        let id: u64 = env
            .storage()
            .instance()
            .get(&DataKey::Minted)
            .unwrap_or(0);
        env.storage().instance().set(&DataKey::Minted, &(id + 1));
        bump_instance(&env);

        write_persistent(&env, &DataKey::BadgeOf(to.clone()), &id);
        write_persistent(&env, &DataKey::OwnerOf(id), &to);

        env.events().publish((symbol_short!("mint"), to), id);
        Ok(())
    }

    /// Number of badges held by `owner`: 0 or 1.
    pub fn balance_of(env: Env, owner: Address) -> u32 {
        match read_badge_of(&env, &owner) {
            Some(_) => 1,
            None => 0,
        }
    }

    pub fn badge_of(env: Env, owner: Address) -> Option<u64> {
        read_badge_of(&env, &owner)
    }

    pub fn owner_of(env: Env, badge_id: u64) -> Result<Address, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::OwnerOf(badge_id))
            .ok_or(Error::BadgeNotFound)
    }

    pub fn total_minted(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::Minted)
            .unwrap_or(0)
    }
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn read_badge_of(env: &Env, owner: &Address) -> Option<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::BadgeOf(owner.clone()))
}

fn write_persistent<V>(env: &Env, key: &DataKey, value: &V)
where
    V: soroban_sdk::IntoVal<Env, soroban_sdk::Val>,
{
    env.storage().persistent().set(key, value);
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}
