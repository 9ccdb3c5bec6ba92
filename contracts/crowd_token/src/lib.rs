//! # Crowd Token
//!
//! Fungible reward credits for campaign contributors. Only the configured
//! minter (normally the crowdfunding contract) can create credits; the admin
//! picks the minter.
//!
//! Credits are non-transferable in this contract: it only mints and reports
//! balances.

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, symbol_short, Address, Env, String,
};


const DECIMALS: u32 = 7;

const DAY_IN_LEDGERS: u32 = 17_280;
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;
const BALANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const BALANCE_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    MinterNotSet = 1,
    NegativeAmount = 2,
    Overflow = 3,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Admin,
    Minter,
    TotalSupply,
    Balance(Address),
}

#[contract]
pub struct CrowdToken;

#[contractimpl]
impl CrowdToken {
    pub fn __constructor(env: Env, admin: Address) {
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::TotalSupply, &0i128);
        bump_instance(&env);
    }

    /// Authorize `minter` to create credits. Admin only; replaces any previous minter.
    pub fn set_minter(env: Env, minter: Address) {
        read_admin(&env).require_auth();
        env.storage().instance().set(&DataKey::Minter, &minter);
        bump_instance(&env);

        env.events().publish((symbol_short!("minter"),), minter);
    }

    pub fn minter(env: Env) -> Option<Address> {
        env.storage().instance().get(&DataKey::Minter)
    }

    /// Credit `amount` to `to`. Requires the minter's authorization.
    pub fn mint(env: Env, to: Address, amount: i128) -> Result<(), Error> {
        let minter: Address = env
            .storage()
            .instance()
            .get(&DataKey::Minter)
            .ok_or(Error::MinterNotSet)?;
        minter.require_auth();

        if amount < 0 {
            return Err(Error::NegativeAmount);
        }

        let supply = read_total_supply(&env)
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        let balance = read_balance(&env, &to)
            .checked_add(amount)
            .ok_or(Error::Overflow)?;

        env.storage().instance().set(&DataKey::TotalSupply, &supply);
        write_balance(&env, &to, balance);
        bump_instance(&env);

        env.events().publish((symbol_short!("mint"), to), amount);
        Ok(())
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        read_balance(&env, &id)
    }

    pub fn total_supply(env: Env) -> i128 {
        read_total_supply(&env)
    }

    pub fn decimals(_env: Env) -> u32 {
        DECIMALS
    }

    pub fn name(env: Env) -> String {
        String::from_str(&env, "Crowd Token")
    }

    pub fn symbol(env: Env) -> String {
        String::from_str(&env, "CTK")
    }
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn read_admin(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .expect("admin not set")
}

fn read_total_supply(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalSupply)
        .unwrap_or(0)
}

fn read_balance(env: &Env, id: &Address) -> i128 {
    let key = DataKey::Balance(id.clone());
    env.storage().persistent().get(&key).unwrap_or(0)
}

fn write_balance(env: &Env, id: &Address, amount: i128) {
    let key = DataKey::Balance(id.clone());
    env.storage().persistent().set(&key, &amount);
    env.storage()
        .persistent()
        .extend_ttl(&key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_AMOUNT);
}
