#![no_std]

//! Custodial account manager.
//!
//! Holds platform tokens for numbered accounts and stakes them in the ledger
//! under `HolderKey::Managed(this contract, account_id)`. Ledger payouts land
//! back in this contract and are credited to the account they belong to.

pub mod events;

use common::HolderKey;
use soroban_sdk::{contract, contractclient, contractimpl, symbol_short, token, Address, Env, Symbol};

// ── Storage key constants ────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const TOKEN: Symbol = symbol_short!("TOKEN");
const LEDGER: Symbol = symbol_short!("LEDGER");
const BALANCE: Symbol = symbol_short!("BAL");

/// Ledgers an allowance granted to the staking ledger stays valid.
const APPROVAL_LEDGERS: u32 = 100;

/// The staking ledger operations this manager drives.
#[contractclient(name = "StakeLedgerClient")]
pub trait StakeLedger {
    fn stake(env: Env, holder: HolderKey, amount: i128) -> i128;
    fn unstake(env: Env, holder: HolderKey) -> i128;
    fn reinvest(env: Env, holder: HolderKey) -> i128;
    fn withdraw_interest(env: Env, holder: HolderKey) -> i128;
    fn get_stake(env: Env, holder: HolderKey) -> i128;
    fn unrealized_gains(env: Env, holder: HolderKey) -> i128;
}

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidAmount = 4,
    /// Account id 0 is reserved.
    InvalidAccount = 5,
    InsufficientBalance = 6,
    ArithmeticOverflow = 7,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct AccountManagerContract;

#[contractimpl]
impl AccountManagerContract {
    /// * `token`  – the platform token, the same one the ledger stakes.
    /// * `ledger` – the staking ledger; it must register this contract as a
    ///              manager before any account can stake.
    pub fn initialize(
        env: Env,
        admin: Address,
        token: Address,
        ledger: Address,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&TOKEN, &token);
        env.storage().instance().set(&LEDGER, &ledger);
        env.storage().instance().set(&INITIALIZED, &true);
        common::ttl::extend_instance(&env);

        events::publish_initialized(&env, admin, token, ledger);
        Ok(())
    }

    // ── Custody ──────────────────────────────────────────────────────────────

    /// Move `amount` from `from` into custody, credited to `account_id`.
    pub fn deposit(
        env: Env,
        from: Address,
        account_id: u64,
        amount: i128,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        Self::require_account(account_id)?;
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        from.require_auth();

        Self::token(&env)?.transfer(&from, &env.current_contract_address(), &amount);
        let balance = Self::credit(&env, account_id, amount)?;

        events::publish_deposit(&env, account_id, amount, balance);
        Ok(balance)
    }

    /// Pay `amount` of the account's idle balance out to `to`.
    pub fn withdraw(
        env: Env,
        admin: Address,
        account_id: u64,
        to: Address,
        amount: i128,
    ) -> Result<i128, ContractError> {
        Self::require_admin(&env, &admin)?;
        Self::require_account(account_id)?;
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let balance = Self::debit(&env, account_id, amount)?;
        Self::token(&env)?.transfer(&env.current_contract_address(), &to, &amount);

        events::publish_withdraw(&env, account_id, amount, balance);
        Ok(balance)
    }

    // ── Ledger operations ────────────────────────────────────────────────────

    /// Stake `amount` of the account's idle balance. Returns the new stake.
    pub fn stake(
        env: Env,
        admin: Address,
        account_id: u64,
        amount: i128,
    ) -> Result<i128, ContractError> {
        Self::require_admin(&env, &admin)?;
        Self::require_account(account_id)?;
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let balance = Self::debit(&env, account_id, amount)?;

        let this = env.current_contract_address();
        let ledger = Self::ledger(&env)?;
        let expiration = env.ledger().sequence().saturating_add(APPROVAL_LEDGERS);
        Self::token(&env)?.approve(&this, &ledger, &amount, &expiration);

        let staked = StakeLedgerClient::new(&env, &ledger).stake(&Self::holder(&env, account_id), &amount);

        events::publish_staked(&env, account_id, amount, balance);
        Ok(staked)
    }

    /// Leave the pool; the payout is credited to the account. Returns the payout.
    pub fn unstake(env: Env, admin: Address, account_id: u64) -> Result<i128, ContractError> {
        Self::require_admin(&env, &admin)?;
        Self::require_account(account_id)?;

        let payout = Self::ledger_client(&env)?.unstake(&Self::holder(&env, account_id));
        let balance = Self::credit(&env, account_id, payout)?;

        events::publish_unstaked(&env, account_id, payout, balance);
        Ok(payout)
    }

    pub fn reinvest(env: Env, admin: Address, account_id: u64) -> Result<i128, ContractError> {
        Self::require_admin(&env, &admin)?;
        Self::require_account(account_id)?;

        let amount = Self::ledger_client(&env)?.reinvest(&Self::holder(&env, account_id));

        events::publish_reinvested(&env, account_id, amount, Self::balance(&env, account_id));
        Ok(amount)
    }

    /// Collect pending interest into the account's idle balance.
    pub fn withdraw_interest(
        env: Env,
        admin: Address,
        account_id: u64,
    ) -> Result<i128, ContractError> {
        Self::require_admin(&env, &admin)?;
        Self::require_account(account_id)?;

        let amount = Self::ledger_client(&env)?.withdraw_interest(&Self::holder(&env, account_id));
        let balance = Self::credit(&env, account_id, amount)?;

        events::publish_interest_withdrawn(&env, account_id, amount, balance);
        Ok(amount)
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    /// Idle (unstaked) tokens held for `account_id`.
    pub fn balance_of(env: Env, account_id: u64) -> i128 {
        Self::balance(&env, account_id)
    }

    pub fn get_stake(env: Env, account_id: u64) -> Result<i128, ContractError> {
        Ok(Self::ledger_client(&env)?.get_stake(&Self::holder(&env, account_id)))
    }

    pub fn unrealized_gains(env: Env, account_id: u64) -> Result<i128, ContractError> {
        Ok(Self::ledger_client(&env)?.unrealized_gains(&Self::holder(&env, account_id)))
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)?;
        caller.require_auth();
        if *caller != admin {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    fn require_account(account_id: u64) -> Result<(), ContractError> {
        if account_id == 0 {
            return Err(ContractError::InvalidAccount);
        }
        Ok(())
    }

    fn holder(env: &Env, account_id: u64) -> HolderKey {
        HolderKey::Managed(env.current_contract_address(), account_id)
    }

    fn token(env: &Env) -> Result<token::Client<'_>, ContractError> {
        let address: Address = env
            .storage()
            .instance()
            .get(&TOKEN)
            .ok_or(ContractError::NotInitialized)?;
        Ok(token::Client::new(env, &address))
    }

    fn ledger(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&LEDGER)
            .ok_or(ContractError::NotInitialized)
    }

    fn ledger_client(env: &Env) -> Result<StakeLedgerClient<'_>, ContractError> {
        Ok(StakeLedgerClient::new(env, &Self::ledger(env)?))
    }

    fn balance(env: &Env, account_id: u64) -> i128 {
        env.storage()
            .persistent()
            .get(&(BALANCE, account_id))
            .unwrap_or(0)
    }

    fn set_balance(env: &Env, account_id: u64, balance: i128) {
        let key = (BALANCE, account_id);
        env.storage().persistent().set(&key, &balance);
        common::ttl::extend_persistent(env, &key);
    }

    fn credit(env: &Env, account_id: u64, amount: i128) -> Result<i128, ContractError> {
        let balance = Self::balance(env, account_id)
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        Self::set_balance(env, account_id, balance);
        Ok(balance)
    }

    fn debit(env: &Env, account_id: u64, amount: i128) -> Result<i128, ContractError> {
        let current = Self::balance(env, account_id);
        if amount > current {
            return Err(ContractError::InsufficientBalance);
        }
        let balance = current - amount;
        Self::set_balance(env, account_id, balance);
        Ok(balance)
    }
}
