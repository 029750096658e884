use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::ContractError;

// ── Storage keys ─────────────────────────────────────────────────────────────

const TOKEN: Symbol = symbol_short!("TOKEN");
const OBLIGATIONS: Symbol = symbol_short!("OBL_SRC");
const UNSTAKE_PERIOD: Symbol = symbol_short!("UNSTK_PER");
const OBLIGATION_THRESHOLD: Symbol = symbol_short!("OBL_THR");
const OUTSTANDING_ALLOWANCE: Symbol = symbol_short!("OBL_ALW");
const MANAGER: Symbol = symbol_short!("MGR");

// ── Defaults and bounds ──────────────────────────────────────────────────────

/// Thirty days.
pub const DEFAULT_UNSTAKE_PERIOD: u64 = 30 * 24 * 60 * 60;

/// Share of assigned moderation duties, in percent, that may be outstanding
/// before reward claims are refused.
pub const DEFAULT_OBLIGATION_THRESHOLD: u32 = 30;

/// Outstanding duties that never block an interest withdrawal.
pub const DEFAULT_OUTSTANDING_ALLOWANCE: u32 = 2;

/// The threshold can never be tightened below this floor.
pub const MIN_OBLIGATION_THRESHOLD: u32 = 10;
pub const MAX_OBLIGATION_THRESHOLD: u32 = 100;

/// Tunable ledger parameters, returned by `get_config`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LedgerConfig {
    /// Seconds a holder must wait after `unstake` before staking again.
    pub unstake_period: u64,
    /// Maximum outstanding/assigned obligation ratio, in percent.
    pub obligation_threshold: u32,
    /// Outstanding duties tolerated on `withdraw_interest` regardless of ratio.
    pub outstanding_allowance: u32,
}

pub fn validate_threshold(percent: u32) -> Result<(), ContractError> {
    if !(MIN_OBLIGATION_THRESHOLD..=MAX_OBLIGATION_THRESHOLD).contains(&percent) {
        return Err(ContractError::InvalidConfiguration);
    }
    Ok(())
}

// ── Accessors ────────────────────────────────────────────────────────────────

pub fn token(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&TOKEN)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_token(env: &Env, token: &Address) {
    env.storage().instance().set(&TOKEN, token);
}

pub fn obligation_tracker(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&OBLIGATIONS)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_obligation_tracker(env: &Env, tracker: &Address) {
    env.storage().instance().set(&OBLIGATIONS, tracker);
}

pub fn unstake_period(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&UNSTAKE_PERIOD)
        .unwrap_or(DEFAULT_UNSTAKE_PERIOD)
}

pub fn set_unstake_period(env: &Env, period: u64) {
    env.storage().instance().set(&UNSTAKE_PERIOD, &period);
}

pub fn obligation_threshold(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&OBLIGATION_THRESHOLD)
        .unwrap_or(DEFAULT_OBLIGATION_THRESHOLD)
}

pub fn set_obligation_threshold(env: &Env, percent: u32) -> Result<(), ContractError> {
    validate_threshold(percent)?;
    env.storage().instance().set(&OBLIGATION_THRESHOLD, &percent);
    Ok(())
}

pub fn outstanding_allowance(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&OUTSTANDING_ALLOWANCE)
        .unwrap_or(DEFAULT_OUTSTANDING_ALLOWANCE)
}

pub fn set_outstanding_allowance(env: &Env, allowance: u32) {
    env.storage()
        .instance()
        .set(&OUTSTANDING_ALLOWANCE, &allowance);
}

pub fn load(env: &Env) -> LedgerConfig {
    LedgerConfig {
        unstake_period: unstake_period(env),
        obligation_threshold: obligation_threshold(env),
        outstanding_allowance: outstanding_allowance(env),
    }
}

// ── Custodial managers ───────────────────────────────────────────────────────

fn manager_key(manager: &Address) -> (Symbol, Address) {
    (MANAGER, manager.clone())
}

pub fn is_manager(env: &Env, manager: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&manager_key(manager))
        .unwrap_or(false)
}

pub fn set_manager(env: &Env, manager: &Address, enabled: bool) {
    let key = manager_key(manager);
    if enabled {
        env.storage().persistent().set(&key, &true);
        common::ttl::extend_persistent(env, &key);
    } else {
        env.storage().persistent().remove(&key);
    }
}
