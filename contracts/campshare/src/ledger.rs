//! Per-holder stake positions and reward settlement.
//!
//! A holder's pending reward is the sum, over every interest record at or past
//! its checkpoint, of `floor(amount * deposited / pool_snapshot)`. Settlement
//! moves the checkpoint to the end of the history; the caller decides whether
//! the reward is folded into principal or paid out.

use common::HolderKey;
use soroban_sdk::{contracttype, symbol_short, Env, Symbol, I256};

use crate::{history, ContractError};

// ── Storage keys ─────────────────────────────────────────────────────────────

const POSITION: Symbol = symbol_short!("POS");
const TOTAL_STAKED: Symbol = symbol_short!("TOT_STK");

/// A holder's stake. Created on first `stake`, never deleted.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakePosition {
    /// Staked principal, including any reinvested rewards.
    pub amount: i128,
    /// Index of the first interest record not yet settled into this position.
    pub checkpoint: u32,
}

fn position_key(holder: &HolderKey) -> (Symbol, HolderKey) {
    (POSITION, holder.clone())
}

pub fn total_staked(env: &Env) -> i128 {
    env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0)
}

fn set_total_staked(env: &Env, total: i128) {
    env.storage().instance().set(&TOTAL_STAKED, &total);
}

pub fn position(env: &Env, holder: &HolderKey) -> Option<StakePosition> {
    env.storage().persistent().get(&position_key(holder))
}

/// Loads the holder's position, or opens an empty one checkpointed at the
/// current end of the history so it never claims earlier records.
pub fn load_or_open(env: &Env, holder: &HolderKey) -> StakePosition {
    position(env, holder).unwrap_or(StakePosition {
        amount: 0,
        checkpoint: history::count(env),
    })
}

pub fn store(env: &Env, holder: &HolderKey, position: &StakePosition) {
    let key = position_key(holder);
    env.storage().persistent().set(&key, position);
    common::ttl::extend_persistent(env, &key);
}

/// `floor(amount * deposited / pool)`, widening to 256 bits when the 128-bit
/// product overflows.
pub fn share(env: &Env, amount: i128, deposited: i128, pool: i128) -> Result<i128, ContractError> {
    if amount == 0 || deposited == 0 {
        return Ok(0);
    }
    if pool <= 0 {
        return Err(ContractError::InsufficientBalance);
    }
    match amount.checked_mul(deposited) {
        Some(product) => Ok(product / pool),
        None => {
            let wide = I256::from_i128(env, amount)
                .mul(&I256::from_i128(env, deposited))
                .div(&I256::from_i128(env, pool));
            wide.to_i128().ok_or(ContractError::ArithmeticOverflow)
        }
    }
}

/// Reward accrued by `position` and not yet settled.
pub fn pending_reward(env: &Env, position: &StakePosition) -> Result<i128, ContractError> {
    if position.amount == 0 {
        return Ok(0);
    }

    let len = history::count(env);
    let mut reward: i128 = 0;
    let mut index = position.checkpoint;
    while index < len {
        if let Some(record) = history::get(env, index) {
            let portion = share(env, position.amount, record.deposited, record.pool_snapshot)?;
            reward = reward
                .checked_add(portion)
                .ok_or(ContractError::ArithmeticOverflow)?;
        }
        index += 1;
    }
    Ok(reward)
}

/// Computes the pending reward and advances the checkpoint to the end of the
/// history. The position is updated in memory only; callers store it.
pub fn settle(env: &Env, position: &mut StakePosition) -> Result<i128, ContractError> {
    let reward = pending_reward(env, position)?;
    position.checkpoint = history::count(env);
    history::seal(env);
    Ok(reward)
}

/// Adds `delta` to the position and to the pool total.
pub fn increase(env: &Env, position: &mut StakePosition, delta: i128) -> Result<(), ContractError> {
    if delta < 0 {
        return Err(ContractError::InvalidAmount);
    }
    if delta == 0 {
        return Ok(());
    }
    position.amount = position
        .amount
        .checked_add(delta)
        .ok_or(ContractError::ArithmeticOverflow)?;
    let total = total_staked(env)
        .checked_add(delta)
        .ok_or(ContractError::ArithmeticOverflow)?;
    set_total_staked(env, total);
    history::seal(env);
    Ok(())
}

/// Removes `delta` from the position and from the pool total.
///
/// Fails with `InsufficientBalance` if either would go negative; that only
/// happens if the ledger's own bookkeeping is already broken.
pub fn decrease(env: &Env, position: &mut StakePosition, delta: i128) -> Result<(), ContractError> {
    if delta < 0 {
        return Err(ContractError::InvalidAmount);
    }
    if delta > position.amount {
        return Err(ContractError::InsufficientBalance);
    }
    let total = total_staked(env);
    if delta > total {
        return Err(ContractError::InsufficientBalance);
    }
    position.amount -= delta;
    set_total_staked(env, total - delta);
    history::seal(env);
    Ok(())
}
