use common::HolderKey;
use soroban_sdk::{contracttype, symbol_short, Env, Symbol};

// ── Storage keys ─────────────────────────────────────────────────────────────

const ENTRY: Symbol = symbol_short!("UNSTK");
const COUNT: Symbol = symbol_short!("UNSTK_N");

/// One exit from the pool.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakeLogEntry {
    /// Total paid out: principal plus settled reward.
    pub amount: i128,
    pub timestamp: u64,
}

fn entry_key(holder: &HolderKey, index: u32) -> (Symbol, HolderKey, u32) {
    (ENTRY, holder.clone(), index)
}

fn count_key(holder: &HolderKey) -> (Symbol, HolderKey) {
    (COUNT, holder.clone())
}

pub fn count(env: &Env, holder: &HolderKey) -> u32 {
    env.storage()
        .persistent()
        .get(&count_key(holder))
        .unwrap_or(0)
}

pub fn get(env: &Env, holder: &HolderKey, index: u32) -> Option<UnstakeLogEntry> {
    env.storage().persistent().get(&entry_key(holder, index))
}

pub fn last_exit(env: &Env, holder: &HolderKey) -> Option<UnstakeLogEntry> {
    match count(env, holder) {
        0 => None,
        n => get(env, holder, n - 1),
    }
}

pub fn record_exit(env: &Env, holder: &HolderKey, amount: i128, now: u64) {
    let index = count(env, holder);
    let key = entry_key(holder, index);
    env.storage().persistent().set(
        &key,
        &UnstakeLogEntry {
            amount,
            timestamp: now,
        },
    );
    common::ttl::extend_persistent(env, &key);

    let count_key = count_key(holder);
    env.storage().persistent().set(&count_key, &(index + 1));
    common::ttl::extend_persistent(env, &count_key);
}

/// Earliest timestamp at which `holder` may stake again, if it has ever exited.
pub fn restake_available_at(env: &Env, holder: &HolderKey, unstake_period: u64) -> Option<u64> {
    last_exit(env, holder).map(|entry| entry.timestamp.saturating_add(unstake_period))
}

pub fn eligible_to_restake(env: &Env, holder: &HolderKey, now: u64, unstake_period: u64) -> bool {
    match restake_available_at(env, holder, unstake_period) {
        Some(available_at) => now >= available_at,
        None => true,
    }
}
