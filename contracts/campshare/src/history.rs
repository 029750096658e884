//! Interest history: the ordered log of reward postings and the pool size each
//! one is divided across.
//!
//! Records are only ever appended or, while the latest record is still open,
//! topped up by a merged posting. Nothing on the operation surface rewrites a
//! record once a holder has settled against it.

use soroban_sdk::{contracttype, symbol_short, Env, Symbol, Vec};

use crate::ContractError;

// ── Storage keys ─────────────────────────────────────────────────────────────

const RECORD: Symbol = symbol_short!("INT");
const COUNT: Symbol = symbol_short!("INT_CNT");
const SEALED: Symbol = symbol_short!("INT_SEAL");

/// One reward distribution event.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InterestRecord {
    /// Total reward folded into this record.
    pub deposited: i128,
    /// Total staked principal at the moment the record was opened. Always > 0.
    pub pool_snapshot: i128,
    /// Ledger timestamp of the posting that opened the record.
    pub opened_at: u64,
    /// Number of postings merged into this record.
    pub deposits: u32,
}

/// Result of a posting: where the amount landed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Posting {
    pub index: u32,
    pub merged: bool,
    pub record: InterestRecord,
}

fn record_key(index: u32) -> (Symbol, u32) {
    (RECORD, index)
}

pub fn count(env: &Env) -> u32 {
    env.storage().instance().get(&COUNT).unwrap_or(0)
}

pub fn get(env: &Env, index: u32) -> Option<InterestRecord> {
    env.storage().persistent().get(&record_key(index))
}

/// Records in `[start, end)`, clamped to the current history length.
pub fn range(env: &Env, start: u32, end: u32) -> Vec<InterestRecord> {
    let end = end.min(count(env));
    let mut records = Vec::new(env);
    let mut index = start;
    while index < end {
        if let Some(record) = get(env, index) {
            records.push_back(record);
        }
        index += 1;
    }
    records
}

/// Closes the latest record to further merging. Called whenever a holder
/// checkpoint advances or any principal changes.
pub fn seal(env: &Env) {
    env.storage().instance().set(&SEALED, &true);
}

fn is_sealed(env: &Env) -> bool {
    env.storage().instance().get(&SEALED).unwrap_or(false)
}

fn store(env: &Env, index: u32, record: &InterestRecord) {
    let key = record_key(index);
    env.storage().persistent().set(&key, record);
    common::ttl::extend_persistent(env, &key);
}

/// Adds `amount` of reward against a pool of `total_staked`.
///
/// Opens a new record when the history is empty, the latest record is sealed,
/// or the pool size differs from the latest snapshot; otherwise merges into
/// the latest record.
pub fn post(env: &Env, amount: i128, total_staked: i128) -> Result<Posting, ContractError> {
    if total_staked <= 0 {
        return Err(ContractError::NoStake);
    }

    let len = count(env);
    if len > 0 && !is_sealed(env) {
        let latest_index = len - 1;
        if let Some(mut latest) = get(env, latest_index) {
            if latest.pool_snapshot == total_staked {
                latest.deposited = latest
                    .deposited
                    .checked_add(amount)
                    .ok_or(ContractError::ArithmeticOverflow)?;
                latest.deposits = latest.deposits.saturating_add(1);
                store(env, latest_index, &latest);
                return Ok(Posting {
                    index: latest_index,
                    merged: true,
                    record: latest,
                });
            }
        }
    }

    let record = InterestRecord {
        deposited: amount,
        pool_snapshot: total_staked,
        opened_at: env.ledger().timestamp(),
        deposits: 1,
    };
    store(env, len, &record);
    env.storage().instance().set(&COUNT, &(len + 1));
    env.storage().instance().set(&SEALED, &false);

    Ok(Posting {
        index: len,
        merged: false,
        record,
    })
}
