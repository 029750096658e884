//! Obligation gate: refuses reward claims to holders who leave too many
//! assigned moderation duties unanswered.
//!
//! Only `reinvest` and `withdraw_interest` are gated. `stake` and `unstake`
//! never consult the gate, so a delinquent holder can always leave the pool.
//!
//! Reinvesting requires the outstanding/assigned ratio to be within the
//! threshold. Withdrawing is also allowed when the outstanding count is within
//! the absolute allowance, so it is never stricter than reinvesting.

use common::HolderKey;
use soroban_sdk::{contractclient, Env};

use crate::{config, ContractError};

/// Read interface of the moderation obligation tracker.
#[contractclient(name = "ObligationClient")]
pub trait ObligationTracker {
    /// Duties assigned to `holder` and not yet answered.
    fn get_outstanding(env: Env, holder: HolderKey) -> u32;
    /// Duties ever assigned to `holder`.
    fn get_assigned(env: Env, holder: HolderKey) -> u32;
}

/// Which reward-claiming operation is asking.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Claim {
    Reinvest,
    Withdraw,
}

/// `true` iff `outstanding / assigned <= threshold_percent / 100`.
///
/// A holder with nothing outstanding always passes. Outstanding duties with
/// nothing assigned can only come from an inconsistent tracker and are refused.
pub fn is_within_threshold(outstanding: u32, assigned: u32, threshold_percent: u32) -> bool {
    if outstanding == 0 {
        return true;
    }
    if assigned == 0 {
        return false;
    }
    let lhs = (outstanding as u64) * 100;
    let rhs = (threshold_percent as u64) * (assigned as u64);
    lhs <= rhs
}

/// Pure decision for `claim` given the tracker's counts and the ledger config.
pub fn decide(
    claim: Claim,
    outstanding: u32,
    assigned: u32,
    threshold_percent: u32,
    outstanding_allowance: u32,
) -> bool {
    if is_within_threshold(outstanding, assigned, threshold_percent) {
        return true;
    }
    claim == Claim::Withdraw && outstanding <= outstanding_allowance
}

/// Asks the configured tracker about `holder`. Any failure to read the
/// tracker counts as a refusal.
pub fn allows(env: &Env, holder: &HolderKey, claim: Claim) -> Result<bool, ContractError> {
    let tracker = config::obligation_tracker(env)?;
    let client = ObligationClient::new(env, &tracker);

    let outstanding = match client.try_get_outstanding(holder) {
        Ok(Ok(value)) => value,
        _ => return Ok(false),
    };
    let assigned = match client.try_get_assigned(holder) {
        Ok(Ok(value)) => value,
        _ => return Ok(false),
    };

    let cfg = config::load(env);
    Ok(decide(
        claim,
        outstanding,
        assigned,
        cfg.obligation_threshold,
        cfg.outstanding_allowance,
    ))
}

pub fn check(env: &Env, holder: &HolderKey, claim: Claim) -> Result<(), ContractError> {
    if !allows(env, holder, claim)? {
        return Err(ContractError::ObligationThresholdExceeded);
    }
    Ok(())
}
