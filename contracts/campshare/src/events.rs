#![allow(deprecated)] // events().publish migration tracked separately

use common::HolderKey;
use soroban_sdk::{symbol_short, Address, Env};

use crate::config::LedgerConfig;

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the ledger is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub token: Address,
    pub obligations: Address,
    pub unstake_period: u64,
    pub obligation_threshold: u32,
    pub timestamp: u64,
}

/// Fired when a holder adds principal. `reinvested` is the carried-over
/// reward folded in before the new funds.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub holder: HolderKey,
    pub amount: i128,
    pub reinvested: i128,
    pub new_stake: i128,
    pub total_staked: i128,
    pub timestamp: u64,
}

/// Fired when a holder leaves the pool.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakedEvent {
    pub holder: HolderKey,
    pub principal: i128,
    pub interest: i128,
    pub restake_at: u64,
    pub total_staked: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReinvestedEvent {
    pub holder: HolderKey,
    pub amount: i128,
    pub new_stake: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InterestWithdrawnEvent {
    pub holder: HolderKey,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired on every interest posting. `merged` is true when the amount was
/// added to the latest record instead of opening a new one.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InterestPostedEvent {
    pub payer: Address,
    pub amount: i128,
    pub record_index: u32,
    pub merged: bool,
    pub pool_snapshot: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigUpdatedEvent {
    pub config: LedgerConfig,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ManagerSetEvent {
    pub manager: Address,
    pub enabled: bool,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferEvent {
    pub from: Address,
    pub to: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    admin: Address,
    token: Address,
    obligations: Address,
    unstake_period: u64,
    obligation_threshold: u32,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            token,
            obligations,
            unstake_period,
            obligation_threshold,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staked(
    env: &Env,
    holder: HolderKey,
    amount: i128,
    reinvested: i128,
    new_stake: i128,
    total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("STAKED"), holder.clone()),
        StakedEvent {
            holder,
            amount,
            reinvested,
            new_stake,
            total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unstaked(
    env: &Env,
    holder: HolderKey,
    principal: i128,
    interest: i128,
    restake_at: u64,
    total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("UNSTAKED"), holder.clone()),
        UnstakedEvent {
            holder,
            principal,
            interest,
            restake_at,
            total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reinvested(env: &Env, holder: HolderKey, amount: i128, new_stake: i128) {
    env.events().publish(
        (symbol_short!("REINVEST"), holder.clone()),
        ReinvestedEvent {
            holder,
            amount,
            new_stake,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_interest_withdrawn(env: &Env, holder: HolderKey, amount: i128) {
    env.events().publish(
        (symbol_short!("INT_WDRW"), holder.clone()),
        InterestWithdrawnEvent {
            holder,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_interest_posted(
    env: &Env,
    payer: Address,
    amount: i128,
    record_index: u32,
    merged: bool,
    pool_snapshot: i128,
) {
    env.events().publish(
        (symbol_short!("INT_POST"), payer.clone()),
        InterestPostedEvent {
            payer,
            amount,
            record_index,
            merged,
            pool_snapshot,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_config_updated(env: &Env, config: LedgerConfig) {
    env.events().publish(
        (symbol_short!("CFG_SET"),),
        ConfigUpdatedEvent {
            config,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_tracker_set(env: &Env, tracker: Address) {
    env.events().publish(
        (symbol_short!("OBL_SET"),),
        (tracker, env.ledger().timestamp()),
    );
}

pub fn publish_manager_set(env: &Env, manager: Address, enabled: bool) {
    env.events().publish(
        (symbol_short!("MGR_SET"), manager.clone()),
        ManagerSetEvent {
            manager,
            enabled,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_proposed(env: &Env, current_admin: Address, proposed_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_PROP"), current_admin.clone()),
        AdminTransferEvent {
            from: current_admin,
            to: proposed_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_accepted(env: &Env, old_admin: Address, new_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_ACPT"), new_admin.clone()),
        AdminTransferEvent {
            from: old_admin,
            to: new_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_cancelled(env: &Env, admin: Address, cancelled: Address) {
    env.events().publish(
        (symbol_short!("ADM_CNCL"), admin.clone()),
        AdminTransferEvent {
            from: admin,
            to: cancelled,
            timestamp: env.ledger().timestamp(),
        },
    );
}
