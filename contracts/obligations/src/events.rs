#![allow(deprecated)] // events().publish migration tracked separately

use common::HolderKey;
use soroban_sdk::{symbol_short, Address, Env};

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DutyAssignedEvent {
    pub project: u64,
    pub holder: HolderKey,
    pub outstanding: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DutyFulfilledEvent {
    pub project: u64,
    pub holder: HolderKey,
    pub outstanding: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReporterSetEvent {
    pub reporter: Address,
    pub enabled: bool,
    pub timestamp: u64,
}

pub fn publish_initialized(env: &Env, admin: Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        (admin, env.ledger().timestamp()),
    );
}

pub fn publish_reporter_set(env: &Env, reporter: Address, enabled: bool) {
    env.events().publish(
        (symbol_short!("RPT_SET"), reporter.clone()),
        ReporterSetEvent {
            reporter,
            enabled,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_assigned(env: &Env, project: u64, holder: HolderKey, outstanding: u32) {
    env.events().publish(
        (symbol_short!("ASSIGNED"), holder.clone()),
        DutyAssignedEvent {
            project,
            holder,
            outstanding,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_fulfilled(env: &Env, project: u64, holder: HolderKey, outstanding: u32) {
    env.events().publish(
        (symbol_short!("FULFIL"), holder.clone()),
        DutyFulfilledEvent {
            project,
            holder,
            outstanding,
            timestamp: env.ledger().timestamp(),
        },
    );
}
