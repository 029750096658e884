#![no_std]

//! Moderation obligation tracker.
//!
//! Registered reporters (the moderation components) record duties assigned to
//! stake holders per project and mark them answered. The staking ledger reads
//! the per-holder totals to decide whether a holder may claim rewards.

pub mod events;

use common::HolderKey;
use soroban_sdk::{contract, contractimpl, contracttype, symbol_short, Address, Env, Symbol, Vec};

// ── Storage key constants ────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const REPORTER: Symbol = symbol_short!("RPT");
const OUTSTANDING: Symbol = symbol_short!("OUT");
const ASSIGNED: Symbol = symbol_short!("ASG");
const PROJECT_DUTY: Symbol = symbol_short!("PRJ");

// ── Types ────────────────────────────────────────────────────────────────────

/// Both counters for one holder.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ObligationSnapshot {
    /// Duties assigned and not yet answered.
    pub outstanding: u32,
    /// Duties ever assigned. Never decreases.
    pub assigned: u32,
}

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    /// The holder owes nothing on that project.
    NotAssigned = 4,
    /// The reserved managed account id 0.
    InvalidHolder = 5,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct ObligationsContract;

#[contractimpl]
impl ObligationsContract {
    pub fn initialize(env: Env, admin: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        admin.require_auth();

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&INITIALIZED, &true);
        common::ttl::extend_instance(&env);

        events::publish_initialized(&env, admin);
        Ok(())
    }

    /// Allow or stop `reporter` from recording duties.
    pub fn set_reporter(
        env: Env,
        admin: Address,
        reporter: Address,
        enabled: bool,
    ) -> Result<(), ContractError> {
        Self::require_admin(&env, &admin)?;

        let key = (REPORTER, reporter.clone());
        if enabled {
            env.storage().persistent().set(&key, &true);
            common::ttl::extend_persistent(&env, &key);
        } else {
            env.storage().persistent().remove(&key);
        }

        events::publish_reporter_set(&env, reporter, enabled);
        Ok(())
    }

    /// Assign a moderation duty on `project` to each of `holders`.
    ///
    /// A holder that still owes a duty on `project` is skipped, so reporting
    /// the same assignment twice never double counts.
    pub fn assign(
        env: Env,
        reporter: Address,
        project: u64,
        holders: Vec<HolderKey>,
    ) -> Result<(), ContractError> {
        Self::require_reporter(&env, &reporter)?;

        for holder in holders.iter() {
            if holder.is_zero() {
                return Err(ContractError::InvalidHolder);
            }
            if Self::project_duty(&env, project, &holder) > 0 {
                continue;
            }

            Self::set_project_duty(&env, project, &holder, 1);
            let assigned = Self::counter(&env, ASSIGNED, &holder).saturating_add(1);
            Self::set_counter(&env, ASSIGNED, &holder, assigned);
            let outstanding = Self::counter(&env, OUTSTANDING, &holder).saturating_add(1);
            Self::set_counter(&env, OUTSTANDING, &holder, outstanding);

            events::publish_assigned(&env, project, holder, outstanding);
        }
        Ok(())
    }

    /// Record that `holder` answered its duty on `project`.
    pub fn fulfil(
        env: Env,
        reporter: Address,
        project: u64,
        holder: HolderKey,
    ) -> Result<(), ContractError> {
        Self::require_reporter(&env, &reporter)?;

        if Self::project_duty(&env, project, &holder) == 0 {
            return Err(ContractError::NotAssigned);
        }
        Self::set_project_duty(&env, project, &holder, 0);

        let outstanding = Self::counter(&env, OUTSTANDING, &holder).saturating_sub(1);
        Self::set_counter(&env, OUTSTANDING, &holder, outstanding);

        events::publish_fulfilled(&env, project, holder, outstanding);
        Ok(())
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    pub fn get_outstanding(env: Env, holder: HolderKey) -> u32 {
        Self::counter(&env, OUTSTANDING, &holder)
    }

    /// Lifetime count of duties assigned to `holder`.
    pub fn get_assigned(env: Env, holder: HolderKey) -> u32 {
        Self::counter(&env, ASSIGNED, &holder)
    }

    /// Unanswered duties `holder` owes on `project` (0 or 1).
    pub fn get_project_obligations(env: Env, project: u64, holder: HolderKey) -> u32 {
        Self::project_duty(&env, project, &holder)
    }

    pub fn get_snapshot(env: Env, holder: HolderKey) -> ObligationSnapshot {
        ObligationSnapshot {
            outstanding: Self::counter(&env, OUTSTANDING, &holder),
            assigned: Self::counter(&env, ASSIGNED, &holder),
        }
    }

    pub fn is_reporter(env: Env, reporter: Address) -> bool {
        env.storage()
            .persistent()
            .get(&(REPORTER, reporter))
            .unwrap_or(false)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

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

    fn require_reporter(env: &Env, reporter: &Address) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        reporter.require_auth();
        if !Self::is_reporter(env.clone(), reporter.clone()) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    fn counter(env: &Env, kind: Symbol, holder: &HolderKey) -> u32 {
        env.storage()
            .persistent()
            .get(&(kind, holder.clone()))
            .unwrap_or(0)
    }

    fn set_counter(env: &Env, kind: Symbol, holder: &HolderKey, value: u32) {
        let key = (kind, holder.clone());
        env.storage().persistent().set(&key, &value);
        common::ttl::extend_persistent(env, &key);
    }

    fn project_duty(env: &Env, project: u64, holder: &HolderKey) -> u32 {
        env.storage()
            .persistent()
            .get(&(PROJECT_DUTY, project, holder.clone()))
            .unwrap_or(0)
    }

    fn set_project_duty(env: &Env, project: u64, holder: &HolderKey, value: u32) {
        let key = (PROJECT_DUTY, project, holder.clone());
        if value == 0 {
            env.storage().persistent().remove(&key);
        } else {
            env.storage().persistent().set(&key, &value);
            common::ttl::extend_persistent(env, &key);
        }
    }
}
