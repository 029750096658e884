#![no_std]

pub mod config;
pub mod events;
pub mod gate;
pub mod history;
pub mod ledger;
pub mod unstake_log;

use common::admin_tiers::{self, AdminTier};
use common::HolderKey;
use gate::Claim;
use soroban_sdk::{contract, contractimpl, symbol_short, token, Address, Env, Symbol, Vec};

pub use config::LedgerConfig;
pub use history::InterestRecord;
pub use ledger::StakePosition;
pub use unstake_log::UnstakeLogEntry;

// ── Storage key constants ────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const PENDING_ADMIN: Symbol = symbol_short!("PEND_ADM");
const INITIALIZED: Symbol = symbol_short!("INIT");

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    /// Amount was zero or negative.
    InvalidAmount = 4,
    /// Reserved account id, or a managed key whose custodian is not registered.
    InvalidAccount = 5,
    /// The operation needs a positive stake (or, for posting, a non-empty pool).
    NoStake = 6,
    UnstakeWaitPeriodActive = 7,
    ObligationThresholdExceeded = 8,
    /// Internal bookkeeping would go negative. Unreachable in a consistent ledger.
    InsufficientBalance = 9,
    InvalidConfiguration = 10,
    RecordNotFound = 11,
    ArithmeticOverflow = 12,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct CampShareContract;

#[contractimpl]
impl CampShareContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the ledger.
    ///
    /// * `token`                – SAC address of the platform token, staked and
    ///                            paid out as interest.
    /// * `obligations`          – contract implementing [`gate::ObligationTracker`].
    /// * `unstake_period`       – seconds between an `unstake` and the next `stake`.
    /// * `obligation_threshold` – percent of assigned duties that may be outstanding.
    pub fn initialize(
        env: Env,
        admin: Address,
        token: Address,
        obligations: Address,
        unstake_period: u64,
        obligation_threshold: u32,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        config::validate_threshold(obligation_threshold)?;

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&INITIALIZED, &true);
        config::set_token(&env, &token);
        config::set_obligation_tracker(&env, &obligations);
        config::set_unstake_period(&env, unstake_period);
        config::set_obligation_threshold(&env, obligation_threshold)?;
        // TOT_STK and INT_CNT start at zero; absent keys read as 0.

        admin_tiers::set_super_admin(&env, &admin);
        common::ttl::extend_instance(&env);

        events::publish_initialized(
            &env,
            admin,
            token,
            obligations,
            unstake_period,
            obligation_threshold,
        );

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Add `amount` to `holder`'s stake.
    ///
    /// Any reward carried over since the holder's last settlement is folded
    /// into principal first. Tokens are pulled from the holder's custody
    /// address under the allowance it granted this contract. Returns the new
    /// principal.
    pub fn stake(env: Env, holder: HolderKey, amount: i128) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        Self::require_holder(&env, &holder)?;

        let now = env.ledger().timestamp();
        if !unstake_log::eligible_to_restake(&env, &holder, now, config::unstake_period(&env)) {
            return Err(ContractError::UnstakeWaitPeriodActive);
        }

        // 1. Auto-reinvest anything carried over.
        let mut position = ledger::load_or_open(&env, &holder);
        let carried = ledger::settle(&env, &mut position)?;
        ledger::increase(&env, &mut position, carried)?;

        // 2. Pull the new funds.
        Self::transfer_in(&env, &holder.custody_address(), amount)?;

        // 3. Credit them.
        ledger::increase(&env, &mut position, amount)?;
        ledger::store(&env, &holder, &position);
        common::ttl::extend_instance(&env);

        events::publish_staked(
            &env,
            holder,
            amount,
            carried,
            position.amount,
            ledger::total_staked(&env),
        );

        Ok(position.amount)
    }

    /// Leave the pool: pay out principal plus all pending interest and start
    /// the re-entry cool-down. Never gated by moderation obligations.
    ///
    /// Returns the amount paid out.
    pub fn unstake(env: Env, holder: HolderKey) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        Self::require_holder(&env, &holder)?;
        let mut position = Self::require_stake(&env, &holder)?;

        // 1. Settle, then drop principal from the pool. The reward was never
        //    part of the pool total.
        let interest = ledger::settle(&env, &mut position)?;
        let principal = position.amount;
        let payout = principal
            .checked_add(interest)
            .ok_or(ContractError::ArithmeticOverflow)?;
        ledger::decrease(&env, &mut position, principal)?;
        ledger::store(&env, &holder, &position);

        // 2. Log the exit before paying out.
        let now = env.ledger().timestamp();
        unstake_log::record_exit(&env, &holder, payout, now);

        // 3. Pay out.
        Self::transfer_out(&env, &holder.custody_address(), payout)?;

        events::publish_unstaked(
            &env,
            holder,
            principal,
            interest,
            now.saturating_add(config::unstake_period(&env)),
            ledger::total_staked(&env),
        );

        Ok(payout)
    }

    // ── Rewards ─────────────────────────────────────────────────────────────

    /// Fold all pending interest into principal. Returns the amount folded in.
    pub fn reinvest(env: Env, holder: HolderKey) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        Self::require_holder(&env, &holder)?;
        let mut position = Self::require_stake(&env, &holder)?;
        gate::check(&env, &holder, Claim::Reinvest)?;

        let reward = ledger::settle(&env, &mut position)?;
        ledger::increase(&env, &mut position, reward)?;
        ledger::store(&env, &holder, &position);

        events::publish_reinvested(&env, holder, reward, position.amount);

        Ok(reward)
    }

    /// Pay out all pending interest, leaving principal untouched. Returns the
    /// amount paid.
    pub fn withdraw_interest(env: Env, holder: HolderKey) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        Self::require_holder(&env, &holder)?;
        let mut position = Self::require_stake(&env, &holder)?;
        gate::check(&env, &holder, Claim::Withdraw)?;

        let reward = ledger::settle(&env, &mut position)?;
        ledger::store(&env, &holder, &position);

        if reward > 0 {
            Self::transfer_out(&env, &holder.custody_address(), reward)?;
        }

        events::publish_interest_withdrawn(&env, holder, reward);

        Ok(reward)
    }

    /// Deposit `amount` of interest from `payer`, divided pro rata across the
    /// current pool. Requires at least the `Treasurer` tier.
    ///
    /// Returns the index of the interest record the amount landed in.
    pub fn post_interest(env: Env, payer: Address, amount: i128) -> Result<u32, ContractError> {
        Self::require_initialized(&env)?;
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        payer.require_auth();
        Self::require_admin_tier(&env, &payer, &AdminTier::Treasurer)?;

        let total = ledger::total_staked(&env);
        if total <= 0 {
            return Err(ContractError::NoStake);
        }

        Self::transfer_in(&env, &payer, amount)?;
        let posting = history::post(&env, amount, total)?;
        common::ttl::extend_instance(&env);

        events::publish_interest_posted(
            &env,
            payer,
            amount,
            posting.index,
            posting.merged,
            posting.record.pool_snapshot,
        );

        Ok(posting.index)
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Interest accrued by `holder` and not yet settled.
    pub fn unrealized_gains(env: Env, holder: HolderKey) -> Result<i128, ContractError> {
        match ledger::position(&env, &holder) {
            Some(position) => ledger::pending_reward(&env, &position),
            None => Ok(0),
        }
    }

    pub fn get_stake(env: Env, holder: HolderKey) -> i128 {
        ledger::position(&env, &holder)
            .map(|position| position.amount)
            .unwrap_or(0)
    }

    pub fn get_position(env: Env, holder: HolderKey) -> Option<StakePosition> {
        ledger::position(&env, &holder)
    }

    pub fn get_total_staked(env: Env) -> i128 {
        ledger::total_staked(&env)
    }

    pub fn get_interest_count(env: Env) -> u32 {
        history::count(&env)
    }

    pub fn get_interest_record(env: Env, index: u32) -> Result<InterestRecord, ContractError> {
        history::get(&env, index).ok_or(ContractError::RecordNotFound)
    }

    /// Interest records in `[start, end)`, clamped to the history length.
    pub fn get_interest_records(env: Env, start: u32, end: u32) -> Vec<InterestRecord> {
        history::range(&env, start, end)
    }

    pub fn get_unstake_count(env: Env, holder: HolderKey) -> u32 {
        unstake_log::count(&env, &holder)
    }

    pub fn get_unstake_entry(
        env: Env,
        holder: HolderKey,
        index: u32,
    ) -> Result<UnstakeLogEntry, ContractError> {
        unstake_log::get(&env, &holder, index).ok_or(ContractError::RecordNotFound)
    }

    /// Earliest timestamp at which `holder` may stake again; 0 if it has never
    /// unstaked.
    pub fn restake_available_at(env: Env, holder: HolderKey) -> u64 {
        unstake_log::restake_available_at(&env, &holder, config::unstake_period(&env))
            .unwrap_or(0)
    }

    /// Whether the obligation gate would currently let `holder` reinvest.
    pub fn can_reinvest(env: Env, holder: HolderKey) -> Result<bool, ContractError> {
        Self::require_initialized(&env)?;
        gate::allows(&env, &holder, Claim::Reinvest)
    }

    /// Whether the obligation gate would currently let `holder` withdraw
    /// interest.
    pub fn can_withdraw_interest(env: Env, holder: HolderKey) -> Result<bool, ContractError> {
        Self::require_initialized(&env)?;
        gate::allows(&env, &holder, Claim::Withdraw)
    }

    pub fn get_config(env: Env) -> LedgerConfig {
        config::load(&env)
    }

    pub fn get_token(env: Env) -> Result<Address, ContractError> {
        config::token(&env)
    }

    pub fn get_obligation_tracker(env: Env) -> Result<Address, ContractError> {
        config::obligation_tracker(&env)
    }

    pub fn is_manager(env: Env, manager: Address) -> bool {
        config::is_manager(&env, &manager)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)
    }

    // ── Configuration ────────────────────────────────────────────────────────

    /// Change the re-entry cool-down. Applies to exits already logged.
    ///
    /// Requires at least `Governor` tier.
    pub fn set_unstake_period(env: Env, caller: Address, period: u64) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin_tier(&env, &caller, &AdminTier::Governor)?;

        config::set_unstake_period(&env, period);
        events::publish_config_updated(&env, config::load(&env));
        Ok(())
    }

    /// Change the obligation threshold, in percent (10..=100).
    ///
    /// Requires at least `Governor` tier.
    pub fn set_obligation_threshold(
        env: Env,
        caller: Address,
        percent: u32,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin_tier(&env, &caller, &AdminTier::Governor)?;

        config::set_obligation_threshold(&env, percent)?;
        events::publish_config_updated(&env, config::load(&env));
        Ok(())
    }

    /// Change how many outstanding duties never block `withdraw_interest`.
    ///
    /// Requires at least `Governor` tier.
    pub fn set_outstanding_allowance(
        env: Env,
        caller: Address,
        allowance: u32,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin_tier(&env, &caller, &AdminTier::Governor)?;

        config::set_outstanding_allowance(&env, allowance);
        events::publish_config_updated(&env, config::load(&env));
        Ok(())
    }

    /// Point the gate at a different obligation tracker.
    ///
    /// Requires at least `Governor` tier.
    pub fn set_obligation_tracker(
        env: Env,
        caller: Address,
        tracker: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin_tier(&env, &caller, &AdminTier::Governor)?;

        config::set_obligation_tracker(&env, &tracker);
        events::publish_tracker_set(&env, tracker);
        Ok(())
    }

    /// Allow `manager` to act for `HolderKey::Managed(manager, _)` accounts.
    ///
    /// Requires at least `Governor` tier.
    pub fn register_manager(env: Env, caller: Address, manager: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin_tier(&env, &caller, &AdminTier::Governor)?;

        config::set_manager(&env, &manager, true);
        events::publish_manager_set(&env, manager, true);
        Ok(())
    }

    /// Stop accepting `manager`'s accounts. Existing positions stay on the
    /// books but cannot be operated until the manager is registered again.
    ///
    /// Requires at least `Governor` tier.
    pub fn revoke_manager(env: Env, caller: Address, manager: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin_tier(&env, &caller, &AdminTier::Governor)?;

        config::set_manager(&env, &manager, false);
        events::publish_manager_set(&env, manager, false);
        Ok(())
    }

    // ── Admin transfer (two-step) ──────────────────────────────────────────

    pub fn propose_admin(
        env: Env,
        current_admin: Address,
        new_admin: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_admin.require_auth();
        Self::require_admin(&env, &current_admin)?;

        env.storage().instance().set(&PENDING_ADMIN, &new_admin);
        events::publish_admin_transfer_proposed(&env, current_admin, new_admin);
        Ok(())
    }

    /// Completes the transfer. The new admin also becomes the bootstrap
    /// super admin; the old admin loses its tier.
    pub fn accept_admin(env: Env, new_admin: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        new_admin.require_auth();

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_ADMIN)
            .ok_or(ContractError::Unauthorized)?;
        if new_admin != pending {
            return Err(ContractError::Unauthorized);
        }

        let old_admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)?;

        env.storage().instance().set(&ADMIN, &new_admin);
        env.storage().instance().remove(&PENDING_ADMIN);
        admin_tiers::remove_admin_tier(&env, &old_admin);
        admin_tiers::set_super_admin(&env, &new_admin);

        events::publish_admin_transfer_accepted(&env, old_admin, new_admin);
        Ok(())
    }

    pub fn cancel_admin_transfer(env: Env, current_admin: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_admin.require_auth();
        Self::require_admin(&env, &current_admin)?;

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_ADMIN)
            .ok_or(ContractError::Unauthorized)?;
        env.storage().instance().remove(&PENDING_ADMIN);

        events::publish_admin_transfer_cancelled(&env, current_admin, pending);
        Ok(())
    }

    pub fn get_pending_admin(env: Env) -> Option<Address> {
        env.storage().instance().get(&PENDING_ADMIN)
    }

    // ── Admin tier management ────────────────────────────────────────────────

    /// Only a `SuperAdmin` may call this.
    pub fn promote_admin(
        env: Env,
        caller: Address,
        target: Address,
        tier: AdminTier,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        if !admin_tiers::promote_admin(&env, &caller, &target, tier) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    /// Only a `SuperAdmin` may call this; the bootstrap admin cannot be demoted.
    pub fn demote_admin(env: Env, caller: Address, target: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        if !admin_tiers::demote_admin(&env, &caller, &target) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    pub fn get_admin_tier(env: Env, admin: Address) -> Option<AdminTier> {
        admin_tiers::get_admin_tier(&env, &admin)
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
        if *caller != admin {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    fn require_admin_tier(
        env: &Env,
        caller: &Address,
        min_tier: &AdminTier,
    ) -> Result<(), ContractError> {
        if admin_tiers::require_tier(env, caller, min_tier) {
            return Ok(());
        }
        Err(ContractError::Unauthorized)
    }

    /// Validates the key and demands auth from its custody address.
    fn require_holder(env: &Env, holder: &HolderKey) -> Result<(), ContractError> {
        if holder.is_zero() {
            return Err(ContractError::InvalidAccount);
        }
        if let Some(custodian) = holder.custodian() {
            if !config::is_manager(env, &custodian) {
                return Err(ContractError::InvalidAccount);
            }
        }
        holder.custody_address().require_auth();
        Ok(())
    }

    /// Loads a position with positive principal, or fails with `NoStake`.
    fn require_stake(env: &Env, holder: &HolderKey) -> Result<StakePosition, ContractError> {
        match ledger::position(env, holder) {
            Some(position) if position.amount > 0 => Ok(position),
            _ => Err(ContractError::NoStake),
        }
    }

    /// Pulls `amount` from `from` using the allowance granted to this contract.
    fn transfer_in(env: &Env, from: &Address, amount: i128) -> Result<(), ContractError> {
        let this = env.current_contract_address();
        token::Client::new(env, &config::token(env)?).transfer_from(&this, from, &this, &amount);
        Ok(())
    }

    fn transfer_out(env: &Env, to: &Address, amount: i128) -> Result<(), ContractError> {
        token::Client::new(env, &config::token(env)?).transfer(
            &env.current_contract_address(),
            to,
            &amount,
        );
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_admin_tiers;

#[cfg(test)]
mod test_gate;
