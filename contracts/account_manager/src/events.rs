#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env, Symbol};

/// Balance movement on a custodial account.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccountEvent {
    pub account_id: u64,
    pub amount: i128,
    pub balance: i128,
    pub timestamp: u64,
}

pub fn publish_initialized(env: &Env, admin: Address, token: Address, ledger: Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        (admin, token, ledger, env.ledger().timestamp()),
    );
}

fn publish_account(env: &Env, topic: Symbol, account_id: u64, amount: i128, balance: i128) {
    env.events().publish(
        (topic, account_id),
        AccountEvent {
            account_id,
            amount,
            balance,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_deposit(env: &Env, account_id: u64, amount: i128, balance: i128) {
    publish_account(env, symbol_short!("DEPOSIT"), account_id, amount, balance);
}

pub fn publish_withdraw(env: &Env, account_id: u64, amount: i128, balance: i128) {
    publish_account(env, symbol_short!("WITHDRAW"), account_id, amount, balance);
}

pub fn publish_staked(env: &Env, account_id: u64, amount: i128, balance: i128) {
    publish_account(env, symbol_short!("STAKED"), account_id, amount, balance);
}

pub fn publish_unstaked(env: &Env, account_id: u64, payout: i128, balance: i128) {
    publish_account(env, symbol_short!("UNSTAKED"), account_id, payout, balance);
}

pub fn publish_reinvested(env: &Env, account_id: u64, amount: i128, balance: i128) {
    publish_account(env, symbol_short!("REINVEST"), account_id, amount, balance);
}

pub fn publish_interest_withdrawn(env: &Env, account_id: u64, amount: i128, balance: i128) {
    publish_account(env, symbol_short!("INT_WDRW"), account_id, amount, balance);
}
