extern crate std;

use common::admin_tiers::AdminTier;
use soroban_sdk::{testutils::Address as _, Address, Env};

use crate::{CampShareContract, CampShareContractClient, ContractError};

// ── Test helpers ─────────────────────────────────────────────────────────────

fn setup() -> (Env, CampShareContractClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let token = env.register_stellar_asset_contract_v2(Address::generate(&env));
    let tracker = Address::generate(&env);

    let contract_id = env.register(CampShareContract, ());
    let client = CampShareContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin, &token.address(), &tracker, &86_400, &30);

    (env, client, admin)
}

fn promoted(env: &Env, client: &CampShareContractClient, admin: &Address, tier: AdminTier) -> Address {
    let target = Address::generate(env);
    client.promote_admin(admin, &target, &tier);
    target
}

// ── SuperAdmin bootstrapped on initialize ────────────────────────────────────

#[test]
fn test_admin_is_super_admin_after_init() {
    let (_env, client, admin) = setup();
    assert_eq!(client.get_admin_tier(&admin), Some(AdminTier::SuperAdmin));
}

// ── Promote / demote ─────────────────────────────────────────────────────────

#[test]
fn test_super_admin_promotes_every_tier() {
    let (env, client, admin) = setup();

    for tier in [AdminTier::Treasurer, AdminTier::Governor, AdminTier::SuperAdmin] {
        let target = promoted(&env, &client, &admin, tier.clone());
        assert_eq!(client.get_admin_tier(&target), Some(tier));
    }
}

#[test]
fn test_super_admin_demotes_admin() {
    let (env, client, admin) = setup();
    let governor = promoted(&env, &client, &admin, AdminTier::Governor);

    client.demote_admin(&admin, &governor);
    assert_eq!(client.get_admin_tier(&governor), None);
}

#[test]
fn test_bootstrap_admin_cannot_be_demoted() {
    let (env, client, admin) = setup();
    let other = promoted(&env, &client, &admin, AdminTier::SuperAdmin);

    match client.try_demote_admin(&other, &admin) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    assert_eq!(client.get_admin_tier(&admin), Some(AdminTier::SuperAdmin));
}

#[test]
fn test_lower_tiers_cannot_promote_or_demote() {
    let (env, client, admin) = setup();
    let governor = promoted(&env, &client, &admin, AdminTier::Governor);
    let treasurer = promoted(&env, &client, &admin, AdminTier::Treasurer);
    let target = Address::generate(&env);

    match client.try_promote_admin(&governor, &target, &AdminTier::Treasurer) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    match client.try_demote_admin(&governor, &treasurer) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    match client.try_promote_admin(&treasurer, &target, &AdminTier::Treasurer) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

// ── Governor-level configuration ─────────────────────────────────────────────

#[test]
fn test_governor_can_configure_ledger() {
    let (env, client, admin) = setup();
    let governor = promoted(&env, &client, &admin, AdminTier::Governor);
    let tracker = Address::generate(&env);
    let manager = Address::generate(&env);

    client.set_unstake_period(&governor, &3_600);
    client.set_obligation_threshold(&governor, &50);
    client.set_outstanding_allowance(&governor, &0);
    client.set_obligation_tracker(&governor, &tracker);
    client.register_manager(&governor, &manager);

    let config = client.get_config();
    assert_eq!(config.unstake_period, 3_600);
    assert_eq!(config.obligation_threshold, 50);
    assert_eq!(config.outstanding_allowance, 0);
    assert_eq!(client.get_obligation_tracker(), tracker);
    assert!(client.is_manager(&manager));

    client.revoke_manager(&governor, &manager);
    assert!(!client.is_manager(&manager));
}

#[test]
fn test_threshold_bounds_are_enforced() {
    let (_env, client, admin) = setup();

    for percent in [0u32, 9, 101] {
        match client.try_set_obligation_threshold(&admin, &percent) {
            Err(Ok(e)) => assert_eq!(e, ContractError::InvalidConfiguration),
            _ => unreachable!("Expected InvalidConfiguration error"),
        }
    }
    client.set_obligation_threshold(&admin, &10);
    client.set_obligation_threshold(&admin, &100);
    assert_eq!(client.get_config().obligation_threshold, 100);
}

#[test]
fn test_treasurer_cannot_configure_ledger() {
    let (env, client, admin) = setup();
    let treasurer = promoted(&env, &client, &admin, AdminTier::Treasurer);

    match client.try_set_unstake_period(&treasurer, &1) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    match client.try_set_obligation_threshold(&treasurer, &50) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    match client.try_register_manager(&treasurer, &treasurer) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_non_admin_cannot_configure_ledger() {
    let (env, client, _admin) = setup();
    let intruder = Address::generate(&env);

    match client.try_set_obligation_tracker(&intruder, &intruder) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    match client.try_set_outstanding_allowance(&intruder, &9) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    assert_eq!(client.get_admin_tier(&intruder), None);
}

// ── Two-step admin transfer ──────────────────────────────────────────────────

#[test]
fn test_admin_transfer_moves_super_admin() {
    let (env, client, admin) = setup();
    let successor = Address::generate(&env);

    client.propose_admin(&admin, &successor);
    assert_eq!(client.get_pending_admin(), Some(successor.clone()));

    client.accept_admin(&successor);
    assert_eq!(client.get_admin(), successor);
    assert_eq!(client.get_pending_admin(), None);
    assert_eq!(client.get_admin_tier(&successor), Some(AdminTier::SuperAdmin));
    assert_eq!(client.get_admin_tier(&admin), None);
}

#[test]
fn test_only_proposed_admin_can_accept() {
    let (env, client, admin) = setup();
    let successor = Address::generate(&env);
    let impostor = Address::generate(&env);

    match client.try_accept_admin(&successor) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }

    client.propose_admin(&admin, &successor);
    match client.try_accept_admin(&impostor) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_cancelled_transfer_cannot_be_accepted() {
    let (env, client, admin) = setup();
    let successor = Address::generate(&env);

    client.propose_admin(&admin, &successor);
    client.cancel_admin_transfer(&admin);
    assert_eq!(client.get_pending_admin(), None);

    match client.try_accept_admin(&successor) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    assert_eq!(client.get_admin(), admin);
}

#[test]
fn test_non_admin_cannot_propose() {
    let (env, client, _admin) = setup();
    let intruder = Address::generate(&env);

    match client.try_propose_admin(&intruder, &intruder) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}
