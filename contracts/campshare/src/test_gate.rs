extern crate std;

use common::HolderKey;
use soroban_sdk::{
    contract, contracterror, contractimpl, testutils::Address as _,
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};

use crate::gate::{decide, is_within_threshold, Claim};
use crate::{CampShareContract, CampShareContractClient, ContractError};

// ── Pure decision ────────────────────────────────────────────────────────────

#[test]
fn test_nothing_outstanding_always_passes() {
    assert!(is_within_threshold(0, 0, 10));
    assert!(is_within_threshold(0, 50, 10));
}

#[test]
fn test_outstanding_without_assignments_is_refused() {
    assert!(!is_within_threshold(1, 0, 100));
}

#[test]
fn test_ratio_against_threshold() {
    // 25% and 30% pass at 30, 40% does not.
    assert!(is_within_threshold(1, 4, 30));
    assert!(is_within_threshold(3, 10, 30));
    assert!(!is_within_threshold(2, 5, 30));
    assert!(!is_within_threshold(31, 100, 30));
    assert!(is_within_threshold(5, 5, 100));
}

#[test]
fn test_ratio_does_not_overflow() {
    assert!(is_within_threshold(u32::MAX, u32::MAX, 100));
    assert!(!is_within_threshold(u32::MAX, u32::MAX, 99));
}

#[test]
fn test_withdraw_tolerates_small_backlog() {
    assert!(!decide(Claim::Reinvest, 2, 5, 30, 2));
    assert!(decide(Claim::Withdraw, 2, 5, 30, 2));

    assert!(!decide(Claim::Reinvest, 3, 5, 30, 2));
    assert!(!decide(Claim::Withdraw, 3, 5, 30, 2));

    // With no allowance both claims follow the ratio.
    assert!(!decide(Claim::Withdraw, 1, 2, 30, 0));
    assert!(decide(Claim::Withdraw, 1, 4, 30, 0));
}

#[test]
fn test_withdraw_never_stricter_than_reinvest() {
    for outstanding in 0..8u32 {
        for assigned in 0..8u32 {
            for allowance in 0..3u32 {
                if decide(Claim::Reinvest, outstanding, assigned, 30, allowance) {
                    assert!(decide(Claim::Withdraw, outstanding, assigned, 30, allowance));
                }
            }
        }
    }
}

// ── Unreadable tracker ───────────────────────────────────────────────────────

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum TrackerError {
    Offline = 1,
}

/// A tracker that fails every read.
#[contract]
pub struct OfflineTracker;

#[contractimpl]
impl OfflineTracker {
    pub fn get_outstanding(_env: Env, _holder: HolderKey) -> Result<u32, TrackerError> {
        Err(TrackerError::Offline)
    }

    pub fn get_assigned(_env: Env, _holder: HolderKey) -> Result<u32, TrackerError> {
        Err(TrackerError::Offline)
    }
}

#[test]
fn test_unreadable_tracker_denies_claims_but_not_exit() {
    let env = Env::default();
    env.mock_all_auths();

    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let tracker = env.register(OfflineTracker, ());
    let client = CampShareContractClient::new(&env, &env.register(CampShareContract, ()));
    let admin = Address::generate(&env);
    client.initialize(&admin, &token, &tracker, &0, &30);

    let owner = Address::generate(&env);
    let holder = HolderKey::Direct(owner.clone());
    let sac = StellarAssetClient::new(&env, &token);
    let tok = TokenClient::new(&env, &token);
    sac.mint(&owner, &1_000);
    tok.approve(&owner, &client.address, &1_000, &1_000);
    client.stake(&holder, &1_000);
    sac.mint(&admin, &50);
    tok.approve(&admin, &client.address, &50, &1_000);
    client.post_interest(&admin, &50);

    assert!(!client.can_reinvest(&holder));
    assert!(!client.can_withdraw_interest(&holder));
    match client.try_reinvest(&holder) {
        Err(Ok(e)) => assert_eq!(e, ContractError::ObligationThresholdExceeded),
        _ => unreachable!("Expected ObligationThresholdExceeded error"),
    }
    match client.try_withdraw_interest(&holder) {
        Err(Ok(e)) => assert_eq!(e, ContractError::ObligationThresholdExceeded),
        _ => unreachable!("Expected ObligationThresholdExceeded error"),
    }

    assert_eq!(client.unstake(&holder), 1_050);
    assert_eq!(tok.balance(&owner), 1_050);
}
