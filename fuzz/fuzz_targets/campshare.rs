#![no_main]

use arbitrary::Arbitrary;
use campshare::{CampShareContract, CampShareContractClient};
use common::HolderKey;
use libfuzzer_sys::fuzz_target;
use obligations::{ObligationsContract, ObligationsContractClient};
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::{Client as TokenClient, StellarAssetClient};
use soroban_sdk::{vec, Address, Env};

const HOLDERS: usize = 5;

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Stake { holder: u8, amount: u64 },
    Unstake { holder: u8 },
    Reinvest { holder: u8 },
    WithdrawInterest { holder: u8 },
    PostInterest { amount: u64 },
    AssignDuty { holder: u8, project: u8 },
    FulfilDuty { holder: u8, project: u8 },
    Advance { seconds: u16 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let mint = StellarAssetClient::new(&env, &token);
    let tok = TokenClient::new(&env, &token);

    let tracker = ObligationsContractClient::new(&env, &env.register(ObligationsContract, ()));
    tracker.initialize(&admin);
    tracker.set_reporter(&admin, &admin, &true);

    let client = CampShareContractClient::new(&env, &env.register(CampShareContract, ()));
    client.initialize(&admin, &token, &tracker.address, &600u64, &30u32);

    let owners: Vec<Address> = (0..HOLDERS).map(|_| Address::generate(&env)).collect();
    let key = |i: u8| HolderKey::Direct(owners[i as usize % HOLDERS].clone());

    for action in actions {
        match action {
            FuzzAction::Stake { holder, amount } => {
                let amount = amount as i128;
                let owner = key(holder).custody_address();
                if amount > 0 {
                    mint.mint(&owner, &amount);
                    tok.approve(&owner, &client.address, &amount, &1_000);
                }
                let _ = client.try_stake(&key(holder), &amount);
            }
            FuzzAction::Unstake { holder } => {
                let _ = client.try_unstake(&key(holder));
            }
            FuzzAction::Reinvest { holder } => {
                let _ = client.try_reinvest(&key(holder));
            }
            FuzzAction::WithdrawInterest { holder } => {
                let _ = client.try_withdraw_interest(&key(holder));
            }
            FuzzAction::PostInterest { amount } => {
                let amount = amount as i128;
                if amount > 0 {
                    mint.mint(&admin, &amount);
                    tok.approve(&admin, &client.address, &amount, &1_000);
                }
                let _ = client.try_post_interest(&admin, &amount);
            }
            FuzzAction::AssignDuty { holder, project } => {
                let _ = tracker.try_assign(&admin, &(project as u64), &vec![&env, key(holder)]);
            }
            FuzzAction::FulfilDuty { holder, project } => {
                let _ = tracker.try_fulfil(&admin, &(project as u64), &key(holder));
            }
            FuzzAction::Advance { seconds } => {
                let now = env.ledger().timestamp();
                env.ledger().set_timestamp(now + seconds as u64);
            }
        }

        // Books must always cover principal plus pending rewards.
        let principal: i128 = (0..HOLDERS as u8).map(|i| client.get_stake(&key(i))).sum();
        assert_eq!(principal, client.get_total_staked());
        let pending: i128 = (0..HOLDERS as u8)
            .map(|i| client.unrealized_gains(&key(i)))
            .sum();
        let dust = tok.balance(&client.address) - principal - pending;
        assert!(dust >= 0);
        assert!(dust <= client.get_interest_count() as i128 * HOLDERS as i128);
    }
});
