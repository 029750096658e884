#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Random operation sequences against a live ledger.
//!
//! Invariants tested:
//! - The pool total always equals the sum of every holder's principal
//! - Tokens held by the ledger cover principal plus every pending reward,
//!   with at most one unit of truncation dust per holder per interest record
//! - Once everyone has left, only that dust remains

use campshare::{CampShareContract, CampShareContractClient};
use common::HolderKey;
use obligations::{ObligationsContract, ObligationsContractClient};
use proptest::prelude::*;
use proptest_derive::Arbitrary;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::token::{Client as TokenClient, StellarAssetClient};
use soroban_sdk::{Address, Env};

const HOLDERS: usize = 4;

#[derive(Arbitrary, Clone, Debug)]
enum Op {
    Stake(
        #[proptest(strategy = "0usize..HOLDERS")] usize,
        #[proptest(strategy = "1i128..5_000")] i128,
    ),
    Unstake(#[proptest(strategy = "0usize..HOLDERS")] usize),
    Reinvest(#[proptest(strategy = "0usize..HOLDERS")] usize),
    WithdrawInterest(#[proptest(strategy = "0usize..HOLDERS")] usize),
    PostInterest(#[proptest(strategy = "1i128..2_000")] i128),
}

// ── Helpers ───────────────────────────────────────────────────────────────────

struct World {
    env: Env,
    client: CampShareContractClient<'static>,
    admin: Address,
    token: Address,
    owners: Vec<Address>,
}

impl World {
    fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();

        let token = env
            .register_stellar_asset_contract_v2(Address::generate(&env))
            .address();
        let admin = Address::generate(&env);

        let tracker_id = env.register(ObligationsContract, ());
        ObligationsContractClient::new(&env, &tracker_id).initialize(&admin);

        let client = CampShareContractClient::new(&env, &env.register(CampShareContract, ()));
        // No cool-down so exited holders can come straight back.
        client.initialize(&admin, &token, &tracker_id, &0, &30);

        let owners = (0..HOLDERS).map(|_| Address::generate(&env)).collect();
        World {
            env,
            client,
            admin,
            token,
            owners,
        }
    }

    fn holder(&self, i: usize) -> HolderKey {
        HolderKey::Direct(self.owners[i].clone())
    }

    fn holders(&self) -> Vec<HolderKey> {
        (0..HOLDERS).map(|i| self.holder(i)).collect()
    }

    fn fund(&self, owner: &Address, amount: i128) {
        StellarAssetClient::new(&self.env, &self.token).mint(owner, &amount);
        TokenClient::new(&self.env, &self.token).approve(
            owner,
            &self.client.address,
            &amount,
            &1_000,
        );
    }

    fn apply(&self, op: &Op) {
        // Individual operations may legitimately fail (empty pool, no stake);
        // a failed call leaves no trace.
        match *op {
            Op::Stake(i, amount) => {
                self.fund(&self.owners[i], amount);
                let _ = self.client.try_stake(&self.holder(i), &amount);
            }
            Op::Unstake(i) => {
                let _ = self.client.try_unstake(&self.holder(i));
            }
            Op::Reinvest(i) => {
                let _ = self.client.try_reinvest(&self.holder(i));
            }
            Op::WithdrawInterest(i) => {
                let _ = self.client.try_withdraw_interest(&self.holder(i));
            }
            Op::PostInterest(amount) => {
                self.fund(&self.admin, amount);
                let _ = self.client.try_post_interest(&self.admin, &amount);
            }
        }
    }

    fn held(&self) -> i128 {
        TokenClient::new(&self.env, &self.token).balance(&self.client.address)
    }

    fn max_dust(&self) -> i128 {
        self.client.get_interest_count() as i128 * HOLDERS as i128
    }
}

// ── proptest! blocks ──────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// After every operation the books balance against the token holdings.
    #[test]
    fn prop_ledger_conserves_tokens(ops in prop::collection::vec(any::<Op>(), 1..30)) {
        let world = World::new();

        for op in &ops {
            world.apply(op);

            let holders = world.holders();
            let principal: i128 = holders.iter().map(|h| world.client.get_stake(h)).sum();
            prop_assert_eq!(principal, world.client.get_total_staked());

            let pending: i128 = holders.iter().map(|h| world.client.unrealized_gains(h)).sum();
            let dust = world.held() - principal - pending;
            prop_assert!(dust >= 0, "ledger short by {} after {:?}", -dust, op);
            prop_assert!(dust <= world.max_dust(), "dust {} after {:?}", dust, op);
        }
    }

    /// When every holder exits, the ledger keeps nothing but dust.
    #[test]
    fn prop_full_exit_drains_pool(ops in prop::collection::vec(any::<Op>(), 1..30)) {
        let world = World::new();
        for op in &ops {
            world.apply(op);
        }

        for holder in world.holders() {
            if world.client.get_stake(&holder) > 0 {
                world.client.unstake(&holder);
            }
        }

        prop_assert_eq!(world.client.get_total_staked(), 0);
        let left = world.held();
        prop_assert!(left >= 0 && left <= world.max_dust(), "left {}", left);
    }
}
