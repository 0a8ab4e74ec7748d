#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::StellarAssetClient;
use soroban_sdk::{Address, Env};
use staking_rewards::{StakingRewardsContract, StakingRewardsContractClient};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Stake { amount: u64 },
    RequestWithdraw { amount: u64 },
    CancelWithdraw,
    Withdraw,
    ClaimRewards,
    FundCampaign { amount: u32, duration: u32 },
    FundFlat { amount: u32 },
    SetFlatRate { rate: u32 },
    RequestPenaltyDays { days: u8 },
    ApplyPenaltyDays,
    RequestWaitTime { seconds: u32 },
    ApplyWaitTime,
    SweepPenaltyFees,
    WithdrawUnallocatedFlat,
    Advance { seconds: u32 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let stake_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let contract_id = env.register(StakingRewardsContract, ());
    let client = StakingRewardsContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let operator = Address::generate(&env);
    client.initialize(
        &admin,
        &admin,
        &stake_token,
        &reward_token,
        &operator,
        &operator,
        &12,
    );
    StellarAssetClient::new(&env, &reward_token).mint(&operator, &(i64::MAX as i128));

    let mut users = vec![];
    for _ in 0..4 {
        let user = Address::generate(&env);
        StellarAssetClient::new(&env, &stake_token).mint(&user, &(u64::MAX as i128));
        users.push(user);
    }

    // Looking for panics: arithmetic overflow, broken custody, rejected
    // transfers the contract should have caught.
    for (i, action) in actions.into_iter().enumerate() {
        let user = &users[i % users.len()];
        match action {
            FuzzAction::Stake { amount } => {
                let _ = client.try_stake(user, &(amount as i128));
            }
            FuzzAction::RequestWithdraw { amount } => {
                let _ = client.try_request_withdraw(user, &(amount as i128));
            }
            FuzzAction::CancelWithdraw => {
                let _ = client.try_cancel_withdraw(user);
            }
            FuzzAction::Withdraw => {
                let _ = client.try_withdraw(user);
            }
            FuzzAction::ClaimRewards => {
                let _ = client.try_claim_rewards(user);
            }
            FuzzAction::FundCampaign { amount, duration } => {
                let _ = client.try_fund_campaign(&operator, &(amount as i128), &(duration as u64));
            }
            FuzzAction::FundFlat { amount } => {
                let _ = client.try_fund_flat_rewards(&operator, &(amount as i128));
            }
            FuzzAction::SetFlatRate { rate } => {
                let _ = client.try_set_flat_reward_rate(&operator, &(rate as i128));
            }
            FuzzAction::RequestPenaltyDays { days } => {
                let _ = client.try_request_penalty_days(&operator, &(days as u64));
            }
            FuzzAction::ApplyPenaltyDays => {
                let _ = client.try_apply_penalty_days(&operator);
            }
            FuzzAction::RequestWaitTime { seconds } => {
                let _ = client.try_request_wait_time(&operator, &(seconds as u64));
            }
            FuzzAction::ApplyWaitTime => {
                let _ = client.try_apply_wait_time(&operator);
            }
            FuzzAction::SweepPenaltyFees => {
                let _ = client.try_withdraw_penalty_fees(&operator);
            }
            FuzzAction::WithdrawUnallocatedFlat => {
                let _ = client.try_withdraw_unallocated_flat(&operator);
            }
            FuzzAction::Advance { seconds } => {
                env.ledger()
                    .set_timestamp(env.ledger().timestamp() + seconds as u64);
            }
        }

        let staked: i128 = users.iter().map(|u| client.get_staked(u)).sum();
        assert_eq!(client.get_total_staked(), staked);
    }
});
