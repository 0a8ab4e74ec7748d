extern crate std;

use soroban_sdk::{testutils::Address as _, token::StellarAssetClient, Address};

use crate::constants::{MAX_FLAT_RATE, ONE_DAY, PRECISION};
use crate::test::{Fixture, REWARD_SUPPLY, START};
use crate::ContractError;

// ── Campaign stream ──────────────────────────────────────────────────────────

#[test]
fn test_single_staker_earns_whole_campaign() {
    let f = Fixture::new();
    let staker = f.staker(1_000);
    f.client.stake(&staker, &1_000);

    let funding: i128 = 1_000_000_000;
    f.client.fund_campaign(&f.distributor, &funding, &(10 * ONE_DAY));
    assert_eq!(f.reward_balance(&f.contract_id), funding);

    // Emissions stop at the end of the period; extra time earns nothing.
    f.advance(12 * ONE_DAY);
    let claimed = f.client.claim_rewards(&staker);

    assert!(claimed <= funding);
    assert!(funding - claimed < 1_000, "lost {} to rounding", funding - claimed);
    assert_eq!(f.reward_balance(&staker), claimed);
    assert_eq!(f.client.get_pending_rewards(&staker), 0);
}

#[test]
fn test_eighteen_decimal_campaign_pays_out_in_full() {
    let f = Fixture::new();
    let staked: i128 = 100 * PRECISION;
    let funding: i128 = 1_000 * PRECISION;
    let staker = f.staker(staked);
    f.client.stake(&staker, &staked);

    StellarAssetClient::new(&f.env, &f.reward_token).mint(&f.distributor, &funding);
    f.client.fund_campaign(&f.distributor, &funding, &(10 * ONE_DAY));

    f.advance(10 * ONE_DAY);
    let claimed = f.client.claim_rewards(&staker);

    // 1e21 units; only per-share truncation (under one unit per staked
    // token) may be left behind.
    assert!(claimed <= funding);
    assert!(funding - claimed <= 100, "lost {} to rounding", funding - claimed);
    assert_eq!(f.reward_balance(&staker), claimed);
}

#[test]
fn test_unrepresentable_accrual_is_rejected() {
    let f = Fixture::new();
    let staker = f.staker(1);
    f.client.stake(&staker, &1);

    // The rate fits, but per-share growth against one staked unit does not.
    let funding: i128 = 100_000 * PRECISION;
    StellarAssetClient::new(&f.env, &f.reward_token).mint(&f.distributor, &funding);
    f.client.fund_campaign(&f.distributor, &funding, &1_000);
    f.advance(1_000);

    match f.client.try_claim_rewards(&staker) {
        Err(Ok(e)) => assert_eq!(e, ContractError::ArithmeticOverflow),
        _ => unreachable!("Expected ArithmeticOverflow error"),
    }
    match f.client.try_get_pending_rewards(&staker) {
        Err(Ok(e)) => assert_eq!(e, ContractError::ArithmeticOverflow),
        _ => unreachable!("Expected ArithmeticOverflow error"),
    }
}

#[test]
fn test_equal_stakes_split_campaign_evenly() {
    let f = Fixture::new();
    let alice = f.staker(500);
    let bob = f.staker(500);
    f.client.stake(&alice, &500);
    f.client.stake(&bob, &500);

    f.client.fund_campaign(&f.distributor, &1_000_000, &1_000);
    f.advance(1_000);

    assert_eq!(f.client.claim_rewards(&alice), 500_000);
    assert_eq!(f.client.claim_rewards(&bob), 500_000);
}

#[test]
fn test_late_staker_earns_from_entry_only() {
    let f = Fixture::new();
    let alice = f.staker(1_000);
    let bob = f.staker(1_000);
    f.client.stake(&alice, &1_000);
    f.client.fund_campaign(&f.distributor, &1_000_000, &1_000);

    f.advance(500);
    f.client.stake(&bob, &1_000);
    f.advance(500);

    // Alice: 500s alone + 500s at half share.
    assert_eq!(f.client.get_pending_rewards(&alice), 750_000);
    assert_eq!(f.client.get_pending_rewards(&bob), 250_000);
}

#[test]
fn test_idle_period_without_stakers_is_not_paid() {
    let f = Fixture::new();
    f.client.fund_campaign(&f.distributor, &1_000, &1_000);

    f.advance(500);
    let staker = f.staker(1_000);
    f.client.stake(&staker, &1_000);
    f.advance(500);

    assert_eq!(f.client.claim_rewards(&staker), 500);
}

#[test]
fn test_pending_withdrawal_stops_earning() {
    let f = Fixture::new();
    let alice = f.staker(500);
    let bob = f.staker(500);
    f.client.stake(&alice, &500);
    f.client.stake(&bob, &500);
    f.client.request_withdraw(&alice, &500);

    f.client.fund_campaign(&f.distributor, &1_000_000, &1_000);
    f.advance(1_000);

    assert_eq!(f.client.get_pending_rewards(&alice), 0);
    assert_eq!(f.client.get_pending_rewards(&bob), 1_000_000);
}

#[test]
fn test_campaign_rollover_folds_remainder_into_rate() {
    let f = Fixture::new();
    let staker = f.staker(1_000);
    f.client.stake(&staker, &1_000);

    f.client.fund_campaign(&f.distributor, &1_000, &1_000);
    assert_eq!(f.client.get_campaign_reward_rate(), PRECISION);

    f.advance(500);
    f.client.fund_campaign(&f.distributor, &1_000, &1_000);

    // 500 left over + 1 000 new, spread over the fresh 1 000s.
    assert_eq!(f.client.get_campaign_reward_rate(), 3 * PRECISION / 2);
    assert_eq!(f.client.get_global_state().campaign_period_end, START + 1_500);
    assert_eq!(f.client.get_global_state().total_campaign_funded, 2_000);

    f.advance(1_000);
    assert_eq!(f.client.claim_rewards(&staker), 2_000);
}

#[test]
fn test_clock_granularity_shortens_period() {
    let f = Fixture::with_granularity(12);
    f.client.fund_campaign(&f.distributor, &1_000, &1_000);

    let end = f.client.get_global_state().campaign_period_end;
    assert_eq!(end, START + 1_000 - 12);
    assert_eq!(f.client.last_time_campaign_applicable(&(START + 5_000)), end);
    assert_eq!(f.client.last_time_campaign_applicable(&(START + 10)), START + 10);

    match f.client.try_fund_campaign(&f.distributor, &1_000, &12) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NoZeroRewardDuration),
        _ => unreachable!("Expected NoZeroRewardDuration error"),
    }
}

#[test]
fn test_fund_campaign_validation() {
    let f = Fixture::new();

    match f.client.try_fund_campaign(&f.distributor, &1_000, &0) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NoZeroRewardDuration),
        _ => unreachable!("Expected NoZeroRewardDuration error"),
    }
    match f.client.try_fund_campaign(&f.distributor, &0, &1_000) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NoZeroAmount),
        _ => unreachable!("Expected NoZeroAmount error"),
    }

    let outsider = Address::generate(&f.env);
    match f.client.try_fund_campaign(&outsider, &1_000, &1_000) {
        Err(Ok(e)) => assert_eq!(e, ContractError::AccessControlUnauthorizedAccount),
        _ => unreachable!("Expected AccessControlUnauthorizedAccount error"),
    }
}

// ── Flat stream ──────────────────────────────────────────────────────────────

#[test]
fn test_flat_and_campaign_streams_add_up() {
    let f = Fixture::new();
    let staker = f.staker(1_000);
    f.client.stake(&staker, &1_000);

    f.client.fund_flat_rewards(&f.distributor, &10_000);
    f.client.set_flat_reward_rate(&f.distributor, &1);
    f.client.fund_campaign(&f.distributor, &1_000, &1_000);

    f.advance(1_000);

    assert_eq!(f.client.get_pending_rewards(&staker), 2_000);
    assert_eq!(f.client.claim_rewards(&staker), 2_000);
    assert_eq!(f.client.get_reward_pool_balance(), 9_000);
    assert_eq!(f.client.get_global_state().total_flat_funded, 10_000);
}

#[test]
fn test_flat_stream_capped_by_pool() {
    let f = Fixture::new();
    let staker = f.staker(1_000);
    f.client.stake(&staker, &1_000);

    f.client.fund_flat_rewards(&f.distributor, &500);
    f.client.set_flat_reward_rate(&f.distributor, &1);
    f.advance(1_000);

    assert_eq!(f.client.claim_rewards(&staker), 500);
    assert_eq!(f.client.get_reward_pool_balance(), 0);

    match f.client.try_withdraw_unallocated_flat(&f.distributor) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NoAmountAvailable),
        _ => unreachable!("Expected NoAmountAvailable error"),
    }
}

#[test]
fn test_refunded_pool_does_not_pay_for_dry_spell() {
    let f = Fixture::new();
    let staker = f.staker(1_000);
    f.client.stake(&staker, &1_000);

    f.client.fund_flat_rewards(&f.distributor, &100);
    f.client.set_flat_reward_rate(&f.distributor, &1);
    f.advance(1_000);

    f.client.fund_flat_rewards(&f.distributor, &1_000);
    f.advance(100);

    assert_eq!(f.client.get_pending_rewards(&staker), 200);
}

#[test]
fn test_rate_change_is_not_retroactive() {
    let f = Fixture::new();
    let staker = f.staker(1_000);
    f.client.stake(&staker, &1_000);

    f.client.fund_flat_rewards(&f.distributor, &100_000);
    f.client.set_flat_reward_rate(&f.distributor, &1);
    f.advance(100);
    f.client.set_flat_reward_rate(&f.distributor, &10);
    f.advance(100);

    assert_eq!(f.client.get_pending_rewards(&staker), 1_100);
    assert_eq!(f.client.get_flat_reward_rate(), 10);
}

#[test]
fn test_set_flat_reward_rate_validation() {
    let f = Fixture::new();

    f.client.set_flat_reward_rate(&f.distributor, &MAX_FLAT_RATE);
    match f.client.try_set_flat_reward_rate(&f.distributor, &(MAX_FLAT_RATE + 1)) {
        Err(Ok(e)) => assert_eq!(e, ContractError::RewardRateExceedsMaxRate),
        _ => unreachable!("Expected RewardRateExceedsMaxRate error"),
    }
    match f.client.try_set_flat_reward_rate(&f.distributor, &-1) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidInput),
        _ => unreachable!("Expected InvalidInput error"),
    }

    let outsider = Address::generate(&f.env);
    match f.client.try_set_flat_reward_rate(&outsider, &1) {
        Err(Ok(e)) => assert_eq!(e, ContractError::AccessControlUnauthorizedAccount),
        _ => unreachable!("Expected AccessControlUnauthorizedAccount error"),
    }
}

#[test]
fn test_withdraw_unallocated_flat_returns_unearned_pool() {
    let f = Fixture::new();
    let staker = f.staker(1_000);
    f.client.stake(&staker, &1_000);

    f.client.fund_flat_rewards(&f.distributor, &10_000);
    f.client.set_flat_reward_rate(&f.distributor, &1);
    f.advance(1_000);

    let returned = f.client.withdraw_unallocated_flat(&f.distributor);
    assert_eq!(returned, 9_000);
    assert_eq!(f.reward_balance(&f.distributor), REWARD_SUPPLY - 1_000);
    assert_eq!(f.client.get_reward_pool_balance(), 0);

    // Already-earned rewards stay claimable.
    assert_eq!(f.client.claim_rewards(&staker), 1_000);
    assert_eq!(f.reward_balance(&f.contract_id), 0);
}

// ── Claiming ─────────────────────────────────────────────────────────────────

#[test]
fn test_claim_with_nothing_owed_returns_zero() {
    let f = Fixture::new();
    let staker = f.staker(1_000);
    f.client.stake(&staker, &1_000);

    assert_eq!(f.client.claim_rewards(&staker), 0);
    assert_eq!(f.reward_balance(&staker), 0);
}

#[test]
fn test_rewards_survive_full_withdrawal() {
    let f = Fixture::new();
    let staker = f.staker(1_000);
    f.client.stake(&staker, &1_000);
    f.client.fund_campaign(&f.distributor, &1_000, &1_000);

    f.advance(1_000);
    f.client.request_withdraw(&staker, &1_000);
    f.advance(20 * ONE_DAY);
    f.client.withdraw(&staker);

    assert_eq!(f.client.get_user_state(&staker).unclaimed_rewards, 1_000);
    assert_eq!(f.client.claim_rewards(&staker), 1_000);
}
