#![allow(deprecated)] // events().publish migration tracked separately

use common::roles::Role;
use soroban_sdk::{symbol_short, Address, Env};

use crate::timelock::GovernedParam;

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the ledger is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub stake_token: Address,
    pub reward_token: Address,
    pub fee_collector: Address,
    pub params_setter: Address,
    pub rewards_distributor: Address,
    pub clock_granularity: u64,
    pub timestamp: u64,
}

/// Fired when a user deposits stake.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub staker: Address,
    pub amount: i128,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

/// Fired when a user queues a withdrawal.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawRequestedEvent {
    pub staker: Address,
    pub amount: i128,
    pub unlock_time: u64,
    pub timestamp: u64,
}

/// Fired when a queued withdrawal goes back to stake.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawCancelledEvent {
    pub staker: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when a withdrawal settles.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    pub staker: Address,
    pub amount_paid: i128,
    pub penalty_fee: i128,
    pub timestamp: u64,
}

/// Fired when a user claims accrued rewards.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardPaidEvent {
    pub staker: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FlatRewardAddedEvent {
    pub amount: i128,
    pub pool_balance: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FlatRateSetEvent {
    pub new_rate: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnallocatedFlatWithdrawnEvent {
    pub recipient: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when campaign funding arrives; carries the recomputed emission.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignFundedEvent {
    pub amount: i128,
    pub duration: u64,
    pub reward_rate: i128,
    pub period_end: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PenaltyFeesWithdrawnEvent {
    pub collector: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when an increase is queued behind the timelock.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParamRequestedEvent {
    pub param: GovernedParam,
    pub value: u64,
    pub unlock_time: u64,
    pub timestamp: u64,
}

/// Fired whenever a governed parameter's active value changes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParamUpdatedEvent {
    pub param: GovernedParam,
    pub value: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleChangedEvent {
    pub role: Role,
    pub account: Address,
    pub sender: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
pub fn publish_initialized(
    env: &Env,
    admin: Address,
    stake_token: Address,
    reward_token: Address,
    fee_collector: Address,
    params_setter: Address,
    rewards_distributor: Address,
    clock_granularity: u64,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            stake_token,
            reward_token,
            fee_collector,
            params_setter,
            rewards_distributor,
            clock_granularity,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staked(env: &Env, staker: Address, amount: i128, new_total_staked: i128) {
    env.events().publish(
        (symbol_short!("STAKED"), staker.clone()),
        StakedEvent {
            staker,
            amount,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdraw_requested(env: &Env, staker: Address, amount: i128, unlock_time: u64) {
    env.events().publish(
        (symbol_short!("WD_REQ"), staker.clone()),
        WithdrawRequestedEvent {
            staker,
            amount,
            unlock_time,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdraw_cancelled(env: &Env, staker: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("WD_CNCL"), staker.clone()),
        WithdrawCancelledEvent {
            staker,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdrawn(env: &Env, staker: Address, amount_paid: i128, penalty_fee: i128) {
    env.events().publish(
        (symbol_short!("WITHDRAWN"), staker.clone()),
        WithdrawnEvent {
            staker,
            amount_paid,
            penalty_fee,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_paid(env: &Env, staker: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("RWD_PAID"), staker.clone()),
        RewardPaidEvent {
            staker,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_flat_reward_added(env: &Env, amount: i128, pool_balance: i128) {
    env.events().publish(
        (symbol_short!("FLAT_ADD"),),
        FlatRewardAddedEvent {
            amount,
            pool_balance,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_flat_rate_set(env: &Env, new_rate: i128) {
    env.events().publish(
        (symbol_short!("FLAT_RATE"),),
        FlatRateSetEvent {
            new_rate,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unallocated_flat_withdrawn(env: &Env, recipient: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("FLAT_OUT"), recipient.clone()),
        UnallocatedFlatWithdrawnEvent {
            recipient,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_campaign_funded(
    env: &Env,
    amount: i128,
    duration: u64,
    reward_rate: i128,
    period_end: u64,
) {
    env.events().publish(
        (symbol_short!("CAMPAIGN"),),
        CampaignFundedEvent {
            amount,
            duration,
            reward_rate,
            period_end,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_penalty_fees_withdrawn(env: &Env, collector: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("PEN_OUT"), collector.clone()),
        PenaltyFeesWithdrawnEvent {
            collector,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_param_requested(env: &Env, param: GovernedParam, value: u64, unlock_time: u64) {
    env.events().publish(
        (symbol_short!("PARAM_REQ"), param),
        ParamRequestedEvent {
            param,
            value,
            unlock_time,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_param_updated(env: &Env, param: GovernedParam, value: u64) {
    env.events().publish(
        (symbol_short!("PARAM_SET"), param),
        ParamUpdatedEvent {
            param,
            value,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_role_granted(env: &Env, role: Role, account: Address, sender: Address) {
    env.events().publish(
        (symbol_short!("ROLE_GRNT"), account.clone()),
        RoleChangedEvent {
            role,
            account,
            sender,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_role_revoked(env: &Env, role: Role, account: Address, sender: Address) {
    env.events().publish(
        (symbol_short!("ROLE_RVK"), account.clone()),
        RoleChangedEvent {
            role,
            account,
            sender,
            timestamp: env.ledger().timestamp(),
        },
    );
}
