use soroban_sdk::{contracttype, Env, I256};

use crate::constants::PRECISION;
use crate::errors::ContractError;
use crate::storage::UserState;

// ── Global accrual state ────────────────────────────────────────────────────

/// Singleton accounting record for both reward streams.
///
/// The flat stream emits `flat_reward_rate` reward units per second out of
/// `reward_pool_balance` until the pool runs dry. The campaign stream emits
/// `campaign_reward_rate / PRECISION` units per second until
/// `campaign_period_end`. Both feed the same `reward_per_share` accumulator.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GlobalAccrualState {
    pub total_staked: i128,
    /// Flat-stream funds not yet earned by any staker.
    pub reward_pool_balance: i128,
    pub flat_reward_rate: i128,
    /// Scaled by `PRECISION`.
    pub campaign_reward_rate: i128,
    pub campaign_period_end: u64,
    /// Scaled by `PRECISION`. Never decreases.
    pub reward_per_share: i128,
    pub last_accrual_time: u64,
    pub total_campaign_funded: i128,
    pub total_flat_funded: i128,
    pub penalty_fees_collected: i128,
}

impl GlobalAccrualState {
    pub fn new(now: u64) -> Self {
        Self {
            campaign_period_end: now,
            last_accrual_time: now,
            ..Self::default()
        }
    }
}

/// What a single `settle` call moved.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Accrual {
    /// Flat-stream units moved out of the pool and onto the accumulator.
    pub flat_distributed: i128,
    /// `true` when the pool could not cover `rate × elapsed`.
    pub flat_capped: bool,
}

// ── Fixed-point helpers ─────────────────────────────────────────────────────

// Token amounts at 18 decimals times `PRECISION` overflow `i128`, so every
// scaled product goes through a 256-bit intermediate.

fn wide(env: &Env, value: i128) -> I256 {
    I256::from_i128(env, value)
}

fn narrow(value: &I256) -> Result<i128, ContractError> {
    value.to_i128().ok_or(ContractError::ArithmeticOverflow)
}

/// `a × b / d`, truncated. `d` must be positive.
pub fn mul_div(env: &Env, a: i128, b: i128, d: i128) -> Result<i128, ContractError> {
    narrow(&wide(env, a).mul(&wide(env, b)).div(&wide(env, d)))
}

/// `a × b / d`, rounded up. Operands must be non-negative and `d` positive.
pub fn mul_div_ceil(env: &Env, a: i128, b: i128, d: i128) -> Result<i128, ContractError> {
    let product = wide(env, a).mul(&wide(env, b));
    let divisor = wide(env, d);
    let quotient = narrow(&product.div(&divisor))?;
    if product.rem_euclid(&divisor) == wide(env, 0) {
        Ok(quotient)
    } else {
        quotient
            .checked_add(1)
            .ok_or(ContractError::ArithmeticOverflow)
    }
}

// ── Core reward engine ──────────────────────────────────────────────────────

/// Campaign emissions stop at the end of the funded period.
pub fn last_time_campaign_applicable(state: &GlobalAccrualState, now: u64) -> u64 {
    now.min(state.campaign_period_end)
}

/// Bring the accumulator up to `now`.
///
/// ```text
/// flat      = min(flat_rate × (now − last), pool)
/// campaign  = campaign_rate × (min(now, period_end) − last)
/// Δrps      = flat × PRECISION / total_staked + campaign / total_staked
/// ```
///
/// With nothing staked the accumulator is frozen, but `last_accrual_time`
/// still advances so that idle time is skipped rather than paid out later.
/// Calling twice with the same `now` is a no-op the second time.
#[allow(clippy::arithmetic_side_effects)]
pub fn settle(
    env: &Env,
    state: &mut GlobalAccrualState,
    now: u64,
) -> Result<Accrual, ContractError> {
    let mut accrual = Accrual::default();
    if now <= state.last_accrual_time {
        return Ok(accrual);
    }

    if state.total_staked > 0 {
        let total = state.total_staked;
        let elapsed = (now - state.last_accrual_time) as i128;

        let flat_due = state.flat_reward_rate.saturating_mul(elapsed);
        let flat = flat_due.min(state.reward_pool_balance).max(0);
        let flat_delta = mul_div(env, flat, PRECISION, total)?;
        // Debit rounds up so stakers are never credited more than leaves
        // the pool. Never exceeds `flat`.
        let flat_distributed = mul_div_ceil(env, flat_delta, total, PRECISION)?;

        let campaign_elapsed = last_time_campaign_applicable(state, now)
            .saturating_sub(state.last_accrual_time) as i128;
        let campaign_delta = mul_div(env, campaign_elapsed, state.campaign_reward_rate, total)?;

        state.reward_pool_balance = state.reward_pool_balance.saturating_sub(flat_distributed);
        state.reward_per_share = state
            .reward_per_share
            .checked_add(flat_delta)
            .and_then(|rps| rps.checked_add(campaign_delta))
            .ok_or(ContractError::ArithmeticOverflow)?;

        accrual.flat_distributed = flat_distributed;
        accrual.flat_capped = flat < flat_due;
    }

    state.last_accrual_time = now;
    Ok(accrual)
}

/// Rewards owed on `staked` for the accumulator movement since `snapshot`.
///
/// ```text
/// owed = staked × (current_rps − snapshot) / PRECISION
/// ```
pub fn earned(
    env: &Env,
    staked: i128,
    current_rps: i128,
    snapshot: i128,
) -> Result<i128, ContractError> {
    mul_div(env, staked, current_rps.saturating_sub(snapshot), PRECISION)
}

/// Settle globally, then credit `user` with everything accrued since their
/// last snapshot. Returns the newly credited amount.
pub fn settle_user(
    env: &Env,
    state: &mut GlobalAccrualState,
    user: &mut UserState,
    now: u64,
) -> Result<i128, ContractError> {
    settle(env, state, now)?;
    let owed = earned(
        env,
        user.staked_balance,
        state.reward_per_share,
        user.reward_per_share_snapshot,
    )?;
    user.reward_per_share_snapshot = state.reward_per_share;
    user.unclaimed_rewards = user.unclaimed_rewards.saturating_add(owed);
    Ok(owed)
}

/// Total claimable by `user` at `now`, computed on copies.
pub fn pending_rewards(
    env: &Env,
    state: &GlobalAccrualState,
    user: &UserState,
    now: u64,
) -> Result<i128, ContractError> {
    let mut state = state.clone();
    settle(env, &mut state, now)?;
    let owed = earned(
        env,
        user.staked_balance,
        state.reward_per_share,
        user.reward_per_share_snapshot,
    )?;
    Ok(user.unclaimed_rewards.saturating_add(owed))
}

/// Recompute the campaign emission for new funding.
///
/// An expired period restarts at `amount / duration`. A running period rolls
/// its unspent remainder into the new funding, amortised over the fresh
/// duration:
///
/// ```text
/// remaining = (period_end − now) × rate / PRECISION
/// rate      = (remaining + amount) × PRECISION / duration
/// ```
///
/// The period closes `clock_granularity` seconds early so the last coarse
/// clock step still lands inside it. The caller must have settled at `now`
/// and ensured `duration > clock_granularity`.
#[allow(clippy::arithmetic_side_effects)]
pub fn fund_campaign(
    env: &Env,
    state: &mut GlobalAccrualState,
    amount: i128,
    duration: u64,
    clock_granularity: u64,
    now: u64,
) -> Result<(), ContractError> {
    let funding = if now >= state.campaign_period_end {
        amount
    } else {
        let remaining = mul_div(
            env,
            (state.campaign_period_end - now) as i128,
            state.campaign_reward_rate,
            PRECISION,
        )?;
        remaining
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?
    };

    state.campaign_reward_rate = mul_div(env, funding, PRECISION, duration as i128)?;
    state.campaign_period_end = now
        .saturating_add(duration)
        .saturating_sub(clock_granularity);
    state.total_campaign_funded = state.total_campaign_funded.saturating_add(amount);
    Ok(())
}

// ── Unit tests ──────────────────────────────────────────────────────────────
