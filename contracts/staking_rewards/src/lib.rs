#![no_std]

pub mod constants;
pub mod errors;
pub mod events;
pub mod rewards;
pub mod storage;
pub mod timelock;
pub mod withdrawal;

use common::roles::{self, Role};
use soroban_sdk::{contract, contractimpl, contracttype, log, token, Address, Env, Vec};

pub use errors::ContractError;
pub use rewards::GlobalAccrualState;
pub use storage::{Config, UserState};
pub use timelock::{GovernedParam, ParamChangeRequest};
pub use withdrawal::PendingWithdrawal;

use constants::MAX_FLAT_RATE;
use timelock::RequestOutcome;

// ── Public-facing types (re-exported for test consumers) ─────────────────────

/// Snapshot of a user's position returned by `get_staker_info`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakerInfo {
    pub staked: i128,
    pub pending_rewards: i128,
    pub stake_timestamp: u64,
    pub pending_withdrawal: PendingWithdrawal,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingRewardsContract;

#[contractimpl]
impl StakingRewardsContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the ledger.
    ///
    /// * `fee_collector`       – receives swept early-exit penalties.
    /// * `stake_token`         – SAC address of the token users lock.
    /// * `reward_token`        – SAC address both reward streams pay out in.
    /// * `params_setter`       – granted `Role::ParamsSetter`.
    /// * `rewards_distributor` – granted `Role::RewardsDistributor`.
    /// * `clock_granularity`   – seconds trimmed from every campaign period.
    ///
    /// `admin` is granted `Role::Admin`.
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        env: Env,
        admin: Address,
        fee_collector: Address,
        stake_token: Address,
        reward_token: Address,
        params_setter: Address,
        rewards_distributor: Address,
        clock_granularity: u64,
    ) -> Result<(), ContractError> {
        if storage::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        admin.require_auth();

        // No address can be unset on Soroban; the ledger itself is the one
        // degenerate choice.
        let this = env.current_contract_address();
        let addresses = [
            &admin,
            &fee_collector,
            &stake_token,
            &reward_token,
            &params_setter,
            &rewards_distributor,
        ];
        if addresses.iter().any(|a| **a == this) {
            return Err(ContractError::NoZeroAddress);
        }
        if stake_token == reward_token {
            return Err(ContractError::TokensIdentical);
        }

        let config = Config {
            stake_token: stake_token.clone(),
            reward_token: reward_token.clone(),
            fee_collector: fee_collector.clone(),
            clock_granularity,
        };
        storage::bootstrap(&env, &config, env.ledger().timestamp());

        roles::grant_role(&env, &admin, Role::Admin);
        roles::grant_role(&env, &params_setter, Role::ParamsSetter);
        roles::grant_role(&env, &rewards_distributor, Role::RewardsDistributor);

        events::publish_initialized(
            &env,
            admin,
            stake_token,
            reward_token,
            fee_collector,
            params_setter,
            rewards_distributor,
            clock_granularity,
        );

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` stake tokens.
    ///
    /// Pending rewards are settled at the old balance first, and the
    /// penalty-eligibility clock restarts even for top-ups.
    pub fn stake(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();
        Self::require_positive(amount)?;

        let config = storage::config(&env)?;
        let now = env.ledger().timestamp();
        let mut global = storage::global(&env)?;
        let mut user = storage::user(&env, &staker);

        Self::accrue(&env, &mut global, now)?;
        rewards::settle_user(&env, &mut global, &mut user, now)?;

        token::Client::new(&env, &config.stake_token).transfer(
            &staker,
            &env.current_contract_address(),
            &amount,
        );

        user.staked_balance = user.staked_balance.saturating_add(amount);
        user.stake_timestamp = now;
        global.total_staked = global.total_staked.saturating_add(amount);

        storage::save_user(&env, &staker, &user);
        storage::save_global(&env, &global);

        events::publish_staked(&env, staker, amount, global.total_staked);

        Ok(())
    }

    // ── Withdrawal queue ────────────────────────────────────────────────────

    /// Move `amount` out of the staked balance into the withdrawal slot.
    ///
    /// The amount stops earning immediately and becomes withdrawable after
    /// the active withdraw wait time.
    pub fn request_withdraw(env: Env, staker: Address, amount: i128) -> Result<u64, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();
        Self::require_positive(amount)?;

        let mut user = storage::user(&env, &staker);
        if amount > user.staked_balance {
            return Err(ContractError::NotEnoughBalance);
        }
        if user.pending_withdrawal.is_pending() {
            return Err(ContractError::WithdrawRequestPending);
        }

        let now = env.ledger().timestamp();
        let mut global = storage::global(&env)?;
        let wait_time = storage::param(&env, GovernedParam::WithdrawWaitTime)?.active;

        Self::accrue(&env, &mut global, now)?;
        rewards::settle_user(&env, &mut global, &mut user, now)?;

        let unlock_time = now.saturating_add(wait_time);
        user.staked_balance = user.staked_balance.saturating_sub(amount);
        user.pending_withdrawal = PendingWithdrawal {
            amount,
            unlock_time,
        };
        global.total_staked = global.total_staked.saturating_sub(amount);

        storage::save_user(&env, &staker, &user);
        storage::save_global(&env, &global);

        events::publish_withdraw_requested(&env, staker, amount, unlock_time);

        Ok(unlock_time)
    }

    /// Return the queued amount to the staked balance.
    ///
    /// The stake timestamp is left alone, so cancelling cannot be used to
    /// dodge or reset the penalty window.
    pub fn cancel_withdraw(env: Env, staker: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let mut user = storage::user(&env, &staker);
        if !user.pending_withdrawal.is_pending() {
            return Err(ContractError::NoWithdrawRequestPending);
        }

        let now = env.ledger().timestamp();
        let mut global = storage::global(&env)?;

        Self::accrue(&env, &mut global, now)?;
        rewards::settle_user(&env, &mut global, &mut user, now)?;

        let amount = user.pending_withdrawal.amount;
        user.staked_balance = user.staked_balance.saturating_add(amount);
        user.pending_withdrawal = PendingWithdrawal::default();
        global.total_staked = global.total_staked.saturating_add(amount);

        storage::save_user(&env, &staker, &user);
        storage::save_global(&env, &global);

        events::publish_withdraw_cancelled(&env, staker, amount);

        Ok(())
    }

    /// Settle the pending withdrawal once its unlock time has passed.
    ///
    /// Returns the amount paid out after the early-exit fee.
    pub fn withdraw(env: Env, staker: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let mut user = storage::user(&env, &staker);
        if !user.pending_withdrawal.is_pending() {
            return Err(ContractError::NoAmountAvailable);
        }
        let now = env.ledger().timestamp();
        if now < user.pending_withdrawal.unlock_time {
            return Err(ContractError::WithdrawWaitTimeNotReached);
        }

        let config = storage::config(&env)?;
        let mut global = storage::global(&env)?;
        let penalty_days = storage::param(&env, GovernedParam::PenaltyDays)?.active;

        Self::accrue(&env, &mut global, now)?;

        let settlement =
            withdrawal::settle(&user.pending_withdrawal, penalty_days, user.stake_timestamp, now);

        user.pending_withdrawal = PendingWithdrawal::default();
        global.penalty_fees_collected = global
            .penalty_fees_collected
            .saturating_add(settlement.penalty_fee);

        storage::save_user(&env, &staker, &user);
        storage::save_global(&env, &global);

        if settlement.paid > 0 {
            token::Client::new(&env, &config.stake_token).transfer(
                &env.current_contract_address(),
                &staker,
                &settlement.paid,
            );
        }

        events::publish_withdrawn(&env, staker, settlement.paid, settlement.penalty_fee);

        Ok(settlement.paid)
    }

    // ── Rewards ─────────────────────────────────────────────────────────────

    /// Claim everything accrued from both streams.
    ///
    /// Returns zero without failing when nothing is owed.
    pub fn claim_rewards(env: Env, staker: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let config = storage::config(&env)?;
        let now = env.ledger().timestamp();
        let mut global = storage::global(&env)?;
        let mut user = storage::user(&env, &staker);

        Self::accrue(&env, &mut global, now)?;
        rewards::settle_user(&env, &mut global, &mut user, now)?;

        let owed = user.unclaimed_rewards;
        user.unclaimed_rewards = 0;

        storage::save_user(&env, &staker, &user);
        storage::save_global(&env, &global);

        if owed <= 0 {
            return Ok(0);
        }

        token::Client::new(&env, &config.reward_token).transfer(
            &env.current_contract_address(),
            &staker,
            &owed,
        );

        events::publish_reward_paid(&env, staker, owed);

        Ok(owed)
    }

    /// Deposit `amount` reward tokens into the flat-stream pool.
    ///
    /// Requires `Role::RewardsDistributor`.
    pub fn fund_flat_rewards(env: Env, caller: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        Self::require_role(&env, &caller, Role::RewardsDistributor)?;
        Self::require_positive(amount)?;

        let config = storage::config(&env)?;
        let now = env.ledger().timestamp();
        let mut global = storage::global(&env)?;

        // An exhausted pool must not pay out retroactively for idle time.
        Self::accrue(&env, &mut global, now)?;

        token::Client::new(&env, &config.reward_token).transfer(
            &caller,
            &env.current_contract_address(),
            &amount,
        );

        global.reward_pool_balance = global.reward_pool_balance.saturating_add(amount);
        global.total_flat_funded = global.total_flat_funded.saturating_add(amount);
        storage::save_global(&env, &global);

        events::publish_flat_reward_added(&env, amount, global.reward_pool_balance);

        Ok(())
    }

    /// Update the flat emission rate (reward units per second).
    ///
    /// The accumulator is flushed at the old rate first, so existing stakers
    /// never gain or lose rewards retroactively. Zero pauses the stream.
    ///
    /// Requires `Role::RewardsDistributor`.
    pub fn set_flat_reward_rate(env: Env, caller: Address, rate: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        Self::require_role(&env, &caller, Role::RewardsDistributor)?;
        if rate < 0 {
            return Err(ContractError::InvalidInput);
        }
        if rate > MAX_FLAT_RATE {
            return Err(ContractError::RewardRateExceedsMaxRate);
        }

        let now = env.ledger().timestamp();
        let mut global = storage::global(&env)?;

        Self::accrue(&env, &mut global, now)?;
        global.flat_reward_rate = rate;
        storage::save_global(&env, &global);

        events::publish_flat_rate_set(&env, rate);

        Ok(())
    }

    /// Fund the campaign stream with `amount` spread over `duration` seconds,
    /// rolling any unspent remainder of a running campaign into the new rate.
    ///
    /// Requires `Role::RewardsDistributor`.
    pub fn fund_campaign(
        env: Env,
        caller: Address,
        amount: i128,
        duration: u64,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        Self::require_role(&env, &caller, Role::RewardsDistributor)?;
        Self::require_positive(amount)?;

        let config = storage::config(&env)?;
        // The period closes `clock_granularity` early; it must stay non-empty.
        if duration == 0 || duration <= config.clock_granularity {
            return Err(ContractError::NoZeroRewardDuration);
        }

        let now = env.ledger().timestamp();
        let mut global = storage::global(&env)?;

        Self::accrue(&env, &mut global, now)?;
        rewards::fund_campaign(
            &env,
            &mut global,
            amount,
            duration,
            config.clock_granularity,
            now,
        )?;

        token::Client::new(&env, &config.reward_token).transfer(
            &caller,
            &env.current_contract_address(),
            &amount,
        );

        storage::save_global(&env, &global);

        events::publish_campaign_funded(
            &env,
            amount,
            duration,
            global.campaign_reward_rate,
            global.campaign_period_end,
        );

        Ok(())
    }

    /// Return the flat-stream funds no staker has earned yet to `caller`.
    ///
    /// Requires `Role::RewardsDistributor`.
    pub fn withdraw_unallocated_flat(env: Env, caller: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        Self::require_role(&env, &caller, Role::RewardsDistributor)?;

        let config = storage::config(&env)?;
        let now = env.ledger().timestamp();
        let mut global = storage::global(&env)?;

        Self::accrue(&env, &mut global, now)?;

        let amount = global.reward_pool_balance;
        if amount <= 0 {
            return Err(ContractError::NoAmountAvailable);
        }
        global.reward_pool_balance = 0;
        storage::save_global(&env, &global);

        token::Client::new(&env, &config.reward_token).transfer(
            &env.current_contract_address(),
            &caller,
            &amount,
        );

        events::publish_unallocated_flat_withdrawn(&env, caller, amount);

        Ok(amount)
    }

    /// Sweep collected early-exit penalties to the fee collector.
    ///
    /// Requires `Role::RewardsDistributor`.
    pub fn withdraw_penalty_fees(env: Env, caller: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        Self::require_role(&env, &caller, Role::RewardsDistributor)?;

        let config = storage::config(&env)?;
        let now = env.ledger().timestamp();
        let mut global = storage::global(&env)?;

        Self::accrue(&env, &mut global, now)?;

        let fees = global.penalty_fees_collected;
        if fees <= 0 {
            return Err(ContractError::NoPenaltyFeeToCollect);
        }
        global.penalty_fees_collected = 0;
        storage::save_global(&env, &global);

        token::Client::new(&env, &config.stake_token).transfer(
            &env.current_contract_address(),
            &config.fee_collector,
            &fees,
        );

        events::publish_penalty_fees_withdrawn(&env, config.fee_collector, fees);

        Ok(fees)
    }

    // ── Timelocked parameters ───────────────────────────────────────────────

    /// Request a new penalty window in days (`0` disables the penalty).
    ///
    /// Requires `Role::ParamsSetter`.
    pub fn request_penalty_days(env: Env, caller: Address, days: u64) -> Result<(), ContractError> {
        Self::request_param(&env, &caller, GovernedParam::PenaltyDays, days)
    }

    /// Requires `Role::ParamsSetter`.
    pub fn apply_penalty_days(env: Env, caller: Address) -> Result<u64, ContractError> {
        Self::apply_param(&env, &caller, GovernedParam::PenaltyDays)
    }

    /// Request a new withdraw wait time in seconds.
    ///
    /// Requires `Role::ParamsSetter`.
    pub fn request_wait_time(env: Env, caller: Address, seconds: u64) -> Result<(), ContractError> {
        Self::request_param(&env, &caller, GovernedParam::WithdrawWaitTime, seconds)
    }

    /// Requires `Role::ParamsSetter`.
    pub fn apply_wait_time(env: Env, caller: Address) -> Result<u64, ContractError> {
        Self::apply_param(&env, &caller, GovernedParam::WithdrawWaitTime)
    }

    // ── Role administration ─────────────────────────────────────────────────

    /// Requires `Role::Admin`.
    pub fn grant_role(
        env: Env,
        caller: Address,
        account: Address,
        role: Role,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        Self::require_role(&env, &caller, Role::Admin)?;

        if roles::grant_role(&env, &account, role) {
            events::publish_role_granted(&env, role, account, caller);
        }
        Ok(())
    }

    /// Requires `Role::Admin`.
    pub fn revoke_role(
        env: Env,
        caller: Address,
        account: Address,
        role: Role,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        Self::require_role(&env, &caller, Role::Admin)?;

        if roles::revoke_role(&env, &account, role) {
            events::publish_role_revoked(&env, role, account, caller);
        }
        Ok(())
    }

    /// Give up a role held by `account` itself.
    pub fn renounce_role(env: Env, account: Address, role: Role) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        account.require_auth();

        if roles::revoke_role(&env, &account, role) {
            events::publish_role_revoked(&env, role, account.clone(), account);
        }
        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn is_initialized(env: Env) -> bool {
        storage::is_initialized(&env)
    }

    pub fn has_role(env: Env, account: Address, role: Role) -> bool {
        roles::has_role(&env, &account, role)
    }

    pub fn get_role_members(env: Env, role: Role) -> Vec<Address> {
        roles::role_members(&env, role)
    }

    pub fn get_config(env: Env) -> Result<Config, ContractError> {
        storage::config(&env)
    }

    /// Return the stored accounting record as of the last mutation.
    pub fn get_global_state(env: Env) -> Result<GlobalAccrualState, ContractError> {
        storage::global(&env)
    }

    /// Return the user's current staked balance.
    pub fn get_staked(env: Env, staker: Address) -> i128 {
        storage::user(&env, &staker).staked_balance
    }

    /// Return the sum of all currently staked tokens.
    pub fn get_total_staked(env: Env) -> i128 {
        storage::global(&env).map(|g| g.total_staked).unwrap_or(0)
    }

    pub fn get_user_state(env: Env, staker: Address) -> UserState {
        storage::user(&env, &staker)
    }

    /// Return real-time claimable rewards without mutating state.
    pub fn get_pending_rewards(env: Env, staker: Address) -> Result<i128, ContractError> {
        match storage::global(&env) {
            Ok(global) => rewards::pending_rewards(
                &env,
                &global,
                &storage::user(&env, &staker),
                env.ledger().timestamp(),
            ),
            Err(_) => Ok(0),
        }
    }

    /// Return the combined position for a user.
    pub fn get_staker_info(env: Env, staker: Address) -> Result<StakerInfo, ContractError> {
        let user = storage::user(&env, &staker);
        let pending_rewards = match storage::global(&env) {
            Ok(global) => {
                rewards::pending_rewards(&env, &global, &user, env.ledger().timestamp())?
            }
            Err(_) => 0,
        };

        Ok(StakerInfo {
            staked: user.staked_balance,
            pending_rewards,
            stake_timestamp: user.stake_timestamp,
            pending_withdrawal: user.pending_withdrawal,
        })
    }

    pub fn get_withdraw_request(env: Env, staker: Address) -> PendingWithdrawal {
        storage::user(&env, &staker).pending_withdrawal
    }

    pub fn get_withdraw_available_time(env: Env, staker: Address) -> u64 {
        storage::user(&env, &staker).pending_withdrawal.unlock_time
    }

    pub fn get_withdraw_requested_amount(env: Env, staker: Address) -> i128 {
        storage::user(&env, &staker).pending_withdrawal.amount
    }

    /// The early-exit fee the pending withdrawal would pay if settled now.
    pub fn get_withdraw_penalty(env: Env, staker: Address) -> Result<i128, ContractError> {
        let user = storage::user(&env, &staker);
        let penalty_days = storage::param(&env, GovernedParam::PenaltyDays)?.active;
        Ok(withdrawal::penalty_fee(
            user.pending_withdrawal.amount,
            penalty_days,
            user.stake_timestamp,
            env.ledger().timestamp(),
        ))
    }

    pub fn get_flat_reward_rate(env: Env) -> i128 {
        storage::global(&env).map(|g| g.flat_reward_rate).unwrap_or(0)
    }

    /// Scaled by `PRECISION`.
    pub fn get_campaign_reward_rate(env: Env) -> i128 {
        storage::global(&env)
            .map(|g| g.campaign_reward_rate)
            .unwrap_or(0)
    }

    pub fn get_reward_pool_balance(env: Env) -> i128 {
        storage::global(&env)
            .map(|g| g.reward_pool_balance)
            .unwrap_or(0)
    }

    pub fn get_penalty_fees_collected(env: Env) -> i128 {
        storage::global(&env)
            .map(|g| g.penalty_fees_collected)
            .unwrap_or(0)
    }

    /// `min(timestamp, campaign_period_end)`.
    pub fn last_time_campaign_applicable(env: Env, timestamp: u64) -> Result<u64, ContractError> {
        let global = storage::global(&env)?;
        Ok(rewards::last_time_campaign_applicable(&global, timestamp))
    }

    pub fn get_penalty_days(env: Env) -> Result<u64, ContractError> {
        Ok(storage::param(&env, GovernedParam::PenaltyDays)?.active)
    }

    pub fn get_withdraw_wait_time(env: Env) -> Result<u64, ContractError> {
        Ok(storage::param(&env, GovernedParam::WithdrawWaitTime)?.active)
    }

    pub fn get_penalty_days_request(env: Env) -> Result<ParamChangeRequest, ContractError> {
        Ok(storage::param(&env, GovernedParam::PenaltyDays)?.pending)
    }

    pub fn get_wait_time_request(env: Env) -> Result<ParamChangeRequest, ContractError> {
        Ok(storage::param(&env, GovernedParam::WithdrawWaitTime)?.pending)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: revert if the contract is not yet initialized.
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !storage::is_initialized(env) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Guard: authenticate `caller` and revert unless it holds `role`.
    fn require_role(env: &Env, caller: &Address, role: Role) -> Result<(), ContractError> {
        caller.require_auth();
        if !roles::has_role(env, caller, role) {
            return Err(ContractError::AccessControlUnauthorizedAccount);
        }
        Ok(())
    }

    fn require_positive(amount: i128) -> Result<(), ContractError> {
        if amount == 0 {
            return Err(ContractError::NoZeroAmount);
        }
        if amount < 0 {
            return Err(ContractError::InvalidInput);
        }
        Ok(())
    }

    /// Flush the global accumulator to `now`.
    fn accrue(
        env: &Env,
        global: &mut GlobalAccrualState,
        now: u64,
    ) -> Result<(), ContractError> {
        let accrual = rewards::settle(env, global, now)?;
        if accrual.flat_capped {
            log!(
                env,
                "flat reward pool exhausted",
                accrual.flat_distributed,
                now
            );
        }
        Ok(())
    }

    fn request_param(
        env: &Env,
        caller: &Address,
        param: GovernedParam,
        value: u64,
    ) -> Result<(), ContractError> {
        Self::require_initialized(env)?;
        Self::require_role(env, caller, Role::ParamsSetter)?;

        let rules = param.rules();
        let mut state = storage::param(env, param)?;
        let outcome = state.request(&rules, value, env.ledger().timestamp())?;
        storage::save_param(env, param, &state);

        match outcome {
            RequestOutcome::Applied(value) => events::publish_param_updated(env, param, value),
            RequestOutcome::Queued(request) => {
                events::publish_param_requested(env, param, request.value, request.unlock_time)
            }
        }

        Ok(())
    }

    fn apply_param(env: &Env, caller: &Address, param: GovernedParam) -> Result<u64, ContractError> {
        Self::require_initialized(env)?;
        Self::require_role(env, caller, Role::ParamsSetter)?;

        let rules = param.rules();
        let now = env.ledger().timestamp();
        let mut state = storage::param(env, param)?;
        let value = match state.apply(&rules, now) {
            Ok(value) => value,
            Err(ContractError::TimelockBufferExceeded) => {
                log!(
                    env,
                    "stale parameter request must be replaced",
                    param,
                    state.pending.unlock_time,
                    now
                );
                return Err(ContractError::TimelockBufferExceeded);
            }
            Err(e) => return Err(e),
        };
        storage::save_param(env, param, &state);

        events::publish_param_updated(env, param, value);

        Ok(value)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────



#[cfg(test)]
mod test_rewards;
