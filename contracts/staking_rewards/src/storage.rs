use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::constants::{MAX_WITHDRAW_WAIT_TIME, TTL_EXTEND_TO, TTL_THRESHOLD};
use crate::errors::ContractError;
use crate::rewards::GlobalAccrualState;
use crate::timelock::{GovernedParam, TimelockedParam};
use crate::withdrawal::PendingWithdrawal;

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const CONFIG: Symbol = symbol_short!("CONFIG");
const GLOBAL: Symbol = symbol_short!("GLOBAL");
const PENALTY_DAYS: Symbol = symbol_short!("PEN_DAYS");
const WAIT_TIME: Symbol = symbol_short!("WAIT_TM");

// Per-user persistent storage uses tuple keys:  (prefix, user_address)
const USER: Symbol = symbol_short!("USER");

// ── Persisted records ────────────────────────────────────────────────────────

/// Fixed at initialisation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub stake_token: Address,
    pub reward_token: Address,
    /// Receives swept early-exit penalties.
    pub fee_collector: Address,
    /// Seconds shaved off every campaign period to absorb coarse clock steps.
    pub clock_granularity: u64,
}

/// Per-staker record. An absent entry reads as all zeroes.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UserState {
    pub staked_balance: i128,
    /// Reset on every stake, including top-ups.
    pub stake_timestamp: u64,
    pub reward_per_share_snapshot: i128,
    /// Settled but not yet claimed.
    pub unclaimed_rewards: i128,
    pub pending_withdrawal: PendingWithdrawal,
}

// ── Lifecycle ────────────────────────────────────────────────────────────────

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&INITIALIZED)
}

/// Write the genesis state. The caller has already rejected a second call.
pub fn bootstrap(env: &Env, config: &Config, now: u64) {
    env.storage().instance().set(&INITIALIZED, &true);
    env.storage().instance().set(&CONFIG, config);
    save_global(env, &GlobalAccrualState::new(now));
    save_param(env, GovernedParam::PenaltyDays, &TimelockedParam::new(0));
    save_param(
        env,
        GovernedParam::WithdrawWaitTime,
        &TimelockedParam::new(MAX_WITHDRAW_WAIT_TIME),
    );
}

fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Config ───────────────────────────────────────────────────────────────────

pub fn config(env: &Env) -> Result<Config, ContractError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(ContractError::NotInitialized)
}

// ── Global accrual state ─────────────────────────────────────────────────────

pub fn global(env: &Env) -> Result<GlobalAccrualState, ContractError> {
    env.storage()
        .instance()
        .get(&GLOBAL)
        .ok_or(ContractError::NotInitialized)
}

pub fn save_global(env: &Env, state: &GlobalAccrualState) {
    env.storage().instance().set(&GLOBAL, state);
    extend_instance(env);
}

// ── Governed parameters ──────────────────────────────────────────────────────

fn param_key(param: GovernedParam) -> Symbol {
    match param {
        GovernedParam::PenaltyDays => PENALTY_DAYS,
        GovernedParam::WithdrawWaitTime => WAIT_TIME,
    }
}

pub fn param(env: &Env, param: GovernedParam) -> Result<TimelockedParam, ContractError> {
    env.storage()
        .instance()
        .get(&param_key(param))
        .ok_or(ContractError::NotInitialized)
}

pub fn save_param(env: &Env, param: GovernedParam, value: &TimelockedParam) {
    env.storage().instance().set(&param_key(param), value);
}

// ── Users ────────────────────────────────────────────────────────────────────

fn user_key(user: &Address) -> (Symbol, Address) {
    (USER, user.clone())
}

pub fn user(env: &Env, user: &Address) -> UserState {
    env.storage()
        .persistent()
        .get(&user_key(user))
        .unwrap_or_default()
}

pub fn save_user(env: &Env, user: &Address, state: &UserState) {
    let key = user_key(user);
    env.storage().persistent().set(&key, state);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
