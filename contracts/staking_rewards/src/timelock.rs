//! Two-stage (request → apply) governor for numeric protocol parameters.
//!
//! Lowering a parameter is always safe for stakers and takes effect at once.
//! Raising it must be announced `delay` seconds ahead and applied within
//! `buffer` seconds after unlocking. A stale request stays on record until a
//! different value replaces it.

use soroban_sdk::contracttype;

use crate::constants::{
    MAX_PENALTY_DAYS, MAX_WITHDRAW_WAIT_TIME, MIN_WITHDRAW_WAIT_TIME, PENALTY_DAYS_TIMELOCK,
    PENALTY_DAYS_TIMELOCK_BUFFER, WITHDRAW_WAIT_TIMELOCK, WITHDRAW_WAIT_TIMELOCK_BUFFER,
};
use crate::errors::ContractError;

// ── Types ───────────────────────────────────────────────────────────────────

/// Parameters owned by the governor.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum GovernedParam {
    /// Lock window, in days, inside which a withdrawal pays the early-exit fee.
    PenaltyDays = 1,
    /// Seconds between a withdrawal request and its settlement.
    WithdrawWaitTime = 2,
}

/// An outstanding increase. `{0, 0}` means nothing is pending.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ParamChangeRequest {
    pub unlock_time: u64,
    pub value: u64,
}

impl ParamChangeRequest {
    pub fn is_pending(&self) -> bool {
        self.unlock_time > 0
    }
}

/// Active value plus at most one pending change.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TimelockedParam {
    pub active: u64,
    pub pending: ParamChangeRequest,
}

/// Static rules for one governed parameter.
#[derive(Clone, Copy, Debug)]
pub struct ParamRules {
    pub min: u64,
    /// Inclusive.
    pub max: u64,
    pub delay: u64,
    pub buffer: u64,
    /// Whether `0` switches the parameter off and may always be applied at once.
    pub zero_disables: bool,
    pub below_min: ContractError,
    pub above_max: ContractError,
    pub locked: ContractError,
    pub same_value: ContractError,
}

impl GovernedParam {
    pub fn rules(self) -> ParamRules {
        match self {
            GovernedParam::PenaltyDays => ParamRules {
                min: 0,
                max: MAX_PENALTY_DAYS,
                delay: PENALTY_DAYS_TIMELOCK,
                buffer: PENALTY_DAYS_TIMELOCK_BUFFER,
                zero_disables: true,
                below_min: ContractError::PenaltyDaysTooHigh,
                above_max: ContractError::PenaltyDaysTooHigh,
                locked: ContractError::PenaltyDaysTimelock,
                same_value: ContractError::SameAmountOfDays,
            },
            GovernedParam::WithdrawWaitTime => ParamRules {
                min: MIN_WITHDRAW_WAIT_TIME,
                max: MAX_WITHDRAW_WAIT_TIME,
                delay: WITHDRAW_WAIT_TIMELOCK,
                buffer: WITHDRAW_WAIT_TIMELOCK_BUFFER,
                zero_disables: false,
                below_min: ContractError::WaitTimeLessThanOneDay,
                above_max: ContractError::WaitTimeMoreThanTenDays,
                locked: ContractError::WithdrawWaitTimeTimelock,
                same_value: ContractError::SameAmountOfSeconds,
            },
        }
    }
}

/// Result of a successful `request`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RequestOutcome {
    /// The new value is already active.
    Applied(u64),
    /// The new value waits for `apply`.
    Queued(ParamChangeRequest),
}

// ── State machine ───────────────────────────────────────────────────────────

impl TimelockedParam {
    pub fn new(active: u64) -> Self {
        Self {
            active,
            pending: ParamChangeRequest::default(),
        }
    }

    /// Whether the pending request can no longer be applied at `now`.
    pub fn is_expired(&self, rules: &ParamRules, now: u64) -> bool {
        self.pending.is_pending() && now > self.pending.unlock_time.saturating_add(rules.buffer)
    }

    pub fn request(
        &mut self,
        rules: &ParamRules,
        value: u64,
        now: u64,
    ) -> Result<RequestOutcome, ContractError> {
        if value < rules.min {
            return Err(rules.below_min);
        }
        if value > rules.max {
            return Err(rules.above_max);
        }

        let disables = rules.zero_disables && value == 0;
        if disables && self.active == 0 && !self.pending.is_pending() {
            return Err(rules.same_value);
        }
        if value < self.active || disables {
            self.active = value;
            self.pending = ParamChangeRequest::default();
            return Ok(RequestOutcome::Applied(value));
        }

        // Matched against the stored request even once it has lapsed.
        if value == self.pending.value {
            return Err(rules.same_value);
        }
        self.pending = ParamChangeRequest {
            unlock_time: now.saturating_add(rules.delay),
            value,
        };
        Ok(RequestOutcome::Queued(self.pending.clone()))
    }

    /// Promote the pending value. Returns the new active value.
    pub fn apply(&mut self, rules: &ParamRules, now: u64) -> Result<u64, ContractError> {
        if !self.pending.is_pending() {
            return Err(ContractError::NoActiveRequest);
        }
        if now < self.pending.unlock_time {
            return Err(rules.locked);
        }
        if self.is_expired(rules, now) {
            return Err(ContractError::TimelockBufferExceeded);
        }

        self.active = self.pending.value;
        self.pending = ParamChangeRequest::default();
        Ok(self.active)
    }
}
