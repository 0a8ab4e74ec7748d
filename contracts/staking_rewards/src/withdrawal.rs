use soroban_sdk::contracttype;

use crate::constants::{ONE_DAY, PENALTY_DIVISOR};

// ── Types ───────────────────────────────────────────────────────────────────

/// The single outstanding withdrawal slot of a staker.
///
/// The amount has already left the staked balance, so it earns nothing while
/// it waits. `{0, 0}` means the slot is empty.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PendingWithdrawal {
    pub amount: i128,
    /// Ledger timestamp from which `withdraw` is permitted.
    pub unlock_time: u64,
}

impl PendingWithdrawal {
    pub fn is_pending(&self) -> bool {
        self.amount > 0
    }
}

/// Split of a settled withdrawal.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Settlement {
    pub paid: i128,
    pub penalty_fee: i128,
}

// ── Penalty policy ──────────────────────────────────────────────────────────

/// Early-exit fee for withdrawing `amount` at `now`.
///
/// Inside the lock window (`now − staked_at < penalty_days` days) the fee is
/// `amount × penalty_days / 200`, a flat 0.5% per required lock-day that does
/// not shrink as the window runs down. Outside it, or with the penalty
/// disabled, the fee is zero.
#[allow(clippy::arithmetic_side_effects)]
pub fn penalty_fee(amount: i128, penalty_days: u64, staked_at: u64, now: u64) -> i128 {
    if penalty_days == 0 {
        return 0;
    }
    let held = now.saturating_sub(staked_at);
    if held >= penalty_days.saturating_mul(ONE_DAY) {
        return 0;
    }
    amount.saturating_mul(penalty_days as i128) / PENALTY_DIVISOR
}

pub fn settle(request: &PendingWithdrawal, penalty_days: u64, staked_at: u64, now: u64) -> Settlement {
    let penalty_fee = penalty_fee(request.amount, penalty_days, staked_at, now);
    Settlement {
        paid: request.amount.saturating_sub(penalty_fee),
        penalty_fee,
    }
}
