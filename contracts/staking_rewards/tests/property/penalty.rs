#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Properties of the early-exit fee.

use proptest::prelude::*;
use staking_rewards::constants::{MAX_PENALTY_DAYS, ONE_DAY};
use staking_rewards::withdrawal::{penalty_fee, settle, PendingWithdrawal};

proptest! {
    /// The fee never exceeds the principal and settlement conserves it.
    #[test]
    fn prop_settlement_conserves_principal(
        amount in 1i128..=1_000_000_000_000_000_000_000i128,
        days in 0u64..=MAX_PENALTY_DAYS,
        held in 0u64..=(100 * ONE_DAY),
    ) {
        let request = PendingWithdrawal { amount, unlock_time: held };
        let s = settle(&request, days, 0, held);

        prop_assert!(s.penalty_fee >= 0);
        prop_assert!(s.penalty_fee <= amount);
        prop_assert_eq!(s.paid + s.penalty_fee, amount);
    }

    /// Holding for at least the full window is always free.
    #[test]
    fn prop_no_fee_after_window(
        amount in 1i128..=1_000_000_000i128,
        days in 1u64..=MAX_PENALTY_DAYS,
        extra in 0u64..=(30 * ONE_DAY),
    ) {
        let staked_at = 10_000;
        let now = staked_at + days * ONE_DAY + extra;
        prop_assert_eq!(penalty_fee(amount, days, staked_at, now), 0);
    }

    /// Inside the window the fee is flat: 0.5% per required day.
    #[test]
    fn prop_fee_inside_window_is_flat(
        amount in 1i128..=1_000_000_000i128,
        days in 1u64..=MAX_PENALTY_DAYS,
        held_fraction in 0u64..100u64,
    ) {
        let held = days * ONE_DAY * held_fraction / 100;
        prop_assert_eq!(
            penalty_fee(amount, days, 0, held),
            amount * days as i128 / 200
        );
    }

    /// A disabled penalty costs nothing regardless of timing.
    #[test]
    fn prop_disabled_penalty_is_free(
        amount in 1i128..=1_000_000_000i128,
        staked_at in 0u64..=1_000_000u64,
        elapsed in 0u64..=1_000_000u64,
    ) {
        prop_assert_eq!(penalty_fee(amount, 0, staked_at, staked_at + elapsed), 0);
    }
}
