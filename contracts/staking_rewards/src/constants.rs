//! Protocol constants: fixed-point scale, parameter bounds, timelock windows.

/// Fixed-point scaling factor for the reward-per-share accumulator and the
/// campaign emission rate.
pub const PRECISION: i128 = 1_000_000_000_000_000_000;

pub const ONE_DAY: u64 = 86_400;

/// Upper bound on the flat stream, in reward units per second.
pub const MAX_FLAT_RATE: i128 = 1_000_000;

// ── Penalty days ────────────────────────────────────────────────────────────

/// Highest accepted penalty window, in days (the window must stay below 90).
pub const MAX_PENALTY_DAYS: u64 = 89;
pub const PENALTY_DAYS_TIMELOCK: u64 = 7 * ONE_DAY;
pub const PENALTY_DAYS_TIMELOCK_BUFFER: u64 = 2 * ONE_DAY;

/// Each required lock-day costs `1 / PENALTY_DIVISOR` of the principal (0.5%).
pub const PENALTY_DIVISOR: i128 = 200;

// ── Withdraw wait time ──────────────────────────────────────────────────────

pub const MIN_WITHDRAW_WAIT_TIME: u64 = ONE_DAY;
pub const MAX_WITHDRAW_WAIT_TIME: u64 = 10 * ONE_DAY;
pub const WITHDRAW_WAIT_TIMELOCK: u64 = 7 * ONE_DAY;
pub const WITHDRAW_WAIT_TIMELOCK_BUFFER: u64 = 2 * ONE_DAY;

// ── Storage TTL (ledgers) ───────────────────────────────────────────────────

pub const TTL_THRESHOLD: u32 = 518_400;
pub const TTL_EXTEND_TO: u32 = 1_036_800;
