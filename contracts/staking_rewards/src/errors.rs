/// Failure signals returned by every ledger entry point.
///
/// # Code ranges
/// | Range   | Purpose                          |
/// |---------|----------------------------------|
/// | 1 – 9   | Lifecycle / authorisation        |
/// | 10 – 19 | Input validation                 |
/// | 20 – 29 | Parameter bounds                 |
/// | 30 – 39 | Withdrawal queue state           |
/// | 40 – 49 | Timelock governor state          |
/// | 50 – 59 | Nothing left to pay out          |
/// | 60 – 69 | Arithmetic                       |
#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    AccessControlUnauthorizedAccount = 3,

    InvalidInput = 10,
    NoZeroAddress = 11,
    TokensIdentical = 12,
    NoZeroAmount = 13,
    NoZeroRewardDuration = 14,

    RewardRateExceedsMaxRate = 20,
    PenaltyDaysTooHigh = 21,
    WaitTimeLessThanOneDay = 22,
    WaitTimeMoreThanTenDays = 23,

    WithdrawRequestPending = 30,
    NoWithdrawRequestPending = 31,
    NotEnoughBalance = 32,
    WithdrawWaitTimeNotReached = 33,

    NoActiveRequest = 40,
    PenaltyDaysTimelock = 41,
    WithdrawWaitTimeTimelock = 42,
    TimelockBufferExceeded = 43,
    SameAmountOfDays = 44,
    SameAmountOfSeconds = 45,

    NoAmountAvailable = 50,
    NoPenaltyFeeToCollect = 51,

    /// A fixed-point result does not fit in `i128`.
    ArithmeticOverflow = 60,
}
