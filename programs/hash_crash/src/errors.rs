use anchor_lang::prelude::*;
#[error_code]
pub enum HashCrashError {
    #[msg("Game is not active")]
    NotActive,
    #[msg("Round is already in progress")]
    RoundInProgress,
    #[msg("Round has not started yet")]
    RoundNotStarted,
    #[msg("Bet not found")]
    BetNotFound,
    #[msg("Bet belongs to another bettor")]
    BetNotYours,
    #[msg("Bet has been cancelled")]
    BetCancelled,
    #[msg("Cashout index is out of range or already passed")]
    InvalidCashoutIndex,
    #[msg("Commitment mismatch or slot hash unavailable")]
    InvalidHash,
    #[msg("Outgoing transfer failed")]
    TransferFailed,
    #[msg("Received amount does not match the expected amount")]
    InvalidReceive,
    #[msg("Caller is not authorized for this action")]
    NotAuthorized,
    #[msg("Amount must be greater than zero")]
    ZeroAmount,
    #[msg("Bet amount is below the minimum stake")]
    BetTooSmall,
    #[msg("Insufficient liquidity to reserve the maximum payout")]
    InsufficientLiquidity,
    #[msg("Liquidity cannot change while a round is in flight")]
    LiquidityLocked,
    #[msg("Bet limit for this round or bettor reached")]
    TooManyBets,
    #[msg("Invalid loot table")]
    InvalidLootTable,
    #[msg("Invalid game configuration")]
    InvalidConfig,
    #[msg("Arithmetic overflow")]
    Overflow,
}
