use anchor_lang::prelude::*;

#[event]
pub struct HouseVaultInitializedEvent {
    pub house_vault: Pubkey,
    pub house_authority: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct GameInitializedEvent {
    pub game: Pubkey,
    pub admin: Pubkey,
    pub hash_owner: Pubkey,
    pub house_vault: Pubkey,
    pub round_hash: [u8; 32],
    pub intro_blocks: u64,
    pub active: bool,
    pub timestamp: i64,
}

#[event]
pub struct RoundStartedEvent {
    pub game: Pubkey,
    pub hash_index: u64,
    pub round_hash: [u8; 32],
    pub start_block: u64,
    pub timestamp: i64,
}

#[event]
pub struct RoundEndedEvent {
    pub game: Pubkey,
    pub hash_index: u64,
    /// Revealed secret, so anyone can recompute the dead index.
    pub secret: [u8; 32],
    pub next_round_hash: [u8; 32],
    pub dead_index: u16,
    pub winners: u16,
    pub total_payout: u64,
    pub timestamp: i64,
}

#[event]
pub struct BetPlacedEvent {
    pub game: Pubkey,
    pub bettor: Pubkey,
    pub bet_index: u16,
    pub amount: u64,
    pub cashout_index: u16,
    pub max_payout: u64,
    pub timestamp: i64,
}

/// Emitted for both `update_bet` and `cash_out`.
#[event]
pub struct BetUpdatedEvent {
    pub game: Pubkey,
    pub bettor: Pubkey,
    pub bet_index: u16,
    pub cashout_index: u16,
    pub cashed_out: bool,
    pub timestamp: i64,
}

#[event]
pub struct BetCancelledEvent {
    pub game: Pubkey,
    pub bettor: Pubkey,
    pub bet_index: u16,
    pub refunded: u64,
    pub timestamp: i64,
}

#[event]
pub struct ActiveChangedEvent {
    pub game: Pubkey,
    pub active: bool,
    pub timestamp: i64,
}

#[event]
pub struct LootTableChangedEvent {
    pub game: Pubkey,
    pub len: u16,
    /// False when the table replaced the active one immediately.
    pub staged: bool,
    pub timestamp: i64,
}

#[event]
pub struct LiquidityDepositedEvent {
    pub house_vault: Pubkey,
    pub house_authority: Pubkey,
    pub amount: u64,
    pub liquidity: u64,
    pub timestamp: i64,
}

#[event]
pub struct LiquidityWithdrawnEvent {
    pub house_vault: Pubkey,
    pub house_authority: Pubkey,
    pub amount: u64,
    pub liquidity: u64,
    pub timestamp: i64,
}
