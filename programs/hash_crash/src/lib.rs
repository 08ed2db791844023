use anchor_lang::prelude::*;
pub mod custody;
pub mod engine;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod loot_table;
#[cfg(test)]
mod mocks;
pub mod rng;
pub mod states;
use instructions::*;
use loot_table::LootTable;
use states::{GameSettings, IndexedBet, LootTables, RoundInfo};
declare_id!("5Lbamb2zdigAq7HGqrQbPC5aULqWWQv9MH81s7s4G1JV");
#[program]
pub mod hash_crash {
    use super::*;
    pub fn init_house_vault(ctx: Context<InitializeHouseVault>) -> Result<()> {
        instructions::init_house_vault(ctx)
    }
    pub fn init_game(ctx: Context<InitializeGame>, params: GameParams) -> Result<()> {
        instructions::init_game(ctx, params)
    }
    pub fn update_config(ctx: Context<UpdateConfig>, params: UpdateConfigParams) -> Result<()> {
        instructions::update_config(ctx, params)
    }
    pub fn set_active(ctx: Context<SetActive>, active: bool) -> Result<()> {
        instructions::set_active(ctx, active)
    }
    pub fn set_loot_table(ctx: Context<SetLootTable>, loot_table: LootTable) -> Result<()> {
        instructions::set_loot_table(ctx, loot_table)
    }
    pub fn deposit_liquidity(ctx: Context<DepositLiquidity>, amount: u64) -> Result<()> {
        instructions::deposit_liquidity(ctx, amount)
    }
    pub fn withdraw_liquidity(ctx: Context<WithdrawLiquidity>, amount: u64) -> Result<()> {
        instructions::withdraw_liquidity(ctx, amount)
    }
    pub fn place_bet(ctx: Context<PlaceBet>, amount: u64, cashout_index: u16) -> Result<()> {
        instructions::place_bet(ctx, amount, cashout_index)
    }
    pub fn update_bet(ctx: Context<UpdateBet>, bet_index: u16, cashout_index: u16) -> Result<()> {
        instructions::update_bet(ctx, bet_index, cashout_index)
    }
    pub fn cancel_bet(ctx: Context<CancelBet>, bet_index: u16) -> Result<()> {
        instructions::cancel_bet(ctx, bet_index)
    }
    pub fn cash_out(ctx: Context<CashOut>, bet_index: u16) -> Result<()> {
        instructions::cash_out(ctx, bet_index)
    }
    pub fn reveal<'info>(
        ctx: Context<'_, '_, '_, 'info, Reveal<'info>>,
        secret: [u8; 32],
        next_round_hash: [u8; 32],
    ) -> Result<()> {
        instructions::reveal(ctx, secret, next_round_hash)
    }
    pub fn get_loot_tables(ctx: Context<ReadGame>) -> Result<LootTables> {
        instructions::get_loot_tables(ctx)
    }
    pub fn get_config(ctx: Context<ReadGame>) -> Result<GameSettings> {
        instructions::get_config(ctx)
    }
    pub fn get_bets_by_bettor(ctx: Context<ReadGame>, bettor: Pubkey) -> Result<Vec<IndexedBet>> {
        instructions::get_bets_by_bettor(ctx, bettor)
    }
    pub fn get_round_info(ctx: Context<ReadRound>) -> Result<RoundInfo> {
        instructions::get_round_info(ctx)
    }
}
