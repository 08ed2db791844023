//! Read-only instructions. Results are returned through Anchor return data.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar::slot_hashes;

use crate::engine;
use crate::rng::SlotHashWindow;
use crate::states::*;

pub fn get_loot_tables(ctx: Context<ReadGame>) -> Result<LootTables> {
    let game = &ctx.accounts.game;
    Ok(LootTables {
        active: game.loot_table.clone(),
        staged: game.staged_loot_table.clone(),
    })
}

pub fn get_config(ctx: Context<ReadGame>) -> Result<GameSettings> {
    let game = &ctx.accounts.game;
    Ok(GameSettings {
        admin: game.admin,
        hash_owner: game.hash_owner,
        intro_blocks: game.intro_blocks,
        min_bet: game.min_bet,
        active: game.active,
    })
}

pub fn get_bets_by_bettor(ctx: Context<ReadGame>, bettor: Pubkey) -> Result<Vec<IndexedBet>> {
    Ok(engine::bets_by_bettor(&ctx.accounts.game, &bettor))
}

pub fn get_round_info(ctx: Context<ReadRound>) -> Result<RoundInfo> {
    let clock = Clock::get()?;
    let data = ctx.accounts.slot_hashes.try_borrow_data()?;
    let window = SlotHashWindow::new(&data[..])?;
    Ok(engine::round_info(
        &ctx.accounts.game,
        &ctx.accounts.house_vault,
        &window,
        clock.slot,
    ))
}

#[derive(Accounts)]
pub struct ReadGame<'info> {
    #[account(
        seeds = [GAME_SEED.as_bytes()],
        bump = game.bump,
    )]
    pub game: Account<'info, CrashGame>,
}

#[derive(Accounts)]
pub struct ReadRound<'info> {
    #[account(
        has_one = house_vault,
        seeds = [GAME_SEED.as_bytes()],
        bump = game.bump,
    )]
    pub game: Account<'info, CrashGame>,

    pub house_vault: Account<'info, HouseVault>,

    /// CHECK: SlotHashes sysvar
    #[account(address = slot_hashes::ID)]
    pub slot_hashes: UncheckedAccount<'info>,
}
