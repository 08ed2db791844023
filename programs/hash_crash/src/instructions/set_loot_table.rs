use anchor_lang::prelude::*;

use crate::engine::{self, LootTableChange};
use crate::errors::HashCrashError;
use crate::events::LootTableChangedEvent;
use crate::loot_table::LootTable;
use crate::states::*;

pub fn set_loot_table(ctx: Context<SetLootTable>, loot_table: LootTable) -> Result<()> {
    let game = &mut ctx.accounts.game;
    let clock = Clock::get()?;
    let len = loot_table.len();

    let change = engine::set_loot_table(game, loot_table)?;
    let staged = change == LootTableChange::Staged;
    if staged {
        msg!("Loot table of {} entries staged for the next round", len);
    } else {
        msg!("Loot table of {} entries applied", len);
    }

    emit!(LootTableChangedEvent {
        game: game.key(),
        len,
        staged,
        timestamp: clock.unix_timestamp,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct SetLootTable<'info> {
    pub admin: Signer<'info>,
    #[account(
        mut,
        has_one = admin @ HashCrashError::NotAuthorized,
        seeds = [GAME_SEED.as_bytes()],
        bump = game.bump,
    )]
    pub game: Account<'info, CrashGame>,
}
