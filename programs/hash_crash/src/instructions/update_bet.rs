use anchor_lang::prelude::*;

use crate::engine;
use crate::events::BetUpdatedEvent;
use crate::states::*;

pub fn update_bet(ctx: Context<UpdateBet>, bet_index: u16, cashout_index: u16) -> Result<()> {
    let clock = Clock::get()?;
    let bettor = ctx.accounts.bettor.key();
    let game = &mut ctx.accounts.game;

    let updated = engine::update_bet(
        game,
        &mut ctx.accounts.house_vault,
        bettor,
        bet_index,
        cashout_index,
        clock.slot,
    )?;

    emit!(BetUpdatedEvent {
        game: game.key(),
        bettor,
        bet_index,
        cashout_index: updated.cashout_index,
        cashed_out: false,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct UpdateBet<'info> {
    pub bettor: Signer<'info>,

    #[account(
        mut,
        has_one = house_vault,
        seeds = [GAME_SEED.as_bytes()],
        bump = game.bump,
    )]
    pub game: Account<'info, CrashGame>,

    #[account(mut)]
    pub house_vault: Account<'info, HouseVault>,
}
