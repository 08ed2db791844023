use anchor_lang::prelude::*;

use crate::engine;
use crate::events::BetUpdatedEvent;
use crate::states::*;

/// Locks a bet in at the current slot. The payout itself happens at reveal,
/// if the round is still alive at the locked index.
pub fn cash_out(ctx: Context<CashOut>, bet_index: u16) -> Result<()> {
    let clock = Clock::get()?;
    let bettor = ctx.accounts.bettor.key();
    let game = &mut ctx.accounts.game;

    let updated = engine::cash_out(game, bettor, bet_index, clock.slot)?;

    emit!(BetUpdatedEvent {
        game: game.key(),
        bettor,
        bet_index,
        cashout_index: updated.cashout_index,
        cashed_out: true,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct CashOut<'info> {
    pub bettor: Signer<'info>,

    #[account(
        mut,
        seeds = [GAME_SEED.as_bytes()],
        bump = game.bump,
    )]
    pub game: Account<'info, CrashGame>,
}
