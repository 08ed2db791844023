use anchor_lang::prelude::*;

use crate::errors::HashCrashError;
use crate::events::ActiveChangedEvent;
use crate::states::*;

/// Pausing only stops new rounds from starting; a round in flight runs to its reveal.
pub fn set_active(ctx: Context<SetActive>, active: bool) -> Result<()> {
    let game = &mut ctx.accounts.game;
    let clock = Clock::get()?;
    game.active = active;
    emit!(ActiveChangedEvent {
        game: game.key(),
        active,
        timestamp: clock.unix_timestamp,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct SetActive<'info> {
    pub admin: Signer<'info>,
    #[account(
        mut,
        has_one = admin @ HashCrashError::NotAuthorized,
        seeds = [GAME_SEED.as_bytes()],
        bump = game.bump,
    )]
    pub game: Account<'info, CrashGame>,
}
