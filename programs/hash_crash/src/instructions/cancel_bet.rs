use anchor_lang::prelude::*;

use crate::custody::LamportCustody;
use crate::engine;
use crate::events::BetCancelledEvent;
use crate::states::*;

pub fn cancel_bet(ctx: Context<CancelBet>, bet_index: u16) -> Result<()> {
    let clock = Clock::get()?;
    let bettor = ctx.accounts.bettor.key();
    let mut custody = LamportCustody::new(
        ctx.accounts.house_vault.to_account_info(),
        ctx.accounts.system_program.to_account_info(),
        vec![ctx.accounts.bettor.to_account_info()],
    );

    let game = &mut ctx.accounts.game;
    let refunded = engine::cancel_bet(
        game,
        &mut ctx.accounts.house_vault,
        &mut custody,
        bettor,
        bet_index,
        clock.slot,
    )?;

    emit!(BetCancelledEvent {
        game: game.key(),
        bettor,
        bet_index,
        refunded,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct CancelBet<'info> {
    #[account(mut)]
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

    pub system_program: Program<'info, System>,
}
