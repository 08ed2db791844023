use anchor_lang::prelude::*;

use crate::custody::LamportCustody;
use crate::engine;
use crate::events::{BetPlacedEvent, RoundStartedEvent};
use crate::states::*;

pub fn place_bet(ctx: Context<PlaceBet>, amount: u64, cashout_index: u16) -> Result<()> {
    let clock = Clock::get()?;
    let bettor = ctx.accounts.bettor.key();
    let mut custody = LamportCustody::new(
        ctx.accounts.house_vault.to_account_info(),
        ctx.accounts.system_program.to_account_info(),
        vec![ctx.accounts.bettor.to_account_info()],
    );

    let game = &mut ctx.accounts.game;
    let placed = engine::place_bet(
        game,
        &mut ctx.accounts.house_vault,
        &mut custody,
        bettor,
        amount,
        cashout_index,
        clock.slot,
    )?;

    msg!(
        "Bet {} reserves {}, free liquidity {}",
        placed.bet_index,
        placed.max_payout,
        ctx.accounts.house_vault.free_liquidity()
    );

    if placed.round_started {
        msg!(
            "Round {} starts at slot {}",
            game.hash_index,
            placed.start_block
        );
        emit!(RoundStartedEvent {
            game: game.key(),
            hash_index: game.hash_index,
            round_hash: game.round_hash,
            start_block: placed.start_block,
            timestamp: clock.unix_timestamp,
        });
    }

    emit!(BetPlacedEvent {
        game: game.key(),
        bettor,
        bet_index: placed.bet_index,
        amount,
        cashout_index,
        max_payout: placed.max_payout,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct PlaceBet<'info> {
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
