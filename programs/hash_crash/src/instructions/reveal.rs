use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar::slot_hashes;

use crate::custody::LamportCustody;
use crate::engine;
use crate::events::RoundEndedEvent;
use crate::rng::{Keccak256Commitment, SlotHashWindow};
use crate::states::*;

/// Ends the round in progress with the publisher's secret.
///
/// Every winning bettor must be passed as a writable remaining account. A round
/// holds at most `MAX_BETTORS` distinct bettors, so they always fit.
pub fn reveal<'info>(
    ctx: Context<'_, '_, '_, 'info, Reveal<'info>>,
    secret: [u8; 32],
    next_round_hash: [u8; 32],
) -> Result<()> {
    let clock = Clock::get()?;
    let caller = ctx.accounts.hash_owner.key();
    let mut custody = LamportCustody::new(
        ctx.accounts.house_vault.to_account_info(),
        ctx.accounts.system_program.to_account_info(),
        ctx.remaining_accounts.to_vec(),
    );

    let slot_hashes_data = ctx.accounts.slot_hashes.try_borrow_data()?;
    let window = SlotHashWindow::new(&slot_hashes_data[..])?;

    let game = &mut ctx.accounts.game;
    let resolved = engine::reveal::<Keccak256Commitment, _, _>(
        game,
        &mut ctx.accounts.house_vault,
        &window,
        &mut custody,
        caller,
        secret,
        next_round_hash,
        clock.slot,
    )?;

    msg!(
        "Round {} ended at index {}: {} winners paid {} lamports",
        resolved.hash_index,
        resolved.dead_index,
        resolved.winners,
        resolved.total_payout
    );

    emit!(RoundEndedEvent {
        game: game.key(),
        hash_index: resolved.hash_index,
        secret,
        next_round_hash,
        dead_index: resolved.dead_index,
        winners: resolved.winners,
        total_payout: resolved.total_payout,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Reveal<'info> {
    pub hash_owner: Signer<'info>,

    #[account(
        mut,
        has_one = house_vault,
        seeds = [GAME_SEED.as_bytes()],
        bump = game.bump,
    )]
    pub game: Account<'info, CrashGame>,

    #[account(mut)]
    pub house_vault: Account<'info, HouseVault>,

    /// CHECK: SlotHashes sysvar, parsed manually to avoid deserializing all 512 entries
    #[account(address = slot_hashes::ID)]
    pub slot_hashes: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}
