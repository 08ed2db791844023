use anchor_lang::prelude::*;

use crate::errors::HashCrashError;
use crate::states::*;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Default)]
pub struct UpdateConfigParams {
    pub hash_owner: Option<Pubkey>,
    pub intro_blocks: Option<u64>,
    pub min_bet: Option<u64>,
}

/// Update the randomness publisher, intro length and minimum stake.
/// Only the admin can call this. A new intro length applies from the next round.
pub fn update_config(ctx: Context<UpdateConfig>, params: UpdateConfigParams) -> Result<()> {
    let game = &mut ctx.accounts.game;
    let rent_floor = Rent::get()?.minimum_balance(0);

    apply(game, rent_floor, params)?;

    msg!("Game config updated successfully");
    msg!("  Hash owner: {}", game.hash_owner);
    msg!("  Intro blocks: {}", game.intro_blocks);
    msg!("  Min bet: {} lamports", game.min_bet);

    Ok(())
}

pub fn apply(game: &mut CrashGame, rent_floor: u64, params: UpdateConfigParams) -> Result<()> {
    if let Some(val) = params.intro_blocks {
        CrashGame::validate_intro_blocks(val)?;
    }
    if let Some(val) = params.min_bet {
        CrashGame::validate_min_bet(val, rent_floor)?;
    }

    // Update only the fields that are provided
    if let Some(val) = params.hash_owner {
        game.hash_owner = val;
    }
    if let Some(val) = params.intro_blocks {
        game.intro_blocks = val;
    }
    if let Some(val) = params.min_bet {
        game.min_bet = val;
    }
    Ok(())
}

#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        has_one = admin @ HashCrashError::NotAuthorized,
        seeds = [GAME_SEED.as_bytes()],
        bump = game.bump,
    )]
    pub game: Account<'info, CrashGame>,
}
