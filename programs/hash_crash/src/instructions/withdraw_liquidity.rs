use anchor_lang::prelude::*;

use crate::custody::LamportCustody;
use crate::engine;
use crate::errors::HashCrashError;
use crate::events::LiquidityWithdrawnEvent;
use crate::states::*;

/// Allows the house authority to withdraw liquidity from the house vault.
/// Rent stays in the vault since it is never counted as liquidity.
pub fn withdraw_liquidity(ctx: Context<WithdrawLiquidity>, amount: u64) -> Result<()> {
    let clock = Clock::get()?;
    let house_authority = ctx.accounts.house_authority.key();
    let mut custody = LamportCustody::new(
        ctx.accounts.house_vault.to_account_info(),
        ctx.accounts.system_program.to_account_info(),
        vec![ctx.accounts.house_authority.to_account_info()],
    );

    let house_vault = &mut ctx.accounts.house_vault;
    engine::withdraw_liquidity(
        &ctx.accounts.game,
        house_vault,
        &mut custody,
        house_authority,
        amount,
    )?;

    msg!("House withdrawal: {} lamports", amount);
    msg!("Liquidity after withdrawal: {}", house_vault.liquidity);

    emit!(LiquidityWithdrawnEvent {
        house_vault: house_vault.key(),
        house_authority,
        amount,
        liquidity: house_vault.liquidity,
        timestamp: clock.unix_timestamp,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct WithdrawLiquidity<'info> {
    #[account(mut)]
    pub house_authority: Signer<'info>,

    #[account(
        mut,
        has_one = house_authority @ HashCrashError::NotAuthorized,
        seeds = [HOUSE_VAULT_SEED.as_bytes()],
        bump = house_vault.bump
    )]
    pub house_vault: Account<'info, HouseVault>,

    #[account(
        has_one = house_vault,
        seeds = [GAME_SEED.as_bytes()],
        bump = game.bump,
    )]
    pub game: Account<'info, CrashGame>,

    pub system_program: Program<'info, System>,
}
