use anchor_lang::prelude::*;

use crate::errors::HashCrashError;
use crate::events::GameInitializedEvent;
use crate::loot_table::LootTable;
use crate::states::*;

/// Parameters for game initialization. Unset fields take their defaults.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Default)]
pub struct GameParams {
    /// Commitment for the secret that ends the first round.
    pub round_hash: [u8; 32],
    /// Defaults to the admin.
    pub hash_owner: Option<Pubkey>,
    pub intro_blocks: Option<u64>,
    /// Defaults to, and may not go below, the rent-exempt minimum of an empty account.
    pub min_bet: Option<u64>,
    pub loot_table: Option<LootTable>,
    pub active: Option<bool>,
}

pub fn init_game(ctx: Context<InitializeGame>, params: GameParams) -> Result<()> {
    let game = &mut ctx.accounts.game;
    let clock = Clock::get()?;
    let rent_floor = Rent::get()?.minimum_balance(0);

    initialize(
        game,
        ctx.accounts.admin.key(),
        ctx.accounts.house_vault.key(),
        rent_floor,
        params,
    )?;
    game.bump = ctx.bumps.game;

    msg!("Crash game initialized:");
    msg!("  Hash owner: {}", game.hash_owner);
    msg!("  Intro blocks: {}", game.intro_blocks);
    msg!("  Min bet: {} lamports", game.min_bet);
    msg!("  Loot table entries: {}", game.loot_table.len());
    msg!("  Active: {}", game.active);

    emit!(GameInitializedEvent {
        game: game.key(),
        admin: game.admin,
        hash_owner: game.hash_owner,
        house_vault: game.house_vault,
        round_hash: game.round_hash,
        intro_blocks: game.intro_blocks,
        active: game.active,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

/// Writes a fresh idle round with `params` applied over the defaults.
pub fn initialize(
    game: &mut CrashGame,
    admin: Pubkey,
    house_vault: Pubkey,
    rent_floor: u64,
    params: GameParams,
) -> Result<()> {
    let min_bet = params.min_bet.unwrap_or(rent_floor);
    CrashGame::validate_min_bet(min_bet, rent_floor)?;

    let loot_table = match params.loot_table {
        Some(table) => table,
        None => LootTable::default_table()?,
    };

    game.admin = admin;
    game.hash_owner = params.hash_owner.unwrap_or(admin);
    game.house_vault = house_vault;
    game.active = params.active.unwrap_or(false);
    game.intro_blocks = params.intro_blocks.unwrap_or(DEFAULT_INTRO_BLOCKS);
    game.min_bet = min_bet;
    game.round_hash = params.round_hash;
    game.start_block = 0;
    game.hash_index = 0;
    game.loot_table = loot_table;
    game.staged_loot_table = None;
    game.bets = Vec::new();
    game.bet_owners = Vec::new();

    game.validate_config()
}

#[derive(Accounts)]
pub struct InitializeGame<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        init,
        payer = admin,
        space = 8 + CrashGame::INIT_SPACE,
        seeds = [GAME_SEED.as_bytes()],
        bump
    )]
    pub game: Account<'info, CrashGame>,

    #[account(
        constraint = house_vault.house_authority == admin.key() @ HashCrashError::NotAuthorized,
        seeds = [HOUSE_VAULT_SEED.as_bytes()],
        bump = house_vault.bump
    )]
    pub house_vault: Account<'info, HouseVault>,

    pub system_program: Program<'info, System>,
}
