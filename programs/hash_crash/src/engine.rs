//! Round engine for the crash game.
//!
//! Every operation here is a pure state transition over [`CrashGame`] and
//! [`HouseVault`]: the clock, randomness and value movement are injected, so
//! rounds can be replayed deterministically outside the runtime.
//!
//! Operations validate everything first, then move value, then mutate state.
//! A failed operation leaves both accounts untouched.

use anchor_lang::prelude::*;

use crate::custody::ValueCustody;
use crate::errors::HashCrashError;
use crate::loot_table::LootTable;
use crate::rng::{self, CommitmentScheme, EntropySource};
use crate::states::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BetPlaced {
    pub bet_index: u16,
    pub max_payout: u64,
    /// Set when this bet moved the round from idle to accepting.
    pub round_started: bool,
    pub start_block: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BetUpdated {
    pub bet_index: u16,
    pub cashout_index: u16,
    pub max_payout: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundResolved {
    pub hash_index: u64,
    pub dead_index: u16,
    pub winners: u16,
    pub total_payout: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LootTableChange {
    Applied,
    Staged,
}

pub fn place_bet<V: ValueCustody>(
    game: &mut CrashGame,
    vault: &mut HouseVault,
    custody: &mut V,
    bettor: Pubkey,
    amount: u64,
    cashout_index: u16,
    current_block: u64,
) -> Result<BetPlaced> {
    require!(amount > 0, HashCrashError::ZeroAmount);
    require!(amount >= game.min_bet, HashCrashError::BetTooSmall);

    let starting = game.is_idle();
    let start_block = if starting {
        require!(game.active, HashCrashError::NotActive);
        current_block
            .checked_add(game.intro_blocks)
            .ok_or(HashCrashError::Overflow)?
    } else {
        require!(
            game.is_accepting(current_block),
            HashCrashError::RoundInProgress
        );
        game.start_block
    };

    // A staged table takes over when the round starts.
    let table = match (&game.staged_loot_table, starting) {
        (Some(staged), true) => staged,
        _ => &game.loot_table,
    };
    require!(
        cashout_index < table.len(),
        HashCrashError::InvalidCashoutIndex
    );
    game.check_bet_capacity(&bettor)?;

    let max_payout = table.multiply(amount, cashout_index)?;
    let liquidity = vault
        .liquidity
        .checked_add(amount)
        .ok_or(HashCrashError::Overflow)?;
    let reserved = vault
        .reserved
        .checked_add(max_payout)
        .ok_or(HashCrashError::Overflow)?;
    require!(
        reserved <= liquidity,
        HashCrashError::InsufficientLiquidity
    );

    custody.receive(&bettor, amount)?;

    vault.credit(amount)?;
    vault.reserve(max_payout)?;
    if starting {
        if let Some(staged) = game.staged_loot_table.take() {
            game.loot_table = staged;
        }
        game.start_block = start_block;
    }

    let bet_index = game.bets.len() as u16;
    game.bets.push(Bet {
        bettor,
        amount,
        cashout_index,
        cancelled: false,
    });
    game.index_bet(bettor, bet_index);

    Ok(BetPlaced {
        bet_index,
        max_payout,
        round_started: starting,
        start_block,
    })
}

pub fn update_bet(
    game: &mut CrashGame,
    vault: &mut HouseVault,
    bettor: Pubkey,
    bet_index: u16,
    cashout_index: u16,
    current_block: u64,
) -> Result<BetUpdated> {
    require!(
        !game.is_in_progress(current_block),
        HashCrashError::RoundInProgress
    );
    let bet = game.live_bet(bet_index, &bettor)?;
    require!(
        cashout_index < game.loot_table.len(),
        HashCrashError::InvalidCashoutIndex
    );

    let old_payout = game.loot_table.multiply(bet.amount, bet.cashout_index)?;
    let max_payout = game.loot_table.multiply(bet.amount, cashout_index)?;
    let reserved = vault
        .reserved
        .checked_sub(old_payout)
        .and_then(|r| r.checked_add(max_payout))
        .ok_or(HashCrashError::Overflow)?;
    require!(
        reserved <= vault.liquidity,
        HashCrashError::InsufficientLiquidity
    );

    vault.release(old_payout)?;
    vault.reserve(max_payout)?;
    game.bets[bet_index as usize].cashout_index = cashout_index;

    Ok(BetUpdated {
        bet_index,
        cashout_index,
        max_payout,
    })
}

/// Refunds the stake and releases the reservation. Returns the refunded amount.
pub fn cancel_bet<V: ValueCustody>(
    game: &mut CrashGame,
    vault: &mut HouseVault,
    custody: &mut V,
    bettor: Pubkey,
    bet_index: u16,
    current_block: u64,
) -> Result<u64> {
    require!(
        !game.is_in_progress(current_block),
        HashCrashError::RoundInProgress
    );
    let bet = game.live_bet(bet_index, &bettor)?;
    let max_payout = game.loot_table.multiply(bet.amount, bet.cashout_index)?;
    require!(vault.reserved >= max_payout, HashCrashError::Overflow);
    require!(
        vault.liquidity >= bet.amount,
        HashCrashError::InsufficientLiquidity
    );

    custody.send(&bettor, bet.amount)?;

    vault.release(max_payout)?;
    vault.debit(bet.amount)?;
    game.bets[bet_index as usize].cancelled = true;

    Ok(bet.amount)
}

/// Locks the bet in at the current block index. Only ever lowers the
/// cashout index, so the reservation already covers it.
pub fn cash_out(
    game: &mut CrashGame,
    bettor: Pubkey,
    bet_index: u16,
    current_block: u64,
) -> Result<BetUpdated> {
    require!(
        game.is_in_progress(current_block),
        HashCrashError::RoundNotStarted
    );
    let bet = game.live_bet(bet_index, &bettor)?;
    let block_index = current_block - game.start_block;
    require!(
        block_index < bet.cashout_index as u64,
        HashCrashError::InvalidCashoutIndex
    );

    let cashout_index = block_index as u16;
    let max_payout = game.loot_table.multiply(bet.amount, cashout_index)?;
    game.bets[bet_index as usize].cashout_index = cashout_index;

    Ok(BetUpdated {
        bet_index,
        cashout_index,
        max_payout,
    })
}

/// First index at which the round dies, or the table length if it survives
/// every index.
///
/// Indices are tested in order and the search stops at the first death, so
/// later slot hashes are never read.
pub fn find_dead_index<E: EntropySource>(
    table: &LootTable,
    entropy: &E,
    secret: &[u8; 32],
    start_block: u64,
) -> Result<u16> {
    for index in 0..table.len() {
        let slot = start_block
            .checked_add(index as u64)
            .ok_or(HashCrashError::Overflow)?;
        let block_hash = entropy.block_hash(slot)?;
        let roll = rng::random_roll(secret, &block_hash, slot);
        if table.is_dead(roll, index)? {
            return Ok(index);
        }
    }
    Ok(table.len())
}

#[allow(clippy::too_many_arguments)]
pub fn reveal<C, E, V>(
    game: &mut CrashGame,
    vault: &mut HouseVault,
    entropy: &E,
    custody: &mut V,
    caller: Pubkey,
    secret: [u8; 32],
    next_round_hash: [u8; 32],
    current_block: u64,
) -> Result<RoundResolved>
where
    C: CommitmentScheme,
    E: EntropySource,
    V: ValueCustody,
{
    require_keys_eq!(caller, game.hash_owner, HashCrashError::NotAuthorized);
    require!(
        game.is_in_progress(current_block),
        HashCrashError::RoundNotStarted
    );
    require!(
        C::verify(&secret, &game.round_hash),
        HashCrashError::InvalidHash
    );

    let dead_index = find_dead_index(&game.loot_table, entropy, &secret, game.start_block)?;

    let mut payouts = Vec::new();
    let mut total_payout = 0u64;
    for bet in game
        .bets
        .iter()
        .filter(|bet| !bet.cancelled && bet.cashout_index < dead_index)
    {
        let payout = game.loot_table.multiply(bet.amount, bet.cashout_index)?;
        total_payout = total_payout
            .checked_add(payout)
            .ok_or(HashCrashError::Overflow)?;
        payouts.push((bet.bettor, payout));
    }
    require!(
        total_payout <= vault.liquidity,
        HashCrashError::InsufficientLiquidity
    );
    let next_hash_index = game
        .hash_index
        .checked_add(1)
        .ok_or(HashCrashError::Overflow)?;

    for (bettor, payout) in &payouts {
        custody.send(bettor, *payout)?;
    }

    vault.clear_queue();
    vault.debit(total_payout)?;

    let resolved = RoundResolved {
        hash_index: game.hash_index,
        dead_index,
        winners: payouts.len() as u16,
        total_payout,
    };
    game.bets = Vec::new();
    game.bet_owners = Vec::new();
    game.round_hash = next_round_hash;
    game.start_block = 0;
    game.hash_index = next_hash_index;

    Ok(resolved)
}

/// Replaces the active table when idle, otherwise stages it for the next
/// round start.
pub fn set_loot_table(game: &mut CrashGame, table: LootTable) -> Result<LootTableChange> {
    table.validate()?;
    if game.is_idle() {
        game.loot_table = table;
        game.staged_loot_table = None;
        Ok(LootTableChange::Applied)
    } else {
        game.staged_loot_table = Some(table);
        Ok(LootTableChange::Staged)
    }
}

pub fn can_change_liquidity(game: &CrashGame, vault: &HouseVault) -> bool {
    game.is_idle() && vault.reserved == 0
}

pub fn deposit_liquidity<V: ValueCustody>(
    game: &CrashGame,
    vault: &mut HouseVault,
    custody: &mut V,
    from: Pubkey,
    amount: u64,
) -> Result<()> {
    require!(amount > 0, HashCrashError::ZeroAmount);
    require!(
        can_change_liquidity(game, vault),
        HashCrashError::LiquidityLocked
    );
    vault
        .liquidity
        .checked_add(amount)
        .ok_or(HashCrashError::Overflow)?;

    custody.receive(&from, amount)?;
    vault.credit(amount)
}

pub fn withdraw_liquidity<V: ValueCustody>(
    game: &CrashGame,
    vault: &mut HouseVault,
    custody: &mut V,
    to: Pubkey,
    amount: u64,
) -> Result<()> {
    require!(amount > 0, HashCrashError::ZeroAmount);
    require!(
        can_change_liquidity(game, vault),
        HashCrashError::LiquidityLocked
    );
    require!(
        amount <= vault.liquidity,
        HashCrashError::InsufficientLiquidity
    );

    custody.send(&to, amount)?;
    vault.debit(amount)
}

pub fn bets_by_bettor(game: &CrashGame, bettor: &Pubkey) -> Vec<IndexedBet> {
    game.bet_indices_of(bettor)
        .iter()
        .filter_map(|owner| {
            game.bets.get(owner.bet_index as usize).map(|bet| IndexedBet {
                bet_index: owner.bet_index,
                bet: *bet,
            })
        })
        .collect()
}

/// Snapshot of the current round, including the slot hashes that are
/// already known for it.
pub fn round_info<E: EntropySource>(
    game: &CrashGame,
    vault: &HouseVault,
    entropy: &E,
    current_block: u64,
) -> RoundInfo {
    let mut block_hashes = Vec::new();
    if !game.is_idle() {
        for index in 0..game.loot_table.len() as u64 {
            let slot = game.start_block.saturating_add(index);
            if slot >= current_block {
                break;
            }
            match entropy.block_hash(slot) {
                Ok(hash) => block_hashes.push(hash),
                Err(_) => break,
            }
        }
    }

    RoundInfo {
        hash_index: game.hash_index,
        start_block: game.start_block,
        liquidity: vault.liquidity,
        reserved: vault.reserved,
        round_hash: game.round_hash,
        bets: game.bets.clone(),
        block_hashes,
    }
}
