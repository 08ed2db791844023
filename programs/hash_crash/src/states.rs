use anchor_lang::prelude::*;

use crate::errors::HashCrashError;
use crate::loot_table::LootTable;

// PDA seeds
pub const GAME_SEED: &str = "hash_crash";
pub const HOUSE_VAULT_SEED: &str = "house_vault";

pub const MAX_BETS: usize = 64;
/// Every winner is a writable account of the reveal transaction, so the
/// number of distinct bettors must fit one legacy transaction.
pub const MAX_BETTORS: usize = 24;
pub const MAX_BETS_PER_BETTOR: usize = 8;
pub const DEFAULT_INTRO_BLOCKS: u64 = 50;
pub const MAX_INTRO_BLOCKS: u64 = 1_000;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct Bet {
    pub bettor: Pubkey,
    pub amount: u64,
    pub cashout_index: u16,
    pub cancelled: bool,
}

/// Entry of the bettor -> bet index, kept sorted by `(bettor, bet_index)`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct BetOwner {
    pub bettor: Pubkey,
    pub bet_index: u16,
}

#[account]
#[derive(InitSpace)]
pub struct CrashGame {
    pub admin: Pubkey,
    /// Randomness publisher allowed to reveal round secrets.
    pub hash_owner: Pubkey,
    pub house_vault: Pubkey,
    pub active: bool,
    pub intro_blocks: u64,
    /// Never below the rent-exempt minimum of an empty account, so every
    /// payout leaves its recipient rent exempt.
    pub min_bet: u64,
    /// Commitment to the secret that ends the current round.
    pub round_hash: [u8; 32],
    /// 0 while idle, otherwise the first slot whose hash feeds resolution.
    pub start_block: u64,
    pub hash_index: u64,
    pub loot_table: LootTable,
    pub staged_loot_table: Option<LootTable>,
    #[max_len(MAX_BETS)]
    pub bets: Vec<Bet>,
    #[max_len(MAX_BETS)]
    pub bet_owners: Vec<BetOwner>,
    pub bump: u8,
}

impl CrashGame {
    pub fn is_idle(&self) -> bool {
        self.start_block == 0
    }

    pub fn is_accepting(&self, current_block: u64) -> bool {
        !self.is_idle() && current_block < self.start_block
    }

    pub fn is_in_progress(&self, current_block: u64) -> bool {
        !self.is_idle() && current_block >= self.start_block
    }

    pub fn validate_intro_blocks(intro_blocks: u64) -> Result<()> {
        require!(
            intro_blocks > 0 && intro_blocks <= MAX_INTRO_BLOCKS,
            HashCrashError::InvalidConfig
        );
        Ok(())
    }

    pub fn validate_min_bet(min_bet: u64, rent_floor: u64) -> Result<()> {
        require!(
            min_bet > 0 && min_bet >= rent_floor,
            HashCrashError::InvalidConfig
        );
        Ok(())
    }

    pub fn validate_config(&self) -> Result<()> {
        Self::validate_intro_blocks(self.intro_blocks)?;
        self.loot_table.validate()?;
        if let Some(staged) = &self.staged_loot_table {
            staged.validate()?;
        }
        Ok(())
    }

    /// Looks up a bet owned by `bettor` that has not been cancelled.
    pub fn live_bet(&self, bet_index: u16, bettor: &Pubkey) -> Result<Bet> {
        let bet = self
            .bets
            .get(bet_index as usize)
            .ok_or(HashCrashError::BetNotFound)?;
        require_keys_eq!(bet.bettor, *bettor, HashCrashError::BetNotYours);
        require!(!bet.cancelled, HashCrashError::BetCancelled);
        Ok(*bet)
    }

    pub fn index_bet(&mut self, bettor: Pubkey, bet_index: u16) {
        let entry = BetOwner { bettor, bet_index };
        let position = self
            .bet_owners
            .partition_point(|o| (o.bettor, o.bet_index) < (bettor, bet_index));
        self.bet_owners.insert(position, entry);
    }

    pub fn bet_indices_of(&self, bettor: &Pubkey) -> &[BetOwner] {
        let start = self.bet_owners.partition_point(|o| o.bettor < *bettor);
        let end = self.bet_owners.partition_point(|o| o.bettor <= *bettor);
        &self.bet_owners[start..end]
    }

    pub fn bettor_count(&self) -> usize {
        let mut count = 0;
        let mut previous: Option<Pubkey> = None;
        for owner in &self.bet_owners {
            if previous != Some(owner.bettor) {
                count += 1;
                previous = Some(owner.bettor);
            }
        }
        count
    }

    /// Fails with `TooManyBets` unless `bettor` can hold one more bet this round.
    pub fn check_bet_capacity(&self, bettor: &Pubkey) -> Result<()> {
        require!(self.bets.len() < MAX_BETS, HashCrashError::TooManyBets);
        let held = self.bet_indices_of(bettor).len();
        if held == 0 {
            require!(
                self.bettor_count() < MAX_BETTORS,
                HashCrashError::TooManyBets
            );
        } else {
            require!(
                held < MAX_BETS_PER_BETTOR,
                HashCrashError::TooManyBets
            );
        }
        Ok(())
    }

    /// Sum of the maximum payouts of every live bet.
    pub fn outstanding_payouts(&self) -> Result<u64> {
        self.bets
            .iter()
            .filter(|bet| !bet.cancelled)
            .try_fold(0u64, |total, bet| {
                let payout = self.loot_table.multiply(bet.amount, bet.cashout_index)?;
                total
                    .checked_add(payout)
                    .ok_or_else(|| error!(HashCrashError::Overflow))
            })
    }
}

/// Round liquidity held by the vault PDA.
///
/// `reserved` is the sum of the maximum payouts of every live bet and never
/// exceeds `liquidity`.
#[account]
#[derive(InitSpace)]
pub struct HouseVault {
    pub house_authority: Pubkey,
    pub liquidity: u64,
    pub reserved: u64,
    pub bump: u8,
}

impl HouseVault {
    pub fn free_liquidity(&self) -> u64 {
        self.liquidity.saturating_sub(self.reserved)
    }

    pub fn reserve(&mut self, amount: u64) -> Result<()> {
        let reserved = self
            .reserved
            .checked_add(amount)
            .ok_or(HashCrashError::Overflow)?;
        require!(
            reserved <= self.liquidity,
            HashCrashError::InsufficientLiquidity
        );
        self.reserved = reserved;
        Ok(())
    }

    pub fn release(&mut self, amount: u64) -> Result<()> {
        self.reserved = self
            .reserved
            .checked_sub(amount)
            .ok_or(HashCrashError::Overflow)?;
        Ok(())
    }

    pub fn clear_queue(&mut self) {
        self.reserved = 0;
    }

    pub fn credit(&mut self, amount: u64) -> Result<()> {
        self.liquidity = self
            .liquidity
            .checked_add(amount)
            .ok_or(HashCrashError::Overflow)?;
        Ok(())
    }

    pub fn debit(&mut self, amount: u64) -> Result<()> {
        self.liquidity = self
            .liquidity
            .checked_sub(amount)
            .ok_or(HashCrashError::InsufficientLiquidity)?;
        Ok(())
    }
}

// Read-only views returned by the query instructions

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexedBet {
    pub bet_index: u16,
    pub bet: Bet,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct RoundInfo {
    pub hash_index: u64,
    pub start_block: u64,
    pub liquidity: u64,
    pub reserved: u64,
    pub round_hash: [u8; 32],
    pub bets: Vec<Bet>,
    pub block_hashes: Vec<[u8; 32]>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct LootTables {
    pub active: LootTable,
    pub staged: Option<LootTable>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameSettings {
    pub admin: Pubkey,
    pub hash_owner: Pubkey,
    pub intro_blocks: u64,
    pub min_bet: u64,
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{game, vault};
    use rstest::rstest;

    #[rstest]
    #[case(0, 0, true, false, false)]
    #[case(100, 99, false, true, false)]
    #[case(100, 100, false, false, true)]
    #[case(100, 150, false, false, true)]
    fn test_lifecycle_predicates(
        #[case] start_block: u64,
        #[case] current: u64,
        #[case] idle: bool,
        #[case] accepting: bool,
        #[case] in_progress: bool,
    ) {
        let mut game = game();
        game.start_block = start_block;
        assert_eq!(game.is_idle(), idle);
        assert_eq!(game.is_accepting(current), accepting);
        assert_eq!(game.is_in_progress(current), in_progress);
    }

    #[test]
    fn test_reserve_never_exceeds_liquidity() {
        let mut vault = vault(1_000);
        vault.reserve(600).unwrap();
        vault.reserve(400).unwrap();
        assert!(vault.reserve(1).is_err());
        assert_eq!(vault.reserved, 1_000);
        assert_eq!(vault.free_liquidity(), 0);
    }

    #[test]
    fn test_release_and_clear_queue() {
        let mut vault = vault(1_000);
        vault.reserve(700).unwrap();
        vault.release(200).unwrap();
        assert_eq!(vault.reserved, 500);
        assert!(vault.release(501).is_err());
        assert_eq!(vault.reserved, 500);
        vault.clear_queue();
        assert_eq!(vault.reserved, 0);
    }

    #[test]
    fn test_debit_cannot_underflow() {
        let mut vault = vault(10);
        vault.credit(5).unwrap();
        vault.debit(15).unwrap();
        assert!(vault.debit(1).is_err());
        assert!(vault.credit(u64::MAX).is_ok());
        assert!(vault.credit(1).is_err());
    }

    #[test]
    fn test_owner_index_groups_bets_by_bettor() {
        let mut game = game();
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();
        game.index_bet(alice, 0);
        game.index_bet(bob, 1);
        game.index_bet(alice, 2);
        game.index_bet(bob, 3);

        let alice_bets: Vec<u16> = game.bet_indices_of(&alice).iter().map(|o| o.bet_index).collect();
        let bob_bets: Vec<u16> = game.bet_indices_of(&bob).iter().map(|o| o.bet_index).collect();
        assert_eq!(alice_bets, vec![0, 2]);
        assert_eq!(bob_bets, vec![1, 3]);
        assert!(game.bet_indices_of(&Pubkey::new_unique()).is_empty());
    }

    #[test]
    fn test_live_bet_checks() {
        let mut game = game();
        let alice = Pubkey::new_unique();
        game.bets.push(Bet {
            bettor: alice,
            amount: 10,
            cashout_index: 3,
            cancelled: false,
        });
        game.bets.push(Bet {
            bettor: alice,
            amount: 10,
            cashout_index: 3,
            cancelled: true,
        });
        assert_eq!(game.live_bet(0, &alice).unwrap().amount, 10);
        assert!(game.live_bet(0, &Pubkey::new_unique()).is_err());
        assert!(game.live_bet(1, &alice).is_err());
        assert!(game.live_bet(2, &alice).is_err());
    }

    #[test]
    fn test_bettor_count_ignores_repeat_bets() {
        let mut game = game();
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();
        assert_eq!(game.bettor_count(), 0);
        game.index_bet(alice, 0);
        game.index_bet(bob, 1);
        game.index_bet(alice, 2);
        assert_eq!(game.bettor_count(), 2);
    }

    #[test]
    fn test_bet_capacity_per_bettor_and_per_round() {
        let mut game = game();
        let alice = Pubkey::new_unique();
        for i in 0..MAX_BETS_PER_BETTOR as u16 {
            assert!(game.check_bet_capacity(&alice).is_ok());
            game.index_bet(alice, i);
        }
        assert!(game.check_bet_capacity(&alice).is_err());

        for i in 1..MAX_BETTORS as u16 {
            game.index_bet(Pubkey::new_unique(), 100 + i);
        }
        assert_eq!(game.bettor_count(), MAX_BETTORS);
        assert!(game.check_bet_capacity(&Pubkey::new_unique()).is_err());
    }

    #[rstest]
    #[case(0, 0, false)]
    #[case(1, 0, true)]
    #[case(890_879, 890_880, false)]
    #[case(890_880, 890_880, true)]
    fn test_validate_min_bet(#[case] min_bet: u64, #[case] rent_floor: u64, #[case] valid: bool) {
        assert_eq!(CrashGame::validate_min_bet(min_bet, rent_floor).is_ok(), valid);
    }

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(MAX_INTRO_BLOCKS, true)]
    #[case(MAX_INTRO_BLOCKS + 1, false)]
    fn test_validate_config_intro_blocks(#[case] intro_blocks: u64, #[case] valid: bool) {
        let mut game = game();
        game.intro_blocks = intro_blocks;
        assert_eq!(game.validate_config().is_ok(), valid);
    }
}
