use anchor_lang::prelude::*;

use crate::errors::HashCrashError;

/// Fixed-point scale of a multiplier: `MULTIPLIER_SCALE` is 1.0x.
pub const MULTIPLIER_SCALE: u64 = 1_000_000;
/// Fixed-point scale of a death probability and of the rolls tested against it.
pub const PROBABILITY_SCALE: u64 = 1_000_000_000;
pub const MAX_LOOT_TABLE_LEN: usize = 64;

pub const DEFAULT_LOOT_TABLE_LEN: u16 = 50;
pub const DEFAULT_GROWTH_NUM: u64 = 106;
pub const DEFAULT_GROWTH_DEN: u64 = 100;
/// 1% of `PROBABILITY_SCALE`.
pub const DEFAULT_HOUSE_EDGE: u64 = 10_000_000;

/// Maps an index to a payout multiplier and the probability that the round
/// dies at that index.
///
/// A table is immutable once configured; replacing it swaps the whole value.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq, InitSpace)]
pub struct LootTable {
    #[max_len(MAX_LOOT_TABLE_LEN)]
    pub multipliers: Vec<u64>,
    #[max_len(MAX_LOOT_TABLE_LEN)]
    pub death_probabilities: Vec<u64>,
}

impl LootTable {
    pub fn new(multipliers: Vec<u64>, death_probabilities: Vec<u64>) -> Result<Self> {
        let table = Self {
            multipliers,
            death_probabilities,
        };
        table.validate()?;
        Ok(table)
    }

    /// Builds a table whose multipliers grow by `growth_num / growth_den` per
    /// index and whose death probabilities keep the expected return of every
    /// cashout index at `1 - house_edge`.
    pub fn geometric(len: u16, growth_num: u64, growth_den: u64, house_edge: u64) -> Result<Self> {
        require!(
            len > 0 && len as usize <= MAX_LOOT_TABLE_LEN,
            HashCrashError::InvalidLootTable
        );
        require!(
            growth_den > 0 && growth_num > growth_den,
            HashCrashError::InvalidLootTable
        );
        require!(
            house_edge <= PROBABILITY_SCALE,
            HashCrashError::InvalidLootTable
        );

        let mut multipliers = Vec::with_capacity(len as usize);
        let mut death_probabilities = Vec::with_capacity(len as usize);
        let mut current = MULTIPLIER_SCALE as u128;
        for index in 0..len {
            if index == 0 {
                death_probabilities.push(house_edge);
            } else {
                let previous = current;
                current = current
                    .checked_mul(growth_num as u128)
                    .map(|v| v / growth_den as u128)
                    .ok_or(HashCrashError::Overflow)?;
                let survival = previous * PROBABILITY_SCALE as u128 / current;
                death_probabilities.push(PROBABILITY_SCALE - survival as u64);
            }
            multipliers.push(u64::try_from(current).map_err(|_| HashCrashError::Overflow)?);
        }

        Self::new(multipliers, death_probabilities)
    }

    pub fn default_table() -> Result<Self> {
        Self::geometric(
            DEFAULT_LOOT_TABLE_LEN,
            DEFAULT_GROWTH_NUM,
            DEFAULT_GROWTH_DEN,
            DEFAULT_HOUSE_EDGE,
        )
    }

    pub fn validate(&self) -> Result<()> {
        let len = self.multipliers.len();
        require!(
            len > 0 && len <= MAX_LOOT_TABLE_LEN,
            HashCrashError::InvalidLootTable
        );
        require!(
            self.death_probabilities.len() == len,
            HashCrashError::InvalidLootTable
        );
        require!(
            self.multipliers[0] >= MULTIPLIER_SCALE,
            HashCrashError::InvalidLootTable
        );
        require!(
            self.multipliers.windows(2).all(|w| w[0] < w[1]),
            HashCrashError::InvalidLootTable
        );
        require!(
            self.death_probabilities
                .iter()
                .all(|p| *p <= PROBABILITY_SCALE),
            HashCrashError::InvalidLootTable
        );
        Ok(())
    }

    pub fn len(&self) -> u16 {
        self.multipliers.len() as u16
    }

    pub fn is_empty(&self) -> bool {
        self.multipliers.is_empty()
    }

    pub fn multiplier(&self, index: u16) -> Result<u64> {
        self.multipliers
            .get(index as usize)
            .copied()
            .ok_or_else(|| error!(HashCrashError::InvalidCashoutIndex))
    }

    /// Payout of `amount` locked in at `index`.
    pub fn multiply(&self, amount: u64, index: u16) -> Result<u64> {
        let multiplier = self.multiplier(index)?;
        let payout = (amount as u128)
            .checked_mul(multiplier as u128)
            .ok_or(HashCrashError::Overflow)?
            / MULTIPLIER_SCALE as u128;
        u64::try_from(payout).map_err(|_| error!(HashCrashError::Overflow))
    }

    /// Bernoulli trial for `index`; `roll` must be uniform in `[0, PROBABILITY_SCALE)`.
    pub fn is_dead(&self, roll: u64, index: u16) -> Result<bool> {
        let probability = self
            .death_probabilities
            .get(index as usize)
            .copied()
            .ok_or(HashCrashError::InvalidCashoutIndex)?;
        Ok(roll < probability)
    }
}
