//! Test doubles for the injected capabilities of the round engine.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Debug;
use std::ops::Range;

use anchor_lang::prelude::*;
use solana_keccak_hasher as keccak;

use crate::custody::ValueCustody;
use crate::errors::HashCrashError;
use crate::loot_table::LootTable;
use crate::rng::EntropySource;
use crate::states::*;

pub fn game() -> CrashGame {
    game_with_table(LootTable::default_table().unwrap())
}

pub fn game_with_table(loot_table: LootTable) -> CrashGame {
    CrashGame {
        admin: Pubkey::new_unique(),
        hash_owner: Pubkey::new_unique(),
        house_vault: Pubkey::new_unique(),
        active: true,
        intro_blocks: DEFAULT_INTRO_BLOCKS,
        min_bet: 1,
        round_hash: [0u8; 32],
        start_block: 0,
        hash_index: 0,
        loot_table,
        staged_loot_table: None,
        bets: Vec::new(),
        bet_owners: Vec::new(),
        bump: 255,
    }
}

pub fn vault(liquidity: u64) -> HouseVault {
    HouseVault {
        house_authority: Pubkey::new_unique(),
        liquidity,
        reserved: 0,
        bump: 255,
    }
}

pub fn assert_error<T: Debug>(result: Result<T>, expected: HashCrashError) {
    match result {
        Ok(value) => panic!("Expected {:?}, got Ok({:?})", expected, value),
        Err(err) => assert_eq!(err, Error::from(expected)),
    }
}

/// Block hashes for a contiguous range of produced slots.
pub struct ScriptedEntropy {
    hashes: BTreeMap<u64, [u8; 32]>,
}

impl ScriptedEntropy {
    pub fn produced(slots: Range<u64>) -> Self {
        let hashes = slots
            .map(|slot| (slot, keccak::hash(&slot.to_le_bytes()).0))
            .collect();
        Self { hashes }
    }
}

impl EntropySource for ScriptedEntropy {
    fn block_hash(&self, slot: u64) -> Result<[u8; 32]> {
        self.hashes
            .get(&slot)
            .copied()
            .ok_or_else(|| error!(HashCrashError::InvalidHash))
    }
}

/// In-memory ledger standing in for lamport transfers.
#[derive(Default)]
pub struct MockCustody {
    balances: BTreeMap<Pubkey, u64>,
    rejected: BTreeSet<Pubkey>,
    /// Makes every receive deliver less than requested.
    pub short_receive: bool,
    pub received: Vec<(Pubkey, u64)>,
    pub sent: Vec<(Pubkey, u64)>,
}

impl MockCustody {
    pub fn fund(&mut self, account: Pubkey, amount: u64) {
        *self.balances.entry(account).or_default() += amount;
    }

    pub fn balance(&self, account: &Pubkey) -> u64 {
        self.balances.get(account).copied().unwrap_or_default()
    }

    /// Every later send to `account` fails.
    pub fn reject(&mut self, account: Pubkey) {
        self.rejected.insert(account);
    }
}

impl ValueCustody for MockCustody {
    fn receive(&mut self, from: &Pubkey, amount: u64) -> Result<()> {
        require!(!self.short_receive, HashCrashError::InvalidReceive);
        let balance = self.balance(from);
        require!(balance >= amount, HashCrashError::TransferFailed);
        self.balances.insert(*from, balance - amount);
        self.received.push((*from, amount));
        Ok(())
    }

    fn send(&mut self, to: &Pubkey, amount: u64) -> Result<()> {
        require!(!self.rejected.contains(to), HashCrashError::TransferFailed);
        self.fund(*to, amount);
        self.sent.push((*to, amount));
        Ok(())
    }
}
