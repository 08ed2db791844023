use anchor_lang::prelude::*;
use solana_keccak_hasher as keccak;

use crate::errors::HashCrashError;
use crate::loot_table::PROBABILITY_SCALE;

/// Size of one `(slot, hash)` entry in the SlotHashes sysvar.
pub const SLOT_HASH_ENTRY_LEN: usize = 40;
/// The sysvar keeps the hashes of the most recent 512 slots.
pub const MAX_SLOT_HASH_ENTRIES: usize = 512;

/// One-way commitment to a round secret.
///
/// The publisher posts `commit(secret)` before any bet of the round exists and
/// reveals `secret` to resolve it.
pub trait CommitmentScheme {
    fn commit(secret: &[u8; 32]) -> [u8; 32];

    fn verify(secret: &[u8; 32], commitment: &[u8; 32]) -> bool {
        Self::commit(secret) == *commitment
    }
}

pub struct Keccak256Commitment;

impl CommitmentScheme for Keccak256Commitment {
    fn commit(secret: &[u8; 32]) -> [u8; 32] {
        keccak::hash(secret).0
    }
}

/// Builds a hash chain of `len` secrets ending in `seed`.
///
/// `chain[i + 1] == commit(chain[i])`, so the publisher posts `chain[len - 1]`
/// as the first commitment and reveals the chain backwards: revealing
/// `chain[i]` proves the commitment `chain[i + 1]` and `commit(chain[i])` has
/// already been published for the round it ends.
pub fn hash_chain<C: CommitmentScheme>(seed: [u8; 32], len: usize) -> Vec<[u8; 32]> {
    let mut chain = Vec::with_capacity(len);
    let mut current = seed;
    for _ in 0..len {
        chain.push(current);
        current = C::commit(&current);
    }
    chain
}

/// Historical entropy: the hash of a produced block.
pub trait EntropySource {
    /// Fails with `InvalidHash` when the hash is not (or no longer) available.
    fn block_hash(&self, slot: u64) -> Result<[u8; 32]>;
}

/// Read-only view over the raw SlotHashes sysvar data.
///
/// Layout: little-endian `u64` entry count followed by `(u64 slot, [u8; 32] hash)`
/// entries ordered from the newest slot to the oldest.
pub struct SlotHashWindow<'a> {
    data: &'a [u8],
    len: usize,
}

impl<'a> SlotHashWindow<'a> {
    pub fn new(data: &'a [u8]) -> Result<Self> {
        let mut header = [0u8; 8];
        header.copy_from_slice(data.get(0..8).ok_or(HashCrashError::InvalidHash)?);
        let len = (u64::from_le_bytes(header) as usize).min(MAX_SLOT_HASH_ENTRIES);
        require!(
            data.len() >= 8 + len * SLOT_HASH_ENTRY_LEN,
            HashCrashError::InvalidHash
        );
        Ok(Self { data, len })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn entry(&self, index: usize) -> (u64, [u8; 32]) {
        let offset = 8 + index * SLOT_HASH_ENTRY_LEN;
        let mut slot = [0u8; 8];
        slot.copy_from_slice(&self.data[offset..offset + 8]);
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&self.data[offset + 8..offset + SLOT_HASH_ENTRY_LEN]);
        (u64::from_le_bytes(slot), hash)
    }
}

impl EntropySource for SlotHashWindow<'_> {
    /// A skipped slot resolves to the hash of the next produced slot. That
    /// hash is fixed as soon as it appears and is just as unknown to the
    /// publisher in advance.
    fn block_hash(&self, slot: u64) -> Result<[u8; 32]> {
        // entries[..newer] all have a slot >= the requested one
        let (mut low, mut high) = (0, self.len);
        while low < high {
            let mid = (low + high) / 2;
            if self.entry(mid).0 >= slot {
                low = mid + 1;
            } else {
                high = mid;
            }
        }
        let newer = low;
        require!(newer > 0, HashCrashError::InvalidHash);

        let (found_slot, hash) = self.entry(newer - 1);
        if found_slot != slot {
            // Only a skip if an older entry proves the slot is inside the window.
            require!(newer < self.len, HashCrashError::InvalidHash);
        }
        Ok(hash)
    }
}

/// Uniform roll in `[0, PROBABILITY_SCALE)` for one loot table index.
///
/// `keccak(secret || block_hash || slot)`: the secret is committed before the
/// block exists and the block hash is unknown to the publisher at commit time.
pub fn random_roll(secret: &[u8; 32], block_hash: &[u8; 32], slot: u64) -> u64 {
    let hash = keccak::hashv(&[&secret[..], &block_hash[..], &slot.to_le_bytes()[..]]);

    let mut buf = [0u8; 8];
    buf.copy_from_slice(&hash.0[0..8]);
    u64::from_le_bytes(buf) % PROBABILITY_SCALE
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sysvar_bytes(entries: &[(u64, [u8; 32])]) -> Vec<u8> {
        let mut data = Vec::with_capacity(8 + entries.len() * SLOT_HASH_ENTRY_LEN);
        data.extend_from_slice(&(entries.len() as u64).to_le_bytes());
        for (slot, hash) in entries {
            data.extend_from_slice(&slot.to_le_bytes());
            data.extend_from_slice(hash);
        }
        data
    }

    // ============================================================================
    // Commitment Tests
    // ============================================================================

    #[test]
    fn test_commit_verifies_its_own_secret() {
        let secret = [7u8; 32];
        let commitment = Keccak256Commitment::commit(&secret);
        assert!(Keccak256Commitment::verify(&secret, &commitment));
        assert_ne!(commitment, secret);
    }

    #[rstest]
    #[case([0u8; 32], [1u8; 32])]
    #[case([42u8; 32], [43u8; 32])]
    fn test_commit_rejects_other_secret(#[case] secret: [u8; 32], #[case] other: [u8; 32]) {
        let commitment = Keccak256Commitment::commit(&secret);
        assert!(!Keccak256Commitment::verify(&other, &commitment));
    }

    #[test]
    fn test_hash_chain_links() {
        let chain = hash_chain::<Keccak256Commitment>([9u8; 32], 5);
        assert_eq!(chain.len(), 5);
        assert_eq!(chain[0], [9u8; 32]);
        for i in 0..4 {
            assert!(Keccak256Commitment::verify(&chain[i], &chain[i + 1]));
        }
    }

    // ============================================================================
    // Slot Hash Window Tests
    // ============================================================================

    #[test]
    fn test_window_exact_lookup() {
        let data = sysvar_bytes(&[(103, [3u8; 32]), (102, [2u8; 32]), (101, [1u8; 32])]);
        let window = SlotHashWindow::new(&data).unwrap();
        assert_eq!(window.len(), 3);
        assert_eq!(window.block_hash(103).unwrap(), [3u8; 32]);
        assert_eq!(window.block_hash(102).unwrap(), [2u8; 32]);
        assert_eq!(window.block_hash(101).unwrap(), [1u8; 32]);
    }

    #[test]
    fn test_window_skipped_slot_uses_next_produced_slot() {
        let data = sysvar_bytes(&[(105, [5u8; 32]), (102, [2u8; 32]), (101, [1u8; 32])]);
        let window = SlotHashWindow::new(&data).unwrap();
        assert_eq!(window.block_hash(103).unwrap(), [5u8; 32]);
        assert_eq!(window.block_hash(104).unwrap(), [5u8; 32]);
    }

    #[rstest]
    #[case(106)]
    #[case(200)]
    #[case(100)]
    #[case(0)]
    fn test_window_unavailable_slots(#[case] slot: u64) {
        let data = sysvar_bytes(&[(105, [5u8; 32]), (102, [2u8; 32]), (101, [1u8; 32])]);
        let window = SlotHashWindow::new(&data).unwrap();
        assert!(window.block_hash(slot).is_err());
    }

    #[test]
    fn test_window_empty_and_truncated_data() {
        let empty = sysvar_bytes(&[]);
        let window = SlotHashWindow::new(&empty).unwrap();
        assert!(window.is_empty());
        assert!(window.block_hash(1).is_err());

        assert!(SlotHashWindow::new(&[1, 2, 3]).is_err());
        let mut truncated = sysvar_bytes(&[(1, [1u8; 32])]);
        truncated.truncate(20);
        assert!(SlotHashWindow::new(&truncated).is_err());
    }

    #[test]
    fn test_window_full_sysvar() {
        let entries: Vec<(u64, [u8; 32])> = (0..MAX_SLOT_HASH_ENTRIES as u64)
            .map(|i| {
                let slot = 10_000 - i;
                (slot, Keccak256Commitment::commit(&[(slot % 251) as u8; 32]))
            })
            .collect();
        let data = sysvar_bytes(&entries);
        let window = SlotHashWindow::new(&data).unwrap();
        for (slot, hash) in entries.iter().step_by(37) {
            assert_eq!(window.block_hash(*slot).unwrap(), *hash);
        }
        assert!(window.block_hash(10_000 - MAX_SLOT_HASH_ENTRIES as u64).is_err());
    }

    // ============================================================================
    // Random Roll Tests
    // ============================================================================

    #[rstest]
    #[case([42u8; 32], [1u8; 32], 1)]
    #[case([0u8; 32], [255u8; 32], u64::MAX)]
    fn test_roll_deterministic_and_in_range(
        #[case] secret: [u8; 32],
        #[case] block_hash: [u8; 32],
        #[case] slot: u64,
    ) {
        let roll = random_roll(&secret, &block_hash, slot);
        assert_eq!(roll, random_roll(&secret, &block_hash, slot));
        assert!(roll < PROBABILITY_SCALE);
    }

    #[test]
    fn test_roll_depends_on_every_input() {
        let base = random_roll(&[1u8; 32], &[2u8; 32], 3);
        assert_ne!(base, random_roll(&[9u8; 32], &[2u8; 32], 3));
        assert_ne!(base, random_roll(&[1u8; 32], &[9u8; 32], 3));
        assert_ne!(base, random_roll(&[1u8; 32], &[2u8; 32], 4));
    }

    #[test]
    fn test_roll_distribution_uniform() {
        const NUM_BUCKETS: usize = 10;
        let mut counts = [0u32; NUM_BUCKETS];
        let secret = [17u8; 32];
        let num_samples = 2_000u64;

        for slot in 0..num_samples {
            let roll = random_roll(&secret, &[3u8; 32], slot);
            counts[(roll / (PROBABILITY_SCALE / NUM_BUCKETS as u64)) as usize] += 1;
        }

        let expected = num_samples as f64 / NUM_BUCKETS as f64;
        for (i, &count) in counts.iter().enumerate() {
            let diff = (count as f64 - expected).abs();
            assert!(
                diff <= expected * 0.5,
                "Bucket {} has {} rolls (expected ~{})",
                i,
                count,
                expected
            );
        }
    }
}
