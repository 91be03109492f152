//! Deterministic seed hierarchy.
//!
//! A master seed generates deterministic sub-seeds for each `(stream, index)`
//! pair. Sub-seeds are derived via BLAKE3 hashing, independently of thread
//! scheduling order, so parallel batches are identical regardless of thread count.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Deterministic seed hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedHierarchy {
    master_seed: u64,
}

impl SeedHierarchy {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    /// Hierarchy seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Derive a deterministic sub-seed for `(stream, index)`.
    ///
    /// Calling `sub_seed("batch", 0)` then `sub_seed("batch", 1)` gives the
    /// same results as calling them in reverse order.
    pub fn sub_seed(&self, stream: &str, index: u64) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.master_seed.to_le_bytes());
        // Length prefix keeps ("ab", ..) and ("a", ..) from sharing a prefix.
        hasher.update(&(stream.len() as u64).to_le_bytes());
        hasher.update(stream.as_bytes());
        hasher.update(&index.to_le_bytes());
        let hash = hasher.finalize();
        let mut head = [0u8; 8];
        head.copy_from_slice(&hash.as_bytes()[..8]);
        u64::from_le_bytes(head)
    }

    /// Create a seeded `StdRng` for `(stream, index)`.
    pub fn rng_for(&self, stream: &str, index: u64) -> StdRng {
        StdRng::seed_from_u64(self.sub_seed(stream, index))
    }
}
