//! Stable Hashing
//!
//! SHA-256 helpers with explicit byte layouts. Nothing here may depend on
//! `std::hash`, whose output is allowed to vary between processes.

use sha2::{Sha256, Digest};

/// Hash output type (256 bits / 32 bytes)
pub type Digest256 = [u8; 32];

/// Domain separator for the sync fingerprint.
pub const SYNC_DOMAIN: &[u8] = b"DECRYPTO_SYNC_V1";

/// Number of digest bytes shown in a fingerprint (8 hex characters).
pub const FINGERPRINT_BYTES: usize = 4;

/// Deterministic hasher with typed update helpers.
///
/// Order of updates is critical for determinism.
pub struct StableHasher {
    hasher: Sha256,
}

impl StableHasher {
    /// Create a new hasher with domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Create hasher for the sync fingerprint.
    pub fn for_sync() -> Self {
        Self::new(SYNC_DOMAIN)
    }

    /// Update with a u32 value (little-endian).
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a u64 value (little-endian).
    #[inline]
    pub fn update_u64(&mut self, value: u64) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a length-prefixed UTF-8 string.
    #[inline]
    pub fn update_str(&mut self, value: &str) {
        self.update_u64(value.len() as u64);
        self.hasher.update(value.as_bytes());
    }

    /// Finalize and return the hash.
    pub fn finalize(self) -> Digest256 {
        self.hasher.finalize().into()
    }
}

/// Short fingerprint of the public, shared part of a game.
///
/// Covers the shared seed and the round number only. Both devices of a game
/// show the same value at the same round, so players can compare it aloud
/// before resolving a turn. Team-private data (hands, tokens) stays out.
pub fn sync_fingerprint(shared_seed: &str, round: u32) -> String {
    let mut hasher = StableHasher::for_sync();
    hasher.update_str(shared_seed);
    hasher.update_u32(round);
    let digest = hasher.finalize();
    hex::encode_upper(&digest[..FINGERPRINT_BYTES])
}

// =============================================================================
// TESTS
// =============================================================================
