//! Deterministic Random Number Generator
//!
//! Every secret a device needs (keyword hands, round codes) is drawn from a
//! generator derived from the shared seed plus a purpose-specific salt.
//! Two devices that never talk to each other stay in sync only because this
//! derivation is identical on every platform and in every process.
//!
//! Uses Xorshift128+ seeded through SplitMix64, with the seed itself taken
//! from a SHA-256 digest of `(shared seed, salt)`.

use sha2::{Sha256, Digest};

/// Domain separator for seed derivation.
///
/// Part of the device-to-device protocol: changing it (or the layout hashed
/// after it) makes devices built from different versions disagree.
pub const SEED_DOMAIN: &[u8] = b"DECRYPTO_SEED_V1";

/// Deterministic PRNG using Xorshift128+ algorithm.
///
/// # Determinism Guarantee
///
/// Given the same `(shared seed, salt)` pair, this RNG produces the exact
/// same sequence on any platform, process, or run.
///
/// # Example
///
/// ```
/// use decrypto::core::rng::DeterministicRng;
///
/// let mut a = DeterministicRng::derive("NEBULA7", "KEYWORDS");
/// let mut b = DeterministicRng::derive("NEBULA7", "KEYWORDS");
/// assert_eq!(a.next_u64(), b.next_u64());
/// ```
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    state: [u64; 2],
}

impl DeterministicRng {
    /// Create a new RNG from a 64-bit seed.
    ///
    /// Uses SplitMix64 to initialize the internal state, ensuring
    /// good distribution even from weak seeds.
    pub fn new(seed: u64) -> Self {
        let mut s = seed;
        let state0 = splitmix64(&mut s);
        let state1 = splitmix64(&mut s);

        // Ensure state is never all zeros
        let state = if state0 == 0 && state1 == 0 {
            [1, 1]
        } else {
            [state0, state1]
        };

        Self { state }
    }

    /// Derive a generator for one purpose from the shared game seed.
    ///
    /// The result depends only on `shared_seed` and `salt`.
    pub fn derive(shared_seed: &str, salt: &str) -> Self {
        Self::new(derive_seed(shared_seed, salt))
    }

    /// Generate the next 64-bit random value.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let s0 = self.state[0];
        let mut s1 = self.state[1];
        let result = s0.wrapping_add(s1);

        s1 ^= s0;
        self.state[0] = s0.rotate_left(24) ^ s1 ^ (s1 << 16);
        self.state[1] = s1.rotate_left(37);

        result
    }

    /// Generate a random index in range [0, bound).
    ///
    /// Uses rejection sampling so every index is equally likely; the number
    /// of draws consumed is still a pure function of the stream.
    #[inline]
    pub fn next_below(&mut self, bound: usize) -> usize {
        if bound <= 1 {
            return 0;
        }
        let bound = bound as u64;
        // 2^64 mod bound: values below this would bias the low residues
        let threshold = bound.wrapping_neg() % bound;
        loop {
            let r = self.next_u64();
            if r >= threshold {
                return (r % bound) as usize;
            }
        }
    }

    /// Shuffle a slice in place using Fisher-Yates algorithm.
    ///
    /// Walks from the last index down to 1, swapping each position with
    /// `next_below(i + 1)`.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        let len = slice.len();
        for i in (1..len).rev() {
            let j = self.next_below(i + 1);
            slice.swap(i, j);
        }
    }

    /// Draw `k` distinct elements from `pool`, order-sensitive.
    ///
    /// Partial Fisher-Yates from the front: position `i` is swapped with a
    /// position drawn from `[i, len)`. Returns the first `k` elements in
    /// draw order. `k` is clamped to the pool size.
    pub fn sample_distinct<T: Clone>(&mut self, pool: &[T], k: usize) -> Vec<T> {
        let mut items = pool.to_vec();
        let k = k.min(items.len());
        for i in 0..k {
            let j = i + self.next_below(items.len() - i);
            items.swap(i, j);
        }
        items.truncate(k);
        items
    }

    /// Get current state (for checkpointing/debugging).
    pub fn state(&self) -> [u64; 2] {
        self.state
    }

    /// Restore from saved state.
    ///
    /// An all-zero state would only ever yield zeros; it is replaced with
    /// `[1, 1]`, as in [`new`](Self::new).
    pub fn set_state(&mut self, state: [u64; 2]) {
        self.state = if state == [0, 0] { [1, 1] } else { state };
    }
}

/// SplitMix64 for seed initialization.
/// Produces well-distributed values from sequential seeds.
#[inline]
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

/// Derive a 64-bit generator seed from the shared seed and a salt.
///
/// SHA-256 over:
/// 1. [`SEED_DOMAIN`]
/// 2. shared seed length (u64, little-endian) and UTF-8 bytes
/// 3. salt length (u64, little-endian) and UTF-8 bytes
///
/// The first 8 bytes of the digest, little-endian, form the seed. Length
/// prefixes keep `("AB", "C")` and `("A", "BC")` apart.
pub fn derive_seed(shared_seed: &str, salt: &str) -> u64 {
    let mut hasher = Sha256::new();

    hasher.update(SEED_DOMAIN);

    hasher.update((shared_seed.len() as u64).to_le_bytes());
    hasher.update(shared_seed.as_bytes());

    hasher.update((salt.len() as u64).to_le_bytes());
    hasher.update(salt.as_bytes());

    let hash = hasher.finalize();

    let mut seed = [0u8; 8];
    seed.copy_from_slice(&hash[0..8]);
    u64::from_le_bytes(seed)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rng_determinism() {
        // Same seed must produce same sequence
        let mut rng1 = DeterministicRng::new(12345);
        let mut rng2 = DeterministicRng::new(12345);

        for _ in 0..1000 {
            assert_eq!(rng1.next_u64(), rng2.next_u64());
        }
    }

    #[test]
    fn test_rng_known_values() {
        // Verify specific output for regression testing
        let mut rng = DeterministicRng::new(42);
        let val1 = rng.next_u64();
        let val2 = rng.next_u64();
        let val3 = rng.next_u64();

        // These values must never change!
        // If they do, devices on different versions stop agreeing.
        assert_eq!(val1, 16629283624882167704);
        assert_eq!(val2, 1420492921613871959);
        assert_eq!(val3, 9768315062676884790);
    }

    #[test]
    fn test_derive_seed_known_value() {
        // Protocol constant: every device must compute this exact value
        assert_eq!(derive_seed("NEBULA7", "KEYWORDS"), 17058256760205730217);
    }

    #[test]
    fn test_derive_seed_salt_separation() {
        let base = derive_seed("NEBULA7", "KEYWORDS");
        assert_ne!(base, derive_seed("NEBULA7", "CODE-white-ROUND1"));
        assert_ne!(base, derive_seed("NEBULA8", "KEYWORDS"));
        // Length prefixes keep boundary shifts apart
        assert_ne!(derive_seed("AB", "C"), derive_seed("A", "BC"));
    }

    #[test]
    fn test_next_below() {
        let mut rng = DeterministicRng::new(1234);

        for _ in 0..1000 {
            let val = rng.next_below(100);
            assert!(val < 100);
        }

        // Edge cases: bound 0 and 1 consume nothing
        let before = rng.state();
        assert_eq!(rng.next_below(0), 0);
        assert_eq!(rng.next_below(1), 0);
        assert_eq!(rng.state(), before);
    }

    #[test]
    fn test_shuffle_determinism() {
        let mut rng1 = DeterministicRng::derive("seed", "shuffle");
        let mut rng2 = DeterministicRng::derive("seed", "shuffle");

        let mut arr1 = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let mut arr2 = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

        rng1.shuffle(&mut arr1);
        rng2.shuffle(&mut arr2);

        assert_eq!(arr1, arr2);

        let mut sorted = arr1;
        sorted.sort_unstable();
        assert_eq!(sorted, [1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_sample_distinct() {
        let mut rng = DeterministicRng::new(99);
        let sample = rng.sample_distinct(&[1u8, 2, 3, 4], 3);
        assert_eq!(sample.len(), 3);
        assert!(sample.iter().all(|v| (1..=4).contains(v)));
        assert_ne!(sample[0], sample[1]);
        assert_ne!(sample[1], sample[2]);
        assert_ne!(sample[0], sample[2]);

        // Oversized request is clamped
        assert_eq!(rng.sample_distinct(&[1u8, 2], 5).len(), 2);
    }

    #[test]
    fn test_state_checkpoint() {
        let mut rng = DeterministicRng::new(5555);

        // Advance some
        for _ in 0..50 {
            rng.next_u64();
        }

        // Save state
        let saved_state = rng.state();

        // Advance more
        let next_values: Vec<u64> = (0..10).map(|_| rng.next_u64()).collect();

        // Restore state
        rng.set_state(saved_state);

        // Should produce same values again
        for expected in next_values {
            assert_eq!(rng.next_u64(), expected);
        }
    }

    #[test]
    fn test_set_state_rejects_zero() {
        let mut rng = DeterministicRng::new(7);
        rng.set_state([0, 0]);
        assert_eq!(rng.state(), [1, 1]);

        let draws: Vec<u64> = (0..4).map(|_| rng.next_u64()).collect();
        assert!(draws.iter().any(|&v| v != 0));
        assert_ne!(rng.state(), [0, 0]);
    }

    proptest! {
        #[test]
        fn prop_derive_is_reproducible(seed in ".{0,24}", salt in ".{0,24}") {
            let mut a = DeterministicRng::derive(&seed, &salt);
            let mut b = DeterministicRng::derive(&seed, &salt);
            for _ in 0..100 {
                prop_assert_eq!(a.next_u64(), b.next_u64());
            }
        }
    }
}
