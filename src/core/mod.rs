//! Core deterministic primitives.
//!
//! Everything a device derives from the shared seed flows through this
//! module. The byte layouts hashed here are part of the protocol between
//! devices and must stay stable across versions.

pub mod rng;
pub mod hash;

// Re-export core types
pub use rng::{DeterministicRng, derive_seed};
pub use hash::sync_fingerprint;
