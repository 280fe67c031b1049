//! # Decrypto Device Engine
//!
//! Game state for one team's device in a two-team Decrypto game, where the
//! two devices never talk to each other.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   DECRYPTO DEVICE ENGINE                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── rng.rs      - Salted seed derivation + Xorshift128+     │
//! │  └── hash.rs     - Stable hashing, sync fingerprint          │
//! │                                                              │
//! │  game/           - Game rules (deterministic)                │
//! │  ├── team.rs     - Team identity                             │
//! │  ├── keywords.rs - Keyword bank and hand dealing             │
//! │  ├── code.rs     - Round code generation                     │
//! │  ├── resolve.rs  - Turn resolution, token tallies            │
//! │  ├── clues.rs    - Opponent and own clue histories           │
//! │  ├── events.rs   - Event log                                 │
//! │  └── state.rs    - Device engine, round lifecycle            │
//! │                                                              │
//! │  config.rs       - Device configuration                      │
//! │  loader.rs       - Keyword file loading                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! Hands and codes are never transmitted. Each device recomputes them from
//! the shared seed and a purpose-specific salt:
//! - SHA-256 seed derivation with a fixed byte layout (no `std::hash`)
//! - All randomness from seeded Xorshift128+
//! - No system time, no process entropy
//!
//! Given the same seed, two devices on any platform deal the same hands and
//! draw the same codes.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod config;
pub mod error;
pub mod loader;

// Re-export commonly used types
pub use crate::core::rng::DeterministicRng;
pub use config::DeviceConfig;
pub use error::EngineError;
pub use game::{Engine, Outcome, RoundCode, Team, KeywordBank, TokenCounters, TurnOutcome};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tokens of either kind that end the game.
pub const TOKENS_TO_END: u32 = game::resolve::TOKENS_TO_END;
