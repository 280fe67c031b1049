//! Game Logic Module
//!
//! All game rules. 100% deterministic.
//!
//! ## Module Structure
//!
//! - `team`: Team identity and labels
//! - `keywords`: Keyword bank, hands, dealing
//! - `code`: Round codes and their generation
//! - `resolve`: Turn resolution and token tallies
//! - `clues`: Opponent clue history and own given clues
//! - `events`: Event log entries
//! - `state`: Per-device engine and round lifecycle

pub mod team;
pub mod keywords;
pub mod code;
pub mod resolve;
pub mod clues;
pub mod events;
pub mod state;

// Re-export key types
pub use team::Team;
pub use keywords::{Hand, KeywordBank};
pub use code::RoundCode;
pub use resolve::{TokenAward, TokenCounters, TurnOutcome};
pub use clues::{ClueLedger, GivenClue, GivenRound, OwnClueHistory};
pub use events::{GameEvent, GameEventData};
pub use state::{Engine, Outcome};
