//! Game Events
//!
//! Everything a device decides is appended to its event log, so the
//! orchestration layer can announce it and tests can inspect it.

use serde::{Serialize, Deserialize};

use crate::game::code::RoundCode;
use crate::game::resolve::{TokenAward, TokenCounters, TurnOutcome};
use crate::game::state::Outcome;
use crate::game::team::Team;

/// Game event data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEventData {
    /// A turn was resolved on this device.
    TurnResolved {
        outcome: TurnOutcome,
        actual_code: RoundCode,
    },

    /// This device's team received a token.
    TokenAwarded {
        award: TokenAward,
        tokens: TokenCounters,
    },

    /// Opponent clues were filed in the ledger.
    CluesRecorded {
        opponent: Team,
        code: RoundCode,
    },

    /// Own team's given clues were recorded.
    OwnCluesRecorded {
        code: RoundCode,
    },

    /// Round number advanced.
    RoundAdvanced {
        new_round: u32,
    },

    /// This device's team reached a token threshold.
    GameOver {
        outcome: Outcome,
    },
}

/// A game event with the round it happened in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Round when event occurred
    pub round: u32,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(round: u32, data: GameEventData) -> Self {
        Self { round, data }
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}
