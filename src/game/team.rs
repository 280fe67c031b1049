//! Team Identity

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Deserialize};

use crate::error::EngineError;

/// One of the two teams. Fixed when a device is constructed.
///
/// The labels `white` / `black` are part of the seed salts, so they are
/// protocol data as well as display text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Team {
    /// First team (white).
    #[serde(rename = "white")]
    First,
    /// Second team (black).
    #[serde(rename = "black")]
    Second,
}

impl Team {
    /// Both teams in turn order.
    pub const ALL: [Team; 2] = [Team::First, Team::Second];

    /// Protocol label used in salts and messages.
    pub fn label(self) -> &'static str {
        match self {
            Team::First => "white",
            Team::Second => "black",
        }
    }

    /// The opposing team.
    pub fn opponent(self) -> Team {
        match self {
            Team::First => Team::Second,
            Team::Second => Team::First,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Team {
    type Err = EngineError;

    /// Case-insensitive; accepts `white`/`black` and `first`/`second`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "white" | "first" => Ok(Team::First),
            "black" | "second" => Ok(Team::Second),
            _ => Err(EngineError::InvalidTeam(s.to_string())),
        }
    }
}
