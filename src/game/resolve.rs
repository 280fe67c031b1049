//! Turn Resolution
//!
//! Both devices are fed the same three codes after every turn. Each one
//! applies only the award that belongs to its own team, which is how the two
//! token tallies stay correct without being exchanged.

use serde::{Serialize, Deserialize};

use crate::game::code::RoundCode;
use crate::game::team::Team;

/// Tokens that end the game.
pub const TOKENS_TO_END: u32 = 2;

/// Token a device may award to its own team.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenAward {
    /// Own team failed to decipher its own code.
    Miscommunication,
    /// Own team guessed the opponent's code.
    Interception,
}

/// This device's token tally. Starts at zero, only ever grows.
///
/// There is no ceiling: a caller that keeps resolving turns after a
/// game-over check fired will see counts above [`TOKENS_TO_END`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCounters {
    /// Miscommunication tokens.
    pub miscommunication: u32,
    /// Interception tokens.
    pub interception: u32,
}

impl TokenCounters {
    /// Apply an award.
    pub fn apply(&mut self, award: TokenAward) {
        match award {
            TokenAward::Miscommunication => self.miscommunication += 1,
            TokenAward::Interception => self.interception += 1,
        }
    }
}

/// Result of resolving one turn on one device.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOutcome {
    /// Team whose encryptor gave the clues.
    pub encrypting: Team,
    /// Whether the encrypting team guessed its own code.
    pub deciphered: bool,
    /// Whether the listening team intercepted. `None` in round 1.
    pub intercepted: Option<bool>,
    /// Award for the observing device's own team, if any.
    pub award: Option<TokenAward>,
}

/// Resolve a turn from the point of view of `observing`.
///
/// Rules:
/// 1. Encrypting team missed its own code: miscommunication, awarded only
///    on the encrypting team's device.
/// 2. From round 2 on, a correct interception: interception token, awarded
///    only on the listening team's device.
///
/// Both rules cannot fire for the same observer, so at most one award is
/// returned.
pub fn resolve_turn(
    own_team_guess: &RoundCode,
    opposing_interception: &RoundCode,
    actual_code: &RoundCode,
    round: u32,
    observing: Team,
    encrypting: Team,
) -> TurnOutcome {
    let deciphered = own_team_guess == actual_code;
    let intercepted = (round > 1).then(|| opposing_interception == actual_code);

    let award = if observing == encrypting {
        (!deciphered).then_some(TokenAward::Miscommunication)
    } else if intercepted == Some(true) {
        Some(TokenAward::Interception)
    } else {
        None
    };

    TurnOutcome {
        encrypting,
        deciphered,
        intercepted,
        award,
    }
}
