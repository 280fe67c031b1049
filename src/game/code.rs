//! Round Codes
//!
//! A code is an ordered pick of three distinct slots out of 1..=4. Position
//! `i` of the code says which keyword the encryptor's `i`-th clue points at.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Deserialize};

use crate::core::rng::DeterministicRng;
use crate::error::EngineError;
use crate::game::team::Team;

/// Digits per code.
pub const CODE_LENGTH: usize = 3;

/// Slots a code draws from.
pub const SLOTS: [u8; 4] = [1, 2, 3, 4];

/// Three distinct slots in clue order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct RoundCode([u8; CODE_LENGTH]);

impl RoundCode {
    /// Validate and wrap three digits.
    pub fn new(digits: [u8; CODE_LENGTH]) -> Result<Self, EngineError> {
        let in_range = digits.iter().all(|d| SLOTS.contains(d));
        let distinct = digits[0] != digits[1] && digits[0] != digits[2] && digits[1] != digits[2];
        if in_range && distinct {
            Ok(Self(digits))
        } else {
            Err(EngineError::InvalidCode(digits.to_vec()))
        }
    }

    /// Digits in clue order.
    pub fn digits(&self) -> [u8; CODE_LENGTH] {
        self.0
    }

    /// Slot targeted by clue position `index` (0-based).
    pub fn slot_at(&self, index: usize) -> Option<u8> {
        self.0.get(index).copied()
    }
}

impl TryFrom<&[u8]> for RoundCode {
    type Error = EngineError;

    fn try_from(digits: &[u8]) -> Result<Self, Self::Error> {
        let digits: [u8; CODE_LENGTH] = digits
            .try_into()
            .map_err(|_| EngineError::CodeLength(digits.len()))?;
        Self::new(digits)
    }
}

impl TryFrom<Vec<u8>> for RoundCode {
    type Error = EngineError;

    fn try_from(digits: Vec<u8>) -> Result<Self, Self::Error> {
        Self::try_from(digits.as_slice())
    }
}

impl From<RoundCode> for Vec<u8> {
    fn from(code: RoundCode) -> Self {
        code.0.to_vec()
    }
}

impl fmt::Display for RoundCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.0[0], self.0[1], self.0[2])
    }
}

impl FromStr for RoundCode {
    type Err = EngineError;

    /// Accepts `421`, `4 2 1`, `4-2-1` or `4,2,1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut digits = Vec::with_capacity(CODE_LENGTH);
        for c in s.chars() {
            match c {
                ' ' | '-' | ',' => continue,
                '0'..='9' => digits.push(c as u8 - b'0'),
                _ => return Err(EngineError::InvalidCode(s.bytes().collect())),
            }
        }
        Self::try_from(digits.as_slice())
    }
}

/// Salt for one team's code in one round, e.g. `CODE-white-ROUND2`.
pub fn code_salt(team: Team, round: u32) -> String {
    format!("CODE-{}-ROUND{}", team.label(), round)
}

/// Draw a code from an already derived generator.
pub fn draw_code(rng: &mut DeterministicRng) -> RoundCode {
    let sample = rng.sample_distinct(&SLOTS, CODE_LENGTH);
    RoundCode([sample[0], sample[1], sample[2]])
}

/// Generate `team`'s code for `round`.
///
/// Pure function of `(shared_seed, team, round)`: every device, on either
/// team, gets the same code.
pub fn generate(shared_seed: &str, team: Team, round: u32) -> RoundCode {
    let mut rng = DeterministicRng::derive(shared_seed, &code_salt(team, round));
    draw_code(&mut rng)
}
