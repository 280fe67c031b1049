//! Opponent Clue History
//!
//! The listening team files each clue it hears under the slot the revealed
//! code says it pointed at. Over the rounds this builds, per opponent
//! keyword, the list of clues given for it: the raw material for
//! interceptions.
//!
//! The encrypting team keeps a second, simpler record: the clues it gave
//! itself, round by round, with the slot each one pointed at.

use serde::{Serialize, Deserialize};

use crate::error::EngineError;
use crate::game::code::{RoundCode, CODE_LENGTH};
use crate::game::keywords::HAND_SIZE;

/// Append-only clue history keyed by slot 1..=4.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueLedger {
    slots: [Vec<String>; HAND_SIZE],
    rounds_recorded: u32,
}

impl ClueLedger {
    /// Empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one round of opponent clues against the revealed code.
    ///
    /// `clues[i]` is filed under slot `code[i]`. Clues are trimmed, never
    /// deduplicated, and kept in the order they were revealed. On error
    /// nothing is recorded.
    pub fn record<S: AsRef<str>>(&mut self, clues: &[S], code: &[u8]) -> Result<(), EngineError> {
        if clues.len() != CODE_LENGTH || code.len() != CODE_LENGTH {
            return Err(EngineError::ClueCountMismatch {
                clues: clues.len(),
                code: code.len(),
            });
        }
        let code = RoundCode::try_from(code)?;
        self.record_code(clues, &code)
    }

    /// [`record`](Self::record) with an already validated code.
    pub fn record_code<S: AsRef<str>>(&mut self, clues: &[S], code: &RoundCode) -> Result<(), EngineError> {
        if clues.len() != CODE_LENGTH {
            return Err(EngineError::ClueCountMismatch {
                clues: clues.len(),
                code: CODE_LENGTH,
            });
        }

        for (clue, slot) in clues.iter().zip(code.digits()) {
            self.slots[usize::from(slot) - 1].push(clue.as_ref().trim().to_string());
        }
        self.rounds_recorded += 1;
        Ok(())
    }

    /// Clues heard for `slot` (1-based), oldest first. Empty for unknown slots.
    pub fn history(&self, slot: u8) -> &[String] {
        usize::from(slot)
            .checked_sub(1)
            .and_then(|i| self.slots.get(i))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// `(slot, clues)` for all four slots in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &[String])> + '_ {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, clues)| (i as u8 + 1, clues.as_slice()))
    }

    /// Number of clue sets recorded.
    pub fn rounds_recorded(&self) -> u32 {
        self.rounds_recorded
    }
}

/// One clue the own team gave, and the slot it pointed at.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GivenClue {
    /// Clue text, trimmed.
    pub clue: String,
    /// Slot 1..=4 from the code.
    pub slot: u8,
}

/// All clues the own team gave in one round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GivenRound {
    /// Round the clues were given in.
    pub round: u32,
    /// Clues in code order.
    pub clues: Vec<GivenClue>,
}

/// Own team's given clues, keyed by round, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnClueHistory {
    rounds: Vec<GivenRound>,
}

impl OwnClueHistory {
    /// Empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the clues given in `round` against the own code.
    ///
    /// Same shape checks as [`ClueLedger::record`]. Recording the same round
    /// twice appends a second entry.
    pub fn record<S: AsRef<str>>(
        &mut self,
        round: u32,
        clues: &[S],
        code: &[u8],
    ) -> Result<(), EngineError> {
        if clues.len() != CODE_LENGTH || code.len() != CODE_LENGTH {
            return Err(EngineError::ClueCountMismatch {
                clues: clues.len(),
                code: code.len(),
            });
        }
        let code = RoundCode::try_from(code)?;

        let clues = clues
            .iter()
            .zip(code.digits())
            .map(|(clue, slot)| GivenClue {
                clue: clue.as_ref().trim().to_string(),
                slot,
            })
            .collect();
        self.rounds.push(GivenRound { round, clues });
        Ok(())
    }

    /// Every recorded round, oldest first.
    pub fn rounds(&self) -> &[GivenRound] {
        &self.rounds
    }

    /// Entries recorded for `round`.
    pub fn for_round(&self, round: u32) -> impl Iterator<Item = &GivenRound> + '_ {
        self.rounds.iter().filter(move |r| r.round == round)
    }
}
