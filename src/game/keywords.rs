//! Keyword Bank and Hands
//!
//! Both devices shuffle the same bank with the same `KEYWORDS` generator,
//! deal the first four words to white and the next four to black, and keep
//! only their own team's hand.

use std::collections::BTreeSet;

use serde::{Serialize, Deserialize};

use crate::core::rng::DeterministicRng;
use crate::error::EngineError;
use crate::game::team::Team;

/// Keywords per hand.
pub const HAND_SIZE: usize = 4;

/// Smallest bank that can deal two disjoint hands.
pub const MIN_BANK_SIZE: usize = HAND_SIZE * 2;

/// Salt for the keyword shuffle.
pub const KEYWORDS_SALT: &str = "KEYWORDS";

/// Normalise a keyword to its canonical form (trimmed, uppercase).
pub fn normalize_keyword(word: &str) -> String {
    word.trim().to_uppercase()
}

/// Validated, normalised keyword bank. Read-only once built.
///
/// Bank order matters: both devices must be fed the same sequence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct KeywordBank {
    words: Vec<String>,
}

impl KeywordBank {
    /// Build a bank from raw words.
    ///
    /// Rejects empty words, duplicates (after normalisation) and banks with
    /// fewer than [`MIN_BANK_SIZE`] entries.
    pub fn new<I, S>(words: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = BTreeSet::new();
        let mut normalized = Vec::new();

        for (index, word) in words.into_iter().enumerate() {
            let word = normalize_keyword(word.as_ref());
            if word.is_empty() {
                return Err(EngineError::EmptyKeyword(index));
            }
            if !seen.insert(word.clone()) {
                return Err(EngineError::DuplicateKeyword(word));
            }
            normalized.push(word);
        }

        if normalized.len() < MIN_BANK_SIZE {
            return Err(EngineError::InsufficientBank {
                found: normalized.len(),
                required: MIN_BANK_SIZE,
            });
        }

        Ok(Self { words: normalized })
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false for a validated bank.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words in bank order.
    pub fn words(&self) -> &[String] {
        &self.words
    }
}

impl TryFrom<Vec<String>> for KeywordBank {
    type Error = EngineError;

    fn try_from(words: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(words)
    }
}

impl From<KeywordBank> for Vec<String> {
    fn from(bank: KeywordBank) -> Self {
        bank.words
    }
}

/// Four keywords belonging to one team, addressed by slot 1..=4.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    words: [String; HAND_SIZE],
}

impl Hand {
    fn from_slice(words: &[String]) -> Self {
        Self {
            words: [
                words[0].clone(),
                words[1].clone(),
                words[2].clone(),
                words[3].clone(),
            ],
        }
    }

    /// Keyword in `slot` (1-based).
    pub fn get(&self, slot: u8) -> Option<&str> {
        let index = usize::from(slot).checked_sub(1)?;
        self.words.get(index).map(String::as_str)
    }

    /// `(slot, keyword)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &str)> + '_ {
        self.words
            .iter()
            .enumerate()
            .map(|(i, w)| (i as u8 + 1, w.as_str()))
    }

    /// Keywords in slot order.
    pub fn words(&self) -> &[String; HAND_SIZE] {
        &self.words
    }

    /// Whether the hand holds `word` (canonical form).
    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }
}

/// Deal both hands from a shuffled copy of `bank`.
///
/// Returns `(white, black)`: positions `[0, 4)` and `[4, 8)` of the
/// shuffled bank.
pub(crate) fn assign(bank: &KeywordBank, rng: &mut DeterministicRng) -> (Hand, Hand) {
    let mut shuffled = bank.words.clone();
    rng.shuffle(&mut shuffled);

    let first = Hand::from_slice(&shuffled[0..HAND_SIZE]);
    let second = Hand::from_slice(&shuffled[HAND_SIZE..MIN_BANK_SIZE]);
    (first, second)
}

/// Deal the hand for `team` from the shared seed.
///
/// The other hand is computed and dropped here, never returned.
pub(crate) fn deal_hand(shared_seed: &str, bank: &KeywordBank, team: Team) -> Hand {
    let mut rng = DeterministicRng::derive(shared_seed, KEYWORDS_SALT);
    let (first, second) = assign(bank, &mut rng);
    match team {
        Team::First => first,
        Team::Second => second,
    }
}
