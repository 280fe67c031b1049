//! Engine Errors
//!
//! Two families: configuration errors stop an engine from being built,
//! input-shape errors reject a single call and leave state untouched.

/// Errors reported by the device engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Team label is not one of the two recognised teams.
    #[error("invalid team {0:?}: expected \"white\" or \"black\"")]
    InvalidTeam(String),

    /// Keyword bank is too small to deal two hands.
    #[error("keyword bank has {found} words, need at least {required}")]
    InsufficientBank {
        /// Words supplied.
        found: usize,
        /// Minimum bank size.
        required: usize,
    },

    /// Keyword appears more than once after normalisation.
    #[error("duplicate keyword {0:?} in bank")]
    DuplicateKeyword(String),

    /// Keyword is empty after trimming.
    #[error("empty keyword at bank index {0}")]
    EmptyKeyword(usize),

    /// Clue set or its code does not have exactly three entries.
    #[error("expected 3 clues and a 3-digit code, got {clues} clues and {code} digits")]
    ClueCountMismatch {
        /// Clues supplied.
        clues: usize,
        /// Code digits supplied.
        code: usize,
    },

    /// Code or guess does not have exactly three digits.
    #[error("code must have 3 digits, got {0}")]
    CodeLength(usize),

    /// Code digit outside 1..=4, or a repeated digit.
    #[error("invalid code {0:?}: digits must be distinct slots 1-4")]
    InvalidCode(Vec<u8>),
}

impl EngineError {
    /// Fatal at construction time.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidTeam(_)
                | EngineError::InsufficientBank { .. }
                | EngineError::DuplicateKeyword(_)
                | EngineError::EmptyKeyword(_)
        )
    }

    /// Recoverable: the offending call was a no-op.
    pub fn is_input_shape(&self) -> bool {
        matches!(
            self,
            EngineError::ClueCountMismatch { .. }
                | EngineError::CodeLength(_)
                | EngineError::InvalidCode(_)
        )
    }
}
