//! Device State
//!
//! One [`Engine`] per team device. It owns its hand, its token tally, its
//! notes on the opponent and the round number; nothing is shared with the
//! other device. What both devices must agree on (hands, codes) is
//! recomputed from the shared seed instead.

use std::fmt;

use serde::{Serialize, Deserialize};
use tracing::{debug, info};

use crate::config::DeviceConfig;
use crate::core::hash::sync_fingerprint;
use crate::error::EngineError;
use crate::game::clues::{ClueLedger, OwnClueHistory};
use crate::game::code::{self, RoundCode};
use crate::game::events::{GameEvent, GameEventData};
use crate::game::keywords::{deal_hand, Hand, KeywordBank};
use crate::game::resolve::{self, TokenCounters, TurnOutcome, TOKENS_TO_END};
use crate::game::team::Team;

/// End of game as seen by one device.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Own team collected enough interception tokens.
    Win,
    /// Own team collected enough miscommunication tokens.
    Loss,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win => write!(f, "wins by collecting {TOKENS_TO_END} Interception Tokens"),
            Outcome::Loss => write!(f, "loses by collecting {TOKENS_TO_END} Miscommunication Tokens"),
        }
    }
}

/// Game engine for a single team's device.
///
/// # Protocol
///
/// After each turn, both devices must call [`Engine::resolve_turn`] with the
/// same three codes. Calling it twice for the same turn counts twice; the
/// engine does not track which turns were already resolved.
#[derive(Clone, Debug)]
pub struct Engine {
    shared_seed: String,
    team: Team,
    hand: Hand,
    round: u32,
    tokens: TokenCounters,
    opponent_clues: ClueLedger,
    own_clues: OwnClueHistory,
    events: Vec<GameEvent>,
}

impl Engine {
    /// Build a device for `team`, dealing its hand from `bank`.
    ///
    /// The bank is dropped once the hand is dealt.
    pub fn new(shared_seed: impl Into<String>, team: Team, bank: KeywordBank) -> Self {
        let shared_seed = shared_seed.into();
        let hand = deal_hand(&shared_seed, &bank, team);

        info!(%team, bank_size = bank.len(), "device ready");

        Self {
            shared_seed,
            team,
            hand,
            round: 1,
            tokens: TokenCounters::default(),
            opponent_clues: ClueLedger::new(),
            own_clues: OwnClueHistory::new(),
            events: Vec::new(),
        }
    }

    /// Build from a team label and raw keywords.
    ///
    /// Fails with a configuration error for an unknown team, a bank that is
    /// too small, or a bank with duplicate or empty words.
    pub fn from_words<I, S>(shared_seed: &str, team: &str, words: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let team: Team = team.parse()?;
        let bank = KeywordBank::new(words)?;
        Ok(Self::new(shared_seed, team, bank))
    }

    /// Build from a [`DeviceConfig`] and an already loaded bank.
    pub fn from_config(config: &DeviceConfig, bank: KeywordBank) -> Result<Self, EngineError> {
        let team: Team = config.team.parse()?;
        Ok(Self::new(config.shared_seed.clone(), team, bank))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// This device's team.
    pub fn team(&self) -> Team {
        self.team
    }

    /// Current round (starts at 1).
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Shared seed.
    pub fn shared_seed(&self) -> &str {
        &self.shared_seed
    }

    /// Own team's keywords.
    pub fn keywords(&self) -> &Hand {
        &self.hand
    }

    /// `1: A, 2: B, 3: C, 4: D`
    pub fn keywords_display(&self) -> String {
        self.hand
            .iter()
            .map(|(slot, word)| format!("{slot}: {word}"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Own team's token tally.
    pub fn tokens(&self) -> TokenCounters {
        self.tokens
    }

    /// Clues heard from the opponent.
    pub fn opponent_clues(&self) -> &ClueLedger {
        &self.opponent_clues
    }

    /// Clues this team gave, by round.
    pub fn own_clues(&self) -> &OwnClueHistory {
        &self.own_clues
    }

    /// Event log, oldest first.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Fingerprint of the shared seed and current round.
    ///
    /// Both devices show the same value when they are in sync.
    pub fn sync_fingerprint(&self) -> String {
        sync_fingerprint(&self.shared_seed, self.round)
    }

    // =========================================================================
    // Codes
    // =========================================================================

    /// Code for `team` in the current round.
    ///
    /// Either device can compute either team's code; the orchestration layer
    /// decides who gets to see it.
    pub fn round_code(&self, team: Team) -> RoundCode {
        code::generate(&self.shared_seed, team, self.round)
    }

    /// Own team's code for the current round.
    pub fn own_code(&self) -> RoundCode {
        self.round_code(self.team)
    }

    // =========================================================================
    // Turn resolution
    // =========================================================================

    /// Resolve a turn in which `encrypting` gave the clues.
    ///
    /// - `own_team_guess`: the encrypting team's guess at its own code
    /// - `opposing_interception`: the other team's guess
    /// - `actual_code`: the code the encryptor was given
    ///
    /// All three are validated before anything changes. Only this device's
    /// own counters can move.
    pub fn resolve_turn(
        &mut self,
        own_team_guess: &[u8],
        opposing_interception: &[u8],
        actual_code: &[u8],
        encrypting: Team,
    ) -> Result<TurnOutcome, EngineError> {
        let own_team_guess = RoundCode::try_from(own_team_guess)?;
        let opposing_interception = RoundCode::try_from(opposing_interception)?;
        let actual_code = RoundCode::try_from(actual_code)?;

        Ok(self.resolve_codes(&own_team_guess, &opposing_interception, &actual_code, encrypting))
    }

    /// [`resolve_turn`](Self::resolve_turn) with validated codes.
    pub fn resolve_codes(
        &mut self,
        own_team_guess: &RoundCode,
        opposing_interception: &RoundCode,
        actual_code: &RoundCode,
        encrypting: Team,
    ) -> TurnOutcome {
        let was_over = self.check_game_over();

        let outcome = resolve::resolve_turn(
            own_team_guess,
            opposing_interception,
            actual_code,
            self.round,
            self.team,
            encrypting,
        );

        debug!(
            round = self.round,
            %encrypting,
            deciphered = outcome.deciphered,
            intercepted = ?outcome.intercepted,
            "turn resolved"
        );
        self.push(GameEventData::TurnResolved {
            outcome,
            actual_code: *actual_code,
        });

        if let Some(award) = outcome.award {
            self.tokens.apply(award);
            info!(
                team = %self.team,
                ?award,
                miscommunication = self.tokens.miscommunication,
                interception = self.tokens.interception,
                "token awarded"
            );
            self.push(GameEventData::TokenAwarded {
                award,
                tokens: self.tokens,
            });
        }

        if was_over.is_none() {
            if let Some(result) = self.check_game_over() {
                info!(team = %self.team, %result, "game over");
                self.push(GameEventData::GameOver { outcome: result });
            }
        }

        outcome
    }

    /// Resolve a turn where white gave the clues.
    pub fn resolve_first_team_turn(
        &mut self,
        white_guess: &[u8],
        black_interception: &[u8],
        actual_code: &[u8],
    ) -> Result<TurnOutcome, EngineError> {
        self.resolve_turn(white_guess, black_interception, actual_code, Team::First)
    }

    /// Resolve a turn where black gave the clues.
    pub fn resolve_second_team_turn(
        &mut self,
        black_guess: &[u8],
        white_interception: &[u8],
        actual_code: &[u8],
    ) -> Result<TurnOutcome, EngineError> {
        self.resolve_turn(black_guess, white_interception, actual_code, Team::Second)
    }

    /// File the opponent's clues for this round under their slots.
    pub fn record_opponent_clues<S: AsRef<str>>(
        &mut self,
        clues: &[S],
        correct_code: &[u8],
    ) -> Result<(), EngineError> {
        self.opponent_clues.record(clues, correct_code)?;

        let code = RoundCode::try_from(correct_code)?;
        debug!(round = self.round, %code, "opponent clues recorded");
        self.push(GameEventData::CluesRecorded {
            opponent: self.team.opponent(),
            code,
        });
        Ok(())
    }

    /// Keep the clues this team gave for its own code in the current round.
    pub fn record_own_clues<S: AsRef<str>>(
        &mut self,
        clues: &[S],
        code: &[u8],
    ) -> Result<(), EngineError> {
        self.own_clues.record(self.round, clues, code)?;

        let code = RoundCode::try_from(code)?;
        debug!(round = self.round, %code, "own clues recorded");
        self.push(GameEventData::OwnCluesRecorded { code });
        Ok(())
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Move to the next round and return its number.
    pub fn advance_round(&mut self) -> u32 {
        self.round += 1;
        info!(round = self.round, "advancing round");
        self.push(GameEventData::RoundAdvanced { new_round: self.round });
        self.round
    }

    /// Own team's result, if the game is over for it.
    ///
    /// Interception is checked first, so a device at 2/2 reports a win. The
    /// opponent's result is not visible here.
    pub fn check_game_over(&self) -> Option<Outcome> {
        if self.tokens.interception >= TOKENS_TO_END {
            Some(Outcome::Win)
        } else if self.tokens.miscommunication >= TOKENS_TO_END {
            Some(Outcome::Loss)
        } else {
            None
        }
    }

    /// Announcement for [`check_game_over`](Self::check_game_over).
    pub fn game_over_message(&self) -> Option<String> {
        self.check_game_over().map(|outcome| {
            let end = if outcome == Outcome::Win { "!" } else { "." };
            format!("GAME OVER: Your team ({}) {outcome}{end}", self.team)
        })
    }

    fn push(&mut self, data: GameEventData) {
        self.events.push(GameEvent::new(self.round, data));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::resolve::TokenAward;

    const WORDS: [&str; 8] = [
        "apple", "bridge", "castle", "dragon",
        "eagle", "forest", "guitar", "harbor",
    ];

    fn devices(seed: &str) -> (Engine, Engine) {
        (
            Engine::from_words(seed, "white", WORDS).unwrap(),
            Engine::from_words(seed, "black", WORDS).unwrap(),
        )
    }

    #[test]
    fn test_construction_errors() {
        let err = Engine::from_words("S", "grey", WORDS).unwrap_err();
        assert_eq!(err, EngineError::InvalidTeam("grey".into()));

        let err = Engine::from_words("S", "white", &WORDS[..7]).unwrap_err();
        assert_eq!(err, EngineError::InsufficientBank { found: 7, required: 8 });
    }

    #[test]
    fn test_from_config() {
        let config = DeviceConfig {
            team: "black".into(),
            ..DeviceConfig::default()
        };
        let bank = KeywordBank::new(WORDS).unwrap();
        let engine = Engine::from_config(&config, bank).unwrap();
        assert_eq!(engine.team(), Team::Second);
        assert_eq!(engine.shared_seed(), "NEBULA7");
        assert_eq!(engine.round(), 1);
    }

    #[test]
    fn test_hands_disjoint_across_devices() {
        let (white, black) = devices("NEBULA7");
        for (_, word) in white.keywords().iter() {
            assert!(!black.keywords().contains(word));
        }
        assert_eq!(white.keywords_display(), "1: EAGLE, 2: CASTLE, 3: DRAGON, 4: GUITAR");
    }

    #[test]
    fn test_devices_agree_on_codes() {
        let (mut white, mut black) = devices("NEBULA7");
        for _ in 0..5 {
            for team in Team::ALL {
                assert_eq!(white.round_code(team), black.round_code(team));
            }
            assert_eq!(white.sync_fingerprint(), black.sync_fingerprint());
            white.advance_round();
            black.advance_round();
        }
        assert_eq!(white.own_code(), black.round_code(Team::First));
    }

    #[test]
    fn test_asymmetric_mutation() {
        let (mut white, mut black) = devices("NEBULA7");
        white.advance_round();
        black.advance_round();

        let actual = white.round_code(Team::First).digits();
        let wrong = [actual[1], actual[0], actual[2]];

        // White misses its own code, black intercepts
        let w = white.resolve_first_team_turn(&wrong, &actual, &actual).unwrap();
        let b = black.resolve_first_team_turn(&wrong, &actual, &actual).unwrap();

        assert_eq!(w.award, Some(TokenAward::Miscommunication));
        assert_eq!(b.award, Some(TokenAward::Interception));
        assert_eq!(white.tokens(), TokenCounters { miscommunication: 1, interception: 0 });
        assert_eq!(black.tokens(), TokenCounters { miscommunication: 0, interception: 1 });
    }

    #[test]
    fn test_round_one_interception_suppressed() {
        let (_, mut black) = devices("NEBULA7");
        let actual = black.round_code(Team::First).digits();
        black.resolve_first_team_turn(&actual, &actual, &actual).unwrap();
        assert_eq!(black.tokens(), TokenCounters::default());
    }

    #[test]
    fn test_bad_shapes_leave_state_untouched() {
        let (mut white, _) = devices("NEBULA7");
        let err = white.resolve_turn(&[1, 2], &[1, 2, 3], &[1, 2, 3], Team::First).unwrap_err();
        assert_eq!(err, EngineError::CodeLength(2));
        let err = white.resolve_turn(&[1, 2, 3], &[1, 2, 3], &[1, 1, 3], Team::First).unwrap_err();
        assert!(err.is_input_shape());

        let err = white.record_opponent_clues(&["a", "b"], &[1, 2, 3]).unwrap_err();
        assert!(err.is_input_shape());

        assert_eq!(white.tokens(), TokenCounters::default());
        assert!(white.events().is_empty());
        assert_eq!(white.opponent_clues().rounds_recorded(), 0);
    }

    #[test]
    fn test_double_resolution_double_counts() {
        let (mut white, _) = devices("NEBULA7");
        white.resolve_first_team_turn(&[1, 2, 3], &[1, 2, 3], &[3, 2, 1]).unwrap();
        white.resolve_first_team_turn(&[1, 2, 3], &[1, 2, 3], &[3, 2, 1]).unwrap();
        assert_eq!(white.tokens().miscommunication, 2);
        assert_eq!(white.check_game_over(), Some(Outcome::Loss));
        assert_eq!(
            white.game_over_message().unwrap(),
            "GAME OVER: Your team (white) loses by collecting 2 Miscommunication Tokens."
        );
    }

    #[test]
    fn test_win_takes_precedence() {
        let (mut black, mut white) = {
            let (w, b) = devices("NEBULA7");
            (b, w)
        };
        black.advance_round();
        white.advance_round();

        // Black misses twice, intercepts white twice
        black.resolve_second_team_turn(&[1, 2, 3], &[1, 2, 3], &[3, 2, 1]).unwrap();
        black.resolve_second_team_turn(&[1, 2, 3], &[1, 2, 3], &[3, 2, 1]).unwrap();
        black.resolve_first_team_turn(&[1, 2, 3], &[4, 2, 1], &[4, 2, 1]).unwrap();
        black.resolve_first_team_turn(&[1, 2, 3], &[4, 2, 1], &[4, 2, 1]).unwrap();

        assert_eq!(black.tokens(), TokenCounters { miscommunication: 2, interception: 2 });
        assert_eq!(black.check_game_over(), Some(Outcome::Win));
        assert_eq!(
            black.game_over_message().unwrap(),
            "GAME OVER: Your team (black) wins by collecting 2 Interception Tokens!"
        );

        // White was untouched by black's device
        assert_eq!(white.tokens(), TokenCounters::default());
        assert_eq!(white.check_game_over(), None);
    }

    #[test]
    fn test_game_over_event_emitted_once() {
        let (mut white, _) = devices("NEBULA7");
        for _ in 0..3 {
            white.resolve_first_team_turn(&[1, 2, 3], &[1, 2, 3], &[3, 2, 1]).unwrap();
        }
        let game_overs = white
            .events()
            .iter()
            .filter(|e| matches!(e.data, GameEventData::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
        // Counter keeps counting past the threshold
        assert_eq!(white.tokens().miscommunication, 3);
    }

    #[test]
    fn test_record_opponent_clues() {
        let (mut white, _) = devices("NEBULA7");
        white.record_opponent_clues(&["Fire", "Bricks", "Crown"], &[3, 1, 4]).unwrap();
        white.advance_round();
        white.record_opponent_clues(&["Moat", "Trees", " Scales"], &[1, 2, 3]).unwrap();

        let ledger = white.opponent_clues();
        assert_eq!(ledger.history(1), ["Bricks", "Moat"]);
        assert_eq!(ledger.history(3), ["Fire", "Scales"]);

        let last = white.events().last().unwrap();
        assert_eq!(last.round, 2);
        assert!(matches!(
            last.data,
            GameEventData::CluesRecorded { opponent: Team::Second, .. }
        ));
    }

    #[test]
    fn test_record_own_clues_by_round() {
        let (mut white, _) = devices("NEBULA7");
        let code = white.own_code().digits();
        white.record_own_clues(&["Wings", "Tower", "Dragon's"], &code).unwrap();
        white.advance_round();

        let err = white.record_own_clues(&["Wings"], &code).unwrap_err();
        assert!(err.is_input_shape());

        let rounds = white.own_clues().rounds();
        assert_eq!(rounds.len(), 1);
        assert_eq!(rounds[0].round, 1);
        assert_eq!(rounds[0].clues[0].slot, code[0]);
        assert_eq!(rounds[0].clues[2].clue, "Dragon's");
        // Opponent ledger is a separate record
        assert_eq!(white.opponent_clues().rounds_recorded(), 0);
        assert!(matches!(
            white.events()[0].data,
            GameEventData::OwnCluesRecorded { .. }
        ));
    }

    #[test]
    fn test_engine_keeps_only_own_hand() {
        let (white, black) = devices("NEBULA7");
        let bank = KeywordBank::new(WORDS).unwrap();
        let own = deal_hand("NEBULA7", &bank, Team::First);
        assert_eq!(white.keywords(), &own);
        // Nothing reachable from a device reveals the other hand
        let debug = format!("{white:?}");
        for (_, word) in black.keywords().iter() {
            assert!(!debug.contains(word), "{word} leaked");
        }
    }

    #[test]
    fn test_advance_round_unbounded() {
        let (mut white, _) = devices("NEBULA7");
        for expected in 2..=20 {
            assert_eq!(white.advance_round(), expected);
        }
        assert_eq!(white.round(), 20);
    }
}
