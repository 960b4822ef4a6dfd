//! Game snapshots as reported by the hangman service.
//!
//! A [`Game`] is immutable: every server response produces a fresh snapshot
//! that replaces the previous one for the same id.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::{debug, instrument};

use crate::error::DecodeError;

/// Lifecycle state of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum GameState {
    /// Guesses are still accepted.
    #[strum(to_string = "in progress")]
    InProgress,
    /// The word was revealed.
    #[strum(to_string = "won")]
    Win,
    /// Guesses ran out.
    #[strum(to_string = "lost")]
    Lose,
}

impl GameState {
    /// Maps the wire code (0, 1, 2) to a state.
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            0 => Some(GameState::InProgress),
            1 => Some(GameState::Win),
            2 => Some(GameState::Lose),
            _ => None,
        }
    }

    /// Wire code of this state.
    pub fn code(self) -> u64 {
        match self {
            GameState::InProgress => 0,
            GameState::Win => 1,
            GameState::Lose => 2,
        }
    }

    /// True for `Win` and `Lose`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameState::InProgress)
    }
}

/// Wire shape of a game object. Every field is required.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GameRecord {
    game_id: u64,
    display_word: String,
    letters_used: String,
    guesses_remaining: u32,
    state: u64,
}

/// One immutable snapshot of a game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Map<String, serde_json::Value>", into = "GameRecord")]
pub struct Game {
    /// Server-assigned identifier.
    game_id: u64,
    /// Word with unrevealed letters masked.
    display_word: String,
    /// Letters guessed so far, in server order.
    used_letters: Vec<String>,
    /// Incorrect guesses left.
    guesses_remaining: u32,
    /// Lifecycle state.
    state: GameState,
}

impl Game {
    /// True once the server reports a win or a loss.
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Guesses spent relative to `max_guesses`.
    pub fn guesses_used(&self, max_guesses: u32) -> u32 {
        max_guesses.saturating_sub(self.guesses_remaining)
    }
}

impl TryFrom<GameRecord> for Game {
    type Error = DecodeError;

    fn try_from(record: GameRecord) -> Result<Self, Self::Error> {
        let state = GameState::from_code(record.state).ok_or_else(|| {
            debug!(state = record.state, "Unknown game state code");
            DecodeError::incomplete()
        })?;

        Ok(Self {
            game_id: record.game_id,
            display_word: record.display_word,
            used_letters: split_letters(&record.letters_used),
            guesses_remaining: record.guesses_remaining,
            state,
        })
    }
}

impl From<Game> for GameRecord {
    fn from(game: Game) -> Self {
        Self {
            game_id: game.game_id,
            display_word: game.display_word,
            letters_used: game.used_letters.join(","),
            guesses_remaining: game.guesses_remaining,
            state: game.state.code(),
        }
    }
}

impl TryFrom<serde_json::Map<String, serde_json::Value>> for Game {
    type Error = DecodeError;

    fn try_from(object: serde_json::Map<String, serde_json::Value>) -> Result<Self, Self::Error> {
        decode_value(&serde_json::Value::Object(object))
    }
}

impl TryFrom<&serde_json::Value> for Game {
    type Error = DecodeError;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        decode_value(value)
    }
}

/// Splits `letters_used` on `,`. An empty string means no letters.
fn split_letters(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(',').map(str::to_string).collect()
}

/// Decodes one game object.
///
/// The payload must be a JSON object. All five fields must be present with
/// the right primitive type and `state` must be 0, 1 or 2. No partial game
/// is ever produced.
#[instrument(skip(value))]
pub fn decode_value(value: &serde_json::Value) -> Result<Game, DecodeError> {
    // Only key-value payloads are games; positional arrays are rejected.
    if !value.is_object() {
        debug!("Game payload is not a JSON object");
        return Err(DecodeError::incomplete());
    }
    let record = GameRecord::deserialize(value).map_err(|e| {
        debug!(error = %e, "Game payload failed validation");
        DecodeError::incomplete()
    })?;
    let game = Game::try_from(record)?;
    debug!(game_id = game.game_id, state = %game.state, "Decoded game");
    Ok(game)
}

/// Parses `body` as JSON, then decodes it as one game object.
#[instrument(skip(body), fields(len = body.len()))]
pub fn decode_str(body: &str) -> Result<Game, DecodeError> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    decode_value(&value)
}
