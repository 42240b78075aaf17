//! Stateful wrapper around the current [`GameState`].

use crate::error::GameError;
use crate::game_state::{GameState, Status};
use crate::debug_log;
use std::borrow::Cow;

/// Result of a single guess, as seen by a front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Guess {
    /// The guessed letter, upper-cased.
    pub letter: char,
    /// Whether the letter occurs in the secret word.
    pub correct: bool,
    /// Whether the letter had already been proposed before this guess.
    pub repeated: bool,
}

/// Holds the snapshot of the game being played.
///
/// The only mutable cell is `current`. It is replaced wholesale when a game
/// starts and whenever a guess produces a new snapshot.
#[derive(Debug, Default)]
pub struct GameEngine {
    current: Option<GameState>,
}

impl GameEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new game, replacing any game in progress.
    ///
    /// On error the previous game, if any, is kept.
    pub fn start_new_game(&mut self, secret_word: &str, max_errors: u32) -> Result<(), GameError> {
        let state = GameState::new(secret_word, max_errors)?;
        debug_log!(
            "start_new_game() - {} letters, {} errors allowed",
            state.secret_word().len(),
            max_errors
        );
        self.current = Some(state);
        Ok(())
    }

    /// Guesses `letter` and reports whether it is in the secret word.
    ///
    /// A repeated letter leaves the state alone but still reports whether
    /// it is in the word.
    pub fn guess_letter(&mut self, letter: char) -> Result<bool, GameError> {
        self.guess(letter).map(|guess| guess.correct)
    }

    pub fn guess(&mut self, letter: char) -> Result<Guess, GameError> {
        let state = self.current.as_ref().ok_or(GameError::NoGameInProgress)?;
        let repeated = state.is_letter_proposed(letter);
        let correct = state.contains_letter(letter);

        let next = match state.propose_letter(letter)? {
            Cow::Owned(next) => Some(next),
            Cow::Borrowed(_) => None,
        };
        if let Some(next) = next {
            debug_log!(
                "guess() - '{}' {}, {} errors left",
                letter.to_ascii_uppercase(),
                if correct { "hit" } else { "missed" },
                next.remaining_errors()
            );
            self.current = Some(next);
        }

        Ok(Guess {
            letter: letter.to_ascii_uppercase(),
            correct,
            repeated,
        })
    }

    #[must_use]
    pub fn current_state(&self) -> Option<&GameState> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.current.as_ref().is_some_and(GameState::is_finished)
    }

    #[must_use]
    pub fn has_won(&self) -> bool {
        self.status() == Some(Status::Won)
    }

    #[must_use]
    pub fn has_lost(&self) -> bool {
        self.status() == Some(Status::Lost)
    }

    fn status(&self) -> Option<Status> {
        self.current.as_ref().map(GameState::status)
    }
}
