//! Error types for the hangman engine and word bank.
//!
//! Game errors fall into two kinds:
//! - `InvalidArgument`: malformed secret word, zero error budget, non-letter guess
//! - `IllegalState`: guessing with no game started, or after the game has ended
//!
//! Neither kind is transient. Retrying with the same input fails the same way.

use thiserror::Error;

/// Broad classification of a [`GameError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller passed a value the rules reject.
    InvalidArgument,
    /// The caller invoked an operation the current game state does not allow.
    IllegalState,
}

/// Errors raised by [`GameState`](crate::game_state::GameState) and
/// [`GameEngine`](crate::engine::GameEngine).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("secret word must not be empty")]
    EmptySecretWord,

    #[error("secret word must contain only letters: {0:?}")]
    InvalidSecretWord(String),

    /// The error budget must be at least one.
    #[error("max errors must be positive, got {0}")]
    InvalidMaxErrors(u32),

    #[error("invalid character: {0:?}")]
    InvalidLetter(char),

    #[error("game already finished")]
    GameFinished,

    #[error("no game in progress")]
    NoGameInProgress,
}

impl GameError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptySecretWord
            | Self::InvalidSecretWord(_)
            | Self::InvalidMaxErrors(_)
            | Self::InvalidLetter(_) => ErrorKind::InvalidArgument,
            Self::GameFinished | Self::NoGameInProgress => ErrorKind::IllegalState,
        }
    }
}

/// Errors raised while loading a word bank.
#[derive(Error, Debug)]
pub enum WordbankError {
    #[error("failed to read word bank: {0}")]
    Io(#[from] std::io::Error),

    #[error("word bank contains no valid words")]
    Empty,
}
