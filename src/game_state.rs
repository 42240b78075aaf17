//! Immutable snapshot of a hangman game.
//!
//! A [`GameState`] is never mutated. [`GameState::propose_letter`] returns
//! either the same instance (`Cow::Borrowed`) when the letter was already
//! proposed, or a fresh snapshot (`Cow::Owned`).

use crate::debug_log;
use crate::error::GameError;
use std::borrow::Cow;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    InProgress,
    Won,
    Lost,
}

/// True for a non-empty word made only of ASCII letters.
#[must_use]
pub fn is_valid_secret_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_alphabetic())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    secret_word: String,
    proposed_letters: BTreeSet<char>,
    remaining_errors: u32,
    max_errors: u32,
    status: Status,
}

impl GameState {
    /// Starts a game for `secret_word` with an error budget of `max_errors`.
    ///
    /// The word is upper-cased. Fails when the word is empty, when
    /// `max_errors` is zero, or when the word holds anything but ASCII
    /// letters, checked in that order.
    pub fn new(secret_word: &str, max_errors: u32) -> Result<Self, GameError> {
        if secret_word.is_empty() {
            return Err(GameError::EmptySecretWord);
        }
        if max_errors == 0 {
            return Err(GameError::InvalidMaxErrors(max_errors));
        }
        if !is_valid_secret_word(secret_word) {
            return Err(GameError::InvalidSecretWord(secret_word.to_string()));
        }

        Ok(Self {
            secret_word: secret_word.to_ascii_uppercase(),
            proposed_letters: BTreeSet::new(),
            remaining_errors: max_errors,
            max_errors,
            status: Status::InProgress,
        })
    }

    /// Proposes `letter` and returns the resulting state.
    ///
    /// Checks run in this order: finished game, non-letter, repeat. A repeat
    /// returns `Cow::Borrowed(self)`.
    pub fn propose_letter(&self, letter: char) -> Result<Cow<'_, Self>, GameError> {
        if self.status != Status::InProgress {
            return Err(GameError::GameFinished);
        }
        if !letter.is_ascii_alphabetic() {
            return Err(GameError::InvalidLetter(letter));
        }

        let letter = letter.to_ascii_uppercase();
        if self.proposed_letters.contains(&letter) {
            debug_log!("propose_letter() - '{}' already proposed", letter);
            return Ok(Cow::Borrowed(self));
        }

        let mut proposed_letters = self.proposed_letters.clone();
        proposed_letters.insert(letter);

        let remaining_errors = if self.secret_word.contains(letter) {
            self.remaining_errors
        } else {
            self.remaining_errors - 1
        };
        let status = self.compute_status(&proposed_letters, remaining_errors);
        debug_log!(
            "propose_letter() - '{}': remaining_errors={}, status={:?}",
            letter,
            remaining_errors,
            status
        );

        Ok(Cow::Owned(Self {
            secret_word: self.secret_word.clone(),
            proposed_letters,
            remaining_errors,
            max_errors: self.max_errors,
            status,
        }))
    }

    fn compute_status(&self, proposed: &BTreeSet<char>, remaining_errors: u32) -> Status {
        if remaining_errors == 0 {
            Status::Lost
        } else if self.secret_word.chars().all(|c| proposed.contains(&c)) {
            Status::Won
        } else {
            Status::InProgress
        }
    }

    /// Secret word with unrevealed letters shown as `_`, space separated.
    ///
    /// `"JAVA"` with `J` proposed renders as `"J _ _ _"`.
    #[must_use]
    pub fn masked_word(&self) -> String {
        self.secret_word
            .chars()
            .map(|c| if self.proposed_letters.contains(&c) { c } else { '_' })
            .map(String::from)
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[must_use]
    pub fn is_letter_proposed(&self, letter: char) -> bool {
        self.proposed_letters.contains(&letter.to_ascii_uppercase())
    }

    /// Case-insensitive membership in the secret word.
    #[must_use]
    pub fn contains_letter(&self, letter: char) -> bool {
        self.secret_word.contains(letter.to_ascii_uppercase())
    }

    /// Proposed letters that are not in the secret word, alphabetical.
    pub fn missed_letters(&self) -> impl Iterator<Item = char> + '_ {
        self.proposed_letters
            .iter()
            .copied()
            .filter(|c| !self.secret_word.contains(*c))
    }

    #[must_use]
    pub fn secret_word(&self) -> &str {
        &self.secret_word
    }

    #[must_use]
    pub fn proposed_letters(&self) -> &BTreeSet<char> {
        &self.proposed_letters
    }

    #[must_use]
    pub fn remaining_errors(&self) -> u32 {
        self.remaining_errors
    }

    #[must_use]
    pub fn max_errors(&self) -> u32 {
        self.max_errors
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub fn error_count(&self) -> u32 {
        self.max_errors - self.remaining_errors
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status != Status::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn java() -> GameState {
        GameState::new("JAVA", 6).unwrap()
    }

    fn propose_all(state: GameState, letters: &str) -> GameState {
        letters.chars().fold(state, |state, c| {
            state.propose_letter(c).unwrap().into_owned()
        })
    }

    #[test]
    fn test_is_valid_secret_word() {
        assert!(is_valid_secret_word("Hangman"));
        assert!(!is_valid_secret_word(""));
        assert!(!is_valid_secret_word("two words"));
        assert!(!is_valid_secret_word("r2d2"));
        assert!(!is_valid_secret_word("café"));
    }

    #[test]
    fn test_new_state_is_in_progress() {
        let state = java();
        assert_eq!(state.secret_word(), "JAVA");
        assert_eq!(state.max_errors(), 6);
        assert_eq!(state.remaining_errors(), 6);
        assert_eq!(state.status(), Status::InProgress);
        assert!(state.proposed_letters().is_empty());
        assert_eq!(state.error_count(), 0);
    }

    #[test]
    fn test_new_uppercases_secret_word() {
        let state = GameState::new("java", 6).unwrap();
        assert_eq!(state.secret_word(), "JAVA");
    }

    #[test]
    fn test_new_rejects_empty_word() {
        assert_eq!(GameState::new("", 6), Err(GameError::EmptySecretWord));
    }

    #[test]
    fn test_new_rejects_non_letters() {
        let err = GameState::new("JA123VA", 6).unwrap_err();
        assert_eq!(err, GameError::InvalidSecretWord("JA123VA".to_string()));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(GameState::new("JA VA", 6).is_err());
        assert!(GameState::new("CAFÉ", 6).is_err());
    }

    #[test]
    fn test_new_rejects_zero_max_errors() {
        assert_eq!(GameState::new("JAVA", 0), Err(GameError::InvalidMaxErrors(0)));
    }

    #[test]
    fn test_empty_word_reported_before_budget() {
        assert_eq!(GameState::new("", 0), Err(GameError::EmptySecretWord));
    }

    #[test]
    fn test_correct_letter_keeps_errors() {
        let state = java().propose_letter('J').unwrap().into_owned();
        assert!(state.proposed_letters().contains(&'J'));
        assert_eq!(state.remaining_errors(), 6);
        assert_eq!(state.status(), Status::InProgress);
        assert_eq!(state.masked_word(), "J _ _ _");
    }

    #[test]
    fn test_incorrect_letter_costs_one_error() {
        let state = java().propose_letter('Z').unwrap().into_owned();
        assert!(state.proposed_letters().contains(&'Z'));
        assert_eq!(state.remaining_errors(), 5);
        assert_eq!(state.error_count(), 1);
        assert_eq!(state.status(), Status::InProgress);
    }

    #[test]
    fn test_lowercase_letter_stored_uppercase() {
        let state = java().propose_letter('j').unwrap().into_owned();
        assert!(state.proposed_letters().contains(&'J'));
        assert!(!state.proposed_letters().contains(&'j'));
        assert!(state.is_letter_proposed('j'));
        assert!(state.is_letter_proposed('J'));
    }

    #[test]
    fn test_repeat_returns_same_instance() {
        let state = java().propose_letter('J').unwrap().into_owned();
        let again = state.propose_letter('j').unwrap();
        match again {
            Cow::Borrowed(same) => assert!(std::ptr::eq(same, &state)),
            Cow::Owned(_) => panic!("Expected the same instance for a repeated letter"),
        }
    }

    #[test]
    fn test_repeat_wrong_letter_costs_nothing() {
        let state = java().propose_letter('Z').unwrap().into_owned();
        let again = state.propose_letter('Z').unwrap();
        assert_eq!(again.remaining_errors(), 5);
        assert_eq!(again.error_count(), 1);
    }

    #[test]
    fn test_non_letter_rejected() {
        let err = java().propose_letter('1').unwrap_err();
        assert_eq!(err, GameError::InvalidLetter('1'));
        assert!(java().propose_letter(' ').is_err());
        assert!(java().propose_letter('é').is_err());
    }

    #[test]
    fn test_finished_game_rejects_guesses() {
        let won = propose_all(java(), "JAV");
        assert_eq!(won.status(), Status::Won);
        assert_eq!(won.propose_letter('Z'), Err(GameError::GameFinished));
        // repeats are rejected too once the game is over
        assert_eq!(won.propose_letter('J'), Err(GameError::GameFinished));
    }

    #[test]
    fn test_finished_check_precedes_letter_check() {
        let lost = propose_all(java(), "ZXWQBC");
        assert_eq!(lost.propose_letter('1'), Err(GameError::GameFinished));
    }

    #[test]
    fn test_all_occurrences_revealed() {
        let state = GameState::new("BANANA", 6).unwrap();
        let state = state.propose_letter('A').unwrap().into_owned();
        assert_eq!(state.masked_word(), "_ A _ A _ A");
    }

    #[test]
    fn test_single_letter_word_won_in_one_guess() {
        let state = GameState::new("AAAAAA", 6).unwrap();
        let state = state.propose_letter('a').unwrap().into_owned();
        assert_eq!(state.masked_word(), "A A A A A A");
        assert_eq!(state.status(), Status::Won);
    }

    #[test]
    fn test_won_with_errors() {
        let state = propose_all(java(), "ZJXAV");
        assert_eq!(state.status(), Status::Won);
        assert_eq!(state.remaining_errors(), 4);
        assert_eq!(state.missed_letters().collect::<String>(), "XZ");
    }

    #[test]
    fn test_lost_with_one_letter_missing() {
        let state = propose_all(java(), "JVZXWQBC");
        assert_eq!(state.status(), Status::Lost);
        assert_eq!(state.remaining_errors(), 0);
        assert_eq!(state.masked_word(), "J _ V _");
    }

    #[test]
    fn test_masked_word_initial() {
        assert_eq!(java().masked_word(), "_ _ _ _");
    }

    #[test]
    fn test_contains_letter_case_insensitive() {
        let state = java();
        assert!(state.contains_letter('v'));
        assert!(state.contains_letter('V'));
        assert!(!state.contains_letter('z'));
    }

    #[test]
    fn test_transition_leaves_previous_state_untouched() {
        let before = java();
        let after = before.propose_letter('Z').unwrap().into_owned();
        assert_eq!(before.remaining_errors(), 6);
        assert!(before.proposed_letters().is_empty());
        assert_eq!(after.remaining_errors(), 5);
    }

    #[test]
    fn test_complete_game_with_seven_errors() {
        let state = GameState::new("PENDU", 7).unwrap();
        let state = state.propose_letter('E').unwrap().into_owned();
        assert_eq!(state.proposed_letters().len(), 1);
        assert_eq!(state.remaining_errors(), 7);

        let state = state.propose_letter('A').unwrap().into_owned();
        assert_eq!(state.remaining_errors(), 6);

        let state = propose_all(state, "PNDU");
        assert_eq!(state.status(), Status::Won);
        assert_eq!(state.masked_word(), "P E N D U");
    }

    #[test]
    fn test_word_lengths() {
        let short = propose_all(GameState::new("OK", 6).unwrap(), "OK");
        assert_eq!(short.status(), Status::Won);

        let long = GameState::new("ANTICONSTITUTIONNELLEMENT", 10).unwrap();
        assert_eq!(long.secret_word().len(), 25);
    }
}
