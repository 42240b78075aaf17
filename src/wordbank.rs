use crate::error::WordbankError;
use crate::game_state::is_valid_secret_word;
use log::warn;
use rand::Rng;
use rand::seq::SliceRandom;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/wordbank.txt");

/// Trims `line` and returns the upper-cased word, or `None` for blank and
/// invalid lines. Invalid lines are logged with their 1-based number.
fn parse_line(line: &str, line_number: usize) -> Option<String> {
    let word = line.trim();
    if word.is_empty() {
        return None;
    }
    if !is_valid_secret_word(word) {
        warn!("Word bank line {line_number} skipped (invalid word): {word}");
        return None;
    }
    Some(word.to_ascii_uppercase())
}

pub fn load_wordbank_from_str(data: &str) -> Vec<String> {
    data.lines()
        .enumerate()
        .filter_map(|(i, line)| parse_line(line, i + 1))
        .collect()
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>, WordbankError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        if let Some(word) = parse_line(&line?, i + 1) {
            words.push(word);
        }
    }
    Ok(words)
}

/// Per-user word list: `<config dir>/hangman/words.txt`.
#[must_use]
pub fn default_wordbank_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hangman").join("words.txt"))
}

/// A non-empty list of candidate secret words.
#[derive(Debug, Clone)]
pub struct Wordbank {
    words: Vec<String>,
}

impl Wordbank {
    pub fn new(words: Vec<String>) -> Result<Self, WordbankError> {
        if words.is_empty() {
            return Err(WordbankError::Empty);
        }
        Ok(Self { words })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, WordbankError> {
        Self::new(load_wordbank_from_file(path)?)
    }

    pub fn embedded() -> Result<Self, WordbankError> {
        Self::new(load_wordbank_from_str(EMBEDDED_WORDBANK))
    }

    /// Loads `path` if given, else the per-user list if it exists, else the
    /// embedded list.
    pub fn load(path: Option<&Path>) -> Result<Self, WordbankError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        if let Some(path) = default_wordbank_path()
            && path.is_file()
        {
            return Self::from_file(path);
        }
        Self::embedded()
    }

    pub fn random_word<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        // `new` rejects empty lists
        self.words.choose(rng).map_or("", String::as_str)
    }

    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
