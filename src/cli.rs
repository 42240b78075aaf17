use crate::drawer::HangmanDrawer;
use crate::engine::Guess;
use crate::game_state::{GameState, Status, is_valid_secret_word};
use crate::session::{GameInterface, GameMode, MAX_ERRORS_LIMIT, Settings};
use clap::Parser;
use log::warn;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Lines printed to push a two-player secret word off screen.
const SCROLL_LINES: usize = 50;

/// Hangman CLI options
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited word list
    #[arg(short = 'w', long = "words")]
    pub wordbank_path: Option<PathBuf>,

    /// Number of wrong guesses allowed (1-10); asked before each game when omitted
    #[arg(short = 'm', long = "max-errors")]
    pub max_errors: Option<u32>,

    /// Game mode; asked before each game when omitted
    #[arg(long, value_enum)]
    pub mode: Option<GameMode>,

    /// Use the full-screen terminal interface
    #[arg(long)]
    pub tui: bool,

    /// Log file (defaults to the user cache directory)
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    #[must_use]
    pub fn settings(&self) -> Settings {
        Settings {
            max_errors: self.max_errors,
            mode: self.mode,
        }
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

#[derive(Debug, PartialEq, Eq)]
pub enum LetterInput {
    Letter(char),
    Empty,
    TooLong,
    NotALetter(char),
    Exit,
}

#[derive(Debug, PartialEq, Eq)]
pub enum MaxErrorsInput {
    Valid(u32),
    NotPositive,
    TooLarge,
    NotANumber,
    Exit,
}

fn is_exit_command(input: &str) -> bool {
    input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit")
}

#[must_use]
pub fn parse_letter(input: &str) -> LetterInput {
    let input = input.trim();
    if is_exit_command(input) {
        return LetterInput::Exit;
    }
    let mut chars = input.chars();
    match (chars.next(), chars.next()) {
        (None, _) => LetterInput::Empty,
        (Some(_), Some(_)) => LetterInput::TooLong,
        (Some(c), None) if c.is_ascii_alphabetic() => LetterInput::Letter(c),
        (Some(c), None) => LetterInput::NotALetter(c),
    }
}

#[must_use]
pub fn parse_max_errors(input: &str) -> MaxErrorsInput {
    let input = input.trim();
    if is_exit_command(input) {
        return MaxErrorsInput::Exit;
    }
    match input.parse::<i64>() {
        Ok(n) if n <= 0 => MaxErrorsInput::NotPositive,
        Ok(n) => match u32::try_from(n) {
            Ok(n) if n <= MAX_ERRORS_LIMIT => MaxErrorsInput::Valid(n),
            _ => MaxErrorsInput::TooLarge,
        },
        Err(_) => MaxErrorsInput::NotANumber,
    }
}

#[must_use]
pub fn is_affirmative(input: &str) -> bool {
    matches!(
        input.trim().to_lowercase().as_str(),
        "y" | "yes" | "o" | "oui"
    )
}

/// Reads one trimmed line. `None` at end of input or on a read error.
fn read_trimmed<R: BufRead>(reader: &mut R) -> Option<String> {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_string()),
    }
}

const TITLE_BANNER: &str = "\
╔═══════════════════════════════╗
║            HANGMAN            ║
╚═══════════════════════════════╝";

pub fn display_title<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "\n{TITLE_BANNER}\n")
}

pub fn display_state<W: Write>(
    out: &mut W,
    state: &GameState,
    drawer: &HangmanDrawer,
) -> io::Result<()> {
    writeln!(out, "\n{}", drawer.draw(state.error_count()))?;
    writeln!(out, "\nWord to guess: {}", state.masked_word())?;
    writeln!(
        out,
        "Errors left: {}/{}",
        state.remaining_errors(),
        state.max_errors()
    )?;

    if !state.proposed_letters().is_empty() {
        let letters: Vec<String> = state.proposed_letters().iter().map(char::to_string).collect();
        writeln!(out, "Proposed letters: {}", letters.join(" "))?;
    }
    Ok(())
}

#[must_use]
pub fn guess_result_message(guess: &Guess) -> String {
    if guess.repeated {
        format!("You already proposed the letter '{}'", guess.letter)
    } else if guess.correct {
        format!("Good letter! '{}' is in the word.", guess.letter)
    } else {
        format!("Wrong letter... '{}' is not in the word.", guess.letter)
    }
}

pub fn display_guess_result<W: Write>(out: &mut W, guess: &Guess) -> io::Result<()> {
    writeln!(out, "{}", guess_result_message(guess))
}

pub fn display_end_game<W: Write>(
    out: &mut W,
    state: &GameState,
    drawer: &HangmanDrawer,
) -> io::Result<()> {
    writeln!(out, "\n{}", drawer.draw(state.error_count()))?;
    match state.status() {
        Status::Won => {
            writeln!(out, "\n╔═══════════════════════════════╗")?;
            writeln!(out, "║           YOU WON!            ║")?;
            writeln!(out, "╚═══════════════════════════════╝")?;
            writeln!(out, "\nCongratulations! You found the word: {}", state.secret_word())
        }
        Status::Lost => {
            writeln!(out, "\n╔═══════════════════════════════╗")?;
            writeln!(out, "║           YOU LOST            ║")?;
            writeln!(out, "╚═══════════════════════════════╝")?;
            writeln!(out, "\nThe word was: {}", state.secret_word())
        }
        Status::InProgress => Ok(()),
    }
}

pub fn display_error<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    writeln!(out, "Error: {message}")
}

pub fn display_exit_message<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "\nThanks for playing!")
}

pub fn read_mode<R: BufRead, W: Write>(reader: &mut R, out: &mut W) -> io::Result<Option<GameMode>> {
    loop {
        writeln!(out, "Choose a game mode:")?;
        writeln!(out, "  1 - One player (random word)")?;
        writeln!(out, "  2 - Two players (custom word)")?;
        out.flush()?;
        let Some(input) = read_trimmed(reader) else {
            return Ok(None);
        };
        match input.as_str() {
            "1" => return Ok(Some(GameMode::SinglePlayer)),
            "2" => return Ok(Some(GameMode::TwoPlayer)),
            _ if is_exit_command(&input) => return Ok(None),
            _ => writeln!(out, "Invalid choice. Enter 1 or 2.\n")?,
        }
    }
}

pub fn read_max_errors<R: BufRead, W: Write>(reader: &mut R, out: &mut W) -> io::Result<Option<u32>> {
    loop {
        writeln!(out, "Number of errors allowed (6 or 7 recommended):")?;
        out.flush()?;
        let Some(input) = read_trimmed(reader) else {
            return Ok(None);
        };
        match parse_max_errors(&input) {
            MaxErrorsInput::Valid(n) => return Ok(Some(n)),
            MaxErrorsInput::Exit => return Ok(None),
            MaxErrorsInput::NotPositive => writeln!(out, "The number must be positive.")?,
            MaxErrorsInput::TooLarge => writeln!(out, "Maximum is {MAX_ERRORS_LIMIT}.")?,
            MaxErrorsInput::NotANumber => writeln!(out, "Enter a valid number.")?,
        }
    }
}

pub fn read_secret_word<R: BufRead, W: Write>(reader: &mut R, out: &mut W) -> io::Result<Option<String>> {
    loop {
        writeln!(out, "\nPlayer 1, enter the secret word:")?;
        out.flush()?;
        let Some(word) = read_trimmed(reader) else {
            return Ok(None);
        };
        if is_exit_command(&word) {
            return Ok(None);
        }
        if word.is_empty() {
            writeln!(out, "The word cannot be empty.")?;
            continue;
        }
        if !is_valid_secret_word(&word) {
            writeln!(out, "The word must contain only letters.")?;
            continue;
        }
        write!(out, "{}", "\n".repeat(SCROLL_LINES))?;
        writeln!(out, "Secret word recorded!")?;
        return Ok(Some(word));
    }
}

pub fn read_letter<R: BufRead, W: Write>(reader: &mut R, out: &mut W) -> io::Result<Option<char>> {
    loop {
        writeln!(out, "\nPropose a letter (or 'exit' to quit):")?;
        out.flush()?;
        let Some(input) = read_trimmed(reader) else {
            return Ok(None);
        };
        match parse_letter(&input) {
            LetterInput::Letter(c) => return Ok(Some(c)),
            LetterInput::Exit => return Ok(None),
            LetterInput::Empty => writeln!(out, "You must enter a letter.")?,
            LetterInput::TooLong => writeln!(out, "Enter a single letter.")?,
            LetterInput::NotALetter(c) => writeln!(out, "Invalid character '{c}'. Enter a letter.")?,
        }
    }
}

pub fn read_play_again<R: BufRead, W: Write>(reader: &mut R, out: &mut W) -> io::Result<bool> {
    writeln!(out, "\nPlay again? (y/n):")?;
    out.flush()?;
    Ok(read_trimmed(reader).is_some_and(|input| is_affirmative(&input)))
}

/// Line-based implementation of [`GameInterface`].
///
/// Reads answers from `reader` and writes prompts and boards to `out`.
/// A failed write ends the session as if input had ended.
pub struct CliInterface<R: BufRead, W: Write> {
    reader: R,
    out: W,
}

impl<R: BufRead, W: Write> CliInterface<R, W> {
    pub fn new(reader: R, out: W) -> Self {
        Self { reader, out }
    }

    /// Everything written so far.
    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }
}

/// Logs a failed write; the trait's display methods cannot return it.
fn log_write_error(result: io::Result<()>) {
    if let Err(e) = result {
        warn!("Console write failed: {e}");
    }
}

fn ended_on_write_error<T>(result: io::Result<Option<T>>) -> Option<T> {
    result.unwrap_or_else(|e| {
        warn!("Console write failed: {e}");
        None
    })
}

impl<R: BufRead, W: Write> GameInterface for CliInterface<R, W> {
    fn display_title(&mut self) {
        log_write_error(display_title(&mut self.out));
    }

    fn choose_mode(&mut self) -> Option<GameMode> {
        ended_on_write_error(read_mode(&mut self.reader, &mut self.out))
    }

    fn read_max_errors(&mut self) -> Option<u32> {
        ended_on_write_error(read_max_errors(&mut self.reader, &mut self.out))
    }

    fn read_secret_word(&mut self) -> Option<String> {
        ended_on_write_error(read_secret_word(&mut self.reader, &mut self.out))
    }

    fn display_state(&mut self, state: &GameState, drawer: &HangmanDrawer) {
        log_write_error(display_state(&mut self.out, state, drawer));
    }

    fn read_letter(&mut self) -> Option<char> {
        ended_on_write_error(read_letter(&mut self.reader, &mut self.out))
    }

    fn display_guess_result(&mut self, guess: &Guess) {
        log_write_error(display_guess_result(&mut self.out, guess));
    }

    fn display_end_game(&mut self, state: &GameState, drawer: &HangmanDrawer) {
        log_write_error(display_end_game(&mut self.out, state, drawer));
    }

    fn display_error(&mut self, message: &str) {
        log_write_error(display_error(&mut self.out, message));
    }

    fn ask_play_again(&mut self) -> bool {
        read_play_again(&mut self.reader, &mut self.out).unwrap_or_else(|e| {
            warn!("Console write failed: {e}");
            false
        })
    }

    fn display_exit_message(&mut self) {
        log_write_error(display_exit_message(&mut self.out));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_cli_no_args() {
        let cli = Cli::try_parse_from(["hangman"]).unwrap();
        assert_eq!(cli.wordbank_path, None);
        assert_eq!(cli.max_errors, None);
        assert_eq!(cli.mode, None);
        assert!(!cli.tui);
        assert_eq!(cli.settings(), Settings::default());
    }

    #[test]
    fn test_parse_cli_all_flags() {
        let cli = Cli::try_parse_from([
            "hangman",
            "--words",
            "/path/to/words.txt",
            "-m",
            "7",
            "--mode",
            "two",
            "--tui",
            "--log-file",
            "/tmp/hangman.log",
        ])
        .unwrap();
        assert_eq!(cli.wordbank_path, Some(PathBuf::from("/path/to/words.txt")));
        assert!(cli.tui);
        assert_eq!(
            cli.settings(),
            Settings {
                max_errors: Some(7),
                mode: Some(GameMode::TwoPlayer),
            }
        );
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/hangman.log")));
    }

    #[test]
    fn test_parse_cli_rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["hangman", "--mode", "three"]).is_err());
    }

    #[test]
    fn test_parse_letter() {
        assert_eq!(parse_letter("a"), LetterInput::Letter('a'));
        assert_eq!(parse_letter("  Z  "), LetterInput::Letter('Z'));
        assert_eq!(parse_letter(""), LetterInput::Empty);
        assert_eq!(parse_letter("   "), LetterInput::Empty);
        assert_eq!(parse_letter("ab"), LetterInput::TooLong);
        assert_eq!(parse_letter("7"), LetterInput::NotALetter('7'));
        assert_eq!(parse_letter("é"), LetterInput::NotALetter('é'));
        assert_eq!(parse_letter("EXIT"), LetterInput::Exit);
        assert_eq!(parse_letter("quit"), LetterInput::Exit);
    }

    #[test]
    fn test_parse_max_errors() {
        assert_eq!(parse_max_errors("6"), MaxErrorsInput::Valid(6));
        assert_eq!(parse_max_errors(" 10 "), MaxErrorsInput::Valid(10));
        assert_eq!(parse_max_errors("0"), MaxErrorsInput::NotPositive);
        assert_eq!(parse_max_errors("-3"), MaxErrorsInput::NotPositive);
        assert_eq!(parse_max_errors("11"), MaxErrorsInput::TooLarge);
        assert_eq!(parse_max_errors("99999999999"), MaxErrorsInput::TooLarge);
        assert_eq!(parse_max_errors("six"), MaxErrorsInput::NotANumber);
        assert_eq!(parse_max_errors("exit"), MaxErrorsInput::Exit);
    }

    #[test]
    fn test_is_affirmative() {
        for yes in ["y", "YES", "o", "Oui", " yes "] {
            assert!(is_affirmative(yes), "{yes} should be affirmative");
        }
        for no in ["n", "no", "", "maybe"] {
            assert!(!is_affirmative(no), "{no} should not be affirmative");
        }
    }

    #[test]
    fn test_guess_result_message() {
        let repeated = Guess {
            letter: 'J',
            correct: true,
            repeated: true,
        };
        assert_eq!(
            guess_result_message(&repeated),
            "You already proposed the letter 'J'"
        );
        let miss = Guess {
            letter: 'Z',
            correct: false,
            repeated: false,
        };
        assert!(guess_result_message(&miss).starts_with("Wrong letter"));
    }

    fn read_with<T>(
        input: &'static str,
        read: impl FnOnce(&mut Cursor<&'static str>, &mut Vec<u8>) -> io::Result<T>,
    ) -> (T, String) {
        let mut reader = Cursor::new(input);
        let mut out = Vec::new();
        let value = read(&mut reader, &mut out).unwrap();
        (value, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_read_letter_skips_invalid_input() {
        let (letter, transcript) = read_with("\nab\n3\nk\n", read_letter);
        assert_eq!(letter, Some('k'));
        assert!(transcript.contains("You must enter a letter."));
        assert!(transcript.contains("Enter a single letter."));
        assert!(transcript.contains("Invalid character '3'. Enter a letter."));
    }

    #[test]
    fn test_read_letter_end_of_input() {
        let (letter, _) = read_with("", read_letter);
        assert_eq!(letter, None);
    }

    #[test]
    fn test_read_mode() {
        let (mode, transcript) = read_with("3\n2\n", read_mode);
        assert_eq!(mode, Some(GameMode::TwoPlayer));
        assert!(transcript.contains("Invalid choice. Enter 1 or 2."));
        assert_eq!(read_with("1\n", read_mode).0, Some(GameMode::SinglePlayer));
        assert_eq!(read_with("exit\n", read_mode).0, None);
    }

    #[test]
    fn test_read_max_errors_reprompts() {
        let (max_errors, transcript) = read_with("0\n12\nabc\n7\n", read_max_errors);
        assert_eq!(max_errors, Some(7));
        assert!(transcript.contains("The number must be positive."));
        assert!(transcript.contains("Maximum is 10."));
        assert!(transcript.contains("Enter a valid number."));
    }

    #[test]
    fn test_read_secret_word_validates() {
        let (word, transcript) = read_with("\nj4va\nrust\n", read_secret_word);
        assert_eq!(word, Some("rust".to_string()));
        assert!(transcript.contains("The word cannot be empty."));
        assert!(transcript.contains("The word must contain only letters."));
        assert!(transcript.ends_with("Secret word recorded!\n"));
    }

    #[test]
    fn test_read_play_again() {
        assert!(read_with("y\n", read_play_again).0);
        assert!(!read_with("n\n", read_play_again).0);
        let (again, transcript) = read_with("", read_play_again);
        assert!(!again);
        assert!(transcript.contains("Play again? (y/n):"));
    }

    #[test]
    fn test_display_end_game() {
        let drawer = HangmanDrawer::new(6);
        let won = GameState::new("ok", 6).unwrap();
        let won = won.propose_letter('o').unwrap().into_owned();
        let won = won.propose_letter('k').unwrap().into_owned();
        let mut out = Vec::new();
        display_end_game(&mut out, &won, &drawer).unwrap();
        let transcript = String::from_utf8(out).unwrap();
        assert!(transcript.contains("YOU WON!"));
        assert!(transcript.contains("Congratulations! You found the word: OK"));

        let lost = GameState::new("ok", 1).unwrap();
        let lost = lost.propose_letter('z').unwrap().into_owned();
        let mut out = Vec::new();
        display_end_game(&mut out, &lost, &HangmanDrawer::new(1)).unwrap();
        let transcript = String::from_utf8(out).unwrap();
        assert!(transcript.contains("YOU LOST"));
        assert!(transcript.contains("The word was: OK"));
    }

    #[test]
    fn test_display_state_lists_proposed_letters() {
        let state = GameState::new("java", 6).unwrap();
        let state = state.propose_letter('a').unwrap();
        let mut out = Vec::new();
        display_state(&mut out, &state, &HangmanDrawer::new(6)).unwrap();
        let transcript = String::from_utf8(out).unwrap();
        assert!(transcript.contains("Word to guess: _ A _ A"));
        assert!(transcript.contains("Errors left: 6/6"));
        assert!(transcript.contains("Proposed letters: A"));
    }

    #[test]
    fn test_cli_interface_writes_to_output() {
        let mut interface = CliInterface::new(Cursor::new("q\n"), Vec::new());
        interface.display_title();
        assert_eq!(interface.read_letter(), Some('q'));
        interface.display_error("boom");
        let transcript = String::from_utf8(interface.into_output()).unwrap();
        assert!(transcript.contains("HANGMAN"));
        assert!(transcript.contains("Propose a letter"));
        assert!(transcript.contains("Error: boom"));
    }
}
