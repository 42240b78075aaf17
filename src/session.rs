//! Front-end agnostic play loop.
//!
//! The loop only talks to the player through [`GameInterface`], so the same
//! rules drive the line-based console and the full-screen terminal UI.

use crate::drawer::HangmanDrawer;
use crate::engine::{GameEngine, Guess};
use crate::error::{ErrorKind, GameError};
use crate::game_state::GameState;
use crate::wordbank::Wordbank;
use crate::{debug_log, info_log};
use clap::ValueEnum;
use rand::Rng;

/// Largest error budget a player may pick.
pub const MAX_ERRORS_LIMIT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GameMode {
    /// Secret word drawn at random from the word bank.
    #[value(name = "single")]
    SinglePlayer,
    /// Player one types the secret word for player two.
    #[value(name = "two")]
    TwoPlayer,
}

/// Answers supplied up front, typically from command line flags.
///
/// Anything left as `None` is asked for at the start of every game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Settings {
    pub max_errors: Option<u32>,
    pub mode: Option<GameMode>,
}

#[must_use]
pub fn is_valid_max_errors(max_errors: u32) -> bool {
    (1..=MAX_ERRORS_LIMIT).contains(&max_errors)
}

/// Everything the play loop needs from a front end.
///
/// Methods returning `Option` yield `None` when the player quits or input ends.
pub trait GameInterface {
    fn display_title(&mut self);
    fn choose_mode(&mut self) -> Option<GameMode>;
    fn read_max_errors(&mut self) -> Option<u32>;
    fn read_secret_word(&mut self) -> Option<String>;
    fn display_state(&mut self, state: &GameState, drawer: &HangmanDrawer);
    fn read_letter(&mut self) -> Option<char>;
    fn display_guess_result(&mut self, guess: &Guess);
    fn display_end_game(&mut self, state: &GameState, drawer: &HangmanDrawer);
    fn display_error(&mut self, message: &str);
    fn ask_play_again(&mut self) -> bool;
    fn display_exit_message(&mut self);
}

enum RoundOutcome {
    Finished,
    Quit,
}

/// Plays games until the player quits or declines a rematch.
///
/// Only engine errors the loop cannot recover from are returned. Rejected
/// input is reported through [`GameInterface::display_error`].
pub fn game_loop<I, R>(
    wordbank: Option<&Wordbank>,
    settings: &Settings,
    interface: &mut I,
    rng: &mut R,
) -> Result<(), GameError>
where
    I: GameInterface + ?Sized,
    R: Rng + ?Sized,
{
    interface.display_title();
    let preset_max_errors = match settings.max_errors {
        Some(max_errors) if !is_valid_max_errors(max_errors) => {
            interface.display_error(&format!(
                "Max errors must be between 1 and {MAX_ERRORS_LIMIT}, got {max_errors}"
            ));
            None
        }
        other => other,
    };

    let mut engine = GameEngine::new();
    loop {
        let Some(mode) = settings.mode.or_else(|| interface.choose_mode()) else {
            break;
        };
        let Some(max_errors) = preset_max_errors.or_else(|| interface.read_max_errors()) else {
            break;
        };
        let Some(secret_word) = pick_secret_word(mode, wordbank, interface, rng) else {
            break;
        };

        if let Err(err) = engine.start_new_game(&secret_word, max_errors) {
            debug_log!("game_loop() - start rejected: {}", err);
            interface.display_error(&err.to_string());
            continue;
        }
        info_log!("game_loop() - {:?} game started", mode);

        let drawer = HangmanDrawer::new(max_errors);
        if let RoundOutcome::Quit = play_round(&mut engine, &drawer, interface)? {
            break;
        }
        if !interface.ask_play_again() {
            break;
        }
    }

    interface.display_exit_message();
    Ok(())
}

fn pick_secret_word<I, R>(
    mode: GameMode,
    wordbank: Option<&Wordbank>,
    interface: &mut I,
    rng: &mut R,
) -> Option<String>
where
    I: GameInterface + ?Sized,
    R: Rng + ?Sized,
{
    match (mode, wordbank) {
        (GameMode::SinglePlayer, Some(bank)) => Some(bank.random_word(rng).to_string()),
        (GameMode::SinglePlayer, None) => {
            interface.display_error("No word bank available, switching to two-player mode");
            interface.read_secret_word()
        }
        (GameMode::TwoPlayer, _) => interface.read_secret_word(),
    }
}

fn play_round<I>(
    engine: &mut GameEngine,
    drawer: &HangmanDrawer,
    interface: &mut I,
) -> Result<RoundOutcome, GameError>
where
    I: GameInterface + ?Sized,
{
    while !engine.is_game_over() {
        let state = engine.current_state().ok_or(GameError::NoGameInProgress)?;
        interface.display_state(state, drawer);

        let Some(letter) = interface.read_letter() else {
            return Ok(RoundOutcome::Quit);
        };
        match engine.guess(letter) {
            Ok(guess) => interface.display_guess_result(&guess),
            Err(err) if err.kind() == ErrorKind::InvalidArgument => {
                interface.display_error(&err.to_string());
            }
            Err(err) => return Err(err),
        }
    }

    if let Some(state) = engine.current_state() {
        interface.display_end_game(state, drawer);
    }
    Ok(RoundOutcome::Finished)
}
