//! TUI (Terminal User Interface) module for Hangman
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # State Machine
//! The UI follows these state transitions:
//! - `ChoosingMode` → `EnteringMaxErrors` → `EnteringSecretWord` (two players only)
//!   → `EnteringLetter` → `ConfirmingPlayAgain` → back to `ChoosingMode`
//! - Any state can jump to `Exiting` on ESC.

use crate::cli::{LetterInput, MaxErrorsInput, guess_result_message, parse_letter, parse_max_errors};
use crate::drawer::HangmanDrawer;
use crate::engine::Guess;
use crate::game_state::{GameState, Status, is_valid_secret_word};
use crate::session::{GameInterface, GameMode, MAX_ERRORS_LIMIT};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const MAX_SECRET_WORD_LENGTH: usize = 32;
const MAX_ERRORS_DIGITS: usize = 2;
const GALLOWS_WIDTH: u16 = 16;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const FAILURE_STYLE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);
const WORD_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiState {
    ChoosingMode,
    EnteringMaxErrors,
    EnteringSecretWord,
    EnteringLetter,
    ConfirmingPlayAgain,
    Exiting,
}

/// Keys the interface reacts to; everything else is filtered out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyInput {
    Char(char),
    Enter,
    Backspace,
    Esc,
}

/// What the board panels show, copied out of the latest [`GameState`].
#[derive(Debug, Clone, Default)]
struct BoardView {
    gallows: String,
    masked_word: String,
    proposed: String,
    missed: String,
    remaining_errors: u32,
    max_errors: u32,
    status: Option<Status>,
}

fn spaced(letters: impl Iterator<Item = char>) -> String {
    letters.map(String::from).collect::<Vec<_>>().join(" ")
}

impl BoardView {
    fn from_state(state: &GameState, drawer: &HangmanDrawer) -> Self {
        Self {
            gallows: drawer.draw(state.error_count()).to_string(),
            masked_word: state.masked_word(),
            proposed: spaced(state.proposed_letters().iter().copied()),
            missed: spaced(state.missed_letters()),
            remaining_errors: state.remaining_errors(),
            max_errors: state.max_errors(),
            status: state.is_finished().then(|| state.status()),
        }
    }
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    state: TuiState,
    board: Option<&'a BoardView>,
    secret_word: Option<&'a str>,
    input: &'a str,
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and game state display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    state: TuiState,
    board: Option<BoardView>,
    /// Revealed on the board once a game ends.
    secret_word: Option<String>,
    input: String,
    message: String,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: raw mode, alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            state: TuiState::ChoosingMode,
            board: None,
            secret_word: None,
            input: String::new(),
            message: String::new(),
            error_message: String::new(),
            status: "Ready to start".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    /// Draw the current UI state to the terminal.
    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            state: self.state,
            board: self.board.as_ref(),
            secret_word: self.secret_word.as_deref(),
            input: &self.input,
            message: &self.message,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Title
                Constraint::Min(11),    // Gallows and word
                Constraint::Length(4),  // Messages
                Constraint::Length(3),  // Status line
                Constraint::Length(3),  // Instructions
            ])
            .split(f.area());

        let board = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(GALLOWS_WIDTH), Constraint::Min(20)])
            .split(chunks[1]);

        Self::render_title(f, chunks[0]);
        Self::render_gallows(f, board[0], ctx.board);
        Self::render_word(f, board[1], ctx);
        Self::render_messages(f, chunks[2], ctx.message, ctx.error_message);
        Self::render_status(f, chunks[3], ctx.status);
        Self::render_instructions(f, chunks[4], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("HANGMAN")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_gallows(f: &mut Frame, area: Rect, board: Option<&BoardView>) {
        let style = match board.and_then(|b| b.status) {
            Some(Status::Won) => SUCCESS_STYLE,
            Some(Status::Lost) => FAILURE_STYLE,
            _ => Style::default(),
        };
        let gallows = board.map_or("", |b| b.gallows.as_str());
        let paragraph = Paragraph::new(gallows)
            .style(style)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_word(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = Vec::new();

        if let Some(board) = ctx.board {
            lines.push(Line::from(vec![
                Span::raw("Word: "),
                Span::styled(board.masked_word.clone(), WORD_STYLE),
            ]));
            lines.push(Line::from(""));
            lines.push(Line::from(format!(
                "Errors left: {}/{}",
                board.remaining_errors, board.max_errors
            )));
            if !board.proposed.is_empty() {
                lines.push(Line::from(format!("Proposed: {}", board.proposed)));
            }
            if !board.missed.is_empty() {
                lines.push(Line::from(vec![
                    Span::raw("Misses:   "),
                    Span::styled(board.missed.clone(), ERROR_STYLE),
                ]));
            }
            if let (Some(_), Some(word)) = (board.status, ctx.secret_word) {
                lines.push(Line::from(""));
                lines.push(Line::from(format!("The word was: {word}")));
            }
            lines.push(Line::from(""));
        }

        match ctx.state {
            TuiState::ChoosingMode => {
                lines.push(Line::from(Span::styled("Choose a game mode:", HEADER_STYLE)));
                lines.push(Line::from("  1 - One player (random word)"));
                lines.push(Line::from("  2 - Two players (custom word)"));
            }
            TuiState::EnteringMaxErrors => {
                lines.push(Line::from(Span::styled(
                    format!("Errors allowed (1-{MAX_ERRORS_LIMIT}, 6 or 7 recommended):"),
                    HEADER_STYLE,
                )));
                lines.push(Line::from(format!("  > {}_", ctx.input)));
            }
            TuiState::EnteringSecretWord => {
                lines.push(Line::from(Span::styled(
                    "Player 1, type the secret word:",
                    HEADER_STYLE,
                )));
                lines.push(Line::from(format!(
                    "  > {}_",
                    "*".repeat(ctx.input.chars().count())
                )));
            }
            TuiState::EnteringLetter => {
                lines.push(Line::from(Span::styled("Propose a letter", HEADER_STYLE)));
            }
            TuiState::ConfirmingPlayAgain => {
                lines.push(Line::from(Span::styled("Play again? (y/n)", HEADER_STYLE)));
            }
            TuiState::Exiting => {}
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Game").borders(Borders::ALL))
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }

    fn render_messages(f: &mut Frame, area: Rect, message: &str, error_message: &str) {
        let mut lines = Vec::new();
        if !message.is_empty() {
            lines.push(Line::from(vec![Span::styled(message, MESSAGE_STYLE)]));
        }
        if !error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(error_message, ERROR_STYLE)]));
        }
        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
        let text = match state {
            TuiState::ChoosingMode => "1: One player | 2: Two players | ESC: Quit",
            TuiState::EnteringMaxErrors | TuiState::EnteringSecretWord => {
                "Type your answer | ENTER: Submit | BACKSPACE: Erase | ESC: Quit"
            }
            TuiState::EnteringLetter => "Press a letter key to guess | ESC: Quit",
            TuiState::ConfirmingPlayAgain => "Y: Play again | N: Quit",
            TuiState::Exiting => "Goodbye!",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
    }

    /// Polls for one relevant key press.
    fn handle_input(&mut self) -> Result<Option<KeyInput>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        let key = match event::read()? {
            Event::Key(key) => key,
            other => {
                debug_log!("handle_input() - Ignoring non-key event: {:?}", other);
                return Ok(None);
            }
        };

        // Only process Press events, ignore Release and Repeat to avoid double input
        if key.kind != KeyEventKind::Press {
            return Ok(None);
        }
        if Self::has_modifier_keys(&key) {
            debug_log!("handle_input() - Ignoring key with modifier: {:?}", key.modifiers);
            return Ok(None);
        }

        let input = match key.code {
            // Replacement and control characters leak in from escape sequences when alt-tabbing
            KeyCode::Char(c) if c == '\u{FFFD}' || c.is_control() => None,
            KeyCode::Char(c) => Some(KeyInput::Char(c)),
            KeyCode::Enter => Some(KeyInput::Enter),
            KeyCode::Backspace => Some(KeyInput::Backspace),
            KeyCode::Esc => Some(KeyInput::Esc),
            _ => None,
        };
        debug_log!("handle_input() - {:?} -> {:?}", key.code, input);
        Ok(input)
    }

    /// Redraws and blocks until a key arrives. A terminal failure reads as ESC.
    fn wait_for_key(&mut self) -> KeyInput {
        loop {
            if let Err(e) = self.draw() {
                debug_log!("wait_for_key() - Draw failed: {}", e);
                return KeyInput::Esc;
            }
            match self.handle_input() {
                Ok(Some(key)) => return key,
                Ok(None) => {}
                Err(e) => {
                    debug_log!("wait_for_key() - Input error: {}", e);
                    return KeyInput::Esc;
                }
            }
        }
    }

    /// Collects a line of text in `state`. `None` on ESC.
    fn read_text(&mut self, state: TuiState, max_len: usize) -> Option<String> {
        self.state = state;
        self.input.clear();
        loop {
            match self.wait_for_key() {
                KeyInput::Esc => {
                    info_log!("read_text() - ESC pressed in {:?}", state);
                    return None;
                }
                KeyInput::Enter => return Some(std::mem::take(&mut self.input)),
                KeyInput::Backspace => {
                    self.input.pop();
                }
                KeyInput::Char(c) if self.input.chars().count() < max_len => {
                    self.error_message.clear();
                    self.input.push(c);
                }
                KeyInput::Char(_) => {}
            }
        }
    }

    fn set_error(&mut self, message: &str) {
        self.error_message = message.to_string();
        debug_log!("{:?} - {}", self.state, message);
    }
}

impl GameInterface for TuiInterface {
    fn display_title(&mut self) {
        self.message = "Welcome to Hangman!".to_string();
        self.draw_or_log();
    }

    fn choose_mode(&mut self) -> Option<GameMode> {
        self.state = TuiState::ChoosingMode;
        self.status = "Choose a game mode".to_string();
        loop {
            match self.wait_for_key() {
                KeyInput::Char('1') => return Some(GameMode::SinglePlayer),
                KeyInput::Char('2') => return Some(GameMode::TwoPlayer),
                KeyInput::Esc => return None,
                _ => self.set_error("Invalid choice. Press 1 or 2."),
            }
        }
    }

    fn read_max_errors(&mut self) -> Option<u32> {
        self.status = "Choose the error budget".to_string();
        loop {
            let input = self.read_text(TuiState::EnteringMaxErrors, MAX_ERRORS_DIGITS)?;
            match parse_max_errors(&input) {
                MaxErrorsInput::Valid(n) => return Some(n),
                MaxErrorsInput::Exit => return None,
                MaxErrorsInput::NotPositive => self.set_error("The number must be positive."),
                MaxErrorsInput::TooLarge => {
                    self.set_error(&format!("Maximum is {MAX_ERRORS_LIMIT}."));
                }
                MaxErrorsInput::NotANumber => self.set_error("Enter a valid number."),
            }
        }
    }

    fn read_secret_word(&mut self) -> Option<String> {
        self.board = None;
        self.status = "Player 2, look away!".to_string();
        loop {
            let word = self.read_text(TuiState::EnteringSecretWord, MAX_SECRET_WORD_LENGTH)?;
            if is_valid_secret_word(&word) {
                self.message = "Secret word recorded!".to_string();
                return Some(word);
            }
            self.set_error("The word must contain only letters.");
        }
    }

    fn display_state(&mut self, state: &GameState, drawer: &HangmanDrawer) {
        self.board = Some(BoardView::from_state(state, drawer));
        self.secret_word = None;
        self.state = TuiState::EnteringLetter;
        self.status = format!("{} letters to find", state.secret_word().len());
        self.draw_or_log();
    }

    fn read_letter(&mut self) -> Option<char> {
        self.state = TuiState::EnteringLetter;
        loop {
            match self.wait_for_key() {
                KeyInput::Esc => return None,
                KeyInput::Char(c) => match parse_letter(&c.to_string()) {
                    LetterInput::Letter(letter) => {
                        self.error_message.clear();
                        return Some(letter);
                    }
                    _ => self.set_error(&format!("Invalid character '{c}'. Press a letter.")),
                },
                KeyInput::Enter | KeyInput::Backspace => {}
            }
        }
    }

    fn display_guess_result(&mut self, guess: &Guess) {
        self.message = guess_result_message(guess);
        self.draw_or_log();
    }

    fn display_end_game(&mut self, state: &GameState, drawer: &HangmanDrawer) {
        self.board = Some(BoardView::from_state(state, drawer));
        self.secret_word = Some(state.secret_word().to_string());
        match state.status() {
            Status::Won => {
                self.message = format!("You won! You found the word: {}", state.secret_word());
                self.status = "Game Over - Victory".to_string();
            }
            Status::Lost => {
                self.message = format!("You lost. The word was: {}", state.secret_word());
                self.status = "Game Over - Defeat".to_string();
            }
            Status::InProgress => {}
        }
        self.draw_or_log();
    }

    fn display_error(&mut self, message: &str) {
        self.set_error(message);
        self.draw_or_log();
    }

    fn ask_play_again(&mut self) -> bool {
        self.state = TuiState::ConfirmingPlayAgain;
        loop {
            match self.wait_for_key() {
                KeyInput::Char('y' | 'Y' | 'o' | 'O') => {
                    self.message.clear();
                    return true;
                }
                KeyInput::Char('n' | 'N') | KeyInput::Esc => return false,
                _ => {}
            }
        }
    }

    fn display_exit_message(&mut self) {
        self.state = TuiState::Exiting;
        self.message = "Thanks for playing!".to_string();
        self.status = "Exiting application...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
