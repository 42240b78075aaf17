// Library interface for hangman
// This allows integration tests to access internal modules

pub mod cli;
pub mod drawer;
pub mod engine;
pub mod error;
pub mod game_state;
pub mod logging;
pub mod session;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use drawer::HangmanDrawer;
pub use engine::{GameEngine, Guess};
pub use error::{ErrorKind, GameError, WordbankError};
pub use game_state::{GameState, Status};
pub use session::{GameInterface, GameMode, Settings, game_loop};
pub use wordbank::{Wordbank, load_wordbank_from_file, load_wordbank_from_str};
