use hangman::cli::{CliInterface, parse_cli};
use hangman::logging::{default_log_path, init_logging};
use hangman::tui::TuiInterface;
use hangman::{GameInterface, Wordbank, game_loop};
use log::{error, info, warn};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = parse_cli();

    if let Some(path) = cli.log_file.clone().or_else(default_log_path)
        && let Err(e) = init_logging(&path)
    {
        eprintln!("Failed to open log file '{}': {e}", path.display());
    }
    info!("hangman {} starting", env!("CARGO_PKG_VERSION"));

    let wordbank = match Wordbank::load(cli.wordbank_path.as_deref()) {
        Ok(bank) => {
            info!("Loaded {} words", bank.len());
            Some(bank)
        }
        Err(e) if cli.wordbank_path.is_some() => {
            let path = cli.wordbank_path.as_deref().map(|p| p.display().to_string());
            eprintln!("Failed to load word bank from '{}': {e}", path.unwrap_or_default());
            return ExitCode::FAILURE;
        }
        Err(e) => {
            // Two-player games still work without a word bank
            warn!("No word bank available: {e}");
            None
        }
    };

    let mut interface: Box<dyn GameInterface> = if cli.tui {
        match TuiInterface::new() {
            Ok(tui) => Box::new(tui),
            Err(e) => {
                eprintln!("Failed to initialize terminal interface: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        Box::new(CliInterface::new(io::stdin().lock(), io::stdout()))
    };

    let result = game_loop(
        wordbank.as_ref(),
        &cli.settings(),
        interface.as_mut(),
        &mut rand::thread_rng(),
    );
    // Restores the terminal before anything is printed
    drop(interface);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Game aborted: {e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
