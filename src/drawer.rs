//! ASCII gallows, one stage per error.

const GALLOWS_TOP: &str = "  +---+\n  |   |\n";
const GALLOWS_BASE: &str = "=========";
const EMPTY_ROW: &str = "      |\n";

/// Rows under the beam for a six-error game, one figure per stage.
const SIX_ERROR_FIGURES: [[&str; 4]; 7] = [
    ["      |", "      |", "      |", "      |"],
    ["  O   |", "      |", "      |", "      |"],
    ["  O   |", "  |   |", "      |", "      |"],
    ["  O   |", " /|   |", "      |", "      |"],
    ["  O   |", " /|\\  |", "      |", "      |"],
    ["  O   |", " /|\\  |", " /    |", "      |"],
    ["  O   |", " /|\\  |", " / \\  |", "      |"],
];

/// Seven-error games add a torso before the legs.
const SEVEN_ERROR_FIGURES: [[&str; 4]; 8] = [
    ["      |", "      |", "      |", "      |"],
    ["  O   |", "      |", "      |", "      |"],
    ["  O   |", "  |   |", "      |", "      |"],
    ["  O   |", " /|   |", "      |", "      |"],
    ["  O   |", " /|\\  |", "      |", "      |"],
    ["  O   |", " /|\\  |", "  |   |", "      |"],
    ["  O   |", " /|\\  |", "  |   |", " /    |"],
    ["  O   |", " /|\\  |", "  |   |", " / \\  |"],
];

fn render_figure(rows: &[&str; 4]) -> String {
    let mut stage = String::from(GALLOWS_TOP);
    for row in rows {
        stage.push_str(row);
        stage.push('\n');
    }
    stage.push_str(GALLOWS_BASE);
    stage
}

fn render_counter(errors: u32, max_errors: u32) -> String {
    format!(
        "{GALLOWS_TOP}{}{GALLOWS_BASE}\nErrors: {errors}/{max_errors}",
        EMPTY_ROW.repeat(4)
    )
}

/// Precomputed gallows drawings for a given error budget.
#[derive(Debug, Clone)]
pub struct HangmanDrawer {
    stages: Vec<String>,
}

impl HangmanDrawer {
    /// Budgets of 6 and 7 get a full figure. Any other budget shows an
    /// empty gallows with an error counter.
    #[must_use]
    pub fn new(max_errors: u32) -> Self {
        let stages = match max_errors {
            6 => SIX_ERROR_FIGURES.iter().map(render_figure).collect(),
            7 => SEVEN_ERROR_FIGURES.iter().map(render_figure).collect(),
            _ => (0..=max_errors)
                .map(|errors| render_counter(errors, max_errors))
                .collect(),
        };
        Self { stages }
    }

    /// Drawing for `error_count`, clamped to the final stage.
    #[must_use]
    pub fn draw(&self, error_count: u32) -> &str {
        let index = usize::try_from(error_count)
            .unwrap_or(usize::MAX)
            .min(self.stages.len() - 1);
        &self.stages[index]
    }

    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }
}
