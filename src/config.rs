/// Runtime settings handed to every app constructor
use std::time::Duration;

use crate::games::converter::history::DEFAULT_HISTORY_FILE;
use crate::games::converter::rates::DEFAULT_RATES_URL;
use crate::games::guessing::Difficulty;

pub const DEFAULT_AI_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone)]
pub struct Config {
    /// Difficulty preselected in the guessing game picker.
    pub difficulty: Difficulty,
    /// Pause before the AI answers a player's miss.
    pub ai_delay: Duration,
    /// Endpoint serving `{rates_url}/{BASE}` rate tables.
    pub rates_url: String,
    /// Initial value of the converter's save-filename field.
    pub history_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            ai_delay: Duration::from_millis(DEFAULT_AI_DELAY_MS),
            rates_url: DEFAULT_RATES_URL.to_string(),
            history_file: DEFAULT_HISTORY_FILE.to_string(),
        }
    }
}
