use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::config::{Config, DEFAULT_AI_DELAY_MS};
use crate::core::menu::{Menu, MenuResult};
use crate::games::converter::history::DEFAULT_HISTORY_FILE;
use crate::games::converter::rates::DEFAULT_RATES_URL;
use crate::games::guessing::Difficulty;
use crate::games::{self, AppInfo};
use crate::logging;

#[derive(Parser)]
#[command(name = "termtoys")]
#[command(about = "🕹️ A number-guessing duel and a currency converter for the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub settings: Settings,
}

#[derive(Args, Debug, Clone)]
pub struct Settings {
    /// Milliseconds the AI waits before answering
    #[arg(long, global = true, env = "TERMTOYS_AI_DELAY_MS", default_value_t = DEFAULT_AI_DELAY_MS)]
    pub ai_delay_ms: u64,

    /// Exchange rate endpoint; `/{BASE}` is appended per lookup
    #[arg(long, global = true, env = "TERMTOYS_RATES_URL", default_value = DEFAULT_RATES_URL)]
    pub rates_url: String,

    /// Initial conversion history file
    #[arg(long, global = true, env = "TERMTOYS_HISTORY_FILE", default_value = DEFAULT_HISTORY_FILE)]
    pub history_file: String,

    /// Where tracing output goes (the terminal belongs to the UI)
    #[arg(long, global = true, env = "TERMTOYS_LOG_FILE", default_value = "termtoys.log")]
    pub log_file: PathBuf,
}

impl Settings {
    pub fn to_config(&self, difficulty: Difficulty) -> Config {
        Config {
            difficulty,
            ai_delay: Duration::from_millis(self.ai_delay_ms),
            rates_url: self.rates_url.clone(),
            history_file: self.history_file.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play the number-guessing game against the bisection AI
    Guess {
        /// Easy (1-10), Medium (1-50) or Hard (1-100)
        #[arg(short, long, default_value_t = Difficulty::Medium)]
        difficulty: Difficulty,
    },
    /// Open the currency converter
    Convert,
    /// List available apps
    List,
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.settings.log_file)?;

    match cli.command {
        Some(Commands::Guess { difficulty }) => launch("guess", cli.settings.to_config(difficulty)).await,
        Some(Commands::Convert) => launch("convert", cli.settings.to_config(Difficulty::default())).await,
        Some(Commands::List) => {
            println!("🎮 Available apps:");
            println!();
            for entry in games::get_all_apps() {
                println!("📦 {} ({})", entry.info.name, entry.info.id);
                println!("   {}", entry.info.description);
                println!();
            }
            Ok(())
        }
        None => {
            // No subcommand provided - show interactive menu
            let apps: Vec<AppInfo> = games::get_all_apps().into_iter().map(|a| a.info).collect();
            let mut terminal = ratatui::init();
            let picked = Menu::new().run(&mut terminal, &apps);
            ratatui::restore();

            match picked? {
                MenuResult::Launch(id) => launch(id, cli.settings.to_config(Difficulty::default())).await,
                MenuResult::Quit => Ok(()),
            }
        }
    }
}

async fn launch(id: &str, config: Config) -> Result<()> {
    let entry = games::get_app(id).ok_or_else(|| anyhow!("App '{}' not found in registry!", id))?;
    info!(app = id, ?config, "launching");

    let terminal = ratatui::init();
    let result = (entry.initializer)(config, terminal).await;
    ratatui::restore();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guess_subcommand_parses_difficulty() {
        let cli = Cli::try_parse_from(["termtoys", "guess", "--difficulty", "hard", "--ai-delay-ms", "250"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Guess { difficulty: Difficulty::Hard })));

        let config = cli.settings.to_config(Difficulty::Hard);
        assert_eq!(config.ai_delay, Duration::from_millis(250));
        assert_eq!(config.history_file, "conversion_history.txt");
    }

    #[test]
    fn unknown_difficulty_is_rejected() {
        assert!(Cli::try_parse_from(["termtoys", "guess", "-d", "expert"]).is_err());
    }

    #[test]
    fn no_subcommand_opens_menu() {
        let cli = Cli::try_parse_from(["termtoys", "--rates-url", "http://localhost:9000"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.settings.rates_url, "http://localhost:9000");
    }
}
