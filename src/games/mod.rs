pub mod converter;
pub mod guessing;
pub mod macros;

use std::future::Future;
use std::pin::Pin;
use anyhow::Result;
use ratatui::DefaultTerminal;
use crate::config::Config;
use crate::register_apps;

/// Metadata about an app
#[derive(Clone, Debug)]
pub struct AppInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// App initializer function - creates and runs the app
pub type AppInitializer = fn(Config, DefaultTerminal)
    -> Pin<Box<dyn Future<Output = Result<()>>>>;

/// Registry entry containing metadata and initializer
pub struct AppRegistry {
    pub info: AppInfo,
    pub initializer: AppInitializer,
}

// Register all apps here - adding one only needs a new entry
register_apps! {
    guessing => {
        app: GuessingGame,
        id: "guess",
        name: "Number Guessing",
        description: "Race a bisection AI to the secret number"
    },
    converter => {
        app: CurrencyConverter,
        id: "convert",
        name: "Currency Converter",
        description: "Convert amounts with live exchange rates"
    }
}
