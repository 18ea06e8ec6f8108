pub mod core {
	pub mod app;
	pub mod engine;
	pub mod menu;
}

pub mod cli;
pub mod config;
pub mod games;
pub mod logging;

// Re-export for convenience
pub use crate::core::app::{App, Context};
