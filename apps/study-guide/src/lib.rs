//! Study guide application: content sources, progress storage and the
//! commands the CLI is built on.

pub mod commands;
pub mod config;
pub mod content;
pub mod logging;
pub mod state;
pub mod store;
pub mod tracker;

pub use commands::{dispatch, Command, CommandError, CommandOutput};
pub use config::{Config, ConfigError};
pub use state::AppState;
