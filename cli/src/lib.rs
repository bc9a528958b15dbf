//! Command-line front end for the subscriptions API.

pub mod command;
pub mod config;
pub mod logger;

pub use command::{report, run, Cli, Command};
pub use config::{ConfigError, FileConfig, Settings};
