//! CLI module
//!
//! Command-line demo driving the engine over an in-memory source.
//!
//! # Commands
//!
//! - `run` - Paginate a generated list with flags
//! - `scenario` - Paginate with parameters from a YAML file

mod commands;
mod runner;
mod scenario;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::{describe, execute, Runner};
pub use scenario::Scenario;

#[cfg(test)]
mod tests;
