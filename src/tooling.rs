//! Tooling Layer
//!
//! The CLI surface over the directory and session stores: parsing, output
//! formatting, and the admin gate checks.

pub mod cli;
pub mod format;

pub use cli::{AgentCommands, Cli, CliContext, Commands, PasswordCommands};
