//! Presentation layer for parley
//!
//! This crate contains the CLI definition, the interactive chat REPL,
//! and console output formatting.

pub mod chat;
pub mod cli;
pub mod output;

// Re-export commonly used types
pub use chat::ChatRepl;
pub use cli::commands::Cli;
pub use output::console::ConsoleFormatter;
