//! Command handlers for the kotae CLI.

pub mod ask;
pub mod config;

// Re-export command types for convenience
pub use ask::AskCommand;
pub use config::ConfigCommand;
