//! Command implementations for the agenda CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod completions;
pub mod config;
pub mod import;
pub mod list;
pub mod lookups;
pub mod query;
pub mod session;
pub mod show;

use std::path::PathBuf;

use agenda_core::EventStore;

use crate::cli::Cli;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Event store error.
    #[error("events error: {0}")]
    Store(#[from] agenda_core::EventStoreError),

    /// Query string or filter error.
    #[error("filter error: {0}")]
    Filter(#[from] agenda_core::filter::FilterError),

    /// Invalid command-line input.
    #[error("{0}")]
    Usage(String),

    /// No event or category matches the given name.
    #[error("{}", lookups::format_not_found_error(resource_type, identifier, suggestion.as_deref()))]
    NotFound {
        /// The kind of thing that was looked up ("event", "category").
        resource_type: &'static str,
        /// The name, ID or slug that was searched for.
        identifier: String,
        /// A close match, if any.
        suggestion: Option<String>,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Events file given on the command line or through `AGENDA_EVENTS`.
    pub events_path: Option<PathBuf>,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color,
            quiet: cli.quiet,
            events_path: cli.events.clone(),
        }
    }

    /// Returns the event store to use.
    ///
    /// Priority: `--events`/`AGENDA_EVENTS`, then `events_path` from the
    /// config file, then the XDG data directory.
    pub fn event_store(&self, config: &config::Config) -> Result<EventStore> {
        if let Some(path) = &self.events_path {
            return Ok(EventStore::with_path(path));
        }
        if let Some(path) = &config.events_path {
            return Ok(EventStore::with_path(path));
        }
        Ok(EventStore::new()?)
    }
}
