//! Command dispatch module for routing CLI commands to their handlers.
//!
//! Commands split by whether they read the event catalog. Catalog commands
//! run against a [`Session`] loaded once per invocation; the rest never
//! touch the events file (import only writes it).

use agenda_core::filter::DateWindow;

use crate::cli::{Cli, Commands, ConfigCommands, Shell};
use crate::commands::import::ImportOptions;
use crate::commands::list::ListOptions;
use crate::commands::query::StateOptions;
use crate::commands::session::Session;
use crate::commands::show::ShowOptions;
use crate::commands::{self, CommandContext, CommandError, Result};

/// Trait for commands that don't need the event catalog.
pub trait StandaloneCommand {
    /// Execute the command.
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// Trait for commands that read the event catalog.
pub trait CatalogCommand {
    /// Execute the command against a loaded session.
    fn execute(&self, ctx: &CommandContext, session: &Session) -> Result<()>;
}

/// Commands that don't need the event catalog.
pub enum StandaloneDispatch<'a> {
    Query(StateOptions),
    Import(ImportOptions),
    Config(&'a Option<ConfigCommands>),
    Completions(&'a Shell),
    Help,
}

impl<'a> StandaloneDispatch<'a> {
    /// Try to create a standalone dispatch from the CLI command.
    /// Returns None if the command reads the catalog.
    pub fn try_from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Query {
                query,
                search,
                toggle_category,
                date,
                clear,
            }) => Some(Self::Query(StateOptions {
                query: query.clone(),
                search: search.clone(),
                select_categories: Vec::new(),
                toggle_categories: toggle_category.clone(),
                date: date.map(DateWindow::from),
                clear: *clear,
            })),
            Some(Commands::Import { rows, output }) => Some(Self::Import(ImportOptions {
                rows: rows.clone(),
                output: output.clone(),
            })),
            Some(Commands::Config { command }) => Some(Self::Config(command)),
            Some(Commands::Completions { shell }) => Some(Self::Completions(shell)),
            None => Some(Self::Help),
            _ => None,
        }
    }
}

impl StandaloneCommand for StandaloneDispatch<'_> {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::Query(opts) => commands::query::execute(ctx, opts),
            Self::Import(opts) => commands::import::execute(ctx, opts),
            Self::Config(command) => dispatch_config(ctx, command),
            Self::Completions(shell) => {
                commands::completions::execute(shell).map_err(CommandError::Io)
            }
            Self::Help => {
                if !ctx.quiet {
                    println!("agenda - Maceió events agenda");
                    println!("Use --help for usage information");
                }
                Ok(())
            }
        }
    }
}

/// Dispatch config subcommands.
fn dispatch_config(ctx: &CommandContext, command: &Option<ConfigCommands>) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::execute_show(ctx),
        Some(ConfigCommands::Set { key, value }) => {
            let opts = commands::config::ConfigSetOptions {
                key: key.clone(),
                value: value.clone(),
            };
            commands::config::execute_set(ctx, &opts)
        }
        Some(ConfigCommands::Path) => commands::config::execute_path(ctx),
    }
}

/// Commands that read the event catalog.
pub enum CatalogDispatch {
    List(ListOptions),
    Show(ShowOptions),
}

impl CatalogDispatch {
    /// Create a catalog dispatch from the CLI command.
    /// Returns None for commands handled by [`StandaloneDispatch`].
    pub fn from_cli(cli: &Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::List {
                query,
                search,
                category,
                date,
                limit,
                all,
            }) => Some(Self::List(ListOptions {
                state: StateOptions {
                    query: query.clone(),
                    search: search.clone(),
                    select_categories: category.clone(),
                    toggle_categories: Vec::new(),
                    date: date.map(DateWindow::from),
                    clear: false,
                },
                limit: *limit,
                all: *all,
            })),
            Some(Commands::Show { event }) => Some(Self::Show(ShowOptions {
                event: event.clone(),
            })),
            _ => None,
        }
    }
}

impl CatalogCommand for CatalogDispatch {
    fn execute(&self, ctx: &CommandContext, session: &Session) -> Result<()> {
        match self {
            Self::List(opts) => commands::list::execute(ctx, opts, session),
            Self::Show(opts) => commands::show::execute(ctx, opts, session),
        }
    }
}
