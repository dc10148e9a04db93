//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the agenda CLI.

use std::path::PathBuf;

use agenda_core::filter::DateWindow;
use clap::{Parser, Subcommand, ValueEnum};

/// agenda - Browse the Maceió events agenda from the terminal
#[derive(Parser, Debug)]
#[command(name = "agenda")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Events file (default: from config, then the XDG data dir)
    #[arg(long, global = true, env = "AGENDA_EVENTS")]
    pub events: Option<PathBuf>,

    /// Pin the reference instant, e.g. 2025-01-08 or 2025-01-08T19:30
    #[arg(long, global = true)]
    pub now: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List upcoming events
    #[command(alias = "l")]
    List {
        /// Start from a shared query string (e.g. "categories=SHOW&date=weekend")
        #[arg(long)]
        query: Option<String>,

        /// Search title, venue and description
        #[arg(short, long)]
        search: Option<String>,

        /// Only show this category (repeatable)
        #[arg(short, long, action = clap::ArgAction::Append)]
        category: Vec<String>,

        /// Date window
        #[arg(short, long, value_enum)]
        date: Option<DateArg>,

        /// Limit results (default: from config, or 50)
        #[arg(long)]
        limit: Option<usize>,

        /// Show all matching events (no limit)
        #[arg(long, conflicts_with = "limit")]
        all: bool,
    },

    /// Show event details
    #[command(alias = "s")]
    Show {
        /// Event ID or slug (e.g. 2025-01-10-forro-na-orla)
        event: String,
    },

    /// Normalize a query string, optionally changing it
    #[command(alias = "q")]
    Query {
        /// Query string to start from (default: empty)
        query: Option<String>,

        /// Set the search text (an empty value clears it)
        #[arg(short, long)]
        search: Option<String>,

        /// Toggle a category on or off (repeatable)
        #[arg(short, long, action = clap::ArgAction::Append)]
        toggle_category: Vec<String>,

        /// Date window
        #[arg(short, long, value_enum)]
        date: Option<DateArg>,

        /// Reset every filter before applying the other flags
        #[arg(long)]
        clear: bool,
    },

    /// Import spreadsheet rows into the events file
    Import {
        /// JSON file with the sheet rows (Sheets API response or array of rows)
        rows: PathBuf,

        /// Write to this file instead of the configured events file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// View and edit configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Date windows accepted on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateArg {
    All,
    Today,
    Tomorrow,
    ThisWeek,
    Weekend,
    NextWeek,
}

impl From<DateArg> for DateWindow {
    fn from(arg: DateArg) -> Self {
        match arg {
            DateArg::All => DateWindow::All,
            DateArg::Today => DateWindow::Today,
            DateArg::Tomorrow => DateWindow::Tomorrow,
            DateArg::ThisWeek => DateWindow::ThisWeek,
            DateArg::Weekend => DateWindow::Weekend,
            DateArg::NextWeek => DateWindow::NextWeek,
        }
    }
}

/// Shell types for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,

        /// Configuration value
        value: String,
    },

    /// Print config file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["agenda", "--verbose", "list"]);
        assert!(cli.verbose);
        assert!(!cli.quiet);
        assert!(!cli.json);

        let cli = Cli::parse_from(["agenda", "--quiet", "--json", "list"]);
        assert!(!cli.verbose);
        assert!(cli.quiet);
        assert!(cli.json);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["agenda", "-v", "-q", "list"]).is_err());
    }

    #[test]
    fn test_events_and_now_flags() {
        let cli = Cli::parse_from([
            "agenda",
            "--events",
            "/tmp/events.json",
            "--now",
            "2025-01-08T09:00",
            "list",
        ]);
        assert_eq!(cli.events, Some(PathBuf::from("/tmp/events.json")));
        assert_eq!(cli.now.as_deref(), Some("2025-01-08T09:00"));
    }

    #[test]
    fn test_aliases() {
        let cli = Cli::parse_from(["agenda", "l"]);
        assert!(matches!(cli.command, Some(Commands::List { .. })));

        let cli = Cli::parse_from(["agenda", "s", "ev-1"]);
        assert!(matches!(cli.command, Some(Commands::Show { .. })));

        let cli = Cli::parse_from(["agenda", "q", "date=all"]);
        assert!(matches!(cli.command, Some(Commands::Query { .. })));
    }

    #[test]
    fn test_list_with_options() {
        let cli = Cli::parse_from([
            "agenda",
            "list",
            "--search",
            "forró",
            "-c",
            "show",
            "-c",
            "teatro",
            "--date",
            "this-week",
            "--limit",
            "10",
        ]);
        if let Some(Commands::List {
            search,
            category,
            date,
            limit,
            all,
            ..
        }) = cli.command
        {
            assert_eq!(search.as_deref(), Some("forró"));
            assert_eq!(category, vec!["show", "teatro"]);
            assert_eq!(date, Some(DateArg::ThisWeek));
            assert_eq!(limit, Some(10));
            assert!(!all);
        } else {
            panic!("Expected List command");
        }
    }

    #[test]
    fn test_list_limit_conflicts_with_all() {
        assert!(Cli::try_parse_from(["agenda", "list", "--limit", "5", "--all"]).is_err());
    }

    #[test]
    fn test_query_command() {
        let cli = Cli::parse_from([
            "agenda",
            "query",
            "categories=SHOW",
            "-t",
            "cinema",
            "--date",
            "next-week",
            "--clear",
        ]);
        if let Some(Commands::Query {
            query,
            toggle_category,
            date,
            clear,
            ..
        }) = cli.command
        {
            assert_eq!(query.as_deref(), Some("categories=SHOW"));
            assert_eq!(toggle_category, vec!["cinema"]);
            assert_eq!(date, Some(DateArg::NextWeek));
            assert!(clear);
        } else {
            panic!("Expected Query command");
        }
    }

    #[test]
    fn test_import_command() {
        let cli = Cli::parse_from(["agenda", "import", "rows.json", "-o", "out.json"]);
        if let Some(Commands::Import { rows, output }) = cli.command {
            assert_eq!(rows, PathBuf::from("rows.json"));
            assert_eq!(output, Some(PathBuf::from("out.json")));
        } else {
            panic!("Expected Import command");
        }
    }

    #[test]
    fn test_config_set() {
        let cli = Cli::parse_from(["agenda", "config", "set", "output.limit", "20"]);
        if let Some(Commands::Config {
            command: Some(ConfigCommands::Set { key, value }),
        }) = cli.command
        {
            assert_eq!(key, "output.limit");
            assert_eq!(value, "20");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn test_completions() {
        let cli = Cli::parse_from(["agenda", "completions", "zsh"]);
        if let Some(Commands::Completions { shell }) = cli.command {
            assert!(matches!(shell, Shell::Zsh));
        } else {
            panic!("Expected Completions command");
        }
    }

    #[test]
    fn test_date_arg_maps_to_window() {
        assert_eq!(DateWindow::from(DateArg::All), DateWindow::All);
        assert_eq!(DateWindow::from(DateArg::Weekend), DateWindow::Weekend);
        assert_eq!(DateWindow::from(DateArg::NextWeek), DateWindow::NextWeek);
    }
}
