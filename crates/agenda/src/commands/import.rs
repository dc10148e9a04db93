//! Import command implementation.
//!
//! Converts an export of the events spreadsheet into the events file that
//! every other command reads.

use std::fs;
use std::path::PathBuf;

use agenda_core::{parse_rows, rows_to_events, EventStore};
use serde::Serialize;
use tracing::info;

use super::config::load_config;
use super::{CommandContext, Result};

/// Options for the import command.
#[derive(Debug)]
pub struct ImportOptions {
    /// Sheet rows file.
    pub rows: PathBuf,
    /// Explicit output file.
    pub output: Option<PathBuf>,
}

/// JSON output structure for the import command.
#[derive(Serialize)]
pub struct ImportOutput {
    pub imported: usize,
    pub skipped: usize,
    pub path: String,
}

/// Executes the import command.
///
/// # Errors
///
/// Returns an error if the rows file can't be read or parsed, or the events
/// file can't be written.
pub fn execute(ctx: &CommandContext, opts: &ImportOptions) -> Result<()> {
    let store = match &opts.output {
        Some(path) => EventStore::with_path(path),
        None => ctx.event_store(&load_config()?)?,
    };

    let contents = fs::read_to_string(&opts.rows)?;
    let rows = parse_rows(&contents)?;
    let report = rows_to_events(&rows);
    store.save(&report.events)?;

    info!(
        imported = report.events.len(),
        skipped = report.skipped,
        path = %store.path().display(),
        "import finished"
    );

    if ctx.json_output {
        let output = ImportOutput {
            imported: report.events.len(),
            skipped: report.skipped,
            path: store.path().display().to_string(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!(
            "Imported {} events to {}",
            report.events.len(),
            store.path().display()
        );
        if report.skipped > 0 {
            println!("Skipped {} invalid rows (see warnings above)", report.skipped);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::CommandError;

    fn ctx() -> CommandContext {
        CommandContext {
            json_output: false,
            use_colors: false,
            quiet: true,
            events_path: None,
        }
    }

    #[test]
    fn test_import_writes_store() {
        let temp_dir = tempfile::tempdir().unwrap();
        let rows = temp_dir.path().join("rows.json");
        fs::write(
            &rows,
            r#"[["1", "Forró na Orla", "SHOW", "", "2025-01-10", "21:00"], ["", "", "", "", ""]]"#,
        )
        .unwrap();
        let output = temp_dir.path().join("data").join("events.json");

        let opts = ImportOptions {
            rows,
            output: Some(output.clone()),
        };
        execute(&ctx(), &opts).unwrap();

        let events = EventStore::with_path(output).load().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Forró na Orla");
    }

    #[test]
    fn test_import_missing_rows_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let opts = ImportOptions {
            rows: temp_dir.path().join("missing.json"),
            output: Some(temp_dir.path().join("events.json")),
        };
        assert!(matches!(
            execute(&ctx(), &opts),
            Err(CommandError::Io(_))
        ));
    }

    #[test]
    fn test_import_invalid_rows_document() {
        let temp_dir = tempfile::tempdir().unwrap();
        let rows = temp_dir.path().join("rows.json");
        fs::write(&rows, r#"{"sheet": "Eventos"}"#).unwrap();
        let opts = ImportOptions {
            rows,
            output: Some(temp_dir.path().join("events.json")),
        };
        assert!(matches!(
            execute(&ctx(), &opts),
            Err(CommandError::Json(_))
        ));
    }
}
