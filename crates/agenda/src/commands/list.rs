//! List command implementation.
//!
//! Lists upcoming events from the events file, narrowed by a shared query
//! string and/or filter flags.

use agenda_core::filter::FilterOutcome;

use super::query::StateOptions;
use super::session::Session;
use super::{CommandContext, Result};
use crate::output::{format_events_json, format_events_table, ListSummary};

/// Options for the list command.
#[derive(Debug)]
pub struct ListOptions {
    /// Filter state changes.
    pub state: StateOptions,
    /// Limit results (default: from config).
    pub limit: Option<usize>,
    /// Show all events (no limit).
    pub all: bool,
}

/// Executes the list command.
///
/// # Errors
///
/// Returns an error if the query string is malformed or a category is unknown.
pub fn execute(ctx: &CommandContext, opts: &ListOptions, session: &Session) -> Result<()> {
    let state = opts.state.resolve()?;
    let outcome = session.catalog.filter(&state, session.now);

    let outcome = apply_limit(outcome, effective_limit(opts, session.limit));
    let summary = ListSummary {
        query: state.to_query_string()?,
        date_window: state.date_window,
    };

    if ctx.json_output {
        let output = format_events_json(&outcome, &summary)?;
        println!("{output}");
    } else if !ctx.quiet {
        let output = format_events_table(&outcome, &summary, ctx.use_colors);
        print!("{output}");
    }

    Ok(())
}

/// Returns the number of events to print, or `None` for all of them.
fn effective_limit(opts: &ListOptions, default_limit: usize) -> Option<usize> {
    if opts.all {
        None
    } else {
        Some(opts.limit.unwrap_or(default_limit))
    }
}

/// Truncates the listing; the counts keep describing the full result.
fn apply_limit(mut outcome: FilterOutcome<'_>, limit: Option<usize>) -> FilterOutcome<'_> {
    if let Some(limit) = limit {
        outcome.events.truncate(limit);
    }
    outcome
}
