//! Show command implementation.
//!
//! Displays the detail view of one event, looked up by ID or slug. Past
//! events still resolve so shared links keep working.

use agenda_core::EventRecord;

use super::lookups::find_event;
use super::session::Session;
use super::{CommandContext, Result};
use crate::output::{format_event_details_json, format_event_details_table};

/// Options for the show command.
#[derive(Debug)]
pub struct ShowOptions {
    /// Event ID or slug.
    pub event: String,
}

/// Result data for the show command.
pub struct ShowResult<'a> {
    /// The event.
    pub event: &'a EventRecord,
    /// Whether the event's day is already over.
    pub is_past: bool,
}

/// Executes the show command.
///
/// # Errors
///
/// Returns `CommandError::NotFound` if no event has the given ID or slug.
pub fn execute(ctx: &CommandContext, opts: &ShowOptions, session: &Session) -> Result<()> {
    let event = find_event(&session.catalog, opts.event.trim())?;

    let is_past = event
        .event_date()
        .is_some_and(|date| agenda_core::temporal::is_past_day(&date, session.now));
    let result = ShowResult { event, is_past };

    if ctx.json_output {
        let output = format_event_details_json(&result)?;
        println!("{output}");
    } else if !ctx.quiet {
        let output = format_event_details_table(&result, ctx.use_colors);
        print!("{output}");
    }

    Ok(())
}
