//! Per-invocation state for commands that read the event catalog.

use agenda_core::{Catalog, EventDate};
use chrono::{NaiveDateTime, Utc};
use chrono_tz::Tz;
use tracing::{debug, warn};

use super::config::{load_config, Config};
use super::{CommandContext, CommandError, Result};

/// The loaded catalog plus the reference instant every filter uses.
pub struct Session {
    /// Events loaded from the store.
    pub catalog: Catalog,
    /// Local wall-clock "now" in the configured timezone.
    pub now: NaiveDateTime,
    /// Default listing size.
    pub limit: usize,
}

impl Session {
    /// Loads config and events for a catalog command.
    ///
    /// A missing events file yields an empty catalog.
    pub fn load(ctx: &CommandContext, now_override: Option<&str>) -> Result<Self> {
        let config = load_config()?;
        let now = resolve_now(now_override, &config)?;

        let store = ctx.event_store(&config)?;
        if !store.exists() {
            warn!(
                path = %store.path().display(),
                "events file not found; run `agenda import` first"
            );
        }
        let events = store.load_or_default()?;
        debug!(count = events.len(), %now, "loaded events");

        Ok(Self {
            catalog: Catalog::new(events),
            now,
            limit: config.limit(),
        })
    }
}

/// Returns `--now` when given, otherwise the current wall clock in the
/// configured timezone.
pub fn resolve_now(now_override: Option<&str>, config: &Config) -> Result<NaiveDateTime> {
    match now_override {
        Some(value) => parse_now(value),
        None => Ok(local_now(config.timezone()?)),
    }
}

/// Parses a `--now` value (`YYYY-MM-DD`, optionally with `THH:MM[:SS]`).
pub fn parse_now(value: &str) -> Result<NaiveDateTime> {
    EventDate::parse(value.trim(), None)
        .map(|date| date.to_datetime())
        .ok_or_else(|| {
            CommandError::Usage(format!(
                "Invalid --now value '{}'. Use YYYY-MM-DD or YYYY-MM-DDTHH:MM",
                value
            ))
        })
}

fn local_now(tz: Tz) -> NaiveDateTime {
    Utc::now().with_timezone(&tz).naive_local()
}
