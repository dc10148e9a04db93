//! The filter/sort pipeline behind the event listing.
//!
//! [`EventFilter`] evaluates a [`FilterState`] against event records for a
//! fixed reference instant. [`apply`] runs the whole pipeline:
//!
//! 1. drop events whose day is before today (earlier today still counts)
//! 2. keep events whose title, location or description contains the search text
//! 3. keep events in one of the selected categories
//! 4. keep events inside the selected date window
//! 5. sort by start date-time, breaking ties by pt-BR title order
//!
//! Records whose date can't be parsed are skipped at step 1.
//!
//! # Example
//!
//! ```
//! use agenda_core::filter::{apply, DateWindow, FilterState};
//! use agenda_core::{Category, EventRecord};
//! use chrono::NaiveDate;
//!
//! let events = vec![
//!     EventRecord::new("1", "Show B", Category::Show, "2025-01-10"),
//!     EventRecord::new("2", "Show A", Category::Show, "2025-01-10"),
//! ];
//! let now = NaiveDate::from_ymd_opt(2025, 1, 8)
//!     .unwrap()
//!     .and_hms_opt(12, 0, 0)
//!     .unwrap();
//!
//! let state = FilterState::default().with_date_window(DateWindow::All);
//! let outcome = apply(&events, &state, now);
//! let titles: Vec<&str> = outcome.events.iter().map(|e| e.title.as_str()).collect();
//! assert_eq!(titles, ["Show A", "Show B"]);
//! ```

use std::cmp::Ordering;

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::debug;

use super::collate::compare_pt_br;
use super::state::FilterState;
use super::window::DateWindow;
use crate::models::{EventDate, EventRecord};
use crate::temporal::WeekBounds;

/// The ordered listing plus the counts the listing header shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOutcome<'a> {
    /// Matching events in display order.
    pub events: Vec<&'a EventRecord>,
    /// Number of upcoming events before search, category and date filters.
    pub total_count: usize,
    /// Number of events in `events`.
    pub filtered_count: usize,
    /// Whether any filter narrows the listing.
    pub has_active_filters: bool,
}

/// Evaluates a filter state against events for one reference instant.
#[derive(Debug, Clone)]
pub struct EventFilter<'a> {
    state: &'a FilterState,
    bounds: WeekBounds,
    search_term: Option<String>,
}

impl<'a> EventFilter<'a> {
    /// Creates an evaluator for `state` relative to `now`.
    pub fn new(state: &'a FilterState, now: NaiveDateTime) -> Self {
        Self {
            state,
            bounds: WeekBounds::at(now),
            search_term: state.search_term(),
        }
    }

    /// Returns true if the event is upcoming and passes every active filter.
    pub fn matches(&self, event: &EventRecord) -> bool {
        event
            .event_date()
            .is_some_and(|date| self.is_upcoming(&date) && self.matches_filters(event, &date))
    }

    /// Runs the full pipeline over `events`.
    pub fn apply<'b>(&self, events: &'b [EventRecord]) -> FilterOutcome<'b> {
        let upcoming = self.upcoming(events);
        let total_count = upcoming.len();

        let mut matched: Vec<(EventDate, &'b EventRecord)> = upcoming
            .into_iter()
            .filter(|(date, event)| self.matches_filters(event, date))
            .collect();
        matched.sort_by(|a, b| compare_dated(a, b));

        let events: Vec<&'b EventRecord> = matched.into_iter().map(|(_, e)| e).collect();

        FilterOutcome {
            filtered_count: events.len(),
            events,
            total_count,
            has_active_filters: self.state.has_active_filters(),
        }
    }

    /// Returns the parsed, upcoming events in input order.
    fn upcoming<'b>(&self, events: &'b [EventRecord]) -> Vec<(EventDate, &'b EventRecord)> {
        events
            .iter()
            .filter_map(|event| match event.event_date() {
                Some(date) => Some((date, event)),
                None => {
                    debug!(id = %event.id, date = %event.date, "skipping event with unparseable date");
                    None
                }
            })
            .filter(|(date, _)| self.is_upcoming(date))
            .collect()
    }

    fn is_upcoming(&self, date: &EventDate) -> bool {
        !self.bounds.is_before_today(date.day)
    }

    fn matches_filters(&self, event: &EventRecord, date: &EventDate) -> bool {
        self.matches_search(event)
            && self.matches_category(event)
            && self.state.date_window.contains(&self.bounds, date.day)
    }

    fn matches_search(&self, event: &EventRecord) -> bool {
        let Some(term) = &self.search_term else {
            return true;
        };

        [&event.title, &event.location, &event.description]
            .iter()
            .any(|field| field.to_lowercase().contains(term.as_str()))
    }

    fn matches_category(&self, event: &EventRecord) -> bool {
        self.state.categories.is_empty() || self.state.categories.contains(&event.category)
    }
}

/// Runs the filter/sort pipeline.
///
/// Pure and total: the input is never modified and an empty listing is
/// returned when nothing matches.
pub fn apply<'a>(
    events: &'a [EventRecord],
    state: &FilterState,
    now: NaiveDateTime,
) -> FilterOutcome<'a> {
    EventFilter::new(state, now).apply(events)
}

/// Returns the upcoming events, sorted for display.
pub fn upcoming<'a>(events: &'a [EventRecord], now: NaiveDateTime) -> Vec<&'a EventRecord> {
    let state = FilterState::default().with_date_window(DateWindow::All);
    apply(events, &state, now).events
}

/// Sorts events by start date-time, then by pt-BR title order.
///
/// Events with unparseable dates sort last, in title order.
pub fn sort_events(events: &mut [&EventRecord]) {
    events.sort_by(|a, b| match (a.event_date(), b.event_date()) {
        (Some(da), Some(db)) => compare_dated(&(da, *a), &(db, *b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => compare_pt_br(&a.title, &b.title),
    });
}

fn compare_dated(a: &(EventDate, &EventRecord), b: &(EventDate, &EventRecord)) -> Ordering {
    a.0.to_datetime()
        .cmp(&b.0.to_datetime())
        .then_with(|| compare_pt_br(&a.1.title, &b.1.title))
}
