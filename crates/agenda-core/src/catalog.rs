//! In-memory event catalog with detail-page lookups.

use chrono::NaiveDateTime;
use voca_rs::manipulate::slugify;

use crate::filter::{self, FilterOutcome, FilterState};
use crate::models::EventRecord;

/// Builds the shareable slug of an event: `YYYY-MM-DD-slugified-title`.
///
/// Returns `None` when the event's date cannot be parsed.
pub fn event_slug(event: &EventRecord) -> Option<String> {
    let date = event.event_date()?;
    let title = slugify(&event.title);
    let day = date.day.format("%Y-%m-%d");
    if title.is_empty() {
        Some(day.to_string())
    } else {
        Some(format!("{day}-{title}"))
    }
}

/// The read-only event collection for one session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    events: Vec<EventRecord>,
}

impl Catalog {
    /// Wraps a loaded event collection.
    pub fn new(events: Vec<EventRecord>) -> Self {
        Self { events }
    }

    /// Returns every event, in load order.
    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    /// Returns the number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if the catalog has no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Finds an event by its exact id.
    pub fn find_by_id(&self, id: &str) -> Option<&EventRecord> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Finds an event by its slug (see [`event_slug`]).
    pub fn find_by_slug(&self, slug: &str) -> Option<&EventRecord> {
        self.events
            .iter()
            .find(|e| event_slug(e).is_some_and(|s| s == slug))
    }

    /// Finds an event by id, falling back to its slug.
    pub fn find(&self, id_or_slug: &str) -> Option<&EventRecord> {
        self.find_by_id(id_or_slug)
            .or_else(|| self.find_by_slug(id_or_slug))
    }

    /// Returns the upcoming events in display order.
    pub fn upcoming(&self, now: NaiveDateTime) -> Vec<&EventRecord> {
        filter::upcoming(&self.events, now)
    }

    /// Runs the listing pipeline over the catalog.
    pub fn filter(&self, state: &FilterState, now: NaiveDateTime) -> FilterOutcome<'_> {
        filter::apply(&self.events, state, now)
    }
}

impl From<Vec<EventRecord>> for Catalog {
    fn from(events: Vec<EventRecord>) -> Self {
        Self::new(events)
    }
}
