//! Event record model shared by the catalog, the filters and the store.
//!
//! Records mirror the `events.json` document produced by the ingestion step.
//! Dates are local wall-clock values for the agenda's city and are never
//! converted through UTC.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Accepted layouts for the `date` field, tried in order.
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Accepted layouts for the separate `time` field.
const TIME_FORMATS: &[&str] = &["%H:%M", "%H:%M:%S"];

/// Event category.
///
/// The set is closed: records with other values are rejected (or defaulted)
/// by the ingestion step before they reach the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Show,
    Teatro,
    Festival,
    Standup,
    Exposicao,
    Cinema,
    Danca,
    Barzinho,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 8] = [
        Category::Show,
        Category::Teatro,
        Category::Festival,
        Category::Standup,
        Category::Exposicao,
        Category::Cinema,
        Category::Danca,
        Category::Barzinho,
    ];

    /// Returns the wire token (`SHOW`, `TEATRO`, ...).
    pub fn as_token(self) -> &'static str {
        match self {
            Category::Show => "SHOW",
            Category::Teatro => "TEATRO",
            Category::Festival => "FESTIVAL",
            Category::Standup => "STANDUP",
            Category::Exposicao => "EXPOSICAO",
            Category::Cinema => "CINEMA",
            Category::Danca => "DANCA",
            Category::Barzinho => "BARZINHO",
        }
    }

    /// Parses a wire token. Matching is exact and case-sensitive.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_token() == token)
    }

    /// Returns the pt-BR display label.
    pub fn label(self) -> &'static str {
        match self {
            Category::Show => "Show",
            Category::Teatro => "Teatro",
            Category::Festival => "Festival",
            Category::Standup => "Stand-up",
            Category::Exposicao => "Exposição",
            Category::Cinema => "Cinema",
            Category::Danca => "Dança",
            Category::Barzinho => "Barzinho",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

/// A single event listing.
///
/// Records are loaded once and treated as read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    /// Stable unique identifier.
    pub id: String,

    /// Event title.
    pub title: String,

    /// Event category.
    pub category: Category,

    /// Image URL, empty or absent when the event has no picture.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    /// Local date in `YYYY-MM-DD` form, optionally followed by a time
    /// (`YYYY-MM-DDTHH:MM` or `YYYY-MM-DD HH:MM`).
    pub date: String,

    /// Local start time (`HH:MM`), used when `date` carries no time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    /// Free-form description.
    #[serde(default)]
    pub description: String,

    /// Venue name.
    #[serde(default)]
    pub location: String,

    /// Venue street address.
    #[serde(default)]
    pub address: String,

    /// Ticket price in BRL. Absent or zero means free admission.
    #[serde(default)]
    pub price: Option<f64>,

    /// External ticketing link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_url: Option<String>,
}

impl EventRecord {
    /// Creates a record with the required fields and everything else empty.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        category: Category,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category,
            thumbnail: None,
            date: date.into(),
            time: None,
            description: String::new(),
            location: String::new(),
            address: String::new(),
            price: None,
            ticket_url: None,
        }
    }

    /// Parses the record's local date and time.
    ///
    /// Returns `None` when the date cannot be parsed; such records cannot be
    /// classified into any date window.
    pub fn event_date(&self) -> Option<EventDate> {
        EventDate::parse(&self.date, self.time.as_deref())
    }

    /// Returns true when admission is free.
    pub fn is_free(&self) -> bool {
        self.price.map_or(true, |p| p == 0.0)
    }

    /// Returns the thumbnail URL when one is set and non-empty.
    pub fn thumbnail_url(&self) -> Option<&str> {
        self.thumbnail.as_deref().filter(|t| !t.trim().is_empty())
    }
}

/// A parsed local wall-clock date with an optional start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventDate {
    /// Calendar day.
    pub day: NaiveDate,
    /// Start time, if the listing has one.
    pub time: Option<NaiveTime>,
}

impl EventDate {
    /// Creates a date-only value.
    pub fn from_day(day: NaiveDate) -> Self {
        Self { day, time: None }
    }

    /// Parses a `date` field plus the optional separate `time` field.
    ///
    /// A time embedded in `date` wins over the separate field. A separate
    /// time that fails to parse is ignored and the day is kept.
    pub fn parse(date: &str, time: Option<&str>) -> Option<Self> {
        let date = date.trim();

        for format in DATE_TIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(date, format) {
                return Some(Self {
                    day: dt.date(),
                    time: Some(dt.time()),
                });
            }
        }

        let day = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
        let time = time
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .and_then(parse_time);

        Some(Self { day, time })
    }

    /// Returns the full local date-time; date-only values start at midnight.
    pub fn to_datetime(&self) -> NaiveDateTime {
        self.day.and_time(self.time.unwrap_or(NaiveTime::MIN))
    }
}

fn parse_time(value: &str) -> Option<NaiveTime> {
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(value, format).ok())
}
