//! Core of the Maceió events agenda.
//!
//! This crate owns the event catalog and everything the listing views need
//! to narrow it down: relative date windows, the search/category filter
//! pipeline, and the query-string codec that makes a filter shareable.
//!
//! # Example
//!
//! ```
//! use agenda_core::filter::{DateWindow, FilterState};
//! use agenda_core::{Catalog, Category, EventRecord};
//! use chrono::NaiveDate;
//!
//! let catalog = Catalog::new(vec![
//!     EventRecord::new("1", "Forró na Orla", Category::Show, "2025-01-10T21:00"),
//!     EventRecord::new("2", "Auto da Compadecida", Category::Teatro, "2025-01-11"),
//! ]);
//!
//! let now = NaiveDate::from_ymd_opt(2025, 1, 8).unwrap().and_hms_opt(9, 0, 0).unwrap();
//! let state = FilterState::default()
//!     .with_date_window(DateWindow::ThisWeek)
//!     .toggle_category(Category::Teatro);
//!
//! let outcome = catalog.filter(&state, now);
//! assert_eq!(outcome.filtered_count, 1);
//! assert_eq!(outcome.events[0].id, "2");
//! ```

pub mod catalog;
pub mod filter;
pub mod format;
pub mod ingest;
pub mod models;
pub mod store;
pub mod temporal;

pub use catalog::{event_slug, Catalog};
pub use ingest::{parse_rows, rows_to_events, IngestReport};
pub use models::{Category, EventDate, EventRecord};
pub use store::{EventStore, EventStoreError};
pub use temporal::WeekBounds;
