//! Listing filters: search text, categories and relative date windows.
//!
//! This module holds the pipeline that turns the event collection plus a
//! [`FilterState`] into the ordered listing, and the codec that keeps the
//! state in a shareable query string.
//!
//! # Query keys
//!
//! - `search` - free text matched against title, location and description
//! - `categories` - comma-separated tokens (`SHOW,TEATRO`)
//! - `date` - one of `all`, `today`, `tomorrow`, `this-week`, `weekend`,
//!   `next-week`; `today` when absent
//!
//! # Example
//!
//! ```
//! use agenda_core::filter::{DateWindow, FilterState};
//! use agenda_core::Category;
//!
//! let state = FilterState::from_query_string("categories=SHOW,OPERA&date=weekend").unwrap();
//! assert_eq!(state.categories, vec![Category::Show]);
//! assert_eq!(state.date_window, DateWindow::Weekend);
//!
//! // searching lifts the date window
//! let state = state.with_search("forró");
//! assert_eq!(state.date_window, DateWindow::All);
//! ```

mod codec;
mod collate;
mod error;
mod evaluator;
mod state;
mod window;

pub use codec::{QueryParams, CATEGORIES_KEY, DATE_KEY, SEARCH_KEY};
pub use collate::compare_pt_br;
pub use error::{FilterError, FilterResult};
pub use evaluator::{apply, sort_events, upcoming, EventFilter, FilterOutcome};
pub use state::FilterState;
pub use window::DateWindow;
