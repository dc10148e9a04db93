//! Output formatting utilities for the agenda CLI.
//!
//! This module provides functions for formatting data as tables or JSON:
//!
//! - [`events`] - Event output formatting (list, show)
//! - [`helpers`] - Common formatting utilities (truncation, padding, colors)

mod events;
pub mod helpers;

pub use events::{
    format_event_details_json, format_event_details_table, format_events_json,
    format_events_table, ListSummary,
};
