//! The immutable filter state and its mutators.

use serde::Serialize;

use super::window::DateWindow;
use crate::models::Category;

/// Search text, selected categories and selected date window.
///
/// A `FilterState` is never changed in place: each mutator returns a new
/// value, which callers re-encode into the query representation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    /// Free-form search text, possibly empty.
    pub search: String,

    /// Selected categories in selection order. Empty means no restriction.
    pub categories: Vec<Category>,

    /// Selected date window.
    pub date_window: DateWindow,
}

impl FilterState {
    /// Creates a filter state from its parts, dropping duplicate categories.
    pub fn new(
        search: impl Into<String>,
        categories: impl IntoIterator<Item = Category>,
        date_window: DateWindow,
    ) -> Self {
        let mut unique = Vec::new();
        for category in categories {
            if !unique.contains(&category) {
                unique.push(category);
            }
        }

        Self {
            search: search.into(),
            categories: unique,
            date_window,
        }
    }

    /// Sets the search text.
    ///
    /// Non-blank text also lifts the date window to [`DateWindow::All`], so
    /// results aren't hidden by a "today only" selection. Blank text clears
    /// the search and leaves the date window as it was.
    pub fn with_search(&self, value: impl Into<String>) -> Self {
        let value = value.into();
        if value.trim().is_empty() {
            Self {
                search: String::new(),
                ..self.clone()
            }
        } else {
            Self {
                search: value,
                date_window: DateWindow::All,
                ..self.clone()
            }
        }
    }

    /// Adds `category` to the selection, or removes it if already selected.
    pub fn toggle_category(&self, category: Category) -> Self {
        let categories = if self.categories.contains(&category) {
            self.categories
                .iter()
                .copied()
                .filter(|c| *c != category)
                .collect()
        } else {
            let mut categories = self.categories.clone();
            categories.push(category);
            categories
        };

        Self {
            categories,
            ..self.clone()
        }
    }

    /// Selects a date window.
    pub fn with_date_window(&self, date_window: DateWindow) -> Self {
        Self {
            date_window,
            ..self.clone()
        }
    }

    /// Returns the state of an empty query.
    pub fn cleared(&self) -> Self {
        Self::default()
    }

    /// Returns true if any filter narrows the listing.
    ///
    /// Note that the default state is active, since it shows only today.
    pub fn has_active_filters(&self) -> bool {
        !self.search.is_empty() || !self.categories.is_empty() || self.date_window != DateWindow::All
    }

    /// Returns the trimmed, lowercased search term, or `None` if blank.
    pub fn search_term(&self) -> Option<String> {
        let trimmed = self.search.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_lowercase())
        }
    }
}
