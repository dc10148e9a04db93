//! Query command implementation.
//!
//! Decodes a shared query string, applies the requested changes and prints
//! the normalized query string, the same transitions the listing page makes
//! when a control is clicked.

use agenda_core::filter::{DateWindow, FilterState};
use serde::Serialize;
use tracing::debug;

use super::lookups::resolve_categories;
use super::{CommandContext, Result};

/// Filter changes requested on the command line.
#[derive(Debug, Default)]
pub struct StateOptions {
    /// Query string to start from.
    pub query: Option<String>,
    /// New search text.
    pub search: Option<String>,
    /// Categories to add if missing.
    pub select_categories: Vec<String>,
    /// Categories to toggle on or off.
    pub toggle_categories: Vec<String>,
    /// New date window.
    pub date: Option<DateWindow>,
    /// Reset to the default state first.
    pub clear: bool,
}

impl StateOptions {
    /// Builds the filter state.
    ///
    /// Changes apply in a fixed order: clear, search, categories, date. An
    /// explicit `--date` therefore wins over the "all dates" a search selects.
    pub fn resolve(&self) -> Result<FilterState> {
        let mut state = FilterState::from_query_string(self.query.as_deref().unwrap_or_default())?;

        if self.clear {
            state = state.cleared();
        }
        if let Some(search) = &self.search {
            state = state.with_search(search.as_str());
        }
        for category in resolve_categories(&self.select_categories)? {
            if !state.categories.contains(&category) {
                state = state.toggle_category(category);
            }
        }
        for category in resolve_categories(&self.toggle_categories)? {
            state = state.toggle_category(category);
        }
        if let Some(date) = self.date {
            state = state.with_date_window(date);
        }

        debug!(?state, "resolved filter state");
        Ok(state)
    }
}

/// JSON output structure for the query command.
#[derive(Serialize)]
pub struct QueryOutput<'a> {
    pub query: String,
    pub state: &'a FilterState,
    pub has_active_filters: bool,
}

/// Executes the query command.
///
/// # Errors
///
/// Returns an error if the query string is malformed or a category is unknown.
pub fn execute(ctx: &CommandContext, opts: &StateOptions) -> Result<()> {
    let state = opts.resolve()?;
    let query = state.to_query_string()?;

    if ctx.json_output {
        let output = QueryOutput {
            query,
            state: &state,
            has_active_filters: state.has_active_filters(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("{query}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use agenda_core::Category;

    fn opts(query: &str) -> StateOptions {
        StateOptions {
            query: Some(query.to_string()),
            ..StateOptions::default()
        }
    }

    #[test]
    fn test_resolve_without_changes_normalizes() {
        let state = opts("?date=weekend&categories=SHOW,BOGUS,SHOW").resolve().unwrap();
        assert_eq!(state.categories, vec![Category::Show]);
        assert_eq!(state.to_query_string().unwrap(), "categories=SHOW&date=weekend");
    }

    #[test]
    fn test_resolve_empty_is_default() {
        let state = StateOptions::default().resolve().unwrap();
        assert_eq!(state, FilterState::default());
        assert_eq!(state.to_query_string().unwrap(), "");
    }

    #[test]
    fn test_toggle_categories() {
        let mut o = opts("categories=SHOW,TEATRO");
        o.toggle_categories = vec!["teatro".to_string(), "cinema".to_string()];
        let state = o.resolve().unwrap();
        assert_eq!(state.categories, vec![Category::Show, Category::Cinema]);
    }

    #[test]
    fn test_select_categories_never_removes() {
        let mut o = opts("categories=SHOW");
        o.select_categories = vec!["show".to_string(), "Dança".to_string()];
        let state = o.resolve().unwrap();
        assert_eq!(state.categories, vec![Category::Show, Category::Danca]);
    }

    #[test]
    fn test_search_selects_all_dates_unless_date_given() {
        let mut o = opts("date=tomorrow");
        o.search = Some("forró".to_string());
        assert_eq!(o.resolve().unwrap().date_window, DateWindow::All);

        o.date = Some(DateWindow::Weekend);
        let state = o.resolve().unwrap();
        assert_eq!(state.search, "forró");
        assert_eq!(state.date_window, DateWindow::Weekend);
    }

    #[test]
    fn test_clear_runs_first() {
        let mut o = opts("search=samba&categories=SHOW&date=all");
        o.clear = true;
        o.toggle_categories = vec!["cinema".to_string()];
        let state = o.resolve().unwrap();
        assert_eq!(state.search, "");
        assert_eq!(state.categories, vec![Category::Cinema]);
        assert_eq!(state.date_window, DateWindow::Today);
    }

    #[test]
    fn test_unknown_category_is_an_error() {
        let mut o = opts("");
        o.toggle_categories = vec!["opera".to_string()];
        assert!(o.resolve().is_err());
    }
}
