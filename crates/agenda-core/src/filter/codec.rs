//! Mapping between [`FilterState`] and the flat query representation.
//!
//! The query boundary uses three keys:
//!
//! - `search` - search text; omitted when empty
//! - `categories` - comma-separated category tokens; omitted when none selected
//! - `date` - date-window token; omitted for the default `today`
//!
//! Decoding is lenient: unknown category tokens are dropped and an unknown
//! or missing `date` falls back to `today`.

use std::collections::BTreeMap;

use super::error::{FilterError, FilterResult};
use super::state::FilterState;
use super::window::DateWindow;
use crate::models::Category;

/// Query key holding the search text.
pub const SEARCH_KEY: &str = "search";

/// Query key holding the comma-separated categories.
pub const CATEGORIES_KEY: &str = "categories";

/// Query key holding the date-window token.
pub const DATE_KEY: &str = "date";

/// An order-insensitive mapping of query keys to values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(BTreeMap<String, String>);

impl QueryParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an `application/x-www-form-urlencoded` string.
    ///
    /// A leading `?` is ignored. When a key repeats, the first value wins.
    pub fn parse(query: &str) -> FilterResult<Self> {
        let query = query.trim().trim_start_matches('?');
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)
            .map_err(|e| FilterError::malformed_query(e.to_string()))?;

        let mut params = BTreeMap::new();
        for (key, value) in pairs {
            params.entry(key).or_insert(value);
        }
        Ok(Self(params))
    }

    /// Encodes the parameters, keys in sorted order.
    pub fn to_query_string(&self) -> FilterResult<String> {
        serde_urlencoded::to_string(&self.0).map_err(|e| FilterError::encode(e.to_string()))
    }

    /// Returns the value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Sets `key`, or removes it when `value` is empty.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if value.is_empty() {
            self.0.remove(&key);
        } else {
            self.0.insert(key, value);
        }
    }

    /// Removes `key`.
    pub fn remove(&mut self, key: &str) {
        self.0.remove(key);
    }

    /// Returns true if no keys are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the key/value pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (key, value) in iter {
            params.set(key, value);
        }
        params
    }
}

impl FilterState {
    /// Decodes a filter state from query parameters.
    pub fn from_query(params: &QueryParams) -> Self {
        let search = params.get(SEARCH_KEY).unwrap_or_default().to_string();

        let categories = params
            .get(CATEGORIES_KEY)
            .map(decode_categories)
            .unwrap_or_default();

        let date_window = params
            .get(DATE_KEY)
            .and_then(DateWindow::from_token)
            .unwrap_or_default();

        Self::new(search, categories, date_window)
    }

    /// Encodes the filter state, omitting every key that holds its default.
    pub fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();

        params.set(SEARCH_KEY, self.search.clone());

        let categories: Vec<&str> = self.categories.iter().map(|c| c.as_token()).collect();
        params.set(CATEGORIES_KEY, categories.join(","));

        if self.date_window != DateWindow::Today {
            params.set(DATE_KEY, self.date_window.as_token());
        }

        params
    }

    /// Decodes a filter state from a query string.
    pub fn from_query_string(query: &str) -> FilterResult<Self> {
        QueryParams::parse(query).map(|params| Self::from_query(&params))
    }

    /// Encodes the filter state as a query string.
    pub fn to_query_string(&self) -> FilterResult<String> {
        self.to_query().to_query_string()
    }
}

fn decode_categories(value: &str) -> Vec<Category> {
    value.split(',').filter_map(Category::from_token).collect()
}
