//! Conversion of spreadsheet rows into event records.
//!
//! The sheet has one event per row, header excluded, with columns:
//!
//! | Col | Field       | Notes                                  |
//! |-----|-------------|----------------------------------------|
//! | A   | id          | required                               |
//! | B   | title       | required                               |
//! | C   | category    | uppercased; `SHOW` when empty/unknown  |
//! | D   | thumbnail   | optional URL                           |
//! | E   | date        | required, `YYYY-MM-DD`                 |
//! | F   | time        | optional, `HH:MM`                      |
//! | G   | description |                                        |
//! | H   | location    | venue name                             |
//! | I   | address     |                                        |
//! | J   | price       | number; empty or invalid means free    |
//! | K   | ticketUrl   | optional URL                           |
//!
//! Rows that can't produce a valid record are dropped with a warning rather
//! than failing the whole import.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::filter::sort_events;
use crate::models::{Category, EventDate, EventRecord};

/// Spreadsheet rows start at line 2; line 1 is the header.
const FIRST_DATA_LINE: usize = 2;

/// Raw rows as exported from the sheet.
///
/// Accepts either the Sheets API response (`{"values": [[...], ...]}`) or a
/// bare array of rows. Non-string cells are stringified.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RowsDocument {
    Sheet { values: Vec<Vec<Value>> },
    Rows(Vec<Vec<Value>>),
}

/// Result of converting a batch of rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestReport {
    /// Valid records, sorted by date.
    pub events: Vec<EventRecord>,
    /// Number of rows that were dropped.
    pub skipped: usize,
}

/// Parses a rows document into string cells.
///
/// # Errors
///
/// Returns a JSON error if the document is neither a Sheets API response nor
/// an array of rows.
pub fn parse_rows(json: &str) -> serde_json::Result<Vec<Vec<String>>> {
    let rows = match serde_json::from_str::<RowsDocument>(json)? {
        RowsDocument::Sheet { values } => values,
        RowsDocument::Rows(rows) => rows,
    };

    Ok(rows
        .into_iter()
        .map(|row| row.into_iter().map(cell_to_string).collect())
        .collect())
}

/// Converts sheet rows into event records.
pub fn rows_to_events(rows: &[Vec<String>]) -> IngestReport {
    let mut events = Vec::with_capacity(rows.len());
    let mut skipped = 0;

    for (index, row) in rows.iter().enumerate() {
        let line = index + FIRST_DATA_LINE;
        match row_to_event(row, line) {
            Some(event) => events.push(event),
            None => skipped += 1,
        }
    }

    let mut refs: Vec<&EventRecord> = events.iter().collect();
    sort_events(&mut refs);
    let events = refs.into_iter().cloned().collect();

    IngestReport { events, skipped }
}

fn row_to_event(row: &[String], line: usize) -> Option<EventRecord> {
    let cell = |i: usize| row.get(i).map(|s| s.trim()).unwrap_or_default();
    let optional = |i: usize| Some(cell(i)).filter(|s| !s.is_empty()).map(str::to_string);

    let (id, title, date) = (cell(0), cell(1), cell(4));
    if id.is_empty() || title.is_empty() || date.is_empty() {
        warn!(line, "dropping row: id, title and date are required");
        return None;
    }

    let time = optional(5);
    if EventDate::parse(date, time.as_deref()).is_none() {
        warn!(line, id, date, "dropping row: unparseable date");
        return None;
    }

    Some(EventRecord {
        id: id.to_string(),
        title: title.to_string(),
        category: parse_category(cell(2), line),
        thumbnail: optional(3),
        date: date.to_string(),
        time,
        description: cell(6).to_string(),
        location: cell(7).to_string(),
        address: cell(8).to_string(),
        price: parse_price(cell(9), line),
        ticket_url: optional(10),
    })
}

fn parse_category(value: &str, line: usize) -> Category {
    if value.is_empty() {
        return Category::Show;
    }

    let token = value.to_uppercase();
    Category::from_token(&token).unwrap_or_else(|| {
        warn!(line, category = %value, "unknown category, defaulting to SHOW");
        Category::Show
    })
}

fn parse_price(value: &str, line: usize) -> Option<f64> {
    if value.is_empty() {
        return None;
    }

    let amount = value.trim_start_matches("R$").trim();
    // a comma marks the pt-BR form "1.234,50", where dots group thousands
    let normalized = if amount.contains(',') {
        amount.replace('.', "").replace(',', ".")
    } else {
        amount.to_string()
    };
    match normalized.parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Some(price),
        _ => {
            warn!(line, price = %value, "ignoring unparseable price");
            None
        }
    }
}

fn cell_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
