//! Event output formatting.

use agenda_core::filter::{DateWindow, FilterOutcome};
use agenda_core::format::{format_full_date_time, format_price};
use agenda_core::{event_slug, Category};
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::commands::show::ShowResult;

use super::helpers::{format_category, format_price_colored, format_when, pad, truncate_str};

const WHEN_WIDTH: usize = 21;
const CATEGORY_WIDTH: usize = 10;
const TITLE_WIDTH: usize = 40;

/// Listing details that aren't part of the pipeline outcome.
#[derive(Debug)]
pub struct ListSummary {
    /// Normalized query string for the current filters.
    pub query: String,
    /// Selected date window.
    pub date_window: DateWindow,
}

/// JSON output structure for list command.
#[derive(Serialize)]
pub struct ListOutput<'a> {
    pub events: Vec<EventOutput<'a>>,
    pub total_count: usize,
    pub filtered_count: usize,
    pub has_more: bool,
    pub has_active_filters: bool,
    pub date_window: DateWindow,
    pub query: &'a str,
}

/// JSON output structure for a single event in a listing.
#[derive(Serialize)]
pub struct EventOutput<'a> {
    pub id: &'a str,
    pub slug: Option<String>,
    pub title: &'a str,
    pub category: Category,
    pub date: &'a str,
    pub time: Option<&'a str>,
    pub location: &'a str,
    pub price: Option<f64>,
    pub is_free: bool,
}

/// JSON output structure for event details (show command).
#[derive(Serialize)]
pub struct EventDetailsOutput<'a> {
    pub id: &'a str,
    pub slug: Option<String>,
    pub title: &'a str,
    pub category: Category,
    pub category_label: &'static str,
    pub date: &'a str,
    pub time: Option<&'a str>,
    pub when: Option<String>,
    pub description: &'a str,
    pub location: &'a str,
    pub address: &'a str,
    pub price: Option<f64>,
    pub price_label: String,
    pub is_free: bool,
    pub is_past: bool,
    pub thumbnail: Option<&'a str>,
    pub ticket_url: Option<&'a str>,
}

/// Formats a listing as JSON.
pub fn format_events_json(
    outcome: &FilterOutcome<'_>,
    summary: &ListSummary,
) -> Result<String, serde_json::Error> {
    let events = outcome
        .events
        .iter()
        .map(|event| EventOutput {
            id: &event.id,
            slug: event_slug(event),
            title: &event.title,
            category: event.category,
            date: &event.date,
            time: event.time.as_deref(),
            location: &event.location,
            price: event.price,
            is_free: event.is_free(),
        })
        .collect();

    let output = ListOutput {
        events,
        total_count: outcome.total_count,
        filtered_count: outcome.filtered_count,
        has_more: outcome.events.len() < outcome.filtered_count,
        has_active_filters: outcome.has_active_filters,
        date_window: summary.date_window,
        query: &summary.query,
    };

    serde_json::to_string_pretty(&output)
}

/// Formats a listing as a table.
pub fn format_events_table(
    outcome: &FilterOutcome<'_>,
    summary: &ListSummary,
    use_colors: bool,
) -> String {
    let mut output = String::new();

    let heading = format!(
        "{}: {} of {} upcoming events",
        summary.date_window.label(),
        outcome.filtered_count,
        outcome.total_count
    );
    if use_colors {
        output.push_str(&format!("{}\n", heading.bold()));
    } else {
        output.push_str(&heading);
        output.push('\n');
    }

    if outcome.events.is_empty() {
        output.push_str("No events found.\n");
        if outcome.has_active_filters {
            output.push_str("Try --date all, or clear the filters with `agenda query --clear`.\n");
        }
        return output;
    }

    output.push('\n');
    let header = format!(
        "{} {} {}",
        pad("When", WHEN_WIDTH),
        pad("Category", CATEGORY_WIDTH),
        "Event"
    );
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for event in &outcome.events {
        let when = pad(&format_when(event), WHEN_WIDTH);
        let category = format_category(event.category, CATEGORY_WIDTH, use_colors);
        let title = truncate_str(&event.title, TITLE_WIDTH);
        let title = if use_colors {
            title.bold().to_string()
        } else {
            title
        };

        let mut line = format!("{} {} {}", when, category, title);
        if !event.location.is_empty() {
            line.push_str(&format!(" @ {}", event.location));
        }
        line.push_str(&format!(" ({})", format_price_colored(event.price, use_colors)));
        output.push_str(&line);
        output.push('\n');
    }

    if outcome.events.len() < outcome.filtered_count {
        output.push_str(&format!(
            "\nShowing {} of {}. Use --all to see everything.\n",
            outcome.events.len(),
            outcome.filtered_count
        ));
    }

    if !summary.query.is_empty() {
        output.push_str(&format!("\nQuery: ?{}\n", summary.query));
    }

    output
}

/// Formats event details as JSON (show command).
pub fn format_event_details_json(result: &ShowResult) -> Result<String, serde_json::Error> {
    let event = result.event;
    let output = EventDetailsOutput {
        id: &event.id,
        slug: event_slug(event),
        title: &event.title,
        category: event.category,
        category_label: event.category.label(),
        date: &event.date,
        time: event.time.as_deref(),
        when: event.event_date().map(|d| format_full_date_time(&d)),
        description: &event.description,
        location: &event.location,
        address: &event.address,
        price: event.price,
        price_label: format_price(event.price),
        is_free: event.is_free(),
        is_past: result.is_past,
        thumbnail: event.thumbnail_url(),
        ticket_url: event.ticket_url.as_deref(),
    };

    serde_json::to_string_pretty(&output)
}

/// Formats event details as a human-readable table (show command).
pub fn format_event_details_table(result: &ShowResult, use_colors: bool) -> String {
    let event = result.event;
    let mut output = String::new();

    let title_label = if use_colors {
        "Event:".bold().to_string()
    } else {
        "Event:".to_string()
    };
    output.push_str(&format!("{} {}\n", title_label, event.title));

    output.push_str(&format!("ID: {}\n", event.id));
    if let Some(slug) = event_slug(event) {
        output.push_str(&format!("Slug: {}\n", slug));
    }
    output.push_str(&format!(
        "Category: {}\n",
        format_category(event.category, 0, use_colors)
    ));

    let when = event
        .event_date()
        .map(|d| format_full_date_time(&d))
        .unwrap_or_else(|| event.date.clone());
    if result.is_past {
        let past = if use_colors {
            "(past)".red().to_string()
        } else {
            "(past)".to_string()
        };
        output.push_str(&format!("When: {} {}\n", when, past));
    } else {
        output.push_str(&format!("When: {}\n", when));
    }

    if !event.location.is_empty() {
        output.push_str(&format!("Where: {}\n", event.location));
    }
    if !event.address.is_empty() {
        output.push_str(&format!("Address: {}\n", event.address));
    }
    output.push_str(&format!(
        "Price: {}\n",
        format_price_colored(event.price, use_colors)
    ));
    if let Some(url) = &event.ticket_url {
        output.push_str(&format!("Tickets: {}\n", url));
    }
    if let Some(url) = event.thumbnail_url() {
        output.push_str(&format!("Image: {}\n", url));
    }

    if !event.description.is_empty() {
        output.push_str("Description:\n");
        for line in event.description.lines() {
            output.push_str(&format!("  {}\n", line));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use agenda_core::filter::FilterState;
    use agenda_core::{Catalog, EventRecord};
    use chrono::NaiveDate;

    fn catalog() -> Catalog {
        let mut forro = EventRecord::new("1", "Forró na Orla", Category::Show, "2025-01-10");
        forro.time = Some("21:00".to_string());
        forro.location = "Orla de Pajuçara".to_string();

        let mut peca = EventRecord::new("2", "Auto da Compadecida", Category::Teatro, "2025-01-11");
        peca.price = Some(40.0);
        peca.description = "Clássico de Suassuna\nSessão única".to_string();
        peca.ticket_url = Some("https://ingressos.example/auto".to_string());

        Catalog::new(vec![forro, peca])
    }

    fn now() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 8)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn summary(state: &FilterState) -> ListSummary {
        ListSummary {
            query: state.to_query_string().unwrap(),
            date_window: state.date_window,
        }
    }

    #[test]
    fn test_events_table_rows() {
        let catalog = catalog();
        let state = FilterState::default().with_date_window(DateWindow::ThisWeek);
        let outcome = catalog.filter(&state, now());

        let table = format_events_table(&outcome, &summary(&state), false);
        assert!(table.starts_with("Esta semana: 2 of 2 upcoming events\n"));
        assert!(table.contains("Sex, 10 de jan 21:00"));
        assert!(table.contains("Forró na Orla @ Orla de Pajuçara (Gratuito)"));
        assert!(table.contains("Auto da Compadecida (R$ 40,00)"));
        assert!(table.ends_with("Query: ?date=this-week\n"));
    }

    #[test]
    fn test_events_table_empty_with_filters() {
        let catalog = catalog();
        let state = FilterState::default();
        let outcome = catalog.filter(&state, now());

        let table = format_events_table(&outcome, &summary(&state), false);
        assert!(table.contains("Hoje: 0 of 2 upcoming events"));
        assert!(table.contains("No events found."));
        assert!(table.contains("--date all"));
    }

    #[test]
    fn test_events_table_truncated_listing() {
        let catalog = catalog();
        let state = FilterState::default().with_date_window(DateWindow::All);
        let mut outcome = catalog.filter(&state, now());
        outcome.events.truncate(1);

        let table = format_events_table(&outcome, &summary(&state), false);
        assert!(table.contains("Showing 1 of 2. Use --all to see everything."));
    }

    #[test]
    fn test_events_json() {
        let catalog = catalog();
        let state = FilterState::default().with_date_window(DateWindow::Weekend);
        let outcome = catalog.filter(&state, now());

        let json = format_events_json(&outcome, &summary(&state)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["filtered_count"], 1);
        assert_eq!(value["total_count"], 2);
        assert_eq!(value["has_more"], false);
        assert_eq!(value["has_active_filters"], true);
        assert_eq!(value["date_window"], "weekend");
        assert_eq!(value["query"], "date=weekend");
        assert_eq!(value["events"][0]["id"], "2");
        assert_eq!(value["events"][0]["category"], "TEATRO");
        assert_eq!(value["events"][0]["slug"], "2025-01-11-auto-da-compadecida");
        assert_eq!(value["events"][0]["is_free"], false);
    }

    #[test]
    fn test_event_details_table() {
        let catalog = catalog();
        let result = ShowResult {
            event: catalog.find("2").unwrap(),
            is_past: false,
        };

        let table = format_event_details_table(&result, false);
        assert!(table.starts_with("Event: Auto da Compadecida\n"));
        assert!(table.contains("Category: Teatro\n"));
        assert!(table.contains("When: Sábado, 11 de janeiro\n"));
        assert!(table.contains("Price: R$ 40,00\n"));
        assert!(table.contains("Tickets: https://ingressos.example/auto\n"));
        assert!(table.contains("  Sessão única\n"));
        assert!(!table.contains("Where:"));
    }

    #[test]
    fn test_event_details_json_past() {
        let catalog = catalog();
        let result = ShowResult {
            event: catalog.find("1").unwrap(),
            is_past: true,
        };

        let json = format_event_details_json(&result).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["when"], "Sexta-feira, 10 de janeiro às 21:00");
        assert_eq!(value["price_label"], "Gratuito");
        assert_eq!(value["is_past"], true);
        assert_eq!(value["thumbnail"], serde_json::Value::Null);
    }
}
