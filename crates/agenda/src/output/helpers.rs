//! Common helper functions for output formatting.

use agenda_core::format::{format_price, format_short_date, format_time};
use agenda_core::{Category, EventRecord};
use owo_colors::OwoColorize;

/// Truncates a string to a maximum number of characters.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// Pads `s` to `width` characters.
///
/// Pad before coloring: escape codes would otherwise count toward the width.
pub fn pad(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}

/// Formats the category label for display.
pub fn format_category(category: Category, width: usize, use_colors: bool) -> String {
    let label = pad(category.label(), width);
    if !use_colors {
        return label;
    }

    match category {
        Category::Show | Category::Festival => label.magenta().to_string(),
        Category::Teatro | Category::Danca => label.cyan().to_string(),
        Category::Standup | Category::Barzinho => label.yellow().to_string(),
        Category::Exposicao | Category::Cinema => label.blue().to_string(),
    }
}

/// Formats the card date and time, e.g. "Sex, 10 de jan 21:00".
///
/// Records whose date can't be parsed show the raw value.
pub fn format_when(event: &EventRecord) -> String {
    match event.event_date() {
        Some(date) => {
            let time = format_time(&date);
            if time.is_empty() {
                format_short_date(&date)
            } else {
                format!("{} {}", format_short_date(&date), time)
            }
        }
        None => event.date.clone(),
    }
}

/// Formats the price, highlighting free admission.
pub fn format_price_colored(price: Option<f64>, use_colors: bool) -> String {
    let display = format_price(price);
    if use_colors && price.map_or(true, |p| p == 0.0) {
        display.green().to_string()
    } else {
        display
    }
}
