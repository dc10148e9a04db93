//! pt-BR presentation helpers for dates, times and prices.

use chrono::{Locale, TimeZone, Utc};

use crate::models::EventDate;

/// Label shown for events with free admission.
pub const FREE_LABEL: &str = "Gratuito";

/// Formats a card date, e.g. "Sáb, 7 de fev".
pub fn format_short_date(date: &EventDate) -> String {
    capitalize(&localized(date, "%a, %-d de %b"))
}

/// Formats a detail-page date, e.g. "Sábado, 7 de fevereiro".
pub fn format_full_date(date: &EventDate) -> String {
    capitalize(&localized(date, "%A, %-d de %B"))
}

/// Formats the start time as "19:00", or an empty string if there is none.
pub fn format_time(date: &EventDate) -> String {
    date.time
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_default()
}

/// Formats the full date and, when known, the start time
/// ("Sábado, 7 de fevereiro às 19:00").
pub fn format_full_date_time(date: &EventDate) -> String {
    let day = format_full_date(date);
    match date.time {
        Some(_) => format!("{day} às {}", format_time(date)),
        None => day,
    }
}

/// Formats a price in Brazilian reais ("R$ 1.234,50"), or "Gratuito".
pub fn format_price(price: Option<f64>) -> String {
    let Some(price) = price.filter(|p| *p != 0.0) else {
        return FREE_LABEL.to_string();
    };

    let cents = (price.abs() * 100.0).round() as u64;
    let sign = if price < 0.0 { "-" } else { "" };
    format!(
        "{sign}R$ {},{:02}",
        group_thousands(cents / 100),
        cents % 100
    )
}

fn localized(date: &EventDate, pattern: &str) -> String {
    Utc.from_utc_datetime(&date.to_datetime())
        .format_localized(pattern, Locale::pt_BR)
        .to_string()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn saturday() -> EventDate {
        EventDate {
            day: NaiveDate::from_ymd_opt(2026, 2, 7).unwrap(),
            time: NaiveTime::from_hms_opt(19, 0, 0),
        }
    }

    #[test]
    fn test_format_short_date() {
        assert_eq!(format_short_date(&saturday()), "Sáb, 7 de fev");
    }

    #[test]
    fn test_format_full_date() {
        assert_eq!(format_full_date(&saturday()), "Sábado, 7 de fevereiro");
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(&saturday()), "19:00");
        let date_only = EventDate::from_day(saturday().day);
        assert_eq!(format_time(&date_only), "");
    }

    #[test]
    fn test_format_full_date_time() {
        assert_eq!(
            format_full_date_time(&saturday()),
            "Sábado, 7 de fevereiro às 19:00"
        );
        let date_only = EventDate::from_day(saturday().day);
        assert_eq!(format_full_date_time(&date_only), "Sábado, 7 de fevereiro");
    }

    #[test]
    fn test_format_price_free() {
        assert_eq!(format_price(None), "Gratuito");
        assert_eq!(format_price(Some(0.0)), "Gratuito");
    }

    #[test]
    fn test_format_price_reais() {
        assert_eq!(format_price(Some(50.0)), "R$ 50,00");
        assert_eq!(format_price(Some(12.5)), "R$ 12,50");
        assert_eq!(format_price(Some(1234.5)), "R$ 1.234,50");
        assert_eq!(format_price(Some(1_000_000.0)), "R$ 1.000.000,00");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1.000");
        assert_eq!(group_thousands(123456), "123.456");
    }

    #[test]
    fn test_capitalize_multibyte() {
        assert_eq!(capitalize("ébano"), "Ébano");
        assert_eq!(capitalize(""), "");
    }
}
