//! Relative date windows ("today", "this weekend", "next week", ...).
//!
//! Every predicate is a pure function of the event's local date and an
//! explicit reference instant `now`; nothing here reads the wall clock.
//! All comparisons are made in a single civil calendar at day granularity,
//! except [`is_past`] which compares full local date-times.
//!
//! Weeks run Sunday to Saturday for "this week" (the window ends on the
//! coming Sunday), while "next week" starts on the Monday right after that
//! Sunday and spans seven days.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

use crate::models::EventDate;

/// Day-granularity boundaries of every relative window for one reference day.
///
/// Computing the bounds once per query avoids redoing the weekday arithmetic
/// for every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekBounds {
    /// The reference day.
    pub today: NaiveDate,
    /// The day after `today`.
    pub tomorrow: NaiveDate,
    /// The coming Sunday (`today` itself on Sundays).
    pub end_of_this_week: NaiveDate,
    /// Saturday of the current or upcoming weekend.
    pub weekend_start: NaiveDate,
    /// Sunday of the current or upcoming weekend.
    pub weekend_end: NaiveDate,
    /// Monday after `end_of_this_week`.
    pub next_week_start: NaiveDate,
    /// Sunday closing the seven days of next week.
    pub next_week_end: NaiveDate,
}

impl WeekBounds {
    /// Computes the bounds relative to the calendar day of `now`.
    pub fn at(now: NaiveDateTime) -> Self {
        Self::for_day(now.date())
    }

    /// Computes the bounds relative to `today`.
    pub fn for_day(today: NaiveDate) -> Self {
        // 0 = Sunday ... 6 = Saturday
        let weekday = i64::from(today.weekday().num_days_from_sunday());

        let end_of_this_week = today + Duration::days((7 - weekday) % 7);
        let next_week_start = end_of_this_week + Duration::days(1);

        let weekend_start = match weekday {
            0 => today - Duration::days(1),
            6 => today,
            _ => today + Duration::days(6 - weekday),
        };

        Self {
            today,
            tomorrow: today + Duration::days(1),
            end_of_this_week,
            weekend_start,
            weekend_end: weekend_start + Duration::days(1),
            next_week_start,
            next_week_end: next_week_start + Duration::days(6),
        }
    }

    /// Returns true if `day` is the reference day.
    pub fn is_today(&self, day: NaiveDate) -> bool {
        day == self.today
    }

    /// Returns true if `day` is the day after the reference day.
    pub fn is_tomorrow(&self, day: NaiveDate) -> bool {
        day == self.tomorrow
    }

    /// Returns true if `day` falls between today and the coming Sunday.
    pub fn is_this_week(&self, day: NaiveDate) -> bool {
        day >= self.today && day <= self.end_of_this_week
    }

    /// Returns true if `day` is the Saturday or Sunday of the current or
    /// upcoming weekend.
    pub fn is_this_weekend(&self, day: NaiveDate) -> bool {
        day >= self.weekend_start && day <= self.weekend_end
    }

    /// Returns true if `day` falls in the Monday-to-Sunday span after this week.
    pub fn is_next_week(&self, day: NaiveDate) -> bool {
        day >= self.next_week_start && day <= self.next_week_end
    }

    /// Returns true if `day` is strictly before the reference day.
    pub fn is_before_today(&self, day: NaiveDate) -> bool {
        day < self.today
    }
}

/// Returns true if the event falls on the calendar day of `now`.
pub fn is_today(date: &EventDate, now: NaiveDateTime) -> bool {
    WeekBounds::at(now).is_today(date.day)
}

/// Returns true if the event falls on the day after `now`.
pub fn is_tomorrow(date: &EventDate, now: NaiveDateTime) -> bool {
    WeekBounds::at(now).is_tomorrow(date.day)
}

/// Returns true if the event falls between today and the coming Sunday.
pub fn is_this_week(date: &EventDate, now: NaiveDateTime) -> bool {
    WeekBounds::at(now).is_this_week(date.day)
}

/// Returns true if the event falls on the current or upcoming weekend.
pub fn is_this_weekend(date: &EventDate, now: NaiveDateTime) -> bool {
    WeekBounds::at(now).is_this_weekend(date.day)
}

/// Returns true if the event falls in next week (Monday to Sunday).
pub fn is_next_week(date: &EventDate, now: NaiveDateTime) -> bool {
    WeekBounds::at(now).is_next_week(date.day)
}

/// Returns true if the event's start is strictly before `now`.
///
/// Date-only events start at midnight.
pub fn is_past(date: &EventDate, now: NaiveDateTime) -> bool {
    date.to_datetime() < now
}

/// Returns true if the event's day is before the day of `now`.
///
/// This is the check behind the "upcoming" listing: events earlier today
/// are still shown.
pub fn is_past_day(date: &EventDate, now: NaiveDateTime) -> bool {
    WeekBounds::at(now).is_before_today(date.day)
}
