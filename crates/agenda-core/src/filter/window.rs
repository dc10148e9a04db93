//! Named relative date windows selectable in the listing.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::temporal::WeekBounds;

/// The date-window selection of a [`FilterState`](super::FilterState).
///
/// The default is [`DateWindow::Today`]: an empty query shows what is
/// happening today rather than everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateWindow {
    /// No date restriction.
    All,
    /// Events on the reference day.
    #[default]
    Today,
    /// Events on the day after the reference day.
    Tomorrow,
    /// Events from today through the coming Sunday.
    ThisWeek,
    /// Events on the current or upcoming Saturday and Sunday.
    Weekend,
    /// Events from the Monday after this week through the following Sunday.
    NextWeek,
}

impl DateWindow {
    /// Every window, in the order the date selector lists them.
    pub const ALL: [DateWindow; 6] = [
        DateWindow::All,
        DateWindow::Today,
        DateWindow::Tomorrow,
        DateWindow::ThisWeek,
        DateWindow::Weekend,
        DateWindow::NextWeek,
    ];

    /// Returns the query token (`all`, `today`, `this-week`, ...).
    pub fn as_token(self) -> &'static str {
        match self {
            DateWindow::All => "all",
            DateWindow::Today => "today",
            DateWindow::Tomorrow => "tomorrow",
            DateWindow::ThisWeek => "this-week",
            DateWindow::Weekend => "weekend",
            DateWindow::NextWeek => "next-week",
        }
    }

    /// Parses a query token. Matching is exact.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.as_token() == token)
    }

    /// Returns the pt-BR label shown in the date selector.
    pub fn label(self) -> &'static str {
        match self {
            DateWindow::All => "Qualquer data",
            DateWindow::Today => "Hoje",
            DateWindow::Tomorrow => "Amanhã",
            DateWindow::ThisWeek => "Esta semana",
            DateWindow::Weekend => "Este fim de semana",
            DateWindow::NextWeek => "Semana que vem",
        }
    }

    /// Returns true if `day` falls inside this window.
    pub fn contains(self, bounds: &WeekBounds, day: NaiveDate) -> bool {
        match self {
            DateWindow::All => true,
            DateWindow::Today => bounds.is_today(day),
            DateWindow::Tomorrow => bounds.is_tomorrow(day),
            DateWindow::ThisWeek => bounds.is_this_week(day),
            DateWindow::Weekend => bounds.is_this_weekend(day),
            DateWindow::NextWeek => bounds.is_next_week(day),
        }
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}
