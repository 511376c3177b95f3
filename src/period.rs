//! Dashboard periods and the time windows they select.

use serde::{Deserialize, Serialize};
use time::{Date, Duration, OffsetDateTime, UtcOffset};

/// The user-selected granularity of the dashboard.
///
/// A period controls both which records are counted (see [Period::window])
/// and how they are grouped into chart buckets.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// Today, one bucket per day.
    Daily,
    /// The current week (starting Sunday), one bucket per week.
    Weekly,
    /// The current month, one bucket per day of the month.
    #[default]
    Monthly,
    /// Every record, one bucket per month.
    All,
}

/// Every period, in the order they are offered to the user.
pub const PERIODS: [Period; 4] = [Period::Daily, Period::Weekly, Period::Monthly, Period::All];

impl Period {
    /// The value used for this period in query strings and config files.
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::All => "all",
        }
    }

    /// The name of the period selector button.
    pub fn label(self) -> &'static str {
        match self {
            Self::Daily => "Hoje",
            Self::Weekly => "Semanal",
            Self::Monthly => "Mensal",
            Self::All => "Total",
        }
    }

    /// The adjective used in chart titles, e.g. "Vendas (Mensal)".
    pub fn chart_title(self) -> &'static str {
        match self {
            Self::Daily => "Diário",
            Self::Weekly => "Semanal",
            Self::Monthly => "Mensal",
            Self::All => "Total",
        }
    }

    /// Computes the window of this period as seen at `now` in the local
    /// timezone given by `local_offset`.
    pub fn window(self, now: OffsetDateTime, local_offset: UtcOffset) -> Window {
        let today = local_date(now, local_offset);

        let start_date = match self {
            Self::Daily => today,
            Self::Weekly => start_of_week(today),
            Self::Monthly => first_of_month(today),
            Self::All => return Window { start: None },
        };

        Window {
            start: Some(start_date.midnight().assume_offset(local_offset)),
        }
    }
}

/// The range of instants counted for a period.
///
/// Windows are open-ended: anything from the start onwards is counted,
/// including records dated after `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Window {
    start: Option<OffsetDateTime>,
}

impl Window {
    /// The inclusive start of the window, or `None` if the window is unbounded.
    pub fn start(&self) -> Option<OffsetDateTime> {
        self.start
    }

    /// Whether `instant` lies inside the window.
    pub fn contains(&self, instant: OffsetDateTime) -> bool {
        match self.start {
            Some(start) => instant >= start,
            None => true,
        }
    }
}

/// The calendar date of `now` at `local_offset`.
///
/// Instants that cannot be represented at `local_offset` (the edges of the
/// supported date range) keep the date of their own offset.
pub(crate) fn local_date(now: OffsetDateTime, local_offset: UtcOffset) -> Date {
    now.checked_to_offset(local_offset).unwrap_or(now).date()
}

/// Gets the Sunday on or before `date`.
pub(crate) fn start_of_week(date: Date) -> Date {
    let days_since_sunday = date.weekday().number_days_from_sunday();
    date.saturating_sub(Duration::days(days_since_sunday as i64))
}

fn first_of_month(date: Date) -> Date {
    date.replace_day(1).unwrap_or(date)
}
