//! Chart bucket labels.
//!
//! A label both names a bucket on the chart's X axis and identifies the bucket
//! during aggregation. Labels are parsed back into approximate dates so that
//! buckets can be put in chronological order.
//!
//! | Period  | Label        | Example      |
//! |---------|--------------|--------------|
//! | Daily   | `DD/MM/YY`   | `05/03/24`   |
//! | Weekly  | `Sem DD/MM`  | `Sem 03/03`  |
//! | Monthly | `DD mon`     | `05 mar`     |
//! | All     | `mon/YY`     | `mar/24`     |

use time::{Date, Duration, Month};

use crate::{
    locale::{month_abbreviation, parse_month_abbreviation},
    period::{Period, start_of_week},
};

const WEEK_PREFIX: &str = "Sem ";

/// Formats the label of the bucket that `date` (a local calendar date) falls in.
pub fn format_label(date: Date, period: Period) -> String {
    match period {
        Period::Daily => format!(
            "{:02}/{:02}/{:02}",
            date.day(),
            u8::from(date.month()),
            two_digit_year(date.year())
        ),
        Period::Weekly => {
            let sunday = start_of_week(date);
            format!(
                "{WEEK_PREFIX}{:02}/{:02}",
                sunday.day(),
                u8::from(sunday.month())
            )
        }
        Period::Monthly => format!("{:02} {}", date.day(), month_abbreviation(date.month())),
        Period::All => format!(
            "{}/{:02}",
            month_abbreviation(date.month()),
            two_digit_year(date.year())
        ),
    }
}

/// Parses a label produced by [format_label] back into an approximate date.
///
/// Two-digit years are taken to be in the 2000s. Weekly and monthly labels do
/// not carry a year, so `current_year` is assumed; buckets from different
/// years can therefore sort out of order.
///
/// Days past the end of the month roll over into the next month (e.g.,
/// "29 fev" in a non-leap year is the 1st of March).
///
/// Returns `None` if `label` does not have the shape expected for `period`.
pub fn parse_label(label: &str, period: Period, current_year: i32) -> Option<Date> {
    match period {
        Period::Daily => {
            let (day, month, year) = split_three(label, '/')?;
            calendar_date(parse_two_digit_year(year)?, parse_month_number(month)?, day)
        }
        Period::Weekly => {
            let (day, month) = label.strip_prefix(WEEK_PREFIX)?.split_once('/')?;
            calendar_date(current_year, parse_month_number(month)?, day)
        }
        Period::Monthly => {
            let (day, month) = label.split_once(' ')?;
            calendar_date(current_year, parse_month_abbreviation(month)?, day)
        }
        Period::All => {
            let (month, year) = label.split_once('/')?;
            calendar_date(
                parse_two_digit_year(year)?,
                parse_month_abbreviation(month)?,
                "1",
            )
        }
    }
}

fn two_digit_year(year: i32) -> i32 {
    year.rem_euclid(100)
}

fn parse_two_digit_year(text: &str) -> Option<i32> {
    2000i32.checked_add(parse_number(text)?)
}

fn split_three(text: &str, separator: char) -> Option<(&str, &str, &str)> {
    let mut parts = text.split(separator);
    let triple = (parts.next()?, parts.next()?, parts.next()?);

    match parts.next() {
        Some(_) => None,
        None => Some(triple),
    }
}

fn parse_number(text: &str) -> Option<i32> {
    let text = text.trim();

    if text.is_empty() || !text.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }

    text.parse().ok()
}

fn parse_month_number(text: &str) -> Option<Month> {
    let number = parse_number(text)?;
    u8::try_from(number)
        .ok()
        .and_then(|number| Month::try_from(number).ok())
}

fn calendar_date(year: i32, month: Month, day: &str) -> Option<Date> {
    let day = parse_number(day).filter(|day| (1..=31).contains(day))?;
    let first_of_month = Date::from_calendar_date(year, month, 1).ok()?;

    first_of_month.checked_add(Duration::days(day as i64 - 1))
}
