//! Formatting of money values for display.
//!
//! Amounts are kept unrounded everywhere else in the crate; rounding only
//! happens here.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

/// Formats `number` as Brazilian reais with two decimal places, e.g.
/// "R$1,234.50" or "-R$12.00". NaN is shown as "-", like on the charts.
pub fn format_currency(number: f64) -> String {
    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency("R$")
            .expect("currency prefix is short enough")
            .precision(Precision::Decimals(2))
    });

    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::currency("-R$")
            .expect("currency prefix is short enough")
            .precision(Precision::Decimals(2))
    });

    if number.is_nan() {
        return "-".to_owned();
    }

    let formatted_string = if number < 0.0 {
        negative_fmt.fmt_string(number.abs())
    } else if number > 0.0 {
        positive_fmt.fmt_string(number)
    } else {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        return "R$0.00".to_owned();
    };

    pad_decimals(formatted_string)
}

/// Formats a goal progress percentage with one decimal place, e.g. "42.5%".
pub fn format_percentage(value: f64) -> String {
    format!("{value:.1}%")
}

// numfmt omits trailing zeros, so "12.30" is rendered as "12.3" and "12.00" as "12".
fn pad_decimals(mut formatted_string: String) -> String {
    let decimals = formatted_string
        .rfind('.')
        .map(|position| formatted_string.len() - position - 1);

    match decimals {
        None => formatted_string.push_str(".00"),
        Some(0) => formatted_string.push_str("00"),
        Some(1) => formatted_string.push('0'),
        Some(_) => {}
    }

    formatted_string
}
