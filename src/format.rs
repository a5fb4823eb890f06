//! Display formatting for money, lifespans and dates (ru-RU conventions).

use crate::pluralize::{pluralize, pluralize_days, pluralize_months, pluralize_years};
use crate::schema::{DAYS_IN_MONTH, DAYS_IN_YEAR};
use chrono::{Datelike, NaiveDate};

/// ru-RU digit group separator (no-break space).
pub const GROUP_SEPARATOR: char = '\u{a0}';

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "янв.", "февр.", "мар.", "апр.", "мая", "июн.", "июл.", "авг.", "сент.", "окт.", "нояб.",
    "дек.",
];

/// Formats an amount of money.
///
/// - below 1: always two decimals with a dot (`0.50`)
/// - below 10: up to two decimals with a decimal comma (`5,75`, `5,5`)
/// - otherwise: a whole number, grouped from five digits up (`1500`, `15 000`)
pub fn format_money(value: f64) -> String {
    if value < 1.0 {
        return format!("{:.2}", value);
    }

    if value < 10.0 {
        return format_decimal(value, 2);
    }

    group_digits(value.round() as i64)
}

/// Formats a money range, collapsing bounds that differ by less than half a unit.
pub fn format_money_range(min: f64, max: f64) -> String {
    if (max - min).abs() < 0.5 {
        return format_money(min);
    }
    format!("{} - {}", format_money(min), format_money(max))
}

pub fn format_lifespan(days: f64) -> String {
    if days < DAYS_IN_MONTH {
        return format!("{} {}", format_decimal(days, 1), pluralize_days(days));
    }

    if days < DAYS_IN_YEAR {
        let months = (days / DAYS_IN_MONTH).round();
        return format!("{} {}", months, pluralize_months(months));
    }

    let years = (days / DAYS_IN_YEAR * 10.0).round() / 10.0;
    format!("{} {}", format_decimal(years, 1), year_word(years))
}

/// Formats a lifespan range as `"a - b"`.
///
/// Collapses to a single value when the bounds are equal, and also when both
/// bounds render to the same text (91 and 92 days are both "3 месяца").
pub fn format_lifespan_range(min_days: f64, max_days: f64) -> String {
    let min = format_lifespan(min_days);
    if min_days == max_days {
        return min;
    }

    let max = format_lifespan(max_days);
    if min == max {
        return min;
    }
    format!("{} - {}", min, max)
}

/// Day and abbreviated month, with the year only when it differs from `today`'s.
pub fn format_short_date(date: NaiveDate, today: NaiveDate) -> String {
    let month = MONTH_ABBREVIATIONS[date.month0() as usize];
    if date.year() == today.year() {
        format!("{} {}", date.day(), month)
    } else {
        format!("{} {} {} г.", date.day(), month, date.year())
    }
}

pub fn format_date_range(min: NaiveDate, max: NaiveDate, today: NaiveDate) -> String {
    if min == max {
        return format_short_date(min, today);
    }
    format!(
        "{} - {}",
        format_short_date(min, today),
        format_short_date(max, today)
    )
}

// Fractional quantities agree with the paucal form ("1,5 года").
fn year_word(years: f64) -> &'static str {
    if years.fract() != 0.0 {
        return pluralize(2.0, "год", "года", "лет");
    }
    pluralize_years(years)
}

/// Rounds to at most `max_decimals` places, trims trailing zeros and uses a
/// decimal comma.
fn format_decimal(value: f64, max_decimals: usize) -> String {
    let fixed = format!("{:.*}", max_decimals, value);
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };
    trimmed.replace('.', ",")
}

// ru-RU leaves four-digit numbers ungrouped.
fn group_digits(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    if digits.len() < 5 {
        return value.to_string();
    }

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(ch);
    }

    if value < 0 {
        grouped.insert(0, '-');
    }
    grouped
}
