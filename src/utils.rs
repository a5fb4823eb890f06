use crate::schema::{Period, DAYS_IN_MONTH, DAYS_IN_YEAR};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Converts a lifespan entered in `period` units to whole days.
///
/// Day values pass through untouched; months and years are rounded once here
/// so that every derived figure works from the same day count.
pub fn normalize_to_days(value: f64, period: Period) -> f64 {
    match period {
        Period::Days => value,
        Period::Months => (value * DAYS_IN_MONTH).round(),
        Period::Years => (value * DAYS_IN_YEAR).round(),
    }
}

/// Inverse of [`normalize_to_days`], without rounding.
pub fn days_to_period(days: f64, period: Period) -> f64 {
    days / period.days_per_unit()
}

pub fn daily_cost(cost: f64, lifespan_days: f64) -> f64 {
    // Corrupted records degrade to "free" instead of dividing by zero.
    if lifespan_days.is_nan() || lifespan_days <= 0.0 {
        return 0.0;
    }
    cost / lifespan_days
}

pub fn monthly_cost(cost: f64, lifespan_days: f64) -> f64 {
    daily_cost(cost, lifespan_days) * DAYS_IN_MONTH
}

pub fn yearly_cost(cost: f64, lifespan_days: f64) -> f64 {
    daily_cost(cost, lifespan_days) * DAYS_IN_YEAR
}

/// A `[min, max]` pair of amounts derived from a lifespan range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CostRange {
    pub min: f64,
    pub max: f64,
}

impl CostRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Rate range for a cost spread over `[days_min, days_max]`.
    ///
    /// A longer lifespan means a lower rate, so `min` pairs with `days_max`.
    pub fn from_lifespan(
        cost: f64,
        days_min: f64,
        days_max: f64,
        rate: fn(f64, f64) -> f64,
    ) -> Self {
        Self {
            min: rate(cost, days_max),
            max: rate(cost, days_min),
        }
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    pub fn approx_eq(&self, other: &CostRange, tolerance: f64) -> bool {
        (self.min - other.min).abs() <= tolerance && (self.max - other.max).abs() <= tolerance
    }
}

impl Add for CostRange {
    type Output = CostRange;

    fn add(self, rhs: CostRange) -> CostRange {
        CostRange {
            min: self.min + rhs.min,
            max: self.max + rhs.max,
        }
    }
}

impl AddAssign for CostRange {
    fn add_assign(&mut self, rhs: CostRange) {
        self.min += rhs.min;
        self.max += rhs.max;
    }
}

impl Sum for CostRange {
    fn sum<I: Iterator<Item = CostRange>>(iter: I) -> Self {
        iter.fold(CostRange::default(), Add::add)
    }
}

/// The instant a calendar date begins (UTC midnight).
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// Adds a possibly fractional number of days to an instant.
///
/// Saturates at the representable range instead of overflowing.
pub fn add_days(instant: DateTime<Utc>, days: f64) -> DateTime<Utc> {
    let saturated = if days < 0.0 {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    };

    Duration::try_milliseconds((days * MILLIS_PER_DAY).round() as i64)
        .and_then(|offset| instant.checked_add_signed(offset))
        .unwrap_or(saturated)
}

/// Whole days from `now` until `end`, rounded up and floored at zero.
pub fn days_until(now: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let diff = (end - now).num_milliseconds() as f64 / MILLIS_PER_DAY;
    diff.ceil().max(0.0) as i64
}

/// Offset in days for a fractional number of months, rounded the same way as
/// [`normalize_to_days`].
pub fn months_to_days(months: f64) -> i64 {
    normalize_to_days(months, Period::Months) as i64
}
