//! Decoding of persisted records into canonical [`Expense`] values.
//!
//! Three record shapes have been persisted over time:
//!
//! 1. `lifespanDays` only (a single lifespan, always in days)
//! 2. `lifespanValue` + `lifespanPeriod` + `lifespanDays`
//! 3. the current min/max range (`lifespanMin`, `lifespanMax`, `lifespanDaysMin`, `lifespanDaysMax`)
//!
//! Decoding is total: every absent or wrong-typed field falls back to a default
//! and the result is stable under repeated migration.

use crate::schema::{Category, Expense, Period};
use crate::utils::{days_to_period, normalize_to_days, start_of_day};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use log::{debug, info, warn};
use serde_json::{Map, Value};
use uuid::Uuid;

pub const DEFAULT_NAME: &str = "Без названия";

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Converts an arbitrary persisted record into the current schema.
pub fn migrate(raw: &Value, now: DateTime<Utc>) -> Expense {
    let empty = Map::new();
    let record = raw.as_object().unwrap_or(&empty);

    let id = match record.get("id").and_then(Value::as_str) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => {
            debug!("Record without id, assigning a new one");
            new_id()
        }
    };

    let name = match record.get("name").and_then(Value::as_str) {
        Some(name) if !name.trim().is_empty() => name.to_string(),
        _ => DEFAULT_NAME.to_string(),
    };

    let cost = number(record, "cost").unwrap_or(0.0);

    let lifespan_period = match record.get("lifespanPeriod").and_then(Value::as_str) {
        Some(key) => Period::from_key(key).unwrap_or_else(|| {
            debug!("Unknown lifespan period '{}' for record {}", key, id);
            Period::Days
        }),
        None => Period::Days,
    };

    let category = match record.get("category").and_then(Value::as_str) {
        Some(key) => Category::from_key(key).unwrap_or_else(|| {
            debug!("Unknown category '{}' for record {}", key, id);
            Category::Other
        }),
        None => Category::Other,
    };

    let (lifespan_min, lifespan_max, lifespan_days_min, lifespan_days_max) =
        resolve_lifespan(record, lifespan_period);

    let created_at = record
        .get("createdAt")
        .and_then(Value::as_str)
        .and_then(parse_timestamp)
        .unwrap_or(now);

    let start_date = record
        .get("startDate")
        .and_then(Value::as_str)
        .and_then(parse_date)
        .unwrap_or_else(|| created_at.date_naive());

    let replacement_count = record
        .get("replacementCount")
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n.floor().min(u32::MAX as f64) as u32)
        .unwrap_or(0);

    Expense {
        id,
        name,
        cost,
        lifespan_min,
        lifespan_max,
        lifespan_days_min,
        lifespan_days_max,
        lifespan_period,
        category,
        start_date,
        replacement_count,
        created_at,
    }
}

/// Parses a whole persisted collection.
///
/// An unparseable or non-array payload is treated as "no data yet". Elements
/// that are not objects are skipped.
pub fn load_expenses(json: &str, now: DateTime<Utc>) -> Vec<Expense> {
    if json.trim().is_empty() {
        return Vec::new();
    }

    let payload: Value = match serde_json::from_str(json) {
        Ok(value) => value,
        Err(e) => {
            warn!("Discarding unparseable expense payload: {}", e);
            return Vec::new();
        }
    };

    let Some(records) = payload.as_array() else {
        warn!("Discarding expense payload that is not an array");
        return Vec::new();
    };

    let expenses: Vec<Expense> = records
        .iter()
        .filter(|r| {
            let keep = r.is_object();
            if !keep {
                debug!("Skipping non-object record: {}", r);
            }
            keep
        })
        .map(|r| migrate(r, now))
        .collect();

    info!("Loaded {} expenses", expenses.len());
    expenses
}

/// Returns `(min, max, days_min, days_max)` with both ranges ordered.
fn resolve_lifespan(record: &Map<String, Value>, period: Period) -> (f64, f64, f64, f64) {
    let legacy_days = positive(record, "lifespanDays");
    let legacy_value = positive(record, "lifespanValue");
    let explicit_min = positive(record, "lifespanMin");
    let explicit_max = positive(record, "lifespanMax");
    let explicit_days_min = positive(record, "lifespanDaysMin");
    let explicit_days_max = positive(record, "lifespanDaysMax");
    let in_units = |days: f64| days_to_period(days, period);

    // Unit values missing: recover them from whichever day bound survived.
    let min = explicit_min
        .or(legacy_value)
        .or_else(|| {
            explicit_days_min
                .or(legacy_days)
                .or(explicit_days_max)
                .map(in_units)
        })
        .unwrap_or(0.0);
    let max = explicit_max
        .or_else(|| explicit_days_max.map(in_units))
        .unwrap_or(min);

    let days_min = explicit_days_min
        .or(if explicit_min.is_none() { legacy_days } else { None })
        .unwrap_or_else(|| normalize_to_days(min, period));
    let days_max = explicit_days_max.unwrap_or_else(|| {
        if explicit_max.is_none() {
            days_min
        } else {
            normalize_to_days(max, period)
        }
    });

    let (min, max) = ordered(min, max);
    let (days_min, days_max) = ordered(days_min, days_max);
    (min, max, days_min, days_max)
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if b < a {
        (b, a)
    } else {
        (a, b)
    }
}

fn number(record: &Map<String, Value>, key: &str) -> Option<f64> {
    record
        .get(key)
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite())
}

fn positive(record: &Map<String, Value>, key: &str) -> Option<f64> {
    number(record, key).filter(|n| *n > 0.0)
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    parse_date(s).map(start_of_day)
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let prefix = s.get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}
