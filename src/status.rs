use crate::schema::Expense;
use crate::utils::{add_days, days_until, start_of_day};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseStatus {
    /// The shortest expected lifespan has not elapsed yet.
    Active,
    /// Inside the uncertain replacement window between the two lifespan bounds.
    Warning,
    /// Even the longest expected lifespan has elapsed.
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemainingDays {
    pub min: i64,
    pub max: i64,
}

/// Everything derived from an expense's current lifespan window at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lifecycle {
    pub status: ExpenseStatus,
    pub end_min: DateTime<Utc>,
    pub end_max: DateTime<Utc>,
    pub remaining: RemainingDays,
}

pub fn end_dates(expense: &Expense) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = start_of_day(expense.start_date);
    (
        add_days(start, expense.lifespan_days_min),
        add_days(start, expense.lifespan_days_max),
    )
}

/// Classifies `expense` against a single sampled `now`.
///
/// Both boundaries are compared against the same instant, so the result is
/// always internally consistent.
pub fn classify(expense: &Expense, now: DateTime<Utc>) -> Lifecycle {
    let (end_min, end_max) = end_dates(expense);

    let status = if now <= end_min {
        ExpenseStatus::Active
    } else if now <= end_max {
        ExpenseStatus::Warning
    } else {
        ExpenseStatus::Expired
    };

    Lifecycle {
        status,
        end_min,
        end_max,
        remaining: RemainingDays {
            min: days_until(now, end_min),
            max: days_until(now, end_max),
        },
    }
}

pub fn status_of(expense: &Expense, now: DateTime<Utc>) -> ExpenseStatus {
    classify(expense, now).status
}

/// `true` while the item does not need replacing yet.
pub fn is_active(expense: &Expense, now: DateTime<Utc>) -> bool {
    status_of(expense, now) == ExpenseStatus::Active
}
