use crate::schema::Expense;
use crate::status::{classify, ExpenseStatus, Lifecycle};
use crate::utils::months_to_days;
use chrono::{DateTime, Duration, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

/// Forecast horizons offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Horizon {
    Week,
    Month,
    Quarter,
    HalfYear,
    Year,
    TwoYears,
    ThreeYears,
    FiveYears,
}

impl Default for Horizon {
    fn default() -> Self {
        Self::Year
    }
}

impl Horizon {
    pub const ALL: [Horizon; 8] = [
        Horizon::Week,
        Horizon::Month,
        Horizon::Quarter,
        Horizon::HalfYear,
        Horizon::Year,
        Horizon::TwoYears,
        Horizon::ThreeYears,
        Horizon::FiveYears,
    ];

    pub fn days(&self) -> i64 {
        match self {
            Horizon::Week => 7,
            Horizon::Month => months_to_days(1.0),
            Horizon::Quarter => months_to_days(3.0),
            Horizon::HalfYear => months_to_days(6.0),
            Horizon::Year => months_to_days(12.0),
            Horizon::TwoYears => months_to_days(24.0),
            Horizon::ThreeYears => months_to_days(36.0),
            Horizon::FiveYears => months_to_days(60.0),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Horizon::Week => "1 неделя",
            Horizon::Month => "1 месяц",
            Horizon::Quarter => "3 месяца",
            Horizon::HalfYear => "6 месяцев",
            Horizon::Year => "1 год",
            Horizon::TwoYears => "2 года",
            Horizon::ThreeYears => "3 года",
            Horizon::FiveYears => "5 лет",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForecastPolicy {
    /// Fixed 7/30/90-day windows.
    FixedHorizon,
    /// Month-based buckets up to a user-selected horizon.
    Horizon(Horizon),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ForecastWindow {
    ThisWeek,
    ThisMonth,
    ThisQuarter,
    Imminent,
    NearTerm,
    MediumTerm,
    LongHorizon,
}

impl ForecastWindow {
    pub fn label(&self) -> &'static str {
        match self {
            ForecastWindow::ThisWeek => "На этой неделе",
            ForecastWindow::ThisMonth => "В течение месяца",
            ForecastWindow::ThisQuarter => "В течение 3 месяцев",
            ForecastWindow::Imminent => "В ближайший месяц",
            ForecastWindow::NearTerm => "Через 1–6 месяцев",
            ForecastWindow::MediumTerm => "Через 6–12 месяцев",
            ForecastWindow::LongHorizon => "Через 1–5 лет",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ForecastGroupKind {
    Expired,
    Warning,
    Upcoming(ForecastWindow),
}

impl ForecastGroupKind {
    pub fn label(&self) -> &'static str {
        match self {
            ForecastGroupKind::Expired => "Требуют замены",
            ForecastGroupKind::Warning => "Могут потребовать замены",
            ForecastGroupKind::Upcoming(window) => window.label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastItem<'a> {
    pub expense: &'a Expense,
    pub lifecycle: Lifecycle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastGroup<'a> {
    pub label: &'static str,
    pub kind: ForecastGroupKind,
    pub items: Vec<ForecastItem<'a>>,
    /// Sum of the items' purchase costs, not their amortized rates.
    pub cost_subtotal: f64,
}

impl<'a> ForecastGroup<'a> {
    fn new(kind: ForecastGroupKind, items: Vec<ForecastItem<'a>>) -> Self {
        let cost_subtotal = items.iter().map(|i| i.expense.cost).sum();
        Self {
            label: kind.label(),
            kind,
            items,
            cost_subtotal,
        }
    }
}

/// Groups expenses needing replacement now or within the policy's horizon.
///
/// Output order: expired, warning, then upcoming windows from nearest to
/// farthest. Groups without items are omitted.
pub fn bucket_forecast(
    expenses: &[Expense],
    now: DateTime<Utc>,
    policy: ForecastPolicy,
) -> Vec<ForecastGroup<'_>> {
    let mut expired = Vec::new();
    let mut warning = Vec::new();
    let mut active = Vec::new();

    for expense in expenses {
        let lifecycle = classify(expense, now);
        let item = ForecastItem { expense, lifecycle };
        match lifecycle.status {
            ExpenseStatus::Expired => expired.push(item),
            ExpenseStatus::Warning => warning.push(item),
            ExpenseStatus::Active => active.push(item),
        }
    }

    let (limit, windows) = match policy {
        ForecastPolicy::FixedHorizon => (
            now + Duration::days(90),
            vec![
                (ForecastWindow::ThisWeek, now + Duration::days(7)),
                (ForecastWindow::ThisMonth, now + Duration::days(30)),
                (ForecastWindow::ThisQuarter, now + Duration::days(90)),
            ],
        ),
        ForecastPolicy::Horizon(horizon) => (
            now + Duration::days(horizon.days()),
            vec![
                (ForecastWindow::Imminent, month_offset(now, 1.0)),
                (ForecastWindow::NearTerm, month_offset(now, 6.0)),
                (ForecastWindow::MediumTerm, month_offset(now, 12.0)),
                (ForecastWindow::LongHorizon, DateTime::<Utc>::MAX_UTC),
            ],
        ),
    };

    let mut upcoming: Vec<ForecastItem<'_>> = active
        .into_iter()
        .filter(|i| i.lifecycle.end_min <= limit)
        .collect();
    upcoming.sort_by_key(|i| i.lifecycle.end_min);

    let mut buckets: Vec<Vec<ForecastItem<'_>>> = windows.iter().map(|_| Vec::new()).collect();
    for item in upcoming {
        if let Some(idx) = windows
            .iter()
            .position(|(_, bound)| item.lifecycle.end_min <= *bound)
        {
            buckets[idx].push(item);
        }
    }

    let mut groups = Vec::new();
    if !expired.is_empty() {
        groups.push(ForecastGroup::new(ForecastGroupKind::Expired, expired));
    }
    if !warning.is_empty() {
        groups.push(ForecastGroup::new(ForecastGroupKind::Warning, warning));
    }
    for ((window, _), items) in windows.into_iter().zip(buckets) {
        if !items.is_empty() {
            groups.push(ForecastGroup::new(ForecastGroupKind::Upcoming(window), items));
        }
    }

    debug!(
        "Forecast with {:?} produced {} groups from {} expenses",
        policy,
        groups.len(),
        expenses.len()
    );

    groups
}

/// Total replacement spend across all groups.
pub fn total_replacement_cost(groups: &[ForecastGroup<'_>]) -> f64 {
    groups.iter().map(|g| g.cost_subtotal).sum()
}

fn month_offset(now: DateTime<Utc>, months: f64) -> DateTime<Utc> {
    now + Duration::days(months_to_days(months))
}
