use crate::schema::{Category, Expense};
use crate::status::{classify, ExpenseStatus};
use crate::utils::{daily_cost, monthly_cost, yearly_cost, CostRange};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Rates {
    pub daily: CostRange,
    pub monthly: CostRange,
    pub yearly: CostRange,
}

impl Rates {
    fn accumulate(&mut self, other: Rates) {
        self.daily += other.daily;
        self.monthly += other.monthly;
        self.yearly += other.yearly;
    }
}

pub fn expense_rates(expense: &Expense) -> Rates {
    let (cost, min, max) = (
        expense.cost,
        expense.lifespan_days_min,
        expense.lifespan_days_max,
    );
    Rates {
        daily: CostRange::from_lifespan(cost, min, max, daily_cost),
        monthly: CostRange::from_lifespan(cost, min, max, monthly_cost),
        yearly: CostRange::from_lifespan(cost, min, max, yearly_cost),
    }
}

pub fn monthly_range(expense: &Expense) -> CostRange {
    expense_rates(expense).monthly
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup<'a> {
    pub items: Vec<&'a Expense>,
    pub monthly: CostRange,
}

/// Groups expenses by category. Iteration follows the fixed category order and
/// categories with no expenses are absent.
pub fn aggregate_by_category(expenses: &[Expense]) -> BTreeMap<Category, CategoryGroup<'_>> {
    let mut groups: BTreeMap<Category, CategoryGroup<'_>> = BTreeMap::new();

    for expense in expenses {
        let group = groups
            .entry(expense.category)
            .or_insert_with(|| CategoryGroup {
                items: Vec::new(),
                monthly: CostRange::default(),
            });
        group.items.push(expense);
        group.monthly += monthly_range(expense);
    }

    groups
}

pub fn total_monthly(expenses: &[Expense]) -> CostRange {
    expenses.iter().map(monthly_range).sum()
}

pub fn total_rates(expenses: &[Expense]) -> Rates {
    let mut totals = Rates::default();
    for expense in expenses {
        totals.accumulate(expense_rates(expense));
    }
    totals
}

/// Aggregate spending rate of everything still in use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BurnRate {
    pub count: usize,
    pub daily: CostRange,
    pub monthly: CostRange,
    pub yearly: CostRange,
}

pub fn burn_rate(expenses: &[Expense], now: DateTime<Utc>) -> BurnRate {
    let mut rates = Rates::default();
    let mut count = 0;

    for expense in expenses {
        if classify(expense, now).status == ExpenseStatus::Expired {
            continue;
        }
        rates.accumulate(expense_rates(expense));
        count += 1;
    }

    BurnRate {
        count,
        daily: rates.daily,
        monthly: rates.monthly,
        yearly: rates.yearly,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: Category,
    pub monthly: f64,
    pub percentage: f64,
}

/// Share of the monthly spend per category, using the midpoint lifespan.
pub fn category_shares(expenses: &[Expense]) -> Vec<CategoryShare> {
    let mut totals: BTreeMap<Category, f64> = BTreeMap::new();
    for expense in expenses {
        *totals.entry(expense.category).or_default() +=
            monthly_cost(expense.cost, expense.lifespan_days_avg());
    }

    let grand_total: f64 = totals.values().sum();
    if grand_total <= 0.0 {
        return Vec::new();
    }

    totals
        .into_iter()
        .filter(|(_, value)| *value > 0.0)
        .map(|(category, monthly)| CategoryShare {
            category,
            monthly,
            percentage: monthly / grand_total * 100.0,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortKey {
    Name,
    Cost,
    AverageMonthlyCost,
    AverageRemainingDays,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

pub fn sort_expenses<'a>(
    expenses: &'a [Expense],
    key: SortKey,
    direction: SortDirection,
    now: DateTime<Utc>,
) -> Vec<&'a Expense> {
    let mut keyed: Vec<(&Expense, f64)> = expenses
        .iter()
        .map(|e| {
            let value = match key {
                SortKey::Name => 0.0,
                SortKey::Cost => e.cost,
                SortKey::AverageMonthlyCost => monthly_range(e).midpoint(),
                SortKey::AverageRemainingDays => {
                    let remaining = classify(e, now).remaining;
                    (remaining.min + remaining.max) as f64 / 2.0
                }
            };
            (e, value)
        })
        .collect();

    keyed.sort_by(|(a, va), (b, vb)| {
        let ordering = match key {
            SortKey::Name => compare_names(&a.name, &b.name),
            _ => va.partial_cmp(vb).unwrap_or(Ordering::Equal),
        };
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });

    keyed.into_iter().map(|(e, _)| e).collect()
}

/// Case-insensitive comparison with `ё` collated right after `е`.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

fn collation_key(s: &str) -> Vec<(char, u8)> {
    s.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'ё' => ('е', 1),
            other => (other, 0),
        })
        .collect()
}

/// Case-insensitive substring search on the name. A blank query matches everything.
pub fn filter_by_name<'a>(expenses: &'a [Expense], query: &str) -> Vec<&'a Expense> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return expenses.iter().collect();
    }

    expenses
        .iter()
        .filter(|e| e.name.to_lowercase().contains(&query))
        .collect()
}
