use crate::error::{ExpenseError, Result};
use crate::migration::{load_expenses, new_id};
use crate::schema::{Expense, ExpenseDraft};
use chrono::{DateTime, NaiveDate, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

/// An immutable snapshot of the user's expenses.
///
/// Every mutation returns a new collection and leaves `self` untouched; the
/// caller persists the result and publishes it as the next snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseCollection {
    expenses: Vec<Expense>,
}

impl ExpenseCollection {
    pub fn new(expenses: Vec<Expense>) -> Self {
        Self { expenses }
    }

    /// Reads a persisted payload, migrating every record to the current schema.
    pub fn from_json(json: &str, now: DateTime<Utc>) -> Self {
        Self::new(load_expenses(json, now))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.expenses)?)
    }

    pub fn as_slice(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    /// Adds a new expense in front of the existing ones.
    pub fn add(&self, draft: ExpenseDraft, now: DateTime<Utc>) -> Result<Self> {
        draft.validate()?;
        let (days_min, days_max) = draft.lifespan_days();

        let expense = Expense {
            id: new_id(),
            name: draft.name.trim().to_string(),
            cost: draft.cost,
            lifespan_min: draft.lifespan_min,
            lifespan_max: draft.lifespan_max,
            lifespan_days_min: days_min,
            lifespan_days_max: days_max,
            lifespan_period: draft.lifespan_period,
            category: draft.category,
            start_date: draft.start_date.unwrap_or_else(|| now.date_naive()),
            replacement_count: draft.replacement_count,
            created_at: now,
        };
        debug!("Adding expense {} ({})", expense.id, expense.name);

        let mut expenses = Vec::with_capacity(self.expenses.len() + 1);
        expenses.push(expense);
        expenses.extend(self.expenses.iter().cloned());
        Ok(Self::new(expenses))
    }

    /// Applies an edit. `id` and `created_at` are preserved.
    pub fn update(&self, id: &str, draft: ExpenseDraft) -> Result<Self> {
        draft.validate()?;
        let (days_min, days_max) = draft.lifespan_days();

        self.map_one(id, |e| Expense {
            name: draft.name.trim().to_string(),
            cost: draft.cost,
            lifespan_min: draft.lifespan_min,
            lifespan_max: draft.lifespan_max,
            lifespan_days_min: days_min,
            lifespan_days_max: days_max,
            lifespan_period: draft.lifespan_period,
            category: draft.category,
            start_date: draft.start_date.unwrap_or(e.start_date),
            replacement_count: draft.replacement_count,
            ..e.clone()
        })
    }

    /// Marks an item as replaced today, starting a new lifespan window.
    pub fn replace(&self, id: &str, today: NaiveDate, new_cost: Option<f64>) -> Result<Self> {
        if let Some(cost) = new_cost {
            if !cost.is_finite() || cost <= 0.0 {
                return Err(ExpenseError::InvalidCost(cost));
            }
        }

        self.map_one(id, |e| Expense {
            start_date: today,
            replacement_count: e.replacement_count.saturating_add(1),
            cost: new_cost.unwrap_or(e.cost),
            ..e.clone()
        })
    }

    pub fn remove(&self, id: &str) -> Result<Self> {
        if self.get(id).is_none() {
            return Err(ExpenseError::NotFound(id.to_string()));
        }

        let expenses = self
            .expenses
            .iter()
            .filter(|e| e.id != id)
            .cloned()
            .collect();
        Ok(Self::new(expenses))
    }

    fn map_one(&self, id: &str, f: impl Fn(&Expense) -> Expense) -> Result<Self> {
        if self.get(id).is_none() {
            return Err(ExpenseError::NotFound(id.to_string()));
        }

        let expenses = self
            .expenses
            .iter()
            .map(|e| if e.id == id { f(e) } else { e.clone() })
            .collect();
        Ok(Self::new(expenses))
    }
}

impl From<Vec<Expense>> for ExpenseCollection {
    fn from(expenses: Vec<Expense>) -> Self {
        Self::new(expenses)
    }
}
