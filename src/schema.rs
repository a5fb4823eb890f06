use crate::error::{ExpenseError, Result};
use crate::utils::normalize_to_days;
use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Average length of a calendar month in days.
pub const DAYS_IN_MONTH: f64 = 30.44;

/// Average length of a calendar year in days.
pub const DAYS_IN_YEAR: f64 = 365.25;

/// Key under which the caller persists the serialized expense collection.
pub const STORAGE_KEY: &str = "leaas-expenses";

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[schemars(description = "The lifespan was entered as a number of days")]
    Days,

    #[schemars(description = "The lifespan was entered in months (30.44 days each)")]
    Months,

    #[schemars(description = "The lifespan was entered in years (365.25 days each)")]
    Years,
}

impl Default for Period {
    fn default() -> Self {
        Self::Days
    }
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Days, Period::Months, Period::Years];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Days => "days",
            Period::Months => "months",
            Period::Years => "years",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == key)
    }

    /// Number of days in one unit of this period.
    pub fn days_per_unit(&self) -> f64 {
        match self {
            Period::Days => 1.0,
            Period::Months => DAYS_IN_MONTH,
            Period::Years => DAYS_IN_YEAR,
        }
    }
}

/// The closed set of expense categories. Declaration order is the display order.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Household,
    Clothing,
    Tech,
    Transport,
    Health,
    Subscriptions,
    Entertainment,
    Beauty,
    Education,
    Sports,
    Other,
}

impl Default for Category {
    fn default() -> Self {
        Self::Other
    }
}

impl Category {
    pub const ALL: [Category; 12] = [
        Category::Food,
        Category::Household,
        Category::Clothing,
        Category::Tech,
        Category::Transport,
        Category::Health,
        Category::Subscriptions,
        Category::Entertainment,
        Category::Beauty,
        Category::Education,
        Category::Sports,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Household => "household",
            Category::Clothing => "clothing",
            Category::Tech => "tech",
            Category::Transport => "transport",
            Category::Health => "health",
            Category::Subscriptions => "subscriptions",
            Category::Entertainment => "entertainment",
            Category::Beauty => "beauty",
            Category::Education => "education",
            Category::Sports => "sports",
            Category::Other => "other",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == key)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Food => "Еда",
            Category::Household => "Быт",
            Category::Clothing => "Одежда",
            Category::Tech => "Техника",
            Category::Transport => "Транспорт",
            Category::Health => "Здоровье",
            Category::Subscriptions => "Подписки",
            Category::Entertainment => "Развлечения",
            Category::Beauty => "Красота",
            Category::Education => "Образование",
            Category::Sports => "Спорт",
            Category::Other => "Другое",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Category::Food => "🍞",
            Category::Household => "🏠",
            Category::Clothing => "👕",
            Category::Tech => "💻",
            Category::Transport => "🚗",
            Category::Health => "💊",
            Category::Subscriptions => "📱",
            Category::Entertainment => "🎮",
            Category::Beauty => "💅",
            Category::Education => "📚",
            Category::Sports => "🏋️",
            Category::Other => "📦",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[schemars(description = "Opaque unique identifier, assigned once and never changed")]
    pub id: String,

    #[schemars(description = "Display name of the item (e.g., 'Toothbrush', 'Laptop')")]
    pub name: String,

    #[schemars(description = "Purchase cost of one unit of the item")]
    pub cost: f64,

    #[schemars(description = "Shortest expected lifespan, in lifespanPeriod units")]
    pub lifespan_min: f64,

    #[schemars(description = "Longest expected lifespan, in lifespanPeriod units")]
    pub lifespan_max: f64,

    #[schemars(description = "lifespanMin normalized to days")]
    pub lifespan_days_min: f64,

    #[schemars(description = "lifespanMax normalized to days")]
    pub lifespan_days_max: f64,

    #[schemars(description = "The unit the lifespan range was entered in. Only used for editing.")]
    pub lifespan_period: Period,

    pub category: Category,

    #[schemars(
        description = "Date in YYYY-MM-DD format when the current lifespan window began (purchase or last replacement)"
    )]
    pub start_date: NaiveDate,

    #[schemars(description = "How many times the item has been replaced")]
    pub replacement_count: u32,

    #[schemars(description = "Creation timestamp. Never changed by edits or replacements.")]
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Midpoint of the lifespan range in days.
    pub fn lifespan_days_avg(&self) -> f64 {
        (self.lifespan_days_min + self.lifespan_days_max) / 2.0
    }

    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(Expense)
    }

    pub fn schema_as_json() -> std::result::Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}

/// User-editable fields of an expense. Used for both adding and editing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDraft {
    pub name: String,
    pub cost: f64,
    pub lifespan_min: f64,
    pub lifespan_max: f64,
    pub lifespan_period: Period,
    #[serde(default)]
    pub category: Category,
    /// Defaults to today when adding.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub replacement_count: u32,
}

impl ExpenseDraft {
    pub fn new(name: impl Into<String>, cost: f64, lifespan: f64, period: Period) -> Self {
        Self {
            name: name.into(),
            cost,
            lifespan_min: lifespan,
            lifespan_max: lifespan,
            lifespan_period: period,
            category: Category::Other,
            start_date: None,
            replacement_count: 0,
        }
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.lifespan_min = min;
        self.lifespan_max = max;
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ExpenseError::EmptyName);
        }

        if !self.cost.is_finite() || self.cost <= 0.0 {
            return Err(ExpenseError::InvalidCost(self.cost));
        }

        for value in [self.lifespan_min, self.lifespan_max] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ExpenseError::InvalidLifespan(value));
            }
        }

        if self.lifespan_max < self.lifespan_min {
            return Err(ExpenseError::InvalidLifespanRange {
                min: self.lifespan_min,
                max: self.lifespan_max,
            });
        }

        Ok(())
    }

    /// The lifespan range normalized to days, as `(min, max)`.
    pub fn lifespan_days(&self) -> (f64, f64) {
        (
            normalize_to_days(self.lifespan_min, self.lifespan_period),
            normalize_to_days(self.lifespan_max, self.lifespan_period),
        )
    }
}
