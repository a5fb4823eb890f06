//! # Expense Lifecycle
//!
//! A library for tracking durable-good and recurring purchases: it turns stored
//! expense records into amortized cost rates, a lifecycle status and
//! replacement forecasts.
//!
//! ## Core Concepts
//!
//! - **Lifespan range**: every expense lasts somewhere between a min and a max number of days
//! - **Status**: `Active` before the min lifespan elapses, `Warning` between min and max, `Expired` after max
//! - **Cost rates**: daily/monthly/yearly amortized cost, always a min/max range
//! - **Burn rate**: the summed rates of everything not yet expired
//! - **Forecast**: items needing replacement, bucketed by how soon
//! - **Migration**: older persisted record shapes are decoded into the current one
//!
//! Nothing here reads a clock: every time-dependent call takes `now` explicitly.
//!
//! ## Example
//!
//! ```rust,ignore
//! use expense_lifecycle::*;
//! use chrono::Utc;
//!
//! let now = Utc::now();
//! let tracker = ExpenseTracker::new(TrackerConfig::default()).unwrap();
//!
//! let collection = tracker
//!     .load(&stored_json, now)
//!     .add(tracker.draft("Смартфон", 50000.0, 2.0).with_range(2.0, 3.0), now)
//!     .unwrap();
//!
//! let burn = burn_rate(collection.as_slice(), now);
//! println!("{} ₽/мес", format_money_range(burn.monthly.min, burn.monthly.max));
//!
//! for group in tracker.forecast(collection.as_slice(), now) {
//!     println!("{}: {} ₽", group.label, format_money(group.cost_subtotal));
//! }
//! ```

pub mod aggregate;
pub mod collection;
pub mod config;
pub mod error;
pub mod forecast;
pub mod format;
pub mod migration;
pub mod pluralize;
pub mod presets;
pub mod schema;
pub mod status;
pub mod utils;

pub use aggregate::*;
pub use collection::ExpenseCollection;
pub use config::TrackerConfig;
pub use error::{ExpenseError, Result};
pub use forecast::*;
pub use format::*;
pub use migration::{load_expenses, migrate};
pub use pluralize::*;
pub use presets::{ExpensePreset, LifespanPreset, EXPENSE_PRESETS, LIFESPAN_PRESETS};
pub use schema::*;
pub use status::*;
pub use utils::*;

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::Serialize;

/// Headline figures for a snapshot of expenses at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Overview {
    pub active: usize,
    pub warning: usize,
    pub expired: usize,
    pub burn_rate: BurnRate,
    /// Purchase cost of everything in `Warning` or `Expired`.
    pub due_cost: f64,
}

pub struct ExpenseTracker {
    config: TrackerConfig,
}

impl ExpenseTracker {
    pub fn new(config: TrackerConfig) -> Result<Self> {
        config.validate()?;
        info!(
            "Expense tracker using storage key '{}' and default horizon {:?}",
            config.storage_key, config.default_horizon
        );
        Ok(Self { config })
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn load(&self, json: &str, now: DateTime<Utc>) -> ExpenseCollection {
        ExpenseCollection::from_json(json, now)
    }

    /// A draft preset with the configured default period and category.
    pub fn draft(&self, name: impl Into<String>, cost: f64, lifespan: f64) -> ExpenseDraft {
        ExpenseDraft::new(name, cost, lifespan, self.config.default_period)
            .with_category(self.config.default_category)
    }

    pub fn forecast<'a>(
        &self,
        expenses: &'a [Expense],
        now: DateTime<Utc>,
    ) -> Vec<ForecastGroup<'a>> {
        bucket_forecast(
            expenses,
            now,
            ForecastPolicy::Horizon(self.config.default_horizon),
        )
    }

    pub fn overview(&self, expenses: &[Expense], now: DateTime<Utc>) -> Overview {
        let mut overview = Overview {
            active: 0,
            warning: 0,
            expired: 0,
            burn_rate: burn_rate(expenses, now),
            due_cost: 0.0,
        };

        for expense in expenses {
            match classify(expense, now).status {
                ExpenseStatus::Active => overview.active += 1,
                ExpenseStatus::Warning => {
                    overview.warning += 1;
                    overview.due_cost += expense.cost;
                }
                ExpenseStatus::Expired => {
                    overview.expired += 1;
                    overview.due_cost += expense.cost;
                }
            }
        }

        debug!(
            "Overview: {} active, {} warning, {} expired",
            overview.active, overview.warning, overview.expired
        );
        overview
    }
}
