use crate::error::{ExpenseError, Result};
use crate::forecast::Horizon;
use crate::schema::{Category, Period, STORAGE_KEY};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrackerConfig {
    /// Key the caller stores the serialized collection under.
    pub storage_key: String,
    /// Horizon used by the default forecast.
    pub default_horizon: Horizon,
    /// Unit preselected for new expenses.
    pub default_period: Period,
    /// Category preselected for new expenses.
    pub default_category: Category,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            default_horizon: Horizon::Year,
            default_period: Period::Months,
            default_category: Category::Other,
        }
    }
}

impl TrackerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: TrackerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.storage_key.trim().is_empty() {
            return Err(ExpenseError::InvalidConfig(
                "storage key must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
