use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExpenseError {
    #[error("Expense name must not be empty")]
    EmptyName,

    #[error("Invalid cost {0}: must be a positive number")]
    InvalidCost(f64),

    #[error("Invalid lifespan {0}: must be a positive number")]
    InvalidLifespan(f64),

    #[error("Invalid lifespan range: max ({max}) is less than min ({min})")]
    InvalidLifespanRange { min: f64, max: f64 },

    #[error("Expense not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ExpenseError>;
