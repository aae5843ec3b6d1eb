use thiserror::Error;

#[derive(Debug, Error)]
pub enum MenuProfitError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Missing required column: '{column}'")]
    MissingColumn { column: String },

    #[error("Non-numeric value in column '{column}' at row {row}: '{value}'")]
    NonNumericValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Invalid period selector: '{0}' (expected one of q1, q2, q3, q4, full-year)")]
    InvalidPeriod(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for MenuProfitError {
    fn from(e: serde_json::Error) -> Self {
        MenuProfitError::SerializationError(e.to_string())
    }
}

#[cfg(feature = "csv")]
impl From<csv::Error> for MenuProfitError {
    fn from(e: csv::Error) -> Self {
        MenuProfitError::SerializationError(e.to_string())
    }
}
