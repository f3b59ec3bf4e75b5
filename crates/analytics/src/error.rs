use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("Invalid input for calculation '{0}': {1}")]
    InvalidInput(String, String),

    #[error("Error in calculation: {0}")]
    Calculation(String),
}
