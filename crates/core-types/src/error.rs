use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Invalid date '{0}': expected YYYY-MM or YYYY-MM-DD")]
    InvalidDate(String),

    #[error("{0} not found: {1}")]
    NotFound(String, String),
}
