use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request to the data store failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("The data store answered with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to deserialize the data store response: {0}")]
    Deserialization(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}
