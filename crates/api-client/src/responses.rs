use crate::error::ApiError;
use core_types::{BalanceSheetSide, Category};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Both sides of the balance sheet, as fetched together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialData {
    pub assets: Vec<Category>,
    pub liabilities: Vec<Category>,
}

/// The error body some stores return alongside a failure status.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    #[serde(alias = "message")]
    pub error: String,
}

/// Error bodies are echoed into `ApiError::Status`; keep them readable.
const MAX_ERROR_BODY: usize = 200;

/// Turns a raw status and body into the typed payload or an `ApiError`.
///
/// A success body that does not match the schema (a malformed date, an amount
/// that is not a number) is a `Deserialization` error, never a default value.
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if (200..300).contains(&status) {
        return serde_json::from_str::<T>(body).map_err(|e| ApiError::Deserialization(e.to_string()));
    }

    let message = match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(parsed) => parsed.error,
        Err(_) => body.trim().chars().take(MAX_ERROR_BODY).collect(),
    };
    Err(ApiError::Status {
        status,
        body: message,
    })
}

/// Logs categories whose stored amount disagrees with their items.
///
/// Writers are responsible for recomputing the amount; a mismatch is reported
/// but the data is still used as-is.
pub fn check_categories(side: BalanceSheetSide, categories: &[Category]) {
    for category in categories.iter().filter(|c| !c.is_consistent()) {
        tracing::warn!(
            %side,
            category = %category.id,
            stored = %category.amount,
            items = %category.items_total(),
            "Category amount does not match the sum of its items."
        );
    }
}
