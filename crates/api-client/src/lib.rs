use crate::error::ApiError;
use async_trait::async_trait;
use configuration::DataStoreConfig;
use core_types::{BalanceSheetSide, Category, MonthlyBudget, Stock};
use reqwest::{Method, Url};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

pub mod error;
pub mod responses;
// --- Public API ---
pub use responses::{check_categories, decode_response, ApiErrorResponse, FinancialData};

/// The generic, abstract interface for the dashboard's data store.
/// This trait is the contract the CLI works against, allowing the
/// underlying implementation (REST or in-memory) to be swapped out.
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Fetches the asset categories with their items.
    async fn get_assets(&self) -> Result<Vec<Category>, ApiError>;

    /// Fetches the liability categories with their items.
    async fn get_liabilities(&self) -> Result<Vec<Category>, ApiError>;

    async fn get_monthly_budget(&self) -> Result<MonthlyBudget, ApiError>;

    async fn get_stocks(&self) -> Result<Vec<Stock>, ApiError>;

    /// Replaces a whole category on the given side.
    async fn put_category(
        &self,
        side: BalanceSheetSide,
        category: &Category,
    ) -> Result<Category, ApiError>;

    /// Replaces a whole stock position.
    async fn put_stock(&self, stock: &Stock) -> Result<Stock, ApiError>;

    /// Merges the budget into the stored one.
    async fn patch_monthly_budget(&self, budget: &MonthlyBudget) -> Result<MonthlyBudget, ApiError>;

    /// Fetches one side of the balance sheet.
    async fn get_side(&self, side: BalanceSheetSide) -> Result<Vec<Category>, ApiError> {
        match side {
            BalanceSheetSide::Assets => self.get_assets().await,
            BalanceSheetSide::Liabilities => self.get_liabilities().await,
        }
    }

    /// Fetches assets and liabilities concurrently. Fails if either request fails.
    async fn get_financial_data(&self) -> Result<FinancialData, ApiError> {
        let (assets, liabilities) =
            futures::try_join!(self.get_assets(), self.get_liabilities())?;
        Ok(FinancialData {
            assets,
            liabilities,
        })
    }
}

/// A concrete implementation of the `DataStore` over the store's JSON REST API.
#[derive(Clone)]
pub struct RestDataStore {
    client: reqwest::Client,
    base_url: Url,
}

impl RestDataStore {
    pub fn new(config: &DataStoreConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(config.base_url.trim()).map_err(|e| {
            ApiError::InvalidData(format!("Invalid base URL '{}': {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidData(format!(
                "Base URL '{}' cannot carry a path",
                config.base_url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn _get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let url = self.endpoint(segments);
        tracing::debug!(%url, "GET");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let text = response.text().await?;
        decode_response(status.as_u16(), &text)
    }

    async fn _send_json<B, T>(&self, method: Method, segments: &[&str], body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments);
        tracing::info!(%method, %url, "Writing to data store.");

        let response = self.client.request(method, url).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;
        decode_response(status.as_u16(), &text)
    }
}

#[async_trait]
impl DataStore for RestDataStore {
    async fn get_assets(&self) -> Result<Vec<Category>, ApiError> {
        let assets: Vec<Category> = self._get(&[BalanceSheetSide::Assets.resource()]).await?;
        check_categories(BalanceSheetSide::Assets, &assets);
        Ok(assets)
    }

    async fn get_liabilities(&self) -> Result<Vec<Category>, ApiError> {
        let liabilities: Vec<Category> =
            self._get(&[BalanceSheetSide::Liabilities.resource()]).await?;
        check_categories(BalanceSheetSide::Liabilities, &liabilities);
        Ok(liabilities)
    }

    async fn get_monthly_budget(&self) -> Result<MonthlyBudget, ApiError> {
        self._get(&["monthlyBudget"]).await
    }

    async fn get_stocks(&self) -> Result<Vec<Stock>, ApiError> {
        self._get(&["stocks"]).await
    }

    async fn put_category(
        &self,
        side: BalanceSheetSide,
        category: &Category,
    ) -> Result<Category, ApiError> {
        let id = category.id.to_string();
        self._send_json(Method::PUT, &[side.resource(), id.as_str()], category)
            .await
    }

    async fn put_stock(&self, stock: &Stock) -> Result<Stock, ApiError> {
        let id = stock.id.to_string();
        self._send_json(Method::PUT, &["stocks", id.as_str()], stock).await
    }

    async fn patch_monthly_budget(&self, budget: &MonthlyBudget) -> Result<MonthlyBudget, ApiError> {
        self._send_json(Method::PATCH, &["monthlyBudget"], budget).await
    }
}
