//! Read-modify-write workflows against the data store.
//!
//! Each mutation fetches the current snapshot, applies a `core-types` mutation
//! that keeps redundant fields (category amounts, budget `spent`) consistent,
//! and writes the whole resource back.

use anyhow::{Context, Result, anyhow};
use api_client::DataStore;
use core_types::{
    BalanceSheetSide, Category, CoreError, HistoryDate, Id, Item, MonthlyBudget, Stock,
};
use rust_decimal::Decimal;

fn find_category<'a>(categories: &'a mut [Category], category_id: &Id) -> Result<&'a mut Category> {
    categories
        .iter_mut()
        .find(|c| &c.id == category_id)
        .ok_or_else(|| anyhow!(CoreError::NotFound("Category".to_string(), category_id.to_string())))
}

/// Looks an item up on one side of the balance sheet.
pub async fn fetch_item<D: DataStore + ?Sized>(
    store: &D,
    side: BalanceSheetSide,
    category_id: &Id,
    item_id: &Id,
) -> Result<Item> {
    let mut categories = store
        .get_side(side)
        .await
        .with_context(|| format!("Failed to fetch {side}"))?;
    let category = find_category(&mut categories, category_id)?;
    category
        .find_item(item_id)
        .cloned()
        .ok_or_else(|| anyhow!(CoreError::NotFound("Item".to_string(), item_id.to_string())))
}

/// Records a valuation for an item and stores its category.
pub async fn record_value<D: DataStore + ?Sized>(
    store: &D,
    side: BalanceSheetSide,
    category_id: &Id,
    item_id: &Id,
    date: HistoryDate,
    amount: Decimal,
) -> Result<Category> {
    let mut categories = store
        .get_side(side)
        .await
        .with_context(|| format!("Failed to fetch {side}"))?;
    let category = find_category(&mut categories, category_id)?;
    category.record_item_value(item_id, date, amount)?;

    tracing::info!(%side, category = %category_id, item = %item_id, %date, %amount, "Recording valuation.");
    store
        .put_category(side, category)
        .await
        .with_context(|| format!("Failed to save category {category_id}"))
}

/// Adds a new item to a category and stores it.
pub async fn add_item<D: DataStore + ?Sized>(
    store: &D,
    side: BalanceSheetSide,
    category_id: &Id,
    item: Item,
) -> Result<Category> {
    let mut categories = store
        .get_side(side)
        .await
        .with_context(|| format!("Failed to fetch {side}"))?;
    let category = find_category(&mut categories, category_id)?;
    category.add_item(item)?;

    store
        .put_category(side, category)
        .await
        .with_context(|| format!("Failed to save category {category_id}"))
}

/// Renames an item and stores its category.
pub async fn rename_item<D: DataStore + ?Sized>(
    store: &D,
    side: BalanceSheetSide,
    category_id: &Id,
    item_id: &Id,
    name: &str,
) -> Result<Category> {
    let mut categories = store
        .get_side(side)
        .await
        .with_context(|| format!("Failed to fetch {side}"))?;
    let category = find_category(&mut categories, category_id)?;
    category
        .find_item_mut(item_id)
        .ok_or_else(|| anyhow!(CoreError::NotFound("Item".to_string(), item_id.to_string())))?
        .rename(name)?;

    store
        .put_category(side, category)
        .await
        .with_context(|| format!("Failed to save category {category_id}"))
}

/// Removes an item from its category and stores the category.
///
/// Returns the removed item along with the saved category.
pub async fn remove_item<D: DataStore + ?Sized>(
    store: &D,
    side: BalanceSheetSide,
    category_id: &Id,
    item_id: &Id,
) -> Result<(Item, Category)> {
    let mut categories = store
        .get_side(side)
        .await
        .with_context(|| format!("Failed to fetch {side}"))?;
    let category = find_category(&mut categories, category_id)?;
    let removed = category.remove_item(item_id)?;

    tracing::info!(%side, category = %category_id, item = %item_id, "Removing item.");
    let saved = store
        .put_category(side, category)
        .await
        .with_context(|| format!("Failed to save category {category_id}"))?;
    Ok((removed, saved))
}

/// Sets a position's current price and stores it.
pub async fn update_stock_price<D: DataStore + ?Sized>(
    store: &D,
    stock_id: &Id,
    price: Decimal,
) -> Result<Stock> {
    if price.is_sign_negative() {
        return Err(anyhow!(CoreError::InvalidInput(
            "current_price".to_string(),
            price.to_string()
        )));
    }
    let mut stocks = store.get_stocks().await.context("Failed to fetch stocks")?;
    let stock = stocks
        .iter_mut()
        .find(|s| &s.id == stock_id)
        .ok_or_else(|| anyhow!(CoreError::NotFound("Stock".to_string(), stock_id.to_string())))?;
    stock.current_price = price;

    tracing::info!(ticker = %stock.ticker, %price, "Updating stock price.");
    store
        .put_stock(stock)
        .await
        .with_context(|| format!("Failed to save stock {stock_id}"))
}

/// Applies `mutate` to the stored monthly budget and patches it back.
///
/// Nothing is written when the mutation is rejected.
pub async fn update_budget<D, F>(store: &D, mutate: F) -> Result<MonthlyBudget>
where
    D: DataStore + ?Sized,
    F: FnOnce(&mut MonthlyBudget) -> Result<(), CoreError>,
{
    let mut budget = store
        .get_monthly_budget()
        .await
        .context("Failed to fetch the monthly budget")?;
    mutate(&mut budget)?;
    store
        .patch_monthly_budget(&budget)
        .await
        .context("Failed to save the monthly budget")
}
