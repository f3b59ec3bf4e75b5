use crate::allocation::AllocationSlice;
use crate::series::HistoryStats;
use crate::ytd::YtdChange;
use chrono::NaiveDate;
use core_types::{CategoryKind, HistoryEntry, Id};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One category as the dashboard lists it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryReport {
    pub id: Id,
    pub label: String,
    pub kind: CategoryKind,
    pub amount: Decimal,
    pub ytd_pct: Decimal,
}

/// Totals for one side of the balance sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideReport {
    pub total: Decimal,
    pub ytd_pct: Decimal,
    pub categories: Vec<CategoryReport>,
}

/// Everything the summary view shows, evaluated as of a fixed date.
///
/// This is the data transfer object between the analytics engine and whatever
/// renders it (CLI tables, JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub as_of: NaiveDate,
    pub assets: SideReport,
    pub liabilities: SideReport,
    pub net_worth: Decimal,
    pub net_worth_ytd_pct: Decimal,
    pub allocation: Vec<AllocationSlice>,
}

/// A single item with its valuation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemReport {
    pub id: Id,
    pub name: String,
    pub amount: Decimal,
    pub ytd: YtdChange,
    pub stats: Option<HistoryStats>,
    /// Ascending by date.
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetWorthHistoryReport {
    pub series: Vec<HistoryEntry>,
    pub stats: Option<HistoryStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockReport {
    pub id: Id,
    pub ticker: String,
    pub shares: Decimal,
    pub current_price: Decimal,
    pub objective_price: Decimal,
    pub objective_year: i32,
    pub market_value: Decimal,
    pub irr_pct: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StocksReport {
    pub as_of: NaiveDate,
    pub total_market_value: Decimal,
    pub stocks: Vec<StockReport>,
}
