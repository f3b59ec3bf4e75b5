//! # Analytics
//!
//! The financial arithmetic behind the dashboard: year-to-date performance of
//! items, categories and net worth, target-price IRR for stocks, the net-worth
//! history series, asset allocation and the monthly budget summary.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of the data
//!   store or the CLI. It depends only on `core-types` (Layer 0).
//! - **Explicit evaluation date:** Every year-dependent function takes the year (or
//!   an `AnalyticsEngine` built for a date) as an argument. Nothing reads the clock.
//! - **One baseline rule:** Item, category, side and net-worth YTD figures are all
//!   composed from `baseline::ytd_baseline`, so they can never disagree on which
//!   valuation a year starts from.
//!
//! ## Public API
//!
//! - `calculate_ytd`, `calculate_aggregated_ytd`, `calculate_net_worth_ytd`, `calculate_irr`.
//! - `AnalyticsEngine`: assembles the report structs in `report`.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod allocation;
pub mod baseline;
pub mod budget;
pub mod engine;
pub mod error;
pub mod irr;
pub mod report;
pub mod series;
pub mod ytd;

// Re-export the key components to create a clean, public-facing API.
pub use allocation::{allocation, AllocationSlice};
pub use baseline::{baseline_or_current, ytd_baseline};
pub use budget::{summarize_budget, BudgetSummary, BudgetTypeBreakdown};
pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use irr::calculate_irr;
pub use report::{
    CategoryReport, DashboardReport, ItemReport, NetWorthHistoryReport, SideReport, StockReport,
    StocksReport,
};
pub use series::{history_stats, net_worth_history, sorted_history, HistoryStats};
pub use ytd::{
    calculate_aggregated_ytd, calculate_categories_ytd, calculate_net_worth_ytd, calculate_ytd,
    net_worth_totals, percentage_change, ytd_totals, YtdChange, YtdTotals,
};
