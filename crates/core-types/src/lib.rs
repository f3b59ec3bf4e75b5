//! # Core Types
//!
//! The schema shared by every crate in the workspace: the items, categories,
//! stocks and monthly budget the data store persists, with validated dates and
//! decimal amounts. Parsing is strict so bad data is rejected at the boundary
//! and the calculation crates can stay infallible.

pub mod budget;
pub mod enums;
pub mod error;
pub mod period;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use budget::{BudgetCategory, Expense, MonthlyBudget};
pub use enums::{BalanceSheetSide, BudgetCategoryType, CategoryKind};
pub use error::CoreError;
pub use period::{DatePrecision, HistoryDate};
pub use structs::{Category, HistoryEntry, Id, Item, Stock};
