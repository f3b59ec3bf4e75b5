//! The single rule every year-to-date figure measures against.

use core_types::{HistoryEntry, Item};
use rust_decimal::Decimal;

/// The earliest valuation recorded in `year`, if any.
///
/// Entries are compared by calendar date. When several share the earliest date
/// the first one in the input wins, which is what a stable ascending sort would
/// pick, so the result does not depend on how the log happens to be ordered.
pub fn ytd_baseline(history: &[HistoryEntry], year: i32) -> Option<Decimal> {
    history
        .iter()
        .filter(|entry| entry.date.year() == year)
        .min_by_key(|entry| entry.date.date())
        .map(|entry| entry.amount)
}

/// The baseline an item contributes to an aggregate.
///
/// Items without a valuation in `year` (including items with no history at all)
/// use their current amount, so they add no change to the aggregate.
pub fn baseline_or_current(item: &Item, year: i32) -> Decimal {
    ytd_baseline(&item.history, year).unwrap_or(item.amount)
}
