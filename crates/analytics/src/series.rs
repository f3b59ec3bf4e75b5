use core_types::{Category, HistoryDate, HistoryEntry, Item};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Headline numbers for a valuation series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryStats {
    /// Amount of the most recent entry.
    pub current: Decimal,
    pub min: Decimal,
    pub max: Decimal,
}

/// Stats over `entries`, or `None` for an empty series.
pub fn history_stats(entries: &[HistoryEntry]) -> Option<HistoryStats> {
    let latest = entries.iter().max_by_key(|entry| entry.date.date())?;
    let (min, max) = entries.iter().fold((latest.amount, latest.amount), |(min, max), entry| {
        (min.min(entry.amount), max.max(entry.amount))
    });
    Some(HistoryStats {
        current: latest.amount,
        min,
        max,
    })
}

/// A copy of `entries` in ascending date order, ties kept in input order.
pub fn sorted_history(entries: &[HistoryEntry]) -> Vec<HistoryEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by_key(|entry| entry.date.date());
    sorted
}

fn amount_at<'a>(items: impl Iterator<Item = &'a Item>, period: &HistoryDate) -> Decimal {
    items
        .filter_map(|item| item.history.iter().find(|entry| &entry.date == period))
        .map(|entry| entry.amount)
        .sum()
}

/// Net worth per recorded period.
///
/// Every period that appears in any item's history becomes a point. Each point is
/// the sum of the asset entries recorded for exactly that period minus the sum of
/// the liability entries for it; items with nothing recorded for a period add
/// nothing to it.
pub fn net_worth_history(assets: &[Category], liabilities: &[Category]) -> Vec<HistoryEntry> {
    let asset_items = || assets.iter().flat_map(|c| c.items.iter());
    let liability_items = || liabilities.iter().flat_map(|c| c.items.iter());

    let periods: BTreeSet<HistoryDate> = asset_items()
        .chain(liability_items())
        .flat_map(|item| item.history.iter().map(|entry| entry.date))
        .collect();

    periods
        .into_iter()
        .map(|period| {
            let total_assets = amount_at(asset_items(), &period);
            let total_liabilities = amount_at(liability_items(), &period);
            HistoryEntry::new(period, total_assets - total_liabilities)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{CategoryKind, Id};
    use rust_decimal_macros::dec;

    fn entry(date: &str, amount: Decimal) -> HistoryEntry {
        HistoryEntry::new(date.parse().unwrap(), amount)
    }

    fn category(kind: CategoryKind, items: Vec<(i64, Vec<HistoryEntry>)>) -> Category {
        let items = items
            .into_iter()
            .map(|(id, history)| Item {
                id: Id::Number(id),
                name: format!("item {id}"),
                amount: history.last().map(|e| e.amount).unwrap_or_default(),
                last_updated: None,
                history,
            })
            .collect();
        let mut category = Category {
            id: Id::Number(0),
            label: "Category".to_string(),
            amount: Decimal::ZERO,
            kind,
            items,
        };
        category.recalculate_amount();
        category
    }

    #[test]
    fn stats_track_latest_min_and_max() {
        let entries = vec![
            entry("2025-02", dec!(90)),
            entry("2025-03", dec!(120)),
            entry("2025-01", dec!(100)),
        ];
        assert_eq!(
            history_stats(&entries),
            Some(HistoryStats {
                current: dec!(120),
                min: dec!(90),
                max: dec!(120)
            })
        );
        assert_eq!(history_stats(&[]), None);
    }

    #[test]
    fn sorting_is_stable_on_equal_dates() {
        let entries = vec![
            entry("2025-02", dec!(2)),
            entry("2025-01", dec!(1)),
            entry("2025-01-01", dec!(3)),
        ];
        let amounts: Vec<Decimal> = sorted_history(&entries).iter().map(|e| e.amount).collect();
        assert_eq!(amounts, vec![dec!(1), dec!(3), dec!(2)]);
    }

    #[test]
    fn net_worth_history_merges_periods_across_items() {
        let assets = vec![category(
            CategoryKind::Liquid,
            vec![
                (1, vec![entry("2025-01", dec!(1000)), entry("2025-02", dec!(1100))]),
                (2, vec![entry("2025-02", dec!(500)), entry("2025-03", dec!(600))]),
            ],
        )];
        let liabilities = vec![category(
            CategoryKind::LongTerm,
            vec![(3, vec![entry("2025-01", dec!(300)), entry("2025-03", dec!(250))])],
        )];

        let series = net_worth_history(&assets, &liabilities);
        assert_eq!(
            series,
            vec![
                entry("2025-01", dec!(700)),
                entry("2025-02", dec!(1600)),
                entry("2025-03", dec!(350)),
            ]
        );
    }

    #[test]
    fn net_worth_history_is_empty_without_history() {
        let assets = vec![category(CategoryKind::Liquid, vec![(1, vec![])])];
        assert!(net_worth_history(&assets, &[]).is_empty());
    }
}
