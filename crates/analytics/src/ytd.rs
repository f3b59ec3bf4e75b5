use crate::baseline::{baseline_or_current, ytd_baseline};
use crate::error::AnalyticsError;
use core_types::{Category, HistoryEntry, Item};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Year-to-date movement of a single item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct YtdChange {
    /// Change relative to the baseline, in percent.
    pub percentage: Decimal,
    /// Absolute change since the baseline.
    pub difference: Decimal,
}

/// Summed current values and summed baselines of a set of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct YtdTotals {
    pub current: Decimal,
    pub baseline: Decimal,
}

impl YtdTotals {
    pub fn percentage(&self) -> Result<Decimal, AnalyticsError> {
        percentage_change(self.current, self.baseline)
    }

    /// Component-wise `self - rhs`.
    pub fn checked_sub(&self, rhs: &YtdTotals) -> Result<YtdTotals, AnalyticsError> {
        Ok(YtdTotals {
            current: checked(self.current.checked_sub(rhs.current), "current total")?,
            baseline: checked(self.baseline.checked_sub(rhs.baseline), "baseline total")?,
        })
    }
}

fn checked(value: Option<Decimal>, what: &str) -> Result<Decimal, AnalyticsError> {
    value.ok_or_else(|| AnalyticsError::Calculation(format!("Overflow computing the {what}")))
}

/// `(current - baseline) / baseline * 100`, or zero when the baseline is zero.
///
/// Fails when an intermediate value leaves the `Decimal` range, e.g. a tiny
/// baseline against a very large current amount.
pub fn percentage_change(current: Decimal, baseline: Decimal) -> Result<Decimal, AnalyticsError> {
    if baseline.is_zero() {
        return Ok(Decimal::ZERO);
    }
    let difference = checked(current.checked_sub(baseline), "YTD difference")?;
    let ratio = checked(difference.checked_div(baseline), "YTD ratio")?;
    checked(ratio.checked_mul(Decimal::ONE_HUNDRED), "YTD percentage")
}

/// Year-to-date change of `current_amount` against the first valuation of `year`.
///
/// No history, or no valuation in `year`, is reported as flat. A zero baseline
/// reports a zero percentage and passes the current amount through as the
/// difference.
pub fn calculate_ytd(
    current_amount: Decimal,
    history: &[HistoryEntry],
    year: i32,
) -> Result<YtdChange, AnalyticsError> {
    let Some(baseline) = ytd_baseline(history, year) else {
        return Ok(YtdChange::default());
    };

    if baseline.is_zero() {
        return Ok(YtdChange {
            percentage: Decimal::ZERO,
            difference: current_amount,
        });
    }

    Ok(YtdChange {
        percentage: percentage_change(current_amount, baseline)?,
        difference: checked(current_amount.checked_sub(baseline), "YTD difference")?,
    })
}

/// Current and baseline sums over `items`, using the per-item baseline rule.
pub fn ytd_totals<'a, I>(items: I, year: i32) -> Result<YtdTotals, AnalyticsError>
where
    I: IntoIterator<Item = &'a Item>,
{
    items
        .into_iter()
        .try_fold(YtdTotals::default(), |totals, item| {
            Ok(YtdTotals {
                current: checked(totals.current.checked_add(item.amount), "current total")?,
                baseline: checked(
                    totals.baseline.checked_add(baseline_or_current(item, year)),
                    "baseline total",
                )?,
            })
        })
}

/// Portfolio-level YTD percentage of a set of items.
///
/// The result is weighted by each item's baseline, so large holdings dominate.
/// It is not the mean of the per-item percentages.
pub fn calculate_aggregated_ytd<'a, I>(items: I, year: i32) -> Result<Decimal, AnalyticsError>
where
    I: IntoIterator<Item = &'a Item>,
{
    ytd_totals(items, year)?.percentage()
}

/// Aggregated YTD percentage across every item of every category given.
pub fn calculate_categories_ytd(categories: &[Category], year: i32) -> Result<Decimal, AnalyticsError> {
    calculate_aggregated_ytd(categories.iter().flat_map(|c| c.items.iter()), year)
}

/// Net-worth YTD: asset totals minus liability totals, then the usual percentage.
pub fn net_worth_totals(
    assets: &[Category],
    liabilities: &[Category],
    year: i32,
) -> Result<YtdTotals, AnalyticsError> {
    let asset_totals = ytd_totals(assets.iter().flat_map(|c| c.items.iter()), year)?;
    let liability_totals = ytd_totals(liabilities.iter().flat_map(|c| c.items.iter()), year)?;
    asset_totals.checked_sub(&liability_totals)
}

pub fn calculate_net_worth_ytd(
    assets: &[Category],
    liabilities: &[Category],
    year: i32,
) -> Result<Decimal, AnalyticsError> {
    net_worth_totals(assets, liabilities, year)?.percentage()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{CategoryKind, Id};
    use rust_decimal_macros::dec;

    const YEAR: i32 = 2025;

    fn entry(date: &str, amount: Decimal) -> HistoryEntry {
        HistoryEntry::new(date.parse().unwrap(), amount)
    }

    fn item(id: i64, amount: Decimal, history: Vec<HistoryEntry>) -> Item {
        Item {
            id: Id::Number(id),
            name: format!("item {id}"),
            amount,
            last_updated: None,
            history,
        }
    }

    fn category(items: Vec<Item>) -> Category {
        let mut category = Category {
            id: Id::from("group"),
            label: "Group".to_string(),
            amount: Decimal::ZERO,
            kind: CategoryKind::Investment,
            items,
        };
        category.recalculate_amount();
        category
    }

    #[test]
    fn empty_history_is_flat() {
        assert_eq!(calculate_ytd(dec!(1234), &[], YEAR).unwrap(), YtdChange::default());
    }

    #[test]
    fn history_from_previous_years_only_is_flat() {
        let history = vec![entry("2024-01", dec!(10)), entry("2023-06", dec!(5))];
        assert_eq!(calculate_ytd(dec!(100), &history, YEAR).unwrap(), YtdChange::default());
    }

    #[test]
    fn doubling_since_january() {
        let history = vec![entry("2025-01", dec!(50))];
        assert_eq!(
            calculate_ytd(dec!(100), &history, YEAR).unwrap(),
            YtdChange {
                percentage: dec!(100),
                difference: dec!(50)
            }
        );
    }

    #[test]
    fn zero_baseline_passes_the_current_amount_through() {
        let history = vec![entry("2025-01", dec!(0))];
        assert_eq!(
            calculate_ytd(dec!(100), &history, YEAR).unwrap(),
            YtdChange {
                percentage: Decimal::ZERO,
                difference: dec!(100)
            }
        );
    }

    #[test]
    fn loss_is_negative() {
        let history = vec![entry("2025-05", dec!(80)), entry("2025-02", dec!(200))];
        assert_eq!(
            calculate_ytd(dec!(150), &history, YEAR).unwrap(),
            YtdChange {
                percentage: dec!(-25),
                difference: dec!(-50)
            }
        );
    }

    #[test]
    fn aggregate_is_baseline_weighted_not_averaged() {
        let items = vec![
            item(1, dec!(1100), vec![entry("2025-01", dec!(1000))]),
            item(2, dec!(20), vec![entry("2025-01", dec!(10))]),
        ];
        let ytd = calculate_aggregated_ytd(&items, YEAR).unwrap();
        assert_eq!(ytd.round_dp(2), dec!(10.89));
        assert_ne!(ytd.round_dp(0), dec!(55));
    }

    #[test]
    fn aggregate_treats_items_without_current_data_as_unchanged() {
        let items = vec![
            item(1, dec!(150), vec![entry("2025-01", dec!(100))]),
            item(2, dec!(900), vec![entry("2024-01", dec!(1))]),
            item(3, dec!(50), vec![]),
        ];
        // current 1100, baseline 100 + 900 + 50 = 1050
        let expected = ((dec!(1100) - dec!(1050)) / dec!(1050)) * dec!(100);
        assert_eq!(calculate_aggregated_ytd(&items, YEAR).unwrap(), expected);
    }

    #[test]
    fn aggregate_of_nothing_is_zero() {
        assert_eq!(calculate_aggregated_ytd(&Vec::<Item>::new(), YEAR).unwrap(), Decimal::ZERO);
        let items = vec![item(1, dec!(0), vec![])];
        assert_eq!(calculate_aggregated_ytd(&items, YEAR).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn net_worth_ytd_composes_asset_and_liability_baselines() {
        let assets = vec![category(vec![
            item(1, dec!(12000), vec![entry("2025-01", dec!(10000))]),
            item(2, dec!(3000), vec![]),
        ])];
        let liabilities = vec![category(vec![item(
            3,
            dec!(4000),
            vec![entry("2025-01", dec!(5000))],
        )])];

        let totals = net_worth_totals(&assets, &liabilities, YEAR).unwrap();
        assert_eq!(totals.current, dec!(11000));
        assert_eq!(totals.baseline, dec!(8000));
        assert_eq!(
            calculate_net_worth_ytd(&assets, &liabilities, YEAR).unwrap(),
            dec!(37.5)
        );
    }

    #[test]
    fn net_worth_ytd_with_zero_baseline_is_zero() {
        let assets = vec![category(vec![item(1, dec!(500), vec![entry("2025-01", dec!(100))])])];
        let liabilities = vec![category(vec![item(2, dec!(100), vec![])])];
        assert_eq!(calculate_net_worth_ytd(&assets, &liabilities, YEAR).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn category_ytd_spans_every_item() {
        let categories = vec![
            category(vec![item(1, dec!(110), vec![entry("2025-01", dec!(100))])]),
            category(vec![item(2, dec!(90), vec![entry("2025-01", dec!(100))])]),
        ];
        assert_eq!(calculate_categories_ytd(&categories, YEAR).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn tiny_baseline_overflow_is_an_error() {
        let history = vec![entry("2025-01", dec!(0.0000001))];
        let current = Decimal::MAX;
        assert!(matches!(
            calculate_ytd(current, &history, YEAR),
            Err(AnalyticsError::Calculation(_))
        ));

        let items = vec![item(1, current, history)];
        assert!(calculate_aggregated_ytd(&items, YEAR).is_err());
    }
}
