use crate::allocation::allocation;
use crate::budget::{summarize_budget, BudgetSummary};
use crate::error::AnalyticsError;
use crate::irr::calculate_irr;
use crate::report::{
    CategoryReport, DashboardReport, ItemReport, NetWorthHistoryReport, SideReport, StockReport,
    StocksReport,
};
use crate::series::{history_stats, net_worth_history, sorted_history};
use crate::ytd::{calculate_aggregated_ytd, calculate_categories_ytd, calculate_net_worth_ytd, calculate_ytd};
use chrono::{Datelike, NaiveDate};
use core_types::{Category, Item, MonthlyBudget, Stock};
use rust_decimal::Decimal;

/// A stateless calculator that turns data-store snapshots into reports.
///
/// The only thing it holds is the evaluation date. Nothing here reads the clock,
/// so two engines built with the same date always agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyticsEngine {
    as_of: NaiveDate,
}

impl AnalyticsEngine {
    pub fn new(as_of: NaiveDate) -> Self {
        Self { as_of }
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    /// The calendar year year-to-date figures are measured in.
    pub fn year(&self) -> i32 {
        self.as_of.year()
    }

    /// Builds the balance-sheet summary.
    ///
    /// Side totals and net worth come from the category amounts the store keeps;
    /// YTD figures are built from the items through the shared baseline rule.
    pub fn dashboard(
        &self,
        assets: &[Category],
        liabilities: &[Category],
    ) -> Result<DashboardReport, AnalyticsError> {
        let assets_report = self.side_report(assets)?;
        let liabilities_report = self.side_report(liabilities)?;
        let net_worth = assets_report.total - liabilities_report.total;
        let net_worth_ytd_pct = calculate_net_worth_ytd(assets, liabilities, self.year())?;

        tracing::debug!(
            as_of = %self.as_of,
            %net_worth,
            %net_worth_ytd_pct,
            "Dashboard calculated."
        );

        Ok(DashboardReport {
            as_of: self.as_of,
            assets: assets_report,
            liabilities: liabilities_report,
            net_worth,
            net_worth_ytd_pct,
            allocation: allocation(assets),
        })
    }

    fn side_report(&self, categories: &[Category]) -> Result<SideReport, AnalyticsError> {
        let year = self.year();
        Ok(SideReport {
            total: categories.iter().map(|c| c.amount).sum(),
            ytd_pct: calculate_categories_ytd(categories, year)?,
            categories: categories
                .iter()
                .map(|category| {
                    Ok(CategoryReport {
                        id: category.id.clone(),
                        label: category.label.clone(),
                        kind: category.kind.clone(),
                        amount: category.amount,
                        ytd_pct: calculate_aggregated_ytd(&category.items, year)?,
                    })
                })
                .collect::<Result<Vec<CategoryReport>, AnalyticsError>>()?,
        })
    }

    pub fn item_report(&self, item: &Item) -> Result<ItemReport, AnalyticsError> {
        if !item.has_history() {
            tracing::debug!(item = %item.id, "No recorded history, YTD is flat.");
        }
        if let Some(latest) = item.latest_entry() {
            if latest.amount != item.amount {
                tracing::warn!(
                    item = %item.id,
                    amount = %item.amount,
                    latest = %latest.amount,
                    "Latest history entry disagrees with the item's current amount."
                );
            }
        }

        Ok(ItemReport {
            id: item.id.clone(),
            name: item.name.clone(),
            amount: item.amount,
            ytd: calculate_ytd(item.amount, &item.history, self.year())?,
            stats: history_stats(&item.history),
            history: sorted_history(&item.history),
        })
    }

    pub fn net_worth_history(
        &self,
        assets: &[Category],
        liabilities: &[Category],
    ) -> NetWorthHistoryReport {
        let series = net_worth_history(assets, liabilities);
        let stats = history_stats(&series);
        NetWorthHistoryReport { series, stats }
    }

    /// Market value and target IRR for every position.
    pub fn stocks(&self, stocks: &[Stock]) -> Result<StocksReport, AnalyticsError> {
        let year = self.year();
        let reports = stocks
            .iter()
            .map(|stock| {
                Ok(StockReport {
                    id: stock.id.clone(),
                    ticker: stock.ticker.clone(),
                    shares: stock.shares,
                    current_price: stock.current_price,
                    objective_price: stock.objective_price,
                    objective_year: stock.objective_year,
                    market_value: stock.market_value(),
                    irr_pct: calculate_irr(
                        stock.current_price,
                        stock.objective_price,
                        stock.objective_year,
                        year,
                    )?,
                })
            })
            .collect::<Result<Vec<StockReport>, AnalyticsError>>()?;

        Ok(StocksReport {
            as_of: self.as_of,
            total_market_value: reports.iter().map(|r| r.market_value).sum::<Decimal>(),
            stocks: reports,
        })
    }

    pub fn budget(&self, budget: &MonthlyBudget) -> BudgetSummary {
        summarize_budget(budget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{CategoryKind, HistoryEntry, Id};
    use rust_decimal_macros::dec;

    fn engine() -> AnalyticsEngine {
        AnalyticsEngine::new(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap())
    }

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

    fn category(id: &str, kind: CategoryKind, items: Vec<Item>) -> Category {
        let mut category = Category {
            id: Id::from(id),
            label: id.to_string(),
            amount: Decimal::ZERO,
            kind,
            items,
        };
        category.recalculate_amount();
        category
    }

    fn balance_sheet() -> (Vec<Category>, Vec<Category>) {
        let assets = vec![
            category(
                "cash",
                CategoryKind::Liquid,
                vec![item(1, dec!(5000), vec![entry("2024-12", dec!(4900)), entry("2025-01", dec!(4000))])],
            ),
            category(
                "investments",
                CategoryKind::Investment,
                vec![item(2, dec!(15000), vec![entry("2025-01", dec!(16000))])],
            ),
        ];
        let liabilities = vec![category(
            "mortgage",
            CategoryKind::LongTerm,
            vec![item(3, dec!(9000), vec![entry("2025-01", dec!(10000))])],
        )];
        (assets, liabilities)
    }

    #[test]
    fn dashboard_summarises_both_sides() {
        let (assets, liabilities) = balance_sheet();
        let report = engine().dashboard(&assets, &liabilities).unwrap();

        assert_eq!(report.assets.total, dec!(20000));
        assert_eq!(report.liabilities.total, dec!(9000));
        assert_eq!(report.net_worth, dec!(11000));
        assert_eq!(report.assets.ytd_pct, Decimal::ZERO);
        assert_eq!(report.assets.categories[0].ytd_pct, dec!(25));
        assert_eq!(report.liabilities.ytd_pct, dec!(-10));
        // baseline 20000 - 10000, current 20000 - 9000
        assert_eq!(report.net_worth_ytd_pct, dec!(10));
        assert_eq!(report.allocation[1].share_pct, dec!(75));
    }

    #[test]
    fn evaluation_year_comes_from_the_engine() {
        let (assets, liabilities) = balance_sheet();
        let later = AnalyticsEngine::new(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        let report = later.dashboard(&assets, &liabilities).unwrap();
        assert_eq!(report.net_worth_ytd_pct, Decimal::ZERO);
    }

    #[test]
    fn item_report_sorts_history() {
        let (assets, _) = balance_sheet();
        let report = engine().item_report(&assets[0].items[0]).unwrap();
        assert_eq!(report.ytd.percentage, dec!(25));
        assert_eq!(report.ytd.difference, dec!(1000));
        assert_eq!(report.history[0].amount, dec!(4900));
        assert_eq!(report.stats.unwrap().current, dec!(4000));
    }

    #[test]
    fn stocks_report_values_and_irr() {
        let stocks = vec![
            Stock {
                id: Id::Number(1),
                ticker: "AAA".to_string(),
                shares: dec!(10),
                current_price: dec!(100),
                objective_price: dec!(121),
                objective_year: 2027,
            },
            Stock {
                id: Id::Number(2),
                ticker: "BBB".to_string(),
                shares: dec!(2),
                current_price: dec!(50),
                objective_price: dec!(100),
                objective_year: 2020,
            },
        ];
        let report = engine().stocks(&stocks).unwrap();
        assert_eq!(report.total_market_value, dec!(1100));
        assert_eq!(report.stocks[0].irr_pct, dec!(10.00));
        assert_eq!(report.stocks[1].irr_pct, dec!(100.00));
    }

    #[test]
    fn invalid_stock_target_propagates() {
        let stocks = vec![Stock {
            id: Id::Number(1),
            ticker: "BAD".to_string(),
            shares: dec!(1),
            current_price: dec!(10),
            objective_price: dec!(-10),
            objective_year: 2030,
        }];
        assert!(engine().stocks(&stocks).is_err());
    }

    #[test]
    fn net_worth_history_report_has_stats() {
        let (assets, liabilities) = balance_sheet();
        let report = engine().net_worth_history(&assets, &liabilities);
        assert_eq!(report.series.len(), 2);
        // 2025-01: 4000 + 16000 - 10000
        assert_eq!(report.stats.unwrap().current, dec!(10000));
        assert_eq!(report.stats.unwrap().min, dec!(4900));
    }

    #[test]
    fn dashboard_serializes_amounts_as_numbers() {
        let (assets, liabilities) = balance_sheet();
        let report = engine().dashboard(&assets, &liabilities).unwrap();
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["as_of"], "2025-06-30");
        assert!(value["net_worth"].is_number());
        assert_eq!(value["assets"]["categories"][0]["kind"], "liquid");
    }
}
