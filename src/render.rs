//! Terminal output for the reports: comfy-table tables or pretty JSON.

use analytics::{
    BudgetSummary, DashboardReport, ItemReport, NetWorthHistoryReport, SideReport, StocksReport,
};
use comfy_table::{Table, presets::UTF8_FULL};
use configuration::OutputFormat;
use core_types::{HistoryEntry, MonthlyBudget};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// A monetary amount with two decimals and the currency code.
pub fn money(amount: Decimal, currency: &str) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2} {currency}")
}

/// A signed percentage with two decimals.
pub fn percent(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_sign_positive() && !rounded.is_zero() {
        format!("+{rounded:.2}%")
    } else {
        format!("{rounded:.2}%")
    }
}

fn table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(header);
    table
}

fn json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn history_table(entries: &[HistoryEntry], currency: &str) -> Table {
    let mut t = table(vec!["Period", "Amount"]);
    for entry in entries {
        t.add_row(vec![entry.date.to_string(), money(entry.amount, currency)]);
    }
    t
}

fn side_table(title: &str, side: &SideReport, currency: &str) -> Table {
    let mut t = table(vec![title, "Type", "Amount", "YTD"]);
    for category in &side.categories {
        t.add_row(vec![
            category.label.clone(),
            category.kind.to_string(),
            money(category.amount, currency),
            percent(category.ytd_pct),
        ]);
    }
    t.add_row(vec![
        "Total".to_string(),
        String::new(),
        money(side.total, currency),
        percent(side.ytd_pct),
    ]);
    t
}

pub fn dashboard(
    report: &DashboardReport,
    format: OutputFormat,
    currency: &str,
) -> anyhow::Result<String> {
    if format == OutputFormat::Json {
        return json(report);
    }

    let mut summary = table(vec!["As of", "Net worth", "YTD"]);
    summary.add_row(vec![
        report.as_of.to_string(),
        money(report.net_worth, currency),
        percent(report.net_worth_ytd_pct),
    ]);

    let mut allocation = table(vec!["Allocation", "Amount", "Share"]);
    for slice in &report.allocation {
        allocation.add_row(vec![
            slice.label.clone(),
            money(slice.amount, currency),
            format!("{:.2}%", slice.share_pct),
        ]);
    }

    Ok(format!(
        "{summary}\n{}\n{}\n{allocation}",
        side_table("Assets", &report.assets, currency),
        side_table("Liabilities", &report.liabilities, currency),
    ))
}

pub fn net_worth_history(
    report: &NetWorthHistoryReport,
    format: OutputFormat,
    currency: &str,
) -> anyhow::Result<String> {
    if format == OutputFormat::Json {
        return json(report);
    }

    let mut out = history_table(&report.series, currency).to_string();
    if let Some(stats) = &report.stats {
        out.push_str(&format!(
            "\nCurrent {}  Min {}  Max {}",
            money(stats.current, currency),
            money(stats.min, currency),
            money(stats.max, currency),
        ));
    }
    Ok(out)
}

pub fn item(report: &ItemReport, format: OutputFormat, currency: &str) -> anyhow::Result<String> {
    if format == OutputFormat::Json {
        return json(report);
    }

    let mut header = table(vec!["Item", "Amount", "YTD", "YTD change"]);
    header.add_row(vec![
        report.name.clone(),
        money(report.amount, currency),
        percent(report.ytd.percentage),
        money(report.ytd.difference, currency),
    ]);
    if report.history.is_empty() {
        return Ok(format!("{header}\nNo recorded history."));
    }
    Ok(format!(
        "{header}\n{}",
        history_table(&report.history, currency)
    ))
}

pub fn stocks(report: &StocksReport, format: OutputFormat, currency: &str) -> anyhow::Result<String> {
    if format == OutputFormat::Json {
        return json(report);
    }

    let mut t = table(vec![
        "Ticker", "Shares", "Price", "Target", "Year", "Value", "IRR",
    ]);
    for stock in &report.stocks {
        t.add_row(vec![
            stock.ticker.clone(),
            stock.shares.normalize().to_string(),
            money(stock.current_price, currency),
            money(stock.objective_price, currency),
            stock.objective_year.to_string(),
            money(stock.market_value, currency),
            percent(stock.irr_pct),
        ]);
    }
    Ok(format!(
        "{t}\nTotal market value {}",
        money(report.total_market_value, currency)
    ))
}

#[derive(Serialize)]
struct BudgetView<'a> {
    budget: &'a MonthlyBudget,
    summary: &'a BudgetSummary,
}

pub fn budget(
    budget: &MonthlyBudget,
    summary: &BudgetSummary,
    format: OutputFormat,
    currency: &str,
) -> anyhow::Result<String> {
    if format == OutputFormat::Json {
        return json(&BudgetView { budget, summary });
    }

    let mut categories = table(vec![
        "Id", "Category", "Type", "Target", "Spent", "Remaining", "Progress",
    ]);
    for category in &budget.categories {
        let progress = format!("{:.0}%", category.progress_pct());
        categories.add_row(vec![
            category.id.to_string(),
            category.name.clone(),
            category.kind.to_string(),
            money(category.target, currency),
            money(category.spent, currency),
            money(category.remaining(), currency),
            if category.is_over_budget() {
                format!("{progress} (over)")
            } else {
                progress
            },
        ]);
    }

    let mut totals = table(vec!["Income", "Budgeted", "Spent", "Left to budget"]);
    totals.add_row(vec![
        money(summary.income, currency),
        money(summary.total_budgeted, currency),
        money(summary.total_spent, currency),
        money(summary.left_to_budget, currency),
    ]);

    let status = if summary.is_zero_based {
        "Every unit of income is assigned."
    } else {
        "Income is not fully assigned."
    };
    Ok(format!("{categories}\n{totals}\n{status}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn formats_money_and_percentages() {
        assert_eq!(money(dec!(1234.5), "EUR"), "1234.50 EUR");
        assert_eq!(money(dec!(0.005), "EUR"), "0.01 EUR");
        assert_eq!(percent(dec!(12.345)), "+12.35%");
        assert_eq!(percent(dec!(-3)), "-3.00%");
        assert_eq!(percent(Decimal::ZERO), "0.00%");
    }

    #[test]
    fn history_json_keeps_period_strings() {
        let report = NetWorthHistoryReport {
            series: vec![HistoryEntry::new("2025-01".parse().unwrap(), dec!(100))],
            stats: None,
        };
        let out = net_worth_history(&report, OutputFormat::Json, "EUR").unwrap();
        assert!(out.contains("\"2025-01\""));

        let table = net_worth_history(&report, OutputFormat::Table, "EUR").unwrap();
        assert!(table.contains("100.00 EUR"));
    }
}
