use core_types::{BudgetCategoryType, Id, MonthlyBudget};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Budgeted against spent for one envelope type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetTypeBreakdown {
    pub kind: BudgetCategoryType,
    pub budgeted: Decimal,
    pub spent: Decimal,
}

/// The month at a glance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetSummary {
    pub income: Decimal,
    /// Sum of every envelope's target.
    pub total_budgeted: Decimal,
    /// Sum of every logged expense.
    pub total_spent: Decimal,
    /// Income not yet assigned to an envelope. Negative when over-assigned.
    pub left_to_budget: Decimal,
    /// Every unit of income has a job.
    pub is_zero_based: bool,
    /// `None` when there is no income to relate to.
    pub budgeted_pct_of_income: Option<Decimal>,
    pub by_type: Vec<BudgetTypeBreakdown>,
    pub over_budget: Vec<Id>,
}

pub fn summarize_budget(budget: &MonthlyBudget) -> BudgetSummary {
    let total_budgeted: Decimal = budget.categories.iter().map(|c| c.target).sum();
    let total_spent: Decimal = budget.expenses.iter().map(|e| e.amount).sum();
    let left_to_budget = budget.income - total_budgeted;

    let budgeted_pct_of_income = if budget.income.is_zero() {
        None
    } else {
        Some((total_budgeted / budget.income) * Decimal::ONE_HUNDRED)
    };

    let by_type = BudgetCategoryType::ALL
        .iter()
        .map(|&kind| {
            let (budgeted, spent) = budget
                .categories
                .iter()
                .filter(|c| c.kind == kind)
                .fold((Decimal::ZERO, Decimal::ZERO), |(budgeted, spent), c| {
                    (budgeted + c.target, spent + c.spent)
                });
            BudgetTypeBreakdown {
                kind,
                budgeted,
                spent,
            }
        })
        .collect();

    let over_budget = budget
        .categories
        .iter()
        .filter(|c| c.is_over_budget())
        .map(|c| c.id.clone())
        .collect();

    BudgetSummary {
        income: budget.income,
        total_budgeted,
        total_spent,
        left_to_budget,
        is_zero_based: left_to_budget.is_zero(),
        budgeted_pct_of_income,
        by_type,
        over_budget,
    }
}
