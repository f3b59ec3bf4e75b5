use crate::enums::BudgetCategoryType;
use crate::error::CoreError;
use crate::structs::Id;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Name given to envelopes created from the dashboard until the user renames them.
pub const DEFAULT_BUDGET_CATEGORY_NAME: &str = "New category";
/// Neutral grey used for new envelopes.
pub const DEFAULT_BUDGET_CATEGORY_COLOR: &str = "#9CA3AF";

/// One envelope of the zero-based budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetCategory {
    pub id: Id,
    pub name: String,
    pub target: Decimal,
    pub spent: Decimal,
    pub color: String,
    #[serde(rename = "type")]
    pub kind: BudgetCategoryType,
}

impl BudgetCategory {
    /// Share of the target already spent, capped at 100. Zero when there is no target.
    pub fn progress_pct(&self) -> Decimal {
        if self.target <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        ((self.spent / self.target) * Decimal::ONE_HUNDRED).min(Decimal::ONE_HUNDRED)
    }

    pub fn is_over_budget(&self) -> bool {
        self.spent > self.target
    }

    pub fn remaining(&self) -> Decimal {
        self.target - self.spent
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: Id,
    pub description: String,
    pub amount: Decimal,
    pub category_id: Id,
    pub date: NaiveDate,
}

/// The month's plan: expected income split into envelopes, plus what was spent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBudget {
    pub income: Decimal,
    #[serde(default)]
    pub categories: Vec<BudgetCategory>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

impl MonthlyBudget {
    pub fn find_category(&self, category_id: &Id) -> Option<&BudgetCategory> {
        self.categories.iter().find(|c| &c.id == category_id)
    }

    fn category_mut(&mut self, category_id: &Id) -> Result<&mut BudgetCategory, CoreError> {
        self.categories
            .iter_mut()
            .find(|c| &c.id == category_id)
            .ok_or_else(|| {
                CoreError::NotFound("Budget category".to_string(), category_id.to_string())
            })
    }

    pub fn set_income(&mut self, income: Decimal) -> Result<(), CoreError> {
        if income.is_sign_negative() {
            return Err(CoreError::InvalidInput(
                "income".to_string(),
                format!("{income} is negative"),
            ));
        }
        self.income = income;
        Ok(())
    }

    pub fn set_target(&mut self, category_id: &Id, target: Decimal) -> Result<(), CoreError> {
        if target.is_sign_negative() {
            return Err(CoreError::InvalidInput(
                "target".to_string(),
                format!("{target} is negative"),
            ));
        }
        self.category_mut(category_id)?.target = target;
        Ok(())
    }

    /// Logs an expense and charges it to its envelope's `spent`.
    pub fn add_expense(&mut self, expense: Expense) -> Result<(), CoreError> {
        if expense.description.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "description".to_string(),
                "must not be blank".to_string(),
            ));
        }
        if expense.amount.is_zero() {
            return Err(CoreError::InvalidInput(
                "amount".to_string(),
                "must not be zero".to_string(),
            ));
        }
        let category = self.category_mut(&expense.category_id)?;
        category.spent += expense.amount;
        tracing::debug!(
            category = %category.name,
            amount = %expense.amount,
            spent = %category.spent,
            "Expense charged to budget category."
        );
        self.expenses.push(expense);
        Ok(())
    }

    /// Appends an empty envelope of the given type.
    pub fn add_category(&mut self, id: Id, kind: BudgetCategoryType) -> Result<(), CoreError> {
        if self.find_category(&id).is_some() {
            return Err(CoreError::InvalidInput(
                "budget category id".to_string(),
                format!("{id} already exists"),
            ));
        }
        self.categories.push(BudgetCategory {
            id,
            name: DEFAULT_BUDGET_CATEGORY_NAME.to_string(),
            target: Decimal::ZERO,
            spent: Decimal::ZERO,
            color: DEFAULT_BUDGET_CATEGORY_COLOR.to_string(),
            kind,
        });
        Ok(())
    }

    /// Drops an envelope. Expenses already charged to it are kept.
    pub fn remove_category(&mut self, category_id: &Id) -> Result<BudgetCategory, CoreError> {
        let index = self
            .categories
            .iter()
            .position(|c| &c.id == category_id)
            .ok_or_else(|| {
                CoreError::NotFound("Budget category".to_string(), category_id.to_string())
            })?;
        Ok(self.categories.remove(index))
    }

    pub fn rename_category(&mut self, category_id: &Id, name: &str) -> Result<(), CoreError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(CoreError::InvalidInput(
                "name".to_string(),
                "must not be blank".to_string(),
            ));
        }
        self.category_mut(category_id)?.name = trimmed.to_string();
        Ok(())
    }
}
