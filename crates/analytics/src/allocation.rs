use core_types::{Category, CategoryKind, Id};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One category's slice of the asset distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSlice {
    pub id: Id,
    pub label: String,
    pub kind: CategoryKind,
    pub amount: Decimal,
    /// Share of the total, in percent. Zero when the total is zero.
    pub share_pct: Decimal,
}

pub fn allocation(categories: &[Category]) -> Vec<AllocationSlice> {
    let total: Decimal = categories.iter().map(|c| c.amount).sum();

    categories
        .iter()
        .map(|category| AllocationSlice {
            id: category.id.clone(),
            label: category.label.clone(),
            kind: category.kind.clone(),
            amount: category.amount,
            share_pct: if total.is_zero() {
                Decimal::ZERO
            } else {
                (category.amount / total) * Decimal::ONE_HUNDRED
            },
        })
        .collect()
}
