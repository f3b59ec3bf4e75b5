use serde::{Deserialize, Serialize};
use std::fmt;

/// The side of the balance sheet a category lives on.
///
/// Each side is stored as its own resource in the data store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceSheetSide {
    Assets,
    Liabilities,
}

impl BalanceSheetSide {
    /// The data-store resource holding this side's categories.
    pub fn resource(&self) -> &'static str {
        match self {
            BalanceSheetSide::Assets => "assets",
            BalanceSheetSide::Liabilities => "liabilities",
        }
    }
}

impl fmt::Display for BalanceSheetSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resource())
    }
}

/// What kind of holding or debt a category groups.
///
/// Types this crate does not know are kept verbatim in `Other`, so a category read
/// from the store is written back with the same `type`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryKind {
    Liquid,
    Property,
    Investment,
    ShortTerm,
    LongTerm,
    Other(String),
}

impl CategoryKind {
    pub fn as_str(&self) -> &str {
        match self {
            CategoryKind::Liquid => "liquid",
            CategoryKind::Property => "property",
            CategoryKind::Investment => "investment",
            CategoryKind::ShortTerm => "short-term",
            CategoryKind::LongTerm => "long-term",
            CategoryKind::Other(raw) => raw,
        }
    }
}

impl From<String> for CategoryKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "liquid" => CategoryKind::Liquid,
            "property" => CategoryKind::Property,
            "investment" => CategoryKind::Investment,
            "short-term" => CategoryKind::ShortTerm,
            "long-term" => CategoryKind::LongTerm,
            _ => CategoryKind::Other(raw),
        }
    }
}

impl From<CategoryKind> for String {
    fn from(kind: CategoryKind) -> Self {
        match kind {
            CategoryKind::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three envelopes of the zero-based monthly budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetCategoryType {
    Recurrent,
    Variable,
    Savings,
}

impl BudgetCategoryType {
    pub const ALL: [BudgetCategoryType; 3] = [
        BudgetCategoryType::Recurrent,
        BudgetCategoryType::Variable,
        BudgetCategoryType::Savings,
    ];
}

impl fmt::Display for BudgetCategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BudgetCategoryType::Recurrent => "recurrent",
            BudgetCategoryType::Variable => "variable",
            BudgetCategoryType::Savings => "savings",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for BudgetCategoryType {
    type Err = crate::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recurrent" => Ok(BudgetCategoryType::Recurrent),
            "variable" => Ok(BudgetCategoryType::Variable),
            "savings" => Ok(BudgetCategoryType::Savings),
            other => Err(crate::CoreError::InvalidInput(
                "budget category type".to_string(),
                other.to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_kind_uses_kebab_case_and_keeps_unknown_kinds() {
        let kind: CategoryKind = serde_json::from_str("\"short-term\"").unwrap();
        assert_eq!(kind, CategoryKind::ShortTerm);
        assert_eq!(serde_json::to_string(&kind).unwrap(), "\"short-term\"");

        let kind: CategoryKind = serde_json::from_str("\"crypto\"").unwrap();
        assert_eq!(kind, CategoryKind::Other("crypto".to_string()));
        assert_eq!(serde_json::to_string(&kind).unwrap(), "\"crypto\"");
    }

    #[test]
    fn budget_type_parses_case_insensitively() {
        assert_eq!("Savings".parse::<BudgetCategoryType>().unwrap(), BudgetCategoryType::Savings);
        assert!("groceries".parse::<BudgetCategoryType>().is_err());
    }
}
