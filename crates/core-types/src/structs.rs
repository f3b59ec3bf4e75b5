use crate::enums::CategoryKind;
use crate::error::CoreError;
use crate::period::HistoryDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An identifier as the data store hands it out.
///
/// Seeded records use readable slugs (`"cash"`) while records created from the
/// dashboard get numeric ids, so both shapes have to be accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    Number(i64),
    Text(String),
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Number(n) => write!(f, "{n}"),
            Id::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for Id {
    type Err = std::convert::Infallible;

    /// Numeric strings become `Id::Number`, everything else stays text.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<i64>()
            .map(Id::Number)
            .unwrap_or_else(|_| Id::Text(s.to_string())))
    }
}

impl From<i64> for Id {
    fn from(value: i64) -> Self {
        Id::Number(value)
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Id::Text(value.to_string())
    }
}

/// A point-in-time valuation of an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: HistoryDate,
    pub amount: Decimal,
}

impl HistoryEntry {
    pub fn new(date: HistoryDate, amount: Decimal) -> Self {
        Self { date, amount }
    }
}

/// A single account, holding or debt.
///
/// `amount` is the authoritative current value. `history` is an unordered log of
/// past valuations; its latest entry should match `amount`, which the mutating
/// methods here maintain but nothing else enforces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: Id,
    pub name: String,
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<HistoryDate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<HistoryEntry>,
}

impl Item {
    /// Creates an item whose history starts with its opening valuation.
    pub fn new(
        id: Id,
        name: &str,
        amount: Decimal,
        date: HistoryDate,
    ) -> Result<Self, CoreError> {
        let name = validate_name(name)?;
        Ok(Self {
            id,
            name,
            amount,
            last_updated: Some(date),
            history: vec![HistoryEntry::new(date, amount)],
        })
    }

    pub fn rename(&mut self, name: &str) -> Result<(), CoreError> {
        self.name = validate_name(name)?;
        Ok(())
    }

    /// Records a valuation for `date`, replacing any entry for the same date.
    ///
    /// When the valuation is the newest one, `amount` and `last_updated` follow
    /// it. Back-filling an older period leaves the current value untouched.
    pub fn record_value(&mut self, date: HistoryDate, amount: Decimal) {
        let is_latest = self.history.iter().all(|entry| entry.date <= date);

        match self.history.iter_mut().find(|entry| entry.date == date) {
            Some(entry) => entry.amount = amount,
            None => {
                self.history.push(HistoryEntry::new(date, amount));
                self.history.sort_by_key(|entry| entry.date);
            }
        }

        if is_latest {
            self.amount = amount;
            self.last_updated = Some(date);
        }
    }

    /// The most recent valuation. Ties on date resolve to the later entry in the log.
    pub fn latest_entry(&self) -> Option<&HistoryEntry> {
        self.history.iter().max_by_key(|entry| entry.date.date())
    }

    pub fn has_history(&self) -> bool {
        !self.history.is_empty()
    }
}

fn validate_name(name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::InvalidInput(
            "name".to_string(),
            "must not be blank".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// A labelled group of items on one side of the balance sheet.
///
/// `amount` is redundant with the items and must be recomputed after every
/// mutation; the methods below do so.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: Id,
    pub label: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: CategoryKind,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Category {
    pub fn items_total(&self) -> Decimal {
        self.items.iter().map(|item| item.amount).sum()
    }

    pub fn recalculate_amount(&mut self) {
        self.amount = self.items_total();
    }

    /// Whether the stored `amount` agrees with the items.
    pub fn is_consistent(&self) -> bool {
        self.amount == self.items_total()
    }

    pub fn find_item(&self, item_id: &Id) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == item_id)
    }

    pub fn find_item_mut(&mut self, item_id: &Id) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| &item.id == item_id)
    }

    pub fn add_item(&mut self, item: Item) -> Result<(), CoreError> {
        if self.find_item(&item.id).is_some() {
            return Err(CoreError::InvalidInput(
                "item id".to_string(),
                format!("{} already exists in category {}", item.id, self.id),
            ));
        }
        self.items.push(item);
        self.recalculate_amount();
        Ok(())
    }

    pub fn remove_item(&mut self, item_id: &Id) -> Result<Item, CoreError> {
        let index = self
            .items
            .iter()
            .position(|item| &item.id == item_id)
            .ok_or_else(|| CoreError::NotFound("Item".to_string(), item_id.to_string()))?;
        let removed = self.items.remove(index);
        self.recalculate_amount();
        Ok(removed)
    }

    /// Records a valuation on one of the items and refreshes the category total.
    pub fn record_item_value(
        &mut self,
        item_id: &Id,
        date: HistoryDate,
        amount: Decimal,
    ) -> Result<(), CoreError> {
        let item = self
            .find_item_mut(item_id)
            .ok_or_else(|| CoreError::NotFound("Item".to_string(), item_id.to_string()))?;
        item.record_value(date, amount);
        self.recalculate_amount();
        Ok(())
    }
}

/// A stock position with a price target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    pub id: Id,
    pub ticker: String,
    pub shares: Decimal,
    pub current_price: Decimal,
    pub objective_price: Decimal,
    pub objective_year: i32,
}

impl Stock {
    pub fn market_value(&self) -> Decimal {
        self.shares * self.current_price
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn period(raw: &str) -> HistoryDate {
        raw.parse().unwrap()
    }

    fn savings() -> Item {
        Item {
            id: Id::Number(2),
            name: "Savings account".to_string(),
            amount: dec!(10000),
            last_updated: Some(period("2024-12")),
            history: vec![
                HistoryEntry::new(period("2024-11"), dec!(9900)),
                HistoryEntry::new(period("2024-12"), dec!(10000)),
            ],
        }
    }

    #[test]
    fn item_decodes_store_json() {
        let json = r#"{
            "id": 1,
            "name": "Current account",
            "amount": 5000,
            "lastUpdated": "2024-12",
            "history": [{ "date": "2024-01", "amount": 4200.5 }]
        }"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, Id::Number(1));
        assert_eq!(item.amount, dec!(5000));
        assert_eq!(item.history[0].amount, dec!(4200.5));
        assert_eq!(item.last_updated, Some(period("2024-12")));
    }

    #[test]
    fn item_without_history_decodes_as_empty() {
        let item: Item = serde_json::from_str(r#"{"id":"car","name":"Car","amount":12000}"#).unwrap();
        assert!(!item.has_history());
        assert_eq!(item.id, Id::Text("car".to_string()));
    }

    #[test]
    fn malformed_date_or_amount_fails_decoding() {
        let bad_date = r#"{"id":1,"name":"x","amount":1,"history":[{"date":"13/2024","amount":1}]}"#;
        assert!(serde_json::from_str::<Item>(bad_date).is_err());

        let bad_amount = r#"{"id":1,"name":"x","amount":"lots"}"#;
        assert!(serde_json::from_str::<Item>(bad_amount).is_err());
    }

    #[test]
    fn new_item_opens_its_history() {
        let item = Item::new(Id::Number(7), "  Broker  ", dec!(250), period("2025-02")).unwrap();
        assert_eq!(item.name, "Broker");
        assert_eq!(item.history, vec![HistoryEntry::new(period("2025-02"), dec!(250))]);
        assert_eq!(item.last_updated, Some(period("2025-02")));

        assert!(Item::new(Id::Number(8), "   ", dec!(1), period("2025-02")).is_err());
    }

    #[test]
    fn recording_the_newest_value_moves_the_current_amount() {
        let mut item = savings();
        item.record_value(period("2025-01"), dec!(10200));
        assert_eq!(item.amount, dec!(10200));
        assert_eq!(item.last_updated, Some(period("2025-01")));
        assert_eq!(item.latest_entry().unwrap().amount, dec!(10200));
    }

    #[test]
    fn backfilling_keeps_the_current_amount_and_sorts() {
        let mut item = savings();
        item.record_value(period("2024-10"), dec!(9800));
        assert_eq!(item.amount, dec!(10000));
        assert_eq!(item.history.first().unwrap().date, period("2024-10"));
    }

    #[test]
    fn recording_an_existing_period_replaces_it() {
        let mut item = savings();
        item.record_value(period("2024-12"), dec!(10050));
        assert_eq!(item.history.len(), 2);
        assert_eq!(item.amount, dec!(10050));
    }

    #[test]
    fn category_keeps_its_amount_in_sync() {
        let mut category = Category {
            id: Id::from("cash"),
            label: "Cash".to_string(),
            amount: dec!(10000),
            kind: CategoryKind::Liquid,
            items: vec![savings()],
        };
        assert!(category.is_consistent());

        let wallet = Item::new(Id::Number(3), "Wallet", dec!(150), period("2025-01")).unwrap();
        category.add_item(wallet.clone()).unwrap();
        assert_eq!(category.amount, dec!(10150));
        assert!(category.add_item(wallet).is_err());

        category
            .record_item_value(&Id::Number(2), period("2025-01"), dec!(11000))
            .unwrap();
        assert_eq!(category.amount, dec!(11150));

        category.remove_item(&Id::Number(3)).unwrap();
        assert_eq!(category.amount, dec!(11000));
        assert_eq!(
            category.remove_item(&Id::Number(3)),
            Err(CoreError::NotFound("Item".to_string(), "3".to_string()))
        );
    }

    #[test]
    fn category_of_unknown_type_is_written_back_unchanged() {
        let json = r#"{"id":"c","label":"Crypto","amount":0,"type":"crypto","items":[]}"#;
        let category: Category = serde_json::from_str(json).unwrap();
        assert_eq!(category.kind, CategoryKind::Other("crypto".to_string()));

        let written = serde_json::to_value(&category).unwrap();
        assert_eq!(written["type"], "crypto");
    }

    #[test]
    fn id_parses_numbers_and_slugs() {
        assert_eq!("42".parse::<Id>().unwrap(), Id::Number(42));
        assert_eq!("cash".parse::<Id>().unwrap(), Id::Text("cash".to_string()));
    }

    #[test]
    fn stock_market_value() {
        let stock: Stock = serde_json::from_str(
            r#"{"id":1,"ticker":"MSFT","shares":10,"currentPrice":410.5,"objectivePrice":600,"objectiveYear":2030}"#,
        )
        .unwrap();
        assert_eq!(stock.market_value(), dec!(4105));
    }
}
