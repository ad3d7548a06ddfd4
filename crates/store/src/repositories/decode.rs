//! Tolerant decoding of stored objects into domain records.
//!
//! The store owns the persisted format, so nothing here fails: missing or
//! malformed fields become zero, a default, or `None`.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

use tally_core::category::{Category, DEFAULT_CATEGORY_COLOR};
use tally_core::transaction::{
    CategoryRef, CategorySummary, Direction, TransactionRecord, parse_date,
};

use crate::object::StoredObject;

/// Reads a decimal from a JSON string or number; anything else is zero.
#[must_use]
pub fn decimal_value(value: Option<&Value>) -> Decimal {
    let text = match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return Decimal::ZERO,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .unwrap_or(Decimal::ZERO)
}

/// Decodes a category object.
#[must_use]
pub fn category(object: &StoredObject) -> Category {
    Category {
        id: object.id.clone(),
        name: object
            .str_field("name")
            .map_or_else(|| object.title.clone(), str::to_string),
        color: object
            .str_field("color")
            .unwrap_or(DEFAULT_CATEGORY_COLOR)
            .to_string(),
    }
}

fn category_ref(value: Option<&Value>) -> Option<CategoryRef> {
    match value? {
        Value::String(id) if !id.trim().is_empty() => Some(CategoryRef::Reference(id.clone())),
        Value::Object(related) => {
            let id = related.get("id").and_then(Value::as_str);
            let metadata = related.get("metadata");
            let name = metadata
                .and_then(|m| m.get("name"))
                .or_else(|| related.get("name"))
                .or_else(|| related.get("title"))
                .and_then(Value::as_str);
            let color = metadata
                .and_then(|m| m.get("color"))
                .or_else(|| related.get("color"))
                .and_then(Value::as_str)
                .unwrap_or(DEFAULT_CATEGORY_COLOR);

            match (name, id) {
                (Some(name), id) => Some(CategoryRef::Resolved(CategorySummary {
                    id: id.map(str::to_string),
                    name: name.to_string(),
                    color: color.to_string(),
                })),
                (None, Some(id)) => Some(CategoryRef::Reference(id.to_string())),
                (None, None) => None,
            }
        }
        _ => None,
    }
}

/// Decodes a transaction object.
#[must_use]
pub fn transaction(object: &StoredObject) -> TransactionRecord {
    let direction = match object.str_field("type") {
        Some(value) if value.trim().eq_ignore_ascii_case("income") => Direction::Income,
        _ => Direction::Expense,
    };

    TransactionRecord {
        id: object.id.clone(),
        description: object
            .str_field("description")
            .map_or_else(|| object.title.clone(), str::to_string),
        amount: decimal_value(object.field("amount")),
        direction,
        category: category_ref(object.field("category")),
        occurred_on: object.str_field("date").and_then(|d| parse_date(d).ok()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn object(metadata: Value) -> StoredObject {
        StoredObject {
            id: "obj-1".into(),
            object_type: "transactions".into(),
            title: "Title".into(),
            metadata,
            created_at: None,
        }
    }

    #[rstest]
    #[case(json!("12.50"), dec!(12.50))]
    #[case(json!(" 7 "), dec!(7))]
    #[case(json!(42), dec!(42))]
    #[case(json!(-3.25), dec!(-3.25))]
    #[case(json!("1e3"), dec!(1000))]
    #[case(json!("abc"), dec!(0))]
    #[case(json!(null), dec!(0))]
    #[case(json!(true), dec!(0))]
    fn test_decimal_value(#[case] value: Value, #[case] expected: Decimal) {
        assert_eq!(decimal_value(Some(&value)), expected);
    }

    #[test]
    fn test_transaction_with_resolved_category() {
        let record = transaction(&object(json!({
            "description": "Lunch",
            "amount": "12.50",
            "type": "expense",
            "date": "2024-01-15",
            "category": {"id": "c1", "title": "Food", "metadata": {"name": "Food", "color": "#f00"}},
        })));

        assert_eq!(record.description, "Lunch");
        assert_eq!(record.amount, dec!(12.50));
        assert_eq!(record.direction, Direction::Expense);
        assert_eq!(record.occurred_on, NaiveDate::from_ymd_opt(2024, 1, 15));
        assert_eq!(
            record.category,
            Some(CategoryRef::Resolved(CategorySummary {
                id: Some("c1".into()),
                name: "Food".into(),
                color: "#f00".into(),
            }))
        );
    }

    #[test]
    fn test_transaction_with_missing_fields() {
        let record = transaction(&object(json!({"category": "c9", "type": "INCOME"})));

        assert_eq!(record.description, "Title");
        assert_eq!(record.amount, Decimal::ZERO);
        assert_eq!(record.direction, Direction::Income);
        assert_eq!(record.occurred_on, None);
        assert_eq!(record.category, Some(CategoryRef::Reference("c9".into())));
    }

    #[test]
    fn test_transaction_with_null_metadata() {
        let record = transaction(&object(Value::Null));
        assert_eq!(record.direction, Direction::Expense);
        assert_eq!(record.category, None);
    }

    #[test]
    fn test_category_defaults() {
        let decoded = category(&object(json!({})));
        assert_eq!(decoded.name, "Title");
        assert_eq!(decoded.color, DEFAULT_CATEGORY_COLOR);
    }
}
