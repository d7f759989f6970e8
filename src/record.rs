//! Item records: schemaless field maps with typed accessors.
//!
//! Feeds disagree on types (a price may arrive as `5.99`, `"5.99"` or `""`),
//! so the record keeps every field as raw JSON and the accessors do the
//! coercion at the edge. The empty string doubles as "absent": the ingestion
//! contract uses blanks rather than nulls for optional fields, and cleared
//! prices are written back the same way.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::{EngineError, Result};

/// One item from a retail feed.
///
/// A thin wrapper around a JSON object; unknown fields ride along untouched.
/// The engine never mutates a record it was handed: every pipeline stage
/// clones first and edits the copy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemRecord {
    fields: Map<String, Value>,
}

impl ItemRecord {
    pub fn new() -> Self {
        ItemRecord { fields: Map::new() }
    }

    /// Raw field access.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// A field's text, or `None` when the field is absent, blank or not a
    /// string.
    pub fn text(&self, field: &str) -> Option<&str> {
        match self.fields.get(field)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    /// A field's numeric value, accepting both JSON numbers and numeric
    /// strings. Blank and non-numeric strings read as absent.
    pub fn number(&self, field: &str) -> Option<f64> {
        match self.fields.get(field)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    pub fn number_or_zero(&self, field: &str) -> f64 {
        self.number(field).unwrap_or(0.0)
    }

    /// First usable price among `fields`, scanning left to right.
    ///
    /// Absent fields, blanks, non-numeric values and zero all fall through to
    /// the next source; the final fallback is 0. This is the convention every
    /// calculator chain uses (`unit_price` -> `sale_price` -> `regular_price`
    /// and friends).
    pub fn first_price(&self, fields: &[&str]) -> f64 {
        match fields.iter().filter_map(|f| self.number(f)).find(|v| *v != 0.0) {
            Some(price) => price,
            None => {
                tracing::debug!(?fields, "no usable price source, defaulting to 0");
                0.0
            }
        }
    }

    pub fn set_text(&mut self, field: &str, value: impl Into<String>) {
        self.fields.insert(field.to_owned(), Value::String(value.into()));
    }

    /// Blank a field out (the feed convention for "absent").
    pub fn clear(&mut self, field: &str) {
        self.set_text(field, "");
    }

    /// Write a price field, rounded to two decimal places.
    ///
    /// Rejects non-finite values so a division by a zero quantity surfaces as
    /// that item's failure instead of `null` in the output.
    pub fn set_price(&mut self, field: &'static str, value: f64) -> Result<()> {
        let rounded = round2(value);
        let number = Number::from_f64(rounded).ok_or(EngineError::NonFinitePrice { field })?;
        self.fields.insert(field.to_owned(), Value::Number(number));
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> ItemRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn number_accepts_numbers_and_numeric_strings() {
        let item = record(json!({
            "regular_price": 2.5,
            "sale_price": "1.99",
            "quantity": " 3 ",
            "unit_price": "",
            "product_title": "Cola",
        }));

        assert_eq!(item.number("regular_price"), Some(2.5));
        assert_eq!(item.number("sale_price"), Some(1.99));
        assert_eq!(item.number("quantity"), Some(3.0));
        assert_eq!(item.number("unit_price"), None);
        assert_eq!(item.number("product_title"), None);
        assert_eq!(item.number("missing"), None);
    }

    #[test]
    fn first_price_skips_blank_and_zero_sources() {
        let item = record(json!({"unit_price": "", "sale_price": 0, "regular_price": 4.0}));
        assert_eq!(item.first_price(&["unit_price", "sale_price", "regular_price"]), 4.0);

        let item = record(json!({"sale_price": 1.5, "regular_price": 4.0}));
        assert_eq!(item.first_price(&["unit_price", "sale_price", "regular_price"]), 1.5);

        let empty = ItemRecord::new();
        assert_eq!(empty.first_price(&["unit_price", "sale_price"]), 0.0);
    }

    #[test]
    fn set_price_rounds_to_two_decimals() {
        let mut item = ItemRecord::new();
        item.set_price("unit_price", 5.0 / 3.0).unwrap();
        assert_eq!(item.number("unit_price"), Some(1.67));

        item.set_price("volume_deals_price", 4.0).unwrap();
        assert_eq!(item.number("volume_deals_price"), Some(4.0));
    }

    #[test]
    fn set_price_rejects_non_finite_values() {
        let mut item = ItemRecord::new();
        let err = item.set_price("unit_price", 1.0 / 0.0).unwrap_err();
        assert!(matches!(err, EngineError::NonFinitePrice { field: "unit_price" }));
    }

    #[test]
    fn clear_writes_the_blank_convention() {
        let mut item = record(json!({"volume_deals_price": 3.99}));
        item.clear("volume_deals_price");
        assert_eq!(item.get("volume_deals_price"), Some(&json!("")));
        assert_eq!(item.number("volume_deals_price"), None);
    }

    #[test]
    fn records_round_trip_unknown_fields() {
        let raw = json!({"upc": "0001111041700", "regular_price": 2.0, "crawl_date": "2024-01-09"});
        let item = record(raw.clone());
        assert_eq!(serde_json::to_value(&item).unwrap(), raw);
    }
}
