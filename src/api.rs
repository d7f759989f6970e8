use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::engine::catalog::Catalog;
use crate::engine::{BatchResult, pipeline, scheduler};
use crate::error::Result;
use crate::record::ItemRecord;

static DEFAULT_CATALOG: Lazy<Arc<Catalog>> = Lazy::new(|| Arc::new(Catalog::standard()));

/// The standard catalog with every built-in promotion variant, built once
/// and shared. Callers that register their own variants build a
/// [`Catalog`] directly and use the `_with` entry points.
pub fn default_catalog() -> Arc<Catalog> {
    Arc::clone(&DEFAULT_CATALOG)
}

/// Enrich one item using the standard catalog.
///
/// # Example
/// ```
/// use promolex::{ItemRecord, process_item};
///
/// let raw = r#"{"product_title": "Cola 12pk", "volume_deals_description": "2 For $5.00"}"#;
/// let item: ItemRecord = serde_json::from_str(raw).unwrap();
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// let out = rt.block_on(process_item(&item)).unwrap();
/// assert_eq!(out.number("volume_deals_price"), Some(5.0));
/// assert_eq!(out.number("unit_price"), Some(2.5));
/// ```
pub async fn process_item(item: &ItemRecord) -> Result<ItemRecord> {
    process_item_with(&default_catalog(), item).await
}

/// Enrich one item against a caller-supplied catalog.
pub async fn process_item_with(catalog: &Arc<Catalog>, item: &ItemRecord) -> Result<ItemRecord> {
    pipeline::process_item(catalog, item).await
}

/// Process a whole batch using the standard catalog.
///
/// Items are processed concurrently but the output order always mirrors the
/// input order; a failing item is reported in [`BatchResult::failures`] and
/// its input record passes through unchanged.
pub async fn process_batch(items: &[ItemRecord]) -> BatchResult {
    process_batch_with(&default_catalog(), items).await
}

/// Process a whole batch against a caller-supplied catalog.
pub async fn process_batch_with(catalog: &Arc<Catalog>, items: &[ItemRecord]) -> BatchResult {
    scheduler::process_batch(catalog, items).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> ItemRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn default_catalog_is_shared() {
        assert!(Arc::ptr_eq(&default_catalog(), &default_catalog()));
        assert_eq!(default_catalog().len(), 16);
    }

    #[tokio::test]
    async fn batch_entry_point_round_trips() {
        crate::logging::init_test();
        let items = vec![
            record(json!({
                "product_title": "Market Pantry Pasta",
                "volume_deals_description": "2 For $3.00",
            })),
            record(json!({"product_title": "Ketchup", "digital_coupon_description": "Save $0.75"})),
        ];

        let result = process_batch(&items).await;
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.records[0].number("unit_price"), Some(1.5));
        assert_eq!(result.records[0].text("store_brand"), Some("yes"));
        assert_eq!(result.records[1].number("digital_coupon_price"), Some(0.75));
        assert_eq!(result.stats.total_items, 2);
        assert_eq!(result.stats.deal_descriptions, 1);
        assert_eq!(result.stats.coupon_descriptions, 1);
    }
}
