//! Per-item enrichment: deal pass, coupon pass, brand classification.
//!
//! Stages run in a fixed order and never loop back. A missing description
//! skips its stage; the coupon calculator observes whatever `unit_price` the
//! deal pass left behind.

use std::sync::Arc;

use crate::brands;
use crate::engine::catalog::Catalog;
use crate::engine::resolve;
use crate::error::Result;
use crate::record::ItemRecord;

/// Run one record through the full pipeline and return the enriched copy.
///
/// The only error surfaced here is a calculator producing a non-finite
/// price; everything else (no match, malformed numerics) degrades to
/// documented defaults inside the calculators.
pub(crate) async fn process_item(catalog: &Arc<Catalog>, item: &ItemRecord) -> Result<ItemRecord> {
    let mut item = item.clone();

    if let Some(description) = item.text("volume_deals_description").map(str::to_owned) {
        if let Some(resolution) = resolve::resolve(catalog, &description).await {
            let processor = &catalog.entries()[resolution.variant].processor;
            tracing::info!(variant = processor.name(), description = %description, "deal matched");
            item = processor.calculate_deal(&item, &resolution.found)?;
            apply_void_rule(&mut item);
        }
    }

    if let Some(description) = item.text("digital_coupon_description").map(str::to_owned) {
        if let Some(resolution) = resolve::resolve(catalog, &description).await {
            let processor = &catalog.entries()[resolution.variant].processor;
            tracing::info!(variant = processor.name(), description = %description, "coupon matched");
            item = processor.calculate_coupon(&item, &resolution.found)?;
        }
    }

    item.set_text("store_brand", brands::classify(item.text("product_title").unwrap_or("")));
    Ok(item)
}

/// A deal whose unit price lands exactly on the sale price buys nothing:
/// blank the deal fields so it stops counting as a deal downstream.
fn apply_void_rule(item: &mut ItemRecord) {
    let (Some(unit), Some(sale)) = (item.number("unit_price"), item.number("sale_price")) else {
        return;
    };
    if unit == sale {
        tracing::debug!(unit_price = unit, "deal voided, unit price equals sale price");
        item.clear("volume_deals_description");
        item.clear("volume_deals_price");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::catalog::Catalog;
    use serde_json::json;

    fn catalog() -> Arc<Catalog> {
        Arc::new(Catalog::standard())
    }

    fn record(value: serde_json::Value) -> ItemRecord {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn deal_and_coupon_stages_both_apply() {
        let item = record(json!({
            "product_title": "Signature Select Soda 12pk",
            "volume_deals_description": "3 For $5.00",
            "digital_coupon_description": "Save $1.00 on any one",
            "regular_price": 2.49,
        }));

        let out = process_item(&catalog(), &item).await.unwrap();
        assert_eq!(out.number("volume_deals_price"), Some(5.0));
        assert_eq!(out.number("unit_price"), Some(1.49));
        assert_eq!(out.number("digital_coupon_price"), Some(1.0));
        assert_eq!(out.text("store_brand"), Some("yes"));
    }

    #[tokio::test]
    async fn blank_descriptions_only_classify_the_brand() {
        let item = record(json!({
            "product_title": "Froot Loops Cereal",
            "volume_deals_description": "",
            "digital_coupon_description": "",
            "regular_price": 4.99,
        }));

        let out = process_item(&catalog(), &item).await.unwrap();
        let mut expected = item.clone();
        expected.set_text("store_brand", "no");
        assert_eq!(out, expected);
    }

    #[tokio::test]
    async fn missing_title_classifies_as_not_store_brand() {
        let item = record(json!({"volume_deals_description": ""}));
        let out = process_item(&catalog(), &item).await.unwrap();
        assert_eq!(out.text("store_brand"), Some("no"));
    }

    #[tokio::test]
    async fn unmatched_description_rides_along_unpriced() {
        let item = record(json!({
            "product_title": "Bananas",
            "volume_deals_description": "Club Card Special",
        }));

        let out = process_item(&catalog(), &item).await.unwrap();
        assert_eq!(out.text("volume_deals_description"), Some("Club Card Special"));
        assert_eq!(out.get("volume_deals_price"), None);
    }

    #[tokio::test]
    async fn void_rule_blanks_a_deal_that_matches_the_sale_price() {
        // "$2.50 Each" resolves to a unit price of 2.50; with the sale price
        // already there the deal changes nothing and must be cleared.
        let item = record(json!({
            "product_title": "Yogurt Cup",
            "volume_deals_description": "$2.50 Each",
            "sale_price": 2.50,
            "quantity": 1,
        }));

        let out = process_item(&catalog(), &item).await.unwrap();
        assert_eq!(out.text("volume_deals_description"), None);
        assert_eq!(out.get("volume_deals_description"), Some(&json!("")));
        assert_eq!(out.number("volume_deals_price"), None);
    }

    #[tokio::test]
    async fn void_rule_requires_a_sale_price_to_compare() {
        let item = record(json!({
            "product_title": "Yogurt Cup",
            "volume_deals_description": "$2.50 Each",
            "quantity": 1,
        }));

        let out = process_item(&catalog(), &item).await.unwrap();
        assert_eq!(out.number("volume_deals_price"), Some(2.50));
        assert_eq!(out.number("unit_price"), Some(2.50));
    }

    #[tokio::test]
    async fn coupon_observes_the_deal_unit_price() {
        // The deal sets unit_price to 1.67; a select-deal coupon subtracts
        // from that value, not from the shelf prices.
        let item = record(json!({
            "product_title": "Soup Can",
            "volume_deals_description": "3 For $5.00",
            "digital_coupon_description": "Deal: $0.50 price on select varieties",
            "regular_price": 2.00,
        }));

        let out = process_item(&catalog(), &item).await.unwrap();
        assert_eq!(out.number("volume_deals_price"), Some(5.0));
        assert_eq!(out.number("digital_coupon_price"), Some(0.5));
        assert_eq!(out.number("unit_price"), Some(1.17));
    }
}
