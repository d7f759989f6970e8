//! Batch execution: bounded fan-out of item pipelines plus the QA tally.
//!
//! One task per item, throttled by a semaphore sized to [`worker_count`],
//! joined in spawn order so the output sequence always mirrors the input
//! sequence. A failing item is reported against its index and its input
//! record passes through untouched; the rest of the batch is unaffected.

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;

use crate::engine::catalog::Catalog;
use crate::engine::pipeline;
use crate::error::EngineError;
use crate::record::ItemRecord;

/// Concurrency budget for batch and per-variant fan-out: four tasks per
/// processing unit, capped at 32.
pub fn worker_count() -> usize {
    let units = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
    (units * 4).min(32)
}

/// One item the batch could not process. The record at `index` in the output
/// is the untouched input; this entry says why.
#[derive(Debug, Clone)]
pub struct ItemFailure {
    pub index: usize,
    pub error: String,
}

/// Quality counters over a batch's output records.
///
/// "Unpriced" means the description survived to the output but its price
/// field holds nothing usable (absent, blank or zero). A voided deal has its
/// description blanked first, so it counts in neither column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QaStats {
    pub total_items: usize,
    pub deal_descriptions: usize,
    pub deals_unpriced: usize,
    pub coupon_descriptions: usize,
    pub coupons_unpriced: usize,
}

impl QaStats {
    pub(crate) fn tally(records: &[ItemRecord]) -> QaStats {
        let mut stats = QaStats { total_items: records.len(), ..QaStats::default() };
        for item in records {
            if item.text("volume_deals_description").is_some() {
                stats.deal_descriptions += 1;
                if !priced(item, "volume_deals_price") {
                    stats.deals_unpriced += 1;
                }
            }
            if item.text("digital_coupon_description").is_some() {
                stats.coupon_descriptions += 1;
                if !priced(item, "digital_coupon_price") {
                    stats.coupons_unpriced += 1;
                }
            }
        }
        stats
    }
}

fn priced(item: &ItemRecord, field: &str) -> bool {
    item.number(field).is_some_and(|price| price != 0.0)
}

/// The full batch run: enriched records in input order, failures by index,
/// and the QA counters.
#[derive(Debug, Clone)]
pub struct BatchResult {
    pub records: Vec<ItemRecord>,
    pub failures: Vec<ItemFailure>,
    pub stats: QaStats,
}

pub(crate) async fn process_batch(catalog: &Arc<Catalog>, items: &[ItemRecord]) -> BatchResult {
    let limit = Arc::new(Semaphore::new(worker_count()));

    let mut tasks = Vec::with_capacity(items.len());
    for item in items {
        let catalog = Arc::clone(catalog);
        let limit = Arc::clone(&limit);
        let item = item.clone();
        tasks.push(tokio::spawn(async move {
            let _permit = limit.acquire_owned().await.map_err(|err| EngineError::Task(err.to_string()))?;
            pipeline::process_item(&catalog, &item).await
        }));
    }

    let mut records = Vec::with_capacity(items.len());
    let mut failures = Vec::new();
    for (index, joined) in join_all(tasks).await.into_iter().enumerate() {
        // A panic inside a task surfaces as its JoinError.
        let outcome = joined.unwrap_or_else(|err| Err(EngineError::Task(err.to_string())));
        match outcome {
            Ok(record) => records.push(record),
            Err(err) => {
                tracing::warn!(index, %err, "item failed, passing its input through");
                failures.push(ItemFailure { index, error: err.to_string() });
                records.push(items[index].clone());
            }
        }
    }

    let stats = QaStats::tally(&records);
    BatchResult { records, failures, stats }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog() -> Arc<Catalog> {
        Arc::new(Catalog::standard())
    }

    fn record(value: serde_json::Value) -> ItemRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn worker_count_stays_within_the_cap() {
        let workers = worker_count();
        assert!(workers >= 4);
        assert!(workers <= 32);
    }

    #[tokio::test]
    async fn output_order_mirrors_input_order() {
        let items: Vec<ItemRecord> = (0..24)
            .map(|i| {
                record(json!({
                    "upc": format!("{i:012}"),
                    "product_title": "Soda 12pk",
                    "volume_deals_description": "3 For $6.00",
                }))
            })
            .collect();

        let result = process_batch(&catalog(), &items).await;
        assert_eq!(result.records.len(), items.len());
        for (i, out) in result.records.iter().enumerate() {
            assert_eq!(out.text("upc"), Some(format!("{i:012}").as_str()));
            assert_eq!(out.number("volume_deals_price"), Some(6.0));
        }
        assert!(result.failures.is_empty());
    }

    #[tokio::test]
    async fn a_failing_item_passes_through_and_reports() {
        crate::logging::init_test();
        let items = vec![
            record(json!({"product_title": "Cola", "volume_deals_description": "2 For $4.00"})),
            record(json!({"product_title": "Chips", "volume_deals_description": "0 For $5.00"})),
            record(json!({"product_title": "Salsa", "volume_deals_description": "4 For $10.00"})),
        ];

        let result = process_batch(&catalog(), &items).await;

        assert_eq!(result.records.len(), 3);
        assert_eq!(result.records[0].number("volume_deals_price"), Some(4.0));
        assert_eq!(result.records[2].number("unit_price"), Some(2.5));

        // The failed slot is the input, untouched: no store_brand, no prices.
        assert_eq!(result.records[1], items[1]);

        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].index, 1);
        assert!(result.failures[0].error.contains("unit_price"));
    }

    #[tokio::test]
    async fn repeated_runs_are_identical() {
        let items = vec![
            record(json!({"product_title": "Cola", "volume_deals_description": "Save $1.00"})),
            record(json!({
                "product_title": "Great Value Bread",
                "volume_deals_description": "Buy 2, Get 1 Free",
                "regular_price": 2.00,
            })),
        ];

        let first = process_batch(&catalog(), &items).await;
        let second = process_batch(&catalog(), &items).await;
        assert_eq!(first.records, second.records);
        assert_eq!(first.stats, second.stats);
    }

    #[test]
    fn tally_counts_descriptions_and_unpriced_rows() {
        let records = vec![
            // Priced deal.
            record(json!({"volume_deals_description": "3 For $5.00", "volume_deals_price": 5.0})),
            // Description that never matched.
            record(json!({"volume_deals_description": "Club Card Special"})),
            // Cleared by the void rule: counts in neither column.
            record(json!({"volume_deals_description": "", "volume_deals_price": ""})),
            // Priced coupon plus a zero-priced deal.
            record(json!({
                "volume_deals_description": "$0.00 Each",
                "volume_deals_price": 0.0,
                "digital_coupon_description": "Save $1.00",
                "digital_coupon_price": 1.0,
            })),
        ];

        let stats = QaStats::tally(&records);
        assert_eq!(
            stats,
            QaStats {
                total_items: 4,
                deal_descriptions: 3,
                deals_unpriced: 2,
                coupon_descriptions: 1,
                coupons_unpriced: 0,
            }
        );
    }
}
