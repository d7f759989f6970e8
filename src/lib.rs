mod api;
mod brands;
mod engine;
mod error;
pub mod logging;
mod processors;
mod record;

pub use api::{default_catalog, process_batch, process_batch_with, process_item, process_item_with};
pub use engine::{BatchResult, Catalog, GrammarMatch, ItemFailure, QaStats, specificity, worker_count};
pub use error::{EngineError, Result};
pub use record::ItemRecord;

// --- Core trait -------------------------------------------------------------

/// A promotion family: the grammars that recognize its phrasings plus the two
/// calculators that turn a match into prices.
///
/// Variants are registered in [`Catalog::standard`]; the resolver orders them
/// by precedence (the maximum specificity among a variant's grammars) and the
/// winning variant's calculator is applied by the item pipeline.
///
/// Calculators never mutate the record they are handed; they clone it and
/// edit the copy. Missing or malformed price sources fall back to documented
/// defaults; the only error a calculator may raise is a non-finite price
/// (for example a division by a zero quantity), which fails that one item.
pub trait Processor: Send + Sync {
    /// Stable variant name, used in logs and reports.
    fn name(&self) -> &'static str;

    /// The grammars this variant recognizes. When several match the same
    /// description the highest-scoring one wins; earlier patterns win score
    /// ties.
    fn patterns(&self) -> &'static [&'static str];

    /// Interpret a volume-deal match: set `volume_deals_price` and
    /// `unit_price`, clear `digital_coupon_price`.
    fn calculate_deal(&self, item: &ItemRecord, found: &GrammarMatch) -> Result<ItemRecord>;

    /// Interpret a digital-coupon match: set `digital_coupon_price` and
    /// update `unit_price`.
    fn calculate_coupon(&self, item: &ItemRecord, found: &GrammarMatch) -> Result<ItemRecord>;
}

impl std::fmt::Debug for dyn Processor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Processor").field("name", &self.name()).field("patterns", &self.patterns().len()).finish()
    }
}
