use crate::Processor;
use crate::engine::GrammarMatch;
use crate::error::Result;
use crate::record::ItemRecord;

/// Weighed goods: "$2.99/lb".
///
/// Claims the phrasing so the catch-all dollar grammar cannot, but computes
/// nothing: per-pound pricing needs the item's weight, which feeds do not
/// carry. The untouched price fields then show up in the QA counters as
/// descriptions without a price.
pub(crate) struct PricePerPoundProcessor;

static PATTERNS: &[&str] = &[r"\$(?P<price_per_lb>\d+(?:\.\d{2})?)\/lb", r"\$(?P<price_per_lb>\d+\.\d{2})\/lb"];

impl Processor for PricePerPoundProcessor {
    fn name(&self) -> &'static str {
        "price_per_pound"
    }

    fn patterns(&self) -> &'static [&'static str] {
        PATTERNS
    }

    fn calculate_deal(&self, item: &ItemRecord, _found: &GrammarMatch) -> Result<ItemRecord> {
        Ok(item.clone())
    }

    fn calculate_coupon(&self, item: &ItemRecord, _found: &GrammarMatch) -> Result<ItemRecord> {
        Ok(item.clone())
    }
}
