use crate::Processor;
use crate::engine::GrammarMatch;
use crate::error::Result;
use crate::processors::helpers;
use crate::record::ItemRecord;

/// Word-form bundles: "$10.00 When you buy TWO", "$12.00 When you buy any
/// THREE (3)". Unknown words fall back to a single unit.
pub(crate) struct WordQuantityProcessor;

static PATTERNS: &[&str] = &[
    r"\$(?P<volume_deals_price>\d+(?:\.\d+)?)\s+When\s+you\s+buy\s+(?P<quantity>\w+)",
    r"\$(?P<volume_deals_price>\d+(?:\.\d+)?)\s+When\s+you\s+buy\s+[any]?\s?(?P<quantity>\w+)\s+\(\d+\)",
];

impl Processor for WordQuantityProcessor {
    fn name(&self) -> &'static str {
        "word_quantity"
    }

    fn patterns(&self) -> &'static [&'static str] {
        PATTERNS
    }

    fn calculate_deal(&self, item: &ItemRecord, found: &GrammarMatch) -> Result<ItemRecord> {
        let mut updated = item.clone();
        let volume = found.number("volume_deals_price").unwrap_or(0.0);
        let quantity = helpers::quantity(found, "quantity").unwrap_or(1.0);

        updated.set_price("volume_deals_price", volume)?;
        updated.set_price("unit_price", volume / quantity)?;
        updated.clear("digital_coupon_price");
        Ok(updated)
    }

    fn calculate_coupon(&self, item: &ItemRecord, found: &GrammarMatch) -> Result<ItemRecord> {
        let mut updated = item.clone();
        let volume = found.number("volume_deals_price").unwrap_or(0.0);
        let quantity = helpers::quantity(found, "quantity").unwrap_or(1.0);
        let price = updated.first_price(&["sale_price", "regular_price"]);

        updated.set_price("unit_price", price / quantity)?;
        updated.set_price("digital_coupon_price", volume)?;
        Ok(updated)
    }
}
