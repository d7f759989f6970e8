use crate::Processor;
use crate::engine::GrammarMatch;
use crate::error::Result;
use crate::record::ItemRecord;

/// Bundle pricing: "3 For $5.00", "Buy 2 for $6".
pub(crate) struct QuantityForPriceProcessor;

static PATTERNS: &[&str] = &[
    r"(?P<quantity>\d+)\s+For\s+\$(?P<volume_deals_price>\d+(?:\.\d+)?)",
    r"Buy\s+(?P<quantity>\d+)\s+for\s+\$(?P<volume_deals_price>\d+(?:\.\d+)?)",
];

impl Processor for QuantityForPriceProcessor {
    fn name(&self) -> &'static str {
        "quantity_for_price"
    }

    fn patterns(&self) -> &'static [&'static str] {
        PATTERNS
    }

    fn calculate_deal(&self, item: &ItemRecord, found: &GrammarMatch) -> Result<ItemRecord> {
        let mut updated = item.clone();
        let quantity = found.number("quantity").unwrap_or(0.0);
        let volume = found.number("volume_deals_price").unwrap_or(0.0);

        updated.set_price("volume_deals_price", volume)?;
        updated.set_price("unit_price", volume / quantity)?;
        updated.clear("digital_coupon_price");
        Ok(updated)
    }

    fn calculate_coupon(&self, item: &ItemRecord, found: &GrammarMatch) -> Result<ItemRecord> {
        let mut updated = item.clone();
        let quantity = found.number("quantity").unwrap_or(0.0);
        let volume = found.number("volume_deals_price").unwrap_or(0.0);

        updated.set_price("unit_price", volume / quantity)?;
        updated.set_price("digital_coupon_price", volume)?;
        Ok(updated)
    }
}
