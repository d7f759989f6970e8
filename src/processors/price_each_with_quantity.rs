use crate::Processor;
use crate::engine::GrammarMatch;
use crate::error::Result;
use crate::record::ItemRecord;

/// "$3.00 price each when you buy 2" (also "with 2" / "for 2").
pub(crate) struct PriceEachWithQuantityProcessor;

static PATTERNS: &[&str] =
    &[r"\$(?P<price>\d+(?:\.\d{2})?)\s+price\s+each\s+(?:when\s+you\s+buy|with|for)\s+(?P<quantity>\d+)"];

impl Processor for PriceEachWithQuantityProcessor {
    fn name(&self) -> &'static str {
        "price_each_with_quantity"
    }

    fn patterns(&self) -> &'static [&'static str] {
        PATTERNS
    }

    fn calculate_deal(&self, item: &ItemRecord, found: &GrammarMatch) -> Result<ItemRecord> {
        let mut updated = item.clone();
        let each = found.number("price").unwrap_or(0.0);
        let quantity = found.number("quantity").unwrap_or(0.0);

        updated.set_price("volume_deals_price", each * quantity)?;
        updated.set_price("unit_price", each)?;
        updated.clear("digital_coupon_price");
        Ok(updated)
    }

    fn calculate_coupon(&self, item: &ItemRecord, found: &GrammarMatch) -> Result<ItemRecord> {
        let mut updated = item.clone();
        let each = found.number("price").unwrap_or(0.0);
        let quantity = found.number("quantity").unwrap_or(0.0);
        let unit = updated.number_or_zero("unit_price") - each / quantity;

        updated.set_price("unit_price", unit)?;
        updated.set_price("digital_coupon_price", each)?;
        Ok(updated)
    }
}
