use crate::Processor;
use crate::engine::GrammarMatch;
use crate::error::Result;
use crate::record::ItemRecord;

/// Bare "$2.00 off" phrases.
pub(crate) struct DollarDiscountProcessor;

static PATTERNS: &[&str] = &[r"\$(?P<discount>\d+(?:\.\d+)?)\s+off"];

impl Processor for DollarDiscountProcessor {
    fn name(&self) -> &'static str {
        "dollar_discount"
    }

    fn patterns(&self) -> &'static [&'static str] {
        PATTERNS
    }

    fn calculate_deal(&self, item: &ItemRecord, found: &GrammarMatch) -> Result<ItemRecord> {
        let mut updated = item.clone();
        let discount = found.number("discount").unwrap_or(0.0);
        // Reads the feed's raw `price` field; an absent one drives the result
        // negative, which the QA pass is expected to surface.
        let price = updated.number_or_zero("price");
        let volume = price - discount;

        updated.set_price("volume_deals_price", volume)?;
        updated.set_price("unit_price", volume)?;
        updated.clear("digital_coupon_price");
        Ok(updated)
    }

    fn calculate_coupon(&self, item: &ItemRecord, found: &GrammarMatch) -> Result<ItemRecord> {
        let mut updated = item.clone();
        let discount = found.number("discount").unwrap_or(0.0);
        let price = updated.first_price(&["unit_price", "sale_price", "regular_price"]);

        updated.set_price("unit_price", price - discount)?;
        updated.set_price("digital_coupon_price", discount)?;
        Ok(updated)
    }
}
