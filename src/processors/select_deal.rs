use crate::Processor;
use crate::engine::GrammarMatch;
use crate::error::Result;
use crate::record::ItemRecord;

/// "Deal: $5.00 price on select flavors".
pub(crate) struct SelectDealProcessor;

static PATTERNS: &[&str] = &[r"Deal:\s+\$(?P<price>\d+(?:\.\d{2})?)\s+price\s+on\s+"];

impl Processor for SelectDealProcessor {
    fn name(&self) -> &'static str {
        "select_deal"
    }

    fn patterns(&self) -> &'static [&'static str] {
        PATTERNS
    }

    fn calculate_deal(&self, item: &ItemRecord, found: &GrammarMatch) -> Result<ItemRecord> {
        let mut updated = item.clone();
        let price = found.number("price").unwrap_or(0.0);

        updated.set_price("volume_deals_price", price)?;
        updated.set_price("unit_price", price)?;
        updated.clear("digital_coupon_price");
        Ok(updated)
    }

    fn calculate_coupon(&self, item: &ItemRecord, found: &GrammarMatch) -> Result<ItemRecord> {
        let mut updated = item.clone();
        let price = found.number("price").unwrap_or(0.0);
        // A record with no unit price goes negative here; preserved, the QA
        // pass is where such rows get flagged.
        let unit = updated.number_or_zero("unit_price") - price;

        updated.set_price("unit_price", unit)?;
        updated.set_price("digital_coupon_price", price)?;
        Ok(updated)
    }
}
