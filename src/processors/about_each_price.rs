use crate::Processor;
use crate::engine::GrammarMatch;
use crate::error::Result;
use crate::record::ItemRecord;

/// Per-unit pricing: "$5.99 Each".
///
/// The bundle price is the advertised unit price times the record's
/// `quantity` (defaulting to a single unit), so the unit price round-trips
/// unchanged.
pub(crate) struct AboutEachPriceProcessor;

static PATTERNS: &[&str] = &[r"\$(?P<unit_price>\d+(?:\.\d+)?)\s+Each"];

impl Processor for AboutEachPriceProcessor {
    fn name(&self) -> &'static str {
        "about_each_price"
    }

    fn patterns(&self) -> &'static [&'static str] {
        PATTERNS
    }

    fn calculate_deal(&self, item: &ItemRecord, found: &GrammarMatch) -> Result<ItemRecord> {
        let mut updated = item.clone();
        let each = found.number("unit_price").unwrap_or(0.0);
        let quantity = updated.number("quantity").unwrap_or(1.0);
        let volume = each * quantity;

        updated.set_price("volume_deals_price", volume)?;
        updated.set_price("unit_price", volume / quantity)?;
        updated.clear("digital_coupon_price");
        Ok(updated)
    }

    fn calculate_coupon(&self, item: &ItemRecord, found: &GrammarMatch) -> Result<ItemRecord> {
        let mut updated = item.clone();
        let each = found.number("unit_price").unwrap_or(0.0);
        let quantity = updated.number("quantity").unwrap_or(1.0);
        let volume = each * quantity;
        let unit = volume / quantity;

        updated.set_price("digital_coupon_price", unit)?;
        updated.set_price("unit_price", unit)?;
        Ok(updated)
    }
}
