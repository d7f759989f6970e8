use crate::Processor;
use crate::engine::GrammarMatch;
use crate::error::Result;
use crate::record::ItemRecord;

/// Catch-all for a bare dollar amount ("$12.00 Thanksgiving Meal").
///
/// Deliberately the least specific grammar in the catalog: any phrasing a
/// sibling variant explains outscores it, so it only wins descriptions
/// nothing else claims.
pub(crate) struct FixedPriceProcessor;

static PATTERNS: &[&str] = &[r"\$(?P<price>\d+\.?\d*)"];

impl Processor for FixedPriceProcessor {
    fn name(&self) -> &'static str {
        "fixed_price"
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

        updated.set_price("digital_coupon_price", price)?;
        updated.set_price("unit_price", price)?;
        Ok(updated)
    }
}
