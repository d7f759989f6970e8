use crate::Processor;
use crate::engine::GrammarMatch;
use crate::error::Result;
use crate::record::ItemRecord;

/// "Add 2 Total For Offer" multi-buy requirements. The phrase names no price,
/// so both calculators price the bundle off the record's own fields.
pub(crate) struct AddTotalForOfferProcessor;

static PATTERNS: &[&str] = &[r"Add\s+(?P<quantity>\d+)\s+Total\s+For\s+Offer"];

impl Processor for AddTotalForOfferProcessor {
    fn name(&self) -> &'static str {
        "add_total_for_offer"
    }

    fn patterns(&self) -> &'static [&'static str] {
        PATTERNS
    }

    fn calculate_deal(&self, item: &ItemRecord, found: &GrammarMatch) -> Result<ItemRecord> {
        let mut updated = item.clone();
        let quantity = found.number("quantity").unwrap_or(0.0);
        let price = updated.first_price(&["sale_price", "regular_price"]);

        updated.set_price("volume_deals_price", price * quantity)?;
        updated.set_price("unit_price", price)?;
        updated.clear("digital_coupon_price");
        Ok(updated)
    }

    fn calculate_coupon(&self, item: &ItemRecord, found: &GrammarMatch) -> Result<ItemRecord> {
        let mut updated = item.clone();
        let quantity = found.number("quantity").unwrap_or(0.0);
        let price = updated.first_price(&["unit_price", "sale_price", "regular_price"]);

        updated.set_price("digital_coupon_price", price * quantity)?;
        updated.set_price("unit_price", price)?;
        Ok(updated)
    }
}
