use crate::Processor;
use crate::engine::GrammarMatch;
use crate::error::Result;
use crate::record::ItemRecord;

/// Explicit "Coupon: $2.00 off" / "Coupon: 15 %" phrases. The amount comes
/// off the promo price when the feed carries one, else the regular price.
pub(crate) struct CouponDiscountProcessor;

static PATTERNS: &[&str] = &[r"(?:Coupon):\s+\$?(?P<discount>\d+(?:\.\d+)?)\s+(?:off|%)"];

impl Processor for CouponDiscountProcessor {
    fn name(&self) -> &'static str {
        "coupon_discount"
    }

    fn patterns(&self) -> &'static [&'static str] {
        PATTERNS
    }

    fn calculate_deal(&self, item: &ItemRecord, found: &GrammarMatch) -> Result<ItemRecord> {
        let mut updated = item.clone();
        let discount = found.number("discount").unwrap_or(0.0);
        let price = updated.first_price(&["promo_price", "regular_price"]);
        let volume = price - discount;

        updated.set_price("volume_deals_price", volume)?;
        updated.set_price("unit_price", volume)?;
        updated.clear("digital_coupon_price");
        Ok(updated)
    }

    fn calculate_coupon(&self, item: &ItemRecord, found: &GrammarMatch) -> Result<ItemRecord> {
        let mut updated = item.clone();
        let discount = found.number("discount").unwrap_or(0.0);
        let price = updated.first_price(&["promo_price", "regular_price"]);
        let volume = price - discount;

        updated.set_price("digital_coupon_price", volume)?;
        updated.set_price("unit_price", volume)?;
        Ok(updated)
    }
}
