use crate::Processor;
use crate::engine::GrammarMatch;
use crate::error::Result;
use crate::record::ItemRecord;

/// "Buy 2, Get 1 Free" and its discounted sibling "Buy 2, get 1 50% off".
///
/// The paid-for units and the free (or discounted) units together form the
/// bundle, so the unit price spreads the bundle cost across `quantity + free`
/// units.
pub(crate) struct BuyGetFreeProcessor;

static PATTERNS: &[&str] = &[
    r"Buy\s+(?P<quantity>\d+),?\s+Get\s+(?P<free>\d+)\s+Free",
    r"Buy\s+(?P<quantity>\d+),\s+get\s+(?P<free>\d+)\s+(?P<discount>\d+)%\s+off",
];

impl Processor for BuyGetFreeProcessor {
    fn name(&self) -> &'static str {
        "buy_get_free"
    }

    fn patterns(&self) -> &'static [&'static str] {
        PATTERNS
    }

    fn calculate_deal(&self, item: &ItemRecord, found: &GrammarMatch) -> Result<ItemRecord> {
        let mut updated = item.clone();
        let quantity = found.number("quantity").unwrap_or(0.0);
        let free = found.number("free").unwrap_or(0.0);
        let regular = updated.number_or_zero("regular_price");
        let total_quantity = quantity + free;

        let volume = match found.number("discount").filter(|d| *d != 0.0) {
            // The free units are not free, only discounted.
            Some(discount) => regular * quantity + regular * (1.0 - discount / 100.0) * free,
            None => regular * quantity,
        };

        updated.set_price("volume_deals_price", volume)?;
        updated.set_price("unit_price", volume / total_quantity)?;
        updated.clear("digital_coupon_price");
        Ok(updated)
    }

    fn calculate_coupon(&self, item: &ItemRecord, found: &GrammarMatch) -> Result<ItemRecord> {
        let mut updated = item.clone();
        let quantity = found.number("quantity").unwrap_or(0.0);
        let free = found.number("free").unwrap_or(0.0);
        let price = updated.first_price(&["unit_price", "sale_price", "regular_price"]);
        let total_quantity = quantity + free;

        let volume = match found.number("discount").filter(|d| *d != 0.0) {
            Some(discount) => {
                let total = price * total_quantity;
                total - total * (discount / 100.0)
            }
            None => price * quantity,
        };

        updated.set_price("digital_coupon_price", volume)?;
        updated.set_price("unit_price", volume / total_quantity)?;
        Ok(updated)
    }
}
