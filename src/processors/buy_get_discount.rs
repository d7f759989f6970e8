use crate::Processor;
use crate::engine::GrammarMatch;
use crate::error::Result;
use crate::record::ItemRecord;

/// "Buy 2 get 50% off": the percentage applies to the whole bundle.
pub(crate) struct BuyGetDiscountProcessor;

static PATTERNS: &[&str] = &[r"Buy\s+(?P<quantity>\d+)\s+get\s+(?P<discount>\d+)%\s+off\b"];

fn bundle(item: &ItemRecord, found: &GrammarMatch) -> (f64, f64) {
    let quantity = found.number("quantity").unwrap_or(0.0);
    let discount = found.number("discount").unwrap_or(0.0);
    let price = item.first_price(&["sale_price", "regular_price"]);

    let total = price * quantity;
    let volume = total - total * (discount / 100.0);
    (volume, quantity)
}

impl Processor for BuyGetDiscountProcessor {
    fn name(&self) -> &'static str {
        "buy_get_discount"
    }

    fn patterns(&self) -> &'static [&'static str] {
        PATTERNS
    }

    fn calculate_deal(&self, item: &ItemRecord, found: &GrammarMatch) -> Result<ItemRecord> {
        let mut updated = item.clone();
        let (volume, quantity) = bundle(&updated, found);

        updated.set_price("volume_deals_price", volume)?;
        updated.set_price("unit_price", volume / quantity)?;
        updated.clear("digital_coupon_price");
        Ok(updated)
    }

    fn calculate_coupon(&self, item: &ItemRecord, found: &GrammarMatch) -> Result<ItemRecord> {
        let mut updated = item.clone();
        let (volume, quantity) = bundle(&updated, found);

        updated.set_price("digital_coupon_price", volume)?;
        updated.set_price("unit_price", volume / quantity)?;
        Ok(updated)
    }
}
