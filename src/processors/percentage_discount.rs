use crate::Processor;
use crate::engine::GrammarMatch;
use crate::error::Result;
use crate::record::ItemRecord;

/// Percentage promotions: "Deal: 20% off", "Save 25% on Candles", "30% off
/// Floral & Gifts". All four grammars anchor at the start of the description.
pub(crate) struct PercentageDiscountProcessor;

static PATTERNS: &[&str] = &[
    r"^Deal:\s+(?P<discount>\d+)%\s+off",
    r"^Save\s+(?P<discount>\d+)%\s+on\s+(?P<product>[\w\s-]+)",
    r"^Save\s+(?P<discount>\d+)%\s+off\s+(?P<product>[\w\s-]+)",
    r"^(?P<discount>\d+)%\s+off\s+(?P<product>[\w\s-]+)",
];

impl Processor for PercentageDiscountProcessor {
    fn name(&self) -> &'static str {
        "percentage_discount"
    }

    fn patterns(&self) -> &'static [&'static str] {
        PATTERNS
    }

    fn calculate_deal(&self, item: &ItemRecord, found: &GrammarMatch) -> Result<ItemRecord> {
        let mut updated = item.clone();
        let rate = found.number("discount").unwrap_or(0.0) / 100.0;
        let regular = updated.number_or_zero("regular_price");

        // Long-standing formula: a present sale price *is* the discount
        // amount; the rate only applies to the regular-price fallback.
        let discount_amount = match updated.number("sale_price").filter(|v| *v != 0.0) {
            Some(sale) => sale,
            None => regular * rate,
        };
        let volume = regular - discount_amount;

        updated.set_price("volume_deals_price", volume)?;
        updated.set_price("unit_price", volume)?;
        updated.clear("digital_coupon_price");
        Ok(updated)
    }

    fn calculate_coupon(&self, item: &ItemRecord, found: &GrammarMatch) -> Result<ItemRecord> {
        let mut updated = item.clone();
        let rate = found.number("discount").unwrap_or(0.0) / 100.0;
        let price = updated.first_price(&["unit_price", "sale_price", "regular_price"]);
        let volume = price - price * rate;

        updated.set_price("digital_coupon_price", volume)?;
        updated.set_price("unit_price", volume)?;
        Ok(updated)
    }
}
