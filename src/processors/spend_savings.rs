use crate::Processor;
use crate::engine::GrammarMatch;
use crate::error::Result;
use crate::record::ItemRecord;

/// Basket thresholds: "Spend $20 Save $5 on your purchase".
///
/// The threshold is per basket, not per unit, so the calculators treat the
/// savings-to-spend ratio as a per-unit discount rate. Historical quirk kept
/// as-is: the deal stores the discount *amount* in `volume_deals_price`, and
/// the coupon stores the raw rate in `digital_coupon_price`.
pub(crate) struct SpendSavingsProcessor;

static PATTERNS: &[&str] =
    &[r"Spend\s+\$(?P<spend>\d+(?:\.\d{2})?)\s+Save\s+\$(?P<savings>\d+(?:\.\d{2})?)\s+on\s+.*?"];

impl Processor for SpendSavingsProcessor {
    fn name(&self) -> &'static str {
        "spend_savings"
    }

    fn patterns(&self) -> &'static [&'static str] {
        PATTERNS
    }

    fn calculate_deal(&self, item: &ItemRecord, found: &GrammarMatch) -> Result<ItemRecord> {
        let mut updated = item.clone();
        let spend = found.number("spend").unwrap_or(0.0);
        let savings = found.number("savings").unwrap_or(0.0);
        let price = updated.first_price(&["sale_price", "regular_price"]);

        let rate = savings / spend;
        let unit = price - price * rate;

        updated.set_price("volume_deals_price", price - unit)?;
        updated.set_price("unit_price", unit)?;
        updated.clear("digital_coupon_price");
        Ok(updated)
    }

    fn calculate_coupon(&self, item: &ItemRecord, found: &GrammarMatch) -> Result<ItemRecord> {
        let mut updated = item.clone();
        let spend = found.number("spend").unwrap_or(0.0);
        let savings = found.number("savings").unwrap_or(0.0);
        let price = updated.first_price(&["sale_price", "regular_price"]);

        let rate = savings / spend;
        let unit = price - price * rate;

        updated.set_price("unit_price", price - unit)?;
        updated.set_price("digital_coupon_price", rate)?;
        Ok(updated)
    }
}
