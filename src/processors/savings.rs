use crate::Processor;
use crate::engine::GrammarMatch;
use crate::error::Result;
use crate::record::ItemRecord;

/// Flat savings: "Save $3.00", "Save $3.00 off 10 participating items",
/// "Save $0.50 on 2".
///
/// With a quantity the saving spreads across the bundle: the bundle keeps
/// the shelf price and the unit price absorbs the discount. Without one the
/// saving comes straight off the single-unit price.
pub(crate) struct SavingsProcessor;

static PATTERNS: &[&str] = &[
    r"Save\s+\$(?P<savings>\d+\.\d{2})\s+off\s+(?P<quantity>\d+)\s+",
    r"Save\s+\$(?P<savings>\d+(?:\.\d{2})?)",
    r"Save\s+\$(?P<savings>0?\.\d{2})\s+on\s+(?P<quantity>\d+)\s+",
];

impl Processor for SavingsProcessor {
    fn name(&self) -> &'static str {
        "savings"
    }

    fn patterns(&self) -> &'static [&'static str] {
        PATTERNS
    }

    fn calculate_deal(&self, item: &ItemRecord, found: &GrammarMatch) -> Result<ItemRecord> {
        let mut updated = item.clone();
        let savings = found.number("savings").unwrap_or(0.0);
        let price = updated.first_price(&["sale_price", "regular_price"]);

        match found.number("quantity") {
            Some(quantity) => {
                updated.set_price("volume_deals_price", price)?;
                updated.set_price("unit_price", (price * quantity - savings) / quantity)?;
            }
            None => {
                let volume = price - savings;
                updated.set_price("volume_deals_price", volume)?;
                updated.set_price("unit_price", volume)?;
            }
        }
        updated.clear("digital_coupon_price");
        Ok(updated)
    }

    fn calculate_coupon(&self, item: &ItemRecord, found: &GrammarMatch) -> Result<ItemRecord> {
        let mut updated = item.clone();
        let savings = found.number("savings").unwrap_or(0.0);
        let price = updated.first_price(&["sale_price", "regular_price"]);

        let unit = match found.number("quantity") {
            Some(quantity) => (price * quantity - savings) / quantity,
            None => price - savings,
        };

        updated.set_price("unit_price", unit)?;
        updated.set_price("digital_coupon_price", savings)?;
        Ok(updated)
    }
}
