use crate::Processor;
use crate::engine::GrammarMatch;
use crate::error::Result;
use crate::processors::helpers;
use crate::record::ItemRecord;

/// Multi-unit savings: "$6.00 SAVE $2.00 on TWO (2)", "SAVE $1.50 on 2
/// Pepsi". The first grammar quotes the bundle total; the second leaves it to
/// the record's own prices. Quantities may be word-form.
pub(crate) struct SaveOnQuantityProcessor;

static PATTERNS: &[&str] = &[
    r"\$(?P<total_price>\d+(?:\.\d+)?)\s+SAVE\s+\$(?P<discount>\d+(?:\.\d+)?)\s+on\s+(?P<quantity>\w+)\s+\(\d+\)",
    r"(?i)SAVE\s+\$(?P<discount>\d+(?:\.\d+)?)\s+on\s+(?P<quantity>\d+)\s+(?P<product>[\w\s-]+)",
];

impl Processor for SaveOnQuantityProcessor {
    fn name(&self) -> &'static str {
        "save_on_quantity"
    }

    fn patterns(&self) -> &'static [&'static str] {
        PATTERNS
    }

    fn calculate_deal(&self, item: &ItemRecord, found: &GrammarMatch) -> Result<ItemRecord> {
        let mut updated = item.clone();
        let total = found
            .number("total_price")
            .unwrap_or_else(|| updated.first_price(&["sale_price", "regular_price"]));
        let discount = found.number("discount").unwrap_or(0.0);
        // An unresolvable quantity becomes 0 and fails below on the division.
        let quantity = helpers::quantity(found, "quantity").unwrap_or(0.0);
        let volume = total - discount;

        updated.set_price("volume_deals_price", volume)?;
        updated.set_price("unit_price", volume / quantity)?;
        updated.clear("digital_coupon_price");
        Ok(updated)
    }

    fn calculate_coupon(&self, item: &ItemRecord, found: &GrammarMatch) -> Result<ItemRecord> {
        let mut updated = item.clone();
        let price = updated.first_price(&["unit_price", "sale_price", "regular_price"]);
        let discount = found.number("discount").unwrap_or(0.0);
        let quantity = helpers::quantity(found, "quantity").unwrap_or(0.0);

        updated.set_price("unit_price", (price * quantity - discount) / quantity)?;
        updated.set_price("digital_coupon_price", discount)?;
        Ok(updated)
    }
}
