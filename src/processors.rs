//! The promotion-variant catalog sources.
//!
//! One file per promotion family, each exposing a unit struct that implements
//! [`crate::Processor`]: the grammars it recognizes plus its deal and coupon
//! calculators. [`standard`] lists them all in registration order
//! (alphabetical by module); the catalog re-sorts by precedence, so this
//! order only decides ties between equally specific variants.
//!
//! Adding a family is: a new file here in the shape of its siblings, one
//! line in [`standard`], cases in `processors/tests.rs`.

#[path = "processors/about_each_price.rs"]
mod about_each_price;
#[path = "processors/add_total_for_offer.rs"]
mod add_total_for_offer;
#[path = "processors/buy_get_discount.rs"]
mod buy_get_discount;
#[path = "processors/buy_get_free.rs"]
mod buy_get_free;
#[path = "processors/coupon_discount.rs"]
mod coupon_discount;
#[path = "processors/dollar_discount.rs"]
mod dollar_discount;
#[path = "processors/fixed_price.rs"]
mod fixed_price;
#[path = "processors/helpers.rs"]
mod helpers;
#[path = "processors/percentage_discount.rs"]
mod percentage_discount;
#[path = "processors/price_each_with_quantity.rs"]
mod price_each_with_quantity;
#[path = "processors/price_per_pound.rs"]
mod price_per_pound;
#[path = "processors/quantity_for_price.rs"]
mod quantity_for_price;
#[path = "processors/save_on_quantity.rs"]
mod save_on_quantity;
#[path = "processors/savings.rs"]
mod savings;
#[path = "processors/select_deal.rs"]
mod select_deal;
#[path = "processors/spend_savings.rs"]
mod spend_savings;
#[path = "processors/word_quantity.rs"]
mod word_quantity;


use crate::Processor;

/// Every variant the standard catalog registers, in registration order.
pub(crate) fn standard() -> Vec<Box<dyn Processor>> {
    vec![
        Box::new(about_each_price::AboutEachPriceProcessor),
        Box::new(add_total_for_offer::AddTotalForOfferProcessor),
        Box::new(buy_get_discount::BuyGetDiscountProcessor),
        Box::new(buy_get_free::BuyGetFreeProcessor),
        Box::new(coupon_discount::CouponDiscountProcessor),
        Box::new(dollar_discount::DollarDiscountProcessor),
        Box::new(fixed_price::FixedPriceProcessor),
        Box::new(percentage_discount::PercentageDiscountProcessor),
        Box::new(price_each_with_quantity::PriceEachWithQuantityProcessor),
        Box::new(price_per_pound::PricePerPoundProcessor),
        Box::new(quantity_for_price::QuantityForPriceProcessor),
        Box::new(save_on_quantity::SaveOnQuantityProcessor),
        Box::new(savings::SavingsProcessor),
        Box::new(select_deal::SelectDealProcessor),
        Box::new(spend_savings::SpendSavingsProcessor),
        Box::new(word_quantity::WordQuantityProcessor),
    ]
}
