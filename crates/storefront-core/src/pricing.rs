//! Discount resolution for a single product.
//!
//! Every function here is pure: the caller supplies `now`, so resolving the
//! same record at the same instant always produces the same result.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::products::{DiscountKind, ProductRecord};

/// Resolved prices for one product at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceDisplay {
    pub original_price: Decimal,
    /// Equal to `original_price` when no discount applies; never negative.
    pub discounted_price: Decimal,
    /// `true` only when `discounted_price < original_price`.
    pub is_discounted: bool,
}

impl PriceDisplay {
    /// The reduced price, present only when it is strictly below the original.
    #[must_use]
    pub fn sale_price(&self) -> Option<Decimal> {
        self.is_discounted.then_some(self.discounted_price)
    }

    /// The price shown prominently: the sale price if discounted, else the original.
    #[must_use]
    pub fn current_price(&self) -> Decimal {
        self.sale_price().unwrap_or(self.original_price)
    }

    /// The struck-through original price, shown only alongside a sale price.
    #[must_use]
    pub fn struck_price(&self) -> Option<Decimal> {
        self.is_discounted.then_some(self.original_price)
    }
}

/// Whether the product's discount applies at `now`.
///
/// Both window bounds are inclusive. A discount without a kind is never
/// active; an unrecognized kind is active but leaves the price unchanged.
#[must_use]
pub fn is_discount_active(product: &ProductRecord, now: DateTime<Utc>) -> bool {
    let Some(discount) = product.discount.as_ref() else {
        return false;
    };
    if discount.kind.is_none() {
        return false;
    }
    if discount.starts_at.is_some_and(|start| start > now) {
        return false;
    }
    if discount.ends_at.is_some_and(|end| end < now) {
        return false;
    }
    true
}

/// The effective price at `now`, clamped so it never drops below zero.
#[must_use]
pub fn compute_discounted_price(product: &ProductRecord, now: DateTime<Utc>) -> Decimal {
    let price = product.price;
    if !is_discount_active(product, now) {
        return price;
    }
    let Some(discount) = product.discount.as_ref() else {
        return price;
    };

    let reduced = match &discount.kind {
        Some(DiscountKind::Percentage) => {
            // Scale the rate first: `price * value` can exceed Decimal::MAX
            // while `price * rate` with rate < 1 cannot.
            let rate = discount.value / Decimal::ONE_HUNDRED;
            if rate >= Decimal::ONE {
                Decimal::ZERO
            } else {
                price - price * rate
            }
        }
        Some(DiscountKind::Fixed) => price - discount.value,
        Some(DiscountKind::Unrecognized(_)) | None => price,
    };

    reduced.max(Decimal::ZERO)
}

#[must_use]
pub fn build_price_display(product: &ProductRecord, now: DateTime<Utc>) -> PriceDisplay {
    let original_price = product.price;
    let discounted_price = compute_discounted_price(product, now);
    PriceDisplay {
        original_price,
        discounted_price,
        is_discounted: discounted_price < original_price,
    }
}

/// Render an amount with two decimal places, e.g. `format_amount(80, "৳")` → `"৳80.00"`.
#[must_use]
pub fn format_amount(amount: Decimal, currency_symbol: &str) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{currency_symbol}{rounded:.2}")
}
