//! # Pricing
//!
//! Turns line items into [`Totals`]. Pure: no state, no I/O, and the result
//! does not depend on the order of the items. Carts keep their subtotal within
//! [`Money::MAX`] (see [`checked_subtotal`]), which is what lets
//! [`compute_totals`] stay infallible.
//!
//! ```rust
//! use storefront::model::{CartLineId, LineItem, Money, ProductId};
//! use storefront::pricing::compute_totals;
//!
//! let items = vec![LineItem {
//!     line_id: CartLineId(1),
//!     product_id: ProductId(1),
//!     name: "Kopi Gayo 1kg".into(),
//!     unit_price: Money::from_units(100_000),
//!     quantity: 2,
//!     stock_snapshot: 10,
//! }];
//! let totals = compute_totals(&items);
//! assert_eq!(totals.subtotal, Money::from_units(200_000));
//! assert_eq!(totals.shipping, Money::from_units(15_000));
//! assert_eq!(totals.tax, Money::from_units(22_000));
//! assert_eq!(totals.total, Money::from_units(237_000));
//! ```

use crate::model::{LineItem, Money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Flat shipping fee charged on any non-empty purchase.
pub const FLAT_SHIPPING_FEE: Money = Money::new(Decimal::from_parts(15_000, 0, 0, false, 0));

/// Tax rate applied to the subtotal (11%).
pub const TAX_RATE: Decimal = Decimal::from_parts(11, 0, 0, false, 2);

/// Derived totals. Never stored on a cart; frozen on an order at creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: Money,
    pub shipping: Money,
    pub tax: Money,
    pub total: Money,
}

/// The two pricing constants, overridable through configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingPolicy {
    pub flat_shipping_fee: Money,
    pub tax_rate: Decimal,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            flat_shipping_fee: FLAT_SHIPPING_FEE,
            tax_rate: TAX_RATE,
        }
    }
}

impl PricingPolicy {
    pub fn compute_totals(&self, items: &[LineItem]) -> Totals {
        let subtotal: Money = items.iter().map(LineItem::line_total).sum();
        let shipping = if subtotal > Money::ZERO {
            self.flat_shipping_fee
        } else {
            Money::ZERO
        };
        let tax = subtotal.scaled(self.tax_rate);

        Totals {
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        }
    }
}

/// Totals under the default policy.
pub fn compute_totals(items: &[LineItem]) -> Totals {
    PricingPolicy::default().compute_totals(items)
}

/// Subtotal of `items`, or `None` if it would exceed [`Money::MAX`].
pub fn checked_subtotal<'a>(items: impl IntoIterator<Item = &'a LineItem>) -> Option<Money> {
    items
        .into_iter()
        .try_fold(Money::ZERO, |acc, item| {
            item.unit_price
                .checked_times(item.quantity)
                .and_then(|line| acc.checked_add(line))
        })
        .filter(Money::is_within_limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CartLineId, ProductId};

    fn item(id: u32, price: i64, quantity: u32) -> LineItem {
        LineItem {
            line_id: CartLineId(id),
            product_id: ProductId(id),
            name: format!("Item {id}"),
            unit_price: Money::from_units(price),
            quantity,
            stock_snapshot: quantity,
        }
    }

    #[test]
    fn test_single_line_scenario() {
        let totals = compute_totals(&[item(1, 100_000, 2)]);
        assert_eq!(totals.subtotal, Money::from_units(200_000));
        assert_eq!(totals.shipping, Money::from_units(15_000));
        assert_eq!(totals.tax, Money::from_units(22_000));
        assert_eq!(totals.total, Money::from_units(237_000));
    }

    #[test]
    fn test_empty_items_cost_nothing() {
        let totals = compute_totals(&[]);
        assert_eq!(totals, Totals::default());
        assert_eq!(totals.shipping, Money::ZERO);
    }

    #[test]
    fn test_free_items_skip_shipping() {
        let totals = compute_totals(&[item(1, 0, 3)]);
        assert_eq!(totals.subtotal, Money::ZERO);
        assert_eq!(totals.shipping, Money::ZERO);
        assert_eq!(totals.total, Money::ZERO);
    }

    #[test]
    fn test_tax_is_exact_for_odd_amounts() {
        let items = [item(1, 12_345, 3), item(2, 999, 7)];
        let totals = compute_totals(&items);
        let subtotal = Money::from_units(12_345 * 3 + 999 * 7);
        assert_eq!(totals.subtotal, subtotal);
        assert_eq!(totals.tax, subtotal.scaled(TAX_RATE));
        assert_eq!(totals.total, totals.subtotal + totals.shipping + totals.tax);
    }

    #[test]
    fn test_item_order_does_not_matter() {
        let a = [item(1, 5_000, 1), item(2, 7_500, 4)];
        let b = [a[1].clone(), a[0].clone()];
        assert_eq!(compute_totals(&a), compute_totals(&b));
    }

    #[test]
    fn test_checked_subtotal_stops_at_the_limit() {
        let items = [item(1, 100_000, 2), item(2, 5_000, 1)];
        assert_eq!(checked_subtotal(&items), Some(Money::from_units(205_000)));

        let mut at_limit = item(3, 0, 1);
        at_limit.unit_price = Money::MAX;
        assert_eq!(checked_subtotal([&at_limit]), Some(Money::MAX));

        let mut over = at_limit.clone();
        over.quantity = 2;
        assert_eq!(checked_subtotal([&over]), None);

        let mut overflowing = at_limit;
        overflowing.unit_price = Money::new(Decimal::MAX);
        overflowing.quantity = 2;
        assert_eq!(checked_subtotal([&overflowing]), None);
    }

    #[test]
    fn test_custom_policy() {
        let policy = PricingPolicy {
            flat_shipping_fee: Money::from_units(9_000),
            tax_rate: Decimal::ZERO,
        };
        let totals = policy.compute_totals(&[item(1, 1_000, 1)]);
        assert_eq!(totals.total, Money::from_units(10_000));
    }
}
