//! # Cart Store
//!
//! One owner's cart as a plain value with explicit mutators and pure queries.
//! The cart actor wraps it so every call is one atomic step; the rules live
//! here so they can be tested without a runtime.
//!
//! Every mutator validates before it touches anything, so a call that returns
//! an error leaves the cart exactly as it was. The subtotal never exceeds
//! [`Money::MAX`], so pricing a cart cannot overflow.

use crate::cart_actor::CartError;
use crate::model::{Money, ProductId, ProductQuote, UserId};
use crate::pricing::{checked_subtotal, PricingPolicy, Totals};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Identifies a line within one cart. Never reused by that cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartLineId(pub u32);

impl Display for CartLineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line_{}", self.0)
    }
}

/// One product in a cart or an order.
///
/// `stock_snapshot` is the live stock seen when the line was last validated.
/// On an order it is the stock at commit time, so `quantity <= stock_snapshot`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub line_id: CartLineId,
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
    pub stock_snapshot: u32,
}

impl LineItem {
    pub fn line_total(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    owner_id: UserId,
    items: Vec<LineItem>,
    next_line: u32,
    version: u64,
}

/// Read model of a cart: its lines, how many units they add up to and what
/// they cost right now.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartSummary {
    pub owner_id: UserId,
    pub items: Vec<LineItem>,
    pub item_count: u32,
    pub totals: Totals,
    pub version: u64,
}

impl CartSummary {
    /// Summary of a cart that was never opened.
    pub fn empty(owner_id: UserId) -> Self {
        Self {
            owner_id,
            items: Vec::new(),
            item_count: 0,
            totals: Totals::default(),
            version: 0,
        }
    }
}

fn check_bounds(product_id: ProductId, quantity: u32, current_stock: u32) -> Result<(), CartError> {
    if quantity < 1 {
        return Err(CartError::InvalidQuantity {
            product_id,
            quantity,
        });
    }
    if quantity > current_stock {
        return Err(CartError::OutOfStock {
            product_id,
            requested: quantity,
            available: current_stock,
        });
    }
    Ok(())
}

impl Cart {
    pub fn new(owner_id: UserId) -> Self {
        Self {
            owner_id,
            items: Vec::new(),
            next_line: 1,
            version: 0,
        }
    }

    pub fn owner_id(&self) -> UserId {
        self.owner_id
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.items.iter().position(|i| i.product_id == product_id)
    }

    /// Fails if `line`, replacing any line for the same product, would take
    /// the subtotal past [`Money::MAX`].
    fn check_subtotal(&self, line: &LineItem) -> Result<(), CartError> {
        let others = self.items.iter().filter(|i| i.product_id != line.product_id);
        match checked_subtotal(others.chain(std::iter::once(line))) {
            Some(_) => Ok(()),
            None => Err(CartError::AmountTooLarge {
                product_id: line.product_id,
                quantity: line.quantity,
            }),
        }
    }

    /// Product held by the given line, if the line exists.
    pub fn product_for_line(&self, line_id: CartLineId) -> Option<ProductId> {
        self.items
            .iter()
            .find(|i| i.line_id == line_id)
            .map(|i| i.product_id)
    }

    /// Adds `quantity` units of the quoted product.
    ///
    /// An existing line grows and picks up the quote's current price and
    /// stock; otherwise a new line is appended.
    pub fn add_item(&mut self, quote: &ProductQuote, quantity: u32) -> Result<LineItem, CartError> {
        let product_id = quote.product_id;
        if quantity < 1 {
            return Err(CartError::InvalidQuantity {
                product_id,
                quantity,
            });
        }

        match self.position(product_id) {
            Some(index) => {
                let existing = self.items[index].quantity;
                let resulting = existing.checked_add(quantity).ok_or(CartError::OutOfStock {
                    product_id,
                    requested: u32::MAX,
                    available: quote.stock,
                })?;
                check_bounds(product_id, resulting, quote.stock)?;

                let line = LineItem {
                    quantity: resulting,
                    unit_price: quote.unit_price,
                    stock_snapshot: quote.stock,
                    ..self.items[index].clone()
                };
                self.check_subtotal(&line)?;
                self.items[index] = line.clone();
                self.version += 1;
                Ok(line)
            }
            None => {
                check_bounds(product_id, quantity, quote.stock)?;

                let line = LineItem {
                    line_id: CartLineId(self.next_line),
                    product_id,
                    name: quote.name.clone(),
                    unit_price: quote.unit_price,
                    quantity,
                    stock_snapshot: quote.stock,
                };
                self.check_subtotal(&line)?;
                self.next_line += 1;
                self.items.push(line.clone());
                self.version += 1;
                Ok(line)
            }
        }
    }

    /// Sets the quantity of an existing line directly.
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        new_quantity: u32,
        current_stock: u32,
    ) -> Result<LineItem, CartError> {
        let index = self
            .position(product_id)
            .ok_or(CartError::ItemNotFound(product_id))?;
        check_bounds(product_id, new_quantity, current_stock)?;

        let line = LineItem {
            quantity: new_quantity,
            stock_snapshot: current_stock,
            ..self.items[index].clone()
        };
        self.check_subtotal(&line)?;
        self.items[index] = line.clone();
        self.version += 1;
        Ok(line)
    }

    /// [`update_quantity`](Self::update_quantity) addressed by line id.
    pub fn update_line(
        &mut self,
        line_id: CartLineId,
        new_quantity: u32,
        current_stock: u32,
    ) -> Result<LineItem, CartError> {
        let product_id = self
            .product_for_line(line_id)
            .ok_or(CartError::LineNotFound(line_id))?;
        self.update_quantity(product_id, new_quantity, current_stock)
    }

    pub fn remove_item(&mut self, product_id: ProductId) -> Result<LineItem, CartError> {
        let index = self
            .position(product_id)
            .ok_or(CartError::ItemNotFound(product_id))?;
        self.version += 1;
        Ok(self.items.remove(index))
    }

    pub fn remove_line(&mut self, line_id: CartLineId) -> Result<LineItem, CartError> {
        let product_id = self
            .product_for_line(line_id)
            .ok_or(CartError::LineNotFound(line_id))?;
        self.remove_item(product_id)
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.version += 1;
    }

    /// Clears the cart only if nobody touched it since `version` was read.
    pub fn clear_if_version(&mut self, version: u64) -> Result<(), CartError> {
        if self.version != version {
            return Err(CartError::VersionConflict {
                expected: version,
                actual: self.version,
            });
        }
        self.clear();
        Ok(())
    }

    /// Puts back lines removed by a checkout that did not go through.
    ///
    /// Lines for products the cart already holds again are skipped; the
    /// owner's newer edits win. So are lines that would no longer fit under
    /// [`Money::MAX`] next to those edits.
    pub fn restore(&mut self, items: Vec<LineItem>) {
        for item in items {
            if self.position(item.product_id).is_some() || self.check_subtotal(&item).is_err() {
                continue;
            }
            self.next_line = self.next_line.max(item.line_id.0 + 1);
            self.items.push(item);
        }
        self.version += 1;
    }

    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |count, i| count.saturating_add(i.quantity))
    }

    pub fn summary(&self, policy: &PricingPolicy) -> CartSummary {
        CartSummary {
            owner_id: self.owner_id,
            items: self.items.clone(),
            item_count: self.item_count(),
            totals: policy.compute_totals(&self.items),
            version: self.version,
        }
    }

    /// Summary under the default pricing policy.
    pub fn get_summary(&self) -> CartSummary {
        self.summary(&PricingPolicy::default())
    }
}
