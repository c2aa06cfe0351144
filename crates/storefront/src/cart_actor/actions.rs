//! Custom actions for the Cart actor. Each maps onto one [`Cart`](crate::model::Cart) method.

use crate::model::{CartLineId, CartSummary, LineItem, ProductId, ProductQuote};

#[derive(Debug, Clone)]
pub enum CartAction {
    AddItem {
        quote: ProductQuote,
        quantity: u32,
    },
    UpdateQuantity {
        product_id: ProductId,
        quantity: u32,
        current_stock: u32,
    },
    UpdateLine {
        line_id: CartLineId,
        quantity: u32,
        current_stock: u32,
    },
    RemoveItem(ProductId),
    RemoveLine(CartLineId),
    Clear,
    /// Clear, but only if the cart is still at this version.
    ClearIfVersion(u64),
    Restore(Vec<LineItem>),
    Summary,
}

#[derive(Debug, Clone)]
pub enum CartActionResult {
    /// The line as it stands after an add or update.
    Line(LineItem),
    Removed(LineItem),
    Cleared,
    Restored,
    Summary(CartSummary),
}
