//! Custom actions for the Product actor.
//!
//! Handled by [`ActorEntity::handle_action`](resource_actor::ActorEntity::handle_action)
//! in [`entity`](super::entity).

use crate::model::ProductQuote;

#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Reads the current stock level.
    CheckStock,
    /// Reads price, name and stock in one go.
    Quote,
    /// Takes `quantity` units, but only if stock still equals `expected`.
    ///
    /// # Errors
    /// `StockConflict` when stock moved since it was read,
    /// `InsufficientStock` when it did not but is too low.
    ReserveStock { expected: u32, quantity: u32 },
    /// Puts back units taken by a checkout that did not complete.
    ReleaseStock(u32),
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone)]
pub enum ProductActionResult {
    CheckStock(u32),
    Quote(ProductQuote),
    /// Stock left after the reservation.
    ReserveStock(u32),
    /// Stock after the release.
    ReleaseStock(u32),
}
