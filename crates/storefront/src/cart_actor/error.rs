//! Error types for the Cart actor.

use crate::error::{DomainError, ErrorKind};
use crate::model::{CartLineId, ProductId};
use crate::product_actor::ProductError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Invalid quantity {quantity} for {product_id}: must be at least 1")]
    InvalidQuantity { product_id: ProductId, quantity: u32 },

    #[error("Not enough stock for {product_id}: requested {requested}, available {available}")]
    OutOfStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    /// The line would push the cart's subtotal past `Money::MAX`.
    #[error("Quantity {quantity} of {product_id} puts the cart total out of range")]
    AmountTooLarge { product_id: ProductId, quantity: u32 },

    #[error("{0} is not in the cart")]
    ItemNotFound(ProductId),

    #[error("Cart line {0} not found")]
    LineNotFound(CartLineId),

    #[error("Cart not found: {0}")]
    NotFound(String),

    /// The cart was edited after the version the caller read.
    #[error("Cart changed (expected version {expected}, found {actual})")]
    VersionConflict { expected: u64, actual: u64 },

    /// The catalogue could not price or stock-check the product.
    #[error(transparent)]
    Catalog(#[from] ProductError),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl DomainError for CartError {
    fn kind(&self) -> ErrorKind {
        match self {
            CartError::InvalidQuantity { .. } | CartError::AmountTooLarge { .. } => {
                ErrorKind::InvalidQuantity
            }
            CartError::OutOfStock { .. } => ErrorKind::OutOfStock,
            CartError::ItemNotFound(_) | CartError::LineNotFound(_) | CartError::NotFound(_) => {
                ErrorKind::NotFound
            }
            CartError::VersionConflict { .. } => ErrorKind::ValidationError,
            CartError::Catalog(inner) => inner.kind(),
            CartError::ActorCommunicationError(_) => ErrorKind::Unavailable,
        }
    }
}
