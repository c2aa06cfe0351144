//! Error types for the Product actor.

use crate::error::{DomainError, ErrorKind};
use crate::model::ProductId;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    /// Stock changed between the read and the compare-and-decrement.
    #[error("Stock of {product_id} changed: expected {expected}, found {actual}")]
    StockConflict {
        product_id: ProductId,
        expected: u32,
        actual: u32,
    },

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    #[error("Invalid product: {0}")]
    Validation(String),

    #[error("Only admins may {0}")]
    Unauthorized(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl DomainError for ProductError {
    fn kind(&self) -> ErrorKind {
        match self {
            ProductError::NotFound(_) => ErrorKind::NotFound,
            ProductError::InsufficientStock { .. } | ProductError::StockConflict { .. } => {
                ErrorKind::OutOfStock
            }
            ProductError::InvalidQuantity(_) => ErrorKind::InvalidQuantity,
            ProductError::Validation(_) => ErrorKind::ValidationError,
            ProductError::Unauthorized(_) => ErrorKind::Unauthorized,
            ProductError::ActorCommunicationError(_) => ErrorKind::Unavailable,
        }
    }
}
