//! Error type of the order service.

use crate::cart_actor::CartError;
use crate::error::{DomainError, ErrorKind};
use crate::model::{Actor, ProductId};
use crate::order_actor::LifecycleError;
use crate::product_actor::ProductError;
use thiserror::Error;

/// Checkout and order-management failures. Errors raised by the actors are
/// wrapped as they are, so their kind survives.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderServiceError {
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    #[error("Invalid checkout: {0}")]
    Validation(String),

    #[error("Not enough stock for {product_id}: requested {requested}, available {available}")]
    OutOfStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    #[error("{actor} may not {action}")]
    Unauthorized { actor: Actor, action: String },

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Product(#[from] ProductError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

impl DomainError for OrderServiceError {
    fn kind(&self) -> ErrorKind {
        match self {
            OrderServiceError::EmptyCart => ErrorKind::EmptyCart,
            OrderServiceError::Validation(_) => ErrorKind::ValidationError,
            OrderServiceError::OutOfStock { .. } => ErrorKind::OutOfStock,
            OrderServiceError::Unauthorized { .. } => ErrorKind::Unauthorized,
            OrderServiceError::Cart(e) => e.kind(),
            OrderServiceError::Product(e) => e.kind(),
            OrderServiceError::Lifecycle(e) => e.kind(),
        }
    }
}
