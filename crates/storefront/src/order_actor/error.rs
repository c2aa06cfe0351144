//! Error types for the Order actor.

use crate::error::{DomainError, ErrorKind};
use crate::model::{Actor, OrderId, OrderStatus, ProductId};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum LifecycleError {
    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Cannot place an order with no items")]
    EmptyCart,

    #[error("Order validation error: {0}")]
    Validation(String),

    #[error("Not enough stock for {product_id}: requested {requested}, available {available}")]
    OutOfStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    #[error("{order_id} cannot move from {from} to {to}")]
    InvalidTransition {
        order_id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
    },

    /// The order left the status the caller saw before the request arrived.
    #[error("{order_id} is {actual}, not {expected}")]
    StaleStatus {
        order_id: OrderId,
        expected: OrderStatus,
        actual: OrderStatus,
    },

    #[error("{actor} may not perform {action} on {order_id}")]
    Unauthorized {
        order_id: OrderId,
        actor: Actor,
        action: String,
    },

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl DomainError for LifecycleError {
    fn kind(&self) -> ErrorKind {
        match self {
            LifecycleError::NotFound(_) => ErrorKind::NotFound,
            LifecycleError::EmptyCart => ErrorKind::EmptyCart,
            LifecycleError::Validation(_) => ErrorKind::ValidationError,
            LifecycleError::OutOfStock { .. } => ErrorKind::OutOfStock,
            LifecycleError::InvalidTransition { .. } | LifecycleError::StaleStatus { .. } => {
                ErrorKind::InvalidTransition
            }
            LifecycleError::Unauthorized { .. } => ErrorKind::Unauthorized,
            LifecycleError::ActorCommunicationError(_) => ErrorKind::Unavailable,
        }
    }
}
