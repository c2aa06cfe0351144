//! Error kinds shared by every storefront error type.
//!
//! Each resource keeps its own `thiserror` enum with full context; callers
//! that only need to branch on the category use [`DomainError::kind`].

use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidQuantity,
    OutOfStock,
    NotFound,
    EmptyCart,
    ValidationError,
    InvalidTransition,
    Unauthorized,
    /// The actor runtime could not deliver the request or its reply.
    Unavailable,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::InvalidQuantity => "invalid_quantity",
            ErrorKind::OutOfStock => "out_of_stock",
            ErrorKind::NotFound => "not_found",
            ErrorKind::EmptyCart => "empty_cart",
            ErrorKind::ValidationError => "validation_error",
            ErrorKind::InvalidTransition => "invalid_transition",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::Unavailable => "unavailable",
        };
        f.write_str(name)
    }
}

/// Implemented by every storefront error enum.
pub trait DomainError: std::error::Error {
    fn kind(&self) -> ErrorKind;
}
