//! Request and response bodies exchanged with the storefront's callers.
//!
//! Field names are snake_case, matching the JSON the web client already
//! speaks. Full reads (an `Order`, a `ProductQuote`) serialize their model
//! types directly; the types here cover the request bodies and the trimmed
//! views.

use crate::error::{DomainError, ErrorKind};
use crate::model::{CartLineId, CartSummary, LineItem, Money, Order, OrderId, OrderStatus, ProductId, UserId};
use crate::pricing::Totals;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `POST` cart body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// `PUT` cart body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateCartLineRequest {
    pub cart_line_id: CartLineId,
    pub quantity: u32,
}

/// `POST` order body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub shipping_address: String,
}

/// Admin `PUT {status}` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

/// `GET` cart response. `total` is the item subtotal; shipping and tax are
/// broken out in `totals`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartView {
    pub items: Vec<LineItem>,
    pub item_count: u32,
    pub total: Money,
    pub totals: Totals,
}

impl From<&CartSummary> for CartView {
    fn from(summary: &CartSummary) -> Self {
        Self {
            items: summary.items.clone(),
            item_count: summary.item_count,
            total: summary.totals.subtotal,
            totals: summary.totals,
        }
    }
}

/// One row of the admin order listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSummaryView {
    pub order_id: OrderId,
    pub owner_id: UserId,
    pub status: OrderStatus,
    pub status_label: &'static str,
    pub item_count: u32,
    pub total: Money,
    pub created_at: DateTime<Utc>,
}

impl From<&Order> for OrderSummaryView {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.id(),
            owner_id: order.owner_id(),
            status: order.status(),
            status_label: order.status().label(),
            item_count: order.item_count(),
            total: order.totals().total,
            created_at: order.created_at(),
        }
    }
}

/// Failure body: a human-readable message plus the machine-readable kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub kind: ErrorKind,
}

impl ErrorBody {
    pub fn from_error<E: DomainError + ?Sized>(error: &E) -> Self {
        Self {
            message: error.to_string(),
            kind: error.kind(),
        }
    }
}
