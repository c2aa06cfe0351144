//! Orders: immutable snapshots of a checked-out cart.

use crate::model::{Actor, LineItem, UserId};
use crate::order_actor::LifecycleError;
use crate::pricing::Totals;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub use crate::order_lifecycle::OrderStatus;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// A placed order.
///
/// Items and totals are fixed when the order is created. Afterwards only
/// `status` and `updated_at` change, and only through
/// [`apply_transition`](Order::apply_transition).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    id: OrderId,
    owner_id: UserId,
    items: Vec<LineItem>,
    shipping_address: String,
    status: OrderStatus,
    totals: Totals,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Payload for creating a new order from a validated cart snapshot.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub owner_id: UserId,
    pub items: Vec<LineItem>,
    pub shipping_address: String,
    pub totals: Totals,
    /// Becomes both `created_at` and `updated_at`.
    pub placed_at: DateTime<Utc>,
}

impl Order {
    /// Builds a `pending` order, rejecting snapshots that could not have come
    /// from a successful checkout.
    ///
    /// Deterministic: the same id and params always give the same order.
    pub fn new(id: OrderId, params: OrderCreate) -> Result<Self, LifecycleError> {
        if params.items.is_empty() {
            return Err(LifecycleError::EmptyCart);
        }
        let shipping_address = params.shipping_address.trim().to_string();
        if shipping_address.is_empty() {
            return Err(LifecycleError::Validation(
                "shipping address must not be blank".to_string(),
            ));
        }
        if let Some(item) = params.items.iter().find(|i| i.quantity > i.stock_snapshot) {
            return Err(LifecycleError::OutOfStock {
                product_id: item.product_id,
                requested: item.quantity,
                available: item.stock_snapshot,
            });
        }

        Ok(Self {
            id,
            owner_id: params.owner_id,
            items: params.items,
            shipping_address,
            status: OrderStatus::Pending,
            totals: params.totals,
            created_at: params.placed_at,
            updated_at: params.placed_at,
        })
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn owner_id(&self) -> UserId {
        self.owner_id
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn shipping_address(&self) -> &str {
        &self.shipping_address
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn totals(&self) -> &Totals {
        &self.totals
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |count, i| count.saturating_add(i.quantity))
    }

    /// Moves the order to `to` if the lifecycle allows it for `actor`.
    ///
    /// `expected` is the status the caller based the request on; when it no
    /// longer matches, the request is stale and rejected.
    pub fn apply_transition(
        &mut self,
        to: OrderStatus,
        actor: &Actor,
        expected: Option<OrderStatus>,
        now: DateTime<Utc>,
    ) -> Result<(), LifecycleError> {
        if let Some(expected) = expected {
            if expected != self.status {
                return Err(LifecycleError::StaleStatus {
                    order_id: self.id,
                    expected,
                    actual: self.status,
                });
            }
        }
        crate::order_lifecycle::authorize_transition(self.id, self.owner_id, self.status, to, actor)?;

        self.status = to;
        self.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CartLineId, Money, ProductId};
    use crate::pricing::compute_totals;
    use chrono::Duration;

    fn items() -> Vec<LineItem> {
        vec![LineItem {
            line_id: CartLineId(1),
            product_id: ProductId(1),
            name: "Teh Melati".into(),
            unit_price: Money::from_units(100_000),
            quantity: 2,
            stock_snapshot: 5,
        }]
    }

    fn params() -> OrderCreate {
        let items = items();
        OrderCreate {
            owner_id: UserId(7),
            totals: compute_totals(&items),
            items,
            shipping_address: "  Jl. Sudirman 1, Jakarta ".into(),
            placed_at: Utc::now(),
        }
    }

    #[test]
    fn test_new_order_is_pending() {
        let order = Order::new(OrderId(1), params()).unwrap();
        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.shipping_address(), "Jl. Sudirman 1, Jakarta");
        assert_eq!(order.created_at(), order.updated_at());
        assert_eq!(order.totals().total, Money::from_units(237_000));
        assert_eq!(order.item_count(), 2);
    }

    #[test]
    fn test_same_params_build_the_same_order() {
        let params = params();
        let stored = Order::new(OrderId(4), params.clone()).unwrap();
        let rebuilt = Order::new(OrderId(4), params.clone()).unwrap();
        assert_eq!(stored, rebuilt);
        assert_eq!(stored.created_at(), params.placed_at);
    }

    #[test]
    fn test_new_rejects_bad_snapshots() {
        let mut empty = params();
        empty.items.clear();
        assert_eq!(
            Order::new(OrderId(1), empty).unwrap_err(),
            LifecycleError::EmptyCart
        );

        let mut blank = params();
        blank.shipping_address = "   ".into();
        assert!(matches!(
            Order::new(OrderId(1), blank),
            Err(LifecycleError::Validation(_))
        ));

        let mut oversold = params();
        oversold.items[0].stock_snapshot = 1;
        assert!(matches!(
            Order::new(OrderId(1), oversold),
            Err(LifecycleError::OutOfStock { requested: 2, available: 1, .. })
        ));
    }

    #[test]
    fn test_transition_touches_only_status_and_timestamp() {
        let mut order = Order::new(OrderId(1), params()).unwrap();
        let created = order.created_at();
        let before = order.clone();
        let later = created + Duration::minutes(5);

        order
            .apply_transition(OrderStatus::Processing, &Actor::Admin(UserId(1)), None, later)
            .unwrap();

        assert_eq!(order.status(), OrderStatus::Processing);
        assert_eq!(order.updated_at(), later);
        assert_eq!(order.created_at(), before.created_at());
        assert_eq!(order.items(), before.items());
        assert_eq!(order.totals(), before.totals());
    }

    #[test]
    fn test_stale_expected_status_is_rejected() {
        let mut order = Order::new(OrderId(1), params()).unwrap();
        let admin = Actor::Admin(UserId(1));
        order
            .apply_transition(OrderStatus::Processing, &admin, Some(OrderStatus::Pending), Utc::now())
            .unwrap();

        let err = order
            .apply_transition(OrderStatus::Processing, &admin, Some(OrderStatus::Pending), Utc::now())
            .unwrap_err();
        assert!(matches!(err, LifecycleError::StaleStatus { .. }));
        assert_eq!(order.status(), OrderStatus::Processing);
    }

    #[test]
    fn test_failed_transition_keeps_state() {
        let mut order = Order::new(OrderId(1), params()).unwrap();
        let before = order.clone();
        let err = order
            .apply_transition(OrderStatus::Shipped, &Actor::Admin(UserId(1)), None, Utc::now())
            .unwrap_err();
        assert!(matches!(err, LifecycleError::InvalidTransition { .. }));
        assert_eq!(order, before);
    }
}
