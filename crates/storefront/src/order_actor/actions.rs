//! Custom actions for the Order actor.

use crate::model::{Actor, OrderStatus};

#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Moves the order to `to` on behalf of `actor`.
    ///
    /// With `expected` set, the move only happens if the order is still in
    /// that status.
    Transition {
        to: OrderStatus,
        actor: Actor,
        expected: Option<OrderStatus>,
    },
}
