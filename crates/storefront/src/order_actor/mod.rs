//! # Order Actor
//!
//! Stores placed orders and applies status transitions. The transition rules
//! come from [`order_lifecycle`](crate::order_lifecycle); this actor makes
//! each check-then-set a single step, so two admins racing on the same order
//! cannot both succeed from the same starting status.
//!
//! Orders can be created and transitioned, nothing else: updates and deletes
//! are refused by the entity.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Order;
use resource_actor::{ResourceActor, ResourceClient};

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::new(buffer_size)
}
