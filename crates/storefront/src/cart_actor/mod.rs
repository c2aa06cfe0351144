//! # Cart Actor
//!
//! One [`Cart`] per owner, keyed by the owner's [`UserId`](crate::model::UserId).
//! Carts are opened on first use and cleared, never deleted, after checkout.
//!
//! The rules themselves live on [`Cart`]; the actor only makes each call
//! atomic and injects the [`PricingPolicy`](crate::pricing::PricingPolicy)
//! used for summaries as its context.
//!
//! - [`entity`] - [`ActorEntity`](resource_actor::ActorEntity) implementation for [`Cart`]
//! - [`error`] - [`CartError`]
//! - [`actions`] - [`CartAction`] and [`CartActionResult`]

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::CartCreate;
pub use error::*;

use crate::model::Cart;
use resource_actor::{ResourceActor, ResourceClient};

/// Creates a new Cart actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Cart>, ResourceClient<Cart>) {
    ResourceActor::new(buffer_size)
}
