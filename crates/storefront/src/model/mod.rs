//! # Domain Model
//!
//! Plain data shared by the actors and the order service. Nothing in here
//! talks to an actor; the `ActorEntity` implementations live next to each
//! actor (`product_actor::entity`, `cart_actor::entity`, `order_actor::entity`).

pub mod actor;
pub mod cart;
pub mod contracts;
pub mod money;
pub mod order;
pub mod product;

pub use actor::*;
pub use cart::*;
pub use contracts::*;
pub use money::*;
pub use order::*;
pub use product::*;
