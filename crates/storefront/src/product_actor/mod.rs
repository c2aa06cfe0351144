//! # Product Actor
//!
//! Hosts the catalogue: every product's name, price and live stock.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](resource_actor::ActorEntity) implementation for [`Product`]
//! - [`error`] - [`ProductError`]
//! - [`actions`] - [`ProductAction`] and [`ProductActionResult`] for stock handling
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Stock contention
//!
//! Checkout never decrements blindly. It reads the stock, validates against
//! it, then asks for a compare-and-decrement:
//!
//! ```rust,ignore
//! let level = product_client.check_stock(id).await?;
//! // ... validate `quantity <= level` ...
//! product_client.reserve_stock(id, level, quantity).await?; // StockConflict if level moved
//! ```
//!
//! Because the actor handles one message at a time, the comparison and the
//! decrement cannot interleave with another checkout.
//!
//! ## Usage
//!
//! ```rust
//! use storefront::clients::ProductClient;
//! use storefront::model::{Actor, Money, ProductCreate, UserId};
//! use storefront::product_actor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, generic_client) = product_actor::new(32);
//!     let client = ProductClient::new(generic_client);
//!     tokio::spawn(actor.run(()));
//!
//!     let admin = Actor::Admin(UserId(1));
//!     let params = ProductCreate {
//!         name: "Kopi Toraja 250g".to_string(),
//!         price: Money::from_units(85_000),
//!         stock: 12,
//!     };
//!     let id = client.create_product(&admin, params).await?;
//!
//!     let level = client.check_stock(id).await?;
//!     let remaining = client.reserve_stock(id, level, 2).await?;
//!     assert_eq!(remaining, 10);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Product;
use resource_actor::{ResourceActor, ResourceClient};

/// Creates a new Product actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, ResourceClient<Product>) {
    ResourceActor::new(buffer_size)
}
