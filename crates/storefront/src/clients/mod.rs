//! # Resource Clients
//!
//! Typed wrappers over [`ResourceClient`](resource_actor::ResourceClient). Each
//! one turns framework errors into its resource's own error enum and exposes
//! only the operations that resource allows; reads (`get`, `list`) come from
//! [`ActorClient`](resource_actor::ActorClient).

pub mod cart_client;
pub mod order_client;
pub mod product_client;

pub use cart_client::CartClient;
pub use order_client::OrderClient;
pub use product_client::ProductClient;
