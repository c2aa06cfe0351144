//! # Resource Actor
//!
//! Building blocks for hosting stateful resources as Tokio actors. Each
//! resource type (a product catalogue, a set of carts, a set of orders) gets
//! one [`ResourceActor`] task that owns its store and handles requests one at a
//! time, and any number of cheap [`ResourceClient`] handles that send it
//! requests.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]): the domain type and its hooks.
//! 2. **Runtime Layer** ([`ResourceActor`]): message loop and store.
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]): typed requests.
//!
//! ## Why sequential actors
//!
//! Every hook runs to completion before the next request is looked at. A
//! hook that reads a value, validates it and writes it back is therefore a
//! single atomic step from the point of view of every other client. Domain
//! code relies on this for compare-and-decrement on stock and for
//! check-then-set on order status.
//!
//! Hooks that mutate (`on_update`, `handle_action`) operate on a scratch copy;
//! the copy replaces the stored entity only when the hook succeeds.
//!
//! ## Example
//!
//! ```rust
//! use resource_actor::{ActorEntity, FrameworkError, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Bin { id: u32, units: u32 }
//! #[derive(Debug)] struct BinCreate { units: u32 }
//! #[derive(Debug)] enum BinAction { Take(u32) }
//! #[derive(Debug, thiserror::Error)]
//! #[error("not enough units")]
//! struct NotEnough;
//!
//! #[async_trait]
//! impl ActorEntity for Bin {
//!     type Id = u32;
//!     type Create = BinCreate;
//!     type Update = ();
//!     type Action = BinAction;
//!     type ActionResult = u32;
//!     type Context = ();
//!     type Error = NotEnough;
//!
//!     fn assign_id(sequence: u32, _: &BinCreate) -> u32 { sequence }
//!     fn from_create_params(id: u32, p: BinCreate) -> Result<Self, NotEnough> {
//!         Ok(Self { id, units: p.units })
//!     }
//!     async fn on_update(&mut self, _: (), _: &()) -> Result<(), NotEnough> { Ok(()) }
//!     async fn handle_action(&mut self, a: BinAction, _: &()) -> Result<u32, NotEnough> {
//!         let BinAction::Take(n) = a;
//!         self.units = self.units.checked_sub(n).ok_or(NotEnough)?;
//!         Ok(self.units)
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Bin>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client.create(BinCreate { units: 3 }).await.unwrap();
//!     assert_eq!(client.perform_action(id, BinAction::Take(2)).await.unwrap(), 1);
//!     let err = client.perform_action(id, BinAction::Take(2)).await.unwrap_err();
//!     assert!(matches!(err, FrameworkError::Entity(NotEnough)));
//! }
//! ```
//!
//! ## Context Injection
//!
//! Dependencies are passed to `run(context)` rather than `new()`. All actors
//! can be created first and wired afterwards, so an order actor can receive the
//! product client without construction-order gymnastics.
//!
//! ## Testing
//!
//! See [`mock`] for scripted clients that stand in for a running actor.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
