//! # System Lifecycle & Orchestration
//!
//! Starting, wiring and stopping the store's actors.
//!
//! ## The StoreSystem
//!
//! [`StoreSystem`] creates one actor per resource, starts each with its
//! context, and hands out the clients plus an [`OrderService`](crate::service::OrderService)
//! wired to them:
//!
//! ```rust,ignore
//! let (product_actor, products) = product_actor::new(buffer);
//! let (cart_actor, carts) = cart_actor::new(buffer);
//! let (order_actor, orders) = order_actor::new(buffer);
//!
//! tokio::spawn(product_actor.run(()));
//! tokio::spawn(cart_actor.run(config.pricing)); // summaries need the pricing policy
//! tokio::spawn(order_actor.run(()));
//! ```
//!
//! No actor holds another actor's client, so the dependency graph is
//! trivially acyclic: cross-resource work (checkout) is sequenced by the order
//! service, outside the actors.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients**, including the clones held by the order service
//!    and the cart client's catalogue handle.
//! 2. **Actors detect closure**: `receiver.recv()` returns `None` once the
//!    last sender is gone.
//! 3. **Await completion** of every actor task.
//!
//! A clone of a client kept alive elsewhere (a test, a spawned task) keeps
//! its actor running, and `shutdown` waits for it.
//!
//! ## Observability
//!
//! [`setup_tracing`] installs the `tracing` subscriber; see [`tracing`] for
//! what the actors and clients record.

pub mod store_system;
pub mod tracing;

pub use self::store_system::*;
pub use self::tracing::*;
