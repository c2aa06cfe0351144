//! # ActorEntity Trait
//!
//! The contract every resource (product, cart, order) implements to be hosted
//! by a [`ResourceActor`](crate::ResourceActor). Associated types pin down the
//! id, the create/update payloads, the custom actions and the error type, so a
//! cart payload can never reach the order actor.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//!
//! Both default to `Ok(())`.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by `ResourceActor`.
///
/// # Async & Context
/// Hooks are `async` so they may call other actors. The `Context` type is
/// injected into every hook at `run()` time, which lets dependencies be wired
/// after all actors exist.
///
/// # Atomicity
/// `on_update` and `handle_action` run against a scratch copy of the entity.
/// The actor only stores the copy when the hook returns `Ok`, so a hook that
/// fails halfway never leaves a partially-mutated entity behind.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Enum representing resource-specific operations (e.g. `CompareAndDecrement`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The per-actor error type. One enum covers every operation of the actor.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Chooses the key of a new entity.
    ///
    /// `sequence` is the actor's running counter, starting at 1. Entities keyed
    /// by a natural id (a cart keyed by its owner) read it from `params` instead.
    fn assign_id(sequence: u32, params: &Self::Create) -> Self::Id;

    /// Construct the full entity from the id and payload.
    /// Called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after construction, before the entity is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed. Returning an error vetoes the delete.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
