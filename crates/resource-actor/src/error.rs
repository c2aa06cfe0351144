//! # Framework Errors
//!
//! Errors surfaced by the actor runtime. Failures raised by an entity's own
//! hooks travel back to the caller untouched inside [`FrameworkError::Entity`],
//! so a client can still match on the domain error kind.

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError<E> {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Item already exists: {0}")]
    AlreadyExists(String),
    #[error(transparent)]
    Entity(E),
}

impl<E> FrameworkError<E> {
    /// True when the failure came from the runtime rather than the entity.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::ActorClosed | Self::ActorDropped)
    }
}
