//! # ActorClient Trait
//!
//! Common read surface for resource-specific clients: `get` and `list` come
//! for free once a wrapper exposes its inner `ResourceClient` and says how
//! framework errors map onto its own error type. Mutations stay on the
//! wrappers so each resource decides who may perform them.
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit standard read operations.
///
/// # Example
///
/// ```rust,ignore
/// #[async_trait]
/// impl ActorClient<Product> for ProductClient {
///     type Error = ProductError;
///
///     fn inner(&self) -> &ResourceClient<Product> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError<ProductError>) -> ProductError {
///         match e {
///             FrameworkError::Entity(inner) => inner,
///             FrameworkError::NotFound(id) => ProductError::NotFound(id),
///             other => ProductError::ActorCommunicationError(other.to_string()),
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError<T::Error>) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every entity held by the actor, in no particular order.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }
}
