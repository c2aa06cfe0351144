//! # Generic Messages
//!
//! Requests exchanged between a [`ResourceClient`](crate::ResourceClient) and
//! its [`ResourceActor`](crate::ResourceActor).

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// One-shot reply channel carrying the entity's typed error.
pub type Response<T, E> = oneshot::Sender<Result<T, FrameworkError<E>>>;

/// Message sent to a resource actor.
///
/// The variants are the CRUD lifecycle (`Create`, `Get`, `Update`, `Delete`),
/// a `List` scan over every stored entity, and `Action` for resource-specific
/// operations that do not fit CRUD.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id, T::Error>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>, T::Error>,
    },
    List {
        respond_to: Response<Vec<T>, T::Error>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T, T::Error>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<(), T::Error>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult, T::Error>,
    },
}
