//! # Order Client
//!
//! Creation, lookup and status transitions for orders. There is no update or
//! delete: once placed, an order only ever changes status.
use crate::model::{Actor, Order, OrderCreate, OrderId, OrderStatus};
use crate::order_actor::{LifecycleError, OrderAction};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = LifecycleError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError<LifecycleError>) -> LifecycleError {
        match e {
            FrameworkError::Entity(inner) => inner,
            FrameworkError::NotFound(id) => LifecycleError::NotFound(id),
            other => LifecycleError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Stores a new `pending` order and returns it.
    ///
    /// The actor builds the stored order with [`Order::new`], which is
    /// deterministic, so the copy returned here is rebuilt locally instead of
    /// being read back.
    #[instrument(skip(self, params), fields(owner = %params.owner_id))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<Order, LifecycleError> {
        debug!(?params, "create_order called");
        let id = self
            .inner
            .create(params.clone())
            .await
            .map_err(Self::map_error)?;
        info!(order_id = %id, "Order placed");
        Order::new(id, params)
    }

    /// Like `get`, but a missing order is an error.
    #[instrument(skip(self))]
    pub async fn fetch(&self, id: OrderId) -> Result<Order, LifecycleError> {
        self.get(id)
            .await?
            .ok_or_else(|| LifecycleError::NotFound(id.to_string()))
    }

    /// Asks the order actor to move `id` to `to`. The legality and permission
    /// checks happen inside the actor against the order's current status.
    #[instrument(skip(self))]
    pub async fn transition(
        &self,
        id: OrderId,
        to: OrderStatus,
        actor: Actor,
        expected: Option<OrderStatus>,
    ) -> Result<Order, LifecycleError> {
        let order = self
            .inner
            .perform_action(
                id,
                OrderAction::Transition {
                    to,
                    actor,
                    expected,
                },
            )
            .await
            .map_err(Self::map_error)?;
        info!(order_id = %id, status = %order.status(), "Order status changed");
        Ok(order)
    }
}
