//! [`ActorEntity`] implementation for [`Order`].

use super::actions::OrderAction;
use super::error::LifecycleError;
use crate::model::{Order, OrderCreate, OrderId};
use async_trait::async_trait;
use chrono::Utc;
use resource_actor::ActorEntity;

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = ();
    type Action = OrderAction;
    type ActionResult = Order;
    type Context = ();
    type Error = LifecycleError;

    fn assign_id(sequence: u32, _params: &OrderCreate) -> OrderId {
        OrderId(sequence)
    }

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, LifecycleError> {
        Order::new(id, params)
    }

    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), LifecycleError> {
        Err(LifecycleError::Validation(
            "order contents cannot change after placement".to_string(),
        ))
    }

    async fn on_delete(&self, _ctx: &()) -> Result<(), LifecycleError> {
        Err(LifecycleError::Validation(format!(
            "{} is part of order history and cannot be deleted",
            self.id()
        )))
    }

    async fn handle_action(&mut self, action: OrderAction, _ctx: &()) -> Result<Order, LifecycleError> {
        match action {
            OrderAction::Transition {
                to,
                actor,
                expected,
            } => {
                self.apply_transition(to, &actor, expected, Utc::now())?;
                Ok(self.clone())
            }
        }
    }
}
