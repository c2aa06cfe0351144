//! [`ActorEntity`] implementation for [`Cart`].

use super::actions::{CartAction, CartActionResult};
use super::error::CartError;
use crate::model::{Cart, UserId};
use crate::pricing::PricingPolicy;
use async_trait::async_trait;
use resource_actor::ActorEntity;

/// Opens an empty cart for `owner_id`.
#[derive(Debug, Clone)]
pub struct CartCreate {
    pub owner_id: UserId,
}

#[async_trait]
impl ActorEntity for Cart {
    type Id = UserId;
    type Create = CartCreate;
    type Update = ();
    type Action = CartAction;
    type ActionResult = CartActionResult;
    type Context = PricingPolicy;
    type Error = CartError;

    /// Carts are keyed by their owner, not by the actor's sequence.
    fn assign_id(_sequence: u32, params: &CartCreate) -> UserId {
        params.owner_id
    }

    fn from_create_params(id: UserId, _params: CartCreate) -> Result<Self, CartError> {
        Ok(Cart::new(id))
    }

    async fn on_update(&mut self, _update: (), _ctx: &PricingPolicy) -> Result<(), CartError> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: CartAction,
        policy: &PricingPolicy,
    ) -> Result<CartActionResult, CartError> {
        match action {
            CartAction::AddItem { quote, quantity } => {
                self.add_item(&quote, quantity).map(CartActionResult::Line)
            }
            CartAction::UpdateQuantity {
                product_id,
                quantity,
                current_stock,
            } => self
                .update_quantity(product_id, quantity, current_stock)
                .map(CartActionResult::Line),
            CartAction::UpdateLine {
                line_id,
                quantity,
                current_stock,
            } => self
                .update_line(line_id, quantity, current_stock)
                .map(CartActionResult::Line),
            CartAction::RemoveItem(product_id) => {
                self.remove_item(product_id).map(CartActionResult::Removed)
            }
            CartAction::RemoveLine(line_id) => {
                self.remove_line(line_id).map(CartActionResult::Removed)
            }
            CartAction::Clear => {
                self.clear();
                Ok(CartActionResult::Cleared)
            }
            CartAction::ClearIfVersion(version) => {
                self.clear_if_version(version)?;
                Ok(CartActionResult::Cleared)
            }
            CartAction::Restore(items) => {
                self.restore(items);
                Ok(CartActionResult::Restored)
            }
            CartAction::Summary => Ok(CartActionResult::Summary(self.summary(policy))),
        }
    }
}
