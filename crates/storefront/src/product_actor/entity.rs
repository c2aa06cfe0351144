//! [`ActorEntity`] implementation for [`Product`].

use super::actions::{ProductAction, ProductActionResult};
use super::error::ProductError;
use crate::model::{Money, Product, ProductCreate, ProductId, ProductUpdate};
use async_trait::async_trait;
use resource_actor::ActorEntity;

fn validate_name(name: &str) -> Result<String, ProductError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ProductError::Validation("name must not be blank".to_string()));
    }
    Ok(name.to_string())
}

fn validate_price(price: Money) -> Result<Money, ProductError> {
    if price.is_negative() {
        return Err(ProductError::Validation(format!(
            "price must not be negative, got {price}"
        )));
    }
    if !price.is_within_limit() {
        return Err(ProductError::Validation(format!(
            "price must not exceed {}, got {price}",
            Money::MAX
        )));
    }
    Ok(price)
}

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Context = ();
    type Error = ProductError;

    fn assign_id(sequence: u32, _params: &ProductCreate) -> ProductId {
        ProductId(sequence)
    }

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, ProductError> {
        let name = validate_name(&params.name)?;
        let price = validate_price(params.price)?;
        Ok(Self::new(id, name, price, params.stock))
    }

    /// Applies whichever of name, price and stock are present.
    async fn on_update(&mut self, update: ProductUpdate, _ctx: &()) -> Result<(), ProductError> {
        if let Some(name) = update.name {
            self.name = validate_name(&name)?;
        }
        if let Some(price) = update.price {
            self.price = validate_price(price)?;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &(),
    ) -> Result<ProductActionResult, ProductError> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::CheckStock(self.stock)),
            ProductAction::Quote => Ok(ProductActionResult::Quote(self.quote())),
            ProductAction::ReserveStock { expected, quantity } => {
                if quantity == 0 {
                    return Err(ProductError::InvalidQuantity(quantity));
                }
                if self.stock != expected {
                    return Err(ProductError::StockConflict {
                        product_id: self.id,
                        expected,
                        actual: self.stock,
                    });
                }
                if quantity > self.stock {
                    return Err(ProductError::InsufficientStock {
                        product_id: self.id,
                        requested: quantity,
                        available: self.stock,
                    });
                }
                self.stock -= quantity;
                Ok(ProductActionResult::ReserveStock(self.stock))
            }
            ProductAction::ReleaseStock(quantity) => {
                self.stock = self.stock.checked_add(quantity).ok_or_else(|| {
                    ProductError::Validation(format!("releasing {quantity} units overflows stock"))
                })?;
                Ok(ProductActionResult::ReleaseStock(self.stock))
            }
        }
    }
}
