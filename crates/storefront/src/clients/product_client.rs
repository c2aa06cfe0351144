//! # Product Client
//!
//! Catalogue administration and the stock operations checkout relies on.
use crate::model::{Actor, Product, ProductCreate, ProductId, ProductQuote, ProductUpdate};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, info, instrument, warn};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError<ProductError>) -> ProductError {
        match e {
            FrameworkError::Entity(inner) => inner,
            FrameworkError::NotFound(id) => ProductError::NotFound(id),
            other => ProductError::ActorCommunicationError(other.to_string()),
        }
    }
}

fn require_admin(actor: &Actor, what: &str) -> Result<(), ProductError> {
    if actor.is_admin() {
        Ok(())
    } else {
        warn!(%actor, what, "Rejected catalogue change");
        Err(ProductError::Unauthorized(what.to_string()))
    }
}

fn unexpected(result: ProductActionResult) -> ProductError {
    ProductError::ActorCommunicationError(format!("unexpected reply {result:?}"))
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }

    async fn act(&self, id: ProductId, action: ProductAction) -> Result<ProductActionResult, ProductError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn create_product(&self, actor: &Actor, params: ProductCreate) -> Result<ProductId, ProductError> {
        require_admin(actor, "create products")?;
        debug!("Sending request");
        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        info!(product_id = %id, "Product added to catalogue");
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        actor: &Actor,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        require_admin(actor, "update products")?;
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Removes a product from the catalogue. Existing orders keep their
    /// snapshot; carts still holding it fail at checkout with `NotFound`.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, actor: &Actor, id: ProductId) -> Result<(), ProductError> {
        require_admin(actor, "delete products")?;
        self.inner.delete(id).await.map_err(Self::map_error)
    }

    /// How many products the catalogue holds.
    #[instrument(skip(self))]
    pub async fn product_count(&self) -> Result<usize, ProductError> {
        Ok(self.list().await?.len())
    }

    /// Live price and stock.
    #[instrument(skip(self))]
    pub async fn quote(&self, id: ProductId) -> Result<ProductQuote, ProductError> {
        match self.act(id, ProductAction::Quote).await? {
            ProductActionResult::Quote(quote) => Ok(quote),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ProductId) -> Result<u32, ProductError> {
        match self.act(id, ProductAction::CheckStock).await? {
            ProductActionResult::CheckStock(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }

    /// Compare-and-decrement: takes `quantity` units only if stock is still
    /// `expected`. Returns the stock left.
    #[instrument(skip(self))]
    pub async fn reserve_stock(&self, id: ProductId, expected: u32, quantity: u32) -> Result<u32, ProductError> {
        debug!("Reserving {} units for {}", quantity, id);
        match self
            .act(id, ProductAction::ReserveStock { expected, quantity })
            .await?
        {
            ProductActionResult::ReserveStock(remaining) => Ok(remaining),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn release_stock(&self, id: ProductId, quantity: u32) -> Result<u32, ProductError> {
        match self.act(id, ProductAction::ReleaseStock(quantity)).await? {
            ProductActionResult::ReleaseStock(stock) => Ok(stock),
            other => Err(unexpected(other)),
        }
    }
}
