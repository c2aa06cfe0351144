//! # Cart Client
//!
//! Per-owner cart operations. Looks up the live quote from the catalogue
//! before every add or quantity change, so callers pass only a product id
//! and a quantity.
use crate::cart_actor::{CartAction, CartActionResult, CartCreate, CartError};
use crate::clients::ProductClient;
use crate::model::{Cart, CartLineId, CartSummary, LineItem, ProductId, UserId};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the Cart actor.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<Cart>,
    catalog: ProductClient,
}

#[async_trait]
impl ActorClient<Cart> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &ResourceClient<Cart> {
        &self.inner
    }

    fn map_error(e: FrameworkError<CartError>) -> CartError {
        match e {
            FrameworkError::Entity(inner) => inner,
            FrameworkError::NotFound(id) => CartError::NotFound(id),
            other => CartError::ActorCommunicationError(other.to_string()),
        }
    }
}

fn unexpected(result: CartActionResult) -> CartError {
    CartError::ActorCommunicationError(format!("unexpected reply {result:?}"))
}

impl CartClient {
    pub fn new(inner: ResourceClient<Cart>, catalog: ProductClient) -> Self {
        Self { inner, catalog }
    }

    /// The catalogue this client prices lines against.
    pub fn catalog(&self) -> &ProductClient {
        &self.catalog
    }

    async fn act(&self, owner: UserId, action: CartAction) -> Result<CartActionResult, CartError> {
        self.inner
            .perform_action(owner, action)
            .await
            .map_err(Self::map_error)
    }

    async fn act_on_line(&self, owner: UserId, action: CartAction) -> Result<LineItem, CartError> {
        match self.act(owner, action).await? {
            CartActionResult::Line(line) | CartActionResult::Removed(line) => Ok(line),
            other => Err(unexpected(other)),
        }
    }

    /// Opens the owner's cart if it does not exist yet.
    #[instrument(skip(self))]
    pub async fn open(&self, owner: UserId) -> Result<(), CartError> {
        match self.inner.create(CartCreate { owner_id: owner }).await {
            Ok(_) | Err(FrameworkError::AlreadyExists(_)) => Ok(()),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    #[instrument(skip(self))]
    pub async fn add_item(&self, owner: UserId, product_id: ProductId, quantity: u32) -> Result<LineItem, CartError> {
        if quantity < 1 {
            return Err(CartError::InvalidQuantity {
                product_id,
                quantity,
            });
        }
        let quote = self.catalog.quote(product_id).await?;
        debug!(?quote, "Adding to cart");
        self.open(owner).await?;
        self.act_on_line(owner, CartAction::AddItem { quote, quantity })
            .await
    }

    #[instrument(skip(self))]
    pub async fn update_quantity(
        &self,
        owner: UserId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<LineItem, CartError> {
        let quote = self.catalog.quote(product_id).await?;
        self.act_on_line(
            owner,
            CartAction::UpdateQuantity {
                product_id,
                quantity,
                current_stock: quote.stock,
            },
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn update_line(&self, owner: UserId, line_id: CartLineId, quantity: u32) -> Result<LineItem, CartError> {
        let product_id = self
            .summary(owner)
            .await?
            .items
            .iter()
            .find(|line| line.line_id == line_id)
            .map(|line| line.product_id)
            .ok_or(CartError::LineNotFound(line_id))?;
        let quote = self.catalog.quote(product_id).await?;
        self.act_on_line(
            owner,
            CartAction::UpdateLine {
                line_id,
                quantity,
                current_stock: quote.stock,
            },
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn remove_item(&self, owner: UserId, product_id: ProductId) -> Result<LineItem, CartError> {
        self.act_on_line(owner, CartAction::RemoveItem(product_id))
            .await
    }

    #[instrument(skip(self))]
    pub async fn remove_line(&self, owner: UserId, line_id: CartLineId) -> Result<LineItem, CartError> {
        self.act_on_line(owner, CartAction::RemoveLine(line_id)).await
    }

    /// Empties the cart. A cart that was never opened is already empty.
    #[instrument(skip(self))]
    pub async fn clear(&self, owner: UserId) -> Result<(), CartError> {
        match self.inner.perform_action(owner, CartAction::Clear).await {
            Ok(_) | Err(FrameworkError::NotFound(_)) => Ok(()),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Current lines and totals. A cart that was never opened reads as empty.
    #[instrument(skip(self))]
    pub async fn summary(&self, owner: UserId) -> Result<CartSummary, CartError> {
        match self.inner.perform_action(owner, CartAction::Summary).await {
            Ok(CartActionResult::Summary(summary)) => Ok(summary),
            Ok(other) => Err(unexpected(other)),
            Err(FrameworkError::NotFound(_)) => Ok(CartSummary::empty(owner)),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Clears the cart if it is still at `version`; `VersionConflict` otherwise.
    #[instrument(skip(self))]
    pub async fn clear_if_version(&self, owner: UserId, version: u64) -> Result<(), CartError> {
        self.act(owner, CartAction::ClearIfVersion(version))
            .await
            .map(|_| ())
    }

    #[instrument(skip(self, items))]
    pub async fn restore(&self, owner: UserId, items: Vec<LineItem>) -> Result<(), CartError> {
        self.act(owner, CartAction::Restore(items)).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Money, Product, ProductQuote};
    use crate::pricing::PricingPolicy;
    use crate::product_actor::{ProductActionResult, ProductError};
    use resource_actor::mock::MockClient;

    fn quote(stock: u32) -> ProductQuote {
        ProductQuote {
            product_id: ProductId(5),
            name: "Keripik Balado".into(),
            unit_price: Money::from_units(12_000),
            stock,
        }
    }

    /// Real cart actor, scripted catalogue.
    fn setup(products: &MockClient<Product>) -> CartClient {
        let (actor, client) = crate::cart_actor::new(8);
        tokio::spawn(actor.run(PricingPolicy::default()));
        CartClient::new(client, ProductClient::new(products.client()))
    }

    #[tokio::test]
    async fn test_add_uses_live_quote() {
        let mut products = MockClient::<Product>::new();
        products
            .expect_action(ProductId(5))
            .return_ok(ProductActionResult::Quote(quote(10)));
        let carts = setup(&products);

        let line = carts.add_item(UserId(1), ProductId(5), 3).await.unwrap();
        assert_eq!(line.unit_price, Money::from_units(12_000));
        assert_eq!(line.stock_snapshot, 10);

        let summary = carts.summary(UserId(1)).await.unwrap();
        assert_eq!(summary.item_count, 3);
        products.verify();
    }

    #[tokio::test]
    async fn test_add_beyond_stock_leaves_cart_unchanged() {
        let mut products = MockClient::<Product>::new();
        products
            .expect_action(ProductId(5))
            .return_ok(ProductActionResult::Quote(quote(2)));
        let carts = setup(&products);

        let err = carts.add_item(UserId(1), ProductId(5), 3).await.unwrap_err();
        assert_eq!(
            err,
            CartError::OutOfStock {
                product_id: ProductId(5),
                requested: 3,
                available: 2
            }
        );
        assert!(carts.summary(UserId(1)).await.unwrap().items.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_product_is_not_found() {
        let mut products = MockClient::<Product>::new();
        products
            .expect_action(ProductId(5))
            .return_err(FrameworkError::NotFound("product_5".into()));
        let carts = setup(&products);

        let err = carts.add_item(UserId(1), ProductId(5), 1).await.unwrap_err();
        assert_eq!(err, CartError::Catalog(ProductError::NotFound("product_5".into())));
    }

    #[tokio::test]
    async fn test_carts_are_private_to_their_owner() {
        let mut products = MockClient::<Product>::new();
        products
            .expect_action(ProductId(5))
            .return_ok(ProductActionResult::Quote(quote(10)));
        let carts = setup(&products);

        carts.add_item(UserId(1), ProductId(5), 1).await.unwrap();
        assert!(carts.summary(UserId(2)).await.unwrap().items.is_empty());
        assert!(matches!(
            carts.remove_item(UserId(2), ProductId(5)).await,
            Err(CartError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_line_by_id() {
        let mut products = MockClient::<Product>::new();
        products
            .expect_action(ProductId(5))
            .return_ok(ProductActionResult::Quote(quote(10)));
        products
            .expect_action(ProductId(5))
            .return_ok(ProductActionResult::Quote(quote(4)));
        let carts = setup(&products);

        let line = carts.add_item(UserId(1), ProductId(5), 1).await.unwrap();
        let updated = carts.update_line(UserId(1), line.line_id, 4).await.unwrap();
        assert_eq!(updated.quantity, 4);
        assert_eq!(updated.stock_snapshot, 4);

        carts.remove_line(UserId(1), line.line_id).await.unwrap();
        assert!(carts.summary(UserId(1)).await.unwrap().items.is_empty());
        products.verify();
    }
}
