use super::error::OrderServiceError;
use super::stock_ledger::StockLedger;
use crate::clients::{CartClient, OrderClient, ProductClient};
use crate::config::StoreConfig;
use crate::model::{Actor, LineItem, Money, Order, OrderCreate, OrderId, OrderStatus, ProductId};
use crate::pricing::PricingPolicy;
use crate::product_actor::ProductError;
use chrono::Utc;
use resource_actor::ActorClient;
use serde::Serialize;
use tracing::{error, info, instrument, warn};

/// Dashboard figures for admins.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderStats {
    pub total_products: usize,
    pub total_orders: usize,
    pub pending_orders: usize,
    /// Sum of order totals, cancelled orders excluded.
    pub revenue: Money,
}

/// Converts carts into orders and drives them through their lifecycle.
///
/// Generic over the stock source so tests can script contention; the
/// running system uses the [`ProductClient`].
#[derive(Clone)]
pub struct OrderService<L = ProductClient> {
    carts: CartClient,
    orders: OrderClient,
    stock: L,
    pricing: PricingPolicy,
    stock_retry_limit: u32,
}

impl<L: StockLedger> OrderService<L> {
    pub fn new(carts: CartClient, orders: OrderClient, stock: L, config: &StoreConfig) -> Self {
        Self {
            carts,
            orders,
            stock,
            pricing: config.pricing,
            stock_retry_limit: config.stock_retry_limit,
        }
    }

    /// Checks out the caller's cart.
    ///
    /// Every line is re-validated against live stock and reserved with a
    /// compare-and-decrement. The cart is cleared only if it still matches the
    /// snapshot that was priced. Any failure puts back what was taken, so the
    /// cart and the stock end up as they were.
    #[instrument(skip(self))]
    pub async fn create_order(&self, actor: &Actor, shipping_address: &str) -> Result<Order, OrderServiceError> {
        let owner = actor.user_id();
        let snapshot = self.carts.summary(owner).await?;

        if snapshot.items.is_empty() {
            return Err(OrderServiceError::EmptyCart);
        }
        let shipping_address = shipping_address.trim();
        if shipping_address.is_empty() {
            return Err(OrderServiceError::Validation(
                "shipping address must not be blank".to_string(),
            ));
        }

        let mut reserved = Vec::with_capacity(snapshot.items.len());
        let mut items = Vec::with_capacity(snapshot.items.len());
        for item in &snapshot.items {
            match self.reserve_line(item).await {
                Ok(stock_at_commit) => {
                    reserved.push((item.product_id, item.quantity));
                    items.push(LineItem {
                        stock_snapshot: stock_at_commit,
                        ..item.clone()
                    });
                }
                Err(e) => {
                    self.release_all(&reserved).await;
                    return Err(e);
                }
            }
        }
        let totals = self.pricing.compute_totals(&items);

        if let Err(e) = self.carts.clear_if_version(owner, snapshot.version).await {
            warn!(%owner, error = %e, "Cart changed during checkout");
            self.release_all(&reserved).await;
            return Err(e.into());
        }

        let params = OrderCreate {
            owner_id: owner,
            items,
            shipping_address: shipping_address.to_string(),
            totals,
            placed_at: Utc::now(),
        };
        let order = match self.orders.create_order(params).await {
            Ok(order) => order,
            Err(e) => {
                if let Err(restore_error) = self.carts.restore(owner, snapshot.items).await {
                    error!(%owner, error = %restore_error, "Could not restore cart after failed checkout");
                }
                self.release_all(&reserved).await;
                return Err(e.into());
            }
        };

        info!(%owner, order_id = %order.id(), total = %totals.total, "Checkout complete");
        Ok(order)
    }

    /// Reserves one line, returning the stock level it was validated against.
    async fn reserve_line(&self, item: &LineItem) -> Result<u32, OrderServiceError> {
        let product_id = item.product_id;
        let mut available = item.stock_snapshot;

        for attempt in 1..=self.stock_retry_limit {
            let level = self.stock.current_stock(product_id).await?;
            available = level;
            if item.quantity > level {
                break;
            }
            match self
                .stock
                .compare_and_decrement(product_id, level, item.quantity)
                .await
            {
                Ok(_) => return Ok(level),
                Err(ProductError::StockConflict { actual, .. }) => {
                    warn!(%product_id, attempt, actual, "Stock moved during checkout, retrying");
                    available = actual;
                }
                Err(ProductError::InsufficientStock { available: left, .. }) => {
                    available = left;
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(OrderServiceError::OutOfStock {
            product_id,
            requested: item.quantity,
            available,
        })
    }

    async fn release_all(&self, reserved: &[(ProductId, u32)]) {
        for &(product_id, quantity) in reserved {
            if let Err(e) = self.stock.release(product_id, quantity).await {
                error!(%product_id, quantity, error = %e, "Could not release reserved stock");
            }
        }
    }

    /// Cancels an order. Allowed to the owner and to admins while the order is
    /// `pending` or `processing`. Stock is not put back.
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, order_id: OrderId, actor: &Actor) -> Result<Order, OrderServiceError> {
        Ok(self
            .orders
            .transition(order_id, OrderStatus::Cancelled, *actor, None)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        order_id: OrderId,
        new_status: OrderStatus,
        actor: &Actor,
    ) -> Result<Order, OrderServiceError> {
        Ok(self
            .orders
            .transition(order_id, new_status, *actor, None)
            .await?)
    }

    /// Like [`update_status`](Self::update_status), but only if the order is
    /// still in `expected`, e.g. the status an admin saw on their screen.
    #[instrument(skip(self))]
    pub async fn update_status_from(
        &self,
        order_id: OrderId,
        expected: OrderStatus,
        new_status: OrderStatus,
        actor: &Actor,
    ) -> Result<Order, OrderServiceError> {
        Ok(self
            .orders
            .transition(order_id, new_status, *actor, Some(expected))
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, order_id: OrderId, actor: &Actor) -> Result<Order, OrderServiceError> {
        let order = self.orders.fetch(order_id).await?;
        if !actor.can_view(order.owner_id()) {
            return Err(OrderServiceError::Unauthorized {
                actor: *actor,
                action: format!("view {order_id}"),
            });
        }
        Ok(order)
    }

    /// The caller's own orders, newest first.
    #[instrument(skip(self))]
    pub async fn list_orders_for(&self, actor: &Actor) -> Result<Vec<Order>, OrderServiceError> {
        let owner = actor.user_id();
        let mut orders: Vec<Order> = self
            .orders
            .list()
            .await?
            .into_iter()
            .filter(|order| order.owner_id() == owner)
            .collect();
        sort_newest_first(&mut orders);
        Ok(orders)
    }

    /// Every order in the store, newest first. Admin only.
    #[instrument(skip(self))]
    pub async fn list_all_orders(&self, actor: &Actor) -> Result<Vec<Order>, OrderServiceError> {
        require_admin(actor, "list all orders")?;
        let mut orders = self.orders.list().await?;
        sort_newest_first(&mut orders);
        Ok(orders)
    }

    #[instrument(skip(self))]
    pub async fn order_stats(&self, actor: &Actor) -> Result<OrderStats, OrderServiceError> {
        require_admin(actor, "view order statistics")?;
        let orders = self.orders.list().await?;
        let total_products = self.carts.catalog().product_count().await?;
        Ok(OrderStats {
            total_products,
            total_orders: orders.len(),
            pending_orders: orders
                .iter()
                .filter(|o| o.status() == OrderStatus::Pending)
                .count(),
            revenue: orders
                .iter()
                .filter(|o| o.status() != OrderStatus::Cancelled)
                .map(|o| o.totals().total)
                .sum(),
        })
    }
}

fn require_admin(actor: &Actor, action: &str) -> Result<(), OrderServiceError> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(OrderServiceError::Unauthorized {
            actor: *actor,
            action: action.to_string(),
        })
    }
}

fn sort_newest_first(orders: &mut [Order]) {
    orders.sort_by(|a, b| {
        b.created_at()
            .cmp(&a.created_at())
            .then_with(|| b.id().cmp(&a.id()))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart_actor::{CartAction, CartCreate};
    use crate::error::{DomainError, ErrorKind};
    use crate::model::{Cart, Product, ProductQuote, UserId};
    use crate::product_actor::ProductActionResult;
    use async_trait::async_trait;
    use resource_actor::mock::MockClient;
    use resource_actor::{FrameworkError, ResourceClient};
    use std::collections::HashMap;
    use std::sync::Mutex;

    const BUYER: UserId = UserId(7);

    struct Harness {
        service: OrderService,
        carts: ResourceClient<Cart>,
        products: MockClient<Product>,
    }

    /// Real cart and order actors; the catalogue is scripted.
    fn harness(retries: u32) -> Harness {
        let products = MockClient::<Product>::new();
        let catalog = ProductClient::new(products.client());

        let (cart_actor, carts) = crate::cart_actor::new(8);
        let (order_actor, orders) = crate::order_actor::new(8);
        tokio::spawn(cart_actor.run(PricingPolicy::default()));
        tokio::spawn(order_actor.run(()));

        let config = StoreConfig {
            stock_retry_limit: retries,
            ..StoreConfig::default()
        };
        let service = OrderService::new(
            CartClient::new(carts.clone(), catalog.clone()),
            OrderClient::new(orders),
            catalog,
            &config,
        );
        Harness {
            service,
            carts,
            products,
        }
    }

    async fn seed(carts: &ResourceClient<Cart>, lines: &[(u32, i64, u32)]) {
        carts.create(CartCreate { owner_id: BUYER }).await.unwrap();
        for &(id, price, quantity) in lines {
            let quote = ProductQuote {
                product_id: ProductId(id),
                name: format!("Product {id}"),
                unit_price: Money::from_units(price),
                stock: 100,
            };
            carts
                .perform_action(BUYER, CartAction::AddItem { quote, quantity })
                .await
                .unwrap();
        }
    }

    async fn cart_lines(service: &OrderService) -> usize {
        service.carts.summary(BUYER).await.unwrap().items.len()
    }

    fn conflict(id: u32, expected: u32, actual: u32) -> FrameworkError<ProductError> {
        FrameworkError::Entity(ProductError::StockConflict {
            product_id: ProductId(id),
            expected,
            actual,
        })
    }

    #[tokio::test]
    async fn test_checkout_snapshots_cart_and_clears_it() {
        let mut h = harness(3);
        seed(&h.carts, &[(1, 100_000, 2)]).await;
        h.products
            .expect_action(ProductId(1))
            .return_ok(ProductActionResult::CheckStock(10));
        h.products
            .expect_action(ProductId(1))
            .return_ok(ProductActionResult::ReserveStock(8));

        let order = h
            .service
            .create_order(&Actor::Customer(BUYER), "Jl. Merdeka 17")
            .await
            .unwrap();

        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.owner_id(), BUYER);
        assert_eq!(order.items()[0].stock_snapshot, 10);
        assert_eq!(order.totals().total, Money::from_units(237_000));
        let stored = h
            .service
            .get_order(order.id(), &Actor::Customer(BUYER))
            .await
            .unwrap();
        assert_eq!(stored, order);
        assert_eq!(cart_lines(&h.service).await, 0);
        h.products.verify();
    }

    #[tokio::test]
    async fn test_empty_cart_creates_nothing() {
        let h = harness(3);
        let err = h
            .service
            .create_order(&Actor::Customer(BUYER), "Jl. Merdeka 17")
            .await
            .unwrap_err();
        assert_eq!(err, OrderServiceError::EmptyCart);
        assert_eq!(err.kind(), ErrorKind::EmptyCart);
        assert!(h
            .service
            .list_orders_for(&Actor::Customer(BUYER))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_blank_address_is_rejected_before_touching_stock() {
        let h = harness(3);
        seed(&h.carts, &[(1, 1_000, 1)]).await;
        let err = h
            .service
            .create_order(&Actor::Customer(BUYER), "   ")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationError);
        assert_eq!(cart_lines(&h.service).await, 1);
        h.products.verify();
    }

    #[tokio::test]
    async fn test_conflict_is_retried_against_fresh_stock() {
        let mut h = harness(3);
        seed(&h.carts, &[(1, 1_000, 2)]).await;
        h.products
            .expect_action(ProductId(1))
            .return_ok(ProductActionResult::CheckStock(5));
        h.products.expect_action(ProductId(1)).return_err(conflict(1, 5, 4));
        h.products
            .expect_action(ProductId(1))
            .return_ok(ProductActionResult::CheckStock(4));
        h.products
            .expect_action(ProductId(1))
            .return_ok(ProductActionResult::ReserveStock(2));

        let order = h
            .service
            .create_order(&Actor::Customer(BUYER), "Jl. Merdeka 17")
            .await
            .unwrap();
        assert_eq!(order.items()[0].stock_snapshot, 4);
        h.products.verify();
    }

    #[tokio::test]
    async fn test_persistent_conflict_surfaces_out_of_stock() {
        let mut h = harness(2);
        seed(&h.carts, &[(1, 1_000, 2)]).await;
        for _ in 0..2 {
            h.products
                .expect_action(ProductId(1))
                .return_ok(ProductActionResult::CheckStock(5));
            h.products.expect_action(ProductId(1)).return_err(conflict(1, 5, 3));
        }

        let err = h
            .service
            .create_order(&Actor::Customer(BUYER), "Jl. Merdeka 17")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            OrderServiceError::OutOfStock {
                product_id: ProductId(1),
                requested: 2,
                available: 3
            }
        );
        assert_eq!(cart_lines(&h.service).await, 1);
        h.products.verify();
    }

    #[tokio::test]
    async fn test_later_shortage_releases_earlier_reservations() {
        let mut h = harness(3);
        seed(&h.carts, &[(1, 1_000, 2), (2, 5_000, 3)]).await;
        h.products
            .expect_action(ProductId(1))
            .return_ok(ProductActionResult::CheckStock(10));
        h.products
            .expect_action(ProductId(1))
            .return_ok(ProductActionResult::ReserveStock(8));
        h.products
            .expect_action(ProductId(2))
            .return_ok(ProductActionResult::CheckStock(1));
        h.products
            .expect_action(ProductId(1))
            .return_ok(ProductActionResult::ReleaseStock(10));

        let err = h
            .service
            .create_order(&Actor::Customer(BUYER), "Jl. Merdeka 17")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            OrderServiceError::OutOfStock { product_id: ProductId(2), requested: 3, available: 1 }
        ));
        assert_eq!(cart_lines(&h.service).await, 2);
        h.products.verify();
    }

    #[tokio::test]
    async fn test_deleted_product_fails_checkout_with_not_found() {
        let mut h = harness(3);
        seed(&h.carts, &[(1, 1_000, 1)]).await;
        h.products
            .expect_action(ProductId(1))
            .return_err(FrameworkError::NotFound("product_1".into()));

        let err = h
            .service
            .create_order(&Actor::Customer(BUYER), "Jl. Merdeka 17")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        h.products.verify();
    }

    #[tokio::test]
    async fn test_admin_only_views() {
        let mut h = harness(3);
        let customer = Actor::Customer(BUYER);
        let err = h.service.list_all_orders(&customer).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        let err = h.service.order_stats(&customer).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);

        h.products.expect_list().return_ok(vec![Product::new(
            ProductId(1),
            "Kopi Gayo",
            Money::from_units(100_000),
            5,
        )]);
        let stats = h.service.order_stats(&Actor::Admin(UserId(1))).await.unwrap();
        assert_eq!(stats.total_products, 1);
        assert_eq!(stats.total_orders, 0);
        assert_eq!(stats.revenue, Money::ZERO);
    }

    /// In-memory stock that answers the first `competitors` decrements with a
    /// conflict, as if another checkout had just taken one unit.
    struct ContendedLedger {
        stock: Mutex<HashMap<ProductId, u32>>,
        competitors: Mutex<u32>,
    }

    impl ContendedLedger {
        fn new(levels: &[(u32, u32)], competitors: u32) -> Self {
            Self {
                stock: Mutex::new(levels.iter().map(|&(id, n)| (ProductId(id), n)).collect()),
                competitors: Mutex::new(competitors),
            }
        }

        fn level(&self, id: u32) -> u32 {
            self.stock.lock().unwrap()[&ProductId(id)]
        }
    }

    #[async_trait]
    impl StockLedger for ContendedLedger {
        async fn current_stock(&self, product_id: ProductId) -> Result<u32, ProductError> {
            self.stock
                .lock()
                .unwrap()
                .get(&product_id)
                .copied()
                .ok_or_else(|| ProductError::NotFound(product_id.to_string()))
        }

        async fn compare_and_decrement(
            &self,
            product_id: ProductId,
            expected: u32,
            quantity: u32,
        ) -> Result<u32, ProductError> {
            let mut stock = self.stock.lock().unwrap();
            let level = stock.get_mut(&product_id).unwrap();
            let mut competitors = self.competitors.lock().unwrap();
            if *competitors > 0 {
                *competitors -= 1;
                *level -= 1;
            }
            if *level != expected {
                return Err(ProductError::StockConflict {
                    product_id,
                    expected,
                    actual: *level,
                });
            }
            if quantity > *level {
                return Err(ProductError::InsufficientStock {
                    product_id,
                    requested: quantity,
                    available: *level,
                });
            }
            *level -= quantity;
            Ok(*level)
        }

        async fn release(&self, product_id: ProductId, quantity: u32) -> Result<u32, ProductError> {
            let mut stock = self.stock.lock().unwrap();
            let level = stock.get_mut(&product_id).unwrap();
            *level += quantity;
            Ok(*level)
        }
    }

    /// Real cart and order actors over a [`ContendedLedger`].
    fn contended(ledger: ContendedLedger, retries: u32) -> (OrderService<ContendedLedger>, ResourceClient<Cart>) {
        let catalog = ProductClient::new(MockClient::<Product>::new().client());
        let (cart_actor, carts) = crate::cart_actor::new(8);
        let (order_actor, orders) = crate::order_actor::new(8);
        tokio::spawn(cart_actor.run(PricingPolicy::default()));
        tokio::spawn(order_actor.run(()));

        let config = StoreConfig {
            stock_retry_limit: retries,
            ..StoreConfig::default()
        };
        let service = OrderService::new(
            CartClient::new(carts.clone(), catalog),
            OrderClient::new(orders),
            ledger,
            &config,
        );
        (service, carts)
    }

    #[tokio::test]
    async fn test_checkout_wins_after_competing_buyers() {
        let (service, carts) = contended(ContendedLedger::new(&[(1, 10)], 2), 3);
        seed(&carts, &[(1, 1_000, 3)]).await;

        let order = service
            .create_order(&Actor::Customer(BUYER), "Jl. Merdeka 17")
            .await
            .unwrap();

        // Two competitors took one unit each before this checkout got through.
        assert_eq!(order.items()[0].stock_snapshot, 8);
        assert_eq!(service.stock.level(1), 5);
    }

    #[tokio::test]
    async fn test_too_much_contention_gives_up_and_keeps_cart() {
        let (service, carts) = contended(ContendedLedger::new(&[(1, 10)], 5), 2);
        seed(&carts, &[(1, 1_000, 3)]).await;

        let err = service
            .create_order(&Actor::Customer(BUYER), "Jl. Merdeka 17")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::OutOfStock);
        assert_eq!(service.stock.level(1), 8);
        assert_eq!(service.carts.summary(BUYER).await.unwrap().items.len(), 1);
    }

    #[tokio::test]
    async fn test_shortage_on_second_line_puts_first_back() {
        let (service, carts) = contended(ContendedLedger::new(&[(1, 10), (2, 1)], 0), 3);
        seed(&carts, &[(1, 1_000, 2), (2, 5_000, 3)]).await;

        let err = service
            .create_order(&Actor::Customer(BUYER), "Jl. Merdeka 17")
            .await
            .unwrap_err();

        assert!(matches!(err, OrderServiceError::OutOfStock { product_id: ProductId(2), .. }));
        assert_eq!(service.stock.level(1), 10);
        assert_eq!(service.stock.level(2), 1);
    }
}
