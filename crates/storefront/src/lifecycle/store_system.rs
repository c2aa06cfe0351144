use crate::clients::{CartClient, OrderClient, ProductClient};
use crate::config::StoreConfig;
use crate::service::OrderService;
use crate::{cart_actor, order_actor, product_actor};
use tracing::{error, info};

/// The running store: one actor per resource plus the clients to reach them.
///
/// # Example
///
/// ```rust
/// use storefront::lifecycle::StoreSystem;
/// use storefront::model::{Actor, Money, ProductCreate, UserId};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let system = StoreSystem::new();
///     let admin = Actor::Admin(UserId(1));
///     let buyer = Actor::Customer(UserId(2));
///
///     let product = system
///         .product_client
///         .create_product(
///             &admin,
///             ProductCreate { name: "Batik Tulis".into(), price: Money::from_units(100_000), stock: 5 },
///         )
///         .await?;
///     system.cart_client.add_item(buyer.user_id(), product, 2).await?;
///
///     let order = system.order_service.create_order(&buyer, "Jl. Malioboro 3").await?;
///     assert_eq!(order.totals().total, Money::from_units(237_000));
///
///     system.shutdown().await?;
///     Ok(())
/// }
/// ```
pub struct StoreSystem {
    pub product_client: ProductClient,
    pub cart_client: CartClient,
    pub order_client: OrderClient,
    pub order_service: OrderService,

    config: StoreConfig,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl Default for StoreSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreSystem {
    /// Starts the store with default configuration.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    pub fn with_config(config: StoreConfig) -> Self {
        // 1. Create actors (no dependencies)
        let (product_actor, products) = product_actor::new(config.actor_buffer);
        let (cart_actor, carts) = cart_actor::new(config.actor_buffer);
        let (order_actor, orders) = order_actor::new(config.actor_buffer);

        // 2. Start actors with injected context
        let handles = vec![
            tokio::spawn(product_actor.run(())),
            tokio::spawn(cart_actor.run(config.pricing)),
            tokio::spawn(order_actor.run(())),
        ];

        // 3. Wire clients and the service
        let product_client = ProductClient::new(products);
        let cart_client = CartClient::new(carts, product_client.clone());
        let order_client = OrderClient::new(orders);
        let order_service = OrderService::new(
            cart_client.clone(),
            order_client.clone(),
            product_client.clone(),
            &config,
        );

        info!(
            actor_buffer = config.actor_buffer,
            stock_retry_limit = config.stock_retry_limit,
            "Store started"
        );

        Self {
            product_client,
            cart_client,
            order_client,
            order_service,
            config,
            handles,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Stops every actor and waits for it to finish.
    ///
    /// Fails if an actor task panicked.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down store...");

        // Dropping the last sender of each channel ends the actor's loop.
        drop(self.order_service);
        drop(self.cart_client);
        drop(self.order_client);
        drop(self.product_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Store shutdown complete.");
        Ok(())
    }
}
