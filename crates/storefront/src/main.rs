//! # Storefront demo
//!
//! Runs one customer journey against an in-process store:
//!
//! 1. An admin stocks the catalogue.
//! 2. A customer fills a cart and checks out.
//! 3. The admin moves the order along; the customer's late cancel is refused.
//! 4. The admin dashboard figures are printed.
//!
//! Configuration comes from `STOREFRONT_*` variables (see
//! [`StoreConfig`](storefront::config::StoreConfig)); log level from `RUST_LOG`.

use storefront::config::StoreConfig;
use storefront::lifecycle::{setup_tracing, StoreSystem};
use storefront::model::{Actor, CartView, ErrorBody, Money, OrderStatus, ProductCreate, UserId};
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = StoreConfig::from_env()?;
    info!(?config, "Starting storefront");
    let system = StoreSystem::with_config(config);

    let admin = Actor::Admin(UserId(1));
    let customer = Actor::Customer(UserId(2));

    // Catalogue
    let batik = system
        .product_client
        .create_product(
            &admin,
            ProductCreate {
                name: "Batik Tulis Pekalongan".to_string(),
                price: Money::from_units(100_000),
                stock: 10,
            },
        )
        .await?;
    let kopi = system
        .product_client
        .create_product(
            &admin,
            ProductCreate {
                name: "Kopi Gayo 250g".to_string(),
                price: Money::from_units(65_000),
                stock: 2,
            },
        )
        .await?;

    // Cart
    let span = tracing::info_span!("shopping", user = %customer.user_id());
    async {
        system.cart_client.add_item(customer.user_id(), batik, 2).await?;
        if let Err(e) = system.cart_client.add_item(customer.user_id(), kopi, 3).await {
            warn!(body = ?ErrorBody::from_error(&e), "Add to cart refused");
        }
        let summary = system.cart_client.summary(customer.user_id()).await?;
        info!(cart = ?CartView::from(&summary), "Cart ready");
        Ok::<_, Box<dyn std::error::Error>>(())
    }
    .instrument(span)
    .await?;

    // Checkout
    let order = system
        .order_service
        .create_order(&customer, "Jl. Braga 12, Bandung")
        .instrument(tracing::info_span!("checkout"))
        .await?;
    info!(
        order_id = %order.id(),
        status = order.status().label(),
        total = %order.totals().total,
        "Order placed"
    );

    // Fulfilment
    let span = tracing::info_span!("fulfilment", order_id = %order.id());
    async {
        system
            .order_service
            .update_status(order.id(), OrderStatus::Processing, &admin)
            .await?;
        system
            .order_service
            .update_status(order.id(), OrderStatus::Shipped, &admin)
            .await?;
        if let Err(e) = system.order_service.cancel_order(order.id(), &customer).await {
            warn!(body = ?ErrorBody::from_error(&e), "Cancel refused");
        }
        let delivered = system
            .order_service
            .update_status(order.id(), OrderStatus::Delivered, &admin)
            .await?;
        info!(status = delivered.status().label(), "Order delivered");
        Ok::<_, Box<dyn std::error::Error>>(())
    }
    .instrument(span)
    .await?;

    let stats = system.order_service.order_stats(&admin).await?;
    info!(?stats, "Dashboard");

    system.shutdown().await?;
    info!("Storefront demo finished");
    Ok(())
}
