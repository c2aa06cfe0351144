//! # Observability & Tracing
//!
//! Everything in the store logs through `tracing`:
//!
//! - **Actor runtime**: startup, shutdown and every request, tagged with
//!   `entity_type` (`Product`, `Cart`, `Order`) and the entity id.
//! - **Clients**: one span per call (`#[instrument]`), so an actor log line
//!   nests under the client operation that caused it.
//! - **Checkout**: stock conflicts and retries at `warn`, compensation
//!   failures at `error`, the completed order at `info`.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run -p storefront      # one line per state change
//! RUST_LOG=debug cargo run -p storefront     # full payloads
//! RUST_LOG=storefront=debug,resource_actor=info cargo run -p storefront
//! ```
//!
//! ## Example output
//!
//! ```text
//! INFO checkout:create_order{actor=Customer(UserId(2)) shipping_address="Jl. Braga 12, Bandung"}: Action ok entity_type="Product" id=product_1
//! WARN checkout:create_order{..}: Stock moved during checkout, retrying product_id=product_1 attempt=1 actual=9
//! INFO checkout:create_order{..}: Order placed order_id=order_1
//! INFO checkout:create_order{..}: Checkout complete owner=user_2 order_id=order_1 total=237000
//! ```

/// Installs the global subscriber: compact format, no module targets
/// (records carry `entity_type` instead), level from `RUST_LOG`.
///
/// Calling it again is a no-op, so tests and binaries can both call it.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
}
