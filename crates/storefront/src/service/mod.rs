//! # Order Service
//!
//! Checkout and everything that happens to an order afterwards. The service
//! owns no state: it sequences calls to the cart, product and order actors
//! and undoes its own partial work when a later step fails.

pub mod error;
pub mod order_service;
pub mod stock_ledger;

pub use error::OrderServiceError;
pub use order_service::{OrderService, OrderStats};
pub use stock_ledger::StockLedger;
