//! # Storefront
//!
//! The core of an online store: carts, checkout into immutable orders, the
//! order status lifecycle, and the admin operations on inventory and orders.
//!
//! - [`model`]: plain data (money, products, carts, orders, who is asking)
//! - [`pricing`]: subtotal, flat shipping, tax, total
//! - [`order_lifecycle`]: which status changes exist and who may make them
//! - [`product_actor`], [`cart_actor`], [`order_actor`]: one resource actor each
//! - [`clients`]: typed handles to the actors
//! - [`service`]: checkout and order management across actors
//! - [`lifecycle`]: starting and stopping the whole store, tracing setup
//! - [`config`]: pricing and runtime settings from the environment

pub mod cart_actor;
pub mod clients;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod order_lifecycle;
pub mod pricing;
pub mod product_actor;
pub mod service;

pub use error::{DomainError, ErrorKind};
