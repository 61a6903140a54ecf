//! # shop-core
//!
//! Core types for the happy-cart storefront.
//!
//! This crate provides:
//! - `Product` and `ProductCatalog` for the read-only catalog
//! - `Cart`, `CartStore` and `CartEngine` for per-session carts
//! - `PaymentGateway` trait for gateway implementations
//! - `PaymentOrchestrator` for redirect creation and callback checks
//! - `ShopError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use shop_core::{CartEngine, PaymentOrchestrator, ProductCatalog};
//!
//! let carts = Arc::new(CartEngine::new(Arc::new(ProductCatalog::seeded())));
//! carts.add("session-1", 1, 2)?;
//!
//! let payments = PaymentOrchestrator::new(carts.clone(), gateway);
//! let created = payments.create_payment("session-1", "me@example.com", None).await?;
//!
//! // Redirect the customer to created.payment_url
//! ```

pub mod cart;
pub mod error;
pub mod order;
pub mod payment;
pub mod product;
pub mod store;
pub mod strategy;

// Re-exports for convenience
pub use cart::{Cart, CartLine, MissingLinePolicy};
pub use error::{ShopError, ShopResult};
pub use order::{
    new_order_id, FailRedirect, GatewayNotification, PaymentCreated, PaymentOrder, PaymentStatus,
    ResultAck, SuccessRedirect,
};
pub use payment::PaymentOrchestrator;
pub use product::{Product, ProductCatalog};
pub use store::{CartEngine, CartStore};
pub use strategy::{
    BoxedPaymentGateway, FulfillmentHandler, LoggingFulfillmentHandler, PaymentGateway,
};
