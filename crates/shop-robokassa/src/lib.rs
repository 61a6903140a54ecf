//! # shop-robokassa
//!
//! Robokassa payment gateway for happy-cart.
//!
//! The customer is redirected to Robokassa's hosted page with a signed query
//! string. Robokassa then:
//!
//! 1. posts a server-to-server **RESULT** notification signed with
//!    password #2 (the only message that should drive fulfillment), and
//! 2. redirects the customer to the success or fail page; the success
//!    redirect is signed with password #1.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shop_robokassa::RobokassaGateway;
//! use shop_core::PaymentOrchestrator;
//!
//! let gateway = RobokassaGateway::from_env()?;
//! let payments = PaymentOrchestrator::new(carts, Arc::new(gateway));
//!
//! let created = payments.create_payment("session-1", "me@example.com", None).await?;
//! // Redirect the customer to created.payment_url
//! ```

pub mod config;
pub mod gateway;
pub mod signature;

// Re-exports
pub use config::RobokassaConfig;
pub use gateway::RobokassaGateway;
pub use signature::{sign, verify, SignatureAlgorithm};
