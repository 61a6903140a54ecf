//! # Payment Gateway Trait
//!
//! Strategy seam between the orchestrator and a concrete payment gateway.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  PaymentGateway (trait)                     │
//! │  ├── create_redirect()                                      │
//! │  ├── verify_result()                                        │
//! │  ├── verify_success()                                       │
//! │  └── provider_name()                                        │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!                    ┌───────┴───────┐
//!                    │   Robokassa   │
//!                    │    Gateway    │
//!                    └───────────────┘
//! ```

use crate::error::ShopResult;
use crate::order::{GatewayNotification, PaymentOrder};
use async_trait::async_trait;
use std::sync::Arc;

/// Core trait for payment gateway implementations.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Build the URL the customer is redirected to for payment.
    async fn create_redirect(&self, order: &PaymentOrder) -> ShopResult<String>;

    /// Verify the server-to-server RESULT notification.
    fn verify_result(&self, notification: &GatewayNotification) -> bool;

    /// Verify the customer-facing success redirect.
    fn verify_success(&self, notification: &GatewayNotification) -> bool;

    /// Gateway-side merchant/shop identifier embedded in order references.
    fn shop_id(&self) -> &str;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a boxed gateway (dynamic dispatch)
pub type BoxedPaymentGateway = Arc<dyn PaymentGateway>;

/// Side effects for a payment confirmed by the RESULT notification.
///
/// Only the RESULT notification reaches this hook; redirects are
/// customer-facing and never trigger fulfillment.
#[async_trait]
pub trait FulfillmentHandler: Send + Sync {
    async fn on_payment_confirmed(&self, notification: &GatewayNotification) -> ShopResult<()>;
}

/// Default handler (just logs)
pub struct LoggingFulfillmentHandler;

#[async_trait]
impl FulfillmentHandler for LoggingFulfillmentHandler {
    async fn on_payment_confirmed(&self, notification: &GatewayNotification) -> ShopResult<()> {
        tracing::info!(
            order_id = %notification.order_id,
            amount = %notification.amount,
            "Payment confirmed by gateway"
        );
        Ok(())
    }
}
