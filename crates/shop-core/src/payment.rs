//! # Payment Orchestrator
//!
//! Turns a session's cart into a gateway redirect and checks what the
//! gateway sends back.
//!
//! ```text
//!  CREATED ──redirect──▶ SUCCESS | FAIL      (customer-facing only)
//!     │
//!     └──── RESULT (server-to-server) ──▶ fulfillment
//! ```
//!
//! The cart is not cleared or consumed by payment creation, and nothing is
//! persisted. Only a verified RESULT notification reaches the fulfillment
//! hook.

use crate::error::{ShopError, ShopResult};
use crate::order::{
    new_order_id, FailRedirect, GatewayNotification, PaymentCreated, PaymentOrder, PaymentStatus,
    ResultAck, SuccessRedirect,
};
use crate::store::CartEngine;
use crate::strategy::{BoxedPaymentGateway, FulfillmentHandler, LoggingFulfillmentHandler};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

pub struct PaymentOrchestrator {
    carts: Arc<CartEngine>,
    gateway: BoxedPaymentGateway,
    fulfillment: Arc<dyn FulfillmentHandler>,
}

impl PaymentOrchestrator {
    pub fn new(carts: Arc<CartEngine>, gateway: BoxedPaymentGateway) -> Self {
        Self {
            carts,
            gateway,
            fulfillment: Arc::new(LoggingFulfillmentHandler),
        }
    }

    /// Builder: replace the fulfillment hook
    pub fn with_fulfillment(mut self, handler: Arc<dyn FulfillmentHandler>) -> Self {
        self.fulfillment = handler;
        self
    }

    pub fn gateway(&self) -> &BoxedPaymentGateway {
        &self.gateway
    }

    /// Build a gateway redirect for the session's current cart.
    #[instrument(skip(self, email), fields(provider = self.gateway.provider_name()))]
    pub async fn create_payment(
        &self,
        session_id: &str,
        email: &str,
    ) -> ShopResult<PaymentCreated> {
        let cart = self.carts.get(session_id);
        if cart.is_empty() {
            return Err(ShopError::empty_cart());
        }

        let order = PaymentOrder {
            order_id: new_order_id(self.gateway.shop_id()),
            amount: cart.total,
            email: email.to_string(),
            items: cart.items,
        };

        let payment_url = self.gateway.create_redirect(&order).await?;

        info!(
            order_id = %order.order_id,
            amount = order.amount,
            lines = order.items.len(),
            status = ?PaymentStatus::Created,
            "Created payment"
        );

        Ok(PaymentCreated {
            order_id: order.order_id,
            amount: order.amount,
            payment_url,
            items: order.items,
        })
    }

    /// Answer the gateway's RESULT notification. Never fails: the gateway
    /// consumes the literal reply text.
    #[instrument(skip(self, notification), fields(order_id = %notification.order_id))]
    pub async fn handle_result_callback(&self, notification: &GatewayNotification) -> ResultAck {
        if !self.gateway.verify_result(notification) {
            warn!(amount = %notification.amount, "RESULT notification signature mismatch");
            return ResultAck::Rejected;
        }

        if let Err(e) = self.fulfillment.on_payment_confirmed(notification).await {
            error!("Fulfillment failed: {}", e);
            return ResultAck::Rejected;
        }

        ResultAck::Accepted {
            order_id: notification.order_id.clone(),
        }
    }

    /// Check the customer-facing success redirect. Does not fulfill.
    pub fn handle_success_redirect(
        &self,
        notification: &GatewayNotification,
    ) -> ShopResult<SuccessRedirect> {
        if !self.gateway.verify_success(notification) {
            warn!(order_id = %notification.order_id, "Success redirect signature mismatch");
            return Err(ShopError::InvalidSignature);
        }

        info!(
            order_id = %notification.order_id,
            status = ?PaymentStatus::Success,
            "Customer returned from gateway"
        );
        Ok(SuccessRedirect {
            success: true,
            order_id: notification.order_id.clone(),
            amount: notification.amount.clone(),
        })
    }

    pub fn handle_fail_redirect(&self) -> FailRedirect {
        info!(status = ?PaymentStatus::Fail, "Customer returned from gateway");
        FailRedirect::default()
    }
}
