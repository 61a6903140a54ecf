//! # Robokassa Gateway
//!
//! Redirect-based payment flow: the customer is sent to Robokassa's hosted
//! page with a signed query string, and Robokassa reports back through the
//! RESULT notification and the success/fail redirects.

use crate::config::RobokassaConfig;
use crate::signature::{sign, verify};
use async_trait::async_trait;
use shop_core::{GatewayNotification, PaymentGateway, PaymentOrder, ShopResult};
use tracing::{debug, instrument};
use urlencoding::encode;

pub struct RobokassaGateway {
    config: RobokassaConfig,
}

impl RobokassaGateway {
    pub fn new(config: RobokassaConfig) -> Self {
        Self { config }
    }

    /// Create from environment variables
    pub fn from_env() -> ShopResult<Self> {
        let config = RobokassaConfig::from_env()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &RobokassaConfig {
        &self.config
    }

    /// Outbound signature over `{MrchLogin, OutSum, InvId, IsTest}` with password #1
    pub fn outbound_signature(&self, order_id: &str, amount: &str) -> String {
        sign(
            [
                ("MrchLogin", self.config.merchant_login.as_str()),
                ("OutSum", amount),
                ("InvId", order_id),
                ("IsTest", self.config.test_flag()),
            ],
            &self.config.password1,
            self.config.algorithm,
        )
    }

    /// Hosted-page URL for an order
    pub fn payment_url(&self, order_id: &str, amount: i64, email: &str) -> String {
        let amount = amount.to_string();
        let signature = self.outbound_signature(order_id, &amount);

        format!(
            "{}?MrchLogin={}&OutSum={}&InvId={}&Description={}&SignatureValue={}&IsTest={}&Email={}&Culture={}",
            self.config.payment_url,
            encode(&self.config.merchant_login),
            amount,
            encode(order_id),
            encode(&self.config.description),
            signature,
            self.config.test_flag(),
            encode(email),
            encode(&self.config.culture),
        )
    }

    /// Signature the gateway is expected to send for `{OutSum, InvId}`
    pub fn callback_signature(
        &self,
        notification: &GatewayNotification,
        password: &str,
    ) -> String {
        sign(callback_params(notification), password, self.config.algorithm)
    }
}

fn callback_params(notification: &GatewayNotification) -> [(&str, &str); 2] {
    [
        ("OutSum", notification.amount.as_str()),
        ("InvId", notification.order_id.as_str()),
    ]
}

#[async_trait]
impl PaymentGateway for RobokassaGateway {
    #[instrument(skip(self, order), fields(order_id = %order.order_id))]
    async fn create_redirect(&self, order: &PaymentOrder) -> ShopResult<String> {
        debug!(amount = order.amount, test = self.config.is_test, "Building Robokassa redirect");
        Ok(self.payment_url(&order.order_id, order.amount, &order.email))
    }

    fn verify_result(&self, notification: &GatewayNotification) -> bool {
        verify(
            callback_params(notification),
            &self.config.password2,
            self.config.algorithm,
            &notification.signature,
        )
    }

    fn verify_success(&self, notification: &GatewayNotification) -> bool {
        verify(
            callback_params(notification),
            &self.config.password1,
            self.config.algorithm,
            &notification.signature,
        )
    }

    fn shop_id(&self) -> &str {
        &self.config.shop_id
    }

    fn provider_name(&self) -> &'static str {
        "robokassa"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::SignatureAlgorithm;

    fn gateway() -> RobokassaGateway {
        RobokassaGateway::new(RobokassaConfig::new(
            "test_merchant",
            "test_password_1",
            "test_password_2",
        ))
    }

    fn order(email: &str) -> PaymentOrder {
        PaymentOrder {
            order_id: "ORD-1-0a1b2c3d".to_string(),
            amount: 1998,
            email: email.to_string(),
            items: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_redirect_url() {
        let gateway = gateway();
        let url = gateway
            .create_redirect(&order("joy+pill@example.com"))
            .await
            .unwrap();

        let expected_sig = gateway.outbound_signature("ORD-1-0a1b2c3d", "1998");
        assert!(url.starts_with(
            "https://auth.robokassa.ru/Merchant/Index.aspx?MrchLogin=test_merchant"
        ));
        assert!(url.contains("&OutSum=1998&InvId=ORD-1-0a1b2c3d"));
        assert!(url.contains("&Description=Artificial%20Happiness"));
        assert!(url.contains(&format!("&SignatureValue={}", expected_sig)));
        assert!(url.contains("&IsTest=1"));
        assert!(url.contains("&Email=joy%2Bpill%40example.com"));
        assert!(url.ends_with("&Culture=ru"));
    }

    #[test]
    fn test_outbound_signature_uses_sorted_params() {
        let gateway = gateway();
        let expected = sign(
            [
                ("IsTest", "1"),
                ("InvId", "ORD-1-0a1b2c3d"),
                ("OutSum", "1998"),
                ("MrchLogin", "test_merchant"),
            ],
            "test_password_1",
            SignatureAlgorithm::Md5,
        );
        assert_eq!(gateway.outbound_signature("ORD-1-0a1b2c3d", "1998"), expected);
    }

    #[test]
    fn test_verify_result_uses_password2() {
        let gateway = gateway();
        let mut n = GatewayNotification::new("ORD-1-0a1b2c3d", "1998", "");

        n.signature = gateway.callback_signature(&n, "test_password_2");
        assert!(gateway.verify_result(&n));
        assert!(!gateway.verify_success(&n));

        n.signature = n.signature.to_uppercase();
        assert!(gateway.verify_result(&n));
    }

    #[test]
    fn test_verify_success_rejects_tampered_amount() {
        let gateway = gateway();
        let mut n = GatewayNotification::new("ORD-1-0a1b2c3d", "1998", "");
        n.signature = gateway.callback_signature(&n, "test_password_1");
        assert!(gateway.verify_success(&n));

        n.amount = "1".to_string();
        assert!(!gateway.verify_success(&n));
    }

    #[tokio::test]
    async fn test_sha256_account() {
        let gateway = RobokassaGateway::new(
            RobokassaConfig::new("test_merchant", "test_password_1", "test_password_2")
                .with_algorithm(SignatureAlgorithm::Sha256)
                .with_payment_url("https://pay.test/start"),
        );

        let signature = gateway.outbound_signature("ORD-1-0a1b2c3d", "1998");
        assert_eq!(signature.len(), 64);
        assert_eq!(
            signature,
            sign(
                [
                    ("MrchLogin", "test_merchant"),
                    ("OutSum", "1998"),
                    ("InvId", "ORD-1-0a1b2c3d"),
                    ("IsTest", "1"),
                ],
                "test_password_1",
                SignatureAlgorithm::Sha256,
            )
        );

        let url = gateway.create_redirect(&order("a@b.c")).await.unwrap();
        assert!(url.starts_with("https://pay.test/start?MrchLogin=test_merchant"));
        assert!(url.contains(&format!("&SignatureValue={}", signature)));

        let mut n = GatewayNotification::new("ORD-1-0a1b2c3d", "1998", "");
        n.signature = gateway.callback_signature(&n, "test_password_2");
        assert_eq!(n.signature.len(), 64);
        assert!(gateway.verify_result(&n));

        // an MD5 signature over the same values is not accepted
        n.signature = sign(
            [("OutSum", "1998"), ("InvId", "ORD-1-0a1b2c3d")],
            "test_password_2",
            SignatureAlgorithm::Md5,
        );
        assert!(!gateway.verify_result(&n));
    }

    #[test]
    fn test_shop_id_and_name() {
        let gateway = RobokassaGateway::new(
            RobokassaConfig::new("m", "a", "b").with_shop_id("42"),
        );
        assert_eq!(gateway.shop_id(), "42");
        assert_eq!(gateway.provider_name(), "robokassa");
    }
}
