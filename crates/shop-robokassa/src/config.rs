//! # Robokassa Configuration
//!
//! Configuration management for the Robokassa integration.
//! Credentials are loaded from environment variables, never compiled in.

use crate::signature::SignatureAlgorithm;
use shop_core::ShopError;
use std::env;

const DEFAULT_PAYMENT_URL: &str = "https://auth.robokassa.ru/Merchant/Index.aspx";

/// Robokassa merchant configuration
#[derive(Clone)]
pub struct RobokassaConfig {
    /// Merchant login (MrchLogin)
    pub merchant_login: String,

    /// Password #1: signs outbound redirects and the success redirect
    pub password1: String,

    /// Password #2: signs the RESULT notification
    pub password2: String,

    /// Send IsTest=1 with every payment
    pub is_test: bool,

    /// Shop identifier embedded in order references
    pub shop_id: String,

    /// Digest the merchant account is configured for
    pub algorithm: SignatureAlgorithm,

    /// Hosted payment page
    pub payment_url: String,

    /// Payment description shown on the gateway page
    pub description: String,

    /// Gateway page locale (Culture)
    pub culture: String,
}

impl RobokassaConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `ROBOKASSA_LOGIN`
    /// - `ROBOKASSA_PASSWORD1`
    /// - `ROBOKASSA_PASSWORD2`
    pub fn from_env() -> Result<Self, ShopError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let merchant_login = required("ROBOKASSA_LOGIN")?;
        let password1 = required("ROBOKASSA_PASSWORD1")?;
        let password2 = required("ROBOKASSA_PASSWORD2")?;

        let is_test = match env::var("ROBOKASSA_TEST") {
            Ok(v) => parse_flag(&v).ok_or_else(|| {
                ShopError::Configuration(format!("ROBOKASSA_TEST must be 0 or 1, got {v}"))
            })?,
            Err(_) => true,
        };

        let algorithm = match env::var("ROBOKASSA_HASH_ALGORITHM") {
            Ok(v) => v
                .parse::<SignatureAlgorithm>()
                .map_err(ShopError::Configuration)?,
            Err(_) => SignatureAlgorithm::default(),
        };

        let config = Self {
            merchant_login,
            password1,
            password2,
            is_test,
            shop_id: env::var("ROBOKASSA_SHOP_ID").unwrap_or_else(|_| "1".to_string()),
            algorithm,
            payment_url: env::var("ROBOKASSA_PAYMENT_URL")
                .unwrap_or_else(|_| DEFAULT_PAYMENT_URL.to_string()),
            description: env::var("ROBOKASSA_DESCRIPTION")
                .unwrap_or_else(|_| "Artificial Happiness".to_string()),
            culture: env::var("ROBOKASSA_CULTURE").unwrap_or_else(|_| "ru".to_string()),
        };
        config.validate()?;
        Ok(config)
    }

    /// Create config with explicit values (for testing)
    pub fn new(
        merchant_login: impl Into<String>,
        password1: impl Into<String>,
        password2: impl Into<String>,
    ) -> Self {
        Self {
            merchant_login: merchant_login.into(),
            password1: password1.into(),
            password2: password2.into(),
            is_test: true,
            shop_id: "1".to_string(),
            algorithm: SignatureAlgorithm::default(),
            payment_url: DEFAULT_PAYMENT_URL.to_string(),
            description: "Artificial Happiness".to_string(),
            culture: "ru".to_string(),
        }
    }

    /// Reject configurations the gateway would not accept
    pub fn validate(&self) -> Result<(), ShopError> {
        if self.merchant_login.is_empty() {
            return Err(ShopError::Configuration(
                "merchant login must not be empty".to_string(),
            ));
        }
        if self.password1.is_empty() || self.password2.is_empty() {
            return Err(ShopError::Configuration(
                "gateway passwords must not be empty".to_string(),
            ));
        }
        if self.password1 == self.password2 {
            return Err(ShopError::Configuration(
                "password #1 and password #2 must differ".to_string(),
            ));
        }
        if self.shop_id.is_empty() || self.shop_id.contains(char::is_whitespace) {
            return Err(ShopError::Configuration(
                "shop id must be a non-empty token".to_string(),
            ));
        }
        Ok(())
    }

    /// IsTest value as sent to the gateway
    pub fn test_flag(&self) -> &'static str {
        if self.is_test {
            "1"
        } else {
            "0"
        }
    }

    /// Builder: toggle test mode
    pub fn with_test_mode(mut self, is_test: bool) -> Self {
        self.is_test = is_test;
        self
    }

    /// Builder: set shop id
    pub fn with_shop_id(mut self, shop_id: impl Into<String>) -> Self {
        self.shop_id = shop_id.into();
        self
    }

    /// Builder: set signature algorithm
    pub fn with_algorithm(mut self, algorithm: SignatureAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Builder: set hosted payment page URL (for testing)
    pub fn with_payment_url(mut self, url: impl Into<String>) -> Self {
        self.payment_url = url.into();
        self
    }
}

impl std::fmt::Debug for RobokassaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RobokassaConfig")
            .field("merchant_login", &self.merchant_login)
            .field("password1", &"***")
            .field("password2", &"***")
            .field("is_test", &self.is_test)
            .field("shop_id", &self.shop_id)
            .field("algorithm", &self.algorithm)
            .field("payment_url", &self.payment_url)
            .finish()
    }
}

fn required(key: &str) -> Result<String, ShopError> {
    env::var(key).map_err(|_| ShopError::Configuration(format!("{key} not set")))
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        let config = RobokassaConfig::new("merchant", "p1", "p2");
        assert!(config.validate().is_ok());
        assert_eq!(config.test_flag(), "1");

        assert!(RobokassaConfig::new("", "p1", "p2").validate().is_err());
        assert!(RobokassaConfig::new("merchant", "same", "same").validate().is_err());
        assert!(RobokassaConfig::new("merchant", "p1", "p2")
            .with_shop_id("")
            .validate()
            .is_err());
    }

    #[test]
    fn test_live_mode_flag() {
        let config = RobokassaConfig::new("merchant", "p1", "p2").with_test_mode(false);
        assert_eq!(config.test_flag(), "0");
    }

    #[test]
    fn test_debug_hides_passwords() {
        let config = RobokassaConfig::new("merchant", "hunter2", "hunter3");
        let printed = format!("{:?}", config);
        assert!(!printed.contains("hunter2"));
        assert!(!printed.contains("hunter3"));
        assert!(printed.contains("merchant"));
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("false"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
