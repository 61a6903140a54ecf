//! # Application State
//!
//! Shared state for the Axum application, built once at startup.
//! Contains the catalog, the cart engine, the payment orchestrator and
//! configuration.

use shop_core::{
    BoxedPaymentGateway, CartEngine, MissingLinePolicy, PaymentOrchestrator, ProductCatalog,
};
use shop_robokassa::RobokassaGateway;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Explicit catalog file, if any
    pub catalog_path: Option<String>,
    /// `set_quantity` behaviour for absent lines
    pub missing_line_policy: MissingLinePolicy,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let missing_line_policy = match std::env::var("CART_MISSING_LINE_POLICY") {
            Ok(v) => v.parse::<MissingLinePolicy>()?,
            Err(_) => MissingLinePolicy::default(),
        };

        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(9000),
            environment: std::env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
            catalog_path: std::env::var("CATALOG_PATH").ok(),
            missing_line_policy,
        })
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| {
                anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e)
            })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 9000,
            environment: "development".to_string(),
            catalog_path: None,
            missing_line_policy: MissingLinePolicy::default(),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Product catalog
    pub catalog: Arc<ProductCatalog>,
    /// Per-session carts
    pub carts: Arc<CartEngine>,
    /// Payment orchestrator
    pub payments: Arc<PaymentOrchestrator>,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState with the Robokassa gateway
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;
        let catalog = load_product_catalog(config.catalog_path.as_deref())?;

        let gateway = RobokassaGateway::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Robokassa: {}", e))?;

        check_gateway_mode(&config, &gateway)?;

        Ok(Self::with_parts(config, catalog, Arc::new(gateway)))
    }

    /// Assemble state from already-built parts (used by tests)
    pub fn with_parts(
        config: AppConfig,
        catalog: ProductCatalog,
        gateway: BoxedPaymentGateway,
    ) -> Self {
        let catalog = Arc::new(catalog);
        let carts = Arc::new(
            CartEngine::new(Arc::clone(&catalog))
                .with_missing_line_policy(config.missing_line_policy),
        );
        let payments = Arc::new(PaymentOrchestrator::new(Arc::clone(&carts), gateway));

        Self {
            catalog,
            carts,
            payments,
            config,
        }
    }
}

/// Production must not send test payments
fn check_gateway_mode(config: &AppConfig, gateway: &RobokassaGateway) -> anyhow::Result<()> {
    if config.is_production() && gateway.config().is_test {
        anyhow::bail!("ROBOKASSA_TEST must be 0 in production");
    }
    Ok(())
}

/// Load product catalog from config file, falling back to the seed catalog
fn load_product_catalog(explicit: Option<&str>) -> anyhow::Result<ProductCatalog> {
    if let Some(path) = explicit {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path, e))?;
        let catalog = ProductCatalog::from_toml(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
        tracing::info!("Loaded {} products from {}", catalog.len(), path);
        return Ok(catalog);
    }

    let config_paths = [
        "config/products.toml",
        "../config/products.toml",
        "../../config/products.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            let catalog = ProductCatalog::from_toml(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
            tracing::info!("Loaded {} products from {}", catalog.len(), path);
            return Ok(catalog);
        }
    }

    tracing::warn!("No product catalog found, using built-in catalog");
    Ok(ProductCatalog::seeded())
}
