//! # Happy-Cart
//!
//! Storefront backend with Robokassa checkout.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export ROBOKASSA_LOGIN=my_merchant
//! export ROBOKASSA_PASSWORD1=...
//! export ROBOKASSA_PASSWORD2=...
//!
//! # Run the server
//! happy-cart
//! ```

use shop_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Products loaded: {}", state.catalog.len());
    info!(
        "Payment gateway: {} (shop {})",
        state.payments.gateway().provider_name(),
        state.payments.gateway().shop_id()
    );

    let app = routes::create_router(state);

    info!("Happy-Cart starting on http://{}", addr);

    if !is_prod {
        info!("Health: http://{}/health", addr);
        info!("Products: GET http://{}/api/products", addr);
        info!("Gateway RESULT URL: POST http://{}/api/payment/result", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
