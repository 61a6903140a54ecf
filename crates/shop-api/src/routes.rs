//! # Routes
//!
//! Axum router configuration for the storefront API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - Catalog:
///   - GET  /api/products
///   - GET  /api/products/{id}
///
/// - Cart:
///   - GET    /api/cart/{session_id}
///   - POST   /api/cart/{session_id}/add
///   - PUT    /api/cart/{session_id}/item/{product_id}
///   - DELETE /api/cart/{session_id}/item/{product_id}
///   - DELETE /api/cart/{session_id}
///
/// - Payment:
///   - POST /api/payment/create
///   - POST /api/payment/result  (gateway, form-encoded)
///   - GET  /api/payment/success
///   - GET  /api/payment/fail
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Catalog
        .route("/products", get(handlers::list_products))
        .route("/products/{product_id}", get(handlers::get_product))
        // Cart
        .route(
            "/cart/{session_id}",
            get(handlers::get_cart).delete(handlers::clear_cart),
        )
        .route("/cart/{session_id}/add", post(handlers::add_to_cart))
        .route(
            "/cart/{session_id}/item/{product_id}",
            put(handlers::update_quantity).delete(handlers::remove_item),
        )
        // Payment
        .route("/payment/create", post(handlers::create_payment))
        .route("/payment/result", post(handlers::payment_result))
        .route("/payment/success", get(handlers::payment_success))
        .route("/payment/fail", get(handlers::payment_fail));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
