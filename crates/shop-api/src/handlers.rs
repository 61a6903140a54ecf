//! # Request Handlers
//!
//! Axum request handlers for the storefront API.
//! Request bodies are decoded into explicit structs and validated here,
//! before they reach the cart engine or the payment orchestrator.

use crate::state::AppState;
use axum::{
    extract::{rejection::FormRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Form, Json,
};
use serde::{Deserialize, Serialize};
use shop_core::{
    Cart, FailRedirect, GatewayNotification, PaymentCreated, Product, ShopError, SuccessRedirect,
};
use std::collections::HashMap;
use tracing::{error, info, instrument, warn};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Add-to-cart request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product_id: u32,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// Quantity update request; zero or negative removes the line
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    #[serde(default = "default_update_quantity")]
    pub quantity: i64,
}

fn default_update_quantity() -> i64 {
    1
}

/// Payment creation request. Extra fields such as `phone` are accepted and ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub session_id: String,
    pub email: String,
}

impl CreatePaymentRequest {
    fn validate(&self) -> Result<(), ShopError> {
        if self.session_id.trim().is_empty() {
            return Err(ShopError::InvalidRequest("sessionId is required".to_string()));
        }
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(ShopError::InvalidRequest("a valid email is required".to_string()));
        }
        Ok(())
    }
}

/// Query string of the success redirect
#[derive(Debug, Deserialize)]
pub struct SuccessQuery {
    #[serde(rename = "InvId")]
    pub inv_id: String,
    #[serde(rename = "OutSum")]
    pub out_sum: String,
    #[serde(rename = "SignatureValue")]
    pub signature_value: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn shop_error_to_response(err: ShopError) -> ApiError {
    let code = err.status_code();
    let response = ErrorResponse::new(err.to_string(), code);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "happy-cart",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// List all products
pub async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.catalog.all().to_vec())
}

/// Get single product
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<u32>,
) -> Result<Json<Product>, ApiError> {
    state
        .catalog
        .find_by_id(product_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| shop_error_to_response(ShopError::ProductNotFound { product_id }))
}

/// Get (or lazily create) a session's cart
pub async fn get_cart(State(state): State<AppState>, Path(session_id): Path<String>) -> Json<Cart> {
    Json(state.carts.get(&session_id))
}

#[instrument(skip(state, request), fields(product_id = request.product_id))]
pub async fn add_to_cart(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<AddItemRequest>,
) -> Result<Json<Cart>, ApiError> {
    state
        .carts
        .add(&session_id, request.product_id, request.quantity)
        .map(Json)
        .map_err(shop_error_to_response)
}

#[instrument(skip(state, request))]
pub async fn update_quantity(
    State(state): State<AppState>,
    Path((session_id, product_id)): Path<(String, u32)>,
    Json(request): Json<UpdateQuantityRequest>,
) -> Result<Json<Cart>, ApiError> {
    state
        .carts
        .set_quantity(&session_id, product_id, request.quantity)
        .map(Json)
        .map_err(shop_error_to_response)
}

#[instrument(skip(state))]
pub async fn remove_item(
    State(state): State<AppState>,
    Path((session_id, product_id)): Path<(String, u32)>,
) -> Result<Json<Cart>, ApiError> {
    state
        .carts
        .remove(&session_id, product_id)
        .map(Json)
        .map_err(shop_error_to_response)
}

#[instrument(skip(state))]
pub async fn clear_cart(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Json<Cart> {
    Json(state.carts.clear(&session_id))
}

/// Build the gateway redirect for a session's cart
#[instrument(skip(state, request), fields(session_id = %request.session_id))]
pub async fn create_payment(
    State(state): State<AppState>,
    Json(request): Json<CreatePaymentRequest>,
) -> Result<Json<PaymentCreated>, ApiError> {
    request.validate().map_err(shop_error_to_response)?;

    let created = state
        .payments
        .create_payment(&request.session_id, request.email.trim())
        .await
        .map_err(|e| {
            error!("Failed to create payment: {}", e);
            shop_error_to_response(e)
        })?;

    info!("Redirecting to gateway: order={}", created.order_id);
    Ok(Json(created))
}

/// Gateway RESULT notification (form-encoded, server-to-server).
/// Always 200; the gateway reads the body text. An undecodable body is
/// treated as an empty form and rejected.
pub async fn payment_result(
    State(state): State<AppState>,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> String {
    let params = match form {
        Ok(Form(params)) => params,
        Err(rejection) => {
            warn!("Unreadable RESULT notification: {}", rejection);
            HashMap::new()
        }
    };
    let notification = GatewayNotification::from_params(&params);
    state
        .payments
        .handle_result_callback(&notification)
        .await
        .to_string()
}

/// Customer returned from the gateway after paying
pub async fn payment_success(
    State(state): State<AppState>,
    Query(query): Query<SuccessQuery>,
) -> Result<Json<SuccessRedirect>, ApiError> {
    let notification =
        GatewayNotification::new(query.inv_id, query.out_sum, query.signature_value);
    state
        .payments
        .handle_success_redirect(&notification)
        .map(Json)
        .map_err(shop_error_to_response)
}

/// Customer returned from the gateway without paying
pub async fn payment_fail(State(state): State<AppState>) -> Json<FailRedirect> {
    Json(state.payments.handle_fail_redirect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response() {
        let err = ErrorResponse::new("Test error", 400);
        assert_eq!(err.error, "Test error");
        assert_eq!(err.code, 400);
    }

    #[test]
    fn test_shop_error_conversion() {
        let (status, _json) = shop_error_to_response(ShopError::empty_cart());
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, json) = shop_error_to_response(ShopError::ProductNotFound { product_id: 9 });
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json.0.error, "Product not found: 9");
    }

    #[test]
    fn test_payment_request_validation() {
        let valid = CreatePaymentRequest {
            session_id: "s".to_string(),
            email: "a@b.c".to_string(),
        };
        assert!(valid.validate().is_ok());

        let no_email = CreatePaymentRequest {
            email: "  ".to_string(),
            ..valid
        };
        assert!(no_email.validate().is_err());
    }
}
