//! # Shop Error Types
//!
//! Typed error handling for happy-cart.
//! All catalog, cart and payment operations return `Result<T, ShopError>`.

use thiserror::Error;

/// Core error type for all shop operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShopError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data (rejected at the boundary)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Product not found in catalog
    #[error("Product not found: {product_id}")]
    ProductNotFound { product_id: u32 },

    /// Operation not allowed in the current state (e.g. paying for an empty cart)
    #[error("{0}")]
    InvalidState(String),

    /// Gateway signature did not match
    #[error("Invalid signature")]
    InvalidSignature,
}

impl ShopError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ShopError::Configuration(_) => 500,
            ShopError::InvalidRequest(_) => 400,
            ShopError::ProductNotFound { .. } => 404,
            ShopError::InvalidState(_) => 400,
            ShopError::InvalidSignature => 400,
        }
    }

    /// Shorthand for the empty-cart rejection at payment creation
    pub fn empty_cart() -> Self {
        ShopError::InvalidState("Cart is empty".to_string())
    }
}

/// Result type alias for shop operations
pub type ShopResult<T> = Result<T, ShopError>;
