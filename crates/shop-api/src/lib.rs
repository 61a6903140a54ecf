//! # shop-api
//!
//! HTTP API layer for happy-cart.
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | GET | `/api/products` | List products |
//! | GET | `/api/products/{id}` | Get product |
//! | GET | `/api/cart/{session_id}` | Get cart |
//! | POST | `/api/cart/{session_id}/add` | Add to cart |
//! | PUT | `/api/cart/{session_id}/item/{product_id}` | Set quantity |
//! | DELETE | `/api/cart/{session_id}/item/{product_id}` | Remove line |
//! | DELETE | `/api/cart/{session_id}` | Clear cart |
//! | POST | `/api/payment/create` | Build gateway redirect |
//! | POST | `/api/payment/result` | Gateway RESULT notification |
//! | GET | `/api/payment/success` | Success redirect |
//! | GET | `/api/payment/fail` | Fail redirect |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
