//! # Order Types
//!
//! Order references and the payment payloads exchanged with the gateway.
//! Orders are not persisted; the gateway's own records are the ledger.

use crate::cart::CartLine;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generate an order reference: `ORD-<shop_id>-<8 hex chars>`
pub fn new_order_id(shop_id: &str) -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!("ORD-{}-{}", shop_id, &random[..8])
}

/// Where a payment attempt stands from the merchant's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Redirect URL issued, customer sent to the gateway
    Created,
    /// Customer returned via the success redirect (informational only)
    Success,
    /// Customer returned via the fail redirect
    Fail,
}

/// An order about to be handed to the gateway
#[derive(Debug, Clone)]
pub struct PaymentOrder {
    /// Order reference (InvId)
    pub order_id: String,

    /// Amount in minor units (OutSum)
    pub amount: i64,

    /// Customer email, prefilled on the gateway page
    pub email: String,

    /// Snapshot of the cart lines being paid for
    pub items: Vec<CartLine>,
}

/// Response to a payment creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCreated {
    pub order_id: String,
    pub amount: i64,
    pub payment_url: String,
    pub items: Vec<CartLine>,
}

/// Parameters the gateway sends back on callbacks and redirects.
///
/// `amount` stays textual: the signature covers the literal text the gateway
/// sent, which may carry decimals (e.g. `"1998.000000"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayNotification {
    pub order_id: String,
    pub amount: String,
    pub signature: String,
}

impl GatewayNotification {
    pub fn new(
        order_id: impl Into<String>,
        amount: impl Into<String>,
        signature: impl Into<String>,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            amount: amount.into(),
            signature: signature.into(),
        }
    }

    /// Build from form/query parameters; missing fields become empty strings
    pub fn from_params(params: &std::collections::HashMap<String, String>) -> Self {
        let field = |key: &str| params.get(key).cloned().unwrap_or_default();
        Self {
            order_id: field("InvId"),
            amount: field("OutSum"),
            signature: field("SignatureValue"),
        }
    }
}

/// Body of the success redirect response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessRedirect {
    pub success: bool,
    pub order_id: String,
    pub amount: String,
}

/// Body of the fail redirect response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailRedirect {
    pub success: bool,
    pub error: String,
}

impl Default for FailRedirect {
    fn default() -> Self {
        Self {
            success: false,
            error: "Payment failed".to_string(),
        }
    }
}

/// Reply to the gateway's server-to-server RESULT notification.
///
/// The gateway reads the body literally: `OK<InvId>` accepts the payment,
/// anything else is treated as a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultAck {
    Accepted { order_id: String },
    Rejected,
}

impl ResultAck {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ResultAck::Accepted { .. })
    }
}

impl std::fmt::Display for ResultAck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResultAck::Accepted { order_id } => write!(f, "OK{}", order_id),
            ResultAck::Rejected => write!(f, "Bad signature"),
        }
    }
}
