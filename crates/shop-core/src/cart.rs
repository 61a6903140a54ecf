//! # Cart Types
//!
//! Per-session cart and its line items.
//!
//! Every mutation rebuilds the total from the lines, so
//! `total == sum(price * quantity)` holds whenever a `Cart` is observed.

use crate::error::{ShopError, ShopResult};
use crate::product::Product;
use serde::{Deserialize, Serialize};

/// A line in a cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product ID
    pub product_id: u32,

    /// Product name (denormalized at time of add)
    pub name: String,

    /// Unit price at time of add
    pub price: i64,

    /// Image (denormalized at time of add)
    pub image: String,

    /// Quantity, always >= 1
    pub quantity: u32,
}

impl CartLine {
    /// Create a line from a product, copying its current fields
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity,
        }
    }

    /// Line subtotal, `None` if it does not fit in an `i64`
    pub fn subtotal(&self) -> Option<i64> {
        self.price.checked_mul(i64::from(self.quantity))
    }
}

/// What `set_quantity` does when the line is absent and the quantity is positive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingLinePolicy {
    /// Leave the cart unchanged
    #[default]
    Ignore,
    /// Add the line from the catalog
    Create,
}

impl std::str::FromStr for MissingLinePolicy {
    type Err = ShopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ignore" => Ok(MissingLinePolicy::Ignore),
            "create" => Ok(MissingLinePolicy::Create),
            other => Err(ShopError::Configuration(format!(
                "unknown missing-line policy: {other}"
            ))),
        }
    }
}

/// A shopping cart
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    /// Lines in insertion order
    pub items: Vec<CartLine>,

    /// Sum of line subtotals, in minor units
    pub total: i64,
}

impl Cart {
    /// Create an empty cart
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn line(&self, product_id: u32) -> Option<&CartLine> {
        self.items.iter().find(|i| i.product_id == product_id)
    }

    /// Add `quantity` units of a product, merging into an existing line
    pub fn add(&mut self, product: &Product, quantity: u32) -> ShopResult<()> {
        if quantity == 0 {
            return Err(ShopError::InvalidRequest(
                "quantity must be at least 1".to_string(),
            ));
        }

        let mut items = self.items.clone();
        match items.iter_mut().find(|i| i.product_id == product.id) {
            Some(line) => {
                line.quantity = line.quantity.checked_add(quantity).ok_or_else(|| {
                    ShopError::InvalidRequest("quantity too large".to_string())
                })?;
            }
            None => items.push(CartLine::from_product(product, quantity)),
        }

        self.commit(items)
    }

    /// Set the quantity of an existing line. Returns false if no line matched.
    pub fn set_quantity(&mut self, product_id: u32, quantity: u32) -> ShopResult<bool> {
        if quantity == 0 {
            self.remove(product_id)?;
            return Ok(true);
        }

        let mut items = self.items.clone();
        match items.iter_mut().find(|i| i.product_id == product_id) {
            Some(line) => line.quantity = quantity,
            None => return Ok(false),
        }

        self.commit(items)?;
        Ok(true)
    }

    /// Drop any line for this product
    pub fn remove(&mut self, product_id: u32) -> ShopResult<()> {
        let items = self
            .items
            .iter()
            .filter(|i| i.product_id != product_id)
            .cloned()
            .collect();
        self.commit(items)
    }

    /// Swap in new lines and their total. On overflow the cart is unchanged.
    fn commit(&mut self, items: Vec<CartLine>) -> ShopResult<()> {
        self.total = total_of(&items)?;
        self.items = items;
        Ok(())
    }
}

fn total_of(items: &[CartLine]) -> ShopResult<i64> {
    items.iter().try_fold(0i64, |total, line| {
        line.subtotal()
            .and_then(|subtotal| total.checked_add(subtotal))
            .ok_or_else(|| ShopError::InvalidRequest("cart total too large".to_string()))
    })
}
