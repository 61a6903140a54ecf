//! # Cart Store & Engine
//!
//! `CartStore` maps session identifiers to carts. It is a sharded concurrent
//! map: every mutation runs inside a single entry guard, so there is at most
//! one writer per session and readers never observe a half-applied change.
//!
//! `CartEngine` layers catalog lookups on top of the store and exposes the
//! cart operations used by the HTTP layer and the payment orchestrator.

use crate::cart::{Cart, MissingLinePolicy};
use crate::error::{ShopError, ShopResult};
use crate::product::ProductCatalog;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Session-keyed cart storage
#[derive(Debug, Default)]
pub struct CartStore {
    carts: DashMap<String, Cart>,
}

impl CartStore {
    pub fn new() -> Self {
        Self {
            carts: DashMap::new(),
        }
    }

    /// Snapshot of the session's cart, creating an empty one on first access
    pub fn get(&self, session_id: &str) -> Cart {
        if let Some(cart) = self.carts.get(session_id) {
            return cart.clone();
        }
        self.carts
            .entry(session_id.to_string())
            .or_default()
            .clone()
    }

    /// Run `f` against the session's cart under its entry lock and return
    /// the resulting snapshot. On error the cart is left as `f` left it.
    pub fn update<F>(&self, session_id: &str, f: F) -> ShopResult<Cart>
    where
        F: FnOnce(&mut Cart) -> ShopResult<()>,
    {
        let mut entry = self.carts.entry(session_id.to_string()).or_default();
        f(entry.value_mut())?;
        Ok(entry.value().clone())
    }

    /// Replace the session's cart with an empty one
    pub fn reset(&self, session_id: &str) -> Cart {
        self.carts.insert(session_id.to_string(), Cart::new());
        Cart::new()
    }

    /// Number of sessions holding a cart
    pub fn len(&self) -> usize {
        self.carts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.carts.is_empty()
    }
}

/// Cart operations over a catalog and a store
#[derive(Debug)]
pub struct CartEngine {
    catalog: Arc<ProductCatalog>,
    store: CartStore,
    missing_line_policy: MissingLinePolicy,
}

impl CartEngine {
    pub fn new(catalog: Arc<ProductCatalog>) -> Self {
        Self {
            catalog,
            store: CartStore::new(),
            missing_line_policy: MissingLinePolicy::default(),
        }
    }

    /// Builder: choose how `set_quantity` treats absent lines
    pub fn with_missing_line_policy(mut self, policy: MissingLinePolicy) -> Self {
        self.missing_line_policy = policy;
        self
    }

    pub fn store(&self) -> &CartStore {
        &self.store
    }

    /// Current cart for a session (empty if never touched)
    pub fn get(&self, session_id: &str) -> Cart {
        self.store.get(session_id)
    }

    /// Add `quantity` units of a product
    pub fn add(&self, session_id: &str, product_id: u32, quantity: u32) -> ShopResult<Cart> {
        let product = self
            .catalog
            .find_by_id(product_id)
            .ok_or(ShopError::ProductNotFound { product_id })?;

        let cart = self
            .store
            .update(session_id, |cart| cart.add(product, quantity))?;

        info!(
            session_id,
            product_id,
            quantity,
            total = cart.total,
            "Added to cart"
        );
        Ok(cart)
    }

    /// Set a line's quantity; zero or negative removes the line
    pub fn set_quantity(
        &self,
        session_id: &str,
        product_id: u32,
        quantity: i64,
    ) -> ShopResult<Cart> {
        if quantity <= 0 {
            return self.remove(session_id, product_id);
        }

        let quantity = u32::try_from(quantity)
            .map_err(|_| ShopError::InvalidRequest("quantity too large".to_string()))?;
        let policy = self.missing_line_policy;
        let catalog = &self.catalog;

        let cart = self.store.update(session_id, |cart| {
            if cart.set_quantity(product_id, quantity)? {
                return Ok(());
            }
            match policy {
                MissingLinePolicy::Ignore => {
                    debug!(session_id, product_id, "No line to update");
                    Ok(())
                }
                MissingLinePolicy::Create => {
                    let product = catalog
                        .find_by_id(product_id)
                        .ok_or(ShopError::ProductNotFound { product_id })?;
                    cart.add(product, quantity)
                }
            }
        })?;

        info!(session_id, product_id, quantity, total = cart.total, "Updated cart line");
        Ok(cart)
    }

    /// Remove a product's line (no-op if absent)
    pub fn remove(&self, session_id: &str, product_id: u32) -> ShopResult<Cart> {
        let cart = self
            .store
            .update(session_id, |cart| cart.remove(product_id))?;

        info!(session_id, product_id, total = cart.total, "Removed cart line");
        Ok(cart)
    }

    /// Empty the session's cart
    pub fn clear(&self, session_id: &str) -> Cart {
        info!(session_id, "Cleared cart");
        self.store.reset(session_id)
    }
}
