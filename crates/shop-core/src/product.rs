//! # Product Types
//!
//! Product catalog for happy-cart.
//! Products are loaded from `config/products.toml`, or seeded from the
//! built-in catalog when no file is present.

use crate::error::{ShopError, ShopResult};
use serde::{Deserialize, Serialize};

/// A product in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier
    pub id: u32,

    /// Display name
    pub name: String,

    /// Short description
    #[serde(default)]
    pub description: String,

    /// Price in minor currency units
    pub price: i64,

    /// Image (URL or emoji)
    #[serde(default)]
    pub image: String,
}

impl Product {
    pub fn new(id: u32, name: impl Into<String>, price: i64) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            price,
            image: String::new(),
        }
    }

    /// Builder: set description
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Builder: set image
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }
}

/// Read-only product catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductCatalog {
    pub products: Vec<Product>,
}

impl ProductCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    /// Built-in catalog used when no config file is found
    pub fn seeded() -> Self {
        Self::new()
            .with_product(
                Product::new(1, "Joy Pill", 999)
                    .with_description("Instant happiness in a pill")
                    .with_image("💊"),
            )
            .with_product(
                Product::new(2, "Laugh Gas", 1499)
                    .with_description("Giggle for hours")
                    .with_image("😂"),
            )
            .with_product(
                Product::new(3, "Dream Serum", 1999)
                    .with_description("Sweet dreams guaranteed")
                    .with_image("💭"),
            )
            .with_product(
                Product::new(4, "Confidence Boost", 2499)
                    .with_description("Unstoppable self-esteem")
                    .with_image("💪"),
            )
            .with_product(
                Product::new(5, "Love Potion", 2999)
                    .with_description("Attraction magnet")
                    .with_image("❤️"),
            )
            .with_product(
                Product::new(6, "Peace Essence", 3499)
                    .with_description("Inner tranquility")
                    .with_image("🧘"),
            )
    }

    /// Add a product to the catalog
    pub fn add(&mut self, product: Product) {
        self.products.push(product);
    }

    /// Builder: add a product
    pub fn with_product(mut self, product: Product) -> Self {
        self.add(product);
        self
    }

    /// Find a product by ID
    pub fn find_by_id(&self, id: u32) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// All products, in catalog order
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Load catalog from TOML string. Prices must not be negative.
    pub fn from_toml(toml_str: &str) -> ShopResult<Self> {
        let catalog: Self =
            toml::from_str(toml_str).map_err(|e| ShopError::Configuration(e.to_string()))?;

        if let Some(product) = catalog.products.iter().find(|p| p.price < 0) {
            return Err(ShopError::Configuration(format!(
                "product {} has a negative price",
                product.id
            )));
        }
        Ok(catalog)
    }
}
