//! # Catalog
//!
//! The fixed, ordered set of purchasable products.
//!
//! A catalog is built once, validated once, and never resized. Lookups are
//! linear scans; catalogs are small and the scan keeps display order and
//! lookup order the same structure.
//!
//! ## Catalog Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Catalog::default_fruit_stand()   built-in three-product catalog        │
//! │  Catalog::from_json(&str)         [{ id, name, unitPrice, imageRef }]   │
//! │  Catalog::from_specs(specs)       records decoded elsewhere (TOML)      │
//! │  Catalog::new(products)           already-typed products                │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │        validate each product + unique ids                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Product, ProductId};
use crate::validation::{validate_product, validate_unique_ids};

// =============================================================================
// Product Spec (configuration record)
// =============================================================================

/// A unit price as written in a catalog file: `"1.50"` or `1.5`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Text(String),
    Number(serde_json::Number),
}

impl PriceInput {
    fn to_money(&self) -> Result<Money, crate::error::ValidationError> {
        match self {
            PriceInput::Text(text) => text.parse(),
            PriceInput::Number(number) => number.to_string().parse(),
        }
    }
}

/// A product as supplied by configuration.
///
/// ```json
/// { "id": 3, "name": "Strawberry", "unitPrice": "1.50", "imageRef": "./images/strawberry.jpg" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSpec {
    pub id: u32,
    pub name: String,
    pub unit_price: PriceInput,
    #[serde(default)]
    pub image_ref: String,
}

impl ProductSpec {
    /// Parses the price and validates the resulting product.
    pub fn into_product(self) -> CoreResult<Product> {
        let id = self.id;
        let unit_price = self
            .unit_price
            .to_money()
            .map_err(|source| CoreError::InvalidProduct { id, source })?;

        let product = Product::new(id, self.name, unit_price, self.image_ref);
        validate_product(&product).map_err(|source| CoreError::InvalidProduct { id, source })?;
        Ok(product)
    }
}

// =============================================================================
// Catalog
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Builds a catalog, rejecting invalid products and duplicate ids.
    pub fn new(products: Vec<Product>) -> CoreResult<Self> {
        for product in &products {
            validate_product(product).map_err(|source| CoreError::InvalidProduct {
                id: product.id.get(),
                source,
            })?;
        }
        validate_unique_ids(products.iter().map(|p| &p.id))?;

        Ok(Catalog { products })
    }

    /// Builds a catalog from configuration records, keeping their order.
    pub fn from_specs(specs: impl IntoIterator<Item = ProductSpec>) -> CoreResult<Self> {
        let products = specs
            .into_iter()
            .map(ProductSpec::into_product)
            .collect::<CoreResult<Vec<_>>>()?;
        Self::new(products)
    }

    /// Decodes a JSON array of [`ProductSpec`] records.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let specs: Vec<ProductSpec> = serde_json::from_str(json)?;
        Self::from_specs(specs)
    }

    /// The built-in catalog: Cherry 2.00, Orange 3.00, Strawberry 1.50.
    pub fn default_fruit_stand() -> Self {
        Catalog {
            products: vec![
                Product::new(1, "Cherry", Money::from_cents(200), "./images/cherry.jpg"),
                Product::new(2, "Orange", Money::from_cents(300), "./images/orange.jpg"),
                Product::new(3, "Strawberry", Money::from_cents(150), "./images/strawberry.jpg"),
            ],
        }
    }

    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.find(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::default_fruit_stand()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
