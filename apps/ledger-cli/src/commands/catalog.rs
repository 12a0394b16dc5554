//! # Catalog Commands
//!
//! Lists the catalog with each product's current cart quantity.

use ledger_core::Product;
use serde::Serialize;
use tracing::debug;

use crate::state::LedgerState;

/// One catalog product and how many are in the cart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity_in_cart: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub products: Vec<CatalogItem>,
}

/// Lists every product in catalog order.
pub fn list_catalog(state: &LedgerState) -> CatalogResponse {
    debug!("list_catalog command");
    state.with_ledger(|ledger| CatalogResponse {
        products: ledger
            .catalog()
            .iter()
            .map(|product| CatalogItem {
                product: product.clone(),
                quantity_in_cart: ledger.quantity_in_cart(product.id),
            })
            .collect(),
    })
}
