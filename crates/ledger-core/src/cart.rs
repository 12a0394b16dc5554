//! # Cart
//!
//! Ordered `{product_id, quantity}` entries.
//!
//! The cart knows nothing about the catalog; the ledger decides which ids
//! may be inserted. Entry order is insertion order and survives quantity
//! changes.
//!
//! ## Invariants
//! - Entries are unique by `product_id`
//! - Every stored entry has `quantity >= 1` once the owning operation returns

use serde::{Deserialize, Serialize};

use crate::types::{CartEntry, ProductId};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            entries: Vec::new(),
        }
    }

    pub fn find(&self, product_id: ProductId) -> Option<&CartEntry> {
        self.entries.iter().find(|e| e.product_id == product_id)
    }

    fn find_mut(&mut self, product_id: ProductId) -> Option<&mut CartEntry> {
        self.entries.iter_mut().find(|e| e.product_id == product_id)
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.find(product_id).is_some()
    }

    /// Appends a quantity-1 entry. Callers check [`Cart::contains`] first;
    /// an id already present is incremented instead of duplicated.
    pub fn push_new(&mut self, product_id: ProductId) {
        if self.increment(product_id).is_none() {
            self.entries.push(CartEntry::new(product_id));
        }
    }

    /// Adds one unit to an existing entry, returning the new quantity.
    pub fn increment(&mut self, product_id: ProductId) -> Option<u32> {
        self.find_mut(product_id).map(|entry| {
            entry.quantity = entry.quantity.saturating_add(1);
            entry.quantity
        })
    }

    /// Takes one unit off an existing entry, returning the new quantity.
    ///
    /// An entry that reaches zero is left in place; the ledger removes it
    /// through its regular removal path.
    pub fn decrement(&mut self, product_id: ProductId) -> Option<u32> {
        self.find_mut(product_id).map(|entry| {
            entry.quantity = entry.quantity.saturating_sub(1);
            entry.quantity
        })
    }

    /// Removes an entry, preserving the order of the others.
    pub fn remove(&mut self, product_id: ProductId) -> Option<CartEntry> {
        let index = self
            .entries
            .iter()
            .position(|e| e.product_id == product_id)?;
        Some(self.entries.remove(index))
    }

    /// Clears all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Quantity held for a product, 0 when absent.
    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.find(product_id).map_or(0, |e| e.quantity)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CartEntry> {
        self.entries.iter()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all quantities.
    pub fn total_quantity(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.quantity)).sum()
    }
}
