//! # Domain Types
//!
//! Core domain types shared by the catalog, cart and ledger.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   CartEntry     │   │   CartLine      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  product_id     │   │  product + qty  │       │
//! │  │  name           │   │  quantity ≥ 1   │   │  line_total     │       │
//! │  │  unit_price     │   └─────────────────┘   │  (read view)    │       │
//! │  │  image_ref      │                         └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  PaymentStatus  │   │   Settlement    │                             │
//! │  │  Outstanding    │   │  id (UUID)      │                             │
//! │  │  Exact          │   │  lines, total   │                             │
//! │  │  ChangeDue      │   │  tendered       │                             │
//! │  └─────────────────┘   │  change         │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No Shared Records
//! A cart entry holds only a product id and a quantity. Name, price and
//! image are looked up in the catalog whenever a line is rendered, so the
//! catalog never carries a per-product "quantity in cart" that could go stale.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Product Id
// =============================================================================

/// Stable catalog identifier of a product.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export)]
pub struct ProductId(pub u32);

impl ProductId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        ProductId(id)
    }

    #[inline]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        ProductId(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ProductId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(ProductId)
            .map_err(|_| ValidationError::InvalidFormat {
                field: "product id".to_string(),
                reason: format!("'{}' is not a non-negative integer", s.trim()),
            })
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique, stable identifier.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Price of one unit.
    pub unit_price: Money,

    /// Image reference for presentation layers (path or URL).
    pub image_ref: String,
}

impl Product {
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        unit_price: Money,
        image_ref: impl Into<String>,
    ) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            unit_price,
            image_ref: image_ref.into(),
        }
    }
}

// =============================================================================
// Cart Entry
// =============================================================================

/// One product in the cart with its quantity.
///
/// Entries only exist while `quantity >= 1`; the cart drops an entry the
/// moment its quantity reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartEntry {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl CartEntry {
    /// New entry with quantity 1.
    pub fn new(product_id: ProductId) -> Self {
        CartEntry {
            product_id,
            quantity: 1,
        }
    }

    /// `unit_price × quantity`.
    #[inline]
    pub fn line_total(&self, unit_price: Money) -> Money {
        unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// A cart entry joined with its catalog product, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub image_ref: String,
    pub unit_price: Money,
    pub quantity: u32,
    /// unit_price × quantity
    pub line_total: Money,
}

impl CartLine {
    pub fn from_parts(product: &Product, entry: &CartEntry) -> Self {
        CartLine {
            product_id: product.id,
            name: product.name.clone(),
            image_ref: product.image_ref.clone(),
            unit_price: product.unit_price,
            quantity: entry.quantity,
            line_total: entry.line_total(product.unit_price),
        }
    }
}

// =============================================================================
// Payment Status
// =============================================================================

/// Reading of the signed difference returned by `pay`.
///
/// ```text
///   difference < 0   → Outstanding { owed: -difference }   (cart kept)
///   difference == 0  → Exact                               (settled)
///   difference > 0   → ChangeDue { change: difference }    (settled)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "status", rename_all = "snake_case")]
#[ts(export)]
pub enum PaymentStatus {
    /// Balance does not yet cover the cart; `owed` is still to be paid.
    Outstanding { owed: Money },
    /// Paid exactly.
    Exact,
    /// Paid in full with `change` to hand back.
    ChangeDue { change: Money },
}

impl PaymentStatus {
    pub fn from_difference(difference: Money) -> Self {
        if difference.is_negative() {
            PaymentStatus::Outstanding {
                owed: difference.abs(),
            }
        } else if difference.is_zero() {
            PaymentStatus::Exact
        } else {
            PaymentStatus::ChangeDue { change: difference }
        }
    }

    /// True when the payment that produced this status settled the cart.
    pub fn is_settled(&self) -> bool {
        !matches!(self, PaymentStatus::Outstanding { .. })
    }
}

// =============================================================================
// Settlement
// =============================================================================

/// Record of a `pay` call that covered the cart.
///
/// Written by the ledger at the moment of settlement, before the cart is
/// emptied, so `lines` holds what was bought.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Settlement {
    #[ts(as = "String")]
    pub id: Uuid,
    pub lines: Vec<CartLine>,
    /// Cart total at settlement.
    pub total: Money,
    /// Accumulated balance at settlement (all tenders since the last one).
    pub tendered: Money,
    /// `tendered - total`, never negative.
    pub change: Money,
    #[ts(as = "String")]
    pub settled_at: DateTime<Utc>,
}

impl Settlement {
    pub fn new(lines: Vec<CartLine>, total: Money, tendered: Money) -> Self {
        Settlement {
            id: Uuid::new_v4(),
            lines,
            total,
            tendered,
            change: tendered - total,
            settled_at: Utc::now(),
        }
    }

    /// Total number of units bought.
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_parsing() {
        assert_eq!("3".parse::<ProductId>().unwrap(), ProductId(3));
        assert_eq!(" 12 ".parse::<ProductId>().unwrap(), ProductId(12));
        assert!("-1".parse::<ProductId>().is_err());
        assert!("cherry".parse::<ProductId>().is_err());
    }

    #[test]
    fn test_entry_line_total() {
        let entry = CartEntry {
            product_id: ProductId(3),
            quantity: 2,
        };
        assert_eq!(entry.line_total(Money::from_cents(150)).cents(), 300);
    }

    #[test]
    fn test_cart_line_from_parts() {
        let product = Product::new(1, "Cherry", Money::from_cents(200), "./images/cherry.jpg");
        let entry = CartEntry {
            product_id: product.id,
            quantity: 3,
        };

        let line = CartLine::from_parts(&product, &entry);
        assert_eq!(line.name, "Cherry");
        assert_eq!(line.quantity, 3);
        assert_eq!(line.line_total.cents(), 600);
    }

    #[test]
    fn test_payment_status_from_difference() {
        assert_eq!(
            PaymentStatus::from_difference(Money::from_cents(-200)),
            PaymentStatus::Outstanding {
                owed: Money::from_cents(200)
            }
        );
        assert_eq!(
            PaymentStatus::from_difference(Money::zero()),
            PaymentStatus::Exact
        );
        assert_eq!(
            PaymentStatus::from_difference(Money::from_cents(300)),
            PaymentStatus::ChangeDue {
                change: Money::from_cents(300)
            }
        );
        assert!(!PaymentStatus::from_difference(Money::from_cents(-1)).is_settled());
        assert!(PaymentStatus::Exact.is_settled());
    }

    #[test]
    fn test_payment_status_json_shape() {
        let json = serde_json::to_string(&PaymentStatus::ChangeDue {
            change: Money::from_cents(300),
        })
        .unwrap();
        assert_eq!(json, r#"{"status":"change_due","change":300}"#);
    }

    #[test]
    fn test_settlement_change() {
        let settlement =
            Settlement::new(Vec::new(), Money::from_cents(200), Money::from_cents(500));
        assert_eq!(settlement.change.cents(), 300);
        assert_eq!(settlement.total_quantity(), 0);
    }
}
