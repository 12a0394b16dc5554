//! # ledger-core: Pure Cart & Payment Logic
//!
//! This crate is the **heart** of Cart Ledger. It holds the catalog, the
//! cart and the payment balance as plain values with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cart Ledger Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Presentation (ledger-cli)                      │   │
//! │  │    session script ──► command parser ──► text / JSON output    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ LedgerState (Arc<Mutex<..>>)          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ ledger-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │   cart    │  │  ledger   │  │   money   │  │   │
//! │  │   │  Product  │  │ CartEntry │  │  pay()    │  │   Money   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBALS • NO ERRORS FROM CART OPERATIONS         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CartEntry, CartLine, Settlement)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`catalog`] - The fixed product catalog
//! - [`cart`] - Ordered cart entries
//! - [`ledger`] - `CartLedger`, the public operation surface
//! - [`validation`] - Catalog validation rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use ledger_core::{CartLedger, Money, ProductId};
//!
//! let mut ledger = CartLedger::default(); // Cherry, Orange, Strawberry
//!
//! ledger.add_to_cart(ProductId(1)); // Cherry 2.00
//! ledger.add_to_cart(ProductId(2)); // Orange 3.00
//! assert_eq!(ledger.cart_total(), Money::from_cents(500));
//!
//! // Partial payment: 2.00 still owed, cart kept
//! assert_eq!(ledger.pay(Money::from_cents(300)), Money::from_cents(-200));
//!
//! // Overpayment: settles, 1.00 change due
//! assert_eq!(ledger.pay(Money::from_cents(300)), Money::from_cents(100));
//! assert!(ledger.is_cart_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod ledger;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::Cart;
pub use catalog::{Catalog, PriceInput, ProductSpec};
pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::CartLedger;
pub use money::Money;
pub use types::*;
