//! # Cart Commands
//!
//! Session commands that read or change the cart.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Tendered │────►│ Settled  │       │
//! │  │  Cart    │     │          │     │ (owing)  │     │          │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │       ▲                │                 │                │             │
//! │       │           add / inc / dec   pay (short)      pay (covers)      │
//! │       │           remove                                  │             │
//! │       │                ▼                                  │             │
//! │       └──────────── empty ◄───────────────────────────────┘             │
//! │                                            (cart emptied, balance 0)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutating command answers with the updated cart, so a script shows
//! the effect of each step (including the silent no-ops).

use ledger_core::{CartLedger, CartLine, Money, ProductId};
use serde::Serialize;
use tracing::debug;

use crate::state::LedgerState;

/// Cart contents plus totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
}

/// Cart totals summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Distinct products
    pub item_count: usize,
    /// Sum of quantities
    pub total_quantity: u64,
    pub total: Money,
    /// Tendered but not yet settled
    pub balance: Money,
}

impl From<&CartLedger> for CartTotals {
    fn from(ledger: &CartLedger) -> Self {
        CartTotals {
            item_count: ledger.item_count(),
            total_quantity: ledger.total_quantity(),
            total: ledger.cart_total(),
            balance: ledger.balance(),
        }
    }
}

impl From<&CartLedger> for CartResponse {
    fn from(ledger: &CartLedger) -> Self {
        CartResponse {
            lines: ledger.cart_lines(),
            totals: CartTotals::from(ledger),
        }
    }
}

/// Gets the current cart contents.
pub fn get_cart(state: &LedgerState) -> CartResponse {
    debug!("get_cart command");
    state.with_ledger(|ledger| CartResponse::from(ledger))
}

/// Adds one unit of a catalog product; unknown ids change nothing.
pub fn add_to_cart(state: &LedgerState, product_id: ProductId) -> CartResponse {
    debug!(%product_id, "add_to_cart command");
    state.with_ledger_mut(|ledger| {
        ledger.add_to_cart(product_id);
        CartResponse::from(&*ledger)
    })
}

/// Adds one unit to a product already in the cart.
pub fn increase_quantity(state: &LedgerState, product_id: ProductId) -> CartResponse {
    debug!(%product_id, "increase_quantity command");
    state.with_ledger_mut(|ledger| {
        ledger.increase_quantity(product_id);
        CartResponse::from(&*ledger)
    })
}

/// Takes one unit off a product; at zero the line disappears.
pub fn decrease_quantity(state: &LedgerState, product_id: ProductId) -> CartResponse {
    debug!(%product_id, "decrease_quantity command");
    state.with_ledger_mut(|ledger| {
        ledger.decrease_quantity(product_id);
        CartResponse::from(&*ledger)
    })
}

pub fn remove_from_cart(state: &LedgerState, product_id: ProductId) -> CartResponse {
    debug!(%product_id, "remove_from_cart command");
    state.with_ledger_mut(|ledger| {
        ledger.remove_from_cart(product_id);
        CartResponse::from(&*ledger)
    })
}

/// Clears the cart; any tendered balance stays.
pub fn empty_cart(state: &LedgerState) -> CartResponse {
    debug!("empty_cart command");
    state.with_ledger_mut(|ledger| {
        ledger.empty_cart();
        CartResponse::from(&*ledger)
    })
}

pub fn cart_total(state: &LedgerState) -> Money {
    state.with_ledger(|ledger| ledger.cart_total())
}
