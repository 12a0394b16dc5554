//! # Ledger State
//!
//! Shares one `CartLedger` between session handlers.
//!
//! ## Thread Safety
//! The ledger's operations are read-modify-write sequences (`balance +=`,
//! find-then-mutate on cart entries) that are not safe to interleave, so the
//! whole ledger sits behind a single `Mutex`:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Ledger State Operations                              │
//! │                                                                         │
//! │  Session Command          Access                 Ledger Call            │
//! │  ───────────────          ──────                 ───────────            │
//! │                                                                         │
//! │  add / inc / dec ───────► with_ledger_mut() ───► add_to_cart() ...     │
//! │  remove / empty ────────► with_ledger_mut() ───► remove_from_cart() ...│
//! │  pay ───────────────────► with_ledger_mut() ───► pay()                 │
//! │                                                                         │
//! │  cart / total / catalog ► with_ledger() ───────► cart_lines() ...      │
//! │                                                                         │
//! │  NOTE: reads take the same lock; they are short and never overlap a    │
//! │        half-finished mutation.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use ledger_core::CartLedger;

/// Mutex-guarded, cheaply clonable handle to the ledger.
#[derive(Debug, Clone)]
pub struct LedgerState {
    ledger: Arc<Mutex<CartLedger>>,
}

impl LedgerState {
    pub fn new(ledger: CartLedger) -> Self {
        LedgerState {
            ledger: Arc::new(Mutex::new(ledger)),
        }
    }

    /// A panic inside a closure cannot leave the ledger half-updated between
    /// operations, so a poisoned lock is taken over rather than propagated.
    fn lock(&self) -> MutexGuard<'_, CartLedger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Executes a function with read access to the ledger.
    ///
    /// ```rust,ignore
    /// let total = state.with_ledger(|l| l.cart_total());
    /// ```
    pub fn with_ledger<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartLedger) -> R,
    {
        let ledger = self.lock();
        f(&ledger)
    }

    /// Executes a function with write access to the ledger.
    ///
    /// ```rust,ignore
    /// let difference = state.with_ledger_mut(|l| l.pay(amount));
    /// ```
    pub fn with_ledger_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CartLedger) -> R,
    {
        let mut ledger = self.lock();
        f(&mut ledger)
    }
}

impl Default for LedgerState {
    fn default() -> Self {
        Self::new(CartLedger::default())
    }
}
