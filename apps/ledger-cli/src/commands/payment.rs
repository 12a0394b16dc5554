//! # Payment Commands
//!
//! Tendering money against the cart and reading the settlement record.
//!
//! ## User Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  cart total: $5.00                                                      │
//! │                                                                         │
//! │  pay 3      → difference -$2.00  Outstanding { owed: $2.00 }            │
//! │               balance $3.00, cart kept                                  │
//! │                                                                         │
//! │  pay 4      → difference  $2.00  ChangeDue { change: $2.00 }            │
//! │               balance $0.00, cart emptied, settlement recorded          │
//! │                                                                         │
//! │  receipt    → last settlement (lines, total $5.00, tendered $7.00)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use ledger_core::{Money, PaymentStatus, Settlement};
use serde::Serialize;
use tracing::debug;

use crate::state::LedgerState;

/// Outcome of one `pay` command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub tendered: Money,
    /// Signed `balance - total` as returned by the ledger
    pub difference: Money,
    pub payment: PaymentStatus,
    /// Balance after the call (zero once settled)
    pub balance: Money,
    /// Present when this payment settled the cart
    pub settlement: Option<Settlement>,
}

/// Tenders `amount` against the cart.
pub fn pay(state: &LedgerState, amount: Money) -> PaymentResponse {
    debug!(amount = %amount, "pay command");
    state.with_ledger_mut(|ledger| {
        let difference = ledger.pay(amount);
        let payment = PaymentStatus::from_difference(difference);
        let settlement = if payment.is_settled() {
            debug!(settlements = ledger.settlement_count(), "pay settled the cart");
            ledger.last_settlement().cloned()
        } else {
            None
        };

        PaymentResponse {
            tendered: amount,
            difference,
            payment,
            balance: ledger.balance(),
            settlement,
        }
    })
}

pub fn balance(state: &LedgerState) -> Money {
    state.with_ledger(|ledger| ledger.balance())
}

/// The most recent settlement, if any.
pub fn last_receipt(state: &LedgerState) -> Option<Settlement> {
    state.with_ledger(|ledger| ledger.last_settlement().cloned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_core::ProductId;

    fn state_with_total_five() -> LedgerState {
        let state = LedgerState::default();
        state.with_ledger_mut(|l| {
            l.add_to_cart(ProductId(1));
            l.add_to_cart(ProductId(2));
        });
        state
    }

    #[test]
    fn test_short_payment_keeps_cart() {
        let state = state_with_total_five();

        let response = pay(&state, Money::from_cents(300));
        assert_eq!(response.difference, Money::from_cents(-200));
        assert_eq!(
            response.payment,
            PaymentStatus::Outstanding {
                owed: Money::from_cents(200)
            }
        );
        assert_eq!(response.balance, Money::from_cents(300));
        assert!(response.settlement.is_none());
        assert!(last_receipt(&state).is_none());
    }

    #[test]
    fn test_settling_payment_carries_settlement() {
        let state = state_with_total_five();
        pay(&state, Money::from_cents(300));

        let response = pay(&state, Money::from_cents(400));
        assert_eq!(
            response.payment,
            PaymentStatus::ChangeDue {
                change: Money::from_cents(200)
            }
        );
        assert!(response.balance.is_zero());

        let settlement = response.settlement.unwrap();
        assert_eq!(settlement.total, Money::from_cents(500));
        assert_eq!(settlement.tendered, Money::from_cents(700));
        assert_eq!(last_receipt(&state).unwrap().id, settlement.id);
        assert_eq!(balance(&state), Money::zero());
    }
}
