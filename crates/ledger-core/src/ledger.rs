//! # Cart Ledger
//!
//! Owns the catalog, the active cart and the running balance, and exposes
//! every cart and payment operation.
//!
//! ## Operation Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         CartLedger                                      │
//! │                                                                         │
//! │  Lookup          find_product, find_cart_entry                          │
//! │                                                                         │
//! │  Mutation        add_to_cart ──────► insert (qty 1) or +1               │
//! │                  increase_quantity ► +1, never inserts                  │
//! │                  decrease_quantity ► -1, at 0 → remove_from_cart        │
//! │                  remove_from_cart ─► drop entry                         │
//! │                  empty_cart ───────► drop all entries                   │
//! │                                                                         │
//! │  Totals          cart_total = Σ unit_price × quantity                   │
//! │                                                                         │
//! │  Payment         pay(tendered)                                          │
//! │                    balance += tendered                                  │
//! │                    difference = balance - cart_total                    │
//! │                    difference >= 0 → settle: balance = 0, empty cart    │
//! │                    return difference                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Permissive By Contract
//! Unknown product ids are silent no-ops and `pay` accepts any amount,
//! zero and negative included. Nothing here returns an error.
//!
//! ## Concurrency
//! The ledger is a plain single-owner value. Callers that share it across
//! threads put the whole ledger behind one lock.

use tracing::{debug, info};

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::money::Money;
use crate::types::{CartEntry, CartLine, Product, ProductId, Settlement};

#[derive(Debug, Clone)]
pub struct CartLedger {
    catalog: Catalog,
    cart: Cart,
    balance: Money,
    last_settlement: Option<Settlement>,
    settlement_count: u64,
}

impl CartLedger {
    /// Creates a ledger over `catalog` with an empty cart and zero balance.
    pub fn new(catalog: Catalog) -> Self {
        CartLedger {
            catalog,
            cart: Cart::new(),
            balance: Money::zero(),
            last_settlement: None,
            settlement_count: 0,
        }
    }

    // =========================================================================
    // Read Access
    // =========================================================================

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Money tendered since the last settlement.
    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn find_product(&self, product_id: ProductId) -> Option<&Product> {
        self.catalog.find(product_id)
    }

    pub fn find_cart_entry(&self, product_id: ProductId) -> Option<&CartEntry> {
        self.cart.find(product_id)
    }

    /// Quantity of a product currently in the cart; 0 when absent.
    ///
    /// Derived from the cart on every call, so it reads 0 right after
    /// `empty_cart` or a settlement.
    pub fn quantity_in_cart(&self, product_id: ProductId) -> u32 {
        self.cart.quantity_of(product_id)
    }

    /// Cart entries joined with their catalog products, in cart order.
    pub fn cart_lines(&self) -> Vec<CartLine> {
        self.cart
            .iter()
            .filter_map(|entry| {
                self.catalog
                    .find(entry.product_id)
                    .map(|product| CartLine::from_parts(product, entry))
            })
            .collect()
    }

    /// Number of distinct products in the cart.
    pub fn item_count(&self) -> usize {
        self.cart.len()
    }

    /// Sum of all cart quantities.
    pub fn total_quantity(&self) -> u64 {
        self.cart.total_quantity()
    }

    pub fn is_cart_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// The most recent settlement, if any `pay` has settled yet.
    pub fn last_settlement(&self) -> Option<&Settlement> {
        self.last_settlement.as_ref()
    }

    pub fn settlement_count(&self) -> u64 {
        self.settlement_count
    }

    // =========================================================================
    // Cart Mutation
    // =========================================================================

    /// Adds one unit of a catalog product.
    ///
    /// - Unknown id: no-op
    /// - Already in cart: quantity + 1
    /// - Otherwise: appended with quantity 1
    pub fn add_to_cart(&mut self, product_id: ProductId) {
        if !self.catalog.contains(product_id) {
            debug!(%product_id, "add_to_cart ignored: not in catalog");
            return;
        }

        match self.cart.increment(product_id) {
            Some(quantity) => debug!(%product_id, quantity, "add_to_cart incremented"),
            None => {
                self.cart.push_new(product_id);
                debug!(%product_id, quantity = 1, "add_to_cart inserted");
            }
        }
    }

    /// Adds one unit to a product already in the cart. Never inserts.
    pub fn increase_quantity(&mut self, product_id: ProductId) {
        match self.cart.increment(product_id) {
            Some(quantity) => debug!(%product_id, quantity, "increase_quantity"),
            None => debug!(%product_id, "increase_quantity ignored: not in cart"),
        }
    }

    /// Takes one unit off a product in the cart; the entry is removed when
    /// its quantity reaches zero.
    pub fn decrease_quantity(&mut self, product_id: ProductId) {
        match self.cart.decrement(product_id) {
            Some(0) => self.remove_from_cart(product_id),
            Some(quantity) => debug!(%product_id, quantity, "decrease_quantity"),
            None => debug!(%product_id, "decrease_quantity ignored: not in cart"),
        }
    }

    /// Drops a product from the cart whatever its quantity.
    pub fn remove_from_cart(&mut self, product_id: ProductId) {
        match self.cart.remove(product_id) {
            Some(_) => debug!(%product_id, "remove_from_cart"),
            None => debug!(%product_id, "remove_from_cart ignored: not in cart"),
        }
    }

    /// Clears the cart. The balance is left as is.
    pub fn empty_cart(&mut self) {
        debug!(items = self.cart.len(), "empty_cart");
        self.cart.clear();
    }

    // =========================================================================
    // Totals & Payment
    // =========================================================================

    /// Σ unit_price × quantity over the cart; zero for an empty cart.
    pub fn cart_total(&self) -> Money {
        self.cart
            .iter()
            .filter_map(|entry| {
                self.catalog
                    .find(entry.product_id)
                    .map(|product| entry.line_total(product.unit_price))
            })
            .sum()
    }

    /// Tenders `amount` against the cart and returns `balance - total`.
    ///
    /// ## Settlement
    /// ```text
    /// cart total = 5.00
    ///
    /// pay(3.00) → balance 3.00, difference -2.00 → still owed, cart kept
    /// pay(2.00) → balance 5.00, difference  0.00 → settled:
    ///                                               balance = 0, cart emptied
    /// ```
    ///
    /// A positive difference is the change due; it is only reported, never
    /// deducted from anything.
    pub fn pay(&mut self, amount: Money) -> Money {
        self.balance += amount;
        let total = self.cart_total();
        let difference = self.balance - total;

        if difference.is_negative() {
            debug!(
                tendered = %amount,
                balance = %self.balance,
                %total,
                owed = %difference.abs(),
                "payment outstanding"
            );
        } else {
            let settlement = Settlement::new(self.cart_lines(), total, self.balance);
            info!(
                settlement_id = %settlement.id,
                %total,
                tendered = %settlement.tendered,
                change = %settlement.change,
                "cart settled"
            );

            self.last_settlement = Some(settlement);
            self.settlement_count += 1;
            self.balance = Money::zero();
            self.empty_cart();
        }

        difference
    }
}

impl Default for CartLedger {
    fn default() -> Self {
        Self::new(Catalog::default_fruit_stand())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaymentStatus;

    const CHERRY: ProductId = ProductId(1); // 2.00
    const ORANGE: ProductId = ProductId(2); // 3.00
    const STRAWBERRY: ProductId = ProductId(3); // 1.50
    const UNKNOWN: ProductId = ProductId(42);

    fn money(text: &str) -> Money {
        text.parse().unwrap()
    }

    fn cart_ids(ledger: &CartLedger) -> Vec<ProductId> {
        ledger.cart().iter().map(|e| e.product_id).collect()
    }

    #[test]
    fn test_new_ledger_is_empty() {
        let ledger = CartLedger::default();
        assert!(ledger.is_cart_empty());
        assert!(ledger.balance().is_zero());
        assert!(ledger.cart_total().is_zero());
        assert!(ledger.last_settlement().is_none());
        assert_eq!(ledger.catalog().len(), 3);
    }

    #[test]
    fn test_find_product_and_cart_entry() {
        let mut ledger = CartLedger::default();
        assert_eq!(ledger.find_product(ORANGE).unwrap().name, "Orange");
        assert!(ledger.find_product(UNKNOWN).is_none());

        assert!(ledger.find_cart_entry(ORANGE).is_none());
        ledger.add_to_cart(ORANGE);
        assert_eq!(ledger.find_cart_entry(ORANGE).unwrap().quantity, 1);
    }

    #[test]
    fn test_add_unknown_id_is_noop() {
        let mut ledger = CartLedger::default();
        let catalog_before = ledger.catalog().clone();

        ledger.add_to_cart(UNKNOWN);

        assert!(ledger.is_cart_empty());
        assert_eq!(ledger.catalog(), &catalog_before);
    }

    #[test]
    fn test_add_twice_gives_one_entry_with_quantity_two() {
        let mut ledger = CartLedger::default();
        ledger.add_to_cart(CHERRY);
        ledger.add_to_cart(CHERRY);

        assert_eq!(ledger.item_count(), 1);
        assert_eq!(ledger.find_cart_entry(CHERRY).unwrap().quantity, 2);
    }

    #[test]
    fn test_add_appends_in_insertion_order() {
        let mut ledger = CartLedger::default();
        ledger.add_to_cart(STRAWBERRY);
        ledger.add_to_cart(CHERRY);
        ledger.add_to_cart(STRAWBERRY);

        assert_eq!(cart_ids(&ledger), [STRAWBERRY, CHERRY]);
    }

    #[test]
    fn test_increase_never_inserts() {
        let mut ledger = CartLedger::default();
        ledger.increase_quantity(ORANGE);
        assert!(ledger.is_cart_empty());

        ledger.add_to_cart(ORANGE);
        ledger.increase_quantity(ORANGE);
        assert_eq!(ledger.quantity_in_cart(ORANGE), 2);
    }

    #[test]
    fn test_decrease_quantity_one_removes_entry() {
        let mut ledger = CartLedger::default();
        ledger.add_to_cart(CHERRY);
        ledger.add_to_cart(ORANGE);

        ledger.decrease_quantity(CHERRY);

        assert!(ledger.find_cart_entry(CHERRY).is_none());
        assert_eq!(cart_ids(&ledger), [ORANGE]);
        assert_eq!(ledger.quantity_in_cart(CHERRY), 0);
    }

    #[test]
    fn test_decrease_keeps_entry_above_zero() {
        let mut ledger = CartLedger::default();
        ledger.add_to_cart(CHERRY);
        ledger.add_to_cart(CHERRY);
        ledger.add_to_cart(CHERRY);

        ledger.decrease_quantity(CHERRY);
        assert_eq!(ledger.quantity_in_cart(CHERRY), 2);

        ledger.decrease_quantity(STRAWBERRY);
        assert_eq!(ledger.item_count(), 1);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut ledger = CartLedger::default();
        ledger.add_to_cart(CHERRY);

        ledger.remove_from_cart(ORANGE);
        ledger.remove_from_cart(UNKNOWN);

        assert_eq!(cart_ids(&ledger), [CHERRY]);
    }

    #[test]
    fn test_remove_drops_whole_entry() {
        let mut ledger = CartLedger::default();
        ledger.add_to_cart(ORANGE);
        ledger.add_to_cart(ORANGE);

        ledger.remove_from_cart(ORANGE);
        assert!(ledger.is_cart_empty());
    }

    #[test]
    fn test_cart_total() {
        let mut ledger = CartLedger::default();
        assert_eq!(ledger.cart_total(), Money::zero());

        for _ in 0..3 {
            ledger.add_to_cart(CHERRY);
        }
        ledger.add_to_cart(STRAWBERRY);
        ledger.add_to_cart(STRAWBERRY);

        // 2.00 × 3 + 1.50 × 2
        assert_eq!(ledger.cart_total(), money("9.00"));
        assert_eq!(ledger.total_quantity(), 5);
    }

    #[test]
    fn test_cart_lines_resolve_catalog_data() {
        let mut ledger = CartLedger::default();
        ledger.add_to_cart(STRAWBERRY);
        ledger.add_to_cart(STRAWBERRY);

        let lines = ledger.cart_lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].name, "Strawberry");
        assert_eq!(lines[0].line_total, money("3.00"));
    }

    #[test]
    fn test_empty_cart_is_idempotent() {
        let mut ledger = CartLedger::default();
        ledger.empty_cart();
        assert!(ledger.is_cart_empty());

        ledger.add_to_cart(CHERRY);
        ledger.empty_cart();
        ledger.empty_cart();
        assert!(ledger.is_cart_empty());
        assert_eq!(ledger.quantity_in_cart(CHERRY), 0);
    }

    #[test]
    fn test_empty_cart_keeps_balance() {
        let mut ledger = CartLedger::default();
        ledger.add_to_cart(ORANGE);
        ledger.pay(money("1.00"));

        ledger.empty_cart();
        assert_eq!(ledger.balance(), money("1.00"));
    }

    #[test]
    fn test_pay_in_two_steps() {
        let mut ledger = CartLedger::default();
        ledger.add_to_cart(CHERRY);
        ledger.add_to_cart(ORANGE);
        assert_eq!(ledger.cart_total(), money("5"));

        let difference = ledger.pay(money("3"));
        assert_eq!(difference, money("-2"));
        assert_eq!(ledger.balance(), money("3"));
        assert_eq!(cart_ids(&ledger), [CHERRY, ORANGE]);
        assert!(ledger.last_settlement().is_none());

        let difference = ledger.pay(money("2"));
        assert_eq!(difference, Money::zero());
        assert!(ledger.balance().is_zero());
        assert!(ledger.is_cart_empty());
        assert_eq!(PaymentStatus::from_difference(difference), PaymentStatus::Exact);
    }

    #[test]
    fn test_overpayment_returns_change() {
        let mut ledger = CartLedger::default();
        ledger.add_to_cart(CHERRY);

        let difference = ledger.pay(money("5"));

        assert_eq!(difference, money("3"));
        assert!(ledger.is_cart_empty());
        assert!(ledger.balance().is_zero());
    }

    #[test]
    fn test_pay_on_empty_cart_settles_immediately() {
        let mut ledger = CartLedger::default();
        let difference = ledger.pay(Money::zero());

        assert_eq!(difference, Money::zero());
        assert_eq!(ledger.settlement_count(), 1);
    }

    #[test]
    fn test_negative_tender_is_accepted() {
        let mut ledger = CartLedger::default();
        ledger.add_to_cart(STRAWBERRY);

        let difference = ledger.pay(money("-1"));
        assert_eq!(difference, money("-2.50"));
        assert_eq!(ledger.balance(), money("-1"));

        let difference = ledger.pay(money("2.50"));
        assert_eq!(difference, Money::zero());
        assert!(ledger.is_cart_empty());
    }

    #[test]
    fn test_huge_tenders_clamp_instead_of_overflowing() {
        let mut ledger = CartLedger::default();
        ledger.add_to_cart(CHERRY);
        let huge = money("90000000000000000");

        ledger.pay(-huge);
        let difference = ledger.pay(-huge);
        assert_eq!(ledger.balance(), Money::from_cents(i64::MIN));
        assert_eq!(difference, Money::from_cents(i64::MIN));
        assert_eq!(ledger.quantity_in_cart(CHERRY), 1);

        ledger.pay(huge);
        ledger.pay(huge);
        let difference = ledger.pay(huge);
        assert!(difference.is_positive());
        assert!(ledger.is_cart_empty());
        assert!(ledger.balance().is_zero());
    }

    #[test]
    fn test_huge_prices_clamp_cart_total() {
        let gold = Product::new(9, "Gold", Money::from_cents(i64::MAX), "");
        let mut ledger = CartLedger::new(Catalog::new(vec![gold]).unwrap());
        ledger.add_to_cart(ProductId(9));
        ledger.add_to_cart(ProductId(9));

        assert_eq!(ledger.cart_total(), Money::from_cents(i64::MAX));
        assert_eq!(ledger.pay(Money::from_cents(1)), Money::from_cents(1 - i64::MAX));
    }

    #[test]
    fn test_settlement_records_purchase() {
        let mut ledger = CartLedger::default();
        ledger.add_to_cart(ORANGE);
        ledger.add_to_cart(STRAWBERRY);
        ledger.pay(money("2"));
        ledger.pay(money("5"));

        let settlement = ledger.last_settlement().unwrap();
        assert_eq!(settlement.total, money("4.50"));
        assert_eq!(settlement.tendered, money("7"));
        assert_eq!(settlement.change, money("2.50"));
        assert_eq!(settlement.lines.len(), 2);
        assert_eq!(settlement.total_quantity(), 2);
        assert_eq!(ledger.settlement_count(), 1);
    }

    #[test]
    fn test_ledger_over_custom_catalog() {
        let catalog = Catalog::new(vec![Product::new(7, "Mango", money("0.99"), "")]).unwrap();
        let mut ledger = CartLedger::new(catalog);

        ledger.add_to_cart(CHERRY);
        assert!(ledger.is_cart_empty());

        ledger.add_to_cart(ProductId(7));
        ledger.increase_quantity(ProductId(7));
        assert_eq!(ledger.cart_total(), money("1.98"));
    }
}
