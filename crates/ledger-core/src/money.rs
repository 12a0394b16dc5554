//! # Money Module
//!
//! Provides the `Money` type for prices, totals, balances and tendered
//! amounts.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Strawberry at 1.5, three in the cart, customer pays 0.1 + 0.2 ...      │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │    balance - total >= 0 ?  → settlement decided by rounding noise       │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    10 + 20 = 30 cents, and `difference >= 0` is an exact comparison     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use ledger_core::money::Money;
//!
//! let price: Money = "1.5".parse().unwrap();
//! assert_eq!(price.cents(), 150);
//!
//! let line_total = price.multiply_quantity(3);
//! assert_eq!(line_total.to_string(), "$4.50");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

/// Number of fractional digits carried by [`Money`].
pub const MINOR_DIGITS: usize = 2;

const MINOR_PER_MAJOR: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// A signed monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: `pay` returns negative differences for amounts still
///   owed, and tendered amounts are accepted unvalidated, negatives included
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Saturating arithmetic**: sums and products clamp at the i64 bounds,
///   so no tender or line total can panic or wrap
///
/// ## Where Money Flows
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.unit_price ──► × quantity ──► CartLine.line_total              │
/// │                                              │                          │
/// │                                              ▼                          │
/// │  pay(tendered) ──► balance += tendered ──► balance - cart_total         │
/// │                                              │                          │
/// │                                              ▼                          │
/// │                                   difference (owed / change)            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use ledger_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(150).cents(), 150);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion, truncated toward zero.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % MINOR_PER_MAJOR).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.saturating_abs())
    }

    /// Multiplies a unit price by a cart quantity.
    ///
    /// ```rust
    /// use ledger_core::money::Money;
    ///
    /// let line_total = Money::from_cents(200).multiply_quantity(3);
    /// assert_eq!(line_total.cents(), 600);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }

    /// Formats the amount with a caller-chosen currency symbol.
    ///
    /// ```rust
    /// use ledger_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(-250).format_with("€"), "-€2.50");
    /// ```
    pub fn format_with(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses decimal text such as `"2"`, `"1.5"`, `"-3.25"` or `".75"`.
///
/// At most two fractional digits are accepted; anything finer would be
/// silently rounded, so it is rejected instead.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: reason.to_string(),
        };

        if text.is_empty() {
            return Err(ValidationError::Required {
                field: "amount".to_string(),
            });
        }

        let (negative, unsigned) = match text.as_bytes()[0] {
            b'-' => (true, &text[1..]),
            b'+' => (false, &text[1..]),
            _ => (false, text),
        };

        let (major_text, minor_text) = match unsigned.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (unsigned, ""),
        };

        if major_text.is_empty() && minor_text.is_empty() {
            return Err(invalid("expected digits"));
        }
        if !major_text.chars().all(|c| c.is_ascii_digit())
            || !minor_text.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid("expected a decimal number like 1.50"));
        }
        if minor_text.len() > MINOR_DIGITS {
            return Err(invalid("at most 2 decimal places are allowed"));
        }

        let major: i64 = if major_text.is_empty() {
            0
        } else {
            major_text.parse().map_err(|_| invalid("amount is too large"))?
        };
        let minor: i64 = match minor_text.len() {
            0 => 0,
            1 => minor_text.parse::<i64>().unwrap_or(0) * 10,
            _ => minor_text.parse().unwrap_or(0),
        };

        let cents = major
            .checked_mul(MINOR_PER_MAJOR)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(|| invalid("amount is too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `$D.CC`; presentation layers with another currency use
/// [`Money::format_with`].
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with("$"))
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(self.0.saturating_neg())
    }
}

impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
