//! # Validation Module
//!
//! Rules applied to catalog data when a ledger is constructed.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Where Validation Happens                           │
//! │                                                                         │
//! │  Construction time (THIS MODULE)                                        │
//! │  ├── product name present and bounded                                   │
//! │  ├── unit price not negative                                            │
//! │  └── product ids unique                                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Runtime (CartLedger)                                                   │
//! │  └── nothing: unknown ids are no-ops, every tender is accepted          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use ledger_core::validation::validate_product_name;
//!
//! assert!(validate_product_name("Cherry").is_ok());
//! assert!(validate_product_name("  ").is_err());
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Product, ProductId};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted product name.
pub const MAX_NAME_LEN: usize = 200;

/// Longest accepted image reference.
pub const MAX_IMAGE_REF_LEN: usize = 500;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a product name: non-blank, at most 200 characters.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a unit price. Zero is allowed (free items).
///
/// ```rust
/// use ledger_core::money::Money;
/// use ledger_core::validation::validate_unit_price;
///
/// assert!(validate_unit_price(Money::from_cents(150)).is_ok());
/// assert!(validate_unit_price(Money::zero()).is_ok());
/// assert!(validate_unit_price(Money::from_cents(-1)).is_err());
/// ```
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "unit price".to_string(),
        });
    }

    Ok(())
}

/// Validates an image reference. Empty is allowed.
pub fn validate_image_ref(image_ref: &str) -> ValidationResult<()> {
    if image_ref.chars().count() > MAX_IMAGE_REF_LEN {
        return Err(ValidationError::TooLong {
            field: "image reference".to_string(),
            max: MAX_IMAGE_REF_LEN,
        });
    }

    Ok(())
}

/// Runs every field validator over one product.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_product_name(&product.name)?;
    validate_unit_price(product.unit_price)?;
    validate_image_ref(&product.image_ref)?;
    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Checks that no two products share an id.
pub fn validate_unique_ids<'a>(
    ids: impl IntoIterator<Item = &'a ProductId>,
) -> ValidationResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(*id) {
            return Err(ValidationError::Duplicate {
                field: "product id".to_string(),
                value: id.to_string(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
