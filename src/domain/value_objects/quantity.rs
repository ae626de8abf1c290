//! # Quantity Value Object
//!
//! Order-level share quantity.
//!
//! # Examples
//!
//! ```
//! use order_alloc::domain::value_objects::Quantity;
//!
//! let qty = Quantity::new(100.0).unwrap();
//! assert!(qty.is_positive());
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A strictly positive share quantity for the order as a whole.
///
/// The per-entity quantities inside a ledger use
/// [`AllocValue`](crate::domain::value_objects::AllocValue), which clamps;
/// the order target is validated because a zero-quantity order has no
/// allocation problem to solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(Decimal);

impl Quantity {
    /// Creates a quantity from a float.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidQuantity` if the value is not finite or
    /// not strictly positive.
    pub fn new(value: f64) -> DomainResult<Self> {
        if !value.is_finite() {
            return Err(DomainError::InvalidQuantity(
                "quantity must be finite".to_string(),
            ));
        }
        let value = Decimal::from_f64(value).ok_or_else(|| {
            DomainError::InvalidQuantity("quantity is not representable".to_string())
        })?;
        Self::from_decimal(value)
    }

    /// Creates a quantity from a decimal.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidQuantity` if the value is not strictly
    /// positive.
    pub fn from_decimal(value: Decimal) -> DomainResult<Self> {
        if value <= Decimal::ZERO {
            return Err(DomainError::InvalidQuantity(
                "quantity must be positive".to_string(),
            ));
        }
        Ok(Self(value))
    }

    /// Returns the underlying decimal.
    #[inline]
    #[must_use]
    pub const fn get(&self) -> Decimal {
        self.0
    }

    /// Returns true if the quantity is strictly positive. Always true for
    /// a validated quantity; kept for symmetry with raw decimals.
    #[inline]
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
