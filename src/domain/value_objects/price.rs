//! # Price Value Object
//!
//! Per-share execution price.
//!
//! # Examples
//!
//! ```
//! use order_alloc::domain::value_objects::Price;
//!
//! let price = Price::new(10.0).unwrap();
//! assert!(price.is_positive());
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A strictly positive per-share price.
///
/// Unlike allocation entry values, a price is validated rather than
/// clamped: an order priced at zero is a caller bug, not a user typo.
///
/// # Invariants
///
/// - Always strictly positive and finite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Creates a price from a float.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPrice` if the value is not finite or
    /// not strictly positive.
    pub fn new(value: f64) -> DomainResult<Self> {
        if !value.is_finite() {
            return Err(DomainError::InvalidPrice("price must be finite".to_string()));
        }
        let value = Decimal::from_f64(value)
            .ok_or_else(|| DomainError::InvalidPrice("price is not representable".to_string()))?;
        Self::from_decimal(value)
    }

    /// Creates a price from a decimal.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPrice` if the value is not strictly
    /// positive.
    pub fn from_decimal(value: Decimal) -> DomainResult<Self> {
        if value <= Decimal::ZERO {
            return Err(DomainError::InvalidPrice(
                "price must be positive".to_string(),
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

    /// Returns true if the price is strictly positive. Always true for a
    /// validated price; kept for symmetry with raw decimals.
    #[inline]
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
