//! # Allocation Value
//!
//! The non-negative value of a single allocation entry.
//!
//! This module provides the [`AllocValue`] type holding the quantity or
//! amount allocated to one entity. Construction sanitizes rather than
//! rejects: a negative, non-finite, or unparseable input becomes zero, so a
//! stray keystroke in a numeric field can never surface as an error.
//!
//! # Examples
//!
//! ```
//! use order_alloc::domain::value_objects::AllocValue;
//! use rust_decimal::Decimal;
//!
//! let v = AllocValue::from_input(600.0);
//! assert_eq!(v.get(), Decimal::new(600, 0));
//!
//! // Garbage in, zero out.
//! assert!(AllocValue::from_input(f64::NAN).is_zero());
//! assert!(AllocValue::from_input(-5.0).is_zero());
//! ```

use crate::domain::value_objects::arithmetic::{ArithmeticResult, CheckedArithmetic};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The value allocated to one entity, in the ledger's unit.
///
/// # Invariants
///
/// - Never negative. Constructors clamp instead of failing.
/// - A zero value means "logically absent": the ledger removes the entry
///   and it is never serialized.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(from = "Decimal")]
#[serde(into = "Decimal")]
pub struct AllocValue(Decimal);

impl AllocValue {
    /// The zero value.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a value from a decimal, clamping negatives to zero.
    #[must_use]
    pub fn new(value: Decimal) -> Self {
        if value.is_sign_negative() {
            Self(Decimal::ZERO)
        } else {
            Self(value)
        }
    }

    /// Creates a value from raw user input.
    ///
    /// `NaN`, infinities, and negative numbers all normalize to zero; the
    /// allocation UI must never crash on a stray keystroke.
    #[must_use]
    pub fn from_input(value: f64) -> Self {
        if !value.is_finite() || value < 0.0 {
            return Self::ZERO;
        }
        Decimal::from_f64(value).map(Self::new).unwrap_or(Self::ZERO)
    }

    /// Returns the underlying decimal.
    #[inline]
    #[must_use]
    pub const fn get(&self) -> Decimal {
        self.0
    }

    /// Returns true if the value is zero.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the value is strictly positive.
    #[inline]
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Returns the smaller of two values.
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        if self.0 <= other.0 { self } else { other }
    }

    /// Safely adds another value.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the sum would overflow.
    pub fn safe_add(self, rhs: Self) -> ArithmeticResult<Self> {
        self.0.safe_add(rhs.0).map(Self)
    }
}

impl From<Decimal> for AllocValue {
    fn from(value: Decimal) -> Self {
        Self::new(value)
    }
}

impl From<AllocValue> for Decimal {
    fn from(value: AllocValue) -> Self {
        value.0
    }
}

impl fmt::Display for AllocValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
