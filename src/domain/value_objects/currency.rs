//! # Currency Code Value Object
//!
//! ISO-4217-style currency codes.
//!
//! This module provides the [`CurrencyCode`] type used to tag currency
//! amounts and capacity entities. The engine never converts between
//! currencies; it only compares codes to flag when a conversion would be
//! required downstream.
//!
//! # Examples
//!
//! ```
//! use order_alloc::domain::value_objects::CurrencyCode;
//!
//! let usd = CurrencyCode::new("usd").unwrap();
//! assert_eq!(usd.as_str(), "USD");
//! assert_ne!(usd, CurrencyCode::new("CHF").unwrap());
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A three-letter currency code.
///
/// Codes are normalized to uppercase at construction.
///
/// # Invariants
///
/// - Exactly three ASCII alphabetic characters
/// - Always stored uppercase
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Creates a currency code, normalizing to uppercase.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCurrency` if the code is not exactly
    /// three ASCII letters.
    pub fn new(code: impl Into<String>) -> DomainResult<Self> {
        let code = code.into();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DomainError::InvalidCurrency(code));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    /// Returns the code as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
