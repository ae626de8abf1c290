//! # Ledger Unit
//!
//! The unit a ledger's values are denominated in.
//!
//! This module provides the [`LedgerUnit`] tagged union. Making the unit a
//! sum type (rather than a bare flag next to untyped numbers) means code
//! holding two ledgers cannot accidentally sum shares with currency: the
//! currency variant carries its code and comparison is explicit.
//!
//! # Examples
//!
//! ```
//! use order_alloc::domain::value_objects::{CurrencyCode, LedgerUnit};
//!
//! let shares = LedgerUnit::Shares;
//! let usd = LedgerUnit::Currency(CurrencyCode::new("USD").unwrap());
//!
//! assert!(shares.is_shares());
//! assert_eq!(usd.currency().unwrap().as_str(), "USD");
//! assert_ne!(shares, usd);
//! ```

use crate::domain::value_objects::currency::CurrencyCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The denomination of a ledger's target and entry values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LedgerUnit {
    /// Values are instrument share counts.
    Shares,
    /// Values are amounts in the given currency.
    Currency(CurrencyCode),
}

impl LedgerUnit {
    /// Returns true if values are share counts.
    #[inline]
    #[must_use]
    pub const fn is_shares(&self) -> bool {
        matches!(self, Self::Shares)
    }

    /// Returns true if values are currency amounts.
    #[inline]
    #[must_use]
    pub const fn is_currency(&self) -> bool {
        matches!(self, Self::Currency(_))
    }

    /// Returns the currency code if this is a currency unit.
    #[inline]
    #[must_use]
    pub const fn currency(&self) -> Option<&CurrencyCode> {
        match self {
            Self::Currency(code) => Some(code),
            Self::Shares => None,
        }
    }
}

impl fmt::Display for LedgerUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shares => write!(f, "SHARES"),
            Self::Currency(code) => write!(f, "CURRENCY({})", code),
        }
    }
}
