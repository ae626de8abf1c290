//! # Domain Enums
//!
//! Enumeration types for domain concepts.
//!
//! This module provides the core enumerations of the allocation engine:
//!
//! - [`EntityKind`] - What a capacity entity is (cash, credit, portfolio)
//! - [`OrderSide`] - Buy or Sell direction
//! - [`SourceType`] - Funding-allocation wire tag
//! - [`DestinationType`] - Deposit-allocation wire tag
//!
//! An entity's kind is resolved once at catalog ingestion and carried on the
//! record; it is never inferred from id text. The wire tags [`SourceType`]
//! and [`DestinationType`] are derived from [`EntityKind`] at serialization
//! time via [`SourceType::from_kind`] and [`DestinationType::from_kind`].
//!
//! All enums implement `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`,
//! `Display`, `FromStr`, and Serde traits. Serde and `Display` use the
//! lowercase spellings of the order-shell wire contract.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of a capacity entity.
///
/// # Examples
///
/// ```
/// use order_alloc::domain::value_objects::EntityKind;
///
/// assert!(EntityKind::Cash.is_funding_source());
/// assert!(!EntityKind::Portfolio.is_funding_source());
/// assert_eq!(EntityKind::Credit.to_string(), "credit");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum EntityKind {
    /// A cash account holding a currency balance.
    Cash = 0,
    /// A credit facility with an available limit.
    Credit = 1,
    /// An investment portfolio holding instruments.
    Portfolio = 2,
}

impl EntityKind {
    /// Returns true if entities of this kind can fund a buy order.
    #[inline]
    #[must_use]
    pub const fn is_funding_source(self) -> bool {
        matches!(self, Self::Cash | Self::Credit)
    }

    /// Returns true if this is a portfolio.
    #[inline]
    #[must_use]
    pub const fn is_portfolio(self) -> bool {
        matches!(self, Self::Portfolio)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cash => write!(f, "cash"),
            Self::Credit => write!(f, "credit"),
            Self::Portfolio => write!(f, "portfolio"),
        }
    }
}

impl FromStr for EntityKind {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cash" => Ok(Self::Cash),
            "credit" => Ok(Self::Credit),
            "portfolio" => Ok(Self::Portfolio),
            _ => Err(ParseEnumError::InvalidValue("EntityKind", s.to_string())),
        }
    }
}

/// Order side indicating buy or sell direction.
///
/// # Examples
///
/// ```
/// use order_alloc::domain::value_objects::OrderSide;
///
/// assert_eq!(OrderSide::Buy.opposite(), OrderSide::Sell);
/// assert_eq!(OrderSide::Buy.to_string(), "buy");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum OrderSide {
    /// Buy order - acquiring the instrument.
    Buy = 0,
    /// Sell order - disposing of the instrument.
    Sell = 1,
}

impl OrderSide {
    /// Returns the opposite side.
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }

    /// Returns true if this is a buy order.
    #[inline]
    #[must_use]
    pub const fn is_buy(self) -> bool {
        matches!(self, Self::Buy)
    }

    /// Returns true if this is a sell order.
    #[inline]
    #[must_use]
    pub const fn is_sell(self) -> bool {
        matches!(self, Self::Sell)
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

impl FromStr for OrderSide {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            _ => Err(ParseEnumError::InvalidValue("OrderSide", s.to_string())),
        }
    }
}

/// Wire tag of a funding allocation's source entity.
///
/// Derived from the source's [`EntityKind`] at serialization time; the
/// ledger itself never stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum SourceType {
    /// Funded from a cash account.
    Cash = 0,
    /// Funded from a credit facility.
    Credit = 1,
}

impl SourceType {
    /// Derives the wire tag from an entity kind.
    ///
    /// Returns `None` for kinds that cannot fund an order (portfolios).
    #[inline]
    #[must_use]
    pub const fn from_kind(kind: EntityKind) -> Option<Self> {
        match kind {
            EntityKind::Cash => Some(Self::Cash),
            EntityKind::Credit => Some(Self::Credit),
            EntityKind::Portfolio => None,
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cash => write!(f, "cash"),
            Self::Credit => write!(f, "credit"),
        }
    }
}

impl FromStr for SourceType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cash" => Ok(Self::Cash),
            "credit" => Ok(Self::Credit),
            _ => Err(ParseEnumError::InvalidValue("SourceType", s.to_string())),
        }
    }
}

/// Wire tag of a deposit allocation's destination entity.
///
/// Portfolio-typed entries belong to the buy side, cash-typed entries to the
/// sell side; each side merges around the other's entries when writing the
/// shared array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum DestinationType {
    /// Instrument delivered into a portfolio.
    Portfolio = 0,
    /// Proceeds deposited into a cash account.
    Cash = 1,
}

impl DestinationType {
    /// Derives the wire tag from an entity kind.
    ///
    /// Returns `None` for kinds that cannot receive a deposit (credit
    /// facilities).
    #[inline]
    #[must_use]
    pub const fn from_kind(kind: EntityKind) -> Option<Self> {
        match kind {
            EntityKind::Portfolio => Some(Self::Portfolio),
            EntityKind::Cash => Some(Self::Cash),
            EntityKind::Credit => None,
        }
    }
}

impl fmt::Display for DestinationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Portfolio => write!(f, "portfolio"),
            Self::Cash => write!(f, "cash"),
        }
    }
}

impl FromStr for DestinationType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "portfolio" => Ok(Self::Portfolio),
            "cash" => Ok(Self::Cash),
            _ => Err(ParseEnumError::InvalidValue(
                "DestinationType",
                s.to_string(),
            )),
        }
    }
}

/// Error type for parsing enum values from strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEnumError {
    /// The provided string value is not valid for the enum.
    InvalidValue(&'static str, String),
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue(enum_name, value) => {
                write!(f, "invalid {} value: '{}'", enum_name, value)
            }
        }
    }
}

impl std::error::Error for ParseEnumError {}
