//! # Order Shell Contract
//!
//! The serialized allocation arrays owned by the enclosing trade ticket.
//!
//! This module provides the [`OrderShell`] struct and its three record
//! types. The shell is the *source of truth*: ledgers are decoded from
//! these arrays on every mount and flattened back into them on every
//! commit. Field names follow the enclosing application's camelCase wire
//! convention, and every record type carries a JSON schema for the
//! `export_schemas` tool.
//!
//! `deposit_allocations` is shared vocabulary between the two sides (the
//! buy side writes portfolio-typed entries, the sell side cash-typed
//! ones), so all writes go through [`OrderShell::merge_deposits`], which
//! filters out only the writer's own subtype before appending.
//!
//! # Examples
//!
//! ```
//! use order_alloc::domain::entities::order_shell::{DepositAllocation, OrderShell};
//! use order_alloc::domain::value_objects::{CurrencyCode, DestinationType, EntityId};
//! use rust_decimal_macros::dec;
//!
//! let mut shell = OrderShell::new();
//! shell.merge_deposits(
//!     DestinationType::Cash,
//!     vec![DepositAllocation::cash(
//!         EntityId::new("cash-1"),
//!         dec!(500),
//!         CurrencyCode::new("USD").unwrap(),
//!     )],
//! );
//! shell.merge_deposits(
//!     DestinationType::Portfolio,
//!     vec![DepositAllocation::portfolio(EntityId::new("port-1"), dec!(10))],
//! );
//!
//! // Both survive: each side merged around the other's entries.
//! assert_eq!(shell.deposit_allocations.len(), 2);
//! ```

use crate::domain::value_objects::{CurrencyCode, DestinationType, EntityId, SourceType};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A funding allocation: where a buy order's money comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FundingAllocation {
    /// The funding entity.
    #[schemars(with = "String")]
    pub source_id: EntityId,
    /// Whether the source is a cash account or a credit facility.
    /// Derived from the catalog at serialization time.
    pub source_type: SourceType,
    /// The funded amount in `currency`.
    #[schemars(with = "String")]
    pub amount: Decimal,
    /// The order currency.
    #[schemars(with = "String")]
    pub currency: CurrencyCode,
}

impl FundingAllocation {
    /// Creates a funding allocation record.
    #[must_use]
    pub fn new(
        source_id: EntityId,
        source_type: SourceType,
        amount: Decimal,
        currency: CurrencyCode,
    ) -> Self {
        Self {
            source_id,
            source_type,
            amount,
            currency,
        }
    }
}

/// A deposit allocation: where an order's proceeds or instruments land.
///
/// Portfolio-typed entries carry a quantity, cash-typed entries an amount
/// and currency; the unused fields are omitted from the wire form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepositAllocation {
    /// The receiving entity.
    #[schemars(with = "String")]
    pub destination_id: EntityId,
    /// Whether the destination is a portfolio or a cash account.
    pub destination_type: DestinationType,
    /// Share quantity delivered (portfolio destinations).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[schemars(with = "Option<String>")]
    pub quantity: Option<Decimal>,
    /// Amount deposited (cash destinations).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[schemars(with = "Option<String>")]
    pub amount: Option<Decimal>,
    /// Currency of the deposited amount (cash destinations).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[schemars(with = "Option<String>")]
    pub currency: Option<CurrencyCode>,
}

impl DepositAllocation {
    /// Creates a portfolio-typed deposit of a share quantity.
    #[must_use]
    pub fn portfolio(destination_id: EntityId, quantity: Decimal) -> Self {
        Self {
            destination_id,
            destination_type: DestinationType::Portfolio,
            quantity: Some(quantity),
            amount: None,
            currency: None,
        }
    }

    /// Creates a cash-typed deposit of a currency amount.
    #[must_use]
    pub fn cash(destination_id: EntityId, amount: Decimal, currency: CurrencyCode) -> Self {
        Self {
            destination_id,
            destination_type: DestinationType::Cash,
            quantity: None,
            amount: Some(amount),
            currency: Some(currency),
        }
    }
}

/// An instrument allocation: which portfolio a sell order draws shares from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentAllocation {
    /// The source portfolio.
    #[schemars(with = "String")]
    pub portfolio_id: EntityId,
    /// The share quantity drawn from it.
    #[schemars(with = "String")]
    pub quantity: Decimal,
}

impl InstrumentAllocation {
    /// Creates an instrument allocation record.
    #[must_use]
    pub fn new(portfolio_id: EntityId, quantity: Decimal) -> Self {
        Self {
            portfolio_id,
            quantity,
        }
    }
}

/// The allocation arrays of the order under construction.
///
/// Owned by the surrounding trade-ticket flow; the engine reads it at
/// mount and overwrites its own slices of it at commit.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderShell {
    /// Buy-side funding legs.
    #[serde(default)]
    pub funding_allocations: Vec<FundingAllocation>,
    /// Destination legs for both sides, discriminated by type.
    #[serde(default)]
    pub deposit_allocations: Vec<DepositAllocation>,
    /// Sell-side source legs.
    #[serde(default)]
    pub instrument_allocations: Vec<InstrumentAllocation>,
}

impl OrderShell {
    /// Creates an empty shell.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the funding legs. Funding belongs exclusively to the
    /// buy side, so no merge is needed.
    pub fn replace_funding(&mut self, entries: Vec<FundingAllocation>) {
        self.funding_allocations = entries;
    }

    /// Overwrites the instrument legs. They belong exclusively to the
    /// sell side, so no merge is needed.
    pub fn replace_instrument(&mut self, entries: Vec<InstrumentAllocation>) {
        self.instrument_allocations = entries;
    }

    /// Replaces only the deposit legs of the given type, preserving every
    /// entry written by the other side.
    pub fn merge_deposits(
        &mut self,
        destination_type: DestinationType,
        entries: Vec<DepositAllocation>,
    ) {
        self.deposit_allocations
            .retain(|d| d.destination_type != destination_type);
        self.deposit_allocations.extend(entries);
    }

    /// Iterates over deposit legs of one type.
    pub fn deposits_of(
        &self,
        destination_type: DestinationType,
    ) -> impl Iterator<Item = &DepositAllocation> {
        self.deposit_allocations
            .iter()
            .filter(move |d| d.destination_type == destination_type)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn usd() -> CurrencyCode {
        CurrencyCode::new("USD").unwrap()
    }

    mod records {
        use super::*;

        #[test]
        fn portfolio_deposit_has_quantity_only() {
            let d = DepositAllocation::portfolio(EntityId::new("port-1"), dec!(10));
            assert_eq!(d.destination_type, DestinationType::Portfolio);
            assert_eq!(d.quantity, Some(dec!(10)));
            assert!(d.amount.is_none());
            assert!(d.currency.is_none());
        }

        #[test]
        fn cash_deposit_has_amount_and_currency() {
            let d = DepositAllocation::cash(EntityId::new("cash-1"), dec!(500), usd());
            assert_eq!(d.destination_type, DestinationType::Cash);
            assert_eq!(d.amount, Some(dec!(500)));
            assert_eq!(d.currency, Some(usd()));
            assert!(d.quantity.is_none());
        }
    }

    mod merge {
        use super::*;

        #[test]
        fn merge_preserves_other_side_entries() {
            let mut shell = OrderShell::new();
            shell.merge_deposits(
                DestinationType::Cash,
                vec![DepositAllocation::cash(EntityId::new("cash-1"), dec!(500), usd())],
            );
            shell.merge_deposits(
                DestinationType::Portfolio,
                vec![DepositAllocation::portfolio(EntityId::new("port-1"), dec!(10))],
            );

            assert_eq!(shell.deposit_allocations.len(), 2);
            assert_eq!(shell.deposits_of(DestinationType::Cash).count(), 1);
            assert_eq!(shell.deposits_of(DestinationType::Portfolio).count(), 1);
        }

        #[test]
        fn merge_replaces_own_side_entries() {
            let mut shell = OrderShell::new();
            shell.merge_deposits(
                DestinationType::Portfolio,
                vec![
                    DepositAllocation::portfolio(EntityId::new("port-1"), dec!(10)),
                    DepositAllocation::portfolio(EntityId::new("port-2"), dec!(20)),
                ],
            );
            shell.merge_deposits(
                DestinationType::Portfolio,
                vec![DepositAllocation::portfolio(EntityId::new("port-3"), dec!(30))],
            );

            let portfolios: Vec<_> = shell.deposits_of(DestinationType::Portfolio).collect();
            assert_eq!(portfolios.len(), 1);
            assert_eq!(portfolios[0].destination_id.as_str(), "port-3");
        }

        #[test]
        fn merge_with_empty_clears_own_side_only() {
            let mut shell = OrderShell::new();
            shell.merge_deposits(
                DestinationType::Cash,
                vec![DepositAllocation::cash(EntityId::new("cash-1"), dec!(500), usd())],
            );
            shell.merge_deposits(
                DestinationType::Portfolio,
                vec![DepositAllocation::portfolio(EntityId::new("port-1"), dec!(10))],
            );
            shell.merge_deposits(DestinationType::Portfolio, vec![]);

            assert_eq!(shell.deposit_allocations.len(), 1);
            assert_eq!(shell.deposits_of(DestinationType::Cash).count(), 1);
        }

        #[test]
        fn replace_funding_overwrites() {
            let mut shell = OrderShell::new();
            shell.replace_funding(vec![FundingAllocation::new(
                EntityId::new("cash-1"),
                SourceType::Cash,
                dec!(600),
                usd(),
            )]);
            shell.replace_funding(vec![FundingAllocation::new(
                EntityId::new("credit-1"),
                SourceType::Credit,
                dec!(400),
                usd(),
            )]);
            assert_eq!(shell.funding_allocations.len(), 1);
            assert_eq!(shell.funding_allocations[0].source_id.as_str(), "credit-1");
        }
    }

    mod serde_tests {
        use super::*;

        #[test]
        fn records_use_camel_case() {
            let f = FundingAllocation::new(EntityId::new("cash-1"), SourceType::Cash, dec!(600), usd());
            let json = serde_json::to_string(&f).unwrap();
            assert!(json.contains("\"sourceId\""));
            assert!(json.contains("\"sourceType\":\"cash\""));

            let i = InstrumentAllocation::new(EntityId::new("port-1"), dec!(10));
            let json = serde_json::to_string(&i).unwrap();
            assert!(json.contains("\"portfolioId\""));
        }

        #[test]
        fn deposit_omits_absent_fields() {
            let d = DepositAllocation::portfolio(EntityId::new("port-1"), dec!(10));
            let json = serde_json::to_string(&d).unwrap();
            assert!(json.contains("\"quantity\""));
            assert!(!json.contains("\"amount\""));
            assert!(!json.contains("\"currency\""));
        }

        #[test]
        fn shell_roundtrip() {
            let mut shell = OrderShell::new();
            shell.replace_funding(vec![FundingAllocation::new(
                EntityId::new("cash-1"),
                SourceType::Cash,
                dec!(600),
                usd(),
            )]);
            shell.merge_deposits(
                DestinationType::Cash,
                vec![DepositAllocation::cash(EntityId::new("cash-2"), dec!(500), usd())],
            );
            shell.replace_instrument(vec![InstrumentAllocation::new(
                EntityId::new("port-1"),
                dec!(50),
            )]);

            let json = serde_json::to_string(&shell).unwrap();
            let back: OrderShell = serde_json::from_str(&json).unwrap();
            assert_eq!(shell, back);
        }

        #[test]
        fn shell_decodes_missing_arrays_as_empty() {
            let back: OrderShell = serde_json::from_str("{}").unwrap();
            assert!(back.funding_allocations.is_empty());
            assert!(back.deposit_allocations.is_empty());
            assert!(back.instrument_allocations.is_empty());
        }
    }
}
