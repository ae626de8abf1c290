//! # order-alloc
//!
//! Allocation reconciliation engine for multi-account trade orders.
//!
//! A trade ticket in a wealth-management front-end splits one fixed order
//! across several funding or source entities and several destination
//! entities. This crate owns that arithmetic: the per-side
//! [`AllocationLedger`](domain::entities::AllocationLedger) guarantees the
//! parts sum correctly and flags over/under allocation, and the
//! [`StagedEditSession`](domain::entities::StagedEditSession) lets a
//! selection sheet stage any number of edits and then apply them
//! all-or-nothing, so a half-finished edit never corrupts the committed
//! order.
//!
//! The engine is pure and synchronous: no I/O, no async boundary, no
//! clocks outside event metadata. It consumes a read-only
//! [`CapacityCatalog`](domain::catalog::CapacityCatalog) of candidate
//! entities and reads/writes the enclosing order's serialized allocation
//! arrays through the
//! [`OrderShell`](domain::entities::OrderShell) contract.
//!
//! ## Quick Start
//!
//! ```
//! use order_alloc::application::services::buy_side::{BuySideOrchestrator, FundingScope};
//! use order_alloc::domain::entities::capacity_entity::CapacityEntity;
//! use order_alloc::domain::entities::order_shell::OrderShell;
//! use order_alloc::domain::value_objects::{
//!     AllocValue, CurrencyCode, EntityId, OrderId, Price, Quantity,
//! };
//! use order_alloc::infrastructure::catalog::InMemoryCapacityCatalog;
//! use rust_decimal_macros::dec;
//! use std::sync::Arc;
//!
//! let usd = CurrencyCode::new("USD").unwrap();
//! let catalog = Arc::new(InMemoryCapacityCatalog::with_entities([
//!     CapacityEntity::cash_account(
//!         EntityId::new("cash-1"),
//!         "Operating USD",
//!         usd.clone(),
//!         AllocValue::new(dec!(5000)),
//!     ),
//!     CapacityEntity::credit_facility(
//!         EntityId::new("credit-1"),
//!         "Lombard Facility",
//!         usd.clone(),
//!         AllocValue::new(dec!(10000)),
//!     ),
//! ]));
//!
//! // Buy 100 shares at 10 USD: the funding target is 1000 USD.
//! let mut orchestrator = BuySideOrchestrator::new(
//!     OrderId::new_v4(),
//!     catalog,
//!     Quantity::new(100.0).unwrap(),
//!     Price::new(10.0).unwrap(),
//!     usd,
//! )
//! .unwrap();
//!
//! // Stage edits inside a session; the ledger is untouched until commit.
//! let mut session = orchestrator.open_funding_session(FundingScope::All);
//! session.set_working(&EntityId::new("cash-1"), AllocValue::new(dec!(600))).unwrap();
//! session.set_working(&EntityId::new("credit-1"), AllocValue::new(dec!(400))).unwrap();
//!
//! let mut shell = OrderShell::new();
//! orchestrator.commit_funding(session, &mut shell);
//!
//! assert!(orchestrator.funding().is_complete());
//! assert_eq!(shell.funding_allocations.len(), 2);
//! ```
//!
//! ## Failure Semantics
//!
//! User-typed values are sanitized, never rejected:
//! [`AllocValue::from_input`](domain::value_objects::AllocValue::from_input)
//! maps `NaN`, infinities, and negatives to zero. Allocation entries
//! referencing entities that have vanished from the catalog are dropped
//! (and logged) during decode. Over-allocation and capacity overruns are
//! warning states; commit is always permitted.

pub mod application;
pub mod domain;
pub mod infrastructure;
