//! # Allocation Ledger
//!
//! The mapping from entity id to allocated value for one side of an order.
//!
//! This module provides the [`AllocationLedger`] entity and its serialized
//! form, [`AllocationEntry`]. A ledger is pure data plus derivation: it
//! computes its allocated total, the remaining balance against the target,
//! and the over/under-allocation status, and it performs no I/O.
//!
//! Ledgers are a *derived, disposable view*: they are reconstructed from
//! the order shell's arrays on every mount ([`AllocationLedger::decode`])
//! and flattened back into them after every commit
//! ([`AllocationLedger::encode`]). The ledger itself is never persisted.
//!
//! # Examples
//!
//! ```
//! use order_alloc::domain::entities::ledger::AllocationLedger;
//! use order_alloc::domain::value_objects::{AllocValue, EntityId, LedgerUnit};
//! use rust_decimal_macros::dec;
//!
//! let mut ledger = AllocationLedger::new(dec!(1000), LedgerUnit::Shares).unwrap();
//! ledger.set_entry(EntityId::new("port-1"), AllocValue::new(dec!(600)));
//! ledger.set_entry(EntityId::new("port-2"), AllocValue::new(dec!(400)));
//!
//! assert_eq!(ledger.current_allocation(), dec!(1000));
//! assert!(ledger.status().is_complete());
//! ```

use crate::domain::catalog::CapacityCatalog;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{AllocValue, AllocationStatus, EntityId, LedgerUnit};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One serialized allocation: an entity and the value allocated to it.
///
/// # Invariants
///
/// - `value` is strictly positive; a zero allocation is logically absent
///   and never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationEntry {
    /// The entity this allocation is assigned to.
    pub entity_id: EntityId,
    /// The allocated value, in the owning ledger's unit.
    pub value: AllocValue,
}

impl AllocationEntry {
    /// Creates an entry.
    #[must_use]
    pub fn new(entity_id: EntityId, value: AllocValue) -> Self {
        Self { entity_id, value }
    }
}

impl fmt::Display for AllocationEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.entity_id, self.value)
    }
}

/// The allocations for one side of an order, with derived totals.
///
/// Entries preserve insertion order so that [`encode`](Self::encode) is
/// deterministic regardless of catalog ordering. Totals are recomputed
/// from the entries on every read; there is no cached figure to drift.
///
/// # Invariants
///
/// - `current_allocation == sum of entry values`
/// - No entry value is ever negative or zero
/// - `remaining` may go negative: over-allocation is a warning, not an
///   error, and commit stays permitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationLedger {
    /// The total the entries should sum to.
    target_total: Decimal,
    /// The unit every value in this ledger is denominated in.
    unit: LedgerUnit,
    /// Insertion-ordered entries; zero values are removed, not stored.
    entries: Vec<(EntityId, AllocValue)>,
}

impl AllocationLedger {
    /// Creates an empty ledger.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTarget` if the target is negative.
    pub fn new(target_total: Decimal, unit: LedgerUnit) -> DomainResult<Self> {
        if target_total.is_sign_negative() {
            return Err(DomainError::InvalidTarget(
                "target total must not be negative".to_string(),
            ));
        }
        Ok(Self {
            target_total,
            unit,
            entries: Vec::new(),
        })
    }

    /// Reconstructs a ledger from previously serialized entries.
    ///
    /// Never fails. Entries referencing an id unknown to the catalog are
    /// dropped as stale (the entity may have been removed after the order
    /// was drafted), as are entries with non-positive values; both are
    /// logged. A negative target clamps to zero.
    #[must_use]
    pub fn decode<I>(
        target_total: Decimal,
        unit: LedgerUnit,
        raw_entries: I,
        catalog: &dyn CapacityCatalog,
    ) -> Self
    where
        I: IntoIterator<Item = (EntityId, Decimal)>,
    {
        let target_total = if target_total.is_sign_negative() {
            Decimal::ZERO
        } else {
            target_total
        };
        let mut ledger = Self {
            target_total,
            unit,
            entries: Vec::new(),
        };
        for (entity_id, value) in raw_entries {
            if value <= Decimal::ZERO {
                tracing::warn!(entity_id = %entity_id, %value, "dropping non-positive allocation entry");
                continue;
            }
            if !catalog.contains(&entity_id) {
                tracing::warn!(entity_id = %entity_id, "dropping allocation entry for unknown entity");
                continue;
            }
            ledger.set_entry(entity_id, AllocValue::new(value));
        }
        ledger
    }

    /// Sets the allocation for one entity.
    ///
    /// A zero value removes the entry. Updating an existing entry keeps
    /// its insertion position. Totals reflect the change immediately.
    pub fn set_entry(&mut self, entity_id: EntityId, value: AllocValue) {
        match self.entries.iter().position(|(id, _)| *id == entity_id) {
            Some(idx) => {
                if value.is_zero() {
                    self.entries.remove(idx);
                } else if let Some(slot) = self.entries.get_mut(idx) {
                    slot.1 = value;
                }
            }
            None => {
                if value.is_positive() {
                    self.entries.push((entity_id, value));
                }
            }
        }
    }

    /// Returns the allocation for one entity, zero if absent.
    #[must_use]
    pub fn get(&self, entity_id: &EntityId) -> AllocValue {
        self.entries
            .iter()
            .find(|(id, _)| id == entity_id)
            .map(|(_, v)| *v)
            .unwrap_or(AllocValue::ZERO)
    }

    /// Returns true if the entity has a positive allocation.
    #[must_use]
    pub fn contains(&self, entity_id: &EntityId) -> bool {
        self.entries.iter().any(|(id, _)| id == entity_id)
    }

    /// Returns the sum of all entry values.
    #[must_use]
    pub fn current_allocation(&self) -> Decimal {
        self.entries
            .iter()
            .fold(Decimal::ZERO, |acc, (_, v)| acc.saturating_add(v.get()))
    }

    /// Returns the unallocated balance: target minus allocated.
    ///
    /// Negative when the ledger is over-allocated.
    #[must_use]
    pub fn remaining(&self) -> Decimal {
        self.target_total.saturating_sub(self.current_allocation())
    }

    /// Returns the ceiling one entity could still take if every other
    /// allocation stays fixed.
    ///
    /// Used to compute "max out" suggestions. Negative when the rest of
    /// the ledger already exceeds the target on its own.
    #[must_use]
    pub fn remaining_for(&self, entity_id: &EntityId) -> Decimal {
        self.remaining().saturating_add(self.get(entity_id).get())
    }

    /// Returns the derived completion status.
    #[must_use]
    pub fn status(&self) -> AllocationStatus {
        AllocationStatus::from_remaining(self.remaining())
    }

    /// Returns true if the target is met within tolerance.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status().is_complete()
    }

    /// Returns true if more than the target has been allocated.
    #[must_use]
    pub fn is_over_allocated(&self) -> bool {
        self.status().is_over_allocated()
    }

    /// Serializes the positive entries in insertion order.
    #[must_use]
    pub fn encode(&self) -> Vec<AllocationEntry> {
        self.entries
            .iter()
            .map(|(id, v)| AllocationEntry::new(id.clone(), *v))
            .collect()
    }

    /// Returns the target total.
    #[inline]
    #[must_use]
    pub const fn target_total(&self) -> Decimal {
        self.target_total
    }

    /// Returns the ledger unit.
    #[inline]
    #[must_use]
    pub const fn unit(&self) -> &LedgerUnit {
        &self.unit
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entity has an allocation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(entity_id, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&EntityId, AllocValue)> {
        self.entries.iter().map(|(id, v)| (id, *v))
    }
}

impl fmt::Display for AllocationLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AllocationLedger(unit={}, target={}, allocated={}, entries={})",
            self.unit,
            self.target_total,
            self.current_allocation(),
            self.entries.len(),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::capacity_entity::CapacityEntity;
    use crate::domain::value_objects::CurrencyCode;
    use crate::infrastructure::catalog::InMemoryCapacityCatalog;
    use rust_decimal_macros::dec;

    fn usd() -> CurrencyCode {
        CurrencyCode::new("USD").unwrap()
    }

    fn catalog_with(ids: &[&str]) -> InMemoryCapacityCatalog {
        let catalog = InMemoryCapacityCatalog::new();
        for id in ids {
            catalog.insert(CapacityEntity::cash_account(
                EntityId::new(*id),
                format!("Account {id}"),
                usd(),
                AllocValue::new(dec!(100000)),
            ));
        }
        catalog
    }

    fn shares_ledger(target: Decimal) -> AllocationLedger {
        AllocationLedger::new(target, LedgerUnit::Shares).unwrap()
    }

    mod construction {
        use super::*;

        #[test]
        fn new_starts_empty() {
            let ledger = shares_ledger(dec!(100));
            assert!(ledger.is_empty());
            assert_eq!(ledger.current_allocation(), Decimal::ZERO);
            assert_eq!(ledger.remaining(), dec!(100));
        }

        #[test]
        fn new_rejects_negative_target() {
            assert!(matches!(
                AllocationLedger::new(dec!(-1), LedgerUnit::Shares),
                Err(DomainError::InvalidTarget(_))
            ));
        }

        #[test]
        fn zero_target_is_allowed() {
            let ledger = shares_ledger(Decimal::ZERO);
            assert!(ledger.status().is_complete());
        }
    }

    mod set_entry {
        use super::*;

        #[test]
        fn adds_and_updates() {
            let mut ledger = shares_ledger(dec!(100));
            let id = EntityId::new("a");
            ledger.set_entry(id.clone(), AllocValue::new(dec!(30)));
            assert_eq!(ledger.get(&id).get(), dec!(30));

            ledger.set_entry(id.clone(), AllocValue::new(dec!(45)));
            assert_eq!(ledger.get(&id).get(), dec!(45));
            assert_eq!(ledger.len(), 1);
        }

        #[test]
        fn zero_removes_entry() {
            let mut ledger = shares_ledger(dec!(100));
            let id = EntityId::new("a");
            ledger.set_entry(id.clone(), AllocValue::new(dec!(30)));
            ledger.set_entry(id.clone(), AllocValue::ZERO);
            assert!(!ledger.contains(&id));
            assert!(ledger.encode().is_empty());
        }

        #[test]
        fn zeroing_is_idempotent() {
            let mut ledger = shares_ledger(dec!(100));
            let id = EntityId::new("a");
            ledger.set_entry(id.clone(), AllocValue::new(dec!(30)));
            ledger.set_entry(id.clone(), AllocValue::ZERO);
            let after_first = ledger.clone();
            ledger.set_entry(id.clone(), AllocValue::ZERO);
            assert_eq!(ledger, after_first);
            assert!(!ledger.encode().iter().any(|e| e.entity_id == id));
        }

        #[test]
        fn zero_on_absent_entity_is_noop() {
            let mut ledger = shares_ledger(dec!(100));
            ledger.set_entry(EntityId::new("ghost"), AllocValue::ZERO);
            assert!(ledger.is_empty());
        }

        #[test]
        fn update_keeps_insertion_position() {
            let mut ledger = shares_ledger(dec!(100));
            ledger.set_entry(EntityId::new("a"), AllocValue::new(dec!(10)));
            ledger.set_entry(EntityId::new("b"), AllocValue::new(dec!(20)));
            ledger.set_entry(EntityId::new("a"), AllocValue::new(dec!(15)));

            let encoded = ledger.encode();
            assert_eq!(encoded[0].entity_id.as_str(), "a");
            assert_eq!(encoded[0].value.get(), dec!(15));
            assert_eq!(encoded[1].entity_id.as_str(), "b");
        }
    }

    mod derivation {
        use super::*;

        #[test]
        fn current_allocation_is_sum() {
            let mut ledger = shares_ledger(dec!(100));
            ledger.set_entry(EntityId::new("a"), AllocValue::new(dec!(30)));
            ledger.set_entry(EntityId::new("b"), AllocValue::new(dec!(25.5)));
            assert_eq!(ledger.current_allocation(), dec!(55.5));
            assert_eq!(ledger.remaining(), dec!(44.5));
        }

        #[test]
        fn remaining_goes_negative_on_over_allocation() {
            let mut ledger = shares_ledger(dec!(50));
            ledger.set_entry(EntityId::new("x"), AllocValue::new(dec!(30)));
            ledger.set_entry(EntityId::new("y"), AllocValue::new(dec!(30)));
            assert_eq!(ledger.current_allocation(), dec!(60));
            assert_eq!(ledger.remaining(), dec!(-10));
            assert!(ledger.is_over_allocated());
        }

        #[test]
        fn complete_within_epsilon() {
            let mut ledger = shares_ledger(dec!(100));
            ledger.set_entry(EntityId::new("a"), AllocValue::new(dec!(99.995)));
            assert!(ledger.is_complete());
        }

        #[test]
        fn remaining_for_adds_back_own_entry() {
            let mut ledger = shares_ledger(dec!(200));
            ledger.set_entry(EntityId::new("a"), AllocValue::new(dec!(80)));
            ledger.set_entry(EntityId::new("b"), AllocValue::new(dec!(50)));
            // a could still take: 200 - 130 + 80 = 150
            assert_eq!(ledger.remaining_for(&EntityId::new("a")), dec!(150));
            // a fresh entity is bounded by what is left: 70
            assert_eq!(ledger.remaining_for(&EntityId::new("c")), dec!(70));
        }

        #[test]
        fn remaining_for_on_empty_ledger_is_full_target() {
            let ledger = shares_ledger(dec!(200));
            assert_eq!(ledger.remaining_for(&EntityId::new("a")), dec!(200));
        }
    }

    mod decode {
        use super::*;

        #[test]
        fn decode_keeps_known_entities() {
            let catalog = catalog_with(&["a", "b"]);
            let ledger = AllocationLedger::decode(
                dec!(100),
                LedgerUnit::Shares,
                vec![
                    (EntityId::new("a"), dec!(20)),
                    (EntityId::new("b"), dec!(30)),
                ],
                &catalog,
            );
            assert_eq!(ledger.len(), 2);
            assert_eq!(ledger.current_allocation(), dec!(50));
        }

        #[test]
        fn decode_drops_unknown_entities() {
            let catalog = catalog_with(&["a", "b"]);
            let ledger = AllocationLedger::decode(
                dec!(100),
                LedgerUnit::Shares,
                vec![
                    (EntityId::new("a"), dec!(20)),
                    (EntityId::new("z"), dec!(5)),
                ],
                &catalog,
            );
            assert_eq!(ledger.len(), 1);
            assert_eq!(ledger.get(&EntityId::new("a")).get(), dec!(20));
            assert!(!ledger.contains(&EntityId::new("z")));
        }

        #[test]
        fn decode_drops_non_positive_values() {
            let catalog = catalog_with(&["a", "b", "c"]);
            let ledger = AllocationLedger::decode(
                dec!(100),
                LedgerUnit::Shares,
                vec![
                    (EntityId::new("a"), dec!(0)),
                    (EntityId::new("b"), dec!(-5)),
                    (EntityId::new("c"), dec!(10)),
                ],
                &catalog,
            );
            assert_eq!(ledger.len(), 1);
            assert_eq!(ledger.get(&EntityId::new("c")).get(), dec!(10));
        }

        #[test]
        fn decode_clamps_negative_target() {
            let catalog = catalog_with(&[]);
            let ledger =
                AllocationLedger::decode(dec!(-100), LedgerUnit::Shares, vec![], &catalog);
            assert_eq!(ledger.target_total(), Decimal::ZERO);
        }

        #[test]
        fn roundtrip_encode_decode() {
            let catalog = catalog_with(&["a", "b"]);
            let mut ledger = shares_ledger(dec!(100));
            ledger.set_entry(EntityId::new("a"), AllocValue::new(dec!(60)));
            ledger.set_entry(EntityId::new("b"), AllocValue::new(dec!(40)));

            let raw: Vec<(EntityId, Decimal)> = ledger
                .encode()
                .into_iter()
                .map(|e| (e.entity_id, e.value.get()))
                .collect();
            let back = AllocationLedger::decode(dec!(100), LedgerUnit::Shares, raw, &catalog);
            assert_eq!(back, ledger);
        }
    }

    mod encode {
        use super::*;

        #[test]
        fn encode_preserves_insertion_order() {
            let mut ledger = shares_ledger(dec!(100));
            ledger.set_entry(EntityId::new("z"), AllocValue::new(dec!(1)));
            ledger.set_entry(EntityId::new("a"), AllocValue::new(dec!(2)));
            ledger.set_entry(EntityId::new("m"), AllocValue::new(dec!(3)));

            let encoded = ledger.encode();
            let ids: Vec<&str> = encoded.iter().map(|e| e.entity_id.as_str()).collect();
            assert_eq!(ids, vec!["z", "a", "m"]);
        }

        #[test]
        fn encode_is_all_positive() {
            let mut ledger = shares_ledger(dec!(100));
            ledger.set_entry(EntityId::new("a"), AllocValue::new(dec!(5)));
            ledger.set_entry(EntityId::new("b"), AllocValue::new(dec!(7)));
            ledger.set_entry(EntityId::new("a"), AllocValue::ZERO);
            assert!(ledger.encode().iter().all(|e| e.value.is_positive()));
        }
    }

    mod serde_tests {
        use super::*;

        #[test]
        fn entry_uses_camel_case() {
            let entry = AllocationEntry::new(EntityId::new("cash-1"), AllocValue::new(dec!(10)));
            let json = serde_json::to_string(&entry).unwrap();
            assert!(json.contains("\"entityId\""));
        }

        #[test]
        fn ledger_serde_roundtrip() {
            let mut ledger = shares_ledger(dec!(100));
            ledger.set_entry(EntityId::new("a"), AllocValue::new(dec!(60)));
            let json = serde_json::to_string(&ledger).unwrap();
            let back: AllocationLedger = serde_json::from_str(&json).unwrap();
            assert_eq!(ledger, back);
        }
    }
}
