//! Property-based tests for ledger and session invariants.
//!
//! These tests use proptest to verify that key invariants hold
//! across randomly generated edit sequences.

#![allow(clippy::unwrap_used)]

use order_alloc::domain::entities::capacity_entity::CapacityEntity;
use order_alloc::domain::entities::ledger::AllocationLedger;
use order_alloc::domain::entities::staged_session::{SessionCandidate, StagedEditSession};
use order_alloc::domain::value_objects::{
    AllocValue, CurrencyCode, EntityId, LedgerUnit,
};
use order_alloc::infrastructure::catalog::InMemoryCapacityCatalog;
use proptest::prelude::*;
use rust_decimal::Decimal;

const ENTITY_POOL: [&str; 6] = ["a", "b", "c", "d", "e", "f"];

fn usd() -> CurrencyCode {
    CurrencyCode::new("USD").unwrap()
}

/// Generate an entity id from the fixed pool.
fn entity_strategy() -> impl Strategy<Value = EntityId> {
    (0..ENTITY_POOL.len()).prop_map(|i| EntityId::new(ENTITY_POOL[i]))
}

/// Generate a raw edit value, including garbage the engine must absorb.
fn value_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        8 => 0.0f64..100_000.0,
        1 => -100_000.0f64..0.0,
        1 => Just(f64::NAN),
        1 => Just(f64::INFINITY),
    ]
}

/// Generate a sequence of (entity, value) edits.
fn edits_strategy() -> impl Strategy<Value = Vec<(EntityId, f64)>> {
    prop::collection::vec((entity_strategy(), value_strategy()), 0..40)
}

fn pool_catalog() -> InMemoryCapacityCatalog {
    InMemoryCapacityCatalog::with_entities(ENTITY_POOL.iter().map(|id| {
        CapacityEntity::cash_account(
            EntityId::new(*id),
            format!("Account {id}"),
            usd(),
            AllocValue::new(Decimal::new(1_000_000, 0)),
        )
    }))
}

fn apply_edits(ledger: &mut AllocationLedger, edits: &[(EntityId, f64)]) {
    for (id, value) in edits {
        ledger.set_entry(id.clone(), AllocValue::from_input(*value));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // ========================================================================
    // SUM AND SIGN INVARIANTS
    // ========================================================================

    /// The allocated total always equals the sum of the entries.
    #[test]
    fn sum_consistency(edits in edits_strategy()) {
        let mut ledger = AllocationLedger::new(Decimal::new(1000, 0), LedgerUnit::Shares).unwrap();
        apply_edits(&mut ledger, &edits);

        let summed = ledger
            .iter()
            .fold(Decimal::ZERO, |acc, (_, v)| acc + v.get());
        prop_assert_eq!(ledger.current_allocation(), summed);
    }

    /// No entry is ever negative, whatever the input stream looked like.
    #[test]
    fn non_negativity(edits in edits_strategy()) {
        let mut ledger = AllocationLedger::new(Decimal::new(1000, 0), LedgerUnit::Shares).unwrap();
        apply_edits(&mut ledger, &edits);

        for (_, value) in ledger.iter() {
            prop_assert!(!value.get().is_sign_negative());
        }
        for entry in ledger.encode() {
            prop_assert!(entry.value.is_positive());
        }
    }

    /// Remaining plus allocated always reconstructs the target.
    #[test]
    fn remaining_complements_allocation(edits in edits_strategy()) {
        let target = Decimal::new(1000, 0);
        let mut ledger = AllocationLedger::new(target, LedgerUnit::Shares).unwrap();
        apply_edits(&mut ledger, &edits);

        prop_assert_eq!(ledger.remaining() + ledger.current_allocation(), target);
    }

    // ========================================================================
    // ROUND-TRIP AND IDEMPOTENCE
    // ========================================================================

    /// encode -> decode reproduces the ledger exactly.
    #[test]
    fn encode_decode_roundtrip(edits in edits_strategy()) {
        let catalog = pool_catalog();
        let mut ledger = AllocationLedger::new(Decimal::new(1000, 0), LedgerUnit::Shares).unwrap();
        apply_edits(&mut ledger, &edits);

        let raw: Vec<(EntityId, Decimal)> = ledger
            .encode()
            .into_iter()
            .map(|e| (e.entity_id, e.value.get()))
            .collect();
        let decoded = AllocationLedger::decode(
            Decimal::new(1000, 0),
            LedgerUnit::Shares,
            raw,
            &catalog,
        );

        prop_assert_eq!(decoded, ledger);
    }

    /// Zeroing an entry twice is the same as zeroing it once, and the
    /// entity disappears from the encoding.
    #[test]
    fn zeroing_is_idempotent(edits in edits_strategy(), target in entity_strategy()) {
        let mut ledger = AllocationLedger::new(Decimal::new(1000, 0), LedgerUnit::Shares).unwrap();
        apply_edits(&mut ledger, &edits);

        ledger.set_entry(target.clone(), AllocValue::ZERO);
        let once = ledger.clone();
        ledger.set_entry(target.clone(), AllocValue::ZERO);

        prop_assert_eq!(&ledger, &once);
        prop_assert!(!ledger.encode().iter().any(|e| e.entity_id == target));
    }

    // ========================================================================
    // SESSION ISOLATION
    // ========================================================================

    /// However a session's working copy is edited, the underlying ledger
    /// is byte-identical until commit.
    #[test]
    fn session_isolation(
        committed in edits_strategy(),
        staged in edits_strategy(),
    ) {
        let mut ledger = AllocationLedger::new(Decimal::new(1000, 0), LedgerUnit::Shares).unwrap();
        apply_edits(&mut ledger, &committed);
        let snapshot = ledger.clone();

        let candidates: Vec<SessionCandidate> = ENTITY_POOL
            .iter()
            .map(|id| {
                SessionCandidate::new(
                    EntityId::new(*id),
                    format!("Account {id}"),
                    usd(),
                    AllocValue::new(Decimal::new(1_000_000, 0)),
                )
            })
            .collect();
        let mut session = StagedEditSession::open(&ledger, candidates);
        for (id, value) in &staged {
            session.set_working(id, AllocValue::from_input(*value)).unwrap();
        }

        prop_assert_eq!(&ledger, &snapshot);

        session.discard();
        prop_assert_eq!(&ledger, &snapshot);
    }

    /// After a commit, every in-scope entity carries exactly its staged
    /// value and the ledger total matches the session's working total.
    #[test]
    fn commit_applies_working_exactly(
        committed in edits_strategy(),
        staged in edits_strategy(),
    ) {
        let mut ledger = AllocationLedger::new(Decimal::new(1000, 0), LedgerUnit::Shares).unwrap();
        apply_edits(&mut ledger, &committed);

        let candidates: Vec<SessionCandidate> = ENTITY_POOL
            .iter()
            .map(|id| {
                SessionCandidate::new(
                    EntityId::new(*id),
                    format!("Account {id}"),
                    usd(),
                    AllocValue::new(Decimal::new(1_000_000, 0)),
                )
            })
            .collect();
        let mut session = StagedEditSession::open(&ledger, candidates);
        for (id, value) in &staged {
            session.set_working(id, AllocValue::from_input(*value)).unwrap();
        }

        let expected: Vec<(EntityId, AllocValue)> = ENTITY_POOL
            .iter()
            .map(|id| {
                let id = EntityId::new(*id);
                let value = session.working_value(&id);
                (id, value)
            })
            .collect();
        let expected_total = session.working_total();

        let _ = session.commit(&mut ledger);

        for (id, value) in expected {
            prop_assert_eq!(ledger.get(&id), value);
        }
        prop_assert_eq!(ledger.current_allocation(), expected_total);
    }
}
