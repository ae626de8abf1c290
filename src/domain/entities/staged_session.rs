//! # Staged Edit Session
//!
//! A transactional working copy of a ledger subset.
//!
//! This module provides the [`StagedEditSession`] entity used while a
//! selection sheet or modal is open. The session clones the in-scope part
//! of a ledger into a working copy, absorbs any number of edits, and then
//! either commits the whole batch into the ledger or is discarded without
//! ever having touched it. A half-finished edit can therefore never
//! corrupt the committed order.
//!
//! The scope is the session's candidate list, resolved by the orchestrator
//! when the sheet opens: entities outside it are invisible to the session
//! and cannot be touched, so committing a cash-account session never clears
//! credit-facility allocations living in the same ledger.
//!
//! # Examples
//!
//! ```
//! use order_alloc::domain::entities::ledger::AllocationLedger;
//! use order_alloc::domain::entities::staged_session::{SessionCandidate, StagedEditSession};
//! use order_alloc::domain::value_objects::{AllocValue, CurrencyCode, EntityId, LedgerUnit};
//! use rust_decimal_macros::dec;
//!
//! let mut ledger = AllocationLedger::new(dec!(1000), LedgerUnit::Shares).unwrap();
//! let candidates = vec![SessionCandidate::new(
//!     EntityId::new("port-1"),
//!     "Growth Mandate",
//!     CurrencyCode::new("USD").unwrap(),
//!     AllocValue::new(dec!(5000)),
//! )];
//!
//! let mut session = StagedEditSession::open(&ledger, candidates);
//! session.set_working(&EntityId::new("port-1"), AllocValue::new(dec!(1000))).unwrap();
//!
//! // The ledger is untouched until commit.
//! assert!(ledger.is_empty());
//! let entries = session.commit(&mut ledger);
//! assert_eq!(entries.len(), 1);
//! assert!(ledger.is_complete());
//! ```

use crate::domain::entities::capacity_entity::CapacityEntity;
use crate::domain::entities::ledger::{AllocationEntry, AllocationLedger};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{
    AllocValue, AllocationStatus, CurrencyCode, EntityId, LedgerUnit, SessionId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One entity visible inside a staged edit session.
///
/// Carries the *effective* capacity for this session: the orchestrator may
/// tighten the catalog figure (e.g., a sell-side portfolio is capped by its
/// holding of the instrument, not its whole balance).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCandidate {
    entity_id: EntityId,
    display_name: String,
    currency: CurrencyCode,
    capacity: AllocValue,
}

impl SessionCandidate {
    /// Creates a candidate.
    #[must_use]
    pub fn new(
        entity_id: EntityId,
        display_name: impl Into<String>,
        currency: CurrencyCode,
        capacity: AllocValue,
    ) -> Self {
        Self {
            entity_id,
            display_name: display_name.into(),
            currency,
            capacity,
        }
    }

    /// Creates a candidate straight from a catalog entity.
    #[must_use]
    pub fn from_entity(entity: &CapacityEntity) -> Self {
        Self::new(
            entity.id().clone(),
            entity.display_name(),
            entity.currency().clone(),
            entity.available_capacity(),
        )
    }

    /// Replaces the effective capacity.
    #[must_use]
    pub fn with_capacity(mut self, capacity: AllocValue) -> Self {
        self.capacity = capacity;
        self
    }

    /// Returns the entity id.
    #[inline]
    #[must_use]
    pub fn entity_id(&self) -> &EntityId {
        &self.entity_id
    }

    /// Returns the display name.
    #[inline]
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the entity currency.
    #[inline]
    #[must_use]
    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    /// Returns the effective capacity for this session.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> AllocValue {
        self.capacity
    }
}

/// A transactional working copy over a scoped subset of a ledger.
///
/// # Terminal actions
///
/// - [`commit`](Self::commit) — writes the working values for every
///   in-scope entity back into the ledger (adding, updating, and zeroing
///   deselected ones), then returns the ledger's full encoding
/// - [`discard`](Self::discard) — drops the working copy; the ledger was
///   never touched, so there is nothing to roll back
///
/// Both consume the session. If two sessions over the same entity commit
/// in turn, the later commit wins; no merge is attempted.
#[derive(Debug, Clone)]
pub struct StagedEditSession {
    id: SessionId,
    candidates: Vec<SessionCandidate>,
    baseline: Vec<(EntityId, AllocValue)>,
    working: Vec<(EntityId, AllocValue)>,
    target_total: Decimal,
    unit: LedgerUnit,
}

impl StagedEditSession {
    /// Opens a session over the given candidates.
    ///
    /// The ledger's entries for in-scope entities are cloned into the
    /// working copy; everything else in the ledger is invisible here.
    #[must_use]
    pub fn open(ledger: &AllocationLedger, candidates: Vec<SessionCandidate>) -> Self {
        let in_scope: Vec<(EntityId, AllocValue)> = ledger
            .iter()
            .filter(|(id, _)| candidates.iter().any(|c| c.entity_id() == *id))
            .map(|(id, v)| (id.clone(), v))
            .collect();
        Self {
            id: SessionId::new_v4(),
            candidates,
            baseline: in_scope.clone(),
            working: in_scope,
            target_total: ledger.target_total(),
            unit: ledger.unit().clone(),
        }
    }

    /// Returns the session id.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> SessionId {
        self.id
    }

    /// Returns the candidates visible in this session.
    #[must_use]
    pub fn candidates(&self) -> &[SessionCandidate] {
        &self.candidates
    }

    /// Returns the candidate for an entity, if in scope.
    #[must_use]
    pub fn candidate(&self, entity_id: &EntityId) -> Option<&SessionCandidate> {
        self.candidates.iter().find(|c| c.entity_id() == entity_id)
    }

    /// Returns true if the entity is inside the session scope.
    #[must_use]
    pub fn in_scope(&self, entity_id: &EntityId) -> bool {
        self.candidate(entity_id).is_some()
    }

    /// Stages a value for one entity.
    ///
    /// Same semantics as the ledger's `set_entry`: zero removes the
    /// staged entry, and the value has already been sanitized by
    /// [`AllocValue`]'s constructors.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EntityOutOfScope` if the entity is not among
    /// the session's candidates.
    pub fn set_working(&mut self, entity_id: &EntityId, value: AllocValue) -> DomainResult<()> {
        if !self.in_scope(entity_id) {
            return Err(DomainError::EntityOutOfScope(entity_id.clone()));
        }
        match self.working.iter().position(|(id, _)| id == entity_id) {
            Some(idx) => {
                if value.is_zero() {
                    self.working.remove(idx);
                } else if let Some(slot) = self.working.get_mut(idx) {
                    slot.1 = value;
                }
            }
            None => {
                if value.is_positive() {
                    self.working.push((entity_id.clone(), value));
                }
            }
        }
        Ok(())
    }

    /// Returns the staged value for one entity, zero if absent.
    #[must_use]
    pub fn working_value(&self, entity_id: &EntityId) -> AllocValue {
        self.working
            .iter()
            .find(|(id, _)| id == entity_id)
            .map(|(_, v)| *v)
            .unwrap_or(AllocValue::ZERO)
    }

    /// Returns the sum of all staged values.
    #[must_use]
    pub fn working_total(&self) -> Decimal {
        self.working
            .iter()
            .fold(Decimal::ZERO, |acc, (_, v)| acc.saturating_add(v.get()))
    }

    /// Returns the unallocated balance of the working copy.
    #[must_use]
    pub fn working_remaining(&self) -> Decimal {
        self.target_total.saturating_sub(self.working_total())
    }

    /// Returns the derived completion status of the working copy.
    #[must_use]
    pub fn working_status(&self) -> AllocationStatus {
        AllocationStatus::from_remaining(self.working_remaining())
    }

    /// Suggests the largest sensible value for one entity: its effective
    /// capacity, bounded by what the working copy still has to fill if
    /// every other staged value stays fixed.
    ///
    /// Floors at zero when the rest of the working copy already exceeds
    /// the target on its own.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EntityOutOfScope` if the entity is not among
    /// the session's candidates.
    pub fn suggest_max(&self, entity_id: &EntityId) -> DomainResult<AllocValue> {
        let candidate = self
            .candidate(entity_id)
            .ok_or_else(|| DomainError::EntityOutOfScope(entity_id.clone()))?;
        let headroom = self
            .working_remaining()
            .saturating_add(self.working_value(entity_id).get());
        Ok(AllocValue::new(headroom).min(candidate.capacity()))
    }

    /// Returns true if the staged value exceeds the entity's effective
    /// capacity. A warning state only; commit stays permitted because
    /// capacity figures are a snapshot that may be stale.
    #[must_use]
    pub fn capacity_exceeded(&self, entity_id: &EntityId) -> bool {
        match self.candidate(entity_id) {
            Some(candidate) => self.working_value(entity_id).get() > candidate.capacity().get(),
            None => false,
        }
    }

    /// Returns true if the working copy differs from the baseline taken
    /// at open.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.working != self.baseline
    }

    /// Applies the working copy to the ledger and returns the ledger's
    /// full encoding for the caller to push into the order shell.
    ///
    /// Every in-scope entity is written: entities staged at zero (or
    /// deselected) are removed from the ledger, everything else is set to
    /// its staged value. Ledger keys outside the scope are left alone.
    /// The session is consumed; the commit is complete when this returns.
    #[must_use = "the returned entries must be pushed into the order shell"]
    pub fn commit(self, ledger: &mut AllocationLedger) -> Vec<AllocationEntry> {
        for candidate in &self.candidates {
            let value = self.working_value(candidate.entity_id());
            ledger.set_entry(candidate.entity_id().clone(), value);
        }
        ledger.encode()
    }

    /// Drops the session without touching the ledger.
    ///
    /// Closing a sheet without confirming routes here; since the ledger
    /// was never mutated, there is no rollback to perform.
    pub fn discard(self) {
        drop(self);
    }

    /// Returns the target total the working copy is filling toward.
    #[inline]
    #[must_use]
    pub const fn target_total(&self) -> Decimal {
        self.target_total
    }

    /// Returns the unit staged values are denominated in.
    #[inline]
    #[must_use]
    pub const fn unit(&self) -> &LedgerUnit {
        &self.unit
    }
}

impl fmt::Display for StagedEditSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StagedEditSession(id={}, scope={}, staged={})",
            self.id,
            self.candidates.len(),
            self.working.len(),
        )
    }
}
