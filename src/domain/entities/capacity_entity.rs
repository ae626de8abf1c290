//! # Capacity Entity
//!
//! A candidate account, facility, or portfolio an allocation can draw on
//! or deliver into.
//!
//! This module provides the [`CapacityEntity`] struct. Entities are
//! supplied by the enclosing application (decoded from whatever naming the
//! upstream feed uses) and are immutable inside the engine. The entity's
//! [`EntityKind`] is fixed at construction; nothing downstream ever infers
//! it from the id text.
//!
//! # Examples
//!
//! ```
//! use order_alloc::domain::entities::capacity_entity::CapacityEntity;
//! use order_alloc::domain::value_objects::{AllocValue, CurrencyCode, EntityId};
//! use rust_decimal_macros::dec;
//!
//! let account = CapacityEntity::cash_account(
//!     EntityId::new("cash-1"),
//!     "Operating USD",
//!     CurrencyCode::new("USD").unwrap(),
//!     AllocValue::new(dec!(25000)),
//! );
//!
//! assert!(account.kind().is_funding_source());
//! assert_eq!(account.display_name(), "Operating USD");
//! ```

use crate::domain::value_objects::{AllocValue, CurrencyCode, EntityId, EntityKind, InstitutionId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fundable or depositable entity with a soft capacity ceiling.
///
/// `available_capacity` is a snapshot figure and a *soft* ceiling only:
/// allocating beyond it is flagged as a warning, never forbidden, because
/// the snapshot may be stale by the time the user commits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityEntity {
    /// Unique identifier from the catalog.
    id: EntityId,
    /// Human-readable name shown in selection UIs.
    display_name: String,
    /// The entity's account currency.
    currency: CurrencyCode,
    /// Soft ceiling on what this entity can contribute or receive.
    available_capacity: AllocValue,
    /// What the entity is; fixed at ingestion.
    kind: EntityKind,
    /// The institution this entity belongs to, when known.
    parent_institution_id: Option<InstitutionId>,
}

impl CapacityEntity {
    /// Creates an entity of the given kind.
    #[must_use]
    pub fn new(
        id: EntityId,
        display_name: impl Into<String>,
        currency: CurrencyCode,
        available_capacity: AllocValue,
        kind: EntityKind,
    ) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            currency,
            available_capacity,
            kind,
            parent_institution_id: None,
        }
    }

    /// Creates a cash account entity.
    #[must_use]
    pub fn cash_account(
        id: EntityId,
        display_name: impl Into<String>,
        currency: CurrencyCode,
        balance: AllocValue,
    ) -> Self {
        Self::new(id, display_name, currency, balance, EntityKind::Cash)
    }

    /// Creates a credit facility entity.
    #[must_use]
    pub fn credit_facility(
        id: EntityId,
        display_name: impl Into<String>,
        currency: CurrencyCode,
        available_limit: AllocValue,
    ) -> Self {
        Self::new(id, display_name, currency, available_limit, EntityKind::Credit)
    }

    /// Creates a portfolio entity.
    #[must_use]
    pub fn portfolio(
        id: EntityId,
        display_name: impl Into<String>,
        currency: CurrencyCode,
        capacity: AllocValue,
    ) -> Self {
        Self::new(id, display_name, currency, capacity, EntityKind::Portfolio)
    }

    /// Attaches the owning institution.
    #[must_use]
    pub fn with_parent(mut self, institution_id: InstitutionId) -> Self {
        self.parent_institution_id = Some(institution_id);
        self
    }

    /// Returns the entity id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &EntityId {
        &self.id
    }

    /// Returns the display name.
    #[inline]
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the account currency.
    #[inline]
    #[must_use]
    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    /// Returns the soft capacity ceiling.
    #[inline]
    #[must_use]
    pub fn available_capacity(&self) -> AllocValue {
        self.available_capacity
    }

    /// Returns the entity kind.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Returns the owning institution, if known.
    #[inline]
    #[must_use]
    pub fn parent_institution_id(&self) -> Option<&InstitutionId> {
        self.parent_institution_id.as_ref()
    }
}

impl fmt::Display for CapacityEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CapacityEntity(id={}, kind={}, currency={}, capacity={})",
            self.id, self.kind, self.currency, self.available_capacity,
        )
    }
}
