//! # Capacity Catalog Port
//!
//! Read-only lookup interface over the candidate entities.
//!
//! The catalog is owned by the enclosing application; ledgers and
//! orchestrators receive it by injection and never hold module-level
//! constants. Lookups are synchronous: the engine runs entirely inside
//! user-interaction callbacks with no suspension points.
//!
//! # Examples
//!
//! ```
//! use order_alloc::domain::catalog::CapacityCatalog;
//! use order_alloc::domain::entities::capacity_entity::CapacityEntity;
//! use order_alloc::domain::value_objects::{AllocValue, CurrencyCode, EntityId, EntityKind};
//! use order_alloc::infrastructure::catalog::InMemoryCapacityCatalog;
//! use rust_decimal_macros::dec;
//!
//! let catalog = InMemoryCapacityCatalog::new();
//! catalog.insert(CapacityEntity::cash_account(
//!     EntityId::new("cash-1"),
//!     "Operating USD",
//!     CurrencyCode::new("USD").unwrap(),
//!     AllocValue::new(dec!(1000)),
//! ));
//!
//! assert!(catalog.find_by_id(&EntityId::new("cash-1")).is_some());
//! assert_eq!(catalog.of_kind(EntityKind::Portfolio).len(), 0);
//! ```

use crate::domain::entities::capacity_entity::CapacityEntity;
use crate::domain::value_objects::{EntityId, EntityKind};
use std::fmt;

/// Read-only lookup over candidate capacity entities.
///
/// Implementations must be cheap to query repeatedly; the engine re-checks
/// entity existence during decode and serialization.
pub trait CapacityCatalog: fmt::Debug {
    /// Looks up an entity by id.
    fn find_by_id(&self, id: &EntityId) -> Option<CapacityEntity>;

    /// Returns all entities in the catalog.
    fn all(&self) -> Vec<CapacityEntity>;

    /// Returns all entities of the given kind.
    fn of_kind(&self, kind: EntityKind) -> Vec<CapacityEntity> {
        self.all().into_iter().filter(|e| e.kind() == kind).collect()
    }

    /// Returns true if the id references a known entity.
    fn contains(&self, id: &EntityId) -> bool {
        self.find_by_id(id).is_some()
    }
}
