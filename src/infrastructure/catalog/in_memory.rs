//! # In-Memory Capacity Catalog
//!
//! In-memory implementation of [`CapacityCatalog`] for tests and the
//! enclosing application shell.
//!
//! Uses a `parking_lot::RwLock` around a `BTreeMap` so the shell can
//! refresh capacity snapshots while selection UIs keep querying; the
//! engine itself only ever reads. The ordered map keeps `all` and
//! `of_kind` deterministic, which in turn keeps session candidate
//! lists and freshly committed entry order stable across runs.

use crate::domain::catalog::CapacityCatalog;
use crate::domain::entities::capacity_entity::CapacityEntity;
use crate::domain::value_objects::{EntityId, EntityKind};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

/// In-memory implementation of [`CapacityCatalog`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryCapacityCatalog {
    storage: Arc<RwLock<BTreeMap<EntityId, CapacityEntity>>>,
}

impl InMemoryCapacityCatalog {
    /// Creates a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog pre-loaded with the given entities.
    #[must_use]
    pub fn with_entities(entities: impl IntoIterator<Item = CapacityEntity>) -> Self {
        let catalog = Self::new();
        for entity in entities {
            catalog.insert(entity);
        }
        catalog
    }

    /// Inserts or replaces an entity.
    pub fn insert(&self, entity: CapacityEntity) {
        let mut storage = self.storage.write();
        storage.insert(entity.id().clone(), entity);
    }

    /// Removes an entity, returning true if it was present.
    pub fn remove(&self, id: &EntityId) -> bool {
        let mut storage = self.storage.write();
        storage.remove(id).is_some()
    }

    /// Returns the number of entities in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage.read().len()
    }

    /// Returns true if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears all entities.
    pub fn clear(&self) {
        self.storage.write().clear();
    }
}

impl CapacityCatalog for InMemoryCapacityCatalog {
    fn find_by_id(&self, id: &EntityId) -> Option<CapacityEntity> {
        self.storage.read().get(id).cloned()
    }

    fn all(&self) -> Vec<CapacityEntity> {
        self.storage.read().values().cloned().collect()
    }

    fn of_kind(&self, kind: EntityKind) -> Vec<CapacityEntity> {
        self.storage
            .read()
            .values()
            .filter(|e| e.kind() == kind)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{AllocValue, CurrencyCode};
    use rust_decimal_macros::dec;

    fn usd() -> CurrencyCode {
        CurrencyCode::new("USD").unwrap()
    }

    fn cash(id: &str) -> CapacityEntity {
        CapacityEntity::cash_account(
            EntityId::new(id),
            format!("Account {id}"),
            usd(),
            AllocValue::new(dec!(1000)),
        )
    }

    #[test]
    fn new_catalog_is_empty() {
        let catalog = InMemoryCapacityCatalog::new();
        assert!(catalog.is_empty());
        assert!(catalog.all().is_empty());
    }

    #[test]
    fn insert_and_find() {
        let catalog = InMemoryCapacityCatalog::new();
        catalog.insert(cash("cash-1"));

        let found = catalog.find_by_id(&EntityId::new("cash-1"));
        assert!(found.is_some());
        assert_eq!(found.unwrap().id().as_str(), "cash-1");
    }

    #[test]
    fn find_nonexistent_returns_none() {
        let catalog = InMemoryCapacityCatalog::new();
        assert!(catalog.find_by_id(&EntityId::new("ghost")).is_none());
        assert!(!catalog.contains(&EntityId::new("ghost")));
    }

    #[test]
    fn insert_replaces_existing() {
        let catalog = InMemoryCapacityCatalog::new();
        catalog.insert(cash("cash-1"));
        catalog.insert(CapacityEntity::cash_account(
            EntityId::new("cash-1"),
            "Renamed",
            usd(),
            AllocValue::new(dec!(2000)),
        ));

        assert_eq!(catalog.len(), 1);
        let found = catalog.find_by_id(&EntityId::new("cash-1")).unwrap();
        assert_eq!(found.display_name(), "Renamed");
    }

    #[test]
    fn of_kind_filters() {
        let catalog = InMemoryCapacityCatalog::with_entities([
            cash("cash-1"),
            CapacityEntity::portfolio(
                EntityId::new("port-1"),
                "Mandate",
                usd(),
                AllocValue::new(dec!(100)),
            ),
        ]);

        assert_eq!(catalog.of_kind(EntityKind::Cash).len(), 1);
        assert_eq!(catalog.of_kind(EntityKind::Portfolio).len(), 1);
        assert_eq!(catalog.of_kind(EntityKind::Credit).len(), 0);
    }

    #[test]
    fn remove_deletes() {
        let catalog = InMemoryCapacityCatalog::new();
        catalog.insert(cash("cash-1"));
        assert!(catalog.remove(&EntityId::new("cash-1")));
        assert!(!catalog.remove(&EntityId::new("cash-1")));
        assert!(catalog.is_empty());
    }

    #[test]
    fn clones_share_storage() {
        let catalog = InMemoryCapacityCatalog::new();
        let view = catalog.clone();
        catalog.insert(cash("cash-1"));
        assert_eq!(view.len(), 1);
    }
}
