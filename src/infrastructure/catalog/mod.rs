//! # Catalog Implementations
//!
//! Concrete [`CapacityCatalog`](crate::domain::catalog::CapacityCatalog)
//! implementations.

pub mod in_memory;

pub use in_memory::InMemoryCapacityCatalog;
