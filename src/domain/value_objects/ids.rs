//! # Identifier Value Objects
//!
//! Typed identifiers for domain objects.
//!
//! This module provides:
//!
//! - [`EntityId`], [`InstitutionId`]: string-based identifiers supplied by
//!   the capacity catalog
//! - [`OrderId`], [`SessionId`], [`EventId`]: UUID-based identifiers minted
//!   by this crate
//!
//! String identifiers are never parsed for meaning; an entity's kind comes
//! from its catalog record, not from its id text.
//!
//! # Examples
//!
//! ```
//! use order_alloc::domain::value_objects::{EntityId, SessionId};
//!
//! let entity = EntityId::new("acct-operating-usd");
//! assert_eq!(entity.as_str(), "acct-operating-usd");
//!
//! let session = SessionId::new_v4();
//! assert_ne!(session, SessionId::new_v4());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

macro_rules! uuid_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random (v4) identifier.
            #[must_use]
            pub fn new_v4() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID.
            #[inline]
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID.
            #[inline]
            #[must_use]
            pub const fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id!(
    /// Identifier of a capacity entity (cash account, credit facility,
    /// or portfolio) as supplied by the catalog.
    EntityId
);

string_id!(
    /// Identifier of the institution a capacity entity belongs to.
    InstitutionId
);

uuid_id!(
    /// Identifier of a trade order under construction.
    OrderId
);

uuid_id!(
    /// Identifier of a staged edit session.
    SessionId
);

uuid_id!(
    /// Identifier of a domain event.
    EventId
);
