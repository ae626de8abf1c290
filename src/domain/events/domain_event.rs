//! # Domain Event Trait
//!
//! Base trait for all domain events.
//!
//! This module provides the [`DomainEvent`] trait that all domain events
//! must implement, along with common event metadata.

use crate::domain::value_objects::timestamp::Timestamp;
use crate::domain::value_objects::{EventId, OrderId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of domain event.
///
/// Categorizes events by their domain area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// Staged edit session lifecycle events.
    Session,
    /// Allocation serialization events.
    Allocation,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Session => write!(f, "SESSION"),
            Self::Allocation => write!(f, "ALLOCATION"),
        }
    }
}

/// Trait for all domain events.
///
/// Domain events are immutable records of what happened; the enclosing
/// trade-ticket flow drains them for its audit display.
pub trait DomainEvent: Send + Sync + fmt::Debug {
    /// Returns the unique identifier for this event.
    fn event_id(&self) -> EventId;

    /// Returns the order this event relates to, if any.
    fn order_id(&self) -> Option<OrderId>;

    /// Returns when this event occurred.
    fn timestamp(&self) -> Timestamp;

    /// Returns the type/category of this event.
    fn event_type(&self) -> EventType;

    /// Returns the human-readable name of this event.
    fn event_name(&self) -> &'static str;
}

/// Common metadata for all domain events.
///
/// This struct contains the fields common to all events and can be
/// embedded in concrete event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Unique identifier for this event.
    pub event_id: EventId,
    /// The order this event relates to.
    pub order_id: Option<OrderId>,
    /// When this event occurred.
    pub timestamp: Timestamp,
}

impl EventMetadata {
    /// Creates new event metadata with a generated event ID.
    #[must_use]
    pub fn new(order_id: Option<OrderId>) -> Self {
        Self {
            event_id: EventId::new_v4(),
            order_id,
            timestamp: Timestamp::now(),
        }
    }

    /// Creates new event metadata for a specific order.
    #[must_use]
    pub fn for_order(order_id: OrderId) -> Self {
        Self::new(Some(order_id))
    }

    /// Creates event metadata with specific values (for reconstruction).
    #[must_use]
    pub fn from_parts(event_id: EventId, order_id: Option<OrderId>, timestamp: Timestamp) -> Self {
        Self {
            event_id,
            order_id,
            timestamp,
        }
    }
}

impl Default for EventMetadata {
    fn default() -> Self {
        Self::new(None)
    }
}
