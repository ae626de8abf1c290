//! # Session Events
//!
//! Domain events for the staged-edit session lifecycle.
//!
//! # Event Flow
//!
//! ```text
//! SessionOpened -> SessionCommitted
//!              -> SessionDiscarded
//! ```

use crate::domain::entities::ledger::AllocationEntry;
use crate::domain::events::domain_event::{DomainEvent, EventMetadata, EventType};
use crate::domain::value_objects::timestamp::Timestamp;
use crate::domain::value_objects::{EventId, OrderId, OrderSide, SessionId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Event emitted when a staged edit session is opened over a ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOpened {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// The opened session.
    pub session_id: SessionId,
    /// The order side the session belongs to.
    pub side: OrderSide,
    /// Number of candidate entities visible in the session.
    pub candidate_count: usize,
}

impl SessionOpened {
    /// Creates a new `SessionOpened` event.
    #[must_use]
    pub fn new(
        order_id: OrderId,
        session_id: SessionId,
        side: OrderSide,
        candidate_count: usize,
    ) -> Self {
        Self {
            metadata: EventMetadata::for_order(order_id),
            session_id,
            side,
            candidate_count,
        }
    }
}

impl DomainEvent for SessionOpened {
    fn event_id(&self) -> EventId {
        self.metadata.event_id
    }

    fn order_id(&self) -> Option<OrderId> {
        self.metadata.order_id
    }

    fn timestamp(&self) -> Timestamp {
        self.metadata.timestamp
    }

    fn event_type(&self) -> EventType {
        EventType::Session
    }

    fn event_name(&self) -> &'static str {
        "SessionOpened"
    }
}

/// Event emitted when a staged edit session commits into its ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCommitted {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// The committed session.
    pub session_id: SessionId,
    /// The order side the session belongs to.
    pub side: OrderSide,
    /// The ledger's full entry list after the commit.
    pub entries: Vec<AllocationEntry>,
    /// The ledger's allocated total after the commit.
    pub allocated_total: Decimal,
}

impl SessionCommitted {
    /// Creates a new `SessionCommitted` event.
    #[must_use]
    pub fn new(
        order_id: OrderId,
        session_id: SessionId,
        side: OrderSide,
        entries: Vec<AllocationEntry>,
        allocated_total: Decimal,
    ) -> Self {
        Self {
            metadata: EventMetadata::for_order(order_id),
            session_id,
            side,
            entries,
            allocated_total,
        }
    }
}

impl DomainEvent for SessionCommitted {
    fn event_id(&self) -> EventId {
        self.metadata.event_id
    }

    fn order_id(&self) -> Option<OrderId> {
        self.metadata.order_id
    }

    fn timestamp(&self) -> Timestamp {
        self.metadata.timestamp
    }

    fn event_type(&self) -> EventType {
        EventType::Session
    }

    fn event_name(&self) -> &'static str {
        "SessionCommitted"
    }
}

/// Event emitted when a staged edit session is discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDiscarded {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// The discarded session.
    pub session_id: SessionId,
    /// The order side the session belonged to.
    pub side: OrderSide,
    /// Whether the working copy differed from its baseline when dropped.
    pub had_unsaved_edits: bool,
}

impl SessionDiscarded {
    /// Creates a new `SessionDiscarded` event.
    #[must_use]
    pub fn new(
        order_id: OrderId,
        session_id: SessionId,
        side: OrderSide,
        had_unsaved_edits: bool,
    ) -> Self {
        Self {
            metadata: EventMetadata::for_order(order_id),
            session_id,
            side,
            had_unsaved_edits,
        }
    }
}

impl DomainEvent for SessionDiscarded {
    fn event_id(&self) -> EventId {
        self.metadata.event_id
    }

    fn order_id(&self) -> Option<OrderId> {
        self.metadata.order_id
    }

    fn timestamp(&self) -> Timestamp {
        self.metadata.timestamp
    }

    fn event_type(&self) -> EventType {
        EventType::Session
    }

    fn event_name(&self) -> &'static str {
        "SessionDiscarded"
    }
}

/// Wrapper enum for all session-related events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllocationEvent {
    /// A staged edit session was opened.
    Opened(SessionOpened),
    /// A staged edit session committed into its ledger.
    Committed(SessionCommitted),
    /// A staged edit session was discarded.
    Discarded(SessionDiscarded),
}

impl AllocationEvent {
    /// Returns the session this event belongs to.
    #[must_use]
    pub const fn session_id(&self) -> SessionId {
        match self {
            Self::Opened(e) => e.session_id,
            Self::Committed(e) => e.session_id,
            Self::Discarded(e) => e.session_id,
        }
    }

    /// Returns the event's human-readable name.
    #[must_use]
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::Opened(e) => e.event_name(),
            Self::Committed(e) => e.event_name(),
            Self::Discarded(e) => e.event_name(),
        }
    }
}
