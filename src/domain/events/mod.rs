//! # Domain Events
//!
//! Events emitted during allocation operations for the audit trail.
//!
//! ## Session Events
//!
//! - [`SessionOpened`]: a staged edit session was opened
//! - [`SessionCommitted`]: a session committed into its ledger
//! - [`SessionDiscarded`]: a session was dropped without committing

pub mod domain_event;
pub mod session_events;

pub use domain_event::{DomainEvent, EventMetadata, EventType};
pub use session_events::{AllocationEvent, SessionCommitted, SessionDiscarded, SessionOpened};
