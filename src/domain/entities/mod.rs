//! # Domain Entities
//!
//! The data model of the allocation engine.
//!
//! ## Entities
//!
//! - [`AllocationLedger`]: per-side allocation map with derived totals
//! - [`StagedEditSession`]: transactional working copy of a ledger subset
//! - [`CapacityEntity`]: a candidate account, facility, or portfolio
//! - [`OrderShell`]: the serialized allocation arrays owned by the ticket

pub mod capacity_entity;
pub mod ledger;
pub mod order_shell;
pub mod staged_session;

pub use capacity_entity::CapacityEntity;
pub use ledger::{AllocationEntry, AllocationLedger};
pub use order_shell::{
    DepositAllocation, FundingAllocation, InstrumentAllocation, OrderShell,
};
pub use staged_session::{SessionCandidate, StagedEditSession};
