//! # Allocation Status
//!
//! Derived completion state of a ledger against its target.
//!
//! This module provides the [`AllocationStatus`] enum and the
//! [`COMPLETION_EPSILON`] tolerance. Unlike a lifecycle state machine, the
//! status is recomputed from the remaining balance on every read; there are
//! no transitions to enforce.
//!
//! # Examples
//!
//! ```
//! use order_alloc::domain::value_objects::AllocationStatus;
//! use rust_decimal::Decimal;
//!
//! let status = AllocationStatus::from_remaining(Decimal::ZERO);
//! assert!(status.is_complete());
//!
//! let over = AllocationStatus::from_remaining(Decimal::new(-10, 0));
//! assert!(over.is_over_allocated());
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tolerance below which a remaining balance counts as fully allocated.
///
/// Covers display-precision residue on currency amounts (one cent).
pub const COMPLETION_EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Completion state of a ledger relative to its target total.
///
/// Over-allocation is a warning, not an error: commit stays permitted and
/// the surrounding business process decides whether to block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum AllocationStatus {
    /// Less than the target has been allocated.
    Incomplete = 0,
    /// The target is met within [`COMPLETION_EPSILON`].
    Complete = 1,
    /// More than the target has been allocated.
    OverAllocated = 2,
}

impl AllocationStatus {
    /// Derives the status from a remaining balance (target minus allocated).
    ///
    /// A remaining balance within [`COMPLETION_EPSILON`] of zero is
    /// complete; anything below that is over-allocated.
    #[must_use]
    pub fn from_remaining(remaining: Decimal) -> Self {
        if remaining.abs() < COMPLETION_EPSILON {
            Self::Complete
        } else if remaining < Decimal::ZERO {
            Self::OverAllocated
        } else {
            Self::Incomplete
        }
    }

    /// Returns true if the target is met within tolerance.
    #[inline]
    #[must_use]
    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }

    /// Returns true if more than the target has been allocated.
    #[inline]
    #[must_use]
    pub const fn is_over_allocated(self) -> bool {
        matches!(self, Self::OverAllocated)
    }

    /// Returns true if less than the target has been allocated.
    #[inline]
    #[must_use]
    pub const fn is_incomplete(self) -> bool {
        matches!(self, Self::Incomplete)
    }
}

impl fmt::Display for AllocationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Incomplete => write!(f, "INCOMPLETE"),
            Self::Complete => write!(f, "COMPLETE"),
            Self::OverAllocated => write!(f, "OVER_ALLOCATED"),
        }
    }
}
