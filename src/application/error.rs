//! # Application Errors
//!
//! Error types for the application layer.
//!
//! These errors represent failures surfaced by the orchestrators:
//! domain rule violations and invalid caller input. There is no
//! infrastructure tier here; the engine performs no I/O.
//!
//! # Examples
//!
//! ```
//! use order_alloc::application::error::ApplicationError;
//!
//! let err = ApplicationError::validation("quantity must be positive");
//! assert!(err.is_validation());
//!
//! let err = ApplicationError::entity_not_found("cash-9");
//! assert!(err.is_not_found());
//! ```

use crate::domain::errors::DomainError;
use thiserror::Error;

/// Application layer error.
///
/// Wraps domain errors with application-specific context for orchestrator
/// failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplicationError {
    /// Domain error from business logic.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Request validation failed.
    #[error("validation error: {0}")]
    Validation(String),

    /// A referenced entity is not in the capacity catalog.
    #[error("entity not found: {0}")]
    EntityNotFound(String),
}

impl ApplicationError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an entity not found error.
    #[must_use]
    pub fn entity_not_found(entity_id: impl Into<String>) -> Self {
        Self::EntityNotFound(entity_id.into())
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::EntityNotFound(_))
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error() {
        let err = ApplicationError::validation("quantity must be positive");
        assert!(err.to_string().contains("quantity must be positive"));
        assert!(err.is_validation());
        assert!(!err.is_not_found());
    }

    #[test]
    fn entity_not_found_error() {
        let err = ApplicationError::entity_not_found("cash-9");
        assert!(err.to_string().contains("cash-9"));
        assert!(err.is_not_found());
    }

    #[test]
    fn from_domain_error() {
        let domain_err = DomainError::InvalidQuantity("negative".to_string());
        let app_err: ApplicationError = domain_err.into();
        assert!(app_err.to_string().contains("negative"));
        assert!(matches!(app_err, ApplicationError::Domain(_)));
    }
}
