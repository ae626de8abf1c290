//! # Domain Errors
//!
//! Error types for domain-level validation failures.
//!
//! User-typed allocation values never produce these errors; they are
//! sanitized at the [`AllocValue`](crate::domain::value_objects::AllocValue)
//! boundary. Domain errors mark caller bugs and invalid order parameters,
//! both of which should fail loudly.

use crate::domain::value_objects::EntityId;
use crate::domain::value_objects::arithmetic::ArithmeticError;
use thiserror::Error;

/// Error type for domain rule violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A currency code failed validation.
    #[error("invalid currency code: '{0}'")]
    InvalidCurrency(String),

    /// A price failed validation.
    #[error("invalid price: {0}")]
    InvalidPrice(String),

    /// A quantity failed validation.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    /// A ledger target total failed validation.
    #[error("invalid target total: {0}")]
    InvalidTarget(String),

    /// A staged edit referenced an entity outside the session's scope.
    #[error("entity '{0}' is outside the session scope")]
    EntityOutOfScope(EntityId),

    /// Checked arithmetic failed.
    #[error("arithmetic error: {0}")]
    Arithmetic(#[from] ArithmeticError),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats() {
        assert_eq!(
            DomainError::InvalidCurrency("X1".to_string()).to_string(),
            "invalid currency code: 'X1'"
        );
        assert_eq!(
            DomainError::EntityOutOfScope(EntityId::new("cash-9")).to_string(),
            "entity 'cash-9' is outside the session scope"
        );
    }

    #[test]
    fn arithmetic_error_converts() {
        let err: DomainError = ArithmeticError::Overflow.into();
        assert!(matches!(err, DomainError::Arithmetic(_)));
        assert!(err.to_string().contains("overflow"));
    }
}
