//! Error types for the Order ledger.

use crate::framework::FrameworkError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The order data is malformed.
    #[error("Order validation error: {0}")]
    ValidationError(String),

    /// The ledger could not be reached or did not answer.
    #[error("Order ledger unavailable: {0}")]
    Unavailable(String),
}

impl From<FrameworkError<OrderError>> for OrderError {
    fn from(e: FrameworkError<OrderError>) -> Self {
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            FrameworkError::Entity(inner) => inner,
            other => OrderError::Unavailable(other.to_string()),
        }
    }
}
