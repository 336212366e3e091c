//! Caller-facing error taxonomy.

use crate::lesson_actor::LessonError;
use crate::order_actor::OrderError;
use crate::validation::ValidationError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    Validation,
    NotFound,
    Capacity,
    Storage,
}

/// Every way a booking, search or update can fail.
///
/// Storage failures carry no detail: what went wrong with a backend is logged,
/// never shown to callers.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BookingError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Not enough space in {subject} at {location}: requested {requested}, available {available}")]
    Capacity {
        subject: String,
        location: String,
        requested: u32,
        available: u32,
    },

    #[error("Storage is temporarily unavailable")]
    Storage,
}

impl BookingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BookingError::Validation(_) => ErrorKind::Validation,
            BookingError::NotFound { .. } => ErrorKind::NotFound,
            BookingError::Capacity { .. } => ErrorKind::Capacity,
            BookingError::Storage => ErrorKind::Storage,
        }
    }

    /// HTTP status an outer router should answer with.
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::Validation | ErrorKind::Capacity => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::Storage => 500,
        }
    }
}

impl From<LessonError> for BookingError {
    fn from(e: LessonError) -> Self {
        match e {
            LessonError::NotFound(id) => BookingError::NotFound {
                entity: "Lesson",
                id,
            },
            LessonError::InsufficientSpace {
                subject,
                location,
                requested,
                available,
            } => BookingError::Capacity {
                subject,
                location,
                requested,
                available,
            },
            LessonError::InvalidQuantity(quantity) => ValidationError::InvalidNumber {
                field: "quantity",
                value: quantity.to_string(),
            }
            .into(),
            LessonError::Invalid(reason) => ValidationError::MalformedBody(reason).into(),
            LessonError::SpaceOverflow(_) | LessonError::Unavailable(_) => BookingError::Storage,
        }
    }
}

impl From<OrderError> for BookingError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::NotFound(id) => BookingError::NotFound { entity: "Order", id },
            OrderError::ValidationError(reason) => ValidationError::MalformedBody(reason).into(),
            OrderError::Unavailable(_) => BookingError::Storage,
        }
    }
}
