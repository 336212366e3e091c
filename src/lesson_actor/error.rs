//! Error types for the Lesson actor.

use crate::framework::FrameworkError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LessonError {
    #[error("Lesson not found: {0}")]
    NotFound(String),

    #[error("Not enough space in {subject} at {location}: requested {requested}, available {available}")]
    InsufficientSpace {
        subject: String,
        location: String,
        requested: u32,
        available: u32,
    },

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    #[error("Invalid lesson: {0}")]
    Invalid(String),

    /// Releasing would push space past the representable maximum.
    #[error("Space overflow on lesson {0}")]
    SpaceOverflow(String),

    /// The lesson store could not be reached.
    #[error("Lesson store unavailable: {0}")]
    Unavailable(String),
}

impl From<FrameworkError<LessonError>> for LessonError {
    fn from(e: FrameworkError<LessonError>) -> Self {
        match e {
            FrameworkError::NotFound(id) => LessonError::NotFound(id),
            FrameworkError::Entity(inner) => inner,
            other => LessonError::Unavailable(other.to_string()),
        }
    }
}
