//! Bookable lessons in the catalog.
//!
//! # Actor Framework
//! [`Lesson`] implements [`ActorEntity`](crate::framework::ActorEntity), so it is
//! stored and mutated exclusively by a [`ResourceActor`](crate::framework::ResourceActor).
//!
//! See [`impl ActorEntity for Lesson`](#impl-ActorEntity-for-Lesson) for details on:
//! - Creation parameters ([`LessonCreate`])
//! - Update parameters ([`LessonUpdate`])
//! - Custom actions ([`LessonAction`](crate::lesson_actor::LessonAction))

use serde::{Deserialize, Serialize};

store_id!(
    /// Store-assigned identifier for lessons.
    LessonId
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: LessonId,
    pub subject: String,
    pub location: String,
    pub price: u32,
    /// Remaining bookable capacity.
    pub space: u32,
    /// Image filename, never interpreted here.
    pub image: String,
}

impl Lesson {
    pub fn new(
        id: LessonId,
        subject: impl Into<String>,
        location: impl Into<String>,
        price: u32,
        space: u32,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id,
            subject: subject.into(),
            location: location.into(),
            price,
            space,
            image: image.into(),
        }
    }

    /// Case-insensitive substring match over subject and location, plus textual
    /// containment in the decimal form of price and space.
    ///
    /// `needle` must already be lowercase.
    pub fn matches_term(&self, needle: &str) -> bool {
        self.subject.to_lowercase().contains(needle)
            || self.location.to_lowercase().contains(needle)
            || self.price.to_string().contains(needle)
            || self.space.to_string().contains(needle)
    }
}

/// Payload for creating a lesson. Also the shape of seed catalog entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonCreate {
    pub subject: String,
    pub location: String,
    pub price: u32,
    pub space: u32,
    #[serde(default)]
    pub image: String,
}

/// Validated field-level overwrite. `None` leaves the field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonUpdate {
    pub subject: Option<String>,
    pub location: Option<String>,
    pub price: Option<u32>,
    pub space: Option<u32>,
    pub image: Option<String>,
}

/// Raw update payload as received from a caller.
///
/// `price` and `space` stay untyped until [`validate_patch`](crate::validation::validate_patch)
/// has checked them, so a bad value is reported as a validation error rather than
/// a decoding failure. Unknown fields (including `id`) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LessonPatch {
    pub subject: Option<String>,
    pub location: Option<String>,
    pub price: Option<serde_json::Value>,
    pub space: Option<serde_json::Value>,
    pub image: Option<String>,
}

/// Filter for listing lessons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LessonQuery {
    /// Lowercased search term, see [`Lesson::matches_term`].
    Term(String),
}

impl LessonQuery {
    pub fn term(term: &str) -> Self {
        Self::Term(term.to_lowercase())
    }
}
