//! Custom actions for the Lesson actor.
//!
//! Capacity changes go through these actions rather than through updates, so the
//! check and the mutation always happen inside one actor turn.

use crate::model::Lesson;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonAction {
    /// Reads the remaining space without modifying it.
    CheckSpace,
    /// Takes `quantity` places if at least that many remain.
    ///
    /// # Errors
    /// Fails with `InsufficientSpace` when `quantity` exceeds the remaining space.
    Reserve(u32),
    /// Gives `quantity` places back. Only used to undo a `Reserve`.
    Release(u32),
}

/// Results from [`LessonAction`]s; variants match 1:1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LessonActionResult {
    Space(u32),
    /// The lesson as it stood right after the reservation, including the price
    /// that was in effect.
    Reserved(Lesson),
    /// Space after the release.
    Released(u32),
}
