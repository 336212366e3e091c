//! # Lesson Actor
//!
//! The catalog store: one [`ResourceActor`] owning every [`Lesson`].
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Lesson`]
//! - [`error`] - [`LessonError`]
//! - [`actions`] - [`LessonAction`] and [`LessonActionResult`] for capacity changes
//! - [`new()`] - Factory that creates the actor and its [`LessonClient`]
//!
//! ## Capacity Actions
//!
//! ```rust,ignore
//! // Read-only
//! let space = lessons.check_space(id).await?;
//!
//! // Atomic check-and-decrement; fails without side effects when space is short
//! let snapshot = lessons.try_reserve(id, 2).await?;
//!
//! // Undo a reservation
//! lessons.release(id, 2).await?;
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use lesson_booking::lesson_actor;
//! use lesson_booking::model::LessonCreate;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, lessons) = lesson_actor::new(32);
//!     tokio::spawn(actor.run());
//!
//!     let id = lessons
//!         .create_lesson(LessonCreate {
//!             subject: "Mathematics".to_string(),
//!             location: "Hendon".to_string(),
//!             price: 100,
//!             space: 5,
//!             image: "math.png".to_string(),
//!         })
//!         .await?;
//!
//!     assert_eq!(lessons.check_space(id).await?, 5);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::LessonClient;
use crate::framework::ResourceActor;
use crate::model::Lesson;

/// Creates a new Lesson actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Lesson>, LessonClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, LessonClient::new(generic_client))
}
