//! Storage seams used by the booking service.
//!
//! The booking protocol only needs per-lesson atomicity: [`CatalogStore::try_reserve`]
//! must check and decrement in one step, and [`CatalogStore::release`] must undo it.
//! Nothing here assumes a transaction spanning several lessons, so any backend with
//! a single-record conditional update can implement these traits. Ids are opaque
//! string keys (sequential integers or 24-hex-digit object ids), so the traits do
//! not tie a backend to either form. The in-process
//! implementations are [`LessonClient`](crate::clients::LessonClient) and
//! [`OrderClient`](crate::clients::OrderClient).

use crate::lesson_actor::LessonError;
use crate::model::{Lesson, LessonId, LessonUpdate, Order, OrderCreate, OrderId};
use crate::order_actor::OrderError;
use async_trait::async_trait;

#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Every lesson in id order.
    async fn list_all(&self) -> Result<Vec<Lesson>, LessonError>;

    async fn find_by_id(&self, id: LessonId) -> Result<Option<Lesson>, LessonError>;

    /// Lessons whose subject or location contains `term` (ignoring case), or whose
    /// price or space contains it as text. An empty term is rejected.
    async fn search(&self, term: &str) -> Result<Vec<Lesson>, LessonError>;

    /// Takes `quantity` places if available, as one indivisible step.
    ///
    /// Returns the lesson as it stood right after the decrement. Fails with
    /// `NotFound` or `InsufficientSpace` without changing anything.
    async fn try_reserve(&self, id: LessonId, quantity: u32) -> Result<Lesson, LessonError>;

    /// Gives back places taken by [`CatalogStore::try_reserve`].
    async fn release(&self, id: LessonId, quantity: u32) -> Result<(), LessonError>;

    /// Overwrites the fields present in `update` and returns the refreshed lesson.
    async fn update(&self, id: LessonId, update: LessonUpdate) -> Result<Lesson, LessonError>;
}

#[async_trait]
pub trait OrderLedger: Send + Sync {
    /// Appends an order and returns it with its assigned id.
    async fn append(&self, order: OrderCreate) -> Result<Order, OrderError>;

    async fn list_all(&self) -> Result<Vec<Order>, OrderError>;

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, OrderError>;
}
