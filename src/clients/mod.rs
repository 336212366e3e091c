//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).
//!
//! These are the in-process implementations of the [`store`](crate::store) traits.

pub mod actor_client;
pub mod lesson_client;
pub mod order_client;

pub use actor_client::*;
pub use lesson_client::*;
pub use order_client::*;
