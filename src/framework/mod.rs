//! Generic single-writer store framework.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that stored record types implement
//! - [`ResourceActor`] - Task owning one collection of records
//! - [`ResourceClient`] - Cloneable handle for sending requests to an actor
//! - [`FrameworkError`] - Transport errors plus the record's own error type
//!
//! # Testing
//!
//! See [`mock`] for utilities to test clients without spawning real actors.

pub mod core;
pub mod mock;

pub use core::*;
