//! # System Lifecycle
//!
//! Starting, seeding and stopping the two stores behind a [`BookingService`](crate::booking::BookingService).
//!
//! - [`BookingSystem`] - Spawns the lesson and order actors and wires them into the service
//! - [`tracing`] - Subscriber setup shared by the binary and ad-hoc debugging
//!
//! Shutdown works by dropping every client: each actor sees its channel close,
//! leaves its loop and its task finishes.

mod booking_system;
pub mod tracing;

pub use booking_system::*;
