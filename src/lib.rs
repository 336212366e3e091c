//! # Lesson Booking
//!
//! > **A capacity-constrained booking engine built on resource-oriented actors.**
//!
//! A catalog of lessons, each with a price and a count of remaining places, and a
//! ledger of orders that consume those places. A booking may span several lessons
//! and is all-or-nothing: either every line item is reserved and the order is
//! recorded, or nothing changes.
//!
//! ## 🏗️ How Overselling Is Prevented
//!
//! Each store is a [`ResourceActor`](framework::ResourceActor) running in its own Tokio
//! task. It handles one request at a time, so a `Reserve` action checks and
//! decrements a lesson's space with no interleaving. Two customers racing for the
//! last place both reach the same actor; one gets it and the other is told there is
//! not enough space.
//!
//! Bookings across several lessons are not one transaction. The
//! [`BookingService`](booking::BookingService) reserves line items one by one and
//! releases everything it took, newest first, if a later step fails.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic `ResourceActor<T>` and its client. Also [`framework::mock`] for
//! testing clients without real actors.
//!
//! ### 2. The Stores ([`lesson_actor`], [`order_actor`], [`clients`], [`store`])
//! - [`store`] declares the [`CatalogStore`](store::CatalogStore) and
//!   [`OrderLedger`](store::OrderLedger) traits the booking logic is written against.
//! - [`clients`] implements them on top of the two actors.
//!
//! ### 3. The Protocol ([`booking`], [`validation`])
//! Input checks, the reservation loop with rollback, search and lesson updates.
//!
//! ### 4. The Edges ([`api`], [`config`], [`lifecycle`])
//! Response envelopes for an HTTP router, environment configuration, and starting
//! and stopping the whole system.
//!
//! ## 🚀 Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

pub mod api;
pub mod booking;
pub mod clients;
pub mod config;
pub mod framework;
pub mod lesson_actor;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod store;
pub mod validation;
