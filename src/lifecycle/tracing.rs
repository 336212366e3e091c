//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG`. Module paths are hidden; log lines carry `entity_type` instead.
//!
//! ```bash
//! # Bookings, rollbacks and actor lifecycle
//! RUST_LOG=info cargo run
//!
//! # Every store request with its payload
//! RUST_LOG=debug cargo run
//!
//! # Only the booking service
//! RUST_LOG=lesson_booking::booking=debug cargo run
//! ```
//!
//! A booking whose second line item runs out of space looks like this at `info`:
//!
//! ```text
//! INFO place_order{customer=Ada items=2}: Action ok entity_type="Lesson" id=1
//! WARN place_order{customer=Ada items=2}: Action failed entity_type="Lesson" id=2 error=Not enough space in Art at Barnet: requested 3, available 1
//! WARN place_order{customer=Ada items=2}: Reservation failed, rolling back lesson_id=2 held=1
//! INFO place_order{customer=Ada items=2}: Action ok entity_type="Lesson" id=1
//! ```
//!
//! The last line is the compensating release of lesson 1.

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type already says where a line came from
        .compact()
        .init();
}
