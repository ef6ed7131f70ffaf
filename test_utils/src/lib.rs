//! Utility helpers for tests.
//!
//! Shared constructors for climbing scenarios and float-tolerant vector
//! assertions.

pub mod climbing;

pub use climbing::{assert_vec3_eq, body, climber_at, grab_and_move, TOLERANCE};
