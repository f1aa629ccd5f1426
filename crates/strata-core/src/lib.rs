//! Core shared types for strata.
//!
//! This crate is intentionally small and dependency-free.

mod clock;

pub use clock::{Clock, SimulatedClock, SystemClock};
