//! Test fixtures for ev-trip-planner.
//!
//! Real locations along the I-15 corridor between Las Vegas and Los
//! Angeles, plus charging stations near Barstow and Baker.

pub mod corridor;

pub use corridor::*;
