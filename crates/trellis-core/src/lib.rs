//! Core types and utilities for the Trellis layout engine.
//!
//! This crate provides the foundational types used across the other trellis crates:
//! - Geometry value types (points, sizes, rectangles, thickness)
//! - Element identifiers and alignment enums
//! - Error types

pub mod errors;
pub mod geometry;
pub mod types;

pub use errors::*;
pub use geometry::*;
pub use types::*;
