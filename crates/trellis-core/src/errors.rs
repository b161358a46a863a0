//! Error types for the Trellis engine.
//!
//! The layout algorithms themselves never fail; malformed input is clamped.
//! These errors belong to the container layer and to configuration.

use crate::types::ElementId;
use thiserror::Error;

/// Top-level error type for the Trellis engine.
#[derive(Debug, Error)]
pub enum TrellisError {
    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error(transparent)]
    Options(#[from] OptionsError),
}

/// Errors from element tree operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("Unknown element: {id}")]
    UnknownElement { id: ElementId },

    #[error("The root element cannot be removed")]
    RootRemoval,
}

/// Errors from validating or loading layout options.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("Invalid DPI scale {scale}: must be finite and greater than zero")]
    InvalidScale { scale: f64 },

    #[error("Invalid viewport {width}x{height}: must be finite and non-negative")]
    InvalidViewport { width: f64, height: f64 },

    #[cfg(feature = "serde")]
    #[error("Failed to parse layout options: {0}")]
    Parse(#[from] serde_json::Error),
}
