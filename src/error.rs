//! Error types for tessel.
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Result type alias using [`GeometryError`].
pub type Result<T> = std::result::Result<T, GeometryError>;

/// Errors that can occur while building operators or measuring meshes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// The grid resolution or spacing cannot describe a valid grid.
    ///
    /// Raised for an empty resolution, a resolution/spacing length mismatch,
    /// an axis with fewer than two nodes, or a non-positive spacing.
    #[error("invalid grid specification: {reason}")]
    InvalidGridSpec {
        /// Description of the offending input.
        reason: String,
    },

    /// Array shapes disagree with each other.
    #[error("dimension mismatch in {context}: expected {expected}, found {found}")]
    DimensionMismatch {
        /// What was being checked.
        context: &'static str,
        /// The expected size (or exclusive upper bound for indices).
        expected: usize,
        /// The size actually supplied.
        found: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl GeometryError {
    /// Create an invalid grid specification error.
    pub fn invalid_grid(reason: impl Into<String>) -> Self {
        GeometryError::InvalidGridSpec {
            reason: reason.into(),
        }
    }

    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        GeometryError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// Returns true for [`GeometryError::InvalidGridSpec`].
    pub fn is_invalid_grid(&self) -> bool {
        matches!(self, GeometryError::InvalidGridSpec { .. })
    }
}
