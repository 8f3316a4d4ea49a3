//! # Tessel
//!
//! Finite difference operators on regular grids and element measures for
//! polylines and triangle meshes, for geometry processing research.
//!
//! ## Features
//!
//! - **Staggered-grid gradient**: sparse forward-difference operator for grids
//!   of any dimension, with per-axis spacing
//! - **Explicit index layout**: one shared, axis-0-fastest linearization for
//!   full and staggered grids
//! - **Mesh measures**: doubled edge lengths and numerically stable doubled
//!   triangle areas
//!
//! ## Quick Start
//!
//! ```
//! use tessel::prelude::*;
//!
//! // 3-D grid over the unit box
//! let spec = GridSpec::uniform_unit(&[19, 15, 23]).unwrap();
//! let g = fd_grad(&[19, 15, 23], spec.spacing()).unwrap();
//!
//! // Sample f(x, y, z) = 2x + 5y - 4z at the grid nodes
//! let f = sample(&grid_positions(&spec), |p| 2.0 * p[0] + 5.0 * p[1] - 4.0 * p[2]);
//! let df = g.mul_vec(&f);
//!
//! for (range, slope) in spec.axis_row_ranges().into_iter().zip([2.0, 5.0, -4.0]) {
//!     assert!(df.rows(range.start, range.len()).iter().all(|d| (d - slope).abs() < 1e-10));
//! }
//! ```
//!
//! ## Mesh Measures
//!
//! ```
//! use nalgebra::DMatrix;
//! use tessel::prelude::*;
//!
//! // Closed polyline around the unit square
//! let v = DMatrix::from_row_slice(4, 2, &[0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0]);
//! let dbl_l = doublearea(&v, None).unwrap();
//! assert_eq!(dbl_l.len(), 4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod grid;
pub mod mesh;
pub mod sparse;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use tessel::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{GeometryError, Result};
    pub use crate::grid::{
        fd_grad, fd_partial_derivative, grid_positions, sample, staggered_positions,
        GradientOptions, GridShape, GridSpec,
    };
    pub use crate::mesh::{doublearea, edge_indices, Elements};
    pub use crate::sparse::CsrMatrix;
}

// Re-export nalgebra types for convenience
pub use nalgebra;
