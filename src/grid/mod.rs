//! Finite differences on regular grids.
//!
//! A regular grid is described by a [`GridSpec`]: the node count and node
//! spacing along each axis. The gradient operator returned by [`fd_grad`] maps
//! a scalar field sampled at the grid nodes to its partial derivatives, each
//! sampled on the grid *staggered* along that axis, i.e. at the midpoints
//! between consecutive nodes.
//!
//! # Ordering
//!
//! Nodes are flattened with axis 0 varying fastest (see [`GridShape`]). The
//! gradient stacks one row block per axis, in axis order: all axis-0
//! derivative rows first, then axis-1, and so on. Use
//! [`GridSpec::axis_row_ranges`] to slice the result.
//!
//! # Example
//!
//! ```
//! use tessel::grid::{fd_grad, grid_positions, sample, GridSpec};
//!
//! let spec = GridSpec::uniform_unit(&[19, 15]).unwrap();
//! let g = fd_grad(&[19, 15], spec.spacing()).unwrap();
//!
//! // f(x, y) = 2x + 5y
//! let f = sample(&grid_positions(&spec), |p| 2.0 * p[0] + 5.0 * p[1]);
//! let df = g.mul_vec(&f);
//!
//! let ranges = spec.axis_row_ranges();
//! assert!(df.rows(ranges[0].start, ranges[0].len()).iter().all(|d| (d - 2.0).abs() < 1e-10));
//! assert!(df.rows(ranges[1].start, ranges[1].len()).iter().all(|d| (d - 5.0).abs() < 1e-10));
//! ```

mod gradient;
mod index;
mod nodes;
mod stencil;

use std::ops::Range;

pub use gradient::{fd_grad, fd_grad_sequential, fd_grad_with_options, GradientOptions};
pub use index::{CoordIter, GridShape};
pub use nodes::{grid_positions, sample, staggered_positions};
pub use stencil::fd_partial_derivative;

use crate::error::{GeometryError, Result};

/// Resolution and spacing of a regular grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSpec {
    shape: GridShape,
    spacing: Vec<f64>,
}

impl GridSpec {
    /// Create a validated grid specification.
    ///
    /// Fails with [`GeometryError::InvalidGridSpec`] when `resolution` is empty,
    /// when `resolution` and `spacing` differ in length, when any axis has
    /// fewer than two nodes, or when any spacing is not a positive finite number.
    pub fn new(resolution: &[usize], spacing: &[f64]) -> Result<Self> {
        if resolution.is_empty() {
            return Err(GeometryError::invalid_grid("resolution has no axes"));
        }
        if resolution.len() != spacing.len() {
            return Err(GeometryError::invalid_grid(format!(
                "resolution has {} axes but spacing has {}",
                resolution.len(),
                spacing.len()
            )));
        }
        let shape = GridShape::new(resolution)?;
        if let Some((axis, &h)) = spacing
            .iter()
            .enumerate()
            .find(|&(_, &h)| !(h.is_finite() && h > 0.0))
        {
            return Err(GeometryError::invalid_grid(format!(
                "spacing {} on axis {} must be positive and finite",
                h, axis
            )));
        }
        Ok(Self {
            shape,
            spacing: spacing.to_vec(),
        })
    }

    /// Grid spanning the unit box: `h[k] = 1 / (gs[k] - 1)`.
    pub fn uniform_unit(resolution: &[usize]) -> Result<Self> {
        let spacing: Vec<f64> = resolution
            .iter()
            .map(|&n| 1.0 / n.saturating_sub(1).max(1) as f64)
            .collect();
        // Resolution errors are reported by new()
        Self::new(resolution, &spacing)
    }

    /// The node counts.
    #[inline]
    pub fn shape(&self) -> &GridShape {
        &self.shape
    }

    /// The node spacing along each axis.
    #[inline]
    pub fn spacing(&self) -> &[f64] {
        &self.spacing
    }

    /// Number of axes.
    #[inline]
    pub fn dim(&self) -> usize {
        self.shape.dim()
    }

    /// Number of full-grid nodes.
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.shape.num_nodes()
    }

    /// Number of nodes on the grid staggered along `axis`.
    pub fn staggered_len(&self, axis: usize) -> usize {
        self.num_nodes() / self.shape.dims()[axis] * (self.shape.dims()[axis] - 1)
    }

    /// Number of rows of the gradient operator.
    pub fn gradient_rows(&self) -> usize {
        (0..self.dim()).map(|axis| self.staggered_len(axis)).sum()
    }

    /// Row range of each axis block in the gradient operator.
    pub fn axis_row_ranges(&self) -> Vec<Range<usize>> {
        let mut start = 0;
        (0..self.dim())
            .map(|axis| {
                let end = start + self.staggered_len(axis);
                let range = start..end;
                start = end;
                range
            })
            .collect()
    }
}
