//! Physical positions of full and staggered grid nodes.
//!
//! Positions are returned as `n x d` matrices whose rows follow the same
//! linear order as the gradient's columns (full grid) or row blocks
//! (staggered grids). The grid origin sits at zero.

use nalgebra::{DMatrix, DVector};

use crate::error::{GeometryError, Result};

use super::{GridShape, GridSpec};

fn positions(shape: &GridShape, spacing: &[f64], offsets: &[f64]) -> DMatrix<f64> {
    let mut out = DMatrix::zeros(shape.num_nodes(), shape.dim());
    for (i, c) in shape.iter_coords().enumerate() {
        for (k, &ck) in c.iter().enumerate() {
            out[(i, k)] = (ck as f64 + offsets[k]) * spacing[k];
        }
    }
    out
}

/// Positions of the full-grid nodes, one row per node.
pub fn grid_positions(spec: &GridSpec) -> DMatrix<f64> {
    positions(spec.shape(), spec.spacing(), &vec![0.0; spec.dim()])
}

/// Positions of the nodes of the grid staggered along `axis`.
///
/// These are the points at which the `axis` block of
/// [`fd_grad`](super::fd_grad) estimates the derivative: half a cell past
/// each node along `axis`.
pub fn staggered_positions(spec: &GridSpec, axis: usize) -> Result<DMatrix<f64>> {
    if axis >= spec.dim() {
        return Err(GeometryError::invalid_param(
            "axis",
            axis,
            "axis must be less than the grid dimension",
        ));
    }
    let mut offsets = vec![0.0; spec.dim()];
    offsets[axis] = 0.5;
    Ok(positions(&spec.shape().staggered(axis), spec.spacing(), &offsets))
}

/// Evaluate `f` at each row of a positions matrix.
pub fn sample<F>(positions: &DMatrix<f64>, f: F) -> DVector<f64>
where
    F: Fn(&[f64]) -> f64,
{
    let mut point = vec![0.0; positions.ncols()];
    DVector::from_fn(positions.nrows(), |i, _| {
        for (k, p) in point.iter_mut().enumerate() {
            *p = positions[(i, k)];
        }
        f(&point)
    })
}
