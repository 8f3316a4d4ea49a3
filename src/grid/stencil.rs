//! Forward-difference stencils along a single axis.

use crate::error::{GeometryError, Result};
use crate::sparse::CsrMatrix;

use super::{GridShape, GridSpec};

/// Emit the stencil entries of the derivative along `axis`.
///
/// Row `row_offset + s` holds the derivative at the staggered node with linear
/// index `s`: `-1/h` on the node below it and `+1/h` on the node above it.
/// Entries come out sorted by (row, col).
pub(crate) fn axis_triplets(
    shape: &GridShape,
    axis: usize,
    h: f64,
    row_offset: usize,
) -> Vec<(usize, usize, f64)> {
    let staggered = shape.staggered(axis);
    let step = shape.strides()[axis];
    let mut triplets = Vec::with_capacity(2 * staggered.num_nodes());

    for (s, t) in staggered.iter_coords().enumerate() {
        // t is also a valid full-grid coordinate: the node below the midpoint
        let below = shape.linear_index(&t);
        triplets.push((row_offset + s, below, -1.0 / h));
        triplets.push((row_offset + s, below + step, 1.0 / h));
    }

    triplets
}

/// Build the partial derivative operator along one axis.
///
/// The returned matrix has one row per node of the grid staggered along
/// `axis` and one column per full-grid node. It is the `axis` row block of
/// [`fd_grad`](super::fd_grad).
///
/// # Example
///
/// ```
/// use tessel::grid::{fd_partial_derivative, GridSpec};
///
/// let spec = GridSpec::new(&[3, 2], &[0.5, 1.0]).unwrap();
/// let dx = fd_partial_derivative(&spec, 0).unwrap();
/// assert_eq!(dx.shape(), (4, 6));
/// assert_eq!(dx.get(0, 0), -2.0);
/// assert_eq!(dx.get(0, 1), 2.0);
/// ```
pub fn fd_partial_derivative(spec: &GridSpec, axis: usize) -> Result<CsrMatrix> {
    if axis >= spec.dim() {
        return Err(GeometryError::invalid_param(
            "axis",
            axis,
            "axis must be less than the grid dimension",
        ));
    }
    let triplets = axis_triplets(spec.shape(), axis, spec.spacing()[axis], 0);
    Ok(CsrMatrix::from_sorted_triplets(
        spec.staggered_len(axis),
        spec.num_nodes(),
        triplets,
    ))
}
