//! Linear indexing of regular grids.
//!
//! Grid nodes are addressed by a coordinate tuple `(c_0, ..., c_{d-1})` with
//! `c_k` in `[0, gs[k])`. Flattening is column-major with axis 0 varying
//! fastest:
//!
//! ```text
//! index = c_0 + gs[0] * (c_1 + gs[1] * (c_2 + ...))
//! ```
//!
//! Every operator and node layout in this crate uses this one mapping, both for
//! the full grid and for the staggered grid of each axis (see
//! [`GridShape::staggered`]).

use crate::error::{GeometryError, Result};

/// Node counts along each axis of a regular grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GridShape {
    dims: Vec<usize>,
}

impl GridShape {
    /// Create a validated full-grid shape.
    ///
    /// Fails with [`GeometryError::InvalidGridSpec`] if `resolution` is empty,
    /// any axis has fewer than two nodes, or the grid is too large for its
    /// gradient to be addressed in memory.
    ///
    /// # Example
    ///
    /// ```
    /// use tessel::grid::GridShape;
    ///
    /// let shape = GridShape::new(&[4, 3]).unwrap();
    /// assert_eq!(shape.num_nodes(), 12);
    /// assert_eq!(shape.linear_index(&[1, 2]), 9);
    /// assert_eq!(shape.coords(9), vec![1, 2]);
    /// ```
    pub fn new(resolution: &[usize]) -> Result<Self> {
        if resolution.is_empty() {
            return Err(GeometryError::invalid_grid("resolution has no axes"));
        }
        if let Some((axis, &n)) = resolution.iter().enumerate().find(|&(_, &n)| n < 2) {
            return Err(GeometryError::invalid_grid(format!(
                "axis {} has {} node(s), at least 2 are required",
                axis, n
            )));
        }
        // Gradient assembly holds two (row, col, value) entries per staggered
        // node of every axis, i.e. at most 2 * d * N of them.
        let entry_bytes = std::mem::size_of::<(usize, usize, f64)>();
        let fits = resolution
            .iter()
            .try_fold(1usize, |acc, &n| acc.checked_mul(n))
            .and_then(|nodes| nodes.checked_mul(2 * resolution.len()))
            .and_then(|entries| entries.checked_mul(entry_bytes))
            .is_some_and(|bytes| bytes <= isize::MAX as usize);
        if !fits {
            return Err(GeometryError::invalid_grid(format!(
                "grid {:?} has too many nodes",
                resolution
            )));
        }
        Ok(Self {
            dims: resolution.to_vec(),
        })
    }

    /// Number of axes.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dims.len()
    }

    /// Node count along each axis.
    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Total number of nodes.
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.dims.iter().product()
    }

    /// Linear-index stride of each axis. Axis 0 has stride 1.
    pub fn strides(&self) -> Vec<usize> {
        let mut stride = 1;
        self.dims
            .iter()
            .map(|&n| {
                let s = stride;
                stride *= n;
                s
            })
            .collect()
    }

    /// Shape of the grid staggered along `axis`: one fewer node on that axis.
    ///
    /// The result is not re-validated, since a staggered axis may hold a
    /// single node.
    ///
    /// # Panics
    /// Panics if `axis >= dim()` or the axis has no nodes left to remove.
    pub fn staggered(&self, axis: usize) -> Self {
        let mut dims = self.dims.clone();
        assert!(dims[axis] > 0, "axis {} has no nodes to stagger", axis);
        dims[axis] -= 1;
        Self { dims }
    }

    /// Flatten a coordinate tuple into a linear index.
    #[inline]
    pub fn linear_index(&self, coords: &[usize]) -> usize {
        debug_assert_eq!(coords.len(), self.dims.len(), "coordinate arity mismatch");
        coords
            .iter()
            .zip(&self.dims)
            .rev()
            .fold(0, |acc, (&c, &n)| {
                debug_assert!(c < n, "coordinate {} out of range for extent {}", c, n);
                acc * n + c
            })
    }

    /// Recover the coordinate tuple of a linear index.
    pub fn coords(&self, mut index: usize) -> Vec<usize> {
        debug_assert!(index < self.num_nodes(), "index {} out of range", index);
        self.dims
            .iter()
            .map(|&n| {
                let c = index % n;
                index /= n;
                c
            })
            .collect()
    }

    /// Iterate over all coordinate tuples in linear-index order.
    pub fn iter_coords(&self) -> CoordIter<'_> {
        CoordIter {
            dims: &self.dims,
            next: if self.num_nodes() == 0 {
                None
            } else {
                Some(vec![0; self.dims.len()])
            },
        }
    }
}

/// Iterator over grid coordinates, axis 0 fastest.
///
/// Created by [`GridShape::iter_coords`].
#[derive(Debug, Clone)]
pub struct CoordIter<'a> {
    dims: &'a [usize],
    next: Option<Vec<usize>>,
}

impl Iterator for CoordIter<'_> {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        let current = self.next.take()?;

        // Odometer increment
        let mut succ = current.clone();
        for (c, &n) in succ.iter_mut().zip(self.dims) {
            *c += 1;
            if *c < n {
                self.next = Some(succ);
                return Some(current);
            }
            *c = 0;
        }
        Some(current)
    }
}
