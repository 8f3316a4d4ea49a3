//! Measures of polylines and triangle meshes.
//!
//! Meshes are given as a vertex matrix (one row per vertex, any number of
//! coordinate columns) plus an element list. Element lists are either edges or
//! triangles, chosen once through [`Elements`].
//!
//! # Example
//!
//! ```
//! use nalgebra::DMatrix;
//! use tessel::mesh::{doublearea, Elements};
//!
//! let v = DMatrix::from_row_slice(3, 2, &[0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
//! let faces = [[0, 1, 2]];
//! let dbl_a = doublearea(&v, Some(Elements::Triangles(&faces))).unwrap();
//! assert!((dbl_a[0] - 1.0).abs() < 1e-12);
//! ```

mod measure;

pub use measure::{
    doublearea, doublearea_intrinsic, edge_indices, halfedge_lengths_squared, Elements,
};
