//! Doubled lengths and areas of mesh elements.

use nalgebra::{DMatrix, DVector};

use crate::error::{GeometryError, Result};

/// Element list of a polyline or triangle mesh.
#[derive(Debug, Clone, Copy)]
pub enum Elements<'a> {
    /// Segments given as vertex index pairs.
    Edges(&'a [[usize; 2]]),
    /// Triangles given as vertex index triples.
    Triangles(&'a [[usize; 3]]),
}

impl Elements<'_> {
    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            Elements::Edges(e) => e.len(),
            Elements::Triangles(f) => f.len(),
        }
    }

    /// Returns true if there are no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Edges of the closed polyline through vertices `0..n` in order.
///
/// Returns `[0, 1], [1, 2], ..., [n - 1, 0]`.
pub fn edge_indices(n: usize) -> Vec<[usize; 2]> {
    (0..n).map(|i| [i, (i + 1) % n]).collect()
}

fn check_vertices(v: &DMatrix<f64>) -> Result<()> {
    if v.ncols() == 0 {
        return Err(GeometryError::DimensionMismatch {
            context: "vertex coordinate count",
            expected: 1,
            found: 0,
        });
    }
    Ok(())
}

fn check_indices<const N: usize>(elements: &[[usize; N]], num_vertices: usize) -> Result<()> {
    match elements.iter().flatten().find(|&&i| i >= num_vertices) {
        Some(&i) => Err(GeometryError::DimensionMismatch {
            context: "element vertex index",
            expected: num_vertices,
            found: i,
        }),
        None => Ok(()),
    }
}

#[inline]
fn distance_squared(v: &DMatrix<f64>, a: usize, b: usize) -> f64 {
    (v.row(a) - v.row(b)).norm_squared()
}

/// Squared edge lengths of each triangle.
///
/// Entry `j` of each result is the squared length of the edge opposite
/// corner `j` of the triangle.
pub fn halfedge_lengths_squared(v: &DMatrix<f64>, faces: &[[usize; 3]]) -> Result<Vec<[f64; 3]>> {
    check_vertices(v)?;
    check_indices(faces, v.nrows())?;

    Ok(faces
        .iter()
        .map(|&[i, j, k]| {
            [
                distance_squared(v, j, k),
                distance_squared(v, k, i),
                distance_squared(v, i, j),
            ]
        })
        .collect())
}

/// Doubled triangle areas from squared edge lengths.
///
/// Uses Kahan's rearrangement of Heron's formula, which stays accurate for
/// needle-shaped triangles. Round-off on degenerate triangles is clamped to a
/// zero area.
///
/// Accuracy is bounded by the lengths themselves: a height below roughly
/// `sqrt(f64::EPSILON)` times the longest edge is already lost when lengths
/// are recovered from squared lengths, and such triangles report a zero area.
pub fn doublearea_intrinsic(l_sq: &[[f64; 3]]) -> Vec<f64> {
    l_sq.iter()
        .map(|l| {
            let mut l = l.map(f64::sqrt);
            l.sort_by(|x, y| y.total_cmp(x));
            let [a, b, c] = l;
            let radicand = (a + (b + c)) * (c - (a - b)) * (c + (a - b)) * (a + (b - c));
            0.5 * radicand.max(0.0).sqrt()
        })
        .collect()
}

/// Twice the length or area of each element.
///
/// With `elements == None` the vertices are read as an ordered closed
/// polyline (see [`edge_indices`]).
///
/// # Errors
///
/// [`GeometryError::DimensionMismatch`] if `v` has no coordinate columns or an
/// element references a vertex past the end of `v`.
pub fn doublearea(v: &DMatrix<f64>, elements: Option<Elements<'_>>) -> Result<DVector<f64>> {
    check_vertices(v)?;

    let polyline;
    let elements = match elements {
        Some(elements) => elements,
        None => {
            polyline = edge_indices(v.nrows());
            Elements::Edges(&polyline)
        }
    };
    let m = elements.len();

    match elements {
        Elements::Edges(edges) => {
            check_indices(edges, v.nrows())?;
            Ok(DVector::from_iterator(
                m,
                edges
                    .iter()
                    .map(|&[a, b]| 2.0 * distance_squared(v, a, b).sqrt()),
            ))
        }
        Elements::Triangles(faces) => {
            let l_sq = halfedge_lengths_squared(v, faces)?;
            Ok(DVector::from_vec(doublearea_intrinsic(&l_sq)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> DMatrix<f64> {
        DMatrix::from_row_slice(4, 2, &[0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0])
    }

    #[test]
    fn test_edge_indices() {
        assert_eq!(edge_indices(3), vec![[0, 1], [1, 2], [2, 0]]);
        assert_eq!(edge_indices(1), vec![[0, 0]]);
        assert!(edge_indices(0).is_empty());
    }

    #[test]
    fn test_polyline_default() {
        let v = unit_square();
        let dbl = doublearea(&v, None).unwrap();
        assert_eq!(dbl.len(), 4);
        assert!(dbl.iter().all(|&l| (l - 2.0).abs() < 1e-12));

        let edges = edge_indices(4);
        let explicit = doublearea(&v, Some(Elements::Edges(&edges))).unwrap();
        assert_eq!(dbl, explicit);
    }

    #[test]
    fn test_edge_lengths_3d() {
        let v = DMatrix::from_row_slice(2, 3, &[0.0, 0.0, 0.0, 1.0, 2.0, 2.0]);
        let dbl = doublearea(&v, Some(Elements::Edges(&[[0, 1]]))).unwrap();
        assert!((dbl[0] - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_triangle_areas() {
        let v = unit_square();
        let faces = [[0, 1, 2], [0, 2, 3]];
        let dbl = doublearea(&v, Some(Elements::Triangles(&faces))).unwrap();
        assert!((dbl[0] - 1.0).abs() < 1e-12);
        assert!((dbl[1] - 1.0).abs() < 1e-12);

        // Orientation does not matter
        let flipped = doublearea(&v, Some(Elements::Triangles(&[[0, 2, 1]]))).unwrap();
        assert!((flipped[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_equilateral_in_3d() {
        let s = std::f64::consts::FRAC_1_SQRT_2;
        let v = DMatrix::from_row_slice(3, 3, &[s, 0.0, 0.0, 0.0, s, 0.0, 0.0, 0.0, s]);
        let dbl = doublearea(&v, Some(Elements::Triangles(&[[0, 1, 2]]))).unwrap();
        // Side length 1
        assert!((dbl[0] - 3.0_f64.sqrt() / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_triangle() {
        let v = DMatrix::from_row_slice(3, 2, &[0.0, 0.0, 1.0, 0.0, 2.0, 0.0]);
        let dbl = doublearea(&v, Some(Elements::Triangles(&[[0, 1, 2]]))).unwrap();
        assert_eq!(dbl[0], 0.0);
    }

    #[test]
    fn test_thin_triangle() {
        // Height 1e-4 over a unit base
        let v = DMatrix::from_row_slice(3, 2, &[0.0, 0.0, 1.0, 0.0, 0.5, 1e-4]);
        let dbl = doublearea(&v, Some(Elements::Triangles(&[[0, 1, 2]]))).unwrap();
        assert!(((dbl[0] - 1e-4) / 1e-4).abs() < 1e-6, "got {}", dbl[0]);

        // Same triangle listed from a different corner
        let dbl = doublearea(&v, Some(Elements::Triangles(&[[2, 0, 1]]))).unwrap();
        assert!(((dbl[0] - 1e-4) / 1e-4).abs() < 1e-6, "got {}", dbl[0]);
    }

    #[test]
    fn test_elements_len() {
        let faces = [[0, 1, 2], [0, 2, 3]];
        assert_eq!(Elements::Triangles(&faces).len(), 2);
        assert!(!Elements::Triangles(&faces).is_empty());

        let none = edge_indices(0);
        let empty = Elements::Edges(&none);
        assert!(empty.is_empty());

        let v = DMatrix::<f64>::zeros(0, 2);
        assert_eq!(doublearea(&v, Some(empty)).unwrap().len(), 0);
        assert_eq!(doublearea(&v, None).unwrap().len(), 0);
    }

    #[test]
    fn test_halfedge_lengths_squared() {
        let v = DMatrix::from_row_slice(3, 2, &[0.0, 0.0, 3.0, 0.0, 0.0, 4.0]);
        let l_sq = halfedge_lengths_squared(&v, &[[0, 1, 2]]).unwrap();
        assert_eq!(l_sq, vec![[25.0, 16.0, 9.0]]);
        assert_eq!(doublearea_intrinsic(&l_sq), vec![12.0]);
    }

    #[test]
    fn test_index_out_of_range() {
        let v = unit_square();
        let err = doublearea(&v, Some(Elements::Triangles(&[[0, 1, 4]]))).unwrap_err();
        assert_eq!(
            err,
            GeometryError::DimensionMismatch {
                context: "element vertex index",
                expected: 4,
                found: 4,
            }
        );
        assert!(doublearea(&v, Some(Elements::Edges(&[[5, 0]]))).is_err());
    }

    #[test]
    fn test_no_coordinates() {
        let v = DMatrix::<f64>::zeros(3, 0);
        assert!(matches!(
            doublearea(&v, None),
            Err(GeometryError::DimensionMismatch { .. })
        ));
    }
}
