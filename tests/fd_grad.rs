//! End-to-end tests of the staggered-grid gradient.

use nalgebra::DVector;
use tessel::prelude::*;

/// Split the gradient output into its per-axis blocks.
fn axis_blocks(spec: &GridSpec, df: &DVector<f64>) -> Vec<Vec<f64>> {
    spec.axis_row_ranges()
        .into_iter()
        .map(|r| df.as_slice()[r].to_vec())
        .collect()
}

fn assert_all_close(values: &[f64], expected: f64, tol: f64) {
    assert!(!values.is_empty());
    for (i, v) in values.iter().enumerate() {
        assert!(
            (v - expected).abs() < tol,
            "row {}: got {}, expected {}",
            i,
            v,
            expected
        );
    }
}

/// Max-norm error of each axis block against the analytic partial derivatives.
fn max_errors<F, D>(spec: &GridSpec, f: F, df: D) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
    D: Fn(usize, &[f64]) -> f64,
{
    let g = fd_grad(spec.shape().dims(), spec.spacing()).unwrap();
    let computed = g.mul_vec(&sample(&grid_positions(spec), f));
    let blocks = axis_blocks(spec, &computed);

    (0..spec.dim())
        .map(|axis| {
            let exact = sample(&staggered_positions(spec, axis).unwrap(), |p| df(axis, p));
            blocks[axis]
                .iter()
                .zip(exact.iter())
                .map(|(c, e)| (c - e).abs())
                .fold(0.0, f64::max)
        })
        .collect()
}

#[test]
fn test_linear_field_2d() {
    let gs: [usize; 2] = [19, 15];
    let spec = GridSpec::uniform_unit(&gs).unwrap();
    let g = fd_grad(&gs, spec.spacing()).unwrap();

    assert_eq!(g.shape(), (15 * 18 + 19 * 14, 19 * 15));
    assert!(g.row_sums().iter().all(|&s| s == 0.0));

    let f = sample(&grid_positions(&spec), |p| 2.0 * p[0] + 5.0 * p[1]);
    let blocks = axis_blocks(&spec, &g.mul_vec(&f));

    assert_eq!(blocks[0].len(), 15 * 18);
    assert_eq!(blocks[1].len(), 19 * 14);
    assert_all_close(&blocks[0], 2.0, 1e-10);
    assert_all_close(&blocks[1], 5.0, 1e-10);
}

#[test]
fn test_linear_field_3d() {
    let gs: [usize; 3] = [19, 15, 23];
    let spec = GridSpec::uniform_unit(&gs).unwrap();
    let g = fd_grad(&gs, spec.spacing()).unwrap();

    assert_eq!(
        g.shape(),
        (15 * 18 * 23 + 19 * 14 * 23 + 19 * 15 * 22, 19 * 15 * 23)
    );

    let f = sample(&grid_positions(&spec), |p| {
        2.0 * p[0] + 5.0 * p[1] - 4.0 * p[2]
    });
    let blocks = axis_blocks(&spec, &g.mul_vec(&f));

    assert_all_close(&blocks[0], 2.0, 1e-10);
    assert_all_close(&blocks[1], 5.0, 1e-10);
    assert_all_close(&blocks[2], -4.0, 1e-10);
}

#[test]
fn test_linear_field_1d() {
    let spec = GridSpec::new(&[7], &[0.3]).unwrap();
    let g = fd_grad(&[7], &[0.3]).unwrap();
    assert_eq!(g.shape(), (6, 7));

    let f = sample(&grid_positions(&spec), |p| -1.5 * p[0] + 4.0);
    assert_all_close(g.mul_vec(&f).as_slice(), -1.5, 1e-10);
}

#[test]
fn test_anisotropic_spacing() {
    // Physical spacing independent of node count
    let gs: [usize; 3] = [6, 9, 4];
    let h = [0.37, 0.05, 1.9];
    let spec = GridSpec::new(&gs, &h).unwrap();
    let g = fd_grad(&gs, &h).unwrap();

    let f = sample(&grid_positions(&spec), |p| {
        0.5 * p[0] - 3.0 * p[1] + 7.0 * p[2] + 1.0
    });
    let blocks = axis_blocks(&spec, &g.mul_vec(&f));

    assert_all_close(&blocks[0], 0.5, 1e-10);
    assert_all_close(&blocks[1], -3.0, 1e-10);
    assert_all_close(&blocks[2], 7.0, 1e-10);
}

#[test]
fn test_invalid_grid_spec() {
    assert!(matches!(
        fd_grad(&[1, 5], &[0.1, 0.1]),
        Err(GeometryError::InvalidGridSpec { .. })
    ));
    assert!(matches!(
        fd_grad(&[5], &[0.1, 0.1]),
        Err(GeometryError::InvalidGridSpec { .. })
    ));
    assert!(matches!(
        fd_grad(&[5, 5], &[0.1, 0.0]),
        Err(GeometryError::InvalidGridSpec { .. })
    ));
    assert!(matches!(
        fd_grad(&[], &[]),
        Err(GeometryError::InvalidGridSpec { .. })
    ));
}

#[test]
fn test_second_order_convergence_2d() {
    let f = |p: &[f64]| p[0].cos() + p[1].sin();
    let df = |axis: usize, p: &[f64]| if axis == 0 { -p[0].sin() } else { p[1].cos() };

    let mut previous: Option<Vec<f64>> = None;
    // 9 grids, 8 refinements; spacing halves each time
    for power in 2..=10 {
        let gs: [usize; 2] = [(1 << power) + 1, (1 << (power - 1)) + 1];
        let spec = GridSpec::uniform_unit(&gs).unwrap();
        let errors = max_errors(&spec, f, df);

        if let Some(prev) = &previous {
            for axis in 0..2 {
                assert!(
                    errors[axis] < prev[axis],
                    "axis {} error did not decrease at 2^{}: {} -> {}",
                    axis,
                    power,
                    prev[axis],
                    errors[axis]
                );
                let ratio = prev[axis] / errors[axis];
                assert!(
                    (3.0..5.0).contains(&ratio),
                    "axis {} error ratio {} at 2^{}",
                    axis,
                    ratio,
                    power
                );
            }
        }
        previous = Some(errors);
    }
}

#[test]
fn test_second_order_convergence_3d() {
    let f = |p: &[f64]| p[0].cos() + p[1].sin() + 3.0 * p[2].cos();
    let df = |axis: usize, p: &[f64]| match axis {
        0 => -p[0].sin(),
        1 => p[1].cos(),
        _ => -3.0 * p[2].sin(),
    };

    let mut previous: Option<Vec<f64>> = None;
    for power in 2..=6 {
        let gs: [usize; 3] = [(1 << power) + 1, (1 << (power - 1)) + 1, (1 << power) + 1];
        let spec = GridSpec::uniform_unit(&gs).unwrap();
        let errors = max_errors(&spec, f, df);

        if let Some(prev) = &previous {
            for axis in 0..3 {
                assert!(errors[axis] < prev[axis]);
                let ratio = prev[axis] / errors[axis];
                assert!((3.0..5.0).contains(&ratio), "axis {} ratio {}", axis, ratio);
            }
        }
        previous = Some(errors);
    }
}
