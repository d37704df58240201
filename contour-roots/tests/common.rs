//! Common test utilities
#![allow(dead_code)]

use contour_roots::{Contour, Roots};
use num_complex::Complex64;

pub fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

/// Install a test-friendly tracing subscriber (filtered by `RUST_LOG`)
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Assert that `result` holds exactly the expected roots, in any order,
/// each within `tol` and with the expected multiplicity
pub fn assert_roots_approx_eq(result: &Roots, expected: &[(Complex64, usize)], tol: f64) {
    assert_eq!(
        result.len(),
        expected.len(),
        "roots {:?} with multiplicities {:?}, expected {:?}",
        result.roots,
        result.multiplicities,
        expected
    );
    for &(root, multiplicity) in expected {
        let (index, distance) = result
            .roots
            .iter()
            .map(|z| (z - root).norm())
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .unwrap();
        assert!(
            distance < tol,
            "expected root {} not found, closest is {} at distance {:e}",
            root,
            result.roots[index],
            distance
        );
        assert_eq!(
            result.multiplicities[index], multiplicity,
            "multiplicity of root {}",
            root
        );
    }
}

/// Count conservation, integrality, distinctness and containment
pub fn check_invariants<C: Contour + ?Sized>(result: &Roots, contour: &C, n: usize, root_tol: f64) {
    assert_eq!(result.roots.len(), result.multiplicities.len());
    assert_eq!(result.total(), n);
    assert!(result.multiplicities.iter().all(|&m| m > 0));
    for (i, a) in result.roots.iter().enumerate() {
        assert!(contour.contains(*a), "root {} outside the contour", a);
        for b in &result.roots[i + 1..] {
            assert!((a - b).norm() >= root_tol, "roots {} and {} not distinct", a, b);
        }
    }
}
