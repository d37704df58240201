//! Dense complex linear algebra for the FOP recursion (nalgebra backend)
//!
//! - [`pencil_eigenvalues`]: eigenvalues λ of `G1·v = λ·G·v`
//! - [`solve_transposed_vandermonde`]: `Vᵗ·x = s` with `V[i][p] = ζ_i^p`

use crate::error::{Result, RootsError};
use nalgebra::linalg::Schur;
use nalgebra::{DMatrix, DVector};
use num_complex::Complex64;

/// Iteration cap for the complex Schur decomposition
const SCHUR_MAX_ITERATIONS: usize = 10_000;

/// Eigenvalues of the matrix pencil `(g1, g)`.
///
/// The pencil is reduced to the standard problem for `G⁻¹·G1`. Returns
/// `Ok(None)` when `g` is singular (the pencil has infinite eigenvalues) or
/// the Schur iteration does not converge. The caller treats both like
/// eigenvalues outside the contour.
///
/// # Panics
/// Panics if the matrices are not square and of equal size.
pub fn pencil_eigenvalues(
    g1: &DMatrix<Complex64>,
    g: &DMatrix<Complex64>,
) -> Result<Option<Vec<Complex64>>> {
    pencil_eigenvalues_limited(g1, g, SCHUR_MAX_ITERATIONS)
}

/// [`pencil_eigenvalues`] with an explicit Schur iteration cap (0 = unlimited)
fn pencil_eigenvalues_limited(
    g1: &DMatrix<Complex64>,
    g: &DMatrix<Complex64>,
    max_iterations: usize,
) -> Result<Option<Vec<Complex64>>> {
    assert!(
        g.is_square() && g1.shape() == g.shape(),
        "pencil matrices must be square and of equal size: {:?} vs {:?}",
        g1.shape(),
        g.shape()
    );
    if g.nrows() == 0 {
        return Ok(Some(Vec::new()));
    }

    let reduced = match g.clone().lu().solve(g1) {
        Some(m) if m.iter().all(|v| v.is_finite()) => m,
        _ => return Ok(None),
    };

    let eigenvalues = Schur::try_new(reduced, f64::EPSILON, max_iterations)
        .and_then(|schur| schur.eigenvalues());
    Ok(eigenvalues.map(|values| values.iter().copied().collect()))
}

/// Solve `Vᵗ·x = rhs` where `V[i][p] = nodes[i]^p`.
///
/// Equivalent to the row-vector product `rhs · V⁻¹`.
pub fn solve_transposed_vandermonde(
    nodes: &[Complex64],
    rhs: &[Complex64],
) -> Result<Vec<Complex64>> {
    assert_eq!(nodes.len(), rhs.len(), "nodes and rhs must have the same length");
    let n = nodes.len();
    if n == 0 {
        return Ok(Vec::new());
    }

    let vt = DMatrix::from_fn(n, n, |p, i| nodes[i].powi(p as i32));
    let b = DVector::from_column_slice(rhs);
    let x = vt
        .lu()
        .solve(&b)
        .ok_or(RootsError::SingularMatrix {
            what: "Vandermonde matrix",
        })?;

    Ok(x.iter().copied().collect())
}

#[cfg(test)]
#[path = "eigen_tests.rs"]
mod tests;
