//! Multiplicities of approximate roots
//!
//! With distinct roots `ζ_0..ζ_{n-1}`, the power sums `s_p = <z^p, 1>` satisfy
//! `s_p = Σ_i m_i ζ_i^p`, a transposed Vandermonde system in the
//! multiplicities `m_i`. The solution should be integral; anything else means
//! the roots or the moments are not accurate enough.

use crate::eigen::solve_transposed_vandermonde;
use crate::error::{Result, RootsError};
use crate::moment::MomentSource;
use num_complex::Complex64;

/// Drop roots that lie within `root_tol` of a later root.
///
/// Of a cluster of near-duplicates the last occurrence is kept.
pub fn dedup_roots(roots: &[Complex64], root_tol: f64) -> Vec<Complex64> {
    roots
        .iter()
        .enumerate()
        .filter(|&(i, z)| !roots[i + 1..].iter().any(|w| (z - w).norm() < root_tol))
        .map(|(_, &z)| z)
        .collect()
}

/// Solve for the (complex, unrounded) multiplicities of `roots`.
///
/// `n` is the total root count, `s_0 = n`; higher power sums are moments.
pub fn solve_multiplicities<S>(source: &S, roots: &[Complex64], n: usize) -> Result<Vec<Complex64>>
where
    S: MomentSource + ?Sized,
{
    let mut rhs = Vec::with_capacity(roots.len());
    for p in 0..roots.len() {
        let s = if p == 0 {
            Complex64::new(n as f64, 0.0)
        } else {
            source.moment(&|z| z.powi(p as i32))?.value
        };
        rhs.push(s);
    }
    solve_transposed_vandermonde(roots, &rhs)
}

/// Round multiplicities to integers and drop the roots they round to zero.
///
/// Fails with [`RootsError::Multiplicity`] unless every value is within
/// `integer_tol` of a non-negative integer.
pub fn round_multiplicities(
    roots: &[Complex64],
    raw: &[Complex64],
    integer_tol: f64,
) -> Result<(Vec<Complex64>, Vec<usize>)> {
    assert_eq!(roots.len(), raw.len(), "one multiplicity per root");

    let integral = raw.iter().all(|m| {
        let rounded = m.re.round();
        (rounded - m.re).abs() < integer_tol && m.im.abs() < integer_tol && rounded >= 0.0
    });
    if !integral {
        return Err(RootsError::Multiplicity {
            multiplicities: raw.to_vec(),
        });
    }

    Ok(roots
        .iter()
        .zip(raw.iter())
        .map(|(&z, m)| (z, m.re.round() as usize))
        .filter(|&(_, m)| m > 0)
        .unzip())
}

#[cfg(test)]
#[path = "multiplicity_tests.rs"]
mod tests;
