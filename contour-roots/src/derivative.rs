//! Analytic function wrapper with an optional exact derivative
//!
//! When no derivative is supplied it is approximated by a central finite
//! difference whose truncation error is `O(h^m)`, refined by Richardson
//! extrapolation over successively halved steps.

use crate::error::{Result, RootsError};
use num_complex::Complex64;

/// Number of halved steps in the Richardson table
const RICHARDSON_LEVELS: usize = 5;

/// Initial step relative to `max(1, |z|)`
const BASE_STEP: f64 = 0.05;

/// Central difference weights for the offsets `1..=m/2`, divided by `h`.
///
/// The stencils are antisymmetric, so `f'(z) ≈ Σ c_k (f(z + kh) - f(z - kh)) / h`.
fn central_weights(order: usize) -> &'static [f64] {
    match order {
        2 => &[1.0 / 2.0],
        4 => &[2.0 / 3.0, -1.0 / 12.0],
        6 => &[3.0 / 4.0, -3.0 / 20.0, 1.0 / 60.0],
        8 => &[4.0 / 5.0, -1.0 / 5.0, 4.0 / 105.0, -1.0 / 280.0],
        _ => unreachable!("finite difference order checked in AnalyticFunction::new"),
    }
}

/// A function of one complex variable, analytic inside and on the contour
pub struct AnalyticFunction<'a> {
    f: &'a dyn Fn(Complex64) -> Complex64,
    df: Option<&'a dyn Fn(Complex64) -> Complex64>,
    fd_order: usize,
}

impl<'a> AnalyticFunction<'a> {
    /// Wrap `f` and its optional derivative `df`.
    ///
    /// # Panics
    /// Panics unless `fd_order` is one of 2, 4, 6 or 8.
    pub fn new(
        f: &'a dyn Fn(Complex64) -> Complex64,
        df: Option<&'a dyn Fn(Complex64) -> Complex64>,
        fd_order: usize,
    ) -> Self {
        assert!(
            matches!(fd_order, 2 | 4 | 6 | 8),
            "finite difference order must be 2, 4, 6 or 8, got {}",
            fd_order
        );
        Self { f, df, fd_order }
    }

    /// Whether an exact derivative was supplied
    pub fn has_derivative(&self) -> bool {
        self.df.is_some()
    }

    pub fn value(&self, z: Complex64) -> Complex64 {
        (self.f)(z)
    }

    /// f'(z), exact if supplied, otherwise by extrapolated finite differences
    pub fn derivative(&self, z: Complex64) -> Complex64 {
        match self.df {
            Some(df) => df(z),
            None => self.finite_difference(z),
        }
    }

    /// f'(z) / f(z)
    pub fn log_derivative(&self, z: Complex64) -> Result<Complex64> {
        let value = self.derivative(z) / self.value(z);
        if value.is_finite() {
            Ok(value)
        } else {
            Err(RootsError::NonFiniteIntegrand { z })
        }
    }

    fn central_difference(&self, z: Complex64, h: f64) -> Complex64 {
        let weights = central_weights(self.fd_order);
        let mut acc = Complex64::new(0.0, 0.0);
        for (k, &c) in weights.iter().enumerate() {
            let offset = h * (k + 1) as f64;
            acc += (self.value(z + offset) - self.value(z - offset)) * c;
        }
        acc / h
    }

    fn finite_difference(&self, z: Complex64) -> Complex64 {
        let mut h = BASE_STEP * z.norm().max(1.0);
        let mut previous: Vec<Complex64> = Vec::with_capacity(RICHARDSON_LEVELS);

        for level in 0..RICHARDSON_LEVELS {
            let mut row = Vec::with_capacity(level + 1);
            row.push(self.central_difference(z, h));
            for j in 1..=level {
                // Level j removes the h^(m + 2(j - 1)) error term
                let factor = 2f64.powi((self.fd_order + 2 * (j - 1)) as i32) - 1.0;
                let refined = row[j - 1] + (row[j - 1] - previous[j - 1]) / factor;
                row.push(refined);
            }
            previous = row;
            h *= 0.5;
        }

        previous[RICHARDSON_LEVELS - 1]
    }
}

impl std::fmt::Debug for AnalyticFunction<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyticFunction")
            .field("has_derivative", &self.has_derivative())
            .field("fd_order", &self.fd_order)
            .finish()
    }
}

#[cfg(test)]
#[path = "derivative_tests.rs"]
mod tests;
