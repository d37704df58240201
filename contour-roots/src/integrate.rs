//! Integrators for complex-valued integrands on `t ∈ [0, 1]`
//!
//! Two strategies back the moment oracle:
//! - [`adaptive_quad`]: globally adaptive Gauss-Legendre quadrature. Each
//!   interval carries a 16-point estimate and the sum of the estimates on its
//!   two halves; their difference is the error estimate, and the interval with
//!   the largest error is bisected next.
//! - [`romberg`]: Romberg extrapolation of trapezoid sums drawn from a
//!   [`SampleCache`], refining the dyadic grid one division at a time.

use crate::cache::SampleCache;
use crate::contour::Segment;
use crate::derivative::AnalyticFunction;
use crate::error::{Result, RootsError};
use crate::gauss::{Rule, legendre};
use num_complex::Complex64;
use once_cell::sync::Lazy;

/// Fixed-order rule reseated onto every subinterval
static GAUSS_RULE: Lazy<Rule<f64>> = Lazy::new(|| legendre(16));

/// Value of an integral together with an error estimate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub value: Complex64,
    pub error: f64,
}

fn gauss<F>(integrand: &F, a: f64, b: f64) -> Result<Complex64>
where
    F: Fn(f64) -> Result<Complex64>,
{
    let mut failure: Option<RootsError> = None;
    let value = GAUSS_RULE.integrate(a, b, |t| match integrand(t) {
        Ok(v) => v,
        Err(err) => {
            failure.get_or_insert(err);
            Complex64::default()
        }
    });
    match failure {
        Some(err) => Err(err),
        None => Ok(value),
    }
}

#[derive(Debug, Clone, Copy)]
struct Interval {
    a: f64,
    b: f64,
    left: Complex64,
    right: Complex64,
    error: f64,
}

impl Interval {
    fn new<F>(integrand: &F, a: f64, b: f64, coarse: Complex64) -> Result<Self>
    where
        F: Fn(f64) -> Result<Complex64>,
    {
        let m = 0.5 * (a + b);
        let left = gauss(integrand, a, m)?;
        let right = gauss(integrand, m, b)?;
        Ok(Self {
            a,
            b,
            left,
            right,
            error: (left + right - coarse).norm(),
        })
    }

    fn value(&self) -> Complex64 {
        self.left + self.right
    }
}

/// Globally adaptive quadrature of `integrand` over [0, 1].
///
/// Stops once the summed error estimate is below `max(abs_tol, rel_tol·|I|)`
/// or `limit` subintervals exist; in the latter case the best estimate and
/// its error are returned as they stand.
pub fn adaptive_quad<F>(integrand: F, abs_tol: f64, rel_tol: f64, limit: usize) -> Result<Estimate>
where
    F: Fn(f64) -> Result<Complex64>,
{
    let whole = gauss(&integrand, 0.0, 1.0)?;
    let mut intervals = vec![Interval::new(&integrand, 0.0, 1.0, whole)?];

    loop {
        let value: Complex64 = intervals.iter().map(Interval::value).sum();
        let error: f64 = intervals.iter().map(|iv| iv.error).sum();

        if error <= abs_tol.max(rel_tol * value.norm()) || intervals.len() >= limit {
            return Ok(Estimate { value, error });
        }

        let worst = intervals
            .iter()
            .enumerate()
            .max_by(|(_, x), (_, y)| x.error.total_cmp(&y.error))
            .map(|(i, _)| i)
            .unwrap_or(0);
        let split = intervals.swap_remove(worst);
        let m = 0.5 * (split.a + split.b);
        intervals.push(Interval::new(&integrand, split.a, m, split.left)?);
        intervals.push(Interval::new(&integrand, m, split.b, split.right)?);
    }
}

/// Romberg integration of `weight(z) · f'/f · dz/dt` along one segment.
///
/// The cache is sampled at `div_min` divisions up front and refined one
/// division at a time up to `div_max`. `on_refine` runs after every
/// refinement that drew new samples; an error from it aborts the integration.
#[allow(clippy::too_many_arguments)]
pub fn romberg<W>(
    cache: &SampleCache,
    index: usize,
    segment: &Segment,
    function: &AnalyticFunction<'_>,
    weight: W,
    div_min: usize,
    div_max: usize,
    abs_tol: f64,
    rel_tol: f64,
    on_refine: &dyn Fn() -> Result<()>,
) -> Result<Estimate>
where
    W: Fn(Complex64) -> Complex64,
{
    let div_max = div_max.max(1);
    let div_min = div_min.min(div_max);

    if cache.ensure(index, segment, function, div_min)? {
        on_refine()?;
    }

    let mut previous: Vec<Complex64> = Vec::new();
    let mut estimate = Estimate {
        value: Complex64::default(),
        error: f64::INFINITY,
    };

    for k in 0..=div_max {
        if k > div_min && cache.ensure(index, segment, function, k)? {
            on_refine()?;
        }

        let mut row = Vec::with_capacity(k + 1);
        row.push(cache.trapezoid(index, k, &weight));
        for j in 1..=k {
            let factor = 4f64.powi(j as i32) - 1.0;
            row.push(row[j - 1] + (row[j - 1] - previous[j - 1]) / factor);
        }

        if k >= 1 {
            estimate = Estimate {
                value: row[k],
                error: (row[k] - previous[k - 1]).norm(),
            };
            if k >= div_min && estimate.error <= abs_tol.max(rel_tol * estimate.value.norm()) {
                return Ok(estimate);
            }
        }
        previous = row;
    }

    Ok(estimate)
}

#[cfg(test)]
#[path = "integrate_tests.rs"]
mod tests;
