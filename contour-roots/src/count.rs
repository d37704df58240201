//! Root counting by the argument principle
//!
//! The number of roots of `f` inside `C`, counted with multiplicity, is the
//! zeroth moment `<1, 1> = (1/2πi) ∮_C f'/f dz`.

use crate::cache::SampleCache;
use crate::contour::Contour;
use crate::derivative::AnalyticFunction;
use crate::error::{Result, RootsError};
use crate::moment::{IntegrationSettings, MomentOracle, MomentSource};
use crate::options::ApproxOptions;
use num_complex::Complex64;

/// Something that can tell how many roots a moment source sees
pub trait RootCounter {
    fn count_roots(&self, source: &dyn MomentSource, integer_tol: f64) -> Result<usize>;
}

/// Rounds the zeroth moment to the nearest non-negative integer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArgumentPrinciple;

impl RootCounter for ArgumentPrinciple {
    fn count_roots(&self, source: &dyn MomentSource, integer_tol: f64) -> Result<usize> {
        let value = source.moment(&|_| Complex64::new(1.0, 0.0))?.value;
        let rounded = value.re.round();
        if (rounded - value.re).abs() >= integer_tol
            || value.im.abs() >= integer_tol
            || rounded < 0.0
        {
            return Err(RootsError::CountNotInteger { value });
        }
        Ok(rounded as usize)
    }
}

/// Number of roots of `f` inside `contour`, counted with multiplicity
pub fn count_roots<C: Contour + ?Sized>(
    contour: &C,
    f: &dyn Fn(Complex64) -> Complex64,
    df: Option<&dyn Fn(Complex64) -> Complex64>,
    options: &ApproxOptions,
) -> Result<usize> {
    let function = AnalyticFunction::new(f, df, options.fd_order);
    let cache = SampleCache::new();
    let oracle = MomentOracle::new(contour, &function, &cache, IntegrationSettings::from(options));
    let n = ArgumentPrinciple.count_roots(&oracle, options.integer_tol)?;
    report!(options.verbose, "{} roots inside the contour", n);
    Ok(n)
}

#[cfg(test)]
#[path = "count_tests.rs"]
mod tests;
