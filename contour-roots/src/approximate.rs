//! Roots and multiplicities of an analytic function inside a contour
//!
//! One attempt builds the FOPs for an assumed root count `N`, merges
//! near-duplicate zeros of the last one and solves for the multiplicities.
//! Under Romberg integration the count is re-checked whenever the sample
//! cache is refined past the grid it was established on; a different count
//! abandons the attempt and the next one starts over with the new count.

use crate::cache::SampleCache;
use crate::contour::Contour;
use crate::count::{ArgumentPrinciple, RootCounter};
use crate::derivative::AnalyticFunction;
use crate::error::{Result, RootsError};
use crate::fop::build_fop_zeros;
use crate::moment::{IntegrationSettings, MomentOracle, MomentSource};
use crate::multiplicity::{dedup_roots, round_multiplicities, solve_multiplicities};
use crate::options::{ApproxOptions, IntegrationMethod};
use num_complex::Complex64;
use std::cell::Cell;

/// Distinct roots and their multiplicities
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roots {
    pub roots: Vec<Complex64>,
    pub multiplicities: Vec<usize>,
}

impl Roots {
    /// Number of roots counted with multiplicity
    pub fn total(&self) -> usize {
        self.multiplicities.iter().sum()
    }

    /// Number of distinct roots
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// `(root, multiplicity)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (Complex64, usize)> + '_ {
        self.roots
            .iter()
            .copied()
            .zip(self.multiplicities.iter().copied())
    }
}

/// Outcome of one approximation attempt
#[derive(Debug, Clone, PartialEq)]
enum Attempt {
    Found(Roots),
    /// The root count turned out to be different; start over with it
    Retry(usize),
}

/// Approximate the roots of `function` inside `contour`, given that there are
/// `n` of them counted with multiplicity.
pub fn approximate_roots<C: Contour + ?Sized>(
    contour: &C,
    function: &AnalyticFunction<'_>,
    n: usize,
    options: &ApproxOptions,
) -> Result<Roots> {
    let cache = SampleCache::new();
    approximate_roots_with(contour, function, &cache, n, &ArgumentPrinciple, options)
}

/// Like [`approximate_roots`], reusing the samples in `cache` and re-checking
/// the count with `counter`.
///
/// `cache` must hold samples of `function` on `contour` only.
pub fn approximate_roots_with<C, R>(
    contour: &C,
    function: &AnalyticFunction<'_>,
    cache: &SampleCache,
    n: usize,
    counter: &R,
    options: &ApproxOptions,
) -> Result<Roots>
where
    C: Contour + ?Sized,
    R: RootCounter + ?Sized,
{
    let mut n = n;
    loop {
        match attempt(contour, function, cache, n, counter, options)? {
            Attempt::Found(roots) => return Ok(roots),
            Attempt::Retry(new_count) => {
                if options.max_roots.is_some_and(|max| new_count > max) {
                    return Err(RootsError::RootCountChanged { new_count });
                }
                report!(
                    options.verbose,
                    "root count changed from {} to {}, starting over",
                    n,
                    new_count
                );
                n = new_count;
            }
        }
    }
}

/// Count the roots of `f` inside `contour`, then approximate them.
pub fn find_roots<C: Contour + ?Sized>(
    contour: &C,
    f: &dyn Fn(Complex64) -> Complex64,
    df: Option<&dyn Fn(Complex64) -> Complex64>,
    options: &ApproxOptions,
) -> Result<Roots> {
    let function = AnalyticFunction::new(f, df, options.fd_order);
    let cache = SampleCache::new();
    let n = {
        let settings = IntegrationSettings::from(options);
        let oracle = MomentOracle::new(contour, &function, &cache, settings);
        ArgumentPrinciple.count_roots(&oracle, options.integer_tol)?
    };
    report!(options.verbose, "{} roots inside the contour", n);
    approximate_roots_with(contour, &function, &cache, n, &ArgumentPrinciple, options)
}

fn attempt<C, R>(
    contour: &C,
    function: &AnalyticFunction<'_>,
    cache: &SampleCache,
    n: usize,
    counter: &R,
    options: &ApproxOptions,
) -> Result<Attempt>
where
    C: Contour + ?Sized,
    R: RootCounter + ?Sized,
{
    if n == 0 {
        return Ok(Attempt::Found(Roots::default()));
    }
    report!(options.verbose, "approximating {} roots", n);

    let settings = IntegrationSettings::from(options);
    // Grid the current count was established on
    let counted_at = Cell::new(cache.divisions());

    let recount = || -> Result<()> {
        let divisions = cache.divisions();
        if divisions <= counted_at.get() {
            return Ok(());
        }
        report!(options.verbose, "checking the root count with {:?} divisions", divisions);

        let settings = IntegrationSettings {
            div_min: divisions.unwrap_or(settings.div_min),
            ..settings
        };
        let oracle = MomentOracle::new(contour, function, cache, settings);
        let new_count = counter.count_roots(&oracle, options.integer_tol)?;
        counted_at.set(cache.divisions());

        if new_count != n {
            return Err(RootsError::RootCountChanged { new_count });
        }
        Ok(())
    };

    let mut oracle = MomentOracle::new(contour, function, cache, settings);
    if options.method == IntegrationMethod::Romberg {
        oracle = oracle.with_refinement_callback(&recount);
    }

    match solve(&oracle, contour, n, options) {
        Ok(roots) => Ok(Attempt::Found(roots)),
        Err(RootsError::RootCountChanged { new_count }) => Ok(Attempt::Retry(new_count)),
        Err(err) => Err(err),
    }
}

fn solve<S, C>(source: &S, contour: &C, n: usize, options: &ApproxOptions) -> Result<Roots>
where
    S: MomentSource + ?Sized,
    C: Contour + ?Sized,
{
    let seq = build_fop_zeros(source, contour, n, options)?;
    report!(
        options.verbose,
        "FOP kinds {:?}, stopped at {:?}",
        seq.classifications(),
        seq.stopped_at
    );

    let roots = dedup_roots(seq.last(), options.root_tol);
    report!(options.verbose, "distinct roots: {:?}", roots);

    let raw = solve_multiplicities(source, &roots, n)?;
    report!(options.verbose, "multiplicities: {:?}", raw);

    let (roots, multiplicities) = round_multiplicities(&roots, &raw, options.integer_tol)?;
    report!(options.verbose, "final roots: {:?} with multiplicities {:?}", roots, multiplicities);
    Ok(Roots {
        roots,
        multiplicities,
    })
}

#[cfg(test)]
#[path = "approximate_tests.rs"]
mod tests;
