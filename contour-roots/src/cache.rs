//! Cached samples of the logarithmic derivative along a contour
//!
//! Romberg integration evaluates trapezoid sums on dyadic grids
//! `t_j = j / 2^k`. Every moment needed by the approximation integrates the
//! same `f'/f` against a different polynomial weight, so the samples
//! `f'(z(t_j)) / f(z(t_j)) · z'(t_j)` are drawn once per grid point and kept
//! here. A cache belongs to one function on one contour; create a new cache
//! for a new function.

use crate::contour::Segment;
use crate::derivative::AnalyticFunction;
use crate::error::Result;
use num_complex::Complex64;
use std::cell::RefCell;

#[derive(Debug, Clone, Default)]
struct SegmentSamples {
    /// Dyadic level of the grid, `None` before the first sample
    level: Option<usize>,
    points: Vec<Complex64>,
    /// `f'/f · dz/dt` at `points`
    values: Vec<Complex64>,
}

/// Sample cache for one analytic function on one contour
#[derive(Debug, Default)]
pub struct SampleCache {
    segments: RefCell<Vec<SegmentSamples>>,
}

impl SampleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of divisions of the first segment's grid (`log2(len - 1)`)
    pub fn divisions(&self) -> Option<usize> {
        self.segments.borrow().first().and_then(|s| s.level)
    }

    /// Finest sampled level of segment `index`
    pub fn level(&self, index: usize) -> Option<usize> {
        self.segments.borrow().get(index).and_then(|s| s.level)
    }

    /// Number of stored samples across all segments
    pub fn len(&self) -> usize {
        self.segments.borrow().iter().map(|s| s.values.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Make sure segment `index` is sampled at least at dyadic `level`.
    ///
    /// Only the missing grid points are evaluated. Returns whether any new
    /// samples were drawn.
    pub fn ensure(
        &self,
        index: usize,
        segment: &Segment,
        function: &AnalyticFunction<'_>,
        level: usize,
    ) -> Result<bool> {
        let mut segments = self.segments.borrow_mut();
        if segments.len() <= index {
            segments.resize_with(index + 1, SegmentSamples::default);
        }
        let samples = &mut segments[index];

        let sample = |t: f64| -> Result<(Complex64, Complex64)> {
            let z = segment.point(t);
            Ok((z, function.log_derivative(z)? * segment.tangent(t)))
        };

        let sampled = samples.level;
        match sampled {
            Some(current) if current >= level => Ok(false),
            Some(mut current) => {
                while current < level {
                    let n_old = 1usize << current;
                    let h = 1.0 / (2 * n_old) as f64;
                    let mut points = Vec::with_capacity(2 * n_old + 1);
                    let mut values = Vec::with_capacity(2 * n_old + 1);
                    for j in 0..n_old {
                        points.push(samples.points[j]);
                        values.push(samples.values[j]);
                        let (z, v) = sample((2 * j + 1) as f64 * h)?;
                        points.push(z);
                        values.push(v);
                    }
                    points.push(samples.points[n_old]);
                    values.push(samples.values[n_old]);
                    samples.points = points;
                    samples.values = values;
                    current += 1;
                    samples.level = Some(current);
                }
                Ok(true)
            }
            None => {
                let n = 1usize << level;
                let h = 1.0 / n as f64;
                let mut points = Vec::with_capacity(n + 1);
                let mut values = Vec::with_capacity(n + 1);
                for j in 0..=n {
                    let (z, v) = sample(j as f64 * h)?;
                    points.push(z);
                    values.push(v);
                }
                samples.points = points;
                samples.values = values;
                samples.level = Some(level);
                Ok(true)
            }
        }
    }

    /// Trapezoid sum of `weight(z) · f'/f · dz/dt` over `t ∈ [0, 1]` at dyadic `level`.
    ///
    /// # Panics
    /// Panics if the segment has not been sampled at `level` or finer.
    pub fn trapezoid<W>(&self, index: usize, level: usize, weight: W) -> Complex64
    where
        W: Fn(Complex64) -> Complex64,
    {
        let segments = self.segments.borrow();
        let samples = &segments[index];
        let finest = samples.level.unwrap_or(0);
        assert!(
            samples.level.is_some() && finest >= level,
            "segment {} sampled at {:?}, level {} requested",
            index,
            samples.level,
            level
        );

        let stride = 1usize << (finest - level);
        let n = 1usize << level;
        let term = |j: usize| weight(samples.points[j * stride]) * samples.values[j * stride];

        let mut acc = (term(0) + term(n)) * 0.5;
        for j in 1..n {
            acc += term(j);
        }
        acc / n as f64
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
