//! Moment oracle: weighted contour integrals of the logarithmic derivative
//!
//! For a weight `w`, the moment is
//!
//! ```text
//! <w, 1> = (1/2πi) ∮_C w(z) f'(z)/f(z) dz = Σ_k m_k w(ζ_k)
//! ```
//!
//! where `ζ_k` are the roots of `f` inside `C` with multiplicities `m_k`.
//! The bilinear form `<p, q> = <p·q, 1>` is the inner product with respect
//! to which the formal orthogonal polynomials are built.

use crate::cache::SampleCache;
use crate::contour::Contour;
use crate::derivative::AnalyticFunction;
use crate::error::Result;
use crate::integrate::{adaptive_quad, romberg};
use crate::options::{ApproxOptions, IntegrationMethod};
use num_complex::Complex64;
use std::f64::consts::PI;

/// A moment value and its (non-negative) error bound
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moment {
    pub value: Complex64,
    pub error: f64,
}

/// Source of moments `<w, 1>` for polynomial weights
pub trait MomentSource {
    fn moment(&self, weight: &dyn Fn(Complex64) -> Complex64) -> Result<Moment>;

    /// `<p, q> = <p·q, 1>`
    fn product(
        &self,
        p: &dyn Fn(Complex64) -> Complex64,
        q: &dyn Fn(Complex64) -> Complex64,
    ) -> Result<Moment> {
        self.moment(&|z| p(z) * q(z))
    }
}

/// Integration parameters shared by every moment of one approximation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegrationSettings {
    pub abs_tol: f64,
    pub rel_tol: f64,
    pub div_min: usize,
    pub div_max: usize,
    pub quad_limit: usize,
    pub method: IntegrationMethod,
}

impl From<&ApproxOptions> for IntegrationSettings {
    fn from(options: &ApproxOptions) -> Self {
        Self {
            abs_tol: options.abs_tol,
            rel_tol: options.rel_tol,
            div_min: options.div_min,
            div_max: options.div_max,
            quad_limit: options.quad_limit,
            method: options.method,
        }
    }
}

/// Moments of `f'/f` over a contour
pub struct MomentOracle<'a, C: Contour + ?Sized> {
    contour: &'a C,
    function: &'a AnalyticFunction<'a>,
    cache: &'a SampleCache,
    settings: IntegrationSettings,
    on_refine: Option<&'a dyn Fn() -> Result<()>>,
}

impl<'a, C: Contour + ?Sized> MomentOracle<'a, C> {
    pub fn new(
        contour: &'a C,
        function: &'a AnalyticFunction<'a>,
        cache: &'a SampleCache,
        settings: IntegrationSettings,
    ) -> Self {
        Self {
            contour,
            function,
            cache,
            settings,
            on_refine: None,
        }
    }

    /// Run `on_refine` after every Romberg refinement that sampled `f` anew
    pub fn with_refinement_callback(mut self, on_refine: &'a dyn Fn() -> Result<()>) -> Self {
        self.on_refine = Some(on_refine);
        self
    }
}

fn no_refinement_hook() -> Result<()> {
    Ok(())
}

impl<C: Contour + ?Sized> MomentSource for MomentOracle<'_, C> {
    fn moment(&self, weight: &dyn Fn(Complex64) -> Complex64) -> Result<Moment> {
        let s = &self.settings;
        let on_refine = self.on_refine.unwrap_or(&no_refinement_hook);

        let mut value = Complex64::default();
        let mut error = 0.0;
        for (index, segment) in self.contour.segments().iter().enumerate() {
            let estimate = match s.method {
                IntegrationMethod::Quad => adaptive_quad(
                    |t| {
                        let z = segment.point(t);
                        Ok(weight(z) * self.function.log_derivative(z)? * segment.tangent(t))
                    },
                    s.abs_tol,
                    s.rel_tol,
                    s.quad_limit,
                )?,
                IntegrationMethod::Romberg => romberg(
                    self.cache,
                    index,
                    segment,
                    self.function,
                    weight,
                    s.div_min,
                    s.div_max,
                    s.abs_tol,
                    s.rel_tol,
                    on_refine,
                )?,
            };
            value += estimate.value;
            error += estimate.error;
        }

        Ok(Moment {
            value: value / (2.0 * PI * Complex64::i()),
            error: error / (2.0 * PI),
        })
    }
}

/// Exact moments of a finite set of weighted points, `<w, 1> = Σ m_k w(ζ_k)`.
///
/// This is what the contour integral converges to for polynomial weights, so
/// it stands in for the oracle wherever quadrature error is not the subject.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteMoments {
    pub points: Vec<Complex64>,
    pub weights: Vec<f64>,
}

impl DiscreteMoments {
    /// # Panics
    /// Panics if `points` and `weights` differ in length.
    pub fn new(points: Vec<Complex64>, weights: Vec<f64>) -> Self {
        assert_eq!(points.len(), weights.len(), "points and weights must have the same length");
        Self { points, weights }
    }

    /// Points with integer multiplicities
    pub fn with_multiplicities(points: &[Complex64], multiplicities: &[usize]) -> Self {
        Self::new(
            points.to_vec(),
            multiplicities.iter().map(|&m| m as f64).collect(),
        )
    }

    pub fn total_weight(&self) -> f64 {
        self.weights.iter().sum()
    }
}

impl MomentSource for DiscreteMoments {
    fn moment(&self, weight: &dyn Fn(Complex64) -> Complex64) -> Result<Moment> {
        let value = self
            .points
            .iter()
            .zip(self.weights.iter())
            .map(|(&z, &m)| weight(z) * m)
            .sum();
        Ok(Moment { value, error: 0.0 })
    }
}

#[cfg(test)]
#[path = "moment_tests.rs"]
mod tests;
