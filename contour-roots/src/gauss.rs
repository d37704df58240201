//! Gauss quadrature rules for numerical integration
//!
//! This module provides quadrature rules for approximating integrals by weighted sums.
//!
//! The integral of f(x) over [a, b] is approximated by a weighted sum:
//!
//! sum(f(xi) * wi for (xi, wi) in zip(x, w))
//!
//! where we generally have superexponential convergence for smooth f(x)
//! with the number of quadrature points. The adaptive integrator in
//! [`crate::integrate`] reseats one fixed rule onto every subinterval.

use num_traits::Float;
use std::fmt::Debug;

/// Quadrature rule for numerical integration.
///
/// Represents an approximation of an integral by a weighted sum over discrete points.
#[derive(Debug, Clone)]
pub struct Rule<T> {
    /// Quadrature points
    pub x: Vec<T>,
    /// Quadrature weights
    pub w: Vec<T>,
    /// Left endpoint of integration interval
    pub a: T,
    /// Right endpoint of integration interval
    pub b: T,
}

impl<T> Rule<T>
where
    T: Float + Debug,
{
    /// Create a new quadrature rule from points and weights.
    ///
    /// # Panics
    /// Panics if x and w have different lengths.
    pub fn new(x: Vec<T>, w: Vec<T>, a: T, b: T) -> Self {
        assert_eq!(x.len(), w.len(), "x and w must have the same length");
        Self { x, w, a, b }
    }

    /// Create a default rule with empty arrays on [-1, 1].
    pub fn empty() -> Self {
        Self {
            x: vec![],
            w: vec![],
            a: -T::one(),
            b: T::one(),
        }
    }

    /// Number of quadrature points
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Reseat the rule to a new interval [a, b].
    ///
    /// Scales and translates the quadrature points and weights to the new interval.
    pub fn reseat(&self, a: T, b: T) -> Self {
        let half = T::from(0.5).unwrap_or_else(T::one);
        let scaling = (b - a) / (self.b - self.a);
        let midpoint_old = (self.b + self.a) * half;
        let midpoint_new = (b + a) * half;

        let x = self
            .x
            .iter()
            .map(|&xi| scaling * (xi - midpoint_old) + midpoint_new)
            .collect();
        let w = self.w.iter().map(|&wi| wi * scaling).collect();

        Self { x, w, a, b }
    }

    /// Apply the rule to `f`, reseated onto [a, b], without allocating.
    ///
    /// `f` may return any type that can be scaled by a weight, which lets the
    /// same real rule integrate complex-valued integrands.
    pub fn integrate<V, F>(&self, a: T, b: T, mut f: F) -> V
    where
        F: FnMut(T) -> V,
        V: std::ops::Add<Output = V> + std::ops::Mul<T, Output = V> + Default,
    {
        let half = T::from(0.5).unwrap_or_else(T::one);
        let scaling = (b - a) / (self.b - self.a);
        let midpoint_old = (self.b + self.a) * half;
        let midpoint_new = (b + a) * half;

        let mut acc = V::default();
        for (&xi, &wi) in self.x.iter().zip(self.w.iter()) {
            let t = scaling * (xi - midpoint_old) + midpoint_new;
            acc = acc + f(t) * (wi * scaling);
        }
        acc
    }

    /// Validate the rule for consistency.
    ///
    /// # Returns
    /// `true` if the rule is valid, `false` otherwise.
    pub fn validate(&self) -> bool {
        if self.a >= self.b {
            return false;
        }

        if self.x.len() != self.w.len() {
            return false;
        }

        // Check that all points are within [a, b]
        if self.x.iter().any(|&xi| xi < self.a || xi > self.b) {
            return false;
        }

        // Check that points are sorted
        self.x.windows(2).all(|pair| pair[0] < pair[1])
    }
}

/// Compute Gauss-Legendre quadrature nodes and weights on [-1, 1].
///
/// Nodes are the roots of P_n, refined by Newton's method from
/// Chebyshev-like initial guesses.
fn gauss_legendre_nodes_weights<T>(n: usize) -> (Vec<T>, Vec<T>)
where
    T: Float + Debug,
{
    if n == 0 {
        return (Vec::new(), Vec::new());
    }

    let cast = |v: f64| T::from(v).unwrap_or_else(T::zero);

    if n == 1 {
        return (vec![T::zero()], vec![cast(2.0)]);
    }

    let mut x = Vec::with_capacity(n);
    let mut w = Vec::with_capacity(n);

    let m = n.div_ceil(2);
    let pi = cast(std::f64::consts::PI);
    let n_val = cast(n as f64);

    for i in 0..m {
        let i_val = cast(i as f64);

        // Initial guess using Chebyshev nodes
        let mut z = (pi * (i_val + cast(0.75)) / (n_val + cast(0.5))).cos();

        for _ in 0..100 {
            let (p0, p1) = legendre_polynomial_and_derivative(n, z);
            let dz = p0 / p1;
            z = z - dz;
            if dz.abs() <= T::epsilon() {
                break;
            }
        }

        let (_, p1) = legendre_polynomial_and_derivative(n, z);
        let weight = cast(2.0) / ((T::one() - z * z) * p1 * p1);

        x.push(-z);
        w.push(weight);

        if i != n - 1 - i {
            x.push(z);
            w.push(weight);
        }
    }

    // Sort by x values
    let mut indices: Vec<usize> = (0..n).collect();
    indices.sort_by(|&a, &b| {
        x[a].partial_cmp(&x[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let sorted_x = indices.iter().map(|&i| x[i]).collect();
    let sorted_w = indices.iter().map(|&i| w[i]).collect();

    (sorted_x, sorted_w)
}

/// Compute Legendre polynomial P_n(x) and its derivative using recurrence relation.
fn legendre_polynomial_and_derivative<T>(n: usize, x: T) -> (T, T)
where
    T: Float + Debug,
{
    if n == 0 {
        return (T::one(), T::zero());
    }

    if n == 1 {
        return (x, T::one());
    }

    let two = T::one() + T::one();
    let mut p0 = T::one();
    let mut p1 = x;
    let mut dp0 = T::zero();
    let mut dp1 = T::one();

    for k in 2..=n {
        let k_f = T::from(k as f64).unwrap_or_else(T::one);
        let k1_f = k_f - T::one();

        let p2 = ((two * k1_f + T::one()) * x * p1 - k1_f * p0) / k_f;
        let dp2 = ((two * k1_f + T::one()) * (p1 + x * dp1) - k1_f * dp0) / k_f;

        p0 = p1;
        p1 = p2;
        dp0 = dp1;
        dp1 = dp2;
    }

    (p1, dp1)
}

/// Create a Gauss-Legendre quadrature rule with n points on [-1, 1].
pub fn legendre<T>(n: usize) -> Rule<T>
where
    T: Float + Debug,
{
    if n == 0 {
        return Rule::empty();
    }

    let (x, w) = gauss_legendre_nodes_weights(n);
    Rule::new(x, w, -T::one(), T::one())
}

#[cfg(test)]
#[path = "gauss_tests.rs"]
mod tests;
