//! Closed contours and their parametrized boundary segments
//!
//! A contour is a positively oriented closed curve made of [`Segment`]s, each
//! parametrized over `t ∈ [0, 1]`. The approximation only needs two things
//! from it: a strict interior test and the boundary parametrization.

use num_complex::Complex64;
use std::f64::consts::PI;

/// One piece of a contour boundary, parametrized on `t ∈ [0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    /// Straight line from `a` to `b`
    Line { a: Complex64, b: Complex64 },
    /// Circular arc `center + radius·exp(i(start_angle + sweep·t))`
    Arc {
        center: Complex64,
        radius: f64,
        start_angle: f64,
        sweep: f64,
    },
}

impl Segment {
    /// Point z(t) on the segment
    pub fn point(&self, t: f64) -> Complex64 {
        match *self {
            Segment::Line { a, b } => a + (b - a) * t,
            Segment::Arc {
                center,
                radius,
                start_angle,
                sweep,
            } => center + Complex64::from_polar(radius, start_angle + sweep * t),
        }
    }

    /// Derivative dz/dt
    pub fn tangent(&self, t: f64) -> Complex64 {
        match *self {
            Segment::Line { a, b } => b - a,
            Segment::Arc {
                radius,
                start_angle,
                sweep,
                ..
            } => {
                Complex64::i() * sweep * Complex64::from_polar(radius, start_angle + sweep * t)
            }
        }
    }
}

/// A closed, positively oriented contour in the complex plane
pub trait Contour {
    /// Strict interior test; must answer consistently for the same point
    fn contains(&self, z: Complex64) -> bool;

    /// Boundary segments in counter-clockwise order
    fn segments(&self) -> &[Segment];
}

/// Circle with the given center and radius
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub center: Complex64,
    pub radius: f64,
    segments: [Segment; 1],
}

impl Circle {
    /// # Panics
    /// Panics if the radius is not positive.
    pub fn new(center: Complex64, radius: f64) -> Self {
        assert!(radius > 0.0, "radius must be positive, got {}", radius);
        Self {
            center,
            radius,
            segments: [Segment::Arc {
                center,
                radius,
                start_angle: 0.0,
                sweep: 2.0 * PI,
            }],
        }
    }
}

impl Contour for Circle {
    fn contains(&self, z: Complex64) -> bool {
        (z - self.center).norm() < self.radius
    }

    fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

/// Axis-aligned rectangle `[x0, x1] × [y0, y1]`
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    pub x_range: [f64; 2],
    pub y_range: [f64; 2],
    segments: [Segment; 4],
}

impl Rectangle {
    /// # Panics
    /// Panics if either range is empty or reversed.
    pub fn new(x_range: [f64; 2], y_range: [f64; 2]) -> Self {
        assert!(
            x_range[0] < x_range[1] && y_range[0] < y_range[1],
            "rectangle ranges must be increasing: {:?} x {:?}",
            x_range,
            y_range
        );
        let corner = |x: f64, y: f64| Complex64::new(x, y);
        let [x0, x1] = x_range;
        let [y0, y1] = y_range;
        let (bl, br, tr, tl) = (corner(x0, y0), corner(x1, y0), corner(x1, y1), corner(x0, y1));
        Self {
            x_range,
            y_range,
            segments: [
                Segment::Line { a: bl, b: br },
                Segment::Line { a: br, b: tr },
                Segment::Line { a: tr, b: tl },
                Segment::Line { a: tl, b: bl },
            ],
        }
    }
}

impl Contour for Rectangle {
    fn contains(&self, z: Complex64) -> bool {
        self.x_range[0] < z.re
            && z.re < self.x_range[1]
            && self.y_range[0] < z.im
            && z.im < self.y_range[1]
    }

    fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

#[cfg(test)]
#[path = "contour_tests.rs"]
mod tests;
