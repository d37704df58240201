use super::*;
use crate::contour::{Circle, Rectangle};
use crate::moment::{DiscreteMoments, Moment};
use crate::options::IntegrationMethod;

fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

/// Returns a fixed zeroth moment
struct Fixed(Complex64);

impl MomentSource for Fixed {
    fn moment(&self, weight: &dyn Fn(Complex64) -> Complex64) -> Result<Moment> {
        Ok(Moment {
            value: self.0 * weight(c(0.0, 0.0)),
            error: 0.0,
        })
    }
}

#[test]
fn test_argument_principle_discrete() {
    let source = DiscreteMoments::with_multiplicities(&[c(0.0, 0.0), c(1.0, 1.0)], &[2, 3]);
    assert_eq!(ArgumentPrinciple.count_roots(&source, 0.1).unwrap(), 5);
}

#[test]
fn test_argument_principle_rounding() {
    assert_eq!(ArgumentPrinciple.count_roots(&Fixed(c(2.96, 0.04)), 0.1).unwrap(), 3);
    assert_eq!(ArgumentPrinciple.count_roots(&Fixed(c(-0.02, 0.0)), 0.1).unwrap(), 0);
}

#[test]
fn test_argument_principle_rejects() {
    for value in [c(2.5, 0.0), c(3.0, 0.2), c(-1.0, 0.0)] {
        let err = ArgumentPrinciple.count_roots(&Fixed(value), 0.1).unwrap_err();
        assert_eq!(err, RootsError::CountNotInteger { value });
    }
}

#[test]
fn test_count_polynomial_circle() {
    let f = |z: Complex64| z * z * (z - 1.0) * (z + c(0.0, 3.0));
    let df = |z: Complex64| {
        2.0 * z * (z - 1.0) * (z + c(0.0, 3.0)) + z * z * (z + c(0.0, 3.0)) + z * z * (z - 1.0)
    };
    let circle = Circle::new(c(0.0, 0.0), 2.0);
    let options = ApproxOptions::default();
    assert_eq!(count_roots(&circle, &f, Some(&df), &options).unwrap(), 3);
    assert_eq!(count_roots(&circle, &f, None, &options).unwrap(), 3);
}

#[test]
fn test_count_rectangle_romberg() {
    let f = |z: Complex64| (z - c(0.5, 0.5)) * (z + c(0.5, 0.25)) * (z - 3.0);
    let rect = Rectangle::new([-1.0, 1.0], [-1.0, 1.0]);
    let options = ApproxOptions::default()
        .with_method(IntegrationMethod::Romberg)
        .with_divisions(8, 12);
    assert_eq!(count_roots(&rect, &f, None, &options).unwrap(), 2);
}

#[test]
fn test_count_root_on_contour() {
    let f = |z: Complex64| z - 1.0;
    let circle = Circle::new(c(0.0, 0.0), 1.0);
    let options = ApproxOptions::default().with_method(IntegrationMethod::Romberg);
    let err = count_roots(&circle, &f, None, &options).unwrap_err();
    assert!(matches!(err, RootsError::NonFiniteIntegrand { .. }));
}
