use super::*;
use crate::contour::{Circle, Segment};
use crate::moment::DiscreteMoments;
use approx::assert_abs_diff_eq;

fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

/// Disk of radius 2 with the ring 0.7 < |z| < 0.9 cut out of its interior
struct RingCutDisk;

impl Contour for RingCutDisk {
    fn contains(&self, z: Complex64) -> bool {
        let r = z.norm();
        r < 2.0 && !(0.7 < r && r < 0.9)
    }

    fn segments(&self) -> &[Segment] {
        &[]
    }
}

/// Every element of `want` has a match in `got` within `tol`
fn assert_same_set(got: &[Complex64], want: &[Complex64], tol: f64) {
    assert_eq!(got.len(), want.len(), "got {:?}, want {:?}", got, want);
    for w in want {
        assert!(
            got.iter().any(|g| (g - w).norm() < tol),
            "{} missing from {:?}",
            w,
            got
        );
    }
}

#[test]
fn test_eval_monic() {
    assert_eq!(eval_monic(&[], c(3.0, 1.0)), c(1.0, 0.0));
    assert_eq!(eval_monic(&[c(1.0, 0.0), c(-1.0, 0.0)], c(2.0, 0.0)), c(3.0, 0.0));
}

#[test]
fn test_zero_roots() {
    let source = DiscreteMoments::new(vec![], vec![]);
    let circle = Circle::new(c(0.0, 0.0), 1.0);
    let seq = build_fop_zeros(&source, &circle, 0, &ApproxOptions::default()).unwrap();
    assert_eq!(seq.degree(), 0);
    assert!(seq.last().is_empty());
}

#[test]
fn test_single_root_is_the_centroid() {
    let source = DiscreteMoments::with_multiplicities(&[c(0.3, -0.2)], &[1]);
    let circle = Circle::new(c(0.0, 0.0), 1.0);
    let seq = build_fop_zeros(&source, &circle, 1, &ApproxOptions::default()).unwrap();
    assert_eq!(seq.degree(), 1);
    assert_abs_diff_eq!((seq.last()[0] - c(0.3, -0.2)).norm(), 0.0, epsilon = 1e-15);
    assert!(seq.classifications().is_empty());
}

#[test]
fn test_distinct_roots_all_regular() {
    let roots = [c(1.0, 0.0), c(-1.0, 0.5), c(0.2, 1.1)];
    let source = DiscreteMoments::with_multiplicities(&roots, &[1, 1, 1]);
    let circle = Circle::new(c(0.0, 0.0), 3.0);
    let seq = build_fop_zeros(&source, &circle, 3, &ApproxOptions::default()).unwrap();

    assert_eq!(seq.degree(), 3);
    assert_eq!(seq.zeros.len(), seq.kinds.len());
    assert_same_set(seq.last(), &roots, 1e-10);
    assert_eq!(seq.stopped_at, None);
    // mu is the centroid of the roots
    assert_abs_diff_eq!((seq.mu - c(0.2 / 3.0, 1.6 / 3.0)).norm(), 0.0, epsilon = 1e-15);
}

#[test]
fn test_multiple_roots_stop_early() {
    let roots = [c(0.0, 0.0), c(1.0, 0.0), c(0.0, 0.5)];
    let source = DiscreteMoments::with_multiplicities(&roots, &[2, 1, 3]);
    let circle = Circle::new(c(0.0, 0.0), 10.0);
    let seq = build_fop_zeros(&source, &circle, 6, &ApproxOptions::default()).unwrap();

    assert_eq!(seq.stopped_at, Some(3));
    assert_eq!(seq.degree(), 3);
    assert_same_set(seq.last(), &roots, 1e-9);
}

#[test]
fn test_zero_outside_contour_gives_inner_polynomial() {
    // The regular degree-2 FOP of δ(-1) + δ(0) + δ(1) has zeros ±sqrt(2/3),
    // which fall into the excluded ring
    let roots = [c(-1.0, 0.0), c(0.0, 0.0), c(1.0, 0.0)];
    let source = DiscreteMoments::with_multiplicities(&roots, &[1, 1, 1]);
    let seq = build_fop_zeros(&source, &RingCutDisk, 3, &ApproxOptions::default()).unwrap();

    assert_eq!(seq.classifications(), &[PolyKind::Inner, PolyKind::Regular]);
    // φ_2 = φ_1 · φ_1
    assert_eq!(seq.zeros[2], vec![seq.mu, seq.mu]);
    assert_same_set(seq.last(), &roots, 1e-10);

    // The same contour without the cut accepts ±sqrt(2/3) as a regular polynomial
    let circle = Circle::new(c(0.0, 0.0), 2.0);
    let seq = build_fop_zeros(&source, &circle, 3, &ApproxOptions::default()).unwrap();
    assert_eq!(seq.classifications(), &[PolyKind::Regular, PolyKind::Regular]);
    let s = (2.0f64 / 3.0).sqrt();
    assert_same_set(&seq.zeros[2], &[c(s, 0.0), c(-s, 0.0)], 1e-12);
}

#[test]
fn test_deterministic_classification() {
    let roots = [c(-1.0, 0.0), c(0.0, 0.0), c(1.0, 0.0), c(0.3, 0.4)];
    let source = DiscreteMoments::with_multiplicities(&roots, &[1, 2, 1, 1]);
    let options = ApproxOptions::default();
    let first = build_fop_zeros(&source, &RingCutDisk, 5, &options).unwrap();
    let second = build_fop_zeros(&source, &RingCutDisk, 5, &options).unwrap();
    assert_eq!(first, second);
}

/// Moment source that reports a changed root count after a fixed number of moments
struct CountChangesAfter {
    inner: DiscreteMoments,
    remaining: std::cell::Cell<usize>,
    new_count: usize,
}

impl MomentSource for CountChangesAfter {
    fn moment(&self, weight: &dyn Fn(Complex64) -> Complex64) -> Result<crate::moment::Moment> {
        if self.remaining.get() == 0 {
            return Err(RootsError::RootCountChanged {
                new_count: self.new_count,
            });
        }
        self.remaining.set(self.remaining.get() - 1);
        self.inner.moment(weight)
    }
}

#[test]
fn test_recount_below_reached_degree() {
    let roots = [c(1.0, 0.0), c(-1.0, 0.5), c(0.2, 1.1), c(-0.5, -0.5)];
    let circle = Circle::new(c(0.0, 0.0), 3.0);
    // 2 moments for degree 1 and 4 for degree 2; the failure hits once degree 2 is reached
    let source = CountChangesAfter {
        inner: DiscreteMoments::with_multiplicities(&roots, &[1, 1, 1, 1]),
        remaining: std::cell::Cell::new(2 + 4 + 3 + 1),
        new_count: 1,
    };
    let err = build_fop_zeros(&source, &circle, 4, &ApproxOptions::default()).unwrap_err();
    assert!(matches!(err, RootsError::CountBelowDegree { new_count: 1, degree } if degree >= 2));

    // A larger recount passes through unchanged for the retry loop
    let source = CountChangesAfter {
        inner: DiscreteMoments::with_multiplicities(&roots, &[1, 1, 1, 1]),
        remaining: std::cell::Cell::new(3),
        new_count: 5,
    };
    let err = build_fop_zeros(&source, &circle, 4, &ApproxOptions::default()).unwrap_err();
    assert_eq!(err, RootsError::RootCountChanged { new_count: 5 });
}
