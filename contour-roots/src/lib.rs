//! # contour-roots: roots and multiplicities of analytic functions
//!
//! Given a closed contour and the number `N` of roots (counted with
//! multiplicity) of an analytic function inside it, this crate locates the
//! distinct roots and their multiplicities from contour-integral moments of
//! `f'/f`, following the formal orthogonal polynomial method of Kravanja and
//! Van Barel.
//!
//! ```no_run
//! use contour_roots::{find_roots, ApproxOptions, Circle};
//! use num_complex::Complex64;
//!
//! let f = |z: Complex64| z * z * (z - 1.0);
//! let circle = Circle::new(Complex64::new(0.0, 0.0), 2.0);
//! let roots = find_roots(&circle, &f, None, &ApproxOptions::default()).unwrap();
//! assert_eq!(roots.total(), 3);
//! ```

#[macro_use]
mod macros;

pub mod approximate; // Retry loop and entry points
pub mod cache; // Dyadic sample cache for Romberg integration
pub mod contour;
pub mod count; // Argument-principle root count
pub mod derivative;
pub mod eigen; // Pencil eigenvalues and Vandermonde solve (nalgebra)
pub mod error;
pub mod fop; // Formal orthogonal polynomial recursion
pub mod gauss;
pub mod integrate;
pub mod moment;
pub mod multiplicity;
pub mod options;

// Re-export commonly used types and functions
pub use approximate::{Roots, approximate_roots, approximate_roots_with, find_roots};
pub use cache::SampleCache;
pub use contour::{Circle, Contour, Rectangle, Segment};
pub use count::{ArgumentPrinciple, RootCounter, count_roots};
pub use derivative::AnalyticFunction;
pub use error::{Result, RootsError};
pub use fop::{FopSequence, PolyKind, build_fop_zeros};
pub use gauss::{Rule, legendre};
pub use moment::{DiscreteMoments, IntegrationSettings, Moment, MomentOracle, MomentSource};
pub use options::{ApproxOptions, IntegrationMethod};

// Re-export external dependencies for convenience
pub use num_complex::Complex64;
