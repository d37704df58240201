//! Error types for root and multiplicity approximation

use num_complex::Complex64;

/// Errors raised while approximating roots inside a contour
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RootsError {
    /// Refined sampling showed that the assumed number of roots is stale.
    ///
    /// Absorbed by the retry loop unless the new count exceeds the caller's
    /// `max_roots` bound, in which case the contour should be subdivided.
    #[error("number of roots inside the contour changed to {new_count}")]
    RootCountChanged { new_count: usize },

    /// The recovered multiplicities are not sufficiently close to positive integers
    #[error("some multiplicities are not integers: {multiplicities:?}")]
    Multiplicity { multiplicities: Vec<Complex64> },

    /// A recount produced fewer roots than the polynomial degree already reached
    #[error("root count dropped to {new_count} below the reached degree {degree}")]
    CountBelowDegree { new_count: usize, degree: usize },

    /// The argument principle integral is not close to an integer
    #[error("root count integral {value} is not close to an integer")]
    CountNotInteger { value: Complex64 },

    /// f'/f could not be evaluated on the contour (a root or pole on the boundary)
    #[error("non-finite integrand at z = {z}")]
    NonFiniteIntegrand { z: Complex64 },

    #[error("singular matrix in {what}")]
    SingularMatrix { what: &'static str },
}

pub type Result<T> = std::result::Result<T, RootsError>;
