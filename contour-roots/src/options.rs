//! Configuration of the root/multiplicity approximation

/// Integration strategy used by the moment oracle
///
/// Values mirror the two integrators available to the moment oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegrationMethod {
    /// Globally adaptive fixed-order Gauss-Legendre quadrature
    #[default]
    Quad,
    /// Romberg extrapolation over cached trapezoid samples that double per division
    Romberg,
}

/// Tolerances and switches for [`crate::approximate_roots`]
#[derive(Debug, Clone, PartialEq)]
pub struct ApproxOptions {
    /// Absolute error tolerance for integration
    pub abs_tol: f64,
    /// Relative error tolerance for integration
    pub rel_tol: f64,
    /// Computed multiplicities must lie within this distance of an integer
    pub integer_tol: f64,
    /// Threshold on `|<phi (z-mu)^j, phi>| + error` below which all roots count as found
    pub err_stop: f64,
    /// Minimum number of divisions before Romberg integration may exit
    pub div_min: usize,
    /// Maximum number of divisions for Romberg integration
    pub div_max: usize,
    /// Error order of the finite difference used when no derivative is given (even)
    pub fd_order: usize,
    /// Roots closer than this are merged
    pub root_tol: f64,
    pub method: IntegrationMethod,
    /// Largest acceptable root count; larger recounts are reported to the caller
    pub max_roots: Option<usize>,
    /// Maximum number of subintervals per segment for adaptive quadrature
    pub quad_limit: usize,
    /// Raise the diagnostic trace from `debug` to `info`
    pub verbose: bool,
}

impl Default for ApproxOptions {
    fn default() -> Self {
        Self {
            abs_tol: 1e-12,
            rel_tol: 1e-12,
            integer_tol: 0.1,
            err_stop: 1e-8,
            div_min: 5,
            div_max: 10,
            fd_order: 2,
            root_tol: 1e-8,
            method: IntegrationMethod::Quad,
            max_roots: None,
            quad_limit: 50,
            verbose: false,
        }
    }
}

impl ApproxOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerances(mut self, abs_tol: f64, rel_tol: f64) -> Self {
        self.abs_tol = abs_tol;
        self.rel_tol = rel_tol;
        self
    }

    pub fn with_integer_tol(mut self, integer_tol: f64) -> Self {
        self.integer_tol = integer_tol;
        self
    }

    pub fn with_err_stop(mut self, err_stop: f64) -> Self {
        self.err_stop = err_stop;
        self
    }

    pub fn with_divisions(mut self, div_min: usize, div_max: usize) -> Self {
        self.div_min = div_min;
        self.div_max = div_max.max(div_min);
        self
    }

    pub fn with_fd_order(mut self, fd_order: usize) -> Self {
        self.fd_order = fd_order;
        self
    }

    pub fn with_root_tol(mut self, root_tol: f64) -> Self {
        self.root_tol = root_tol;
        self
    }

    pub fn with_method(mut self, method: IntegrationMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_max_roots(mut self, max_roots: Option<usize>) -> Self {
        self.max_roots = max_roots;
        self
    }

    pub fn with_quad_limit(mut self, quad_limit: usize) -> Self {
        self.quad_limit = quad_limit.max(1);
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}
