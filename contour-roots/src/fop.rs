//! Formal orthogonal polynomials (FOPs) of the moment functional
//!
//! The FOPs `φ_k` are orthogonal with respect to `<p, q> = <p·q, 1>`, the
//! bilinear form defined by the contour integral of `f'/f`. Their zeros are
//! the distinct roots of `f` inside the contour.
//!
//! Each polynomial is stored by its zero set in an append-only arena indexed
//! by degree: `zeros[0]` is the constant polynomial, `zeros[1] = [μ]` with
//! `μ = <z, 1> / N`. Degree `k = r + t + 1` is tried as a *regular*
//! polynomial whose zeros are the eigenvalues of the Gram pencil
//! `(G1, G)` shifted by `μ`, where
//!
//! ```text
//! G[p, q]  = <φ_p, φ_q>
//! G1[p, q] = <φ_p, φ_1·φ_q>
//! ```
//!
//! If any of those zeros falls outside the contour the polynomial is
//! declared *inner* instead, `φ_{r+t+1} = φ_{t+1}·φ_r`.
//!
//! After each regular polynomial `φ_r`, the search stops early if
//! `|<φ_r (z-μ)^j, φ_r>| + error ≤ err_stop` for `j = 0..N-r`: the remaining
//! degree is multiplicity, not further distinct roots.

use crate::contour::Contour;
use crate::eigen::pencil_eigenvalues;
use crate::error::{Result, RootsError};
use crate::moment::MomentSource;
use crate::options::ApproxOptions;
use nalgebra::DMatrix;
use num_complex::Complex64;

/// Kind of an FOP in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolyKind {
    Regular,
    Inner,
}

/// Zero sets of the FOPs built so far, indexed by degree
#[derive(Debug, Clone, PartialEq)]
pub struct FopSequence {
    /// Centroid `<z, 1> / N`, the zero of `φ_1`
    pub mu: Complex64,
    pub zeros: Vec<Vec<Complex64>>,
    /// Kind of each entry of `zeros` (degrees 0 and 1 are regular)
    pub kinds: Vec<PolyKind>,
    /// Degree of the regular polynomial at which the stopping test fired
    pub stopped_at: Option<usize>,
}

impl FopSequence {
    fn new(mu: Complex64) -> Self {
        Self {
            mu,
            zeros: vec![Vec::new(), vec![mu]],
            kinds: vec![PolyKind::Regular, PolyKind::Regular],
            stopped_at: None,
        }
    }

    fn push(&mut self, zeros: Vec<Complex64>, kind: PolyKind) {
        self.zeros.push(zeros);
        self.kinds.push(kind);
    }

    /// Degree of the most recent polynomial
    pub fn degree(&self) -> usize {
        self.zeros.len() - 1
    }

    /// Zeros of the most recent polynomial
    pub fn last(&self) -> &[Complex64] {
        self.zeros.last().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Classification of degrees 2 and up, in construction order
    pub fn classifications(&self) -> &[PolyKind] {
        self.kinds.get(2..).unwrap_or(&[])
    }
}

/// Evaluate the monic polynomial with the given zeros
pub fn eval_monic(zeros: &[Complex64], z: Complex64) -> Complex64 {
    zeros
        .iter()
        .fold(Complex64::new(1.0, 0.0), |acc, &zeta| acc * (z - zeta))
}

/// Incremental FOP construction over one moment source
pub struct FopBuilder<'s, S: MomentSource + ?Sized, C: Contour + ?Sized> {
    source: &'s S,
    contour: &'s C,
    n: usize,
    err_stop: f64,
    verbose: bool,
    g: DMatrix<Complex64>,
    g1: DMatrix<Complex64>,
    seq: FopSequence,
    /// Number of zeros of the latest regular polynomial
    r: usize,
    /// Degrees of pending inner polynomials since then
    t: usize,
}

impl<'s, S: MomentSource + ?Sized, C: Contour + ?Sized> FopBuilder<'s, S, C> {
    /// Set up degrees 0 and 1 for a root count `n ≥ 1`.
    ///
    /// # Panics
    /// Panics if `n == 0`.
    pub fn new(source: &'s S, contour: &'s C, n: usize, options: &ApproxOptions) -> Result<Self> {
        assert!(n > 0, "FOP construction needs at least one root");

        let mu = source.moment(&|z| z)?.value / n as f64;
        let seq = FopSequence::new(mu);

        // G and G1 are only ever filled up to the leading (r+t+1)² block
        let mut g = DMatrix::zeros(n, n);
        let mut g1 = DMatrix::zeros(n, n);
        g[(0, 0)] = Complex64::new(n as f64, 0.0);
        g1[(0, 0)] = source.product(&|_| Complex64::new(1.0, 0.0), &|z| z - mu)?.value;

        Ok(Self {
            source,
            contour,
            n,
            err_stop: options.err_stop,
            verbose: options.verbose,
            g,
            g1,
            seq,
            r: 1,
            t: 0,
        })
    }

    /// Current total degree `r + t`
    pub fn degree(&self) -> usize {
        self.r + self.t
    }

    /// Build polynomials until degree `N` or until the stopping test fires
    pub fn run(mut self) -> Result<FopSequence> {
        while self.degree() < self.n {
            let stop = self.step().map_err(|err| self.guard(err))?;
            if stop {
                break;
            }
        }
        Ok(self.seq)
    }

    /// A recount below the degree already reached cannot be absorbed by a restart
    fn guard(&self, err: RootsError) -> RootsError {
        match err {
            RootsError::RootCountChanged { new_count } if new_count < self.degree() => {
                RootsError::CountBelowDegree {
                    new_count,
                    degree: self.degree(),
                }
            }
            other => other,
        }
    }

    fn extend_gram(&mut self, p: usize) -> Result<()> {
        let mu = self.seq.mu;
        let zp = &self.seq.zeros[p];
        for q in 0..=p {
            let zq = &self.seq.zeros[q];
            let phi_p = |z| eval_monic(zp, z);

            let v = self.source.product(&phi_p, &|z| eval_monic(zq, z))?.value;
            self.g[(p, q)] = v;
            self.g[(q, p)] = v;

            let v1 = self
                .source
                .product(&phi_p, &|z| (z - mu) * eval_monic(zq, z))?
                .value;
            self.g1[(p, q)] = v1;
            self.g1[(q, p)] = v1;
        }
        Ok(())
    }

    /// Zeros of the candidate regular polynomial of degree `p + 1`, if all lie inside
    fn regular_candidate(&self, p: usize) -> Result<Option<Vec<Complex64>>> {
        let size = p + 1;
        let g = self.g.view((0, 0), (size, size)).clone_owned();
        let g1 = self.g1.view((0, 0), (size, size)).clone_owned();

        let candidate = pencil_eigenvalues(&g1, &g)?.map(|eigenvalues| {
            eigenvalues
                .into_iter()
                .map(|lambda| lambda + self.seq.mu)
                .collect::<Vec<_>>()
        });
        Ok(candidate.filter(|zeros| zeros.iter().all(|&z| self.contour.contains(z))))
    }

    /// Whether every `<φ (z-μ)^j, φ>` for `j < count` is below `err_stop`
    fn all_small(&self, zeros: &[Complex64], count: usize) -> Result<bool> {
        let mu = self.seq.mu;
        let phi = |z| eval_monic(zeros, z);
        for j in 0..count {
            let m = self
                .source
                .product(&|z| phi(z) * (z - mu).powi(j as i32), &phi)?;
            report!(self.verbose, "stop test {} of {}: {:e}", j, count, m.value.norm() + m.error);
            if m.value.norm() + m.error > self.err_stop {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Add the polynomial of degree `r + t + 1`; returns whether the search is complete
    fn step(&mut self) -> Result<bool> {
        let p = self.degree();
        self.extend_gram(p)?;
        report!(
            self.verbose,
            "G = {}, G1 = {}",
            self.g.view((0, 0), (p + 1, p + 1)),
            self.g1.view((0, 0), (p + 1, p + 1))
        );

        match self.regular_candidate(p)? {
            Some(zeros) => {
                self.r = p + 1;
                self.t = 0;
                report!(self.verbose, "regular polynomial {}: zeros {:?}", self.r, zeros);
                let done = self.all_small(&zeros, self.n - self.r)?;
                self.seq.push(zeros, PolyKind::Regular);
                if done && self.r < self.n {
                    self.seq.stopped_at = Some(self.r);
                }
                Ok(done)
            }
            None => {
                self.t += 1;
                // φ_{r+t} = φ_t · φ_r
                let zeros = [
                    self.seq.zeros[self.t].as_slice(),
                    self.seq.zeros[self.r].as_slice(),
                ]
                .concat();
                report!(self.verbose, "inner polynomial {}: zeros {:?}", self.degree(), zeros);
                self.seq.push(zeros, PolyKind::Inner);
                Ok(false)
            }
        }
    }
}

/// Zero sets of the FOPs for a root count `n`, ending with the final one.
///
/// `n == 0` yields only the constant polynomial.
pub fn build_fop_zeros<S, C>(
    source: &S,
    contour: &C,
    n: usize,
    options: &ApproxOptions,
) -> Result<FopSequence>
where
    S: MomentSource + ?Sized,
    C: Contour + ?Sized,
{
    if n == 0 {
        let mut seq = FopSequence::new(Complex64::default());
        seq.zeros.truncate(1);
        seq.kinds.truncate(1);
        return Ok(seq);
    }
    FopBuilder::new(source, contour, n, options)?.run()
}

#[cfg(test)]
#[path = "fop_tests.rs"]
mod tests;
