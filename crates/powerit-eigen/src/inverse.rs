//! Shifted inverse power iteration.
//!
//! Power iteration applied to `(A − σI)⁻¹` converges to the eigenvector of
//! `A` whose eigenvalue is closest to the shift `σ`, because that eigenvalue
//! maps to the dominant eigenvalue `1/(λ − σ)` of the inverse. The inverse
//! is never formed: `A − σI` is factored once by [`crate::lu`] and each step
//! solves one triangular system pair.
//!
//! With `σ = 0` this is plain inverse iteration, converging to the
//! eigenvalue of smallest magnitude.

use num_traits::Float;
use powerit_core::{
    convergence::{vectors_close, StoppingCriterion, TerminationReason},
    error::{EigenError, Result},
    types::{DMatrix, Scalar},
};
use rand::Rng;

use crate::lu::lu_factor;
use crate::power::{random_start, EigenResult, IterateNorm};
use crate::utils::{check_square, rayleigh_quotient};

/// Configuration for the inverse-iteration solver.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InverseIterationConfig<T>
where
    T: Scalar,
{
    /// Iteration budget and iterate-closeness tolerance.
    pub criterion: StoppingCriterion<T>,

    /// Spectral shift σ; the solver converges to the eigenvalue of `A`
    /// nearest this value.
    pub shift: T,
}

impl<T> Default for InverseIterationConfig<T>
where
    T: Scalar,
{
    fn default() -> Self {
        Self {
            criterion: StoppingCriterion::default(),
            shift: T::zero(),
        }
    }
}

impl<T> InverseIterationConfig<T>
where
    T: Scalar,
{
    /// Creates a new configuration with default parameters (zero shift).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the stopping criterion.
    pub fn with_criterion(mut self, criterion: StoppingCriterion<T>) -> Self {
        self.criterion = criterion;
        self
    }

    /// Sets the maximum number of iterations.
    pub fn with_max_iterations(mut self, max_iter: usize) -> Self {
        self.criterion.max_iterations = max_iter;
        self
    }

    /// Sets the iterate-closeness tolerance.
    pub fn with_tolerance(mut self, tol: T) -> Self {
        self.criterion.tolerance = tol;
        self
    }

    /// Sets the spectral shift.
    pub fn with_shift(mut self, shift: T) -> Self {
        self.shift = shift;
        self
    }
}

/// Eigenpair solver for the eigenvalue nearest a shift, via inverse power
/// iteration.
///
/// # Examples
///
/// ```
/// use powerit_eigen::{InverseIteration, InverseIterationConfig};
/// use nalgebra::{DMatrix, DVector};
/// use rand::SeedableRng;
///
/// let a: DMatrix<f64> = DMatrix::from_diagonal(&DVector::from_vec(vec![1.0, 2.0, 5.0]));
/// let solver = InverseIteration::new(InverseIterationConfig::new().with_shift(1.8));
/// let mut rng = rand::rngs::SmallRng::seed_from_u64(3);
///
/// let result = solver.solve(&a, &mut rng).unwrap();
/// assert!((result.eigenvalue - 2.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InverseIteration<T>
where
    T: Scalar,
{
    config: InverseIterationConfig<T>,
}

impl<T> InverseIteration<T>
where
    T: Scalar,
{
    /// Creates a new solver with the given configuration.
    pub fn new(config: InverseIterationConfig<T>) -> Self {
        Self { config }
    }

    /// Returns the solver configuration.
    pub fn config(&self) -> &InverseIterationConfig<T> {
        &self.config
    }

    /// Returns the solver name.
    pub fn name(&self) -> &str {
        "Inverse iteration"
    }

    /// Computes the eigenpair of `matrix` whose eigenvalue is nearest the
    /// configured shift.
    ///
    /// The reported eigenvalue is the Rayleigh quotient of the *original*
    /// matrix at the final iterate, not of the shifted inverse. The same
    /// convergence metadata as [`crate::PowerIteration::solve`] applies.
    ///
    /// # Errors
    ///
    /// - [`EigenError::DimensionMismatch`] if `matrix` is not square
    /// - [`EigenError::InvalidParameter`] for an invalid criterion or a
    ///   non-finite shift
    /// - [`EigenError::DegenerateInput`] if `A − σI` is singular, i.e. the
    ///   shift hits an eigenvalue exactly
    pub fn solve<R>(&self, matrix: &DMatrix<T>, rng: &mut R) -> Result<EigenResult<T>>
    where
        R: Rng + ?Sized,
    {
        let n = check_square(matrix)?;
        self.config.criterion.validate()?;
        if !Float::is_finite(self.config.shift) {
            return Err(EigenError::invalid_parameter(
                "must be finite",
                "shift",
                self.config.shift,
            ));
        }

        let mut shifted = matrix.clone_owned();
        for i in 0..n {
            shifted[(i, i)] -= self.config.shift;
        }
        let lu = lu_factor(&shifted)?;

        let tolerance = self.config.criterion.tolerance;
        let mut v = random_start(n, IterateNorm::Two, rng)?;
        let mut iterations = 0;
        let mut termination = TerminationReason::MaxIterations;

        for _ in 0..self.config.criterion.max_iterations {
            let w = lu.solve(&v)?;
            let norm = w.norm();
            if !(norm > T::zero()) || !Float::is_finite(norm) {
                return Err(EigenError::degenerate_input(
                    "linear solve produced a zero or non-finite iterate",
                ));
            }
            let v_next = w / norm;
            iterations += 1;

            let close = vectors_close(&v, &v_next, tolerance);
            v = v_next;
            if close {
                termination = TerminationReason::Converged;
                break;
            }
        }

        let eigenvalue = rayleigh_quotient(matrix, &v);
        Ok(EigenResult {
            eigenvalue,
            eigenvector: v,
            iterations,
            converged: termination == TerminationReason::Converged,
            termination,
            estimates: Vec::new(),
        })
    }
}
