//! Normalized power iteration for the dominant eigenpair.
//!
//! The power method repeatedly applies the matrix to a vector and rescales,
//! converging toward the eigenvector of the eigenvalue with largest absolute
//! value. The eigenvalue itself is estimated with the Rayleigh quotient of
//! the final iterate.
//!
//! # Algorithm Overview
//!
//! 1. Draw a random starting vector v₀ (standard normal entries)
//! 2. Iterate: w = A vₖ, vₖ₊₁ = w / ‖w‖
//! 3. Stop when vₖ and vₖ₊₁ are element-wise close within the tolerance,
//!    or when the iteration budget runs out
//! 4. Report λ = (vᵀ A v)/(vᵀ v)
//!
//! # Convergence
//!
//! For a matrix with a unique dominant eigenvalue λ₁ of strictly largest
//! magnitude and a start vector with non-zero component along its
//! eigenvector, the iterate converges linearly with ratio |λ₂/λ₁|; on
//! symmetric matrices the Rayleigh-quotient eigenvalue estimate converges
//! with the squared ratio, `O((λ₂/λ₁)^{2k})`.

use num_traits::Float;
use powerit_core::{
    convergence::{vectors_close, StoppingCriterion, TerminationReason},
    error::{EigenError, Result},
    types::{DMatrix, DVector, Scalar},
};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::utils::{check_square, rayleigh_quotient};

/// Bounded retries for the probability-zero event of drawing a zero vector.
const MAX_START_DRAWS: usize = 8;

/// Vector norm used to rescale the iterate after each multiplication.
///
/// Any consistent choice works as long as it never divides by zero for a
/// non-null vector; the classical textbook formulation rescales by the
/// 1-norm, which is the default here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IterateNorm {
    /// Sum of absolute values (the reference behavior).
    #[default]
    One,
    /// Euclidean norm.
    Two,
    /// Maximum absolute value.
    Infinity,
}

impl IterateNorm {
    /// Evaluates the norm of `v`.
    pub fn norm<T>(&self, v: &DVector<T>) -> T
    where
        T: Scalar,
    {
        match self {
            Self::One => v
                .iter()
                .fold(T::zero(), |acc, &x| acc + <T as Float>::abs(x)),
            Self::Two => v.norm(),
            Self::Infinity => v
                .iter()
                .fold(T::zero(), |acc, &x| <T as Float>::max(acc, <T as Float>::abs(x))),
        }
    }
}

/// Configuration for the power-iteration solver.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerIterationConfig<T>
where
    T: Scalar,
{
    /// Iteration budget and iterate-closeness tolerance.
    pub criterion: StoppingCriterion<T>,

    /// Norm used to rescale the iterate each step.
    pub normalization: IterateNorm,

    /// When set, the per-iteration Rayleigh-quotient estimates are recorded
    /// in [`EigenResult::estimates`] so convergence speed can be inspected.
    pub record_estimates: bool,
}

impl<T> Default for PowerIterationConfig<T>
where
    T: Scalar,
{
    fn default() -> Self {
        Self {
            criterion: StoppingCriterion::default(),
            normalization: IterateNorm::One,
            record_estimates: false,
        }
    }
}

impl<T> PowerIterationConfig<T>
where
    T: Scalar,
{
    /// Creates a new configuration with default parameters.
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

    /// Sets the iterate normalization norm.
    pub fn with_normalization(mut self, norm: IterateNorm) -> Self {
        self.normalization = norm;
        self
    }

    /// Enables recording of per-iteration eigenvalue estimates.
    pub fn with_estimate_recording(mut self) -> Self {
        self.record_estimates = true;
        self
    }
}

/// Outcome of a dominant-eigenpair solve.
///
/// Non-convergence is not an error: when the iteration budget runs out the
/// best current estimate is returned with `converged == false` and
/// [`TerminationReason::MaxIterations`], and the caller can re-check the
/// quality of the pair via [`EigenResult::residual`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EigenResult<T>
where
    T: Scalar,
{
    /// Rayleigh-quotient eigenvalue estimate at the final iterate.
    pub eigenvalue: T,

    /// Final iterate, unit-norm under the configured [`IterateNorm`].
    pub eigenvector: DVector<T>,

    /// Number of multiply-and-normalize steps performed.
    pub iterations: usize,

    /// True if the iterate-closeness test fired before the budget ran out.
    pub converged: bool,

    /// Why the loop terminated.
    pub termination: TerminationReason,

    /// Per-iteration Rayleigh-quotient estimates
    /// (empty unless [`PowerIterationConfig::record_estimates`] is set).
    pub estimates: Vec<T>,
}

impl<T> EigenResult<T>
where
    T: Scalar,
{
    /// Euclidean residual `‖A v − λ v‖₂` of the eigenpair on `matrix`.
    pub fn residual(&self, matrix: &DMatrix<T>) -> T {
        (matrix * &self.eigenvector - &self.eigenvector * self.eigenvalue).norm()
    }
}

/// Dominant-eigenpair solver via normalized power iteration.
///
/// # Examples
///
/// ```
/// use powerit_eigen::{PowerIteration, PowerIterationConfig};
/// use nalgebra::{DMatrix, DVector};
/// use rand::SeedableRng;
///
/// let a: DMatrix<f64> = DMatrix::from_diagonal(&DVector::from_vec(vec![1.0, 2.0, 5.0]));
/// let solver = PowerIteration::new(PowerIterationConfig::new().with_tolerance(1e-8));
/// let mut rng = rand::rngs::SmallRng::seed_from_u64(7);
///
/// let result = solver.solve(&a, &mut rng).unwrap();
/// assert!((result.eigenvalue - 5.0).abs() < 1e-6);
/// ```
///
/// # Restrictions
///
/// Convergence guarantees assume a diagonalizable matrix with a real
/// spectrum and a unique dominant eigenvalue magnitude. A *negative*
/// dominant eigenvalue makes the iterate alternate in sign, so the
/// iterate-closeness test never fires and the solver runs to its budget;
/// the Rayleigh estimate is still correct in that case. Complex or tied
/// dominant magnitudes may prevent convergence to a single vector.
#[derive(Debug, Clone, Default)]
pub struct PowerIteration<T>
where
    T: Scalar,
{
    config: PowerIterationConfig<T>,
}

impl<T> PowerIteration<T>
where
    T: Scalar,
{
    /// Creates a new solver with the given configuration.
    pub fn new(config: PowerIterationConfig<T>) -> Self {
        Self { config }
    }

    /// Returns the solver configuration.
    pub fn config(&self) -> &PowerIterationConfig<T> {
        &self.config
    }

    /// Returns the solver name.
    pub fn name(&self) -> &str {
        "Power iteration"
    }

    /// Computes the dominant eigenpair of `matrix`.
    ///
    /// The starting vector is drawn from `rng` with standard-normal entries,
    /// so runs are reproducible with a seeded generator. The caller's matrix
    /// is never mutated.
    ///
    /// # Errors
    ///
    /// - [`EigenError::DimensionMismatch`] if `matrix` is not square
    /// - [`EigenError::InvalidParameter`] for an empty matrix or an invalid
    ///   stopping criterion
    /// - [`EigenError::DegenerateInput`] if an iterate is mapped to the zero
    ///   vector (zero matrix, or an iterate in the null space)
    pub fn solve<R>(&self, matrix: &DMatrix<T>, rng: &mut R) -> Result<EigenResult<T>>
    where
        R: Rng + ?Sized,
    {
        let n = check_square(matrix)?;
        self.config.criterion.validate()?;

        let tolerance = self.config.criterion.tolerance;
        let mut v = random_start(n, self.config.normalization, rng)?;
        let mut estimates = Vec::new();
        let mut iterations = 0;
        let mut termination = TerminationReason::MaxIterations;

        for _ in 0..self.config.criterion.max_iterations {
            let w = matrix * &v;
            let norm = self.config.normalization.norm(&w);
            if !(norm > T::zero()) || !Float::is_finite(norm) {
                return Err(EigenError::degenerate_input(
                    "matrix-vector product has zero or non-finite norm",
                ));
            }
            let v_next = w / norm;
            iterations += 1;

            if self.config.record_estimates {
                estimates.push(rayleigh_quotient(matrix, &v_next));
            }

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
            estimates,
        })
    }
}

/// Draws a random unit vector (standard-normal entries, rescaled by `norm`).
pub(crate) fn random_start<T, R>(n: usize, norm: IterateNorm, rng: &mut R) -> Result<DVector<T>>
where
    T: Scalar,
    R: Rng + ?Sized,
{
    for _ in 0..MAX_START_DRAWS {
        let v = DVector::from_fn(n, |_, _| {
            let x: f64 = StandardNormal.sample(rng);
            <T as Scalar>::from_f64(x)
        });
        let m = norm.norm(&v);
        if m > T::zero() && Float::is_finite(m) {
            return Ok(v / m);
        }
    }
    Err(EigenError::degenerate_input(
        "failed to draw a non-zero starting vector",
    ))
}
