//! Stopping criteria and convergence checks for the iteration loops.
//!
//! The power method terminates either when successive iterates are
//! element-wise close within a relative tolerance, or when the iteration
//! budget is exhausted. Both knobs are independent configuration options:
//! some callers deliberately run a single raw iterate (`max_iterations = 1`)
//! to inspect the un-converged sequence, others tighten the tolerance to
//! probe convergence speed.

use crate::error::{EigenError, Result};
use crate::types::{DVector, Scalar};
use num_traits::Float;

/// Reason the iteration loop terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerminationReason {
    /// Successive iterates became element-wise close within the tolerance.
    Converged,
    /// Iteration budget exhausted; the returned estimate is the best so far.
    MaxIterations,
}

/// Stopping criterion for the power-iteration loops.
///
/// Combines a relative iterate-closeness tolerance with a hard iteration
/// cap. The cap guarantees termination even on non-convergent inputs
/// (e.g. a dominant eigenvalue of negative sign, whose iterate alternates
/// in sign forever).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoppingCriterion<T>
where
    T: Scalar,
{
    /// Maximum number of multiply-and-normalize steps.
    pub max_iterations: usize,

    /// Relative tolerance for the element-wise iterate-closeness check.
    pub tolerance: T,
}

impl<T> Default for StoppingCriterion<T>
where
    T: Scalar,
{
    fn default() -> Self {
        Self {
            max_iterations: 10_000,
            tolerance: T::DEFAULT_TOLERANCE,
        }
    }
}

impl<T> StoppingCriterion<T>
where
    T: Scalar,
{
    /// Creates a new stopping criterion with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of iterations.
    pub fn with_max_iterations(mut self, max_iter: usize) -> Self {
        self.max_iterations = max_iter;
        self
    }

    /// Sets the iterate-closeness tolerance.
    pub fn with_tolerance(mut self, tol: T) -> Self {
        self.tolerance = tol;
        self
    }

    /// Validates the criterion, failing fast on structurally invalid values.
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(EigenError::invalid_parameter(
                "must be at least 1",
                "max_iterations",
                self.max_iterations,
            ));
        }
        if !(self.tolerance > T::zero()) || !Float::is_finite(self.tolerance) {
            return Err(EigenError::invalid_parameter(
                "must be positive and finite",
                "tolerance",
                self.tolerance,
            ));
        }
        Ok(())
    }
}

/// Element-wise relative closeness check between two iterates.
///
/// Two vectors are close when `|a_i - b_i| <= tol * max(|a_i|, |b_i|) + tol²`
/// for every component. The `tol²` term is an absolute floor: without it,
/// components decaying toward zero would never satisfy a purely relative
/// comparison and convergence would stall on the subdominant directions.
///
/// # Panics
///
/// Debug builds assert that both vectors have the same length; callers
/// inside this workspace always compare iterates of the same dimension.
pub fn vectors_close<T>(a: &DVector<T>, b: &DVector<T>, tolerance: T) -> bool
where
    T: Scalar,
{
    debug_assert_eq!(a.len(), b.len());
    let floor = tolerance * tolerance;
    a.iter().zip(b.iter()).all(|(&x, &y)| {
        let diff = <T as Float>::abs(x - y);
        let scale = <T as Float>::max(<T as Float>::abs(x), <T as Float>::abs(y));
        diff <= tolerance * scale + floor
    })
}
