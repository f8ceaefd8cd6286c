//! Top-k eigenpair extraction by repeated power iteration with deflation.
//!
//! After each dominant eigenpair `(λ, v)` is found, its contribution is
//! removed from a working copy of the matrix by the rank-1 update
//! `A ← A − λ v vᵀ`, so the next-largest eigenvalue becomes dominant for
//! the following solve.
//!
//! # Restrictions
//!
//! Rank-1 deflation is mathematically sound exactly when the matrix is
//! symmetric (orthogonal eigenvectors). On a non-symmetric matrix the
//! update does not guarantee removal of the found eigenvalue from the
//! remaining spectrum; this is a documented limitation, not silently
//! corrected. Numerical error also accumulates additively with each
//! deflation step, so later eigenpairs carry a larger residual than earlier
//! ones; the per-pair diagnostics on [`EigenpairSet`] surface this.

use num_traits::Float;
use powerit_core::{
    error::{EigenError, Result},
    types::{DMatrix, DVector, Scalar},
};
use rand::Rng;

use crate::power::{PowerIteration, PowerIterationConfig};
use crate::utils::check_square;

/// An eigenvalue together with its unit-Euclidean-norm eigenvector and the
/// solve metadata needed to judge its quality.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Eigenpair<T>
where
    T: Scalar,
{
    /// Eigenvalue estimate.
    pub value: T,

    /// Eigenvector, normalized to unit Euclidean norm.
    pub vector: DVector<T>,

    /// Iterations the underlying solve performed for this pair.
    pub iterations: usize,

    /// Whether the underlying solve met its tolerance for this pair.
    pub converged: bool,
}

impl<T> Eigenpair<T>
where
    T: Scalar,
{
    /// Euclidean residual `‖A v − λ v‖₂` of this pair on `matrix`.
    pub fn residual(&self, matrix: &DMatrix<T>) -> T {
        (matrix * &self.vector - &self.vector * self.value).norm()
    }
}

/// Ordered set of eigenpairs in decreasing eigenvalue-magnitude order, as
/// produced by [`DeflatingExtractor::extract`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EigenpairSet<T>
where
    T: Scalar,
{
    dim: usize,
    pairs: Vec<Eigenpair<T>>,
}

impl<T> EigenpairSet<T>
where
    T: Scalar,
{
    /// Dimension of the matrix the pairs were extracted from.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of eigenpairs in the set.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if the set contains no eigenpairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns the i-th eigenpair, if present.
    pub fn get(&self, i: usize) -> Option<&Eigenpair<T>> {
        self.pairs.get(i)
    }

    /// Iterates over the eigenpairs in extraction order.
    pub fn iter(&self) -> std::slice::Iter<'_, Eigenpair<T>> {
        self.pairs.iter()
    }

    /// Eigenvalues in extraction order.
    pub fn values(&self) -> impl Iterator<Item = T> + '_ {
        self.pairs.iter().map(|p| p.value)
    }

    /// Reconstructs `Σ λᵢ vᵢ vᵢᵀ`.
    ///
    /// For a symmetric matrix with all `n` eigenpairs extracted this
    /// approximates the original matrix within the accumulated tolerance.
    pub fn reconstruct(&self) -> DMatrix<T> {
        let mut sum = DMatrix::zeros(self.dim, self.dim);
        for pair in &self.pairs {
            sum += (&pair.vector * pair.vector.transpose()) * pair.value;
        }
        sum
    }

    /// Largest pairwise inner product `|vᵢ · vⱼ|`, i ≠ j.
    ///
    /// For a symmetric input this measures how far the extracted vectors
    /// are from mutual orthogonality; it grows with the deflation error of
    /// the later pairs.
    pub fn max_orthogonality_defect(&self) -> T {
        let mut worst = T::zero();
        for i in 0..self.pairs.len() {
            for j in (i + 1)..self.pairs.len() {
                let dot = <T as Float>::abs(self.pairs[i].vector.dot(&self.pairs[j].vector));
                worst = <T as Float>::max(worst, dot);
            }
        }
        worst
    }

    /// Consumes the set, returning the eigenpairs.
    pub fn into_vec(self) -> Vec<Eigenpair<T>> {
        self.pairs
    }
}

impl<'a, T> IntoIterator for &'a EigenpairSet<T>
where
    T: Scalar,
{
    type Item = &'a Eigenpair<T>;
    type IntoIter = std::slice::Iter<'a, Eigenpair<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

/// Extracts the top-k eigenpairs of a matrix by repeated power iteration
/// with rank-1 deflation.
///
/// # Examples
///
/// ```
/// use powerit_eigen::{DeflatingExtractor, PowerIterationConfig};
/// use nalgebra::{DMatrix, DVector};
/// use rand::SeedableRng;
///
/// let a: DMatrix<f64> = DMatrix::from_diagonal(&DVector::from_vec(vec![5.0, 3.0, 1.0]));
/// let extractor = DeflatingExtractor::new(PowerIterationConfig::new().with_tolerance(1e-10));
/// let mut rng = rand::rngs::SmallRng::seed_from_u64(1);
///
/// let pairs = extractor.extract(&a, 2, &mut rng).unwrap();
/// assert_eq!(pairs.len(), 2);
/// assert!((pairs.get(0).unwrap().value - 5.0).abs() < 1e-6);
/// assert!((pairs.get(1).unwrap().value - 3.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DeflatingExtractor<T>
where
    T: Scalar,
{
    solver: PowerIteration<T>,
}

impl<T> DeflatingExtractor<T>
where
    T: Scalar,
{
    /// Creates an extractor whose inner solves use the given configuration.
    pub fn new(config: PowerIterationConfig<T>) -> Self {
        Self {
            solver: PowerIteration::new(config),
        }
    }

    /// Creates an extractor from an existing solver.
    pub fn from_solver(solver: PowerIteration<T>) -> Self {
        Self { solver }
    }

    /// Returns the inner solver.
    pub fn solver(&self) -> &PowerIteration<T> {
        &self.solver
    }

    /// Extracts up to `count` eigenpairs of `matrix` in decreasing
    /// eigenvalue-magnitude order.
    ///
    /// A `count` larger than the matrix dimension is clamped to the
    /// dimension. The caller's matrix is never mutated; the extractor works
    /// on its own copy, which it deflates in place between solves.
    ///
    /// Per-pair convergence metadata is preserved: a pair whose solve
    /// exhausted its budget carries `converged == false`, and its residual
    /// can be inspected via [`Eigenpair::residual`].
    ///
    /// # Errors
    ///
    /// - [`EigenError::DimensionMismatch`] if `matrix` is not square
    /// - [`EigenError::InvalidParameter`] if `count == 0`, for an empty
    ///   matrix, or for an invalid stopping criterion
    /// - [`EigenError::DegenerateInput`] if a deflated working matrix maps
    ///   an iterate to the zero vector
    pub fn extract<R>(
        &self,
        matrix: &DMatrix<T>,
        count: usize,
        rng: &mut R,
    ) -> Result<EigenpairSet<T>>
    where
        R: Rng + ?Sized,
    {
        let n = check_square(matrix)?;
        if count == 0 {
            return Err(EigenError::invalid_parameter(
                "at least one eigenpair must be requested",
                "count",
                count,
            ));
        }
        let count = count.min(n);

        let mut working = matrix.clone_owned();
        let mut pairs = Vec::with_capacity(count);

        for _ in 0..count {
            let result = self.solver.solve(&working, rng)?;

            // The rank-1 update below is only valid for a unit Euclidean
            // vector, whatever norm the inner solver iterates under.
            let mut vector = result.eigenvector;
            let norm = vector.norm();
            if !(norm > T::zero()) {
                return Err(EigenError::degenerate_input(
                    "solver returned a zero eigenvector",
                ));
            }
            vector /= norm;

            working -= (&vector * vector.transpose()) * result.eigenvalue;

            pairs.push(Eigenpair {
                value: result.eigenvalue,
                vector,
                iterations: result.iterations,
                converged: result.converged,
            });
        }

        Ok(EigenpairSet { dim: n, pairs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{DMatrix, DVector};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn tight_config() -> PowerIterationConfig<f64> {
        PowerIterationConfig::new()
            .with_tolerance(1e-10)
            .with_max_iterations(50_000)
    }

    #[test]
    fn test_extracts_in_decreasing_order() {
        let a = DMatrix::from_diagonal(&DVector::from_vec(vec![2.0, 9.0, 4.0]));
        let extractor = DeflatingExtractor::new(tight_config());
        let mut rng = SmallRng::seed_from_u64(21);

        let pairs = extractor.extract(&a, 3, &mut rng).unwrap();
        let values: Vec<f64> = pairs.values().collect();
        assert_relative_eq!(values[0], 9.0, epsilon = 1e-6);
        assert_relative_eq!(values[1], 4.0, epsilon = 1e-6);
        assert_relative_eq!(values[2], 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_count_is_clamped_to_dimension() {
        let a = DMatrix::from_diagonal(&DVector::from_vec(vec![3.0, 1.0]));
        let extractor = DeflatingExtractor::new(tight_config());
        let mut rng = SmallRng::seed_from_u64(2);

        let pairs = extractor.extract(&a, 10, &mut rng).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs.dim(), 2);
    }

    #[test]
    fn test_zero_count_rejected() {
        let a = DMatrix::from_diagonal(&DVector::from_vec(vec![3.0, 1.0]));
        let extractor = DeflatingExtractor::<f64>::new(tight_config());
        let mut rng = SmallRng::seed_from_u64(2);

        assert!(matches!(
            extractor.extract(&a, 0, &mut rng),
            Err(EigenError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_caller_matrix_untouched() {
        let a = DMatrix::from_diagonal(&DVector::from_vec(vec![5.0, 3.0, 1.0]));
        let original = a.clone();
        let extractor = DeflatingExtractor::new(tight_config());
        let mut rng = SmallRng::seed_from_u64(4);

        extractor.extract(&a, 3, &mut rng).unwrap();
        assert_eq!(a, original);
    }

    #[test]
    fn test_vectors_are_unit_euclidean() {
        let a = DMatrix::from_diagonal(&DVector::from_vec(vec![5.0, 3.0, 1.0]));
        let extractor = DeflatingExtractor::new(tight_config());
        let mut rng = SmallRng::seed_from_u64(8);

        let pairs = extractor.extract(&a, 3, &mut rng).unwrap();
        for pair in &pairs {
            assert_relative_eq!(pair.vector.norm(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_reconstruct_diagonal() {
        let a = DMatrix::from_diagonal(&DVector::from_vec(vec![5.0, 3.0, 1.0]));
        let extractor = DeflatingExtractor::new(tight_config());
        let mut rng = SmallRng::seed_from_u64(15);

        let pairs = extractor.extract(&a, 3, &mut rng).unwrap();
        let reconstructed = pairs.reconstruct();
        assert_relative_eq!((&a - &reconstructed).norm(), 0.0, epsilon = 1e-5);
        assert!(pairs.max_orthogonality_defect() < 1e-5);
    }
}
