//! LU factorization by Gaussian elimination, without pivoting.
//!
//! Doolittle elimination producing a unit lower-triangular `L` and an upper
//! triangular `U` with `A = L U`, together with the floating-point operation
//! count of the elimination (two operations per updated entry plus one per
//! multiplier). The factorization backs the repeated linear solves of
//! [inverse iteration](crate::inverse).
//!
//! # Restrictions
//!
//! No row pivoting is performed: a zero pivot aborts the factorization with
//! a [`EigenError::DegenerateInput`] error, and near-zero pivots can amplify
//! rounding error. This keeps the operation count meaningful for the
//! matrices the solvers feed it, which are diagonally shifted and generically
//! well-pivoted.

use powerit_core::{
    error::{EigenError, Result},
    types::{DMatrix, DVector, Scalar},
};

use crate::utils::check_square;

/// The factors `A = L U` of a square matrix, with the elimination
/// operation count.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LuDecomposition<T>
where
    T: Scalar,
{
    l: DMatrix<T>,
    u: DMatrix<T>,
    op_count: usize,
}

impl<T> LuDecomposition<T>
where
    T: Scalar,
{
    /// Unit lower-triangular factor.
    pub fn l(&self) -> &DMatrix<T> {
        &self.l
    }

    /// Upper-triangular factor.
    pub fn u(&self) -> &DMatrix<T> {
        &self.u
    }

    /// Floating-point operations spent in the elimination.
    pub fn op_count(&self) -> usize {
        self.op_count
    }

    /// Dimension of the factored matrix.
    pub fn dim(&self) -> usize {
        self.u.nrows()
    }

    /// Solves `A x = b` by forward substitution with `L` followed by back
    /// substitution with `U`.
    ///
    /// # Errors
    ///
    /// - [`EigenError::DimensionMismatch`] if `b` has the wrong length
    /// - [`EigenError::DegenerateInput`] if `U` has a zero diagonal entry
    ///   (the matrix is singular)
    pub fn solve(&self, b: &DVector<T>) -> Result<DVector<T>> {
        let n = self.dim();
        if b.len() != n {
            return Err(EigenError::dimension_mismatch(
                format!("vector of length {n}"),
                format!("length {}", b.len()),
            ));
        }

        // Forward: L y = b, unit diagonal.
        let mut x = b.clone_owned();
        for i in 0..n {
            for j in 0..i {
                x[i] = x[i] - self.l[(i, j)] * x[j];
            }
        }

        // Back: U x = y.
        for i in (0..n).rev() {
            for j in (i + 1)..n {
                x[i] = x[i] - self.u[(i, j)] * x[j];
            }
            let diagonal = self.u[(i, i)];
            if diagonal == T::zero() {
                return Err(EigenError::degenerate_input(format!(
                    "singular upper factor: zero diagonal at row {i}"
                )));
            }
            x[i] /= diagonal;
        }

        Ok(x)
    }
}

/// Factors a square matrix as `A = L U` by Gaussian elimination without
/// pivoting.
///
/// Multipliers are accumulated in place below the diagonal while rows are
/// eliminated above it, then split into the unit lower factor and the upper
/// factor. Rows whose leading entry is already zero are skipped and cost no
/// operations.
///
/// # Errors
///
/// - [`EigenError::DimensionMismatch`] if `matrix` is not square
/// - [`EigenError::InvalidParameter`] for an empty matrix
/// - [`EigenError::DegenerateInput`] on a zero pivot
pub fn lu_factor<T>(matrix: &DMatrix<T>) -> Result<LuDecomposition<T>>
where
    T: Scalar,
{
    let n = check_square(matrix)?;
    let mut a = matrix.clone_owned();
    let mut op_count = 0usize;

    for i in 0..n {
        for j in (i + 1)..n {
            if a[(j, i)] != T::zero() {
                let pivot = a[(i, i)];
                if pivot == T::zero() {
                    return Err(EigenError::degenerate_input(format!(
                        "zero pivot at row {i}; elimination without pivoting failed"
                    )));
                }
                let multiplier = a[(j, i)] / pivot;
                for k in (i + 1)..n {
                    a[(j, k)] = a[(j, k)] - multiplier * a[(i, k)];
                    op_count += 2;
                }
                op_count += 1;

                // Store the multiplier where the eliminated entry was; this
                // is the strict lower triangle of L.
                a[(j, i)] = multiplier;
            }
        }
    }

    let mut l = DMatrix::identity(n, n);
    let mut u = DMatrix::zeros(n, n);
    for i in 0..n {
        for j in 0..n {
            if j < i {
                l[(i, j)] = a[(i, j)];
            } else {
                u[(i, j)] = a[(i, j)];
            }
        }
    }

    Ok(LuDecomposition { l, u, op_count })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{DMatrix, DVector};
    use pretty_assertions::assert_eq;

    /// The bordered matrix from the course exercise: identity minus the
    /// strict lower triangle of ones, with a final column of ones.
    fn bordered_matrix(n: usize) -> DMatrix<f64> {
        DMatrix::from_fn(n, n, |i, j| {
            if j == n - 1 {
                1.0
            } else if i == j {
                1.0
            } else if i > j {
                -1.0
            } else {
                0.0
            }
        })
    }

    #[test]
    fn test_factors_reproduce_matrix() {
        let b = bordered_matrix(7);
        let lu = lu_factor(&b).unwrap();
        let product = lu.l() * lu.u();
        assert_relative_eq!((&b - &product).norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_factor_shapes() {
        let b = bordered_matrix(5);
        let lu = lu_factor(&b).unwrap();

        // L unit lower, U upper.
        for i in 0..5 {
            assert_relative_eq!(lu.l()[(i, i)], 1.0);
            for j in (i + 1)..5 {
                assert_relative_eq!(lu.l()[(i, j)], 0.0);
            }
            for j in 0..i {
                assert_relative_eq!(lu.u()[(i, j)], 0.0);
            }
        }
    }

    #[test]
    fn test_operation_count() {
        // [[2, 1], [4, 5]]: one multiplier (1 op) and one updated entry
        // (2 ops).
        let a = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 4.0, 5.0]);
        let lu = lu_factor(&a).unwrap();
        assert_eq!(lu.op_count(), 3);
        assert_relative_eq!(lu.l()[(1, 0)], 2.0);
        assert_relative_eq!(lu.u()[(1, 1)], 3.0);
    }

    #[test]
    fn test_zero_entries_cost_nothing() {
        let a = DMatrix::from_diagonal(&DVector::from_vec(vec![2.0, 3.0, 4.0]));
        let lu = lu_factor(&a).unwrap();
        assert_eq!(lu.op_count(), 0);
    }

    #[test]
    fn test_zero_pivot_is_degenerate() {
        let a = DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 1.0, 0.0]);
        assert!(matches!(
            lu_factor(&a),
            Err(EigenError::DegenerateInput { .. })
        ));
    }

    #[test]
    fn test_solve() {
        let a = DMatrix::from_row_slice(3, 3, &[2.0, 1.0, 0.0, 1.0, 3.0, 1.0, 0.0, 1.0, 2.0]);
        let x_expected = DVector::from_vec(vec![1.0, -2.0, 3.0]);
        let b = &a * &x_expected;

        let lu = lu_factor(&a).unwrap();
        let x = lu.solve(&b).unwrap();
        assert_relative_eq!((&x - &x_expected).norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_solve_wrong_length_rejected() {
        let a = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 4.0, 5.0]);
        let lu = lu_factor(&a).unwrap();
        let b = DVector::from_vec(vec![1.0, 2.0, 3.0]);
        assert!(matches!(
            lu.solve(&b),
            Err(EigenError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_singular_surfaces_in_solve() {
        // Upper-triangular singular matrix: elimination never hits the zero
        // pivot, the solve does.
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 1.0, 0.0, 0.0]);
        let lu = lu_factor(&a).unwrap();
        let b = DVector::from_vec(vec![1.0, 1.0]);
        assert!(matches!(
            lu.solve(&b),
            Err(EigenError::DegenerateInput { .. })
        ));
    }
}
