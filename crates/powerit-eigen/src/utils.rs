//! Shared helpers for the solver modules.

use powerit_core::{
    error::{EigenError, Result},
    types::{DMatrix, DVector, Scalar},
};

/// Validates that `matrix` is square with dimension >= 1 and returns the
/// dimension.
pub(crate) fn check_square<T>(matrix: &DMatrix<T>) -> Result<usize>
where
    T: Scalar,
{
    let (rows, cols) = matrix.shape();
    if rows != cols {
        return Err(EigenError::dimension_mismatch(
            format!("{rows}x{rows} square matrix"),
            format!("{rows}x{cols}"),
        ));
    }
    if rows == 0 {
        return Err(EigenError::invalid_parameter(
            "matrix dimension must be at least 1",
            "matrix",
            "0x0",
        ));
    }
    Ok(rows)
}

/// Rayleigh quotient `(vᵀ A v) / (vᵀ v)`.
///
/// The least-squares-optimal scalar estimate of the eigenvalue associated
/// with the approximate eigenvector `v`. On symmetric matrices its error is
/// quadratic in the eigenvector error, which is what gives the power method
/// its `O((λ₂/λ₁)^{2k})` eigenvalue convergence.
pub fn rayleigh_quotient<T>(matrix: &DMatrix<T>, v: &DVector<T>) -> T
where
    T: Scalar,
{
    let image = matrix * v;
    v.dot(&image) / v.dot(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{DMatrix, DVector};

    #[test]
    fn test_check_square() {
        let square = DMatrix::<f64>::identity(3, 3);
        assert_eq!(check_square(&square).unwrap(), 3);

        let rect = DMatrix::<f64>::zeros(3, 4);
        assert!(matches!(
            check_square(&rect),
            Err(EigenError::DimensionMismatch { .. })
        ));

        let empty = DMatrix::<f64>::zeros(0, 0);
        assert!(matches!(
            check_square(&empty),
            Err(EigenError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_rayleigh_quotient_of_exact_eigenvector() {
        let a = DMatrix::from_diagonal(&DVector::from_vec(vec![1.0, 2.0, 3.0]));
        let e2 = DVector::from_vec(vec![0.0, 0.0, 2.0]);
        assert_relative_eq!(rayleigh_quotient(&a, &e2), 3.0);
    }
}
