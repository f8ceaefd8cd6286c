//! Error types for the eigensolvers.
//!
//! Structural input errors (wrong shape, invalid parameters) fail fast and
//! loud before any iteration begins. Non-convergence is deliberately *not*
//! represented here: exhausting the iteration budget returns the best current
//! estimate together with a `converged` flag, since callers routinely probe
//! convergence speed as part of normal usage.

use thiserror::Error;

/// Errors that can occur while solving for eigenpairs.
#[derive(Debug, Clone, Error)]
pub enum EigenError {
    /// A zero or near-zero divisor was encountered where a non-zero one is
    /// required, e.g. normalizing a zero image vector, a zero pivot during
    /// elimination, or a zero matrix.
    #[error("Degenerate input: {reason}")]
    DegenerateInput {
        /// Description of the degenerate quantity
        reason: String,
    },

    /// Dimension mismatch between operands.
    ///
    /// This error occurs for non-square matrices or for vectors whose length
    /// does not match the matrix dimension.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions
        expected: String,
        /// Actual dimensions
        actual: String,
    },

    /// A solver was configured with an invalid parameter
    /// (e.g. zero iteration budget, non-positive tolerance).
    #[error("Invalid parameter {parameter} = {value}: {reason}")]
    InvalidParameter {
        /// Description of the constraint that was violated
        reason: String,
        /// Name of the invalid parameter
        parameter: String,
        /// Value that was invalid
        value: String,
    },
}

impl EigenError {
    /// Create a DegenerateInput error with a custom reason.
    pub fn degenerate_input<S: Into<String>>(reason: S) -> Self {
        Self::DegenerateInput {
            reason: reason.into(),
        }
    }

    /// Create a DimensionMismatch error.
    pub fn dimension_mismatch<S1, S2>(expected: S1, actual: S2) -> Self
    where
        S1: std::fmt::Display,
        S2: std::fmt::Display,
    {
        Self::DimensionMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create an InvalidParameter error.
    pub fn invalid_parameter<S1, S2, S3>(reason: S1, parameter: S2, value: S3) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: std::fmt::Display,
    {
        Self::InvalidParameter {
            reason: reason.into(),
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }
}

/// Result type alias for operations that can produce EigenError.
pub type Result<T> = std::result::Result<T, EigenError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_creation() {
        let err = EigenError::degenerate_input("iterate has zero norm");
        assert!(matches!(err, EigenError::DegenerateInput { .. }));
        assert_eq!(err.to_string(), "Degenerate input: iterate has zero norm");

        let err = EigenError::dimension_mismatch("3x3 square matrix", "3x4");
        assert!(matches!(err, EigenError::DimensionMismatch { .. }));
        assert_eq!(
            err.to_string(),
            "Dimension mismatch: expected 3x3 square matrix, got 3x4"
        );

        let err = EigenError::invalid_parameter("must be positive", "tolerance", -1.0);
        assert!(matches!(err, EigenError::InvalidParameter { .. }));
        assert!(err.to_string().contains("tolerance"));
        assert!(err.to_string().contains("-1"));
    }

    #[test]
    fn test_error_display() {
        let errors = vec![
            EigenError::degenerate_input("zero pivot at row 2"),
            EigenError::dimension_mismatch("vector of length 5", "length 3"),
            EigenError::invalid_parameter("must be at least 1", "max_iterations", 0),
        ];

        for err in errors {
            // Ensure Display trait is implemented and produces non-empty strings
            assert!(!err.to_string().is_empty());
        }
    }
}
