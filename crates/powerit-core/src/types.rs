//! Type definitions and aliases for the eigensolvers.
//!
//! This module provides the scalar abstraction over `f32`/`f64` and the
//! dynamically-sized matrix and vector aliases used throughout the workspace.

use nalgebra::{Dyn, OMatrix, OVector, RealField, Scalar as NalgebraScalar};
use num_traits::{Float, FromPrimitive};
use std::fmt::{Debug, Display};

/// Trait for scalar types used by the solvers (f32 or f64).
///
/// This trait combines all the numeric traits the iteration loops need,
/// together with the tolerance constants that parameterize default
/// convergence behavior.
pub trait Scalar:
    NalgebraScalar
    + RealField
    + Float
    + FromPrimitive
    + Display
    + Debug
    + Default
    + Copy
    + Send
    + Sync
    + 'static
{
    /// Machine epsilon for this scalar type.
    const EPSILON: Self;

    /// Default tolerance for the iterate-closeness convergence check.
    const DEFAULT_TOLERANCE: Self;

    /// Tolerance used when re-checking the eigenpair residual ||Av - λv||.
    const RESIDUAL_TOLERANCE: Self;

    /// Convert from f64 (for constants).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails. Use `try_from_f64` for a non-panicking version.
    fn from_f64(v: f64) -> Self {
        <Self as FromPrimitive>::from_f64(v).expect("Failed to convert from f64")
    }

    /// Try to convert from f64.
    ///
    /// Returns None if the conversion fails.
    fn try_from_f64(v: f64) -> Option<Self> {
        <Self as FromPrimitive>::from_f64(v)
    }

    /// Convert to f64 (for logging/display).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails. Use `try_to_f64` for a non-panicking version.
    fn to_f64(self) -> f64 {
        num_traits::cast(self).expect("Failed to convert to f64")
    }

    /// Try to convert to f64.
    ///
    /// Returns None if the conversion fails.
    fn try_to_f64(self) -> Option<f64> {
        num_traits::cast(self)
    }

    /// Convert from usize (for iteration counts).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails. Use `try_from_usize` for a non-panicking version.
    fn from_usize(v: usize) -> Self {
        <Self as FromPrimitive>::from_usize(v).expect("Failed to convert from usize")
    }

    /// Try to convert from usize.
    ///
    /// Returns None if the conversion fails.
    fn try_from_usize(v: usize) -> Option<Self> {
        <Self as FromPrimitive>::from_usize(v)
    }
}

impl Scalar for f32 {
    const EPSILON: Self = f32::EPSILON;
    const DEFAULT_TOLERANCE: Self = 1e-4;
    const RESIDUAL_TOLERANCE: Self = 1e-3;
}

impl Scalar for f64 {
    const EPSILON: Self = f64::EPSILON;
    const DEFAULT_TOLERANCE: Self = 1e-6;
    const RESIDUAL_TOLERANCE: Self = 1e-6;
}

/// Type alias for a dynamically-sized matrix.
pub type DMatrix<T> = OMatrix<T, Dyn, Dyn>;

/// Type alias for a dynamically-sized vector.
pub type DVector<T> = OVector<T, Dyn>;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_scalar_trait_f32() {
        assert_eq!(f32::EPSILON, std::f32::EPSILON);
        assert!(f32::DEFAULT_TOLERANCE > 0.0);
        assert!(f32::RESIDUAL_TOLERANCE > 0.0);
        assert!(f32::EPSILON < f32::DEFAULT_TOLERANCE);
    }

    #[test]
    fn test_scalar_trait_f64() {
        assert_eq!(f64::EPSILON, std::f64::EPSILON);
        assert!(f64::DEFAULT_TOLERANCE > 0.0);
        assert!(f64::RESIDUAL_TOLERANCE > 0.0);
        assert!(f64::EPSILON < f64::DEFAULT_TOLERANCE);
    }

    #[test]
    fn test_scalar_conversions() {
        let val_f64 = 3.14159;
        let val_f32 = <f32 as Scalar>::from_f64(val_f64);
        assert_relative_eq!(val_f32 as f64, val_f64, epsilon = 1e-6);

        let back_f64 = val_f32.to_f64();
        assert_relative_eq!(back_f64, val_f32 as f64);

        assert_eq!(<f64 as Scalar>::from_usize(42), 42.0);
        assert_eq!(<f64 as Scalar>::try_from_usize(42), Some(42.0));
    }

    #[test]
    fn test_type_aliases() {
        let _m: DMatrix<f64> = DMatrix::identity(3, 3);
        let _v: DVector<f64> = DVector::zeros(3);
    }
}
