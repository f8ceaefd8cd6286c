//! Core types for power-iteration eigensolvers.
//!
//! This crate provides the foundations shared by the solver crate:
//! the scalar abstraction over `f32`/`f64`, the error taxonomy, and the
//! stopping-criterion machinery that drives every iteration loop.
//!
//! # Modules
//!
//! - [`convergence`]: Stopping criteria and the iterate-closeness check
//! - [`error`]: Error types for degenerate and invalid inputs
//! - [`types`]: Scalar trait and matrix/vector aliases

pub mod convergence;
pub mod error;
pub mod types;

// Re-export commonly used items at the crate root
pub use error::{EigenError, Result};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use powerit_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::convergence::{vectors_close, StoppingCriterion, TerminationReason};
    pub use crate::error::{EigenError, Result};
    pub use crate::types::{DMatrix, DVector, Scalar};
}
