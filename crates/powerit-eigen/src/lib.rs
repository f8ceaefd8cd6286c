//! Power-iteration eigensolvers.
//!
//! This crate implements the classical iterative eigenvalue methods built on
//! repeated matrix-vector products:
//!
//! - [`PowerIteration`]: the dominant eigenpair by normalized power
//!   iteration with a Rayleigh-quotient eigenvalue estimate
//! - [`DeflatingExtractor`]: the top-k eigenpairs by repeated solves with
//!   rank-1 deflation between them
//! - [`InverseIteration`]: the eigenpair nearest a spectral shift, via LU
//!   solves against `A − σI`
//! - [`lu`]: the Gaussian-elimination factorization (with operation count)
//!   that backs the inverse method
//!
//! All solvers take the random starting vector from an explicit
//! `&mut impl Rng`, so seeded runs are fully reproducible, and report
//! non-convergence through result metadata rather than errors.
//!
//! # Modules
//!
//! - [`deflation`]: Top-k extraction with rank-1 deflation
//! - [`inverse`]: Shifted inverse power iteration
//! - [`lu`]: Gaussian elimination without pivoting
//! - [`power`]: Normalized power iteration

pub mod deflation;
pub mod inverse;
pub mod lu;
pub mod power;

mod utils;

// Re-export commonly used items at the crate root
pub use deflation::{DeflatingExtractor, Eigenpair, EigenpairSet};
pub use inverse::{InverseIteration, InverseIterationConfig};
pub use lu::{lu_factor, LuDecomposition};
pub use power::{EigenResult, IterateNorm, PowerIteration, PowerIterationConfig};
pub use utils::rayleigh_quotient;

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use powerit_eigen::prelude::*;
/// ```
pub mod prelude {
    pub use crate::deflation::{DeflatingExtractor, Eigenpair, EigenpairSet};
    pub use crate::inverse::{InverseIteration, InverseIterationConfig};
    pub use crate::lu::{lu_factor, LuDecomposition};
    pub use crate::power::{EigenResult, IterateNorm, PowerIteration, PowerIterationConfig};
    pub use crate::utils::rayleigh_quotient;
    pub use powerit_core::prelude::*;
}
