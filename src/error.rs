//! Error types for the anisotropy pipeline.
//!
//! Every fallible stage returns `Result<T>`. Failures are deterministic
//! mathematical conditions, so nothing here is retried.

use thiserror::Error;

/// Unified error type for tensor expansion, averaging and wave solving.
#[derive(Debug, Error)]
pub enum AnisotropyError {
    /// The 6×6 stiffness matrix cannot be inverted into a compliance matrix.
    #[error("stiffness matrix is singular or ill-conditioned (condition estimate {condition:.3e})")]
    SingularTensor { condition: f64 },

    /// Density must be strictly positive and finite.
    #[error("density must be positive, got {0}")]
    NonPositiveDensity(f64),

    /// A VRH-averaged modulus came out non-positive (unphysical tensor).
    #[error("{modulus} must be positive, got {value}")]
    NonPositiveModulus { modulus: &'static str, value: f64 },

    /// Propagation direction has (near) zero length.
    #[error("propagation direction has zero length (norm {norm:.3e})")]
    ZeroDirection { norm: f64 },

    /// The symmetric eigen solver did not converge.
    #[error("Christoffel eigenproblem did not converge along {direction:?}")]
    Eigendecomposition { direction: [f64; 3] },

    /// A Christoffel eigenvalue is negative, i.e. the velocity is imaginary.
    #[error("negative Christoffel eigenvalue {eigenvalue:.6e} along {direction:?}")]
    NegativeEigenvalue { eigenvalue: f64, direction: [f64; 3] },

    /// Wrong number of elastic constants supplied.
    #[error("expected {expected} elastic constants, found {found}")]
    InvalidConstantCount { expected: usize, found: usize },

    /// Any other malformed numeric input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Survey grid resolution must be at least 1.
    #[error("grid resolution must be positive, got {0}")]
    InvalidResolution(usize),

    /// No survey points survived to be scanned for extrema.
    #[error("survey contains no solved directions")]
    EmptySurvey,

    /// A single survey direction failed; carries the grid index and cause.
    #[error("survey direction {index:?} ({direction:?}) failed: {source}")]
    DirectionFailed {
        index: [i64; 3],
        direction: [f64; 3],
        #[source]
        source: Box<AnisotropyError>,
    },

    /// Reading a configuration or sample file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration or sample file is not valid TOML for its schema.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Convenience alias for `Result<T, AnisotropyError>`.
pub type Result<T> = std::result::Result<T, AnisotropyError>;
