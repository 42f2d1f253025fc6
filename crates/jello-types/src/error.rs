//! Error types for the Jello simulator.
//!
//! All crates return `JelloResult<T>` from fallible operations.

use thiserror::Error;

/// Unified error type for the Jello simulator.
#[derive(Debug, Error)]
pub enum JelloError {
    /// Mesh data is malformed or inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// Spatial dimension other than 2 or 3.
    #[error("Invalid dimension {0}: must be 2 or 3")]
    InvalidDimension(usize),

    /// Material parameter is out of valid range.
    #[error("Invalid material parameter: {0}")]
    InvalidMaterial(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Linear solver failure (not raised for plain non-convergence).
    #[error("Linear solver error: {0}")]
    Solver(String),

    /// Input file could not be parsed.
    #[error("Parse error in {source_name} at line {line}: {message}")]
    Parse {
        source_name: String,
        line: usize,
        message: String,
    },

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for `Result<T, JelloError>`.
pub type JelloResult<T> = Result<T, JelloError>;
