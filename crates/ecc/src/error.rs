use thiserror::Error;

/// Failures surfaced by the field tower.
///
/// Arithmetic is total except inversion; everything else here comes from the
/// byte-buffer boundary or from validating compile-time parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Inversion of the zero element, at any tower layer.
    #[error("division by zero: the zero element has no inverse")]
    DivisionByZero,

    /// Strictly decoded component whose integer value is not below the modulus.
    #[error("malformed encoding: {0}")]
    MalformedEncoding(String),

    #[error("invalid buffer length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// A configured constant is unsound (e.g. a non-residue that has a root).
    #[error("internal invariant violation: {0}")]
    InternalInvariantViolation(String),
}

pub type FieldResult<T> = Result<T, FieldError>;
