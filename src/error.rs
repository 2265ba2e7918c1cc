use thiserror::Error;

/// Ways the geometry constructors can reject their input: operands whose
/// dimensionalities disagree, or a rectangle with a nonpositive side length.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum SpatialTreeError {
    /// Two operands had different dimensionalities.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A rectangle was given a nonpositive side length.
    #[error("improper distance: {0}")]
    ImproperDistance(f64),
}

pub type Result<T> = std::result::Result<T, SpatialTreeError>;
