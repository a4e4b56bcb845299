use stencil_matrix::{ElementType, MatSize, MatrixError};

/// An error type for the filter engine.
///
/// All failures are synchronous and raised at the offending call; a failed
/// call never writes a partial result.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum FilterError {
    /// The matrix shape does not match the shape the filter was bound to.
    #[error("Matrix shape ({actual}) does not match the filter shape ({expected})")]
    ShapeMismatch {
        /// The shape the filter instance was constructed with.
        expected: MatSize,
        /// The shape of the offending matrix argument.
        actual: MatSize,
    },

    /// The matrix element type does not match the filter element type.
    #[error("Matrix element type ({actual}) does not match the filter element type ({expected})")]
    ElementTypeMismatch {
        /// The element type the filter instance was constructed with.
        expected: ElementType,
        /// The element type of the offending matrix argument.
        actual: ElementType,
    },

    /// A percentile rank outside the 9-sample neighborhood.
    #[error("Percentile rank must be in 0..=8, got {0}")]
    InvalidRank(usize),

    /// A matrix collaborator error.
    #[error(transparent)]
    Matrix(#[from] MatrixError),
}
