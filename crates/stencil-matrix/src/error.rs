/// An error type for the matrix module.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum MatrixError {
    /// Error when the data length does not match the matrix size.
    #[error("Data length ({0}) does not match the matrix size ({1})")]
    InvalidDataLength(usize, usize),

    /// Error when an element index is outside the matrix dimensions.
    #[error("Index ({0}, {1}) is out of bounds for a {2}x{3} matrix")]
    IndexOutOfBounds(usize, usize, usize, usize),
}
