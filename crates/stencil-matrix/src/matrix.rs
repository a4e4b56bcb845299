use crate::element::MatElement;
use crate::error::MatrixError;

/// Matrix size in elements.
///
/// # Examples
///
/// ```
/// use stencil_matrix::MatSize;
///
/// let size = MatSize { dim_x: 10, dim_y: 20 };
/// assert_eq!(size.elements(), 200);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatSize {
    /// Width of the matrix (number of columns).
    pub dim_x: usize,
    /// Height of the matrix (number of rows).
    pub dim_y: usize,
}

impl MatSize {
    /// The total number of elements.
    pub fn elements(&self) -> usize {
        self.dim_x * self.dim_y
    }

    /// Returns true when the matrix holds no elements.
    pub fn is_empty(&self) -> bool {
        self.elements() == 0
    }
}

impl std::fmt::Display for MatSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}x{}", self.dim_x, self.dim_y)
    }
}

impl From<[usize; 2]> for MatSize {
    fn from(size: [usize; 2]) -> Self {
        MatSize {
            dim_x: size[0],
            dim_y: size[1],
        }
    }
}

/// A 2-D matrix of primitive elements in row-major order, backed by a
/// contiguous `Vec`.
///
/// Rows are stored one after another, so the element at `(x, y)` lives at
/// linear offset `y * dim_x + x`.
///
/// # Examples
///
/// ```
/// use stencil_matrix::{MatSize, Matrix2};
///
/// let m = Matrix2::new(MatSize { dim_x: 2, dim_y: 2 }, vec![1u8, 2, 3, 4])?;
/// assert_eq!(m.get(1, 1), Some(4));
/// # Ok::<(), stencil_matrix::MatrixError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix2<T: MatElement> {
    size: MatSize,
    data: Vec<T>,
}

impl<T: MatElement> Matrix2<T> {
    /// Create a new matrix from element data.
    ///
    /// # Errors
    ///
    /// Returns an error if the length of `data` does not match `size`.
    pub fn new(size: MatSize, data: Vec<T>) -> Result<Self, MatrixError> {
        if data.len() != size.elements() {
            return Err(MatrixError::InvalidDataLength(data.len(), size.elements()));
        }
        Ok(Self { size, data })
    }

    /// Create a new matrix with every element set to `value`.
    pub fn from_size_val(size: MatSize, value: T) -> Self {
        Self {
            size,
            data: vec![value; size.elements()],
        }
    }

    /// The size of the matrix.
    pub fn size(&self) -> MatSize {
        self.size
    }

    /// The element at `(x, y)`, or `None` when out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<T> {
        if x >= self.size.dim_x || y >= self.size.dim_y {
            return None;
        }
        Some(self.data[y * self.size.dim_x + x])
    }

    /// Set the element at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns an error if `(x, y)` is out of bounds.
    pub fn set(&mut self, x: usize, y: usize, value: T) -> Result<(), MatrixError> {
        if x >= self.size.dim_x || y >= self.size.dim_y {
            return Err(MatrixError::IndexOutOfBounds(
                x,
                y,
                self.size.dim_x,
                self.size.dim_y,
            ));
        }
        self.data[y * self.size.dim_x + x] = value;
        Ok(())
    }

    /// The element data as a flat row-major slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// The element data as a mutable flat row-major slice.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the matrix and return its backing storage.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_checks_length() {
        let size = MatSize { dim_x: 3, dim_y: 2 };
        assert!(Matrix2::new(size, vec![0u8; 6]).is_ok());
        assert_eq!(
            Matrix2::new(size, vec![0u8; 5]),
            Err(MatrixError::InvalidDataLength(5, 6))
        );
    }

    #[test]
    fn test_get_set() -> Result<(), MatrixError> {
        let size = MatSize { dim_x: 3, dim_y: 2 };
        let mut m = Matrix2::from_size_val(size, 0i32);
        m.set(2, 1, 7)?;
        assert_eq!(m.get(2, 1), Some(7));
        assert_eq!(m.as_slice()[5], 7);
        assert_eq!(m.get(3, 0), None);
        assert_eq!(
            m.set(0, 2, 1),
            Err(MatrixError::IndexOutOfBounds(0, 2, 3, 2))
        );
        Ok(())
    }

    #[test]
    fn test_zero_sized_matrix() {
        let m = Matrix2::<f32>::from_size_val(MatSize { dim_x: 0, dim_y: 5 }, 0.0);
        assert!(m.size().is_empty());
        assert!(m.as_slice().is_empty());
    }
}
