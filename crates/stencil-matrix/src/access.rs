use crate::element::{ElementType, MatElement};
use crate::matrix::{MatSize, Matrix2};

/// Read access to a 2-D matrix of primitive elements.
///
/// The filter engine only needs two read capabilities: bulk-copying a
/// contiguous run of elements into a caller buffer, and (optionally)
/// exposing the backing storage as one contiguous slice. Implementations
/// without contiguous backing keep the default `as_contiguous` and the
/// engine transparently uses the buffered fallback path; the difference is
/// observable only as performance, never as a different result.
pub trait MatrixSource<T: MatElement> {
    /// The size of the matrix.
    fn size(&self) -> MatSize;

    /// The runtime element type tag.
    fn element_type(&self) -> ElementType {
        T::KIND
    }

    /// Copy `dst.len()` elements starting at linear row-major `offset`
    /// into `dst`.
    ///
    /// # Panics
    ///
    /// Panics if the run `offset..offset + dst.len()` is out of range.
    fn copy_run(&self, offset: usize, dst: &mut [T]);

    /// The backing storage as one contiguous row-major slice, when the
    /// implementation supports direct access.
    fn as_contiguous(&self) -> Option<&[T]> {
        None
    }
}

/// Write access to a 2-D matrix of primitive elements.
pub trait MatrixTarget<T: MatElement>: MatrixSource<T> {
    /// Copy `src` into the matrix starting at linear row-major `offset`.
    ///
    /// # Panics
    ///
    /// Panics if the run `offset..offset + src.len()` is out of range.
    fn write_run(&mut self, offset: usize, src: &[T]);

    /// The backing storage as one contiguous mutable slice, when the
    /// implementation supports direct access.
    fn as_contiguous_mut(&mut self) -> Option<&mut [T]> {
        None
    }
}

impl<T: MatElement> MatrixSource<T> for Matrix2<T> {
    fn size(&self) -> MatSize {
        Matrix2::size(self)
    }

    fn copy_run(&self, offset: usize, dst: &mut [T]) {
        dst.copy_from_slice(&self.as_slice()[offset..offset + dst.len()]);
    }

    fn as_contiguous(&self) -> Option<&[T]> {
        Some(self.as_slice())
    }
}

impl<T: MatElement> MatrixTarget<T> for Matrix2<T> {
    fn write_run(&mut self, offset: usize, src: &[T]) {
        self.as_slice_mut()[offset..offset + src.len()].copy_from_slice(src);
    }

    fn as_contiguous_mut(&mut self) -> Option<&mut [T]> {
        Some(self.as_slice_mut())
    }
}
