use rayon::prelude::*;

use stencil_matrix::{ElementType, MatSize, Matrix2, MatrixSource, MatrixTarget};

use crate::element::FilterElement;
use crate::error::FilterError;

/// A per-type row kernel: fills one output row from the three input rows
/// of its 3x3 window.
///
/// All four slices have the bound width of the filter. Column wraparound is
/// the kernel's job; row wraparound is the engine's. `range_index` is the
/// index of the row-range partition the call belongs to, an opaque value a
/// kernel may ignore (all built-in kernels do).
pub trait RowKernel<T: FilterElement>: Send + Sync {
    /// Compute one output row from the rows above, at and below it.
    fn process_row(&self, out: &mut [T], above: &[T], middle: &[T], below: &[T], range_index: usize);
}

impl<T: FilterElement, K: RowKernel<T> + ?Sized> RowKernel<T> for Box<K> {
    fn process_row(
        &self,
        out: &mut [T],
        above: &[T],
        middle: &[T],
        below: &[T],
        range_index: usize,
    ) {
        (**self).process_row(out, above, middle, below, range_index)
    }
}

/// A 3x3 sliding-window filter bound to one element type and one shape.
///
/// The instance owns a 3-line working buffer and a 1-line staging buffer
/// for the streamed fallback path, plus a row-range partition table for
/// parallel execution. Construction is cheap relative to a filter call, but
/// instances are meant to be created once per shape and reused.
///
/// The matrix is treated as a torus: neighbor lookups wrap around both
/// axes, including the degenerate one-column and one-row shapes.
///
/// Concurrent `filter` calls on one instance are not supported; the
/// `&mut self` receivers encode this. Distinct instances are fully
/// independent.
pub struct Filter3x3<T: FilterElement, K: RowKernel<T>> {
    size: MatSize,
    kernel: K,
    parallel: bool,
    splitters: Vec<usize>,
    buf3_lines: Vec<T>,
    result_line: Vec<T>,
}

impl<T: FilterElement, K: RowKernel<T>> Filter3x3<T, K> {
    /// Create a filter running `kernel` over matrices of shape `size`.
    ///
    /// Parallel execution starts enabled when more than one worker thread
    /// is available. The row space is pre-split into
    /// `min(dim_y, 4 * workers)` contiguous ranges; splitting into more
    /// ranges than workers gives better load balancing.
    pub fn with_kernel(kernel: K, size: MatSize) -> Self {
        let workers = rayon::current_num_threads();
        let ranges = if workers <= 1 {
            1
        } else {
            size.dim_y.min(4 * workers).max(1)
        };
        let splitters = (0..=ranges).map(|i| i * size.dim_y / ranges).collect();
        Self {
            size,
            kernel,
            parallel: workers > 1,
            splitters,
            buf3_lines: vec![T::default(); 3 * size.dim_x],
            result_line: vec![T::default(); size.dim_x],
        }
    }

    /// The shape this filter is bound to.
    pub fn size(&self) -> MatSize {
        self.size
    }

    /// The element type this filter is bound to.
    pub fn element_type(&self) -> ElementType {
        T::KIND
    }

    /// Whether multithreaded row-range execution is enabled.
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Enable or disable multithreaded execution.
    ///
    /// Disabling falls back to a single sequential pass of the same row
    /// kernel; the cached partition table is kept and simply ignored.
    /// Results are bit-identical either way.
    pub fn set_parallel(&mut self, parallel: bool) {
        self.parallel = parallel;
    }

    /// The number of row ranges in the partition table.
    pub fn num_ranges(&self) -> usize {
        self.splitters.len() - 1
    }

    /// Filter `source` into a freshly allocated matrix of the bound shape.
    ///
    /// # Errors
    ///
    /// Fails if `source` does not match the bound shape or element type.
    pub fn filter<S>(&mut self, source: &S) -> Result<Matrix2<T>, FilterError>
    where
        S: MatrixSource<T>,
    {
        let mut result = Matrix2::from_size_val(self.size, T::default());
        self.filter_into(&mut result, source)?;
        Ok(result)
    }

    /// Filter `source` into the preallocated `result`.
    ///
    /// An empty matrix (`dim_x * dim_y == 0`) is a no-op.
    ///
    /// # Errors
    ///
    /// Fails if either argument does not match the bound shape or element
    /// type; no partial output is written on failure.
    pub fn filter_into<D, S>(&mut self, result: &mut D, source: &S) -> Result<(), FilterError>
    where
        D: MatrixTarget<T>,
        S: MatrixSource<T>,
    {
        self.ensure_compatible(result.size(), result.element_type())?;
        self.ensure_compatible(source.size(), source.element_type())?;
        if self.size.is_empty() {
            return Ok(());
        }
        // branch once per call on the direct-access capability of both sides
        if let Some(dst) = result.as_contiguous_mut() {
            if let Some(src) = source.as_contiguous() {
                self.filter_direct(dst, src);
                return Ok(());
            }
        }
        self.filter_streamed(result, source);
        Ok(())
    }

    fn ensure_compatible(&self, size: MatSize, element_type: ElementType) -> Result<(), FilterError> {
        if element_type != T::KIND {
            return Err(FilterError::ElementTypeMismatch {
                expected: T::KIND,
                actual: element_type,
            });
        }
        if size != self.size {
            return Err(FilterError::ShapeMismatch {
                expected: self.size,
                actual: size,
            });
        }
        Ok(())
    }

    /// Zero-copy path over the contiguous buffers of both matrices.
    ///
    /// Each row range writes a disjoint slice of `dst`, so parallel workers
    /// need no synchronization and the output is identical to a sequential
    /// pass.
    fn filter_direct(&self, dst: &mut [T], src: &[T]) {
        let dim_x = self.size.dim_x;
        if self.parallel && self.num_ranges() > 1 {
            let mut ranges = Vec::with_capacity(self.num_ranges());
            let mut rest = dst;
            for (range_index, bounds) in self.splitters.windows(2).enumerate() {
                let (rows, tail) = rest.split_at_mut((bounds[1] - bounds[0]) * dim_x);
                ranges.push((range_index, bounds[0], rows));
                rest = tail;
            }
            ranges.into_par_iter().for_each(|(range_index, from, rows)| {
                for (k, out) in rows.chunks_exact_mut(dim_x).enumerate() {
                    self.process_line(out, src, from + k, range_index);
                }
            });
        } else {
            for (y, out) in dst.chunks_exact_mut(dim_x).enumerate() {
                self.process_line(out, src, y, 0);
            }
        }
    }

    fn process_line(&self, out: &mut [T], src: &[T], y: usize, range_index: usize) {
        let dim_x = self.size.dim_x;
        let above = if y == 0 { self.size.dim_y - 1 } else { y - 1 };
        let below = if y + 1 == self.size.dim_y { 0 } else { y + 1 };
        self.kernel.process_row(
            out,
            &src[above * dim_x..(above + 1) * dim_x],
            &src[y * dim_x..(y + 1) * dim_x],
            &src[below * dim_x..(below + 1) * dim_x],
            range_index,
        );
    }

    /// Buffered fallback for matrices without direct access: streams three
    /// rows at a time through the working buffer via generic bulk copies
    /// and writes one staged row per step. Single-threaded, since generic
    /// per-element access is not safely parallelizable.
    fn filter_streamed<D, S>(&mut self, result: &mut D, source: &S)
    where
        D: MatrixTarget<T>,
        S: MatrixSource<T>,
    {
        let dim_x = self.size.dim_x;
        let total = self.size.elements();
        // seed the window with the wrapped row above row 0, then row 0
        source.copy_run(total - dim_x, &mut self.buf3_lines[..dim_x]);
        source.copy_run(0, &mut self.buf3_lines[dim_x..2 * dim_x]);
        let mut line_offset = 0;
        while line_offset < total {
            let next = if line_offset + dim_x == total {
                0
            } else {
                line_offset + dim_x
            };
            source.copy_run(next, &mut self.buf3_lines[2 * dim_x..]);
            let (above, rest) = self.buf3_lines.split_at(dim_x);
            let (middle, below) = rest.split_at(dim_x);
            self.kernel
                .process_row(&mut self.result_line, above, middle, below, 0);
            result.write_run(line_offset, &self.result_line);
            line_offset += dim_x;
            if line_offset < total {
                self.buf3_lines.copy_within(dim_x.., 0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::ErosionBySquare;

    fn filter_u8(size: MatSize) -> Filter3x3<u8, ErosionBySquare> {
        Filter3x3::with_kernel(ErosionBySquare, size)
    }

    #[test]
    fn test_partition_covers_rows_disjointly() {
        for dim_y in [1, 2, 3, 7, 100, 1024] {
            let f = filter_u8(MatSize { dim_x: 5, dim_y });
            let splitters = &f.splitters;
            assert_eq!(splitters[0], 0);
            assert_eq!(*splitters.last().unwrap(), dim_y);
            assert!(splitters.windows(2).all(|w| w[0] <= w[1]));
            assert_eq!(f.num_ranges(), splitters.len() - 1);
            let assigned: usize = splitters.windows(2).map(|w| w[1] - w[0]).sum();
            assert_eq!(assigned, dim_y);
        }
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let mut f = filter_u8(MatSize { dim_x: 4, dim_y: 4 });
        let src = Matrix2::from_size_val(MatSize { dim_x: 4, dim_y: 5 }, 0u8);
        assert_eq!(
            f.filter(&src),
            Err(FilterError::ShapeMismatch {
                expected: MatSize { dim_x: 4, dim_y: 4 },
                actual: MatSize { dim_x: 4, dim_y: 5 },
            })
        );
    }

    #[test]
    fn test_empty_matrix_is_a_noop() -> Result<(), FilterError> {
        let size = MatSize { dim_x: 0, dim_y: 7 };
        let mut f = filter_u8(size);
        let src = Matrix2::from_size_val(size, 0u8);
        let mut dst = Matrix2::from_size_val(size, 0u8);
        f.filter_into(&mut dst, &src)?;
        assert!(dst.as_slice().is_empty());
        Ok(())
    }

    #[test]
    fn test_parallel_toggle_keeps_partition() {
        let mut f = filter_u8(MatSize { dim_x: 8, dim_y: 64 });
        let ranges = f.num_ranges();
        f.set_parallel(false);
        assert!(!f.parallel());
        assert_eq!(f.num_ranges(), ranges);
    }
}
