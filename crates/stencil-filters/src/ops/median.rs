use crate::element::FilterElement;
use crate::ops::run_square_row;
use crate::window::RowKernel;

/// The exact 9-sample median (the 5th order statistic), computed with the
/// fixed 19-comparison sorting network in [`crate::primitives`].
///
/// 8- and 16-bit magnitudes run the network through the branchless anti-doz
/// exchange; for `bool` the median degenerates to the 5-of-9 majority
/// function.
#[derive(Clone, Copy, Debug, Default)]
pub struct MedianBySquare;

impl<T: FilterElement> RowKernel<T> for MedianBySquare {
    fn process_row(
        &self,
        out: &mut [T],
        above: &[T],
        middle: &[T],
        below: &[T],
        _range_index: usize,
    ) {
        run_square_row(out, above, middle, below, T::median9);
    }
}
