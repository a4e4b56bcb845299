use crate::element::FilterElement;
use crate::ops::{run_cross_row, run_square_row};
use crate::window::RowKernel;

/// Dilation: the maximum of the 9-sample square neighborhood.
///
/// For `bool` this is the OR of the participating samples.
#[derive(Clone, Copy, Debug, Default)]
pub struct DilationBySquare;

/// Dilation over the 5-sample cross (center, up, down, left, right).
#[derive(Clone, Copy, Debug, Default)]
pub struct DilationByCross;

/// Balanced pairwise maximum of 9 samples; the mirror of the erosion tree.
pub(crate) fn max9<T: FilterElement>(v: [T; 9]) -> T {
    let m1 = T::max2(v[0], v[1]);
    let m2 = T::max2(v[2], v[3]);
    let m3 = T::max2(v[4], v[5]);
    let m4 = T::max2(v[6], v[7]);
    let m3 = T::max2(T::max2(m3, v[8]), m4);
    T::max2(T::max2(m1, m2), m3)
}

pub(crate) fn max5<T: FilterElement>(a: T, b: T, c: T, d: T, e: T) -> T {
    let m1 = T::max2(a, b);
    let m2 = T::max2(c, d);
    T::max2(T::max2(m1, e), m2)
}

impl<T: FilterElement> RowKernel<T> for DilationBySquare {
    fn process_row(
        &self,
        out: &mut [T],
        above: &[T],
        middle: &[T],
        below: &[T],
        _range_index: usize,
    ) {
        run_square_row(out, above, middle, below, max9);
    }
}

impl<T: FilterElement> RowKernel<T> for DilationByCross {
    fn process_row(
        &self,
        out: &mut [T],
        above: &[T],
        middle: &[T],
        below: &[T],
        _range_index: usize,
    ) {
        run_cross_row(out, above, middle, below, max5);
    }
}
