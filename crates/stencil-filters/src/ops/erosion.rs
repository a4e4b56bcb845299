use crate::element::FilterElement;
use crate::ops::{run_cross_row, run_square_row};
use crate::window::RowKernel;

/// Erosion: the minimum of the 9-sample square neighborhood.
///
/// For `bool` this is the AND of the participating samples.
#[derive(Clone, Copy, Debug, Default)]
pub struct ErosionBySquare;

/// Erosion over the 5-sample cross (center, up, down, left, right).
#[derive(Clone, Copy, Debug, Default)]
pub struct ErosionByCross;

/// Balanced pairwise minimum of 9 samples.
///
/// The reduction tree keeps the comparison chain shallow; min is
/// associative and idempotent, so any pairwise order gives the same result.
pub(crate) fn min9<T: FilterElement>(v: [T; 9]) -> T {
    let m1 = T::min2(v[0], v[1]);
    let m2 = T::min2(v[2], v[3]);
    let m3 = T::min2(v[4], v[5]);
    let m4 = T::min2(v[6], v[7]);
    let m3 = T::min2(T::min2(m3, v[8]), m4);
    T::min2(T::min2(m1, m2), m3)
}

pub(crate) fn min5<T: FilterElement>(a: T, b: T, c: T, d: T, e: T) -> T {
    let m1 = T::min2(a, b);
    let m2 = T::min2(c, d);
    T::min2(T::min2(m1, e), m2)
}

impl<T: FilterElement> RowKernel<T> for ErosionBySquare {
    fn process_row(
        &self,
        out: &mut [T],
        above: &[T],
        middle: &[T],
        below: &[T],
        _range_index: usize,
    ) {
        run_square_row(out, above, middle, below, min9);
    }
}

impl<T: FilterElement> RowKernel<T> for ErosionByCross {
    fn process_row(
        &self,
        out: &mut [T],
        above: &[T],
        middle: &[T],
        below: &[T],
        _range_index: usize,
    ) {
        run_cross_row(out, above, middle, below, min5);
    }
}
