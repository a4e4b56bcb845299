use crate::element::FilterElement;
use crate::ops::run_cross_row;
use crate::window::RowKernel;

/// Gradient magnitude from the 4 cross neighbors:
/// `(|right - left| + |down - up|) / 2`. The center value is unused.
/// Integer types widen before the subtraction so the intermediate sum
/// cannot overflow.
#[derive(Clone, Copy, Debug, Default)]
pub struct GradientByCross;

impl<T: FilterElement> RowKernel<T> for GradientByCross {
    fn process_row(
        &self,
        out: &mut [T],
        above: &[T],
        middle: &[T],
        below: &[T],
        _range_index: usize,
    ) {
        run_cross_row(out, above, middle, below, |l, r, u, d, _c| {
            T::gradient4(l, r, u, d)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_single_column_ignores_center() {
        // one column: left and right both wrap onto the center, so only the
        // vertical pair contributes and the center value itself cancels out
        let mut low = [0u8];
        let mut high = [0u8];
        GradientByCross.process_row(&mut low, &[12u8], &[0u8], &[40u8], 0);
        GradientByCross.process_row(&mut high, &[12u8], &[255u8], &[40u8], 0);
        assert_eq!(low, [14]);
        assert_eq!(low, high);
    }

    #[test]
    fn test_gradient_row_values() {
        let above = [10u8, 20, 30];
        let middle = [3u8, 60, 9];
        let below = [50u8, 40, 10];
        let mut out = [0u8; 3];
        GradientByCross.process_row(&mut out, &above, &middle, &below, 0);
        // column 0 wraps left to column 2: (|60 - 9| + |50 - 10|) / 2 = 45
        assert_eq!(out[0], 45);
        // column 1: (|9 - 3| + |40 - 20|) / 2 = 13
        assert_eq!(out[1], 13);
        // column 2 wraps right to column 0: (|3 - 60| + |10 - 30|) / 2 = 38
        assert_eq!(out[2], 38);
    }
}
