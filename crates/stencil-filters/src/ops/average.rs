use crate::element::FilterElement;
use crate::ops::run_square_row;
use crate::window::RowKernel;

/// The 9-sample average.
///
/// Without rounding, integer types divide the widened sum by 9 with
/// truncation; with rounding, a half-divisor bias is added first so the
/// result rounds to nearest. Floating types divide exactly either way. For
/// the boolean element type the two variants differ in kind, not rounding:
/// unanimous AND versus a strict 5-of-9 majority vote.
#[derive(Clone, Copy, Debug, Default)]
pub struct AverageBySquare {
    rounding: bool,
}

impl AverageBySquare {
    /// A new average kernel; `rounding` selects the round-to-nearest
    /// variant.
    pub fn new(rounding: bool) -> Self {
        Self { rounding }
    }

    /// Whether this kernel rounds to nearest.
    pub fn rounding(&self) -> bool {
        self.rounding
    }
}

impl<T: FilterElement> RowKernel<T> for AverageBySquare {
    fn process_row(
        &self,
        out: &mut [T],
        above: &[T],
        middle: &[T],
        below: &[T],
        _range_index: usize,
    ) {
        if self.rounding {
            run_square_row(out, above, middle, below, T::average9_rounded);
        } else {
            run_square_row(out, above, middle, below, T::average9);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    #[test]
    fn test_rounding_matches_real_division() {
        let mut rng = rand::rng();
        let truncating = AverageBySquare::new(false);
        let rounding = AverageBySquare::new(true);
        for _ in 0..2_000 {
            let v: [u8; 9] = std::array::from_fn(|_| rng.random());
            let sum: u32 = v.iter().map(|&x| x as u32).sum();
            assert_eq!(u8::average9(v) as u32, sum / 9);
            // round half up
            assert_eq!(u8::average9_rounded(v) as f64, (sum as f64 / 9.0).round());
            assert!(truncating.rounding() != rounding.rounding());
        }
    }

    #[test]
    fn test_row_kernel_dispatches_on_rounding() {
        let above = [10u8, 20, 30];
        let middle = [40u8, 50, 60];
        let below = [70u8, 80, 95];
        let mut plain = [0u8; 3];
        let mut rounded = [0u8; 3];
        AverageBySquare::new(false).process_row(&mut plain, &above, &middle, &below, 0);
        AverageBySquare::new(true).process_row(&mut rounded, &above, &middle, &below, 0);
        // every 3-wide row wraps onto all nine samples: sum = 455
        assert_eq!(plain, [50u8; 3]);
        assert_eq!(rounded, [51u8; 3]);
    }
}
