//! Per-element arithmetic for the 3x3 kernels.
//!
//! Each supported primitive width implements [`FilterElement`] with the
//! accumulator widening the operators need to stay overflow-free: 8- and
//! 16-bit magnitudes widen to `i32`, 32-bit integers to `i64` for
//! sum-based operators, 64-bit integers and 32-bit floats stage through
//! `f64`. The impls are monomorphized per type, so every kernel compiles
//! down to the same branch-free arithmetic a hand-specialized version
//! would have.

use crate::primitives;
use stencil_matrix::MatElement;

/// Element-level operations required by the 3x3 filter kernels.
pub trait FilterElement: MatElement {
    /// The smaller of two samples. For `bool` this is logical AND.
    fn min2(a: Self, b: Self) -> Self;

    /// The larger of two samples. For `bool` this is logical OR.
    fn max2(a: Self, b: Self) -> Self;

    /// Truncating 9-sample average: `sum / 9` with integer division for
    /// integer types. For `bool` this is unanimous AND of the 9 samples.
    fn average9(v: [Self; 9]) -> Self;

    /// Round-to-nearest 9-sample average: a half-divisor bias is added
    /// before dividing. For `bool` this is a strict 5-of-9 majority vote,
    /// a deliberately different combination rule than [`average9`].
    ///
    /// [`average9`]: FilterElement::average9
    fn average9_rounded(v: [Self; 9]) -> Self;

    /// Cross gradient magnitude `(|right - left| + |down - up|) / 2`,
    /// computed in the widened accumulator.
    fn gradient4(left: Self, right: Self, up: Self, down: Self) -> Self;

    /// The exact median of 9 samples.
    fn median9(v: [Self; 9]) -> Self {
        primitives::median9_network(v)
    }
}

// 8/16-bit magnitudes: i32 accumulators, anti-doz median.
macro_rules! impl_magnitude_element {
    ($t:ty) => {
        impl FilterElement for $t {
            fn min2(a: Self, b: Self) -> Self {
                a.min(b)
            }

            fn max2(a: Self, b: Self) -> Self {
                a.max(b)
            }

            fn average9(v: [Self; 9]) -> Self {
                let sum: i32 = v.iter().map(|&x| x as i32).sum();
                (sum / 9) as $t
            }

            fn average9_rounded(v: [Self; 9]) -> Self {
                let sum: i32 = v.iter().map(|&x| x as i32).sum();
                ((sum + 4) / 9) as $t
            }

            fn gradient4(left: Self, right: Self, up: Self, down: Self) -> Self {
                let (l, r) = (left as i32, right as i32);
                let (u, d) = (up as i32, down as i32);
                (((r - l).abs() + (d - u).abs()) >> 1) as $t
            }

            fn median9(v: [Self; 9]) -> Self {
                primitives::median9_magnitudes(v.map(|x| x as i32)) as $t
            }
        }
    };
}

impl_magnitude_element!(u8);
impl_magnitude_element!(u16);

impl FilterElement for i32 {
    fn min2(a: Self, b: Self) -> Self {
        a.min(b)
    }

    fn max2(a: Self, b: Self) -> Self {
        a.max(b)
    }

    fn average9(v: [Self; 9]) -> Self {
        let sum: i64 = v.iter().map(|&x| x as i64).sum();
        (sum / 9) as i32
    }

    fn average9_rounded(v: [Self; 9]) -> Self {
        let sum: i64 = v.iter().map(|&x| x as i64).sum();
        ((sum + 4) / 9) as i32
    }

    fn gradient4(left: Self, right: Self, up: Self, down: Self) -> Self {
        let (l, r) = (left as i64, right as i64);
        let (u, d) = (up as i64, down as i64);
        (((r - l).abs() + (d - u).abs()) >> 1) as i32
    }
}

impl FilterElement for i64 {
    fn min2(a: Self, b: Self) -> Self {
        a.min(b)
    }

    fn max2(a: Self, b: Self) -> Self {
        a.max(b)
    }

    // 64-bit sums stage through f64; exactness beyond 53 bits of the sum
    // is outside the documented widening guarantees.
    fn average9(v: [Self; 9]) -> Self {
        let sum: f64 = v.iter().map(|&x| x as f64).sum();
        (sum / 9.0) as i64
    }

    fn average9_rounded(v: [Self; 9]) -> Self {
        let sum: f64 = v.iter().map(|&x| x as f64).sum();
        ((sum + 4.5) / 9.0) as i64
    }

    fn gradient4(left: Self, right: Self, up: Self, down: Self) -> Self {
        let (l, r) = (left as f64, right as f64);
        let (u, d) = (up as f64, down as f64);
        (((r - l).abs() + (d - u).abs()) * 0.5) as i64
    }
}

impl FilterElement for f32 {
    fn min2(a: Self, b: Self) -> Self {
        a.min(b)
    }

    fn max2(a: Self, b: Self) -> Self {
        a.max(b)
    }

    fn average9(v: [Self; 9]) -> Self {
        let sum: f64 = v.iter().map(|&x| x as f64).sum();
        (sum / 9.0) as f32
    }

    fn average9_rounded(v: [Self; 9]) -> Self {
        Self::average9(v)
    }

    fn gradient4(left: Self, right: Self, up: Self, down: Self) -> Self {
        let (l, r) = (left as f64, right as f64);
        let (u, d) = (up as f64, down as f64);
        (((r - l).abs() + (d - u).abs()) * 0.5) as f32
    }
}

impl FilterElement for f64 {
    fn min2(a: Self, b: Self) -> Self {
        a.min(b)
    }

    fn max2(a: Self, b: Self) -> Self {
        a.max(b)
    }

    fn average9(v: [Self; 9]) -> Self {
        let sum: f64 = v.iter().sum();
        sum / 9.0
    }

    fn average9_rounded(v: [Self; 9]) -> Self {
        Self::average9(v)
    }

    fn gradient4(left: Self, right: Self, up: Self, down: Self) -> Self {
        ((right - left).abs() + (down - up).abs()) * 0.5
    }
}

impl FilterElement for bool {
    fn min2(a: Self, b: Self) -> Self {
        a & b
    }

    fn max2(a: Self, b: Self) -> Self {
        a | b
    }

    fn average9(v: [Self; 9]) -> Self {
        v.iter().all(|&x| x)
    }

    fn average9_rounded(v: [Self; 9]) -> Self {
        v.iter().filter(|&&x| x).count() > 4
    }

    fn gradient4(left: Self, right: Self, up: Self, down: Self) -> Self {
        let (l, r) = (left as i32, right as i32);
        let (u, d) = (up as i32, down as i32);
        (((r - l).abs() + (d - u).abs()) >> 1) != 0
    }

    fn median9(v: [Self; 9]) -> Self {
        // 5-of-9 majority, same as the rounded average
        Self::average9_rounded(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use num_traits::Bounded;
    use rand::prelude::*;

    #[test]
    fn test_average9_truncates() {
        // sum = 46, 46 / 9 = 5.11..
        let v = [1u8, 2, 3, 4, 5, 6, 7, 8, 10];
        assert_eq!(u8::average9(v), 5);
        // rounded: (46 + 4) / 9 = 5
        assert_eq!(u8::average9_rounded(v), 5);
        // sum = 50: truncating 5, rounded (50 + 4) / 9 = 6
        let v = [1u8, 2, 3, 4, 5, 6, 7, 8, 14];
        assert_eq!(u8::average9(v), 5);
        assert_eq!(u8::average9_rounded(v), 6);
    }

    #[test]
    fn test_average9_wide_integers_do_not_overflow() {
        assert_eq!(u16::average9([u16::MAX; 9]), u16::MAX);
        assert_eq!(i32::average9([i32::MAX; 9]), i32::MAX);
        assert_eq!(i32::average9([i32::MIN; 9]), i32::MIN);
    }

    #[test]
    fn test_average9_floats() {
        let v = [1.0f32; 9];
        assert_relative_eq!(f32::average9(v), 1.0);
        let v: [f64; 9] = std::array::from_fn(|k| k as f64);
        assert_relative_eq!(f64::average9(v), 4.0);
    }

    #[test]
    fn test_bool_average_unanimous_vs_majority() {
        let mut v = [true; 9];
        assert!(bool::average9(v));
        assert!(bool::average9_rounded(v));
        v[0] = false;
        // one dissenter breaks the AND but not the majority
        assert!(!bool::average9(v));
        assert!(bool::average9_rounded(v));
        let five_false: [bool; 9] = std::array::from_fn(|k| k >= 5);
        assert!(!bool::average9_rounded(five_false));
    }

    #[test]
    fn test_gradient4() {
        // (|40 - 10| + |80 - 20|) / 2 = 45
        assert_eq!(u8::gradient4(10, 40, 20, 80), 45);
        assert_eq!(u8::gradient4(40, 10, 80, 20), 45);
        assert_eq!(u16::gradient4(0, u16::MAX, 0, u16::MAX), u16::MAX);
        assert_eq!(i32::gradient4(i32::MIN, i32::MAX, 0, 0), i32::MAX);
        assert_relative_eq!(f64::gradient4(1.0, 2.0, 3.0, 0.5), 1.75);
        assert!(bool::gradient4(false, true, false, true));
        assert!(!bool::gradient4(false, true, false, false));
    }

    fn check_median_width<T>(samples: impl Fn(&mut ThreadRng) -> T)
    where
        T: FilterElement + Ord + std::fmt::Debug,
    {
        let mut rng = rand::rng();
        for _ in 0..10_000 {
            let v: [T; 9] = std::array::from_fn(|_| samples(&mut rng));
            let mut sorted = v;
            sorted.sort_unstable();
            assert_eq!(T::median9(v), sorted[4], "samples {:?}", v);
        }
    }

    #[test]
    fn test_median9_all_integer_widths() {
        check_median_width(|rng| rng.random::<u8>());
        check_median_width(|rng| rng.random::<u16>());
        check_median_width(|rng| rng.random::<i32>());
        check_median_width(|rng| rng.random::<i64>());
    }

    #[test]
    fn test_median9_boundary_values() {
        fn from_pool<T: FilterElement + Bounded + Ord + std::fmt::Debug>(mid: T) {
            let pool = [T::min_value(), T::default(), mid, T::max_value()];
            check_median_width(|rng| *pool.choose(rng).unwrap());
        }
        from_pool(7u8);
        from_pool(7u16);
        from_pool(-7i32);
        from_pool(-7i64);
    }

    #[test]
    fn test_median9_floats_and_bool() {
        let mut rng = rand::rng();
        for _ in 0..1_000 {
            let v: [f32; 9] = std::array::from_fn(|_| rng.random());
            let mut sorted = v;
            sorted.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap());
            assert_eq!(f32::median9(v), sorted[4]);

            let b: [bool; 9] = std::array::from_fn(|_| rng.random());
            let majority = b.iter().filter(|&&x| x).count() > 4;
            assert_eq!(bool::median9(b), majority);
            assert_eq!(crate::primitives::median9_network(b), majority);
        }
    }
}
