//! Branchless building blocks for the median and min/max kernels.
//!
//! The "anti-doz" primitive computes `min(0, b - a)` without a comparison
//! branch. It is only valid when `b - a` cannot overflow the `i32`
//! accumulator, i.e. when both operands are known non-negative magnitudes
//! (8- or 16-bit samples widened to `i32`). Given `d = anti_doz(a, b)`,
//! `a + d` is `min(a, b)` and `b - d` is `max(a, b)`, which turns a
//! compare-and-swap into three arithmetic instructions.

use crate::element::FilterElement;

/// Branchless `min(0, b - a)` for non-negative magnitudes.
#[inline]
pub fn anti_doz(a: i32, b: i32) -> i32 {
    let c = b - a;
    c & (c >> 31)
}

const fn build_anti_doz_table() -> [i32; 512] {
    let mut table = [0i32; 512];
    let mut k = -256i32;
    while k <= 255 {
        table[(256 + k) as usize] = if k < 0 { k } else { 0 };
        k += 1;
    }
    table
}

/// Precomputed `min(0, d)` for every difference `d` of two 8-bit magnitudes.
pub static ANTI_DOZ_TABLE: [i32; 512] = build_anti_doz_table();

/// Table-based [`anti_doz`] for 8-bit magnitudes.
///
/// A pure performance variant with identical results; both operands must be
/// in `0..=255`.
#[inline]
pub fn anti_doz_u8(a: i32, b: i32) -> i32 {
    ANTI_DOZ_TABLE[(256 + b - a) as usize]
}

#[inline]
fn cas<T: FilterElement>(a: &mut T, b: &mut T) {
    let (lo, hi) = (T::min2(*a, *b), T::max2(*a, *b));
    *a = lo;
    *b = hi;
}

/// The exact median of 9 samples via a fixed 19-comparison sorting network.
///
/// The network is a data-independent sequence of conditional exchanges that
/// leaves slot 4 holding the 5th order statistic regardless of input order;
/// its cost is fixed and branch-predictable, unlike a general sort. The
/// trailing seven operations are one-sided: they only keep the half of the
/// exchange that can still reach slot 4.
pub fn median9_network<T: FilterElement>(v: [T; 9]) -> T {
    let [mut w0, mut w1, mut w2, mut w3, mut w4, mut w5, mut w6, mut w7, mut w8] = v;
    cas(&mut w1, &mut w2);
    cas(&mut w4, &mut w5);
    cas(&mut w7, &mut w8);
    cas(&mut w0, &mut w1);
    cas(&mut w3, &mut w4);
    cas(&mut w6, &mut w7);
    cas(&mut w1, &mut w2);
    cas(&mut w4, &mut w5);
    cas(&mut w7, &mut w8);
    w3 = T::max2(w0, w3);
    w5 = T::min2(w5, w8);
    cas(&mut w4, &mut w7);
    w6 = T::max2(w3, w6);
    w4 = T::max2(w1, w4);
    w2 = T::min2(w2, w5);
    w4 = T::min2(w4, w7);
    cas(&mut w4, &mut w2);
    w4 = T::max2(w6, w4);
    T::min2(w4, w2)
}

/// The 19-operation network with every full exchange done through `doz`,
/// so the sequence is stated once for both anti-doz variants.
fn median9_with(mut w: [i32; 9], doz: impl Fn(i32, i32) -> i32) -> i32 {
    macro_rules! swap {
        ($i:literal, $j:literal) => {{
            let d = doz(w[$i], w[$j]);
            w[$i] += d;
            w[$j] -= d;
        }};
    }
    swap!(1, 2);
    swap!(4, 5);
    swap!(7, 8);
    swap!(0, 1);
    swap!(3, 4);
    swap!(6, 7);
    swap!(1, 2);
    swap!(4, 5);
    swap!(7, 8);
    w[3] = w[0].max(w[3]);
    w[5] = w[5].min(w[8]);
    swap!(4, 7);
    w[6] = w[3].max(w[6]);
    w[4] = w[1].max(w[4]);
    w[2] = w[2].min(w[5]);
    w[4] = w[4].min(w[7]);
    swap!(4, 2);
    w[4] = w[6].max(w[4]);
    w[4].min(w[2])
}

/// The same 19-operation network on widened non-negative magnitudes, with
/// every full exchange done through [`anti_doz`].
///
/// Valid for samples whose pairwise differences fit `i32`, i.e. 8- and
/// 16-bit magnitudes.
#[inline]
pub fn median9_magnitudes(w: [i32; 9]) -> i32 {
    median9_with(w, anti_doz)
}

/// [`median9_magnitudes`] with the table-based anti-doz, for 8-bit samples.
#[inline]
pub fn median9_u8_table(w: [i32; 9]) -> i32 {
    median9_with(w, anti_doz_u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    #[test]
    fn test_anti_doz_exhaustive() {
        for a in 0..=255i32 {
            for b in 0..=255i32 {
                let expected = (b - a).min(0);
                assert_eq!(anti_doz(a, b), expected);
                assert_eq!(anti_doz_u8(a, b), expected);
            }
        }
    }

    #[test]
    fn test_anti_doz_wide_magnitudes() {
        for (a, b) in [(0, 65535), (65535, 0), (1234, 1234), (65535, 65535)] {
            assert_eq!(anti_doz(a, b), (b - a).min(0));
        }
    }

    fn reference_median9(mut v: [i32; 9]) -> i32 {
        v.sort_unstable();
        v[4]
    }

    #[test]
    fn test_median9_network_random_i32() {
        let mut rng = rand::rng();
        for _ in 0..10_000 {
            let v: [i32; 9] = std::array::from_fn(|_| rng.random());
            assert_eq!(median9_network(v), reference_median9(v));
        }
    }

    #[test]
    fn test_median9_network_boundary_values() {
        let pool = [i32::MIN, -1, 0, 1, i32::MAX];
        let mut rng = rand::rng();
        for _ in 0..10_000 {
            let v: [i32; 9] = std::array::from_fn(|_| *pool.choose(&mut rng).unwrap());
            assert_eq!(median9_network(v), reference_median9(v));
        }
    }

    #[test]
    fn test_median9_magnitudes_random_u16() {
        let mut rng = rand::rng();
        for _ in 0..10_000 {
            let v: [i32; 9] = std::array::from_fn(|_| rng.random::<u16>() as i32);
            assert_eq!(median9_magnitudes(v), reference_median9(v));
        }
    }

    #[test]
    fn test_median9_table_variant_matches_u8() {
        let mut rng = rand::rng();
        for _ in 0..10_000 {
            let v: [i32; 9] = std::array::from_fn(|_| rng.random::<u8>() as i32);
            assert_eq!(median9_u8_table(v), median9_magnitudes(v));
            assert_eq!(median9_u8_table(v), reference_median9(v));
        }
    }
}
