use crate::element::FilterElement;
use crate::error::FilterError;
use crate::ops::run_square_row;
use crate::window::RowKernel;

/// The rank-`rank` order statistic of the 9-sample square neighborhood.
///
/// Rank 0 is the minimum (erosion), rank 8 the maximum (dilation), rank 4
/// the median; the dedicated kernels for those ranks are faster, and the
/// [`Filter3x3::percentile_by_square`] factory routes to them.
///
/// Rather than sorting all nine samples, the kernel sorts the three
/// middle-row samples, partitions the other six around their middle value,
/// and then selects within whichever side holds the requested rank.
///
/// [`Filter3x3::percentile_by_square`]: crate::window::Filter3x3::percentile_by_square
#[derive(Clone, Copy, Debug)]
pub struct PercentileBySquare {
    rank: usize,
}

impl PercentileBySquare {
    /// A new rank kernel.
    ///
    /// # Errors
    ///
    /// Fails with [`FilterError::InvalidRank`] for ranks above 8.
    pub fn new(rank: usize) -> Result<Self, FilterError> {
        if rank > 8 {
            return Err(FilterError::InvalidRank(rank));
        }
        Ok(Self { rank })
    }

    /// The target rank in `0..=8`.
    pub fn rank(&self) -> usize {
        self.rank
    }
}

impl<T: FilterElement> RowKernel<T> for PercentileBySquare {
    fn process_row(
        &self,
        out: &mut [T],
        above: &[T],
        middle: &[T],
        below: &[T],
        _range_index: usize,
    ) {
        let rank = self.rank;
        run_square_row(out, above, middle, below, |v| percentile9(v, rank));
    }
}

/// The rank-`rank` value of 9 samples; `rank` must be in `0..=8`.
fn percentile9<T: FilterElement>(v: [T; 9], rank: usize) -> T {
    let [v0, v1, v2, v3, v4, v5, v6, v7, v8] = v;
    // sort the middle-row samples: v_lo <= v_mid <= v_hi
    let (v_lo, v_mid) = if v3 < v4 { (v3, v4) } else { (v4, v3) };
    let (v_lo, v_mid, v_hi) = if v5 >= v_mid {
        (v_lo, v_mid, v5)
    } else if v5 >= v_lo {
        (v_lo, v5, v_mid)
    } else {
        (v5, v_lo, v_mid)
    };
    // partition the remaining six around v_mid
    let mut left = [v_lo; 7];
    let mut right = [v_hi; 7];
    let mut left_count = 1;
    let mut right_count = 1;
    for s in [v0, v1, v2, v6, v7, v8] {
        if s < v_mid {
            left[left_count] = s;
            left_count += 1;
        } else {
            right[right_count] = s;
            right_count += 1;
        }
    }
    if rank == left_count {
        v_mid
    } else if rank < left_count {
        // counting from the maximum side is cheaper when the rank sits
        // near the top of the left part, the common case for the median
        select_from_max(&mut left[..left_count], left_count - rank - 1)
    } else {
        select_from_min(&mut right[..right_count], rank - left_count - 1)
    }
}

/// The `target`-th smallest value of `a`, by repeated minimum extraction.
fn select_from_min<T: FilterElement>(a: &mut [T], target: usize) -> T {
    let mut k = 0;
    loop {
        let w = a[k];
        let mut min = w;
        let mut index_of_min = k;
        for (i, &ai) in a.iter().enumerate().skip(k + 1) {
            if ai < min {
                min = ai;
                index_of_min = i;
            }
        }
        if k == target {
            return min;
        }
        // if index_of_min == k this was a true minimum; otherwise move the
        // displaced value out of the scanned prefix
        a[index_of_min] = w;
        k += 1;
    }
}

/// The `target`-th largest value of `a`, by repeated maximum extraction.
fn select_from_max<T: FilterElement>(a: &mut [T], target: usize) -> T {
    let mut k = 0;
    loop {
        let w = a[k];
        let mut max = w;
        let mut index_of_max = k;
        for (i, &ai) in a.iter().enumerate().skip(k + 1) {
            if ai > max {
                max = ai;
                index_of_max = i;
            }
        }
        if k == target {
            return max;
        }
        a[index_of_max] = w;
        k += 1;
    }
}
