//! The 3x3 operator families.
//!
//! Every kernel streams a row the same way: the nine (or five) sample
//! registers are seeded at the wrapped first column, shifted one column per
//! step through the middle of the row, and re-wrapped at the last column.
//! The helpers here own that loop; the families plug in their per-pixel
//! combination.

/// Average-by-square, truncating or round-to-nearest.
pub mod average;

/// Dilation (maximum) by square and by cross.
pub mod dilation;

/// Erosion (minimum) by square and by cross.
pub mod erosion;

/// Gradient magnitude by cross.
pub mod gradient;

/// Exact median by square.
pub mod median;

/// The generalized rank operator by square.
pub mod percentile;

pub use average::AverageBySquare;
pub use dilation::{DilationByCross, DilationBySquare};
pub use erosion::{ErosionByCross, ErosionBySquare};
pub use gradient::GradientByCross;
pub use median::MedianBySquare;
pub use percentile::PercentileBySquare;

use crate::element::FilterElement;
use crate::error::FilterError;
use crate::window::{Filter3x3, RowKernel};
use stencil_matrix::MatSize;

/// Run `combine` over the full 3x3 square at every column of a row.
///
/// Samples are ordered row-major: above `[0..3]`, middle `[3..6]`,
/// below `[6..9]`, so the center pixel is slot 4. The left neighbor of
/// column 0 is the last column and the right neighbor of the last column is
/// column 0, including the one-column degenerate case where both resolve to
/// the column itself.
pub(crate) fn run_square_row<T: FilterElement>(
    out: &mut [T],
    above: &[T],
    middle: &[T],
    below: &[T],
    combine: impl Fn([T; 9]) -> T,
) {
    let dim_x = out.len();
    let last = dim_x - 1;
    let rem1 = 1 % dim_x;
    let mut v0 = above[last];
    let mut v1 = above[0];
    let mut v2 = above[rem1];
    let mut v3 = middle[last];
    let mut v4 = middle[0];
    let mut v5 = middle[rem1];
    let mut v6 = below[last];
    let mut v7 = below[0];
    let mut v8 = below[rem1];
    out[0] = combine([v0, v1, v2, v3, v4, v5, v6, v7, v8]);
    for k in 1..last {
        v0 = v1;
        v1 = v2;
        v2 = above[k + 1];
        v3 = v4;
        v4 = v5;
        v5 = middle[k + 1];
        v6 = v7;
        v7 = v8;
        v8 = below[k + 1];
        out[k] = combine([v0, v1, v2, v3, v4, v5, v6, v7, v8]);
    }
    if dim_x >= 2 {
        v0 = v1;
        v1 = v2;
        v2 = above[0];
        v3 = v4;
        v4 = v5;
        v5 = middle[0];
        v6 = v7;
        v7 = v8;
        v8 = below[0];
        out[last] = combine([v0, v1, v2, v3, v4, v5, v6, v7, v8]);
    }
}

/// Run `combine(left, right, up, down, center)` over the 5-sample cross at
/// every column of a row, with the same column wraparound as
/// [`run_square_row`].
pub(crate) fn run_cross_row<T: FilterElement>(
    out: &mut [T],
    above: &[T],
    middle: &[T],
    below: &[T],
    combine: impl Fn(T, T, T, T, T) -> T,
) {
    let dim_x = out.len();
    let last = dim_x - 1;
    let rem1 = 1 % dim_x;
    let mut vl = middle[last];
    let mut vc = middle[0];
    let mut vr = middle[rem1];
    out[0] = combine(vl, vr, above[0], below[0], vc);
    for k in 1..last {
        vl = vc;
        vc = vr;
        vr = middle[k + 1];
        out[k] = combine(vl, vr, above[k], below[k], vc);
    }
    if dim_x >= 2 {
        vl = vc;
        vc = vr;
        vr = middle[0];
        out[last] = combine(vl, vr, above[last], below[last], vc);
    }
}

impl<T: FilterElement> Filter3x3<T, AverageBySquare> {
    /// An average-by-square filter; `rounding` selects round-to-nearest
    /// instead of truncation (and majority vote instead of unanimity for
    /// the boolean element type).
    pub fn average_by_square(size: MatSize, rounding: bool) -> Self {
        Self::with_kernel(AverageBySquare::new(rounding), size)
    }
}

impl<T: FilterElement> Filter3x3<T, ErosionBySquare> {
    /// An erosion (9-sample minimum) filter.
    pub fn erosion_by_square(size: MatSize) -> Self {
        Self::with_kernel(ErosionBySquare, size)
    }
}

impl<T: FilterElement> Filter3x3<T, DilationBySquare> {
    /// A dilation (9-sample maximum) filter.
    pub fn dilation_by_square(size: MatSize) -> Self {
        Self::with_kernel(DilationBySquare, size)
    }
}

impl<T: FilterElement> Filter3x3<T, ErosionByCross> {
    /// An erosion filter over the 5-sample cross.
    pub fn erosion_by_cross(size: MatSize) -> Self {
        Self::with_kernel(ErosionByCross, size)
    }
}

impl<T: FilterElement> Filter3x3<T, DilationByCross> {
    /// A dilation filter over the 5-sample cross.
    pub fn dilation_by_cross(size: MatSize) -> Self {
        Self::with_kernel(DilationByCross, size)
    }
}

impl<T: FilterElement> Filter3x3<T, MedianBySquare> {
    /// An exact 9-sample median filter.
    pub fn median_by_square(size: MatSize) -> Self {
        Self::with_kernel(MedianBySquare, size)
    }
}

impl<T: FilterElement> Filter3x3<T, GradientByCross> {
    /// A cross gradient magnitude filter.
    pub fn gradient_by_cross(size: MatSize) -> Self {
        Self::with_kernel(GradientByCross, size)
    }
}

impl<T: FilterElement> Filter3x3<T, Box<dyn RowKernel<T>>> {
    /// The rank-`rank` value of the 9-sample square neighborhood.
    ///
    /// Ranks 0, 4 and 8 route to the dedicated erosion, median and dilation
    /// kernels, which compute the same result faster than the general rank
    /// selection.
    ///
    /// # Errors
    ///
    /// Fails with [`FilterError::InvalidRank`] for ranks above 8.
    pub fn percentile_by_square(size: MatSize, rank: usize) -> Result<Self, FilterError> {
        let kernel: Box<dyn RowKernel<T>> = match rank {
            0 => Box::new(ErosionBySquare),
            4 => Box::new(MedianBySquare),
            8 => Box::new(DilationBySquare),
            _ => Box::new(PercentileBySquare::new(rank)?),
        };
        Ok(Self::with_kernel(kernel, size))
    }
}
