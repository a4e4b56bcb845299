#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

//! All operators work on a fixed 3x3 neighborhood and treat the matrix as
//! periodic in both axes: the neighbor above row 0 is the last row, the
//! neighbor left of column 0 is the last column, and so on. Filters are
//! bound at construction to one element type and one shape, and are meant
//! to be reused across many calls.
//!
//! ```
//! use stencil_filters::Filter3x3;
//! use stencil_matrix::{MatSize, Matrix2};
//!
//! let size = MatSize { dim_x: 4, dim_y: 4 };
//! let src = Matrix2::new(size, (0u8..16).collect())?;
//!
//! let mut erosion = Filter3x3::erosion_by_square(size);
//! let eroded = erosion.filter(&src)?;
//! assert_eq!(eroded.get(1, 1), Some(0));
//! # Ok::<(), stencil_filters::FilterError>(())
//! ```

/// Per-element widened arithmetic for the filter kernels.
pub mod element;

/// Error types for the filter engine.
pub mod error;

/// The operator families built on the streaming core.
pub mod ops;

/// Branchless compare-and-swap primitives and the median sorting network.
pub mod primitives;

/// The windowed streaming core and row-range parallel execution.
pub mod window;

pub use crate::element::FilterElement;
pub use crate::error::FilterError;
pub use crate::ops::{
    AverageBySquare, DilationByCross, DilationBySquare, ErosionByCross, ErosionBySquare,
    GradientByCross, MedianBySquare, PercentileBySquare,
};
pub use crate::window::{Filter3x3, RowKernel};
