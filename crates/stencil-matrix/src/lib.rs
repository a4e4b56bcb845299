#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Element type tags and the sealed element marker trait.
pub mod element;

/// Error types for the matrix module.
pub mod error;

/// Bulk-run access traits and the contiguous-buffer capability.
pub mod access;

/// The concrete row-major matrix container.
pub mod matrix;

pub use crate::access::{MatrixSource, MatrixTarget};
pub use crate::element::{ElementType, MatElement};
pub use crate::error::MatrixError;
pub use crate::matrix::{MatSize, Matrix2};
