//! Raster error types.

use thiserror::Error;

use crate::rop2::Rop2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RasterError {
    /// Name is neither a reverse polish program nor a known alias
    #[error("Unknown raster operation: {0}")]
    UnknownRop(String),

    /// Reverse polish program does not evaluate to one value
    #[error("Bad reverse polish program '{program}': {reason}")]
    Polish { program: String, reason: String },

    /// Row stride cannot hold a row of the given width
    #[error("Stride {stride} too small for width {width}")]
    BadStride { width: usize, stride: usize },

    /// Backing store is smaller than stride * height
    #[error("Buffer holds {actual} bytes, need {expected}")]
    ShortBuffer { expected: usize, actual: usize },

    /// In-place operation was given a raster operation that reads the source
    #[error("Raster operation {0} needs a source")]
    NeedsSource(Rop2),
}
