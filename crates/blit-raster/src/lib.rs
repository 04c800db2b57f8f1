//! # blit-raster
//!
//! Binary raster operations on one-bit-per-pixel images.
//!
//! ## Modules
//! - `scan`: scan buffers (rows of packed pixels, MSB first)
//! - `rgn1`: one-dimensional regions and their normalise/slip/clip steps
//! - `phase_align`: re-phasing source bytes to destination bit positions
//! - `rop2`: the sixteen binary raster operations and their reverse polish names
//! - `blit`: region transfers combining source and destination with a ROP2
//!
//! ```
//! use blit_raster::{rop2_at, Rop2, Scan};
//!
//! let source = Scan::from_bytes(vec![0xff], 8, 1, 1).unwrap();
//! let mut result = Scan::new(8, 1);
//! assert!(rop2_at(&mut result, (2, 0), (4, 1), &source, (0, 0), Rop2::COPY));
//! assert_eq!(result.as_bytes(), &[0x3c]);
//! ```

pub mod blit;
pub mod error;
pub mod phase_align;
pub mod rgn1;
pub mod rop2;
pub mod scan;

pub use blit::{fill, rop2, rop2_at};
pub use error::RasterError;
pub use phase_align::{be16_at, be32_at, byte_at, le16_at, le32_at, PhaseAlign};
pub use rgn1::Rgn1;
pub use rop2::Rop2;
pub use scan::Scan;
