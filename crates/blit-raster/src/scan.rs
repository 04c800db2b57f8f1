//! One-bit-per-pixel scan buffers.
//!
//! Pixel `x` of a row lives in byte `x >> 3` at bit `7 - (x & 7)`: the most
//! significant bit is the leftmost pixel. Rows start every `stride` bytes.

use crate::error::RasterError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scan {
    store: Vec<u8>,
    width: usize,
    height: usize,
    stride: usize,
}

impl Scan {
    /// Bytes needed for one row of `width` pixels.
    pub fn min_stride(width: usize) -> usize {
        width.div_ceil(8)
    }

    /// A cleared buffer with the tightest stride.
    pub fn new(width: usize, height: usize) -> Self {
        let stride = Self::min_stride(width);
        Self {
            store: vec![0; stride * height],
            width,
            height,
            stride,
        }
    }

    /// A cleared buffer with an explicit stride.
    pub fn with_stride(width: usize, height: usize, stride: usize) -> Result<Self, RasterError> {
        Self::from_bytes(vec![0; stride * height], width, height, stride)
    }

    /// Wrap existing bytes.
    pub fn from_bytes(
        store: Vec<u8>,
        width: usize,
        height: usize,
        stride: usize,
    ) -> Result<Self, RasterError> {
        if stride < Self::min_stride(width) {
            return Err(RasterError::BadStride { width, stride });
        }
        let expected = stride * height;
        if store.len() < expected {
            return Err(RasterError::ShortBuffer {
                expected,
                actual: store.len(),
            });
        }
        Ok(Self {
            store,
            width,
            height,
            stride,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.store
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.store
    }

    /// Bytes of row `y`, `stride` long.
    pub fn row(&self, y: usize) -> &[u8] {
        &self.store[y * self.stride..(y + 1) * self.stride]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        &mut self.store[y * self.stride..(y + 1) * self.stride]
    }

    /// Pixel at (x, y); false outside the buffer.
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.store[y * self.stride + (x >> 3)] & (0x80 >> (x & 7)) != 0
    }

    /// Set or clear the pixel at (x, y). Writes outside the buffer are ignored.
    pub fn set(&mut self, x: usize, y: usize, ink: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let byte = &mut self.store[y * self.stride + (x >> 3)];
        let bit = 0x80 >> (x & 7);
        if ink {
            *byte |= bit;
        } else {
            *byte &= !bit;
        }
    }

    /// Fill every byte, padding included.
    pub fn clear(&mut self, value: u8) {
        self.store.fill(value);
    }

    /// Render rows as text, one character per pixel.
    pub fn to_ascii(&self, ink: char, paper: char) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(if self.get(x, y) { ink } else { paper });
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_tight_stride() {
        let scan = Scan::new(9, 3);
        assert_eq!(scan.stride(), 2);
        assert_eq!(scan.as_bytes().len(), 6);
        assert_eq!(Scan::new(8, 1).stride(), 1);
        assert_eq!(Scan::new(0, 4).stride(), 0);
    }

    #[test]
    fn test_bad_stride() {
        assert_eq!(
            Scan::with_stride(17, 2, 2),
            Err(RasterError::BadStride {
                width: 17,
                stride: 2
            })
        );
    }

    #[test]
    fn test_short_buffer() {
        assert_eq!(
            Scan::from_bytes(vec![0; 3], 8, 4, 1),
            Err(RasterError::ShortBuffer {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn test_pixel_order_is_msb_first() {
        let mut scan = Scan::new(16, 2);
        scan.set(0, 0, true);
        scan.set(9, 1, true);
        assert_eq!(scan.row(0), &[0x80, 0x00]);
        assert_eq!(scan.row(1), &[0x00, 0x40]);
        assert!(scan.get(9, 1));
        scan.set(9, 1, false);
        assert!(!scan.get(9, 1));
    }

    #[test]
    fn test_out_of_bounds_is_paper() {
        let mut scan = Scan::new(4, 4);
        scan.set(4, 0, true);
        assert!(!scan.get(4, 0));
        assert!(scan.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_to_ascii() {
        let scan = Scan::from_bytes(vec![0x40, 0x80], 2, 2, 1).unwrap();
        assert_eq!(scan.to_ascii('#', '.'), ".#\n#.\n");
    }
}
