//! Bit block transfer with a binary raster operation.
//!
//! Each destination row is combined with the matching source row one byte
//! at a time. The first and last byte of a row are masked so that pixels
//! outside the region keep their values.

use tracing::trace;

use crate::error::RasterError;
use crate::phase_align::PhaseAlign;
use crate::rgn1::Rgn1;
use crate::rop2::Rop2;
use crate::scan::Scan;

fn len_i32(len: usize) -> i32 {
    i32::try_from(len).unwrap_or(i32::MAX)
}

/// Combine `extent` pixels of `row` starting at pixel `origin` with the
/// bytes produced by `fetch`, one call per touched byte in order.
fn combine_row(row: &mut [u8], origin: i32, extent: i32, rop: Rop2, mut fetch: impl FnMut() -> u8) {
    let x_max = origin + extent - 1;
    let first = (origin >> 3) as usize;
    let last = (x_max >> 3) as usize;
    let origin_mask: u8 = 0xff >> (origin & 7);
    let extent_mask: u8 = 0xff << (7 - (x_max & 7));

    let masked = |byte: &mut u8, mask: u8, s: u8| {
        *byte = (*byte & !mask) | (mask & rop.apply(s, *byte));
    };

    if first == last {
        masked(&mut row[first], origin_mask & extent_mask, fetch());
        return;
    }
    masked(&mut row[first], origin_mask, fetch());
    for byte in &mut row[first + 1..last] {
        *byte = rop.apply(fetch(), *byte);
    }
    masked(&mut row[last], extent_mask, fetch());
}

/// Combine a region of `source` into `result`.
///
/// `x` and `y` are normalised, slipped so no origin is negative, and clipped
/// to both buffers; the adjusted regions are left in place for the caller.
/// Returns false, touching nothing, when the clipped region is empty.
pub fn rop2(result: &mut Scan, x: &mut Rgn1, y: &mut Rgn1, source: &Scan, rop: Rop2) -> bool {
    if !x.fit(len_i32(result.width()), len_i32(source.width())) {
        return false;
    }
    if !y.fit(len_i32(result.height()), len_i32(source.height())) {
        return false;
    }
    trace!(?x, ?y, %rop, "rop2");

    for row in 0..y.extent {
        let src = source.row((y.origin_source + row) as usize);
        let mut align = PhaseAlign::start(x.origin, x.origin_source as usize, src);
        let dst = result.row_mut((y.origin + row) as usize);
        combine_row(dst, x.origin, x.extent, rop, || align.fetch());
    }
    true
}

/// Rectangle form of [`rop2`]: `size` pixels from `from` in `source` land at
/// `at` in `result`.
pub fn rop2_at(
    result: &mut Scan,
    at: (i32, i32),
    size: (i32, i32),
    source: &Scan,
    from: (i32, i32),
    rop: Rop2,
) -> bool {
    let mut x = Rgn1::new(at.0, size.0, from.0);
    let mut y = Rgn1::new(at.1, size.1, from.1);
    rop2(result, &mut x, &mut y, source, rop)
}

/// Apply an operation that ignores the source (`0`, `1`, `D`, `Dn`) in place.
///
/// Only the destination origins and extents of `x` and `y` are used.
pub fn fill(result: &mut Scan, x: &mut Rgn1, y: &mut Rgn1, rop: Rop2) -> Result<bool, RasterError> {
    if rop.uses_source() {
        return Err(RasterError::NeedsSource(rop));
    }
    x.origin_source = x.origin;
    y.origin_source = y.origin;
    let width = len_i32(result.width());
    let height = len_i32(result.height());
    if !x.fit(width, width) || !y.fit(height, height) {
        return Ok(false);
    }
    for row in 0..y.extent {
        let dst = result.row_mut((y.origin + row) as usize);
        combine_row(dst, x.origin, x.extent, rop, || 0x00);
    }
    Ok(true)
}
