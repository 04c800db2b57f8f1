//! One-dimensional regions.
//!
//! A blit is described by two `Rgn1`s, one per axis. Each gives where the
//! span lands in the destination (`origin`), where it is read from in the
//! source (`origin_source`), and how long it is (`extent`).

/// One axis of a blit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rgn1 {
    pub origin: i32,
    pub extent: i32,
    pub origin_source: i32,
}

impl Rgn1 {
    pub fn new(origin: i32, extent: i32, origin_source: i32) -> Self {
        Self {
            origin,
            extent,
            origin_source,
        }
    }

    /// A span whose destination and source origins coincide.
    pub fn same(origin: i32, extent: i32) -> Self {
        Self::new(origin, extent, origin)
    }

    /// Make the extent non-negative.
    ///
    /// A negative extent means both origins name the far edge of the span;
    /// they move back by the extent's magnitude. Returns false, leaving the
    /// region unchanged, when a moved origin falls outside `i32`.
    pub fn norm(&mut self) -> bool {
        let mut span = Span::from(*self);
        span.norm();
        span.store(self)
    }

    /// Advance both origins together until neither is negative.
    ///
    /// Returns false when that consumes the whole extent.
    pub fn slip(&mut self) -> bool {
        let mut span = Span::from(*self);
        span.slip() && span.store(self)
    }

    /// Limit the extent to `available` pixels.
    ///
    /// Returns false when nothing is available.
    pub fn clip(&mut self, available: i32) -> bool {
        let mut span = Span::from(*self);
        span.clip(i64::from(available)) && span.store(self)
    }

    /// Normalise, slip and clip against a destination and a source length.
    ///
    /// The region is only written back when something remains.
    pub fn fit(&mut self, len: i32, len_source: i32) -> bool {
        let mut span = Span::from(*self);
        span.norm();
        span.slip()
            && span.clip(i64::from(len) - span.origin)
            && span.clip(i64::from(len_source) - span.origin_source)
            && span.store(self)
    }
}

/// `Rgn1` widened to `i64` so that no step can overflow.
#[derive(Debug, Clone, Copy)]
struct Span {
    origin: i64,
    extent: i64,
    origin_source: i64,
}

impl From<Rgn1> for Span {
    fn from(r: Rgn1) -> Self {
        Self {
            origin: i64::from(r.origin),
            extent: i64::from(r.extent),
            origin_source: i64::from(r.origin_source),
        }
    }
}

impl Span {
    fn norm(&mut self) {
        if self.extent < 0 {
            self.extent = -self.extent;
            self.origin -= self.extent;
            self.origin_source -= self.extent;
        }
    }

    fn slip(&mut self) -> bool {
        let offset = 0i64.max(-self.origin).max(-self.origin_source);
        if offset >= self.extent {
            return false;
        }
        self.origin += offset;
        self.origin_source += offset;
        self.extent -= offset;
        true
    }

    fn clip(&mut self, available: i64) -> bool {
        if available <= 0 {
            return false;
        }
        self.extent = self.extent.min(available);
        true
    }

    /// Write back into `r`; false when any field no longer fits an `i32`.
    fn store(self, r: &mut Rgn1) -> bool {
        match (
            i32::try_from(self.origin),
            i32::try_from(self.extent),
            i32::try_from(self.origin_source),
        ) {
            (Ok(origin), Ok(extent), Ok(origin_source)) => {
                *r = Rgn1::new(origin, extent, origin_source);
                true
            }
            _ => false,
        }
    }
}
