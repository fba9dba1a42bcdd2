/// A run of screen angles, in degrees, tracked while merging arc pieces.
///
/// `start` and `end` are kept in `[0, 360]` and `extent` in `[-360, 360]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleSegment {
    start: f64,
    extent: f64,
    end: f64,
}

impl AngleSegment {
    /// Segment from `start` to `end`, taking the short way round.
    #[must_use]
    pub fn from_end(start: f64, end: f64) -> Self {
        let mut extent = end - start;
        if extent > 180.0 {
            extent -= 360.0;
        } else if extent < -180.0 {
            extent += 360.0;
        }
        Self { start, extent, end }.normalized()
    }

    /// Segment sweeping `extent` degrees from `start`.
    #[must_use]
    pub fn from_extent(start: f64, extent: f64) -> Self {
        let mut end = start + extent;
        if end > 180.0 {
            end -= 360.0;
        } else if end < -180.0 {
            end += 360.0;
        }
        Self { start, extent, end }.normalized()
    }

    fn normalized(self) -> Self {
        let Self { mut start, extent, mut end } = self;
        if start > 360.0 {
            start -= 360.0;
        } else if start < 0.0 {
            start += 360.0;
        }
        if end > 360.0 {
            end -= 360.0;
        } else if end < 0.0 {
            end += 360.0;
        }
        Self {
            start,
            extent: extent.clamp(-360.0, 360.0),
            end,
        }
    }

    /// This segment followed by `other`: same start, summed sweep.
    #[must_use]
    pub fn concatenate(&self, other: &Self) -> Self {
        Self::from_extent(self.start, self.extent + other.extent)
    }

    #[must_use]
    pub fn start(&self) -> f64 {
        self.start
    }

    #[must_use]
    pub fn extent(&self) -> f64 {
        self.extent
    }

    #[must_use]
    pub fn end(&self) -> f64 {
        self.end
    }
}
