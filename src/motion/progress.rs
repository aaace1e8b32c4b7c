use crate::foundation::core::Rect;
use crate::foundation::error::{MotionError, MotionResult};
use crate::foundation::math::{clamp_unit, inverse_lerp, is_finite_all};

/// Normalized position within a scroll region, always in `[0, 1]`.
///
/// Progress mirrors the scroll position: it goes back down when the user scrolls back up.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, serde::Serialize)]
#[serde(transparent)]
pub struct Progress(f64);

impl Progress {
    /// Before the region.
    pub const START: Self = Self(0.0);
    /// Past the region.
    pub const END: Self = Self(1.0);

    /// Clamp `v` into `[0, 1]`. Non-finite input collapses to the nearest bound, NaN to `0`.
    pub fn new(v: f64) -> Self {
        Self(clamp_unit(v))
    }

    /// The raw value.
    pub fn get(self) -> f64 {
        self.0
    }
}

/// Viewport-relative vertical edges of a region.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RegionGeometry {
    /// Distance from the viewport top to the region top (negative once scrolled past).
    pub top: f64,
    /// Distance from the viewport top to the region bottom.
    pub bottom: f64,
}

impl RegionGeometry {
    /// Take the vertical edges of a viewport-relative layout box.
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            top: rect.y0,
            bottom: rect.y1,
        }
    }

    /// Region height; never negative.
    pub fn height(self) -> f64 {
        (self.bottom - self.top).max(0.0)
    }
}

/// A pinned region in document coordinates plus the current scroll offset.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollRegion {
    /// Document offset of the region top.
    pub start: f64,
    /// Document offset of the region bottom.
    pub end: f64,
    /// Current document scroll offset.
    pub scroll_offset: f64,
}

impl ScrollRegion {
    /// The region as seen from the viewport at the current scroll offset.
    pub fn geometry(self) -> RegionGeometry {
        RegionGeometry {
            top: self.start - self.scroll_offset,
            bottom: self.end - self.scroll_offset,
        }
    }
}

/// "This point of the region meets this point of the viewport".
///
/// Both fields are fractions: `region: 0.0` is the region top, `1.0` its bottom;
/// `viewport: 0.0` is the viewport top, `1.0` its bottom.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollEdge {
    /// Fraction of the region height.
    pub region: f64,
    /// Fraction of the viewport height.
    pub viewport: f64,
}

impl ScrollEdge {
    /// Scroll distance past the region top at which this edge is reached.
    fn scroll_distance(self, region_height: f64, viewport_height: f64) -> f64 {
        self.region * region_height - self.viewport * viewport_height
    }
}

/// Where progress starts and ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollOffsets {
    /// From the region top entering at the viewport bottom to the region bottom leaving at the
    /// viewport top.
    #[default]
    EnterExit,
    /// From the region top reaching the viewport top to the region bottom reaching the viewport
    /// bottom: the lifetime of a sticky stage inside the region.
    Pinned,
    /// Explicit edges.
    Custom {
        /// Edge at which progress is `0`.
        start: ScrollEdge,
        /// Edge at which progress is `1`.
        end: ScrollEdge,
    },
}

impl ScrollOffsets {
    /// Resolve the named variants to explicit edges.
    pub fn edges(self) -> (ScrollEdge, ScrollEdge) {
        match self {
            Self::EnterExit => (
                ScrollEdge {
                    region: 0.0,
                    viewport: 1.0,
                },
                ScrollEdge {
                    region: 1.0,
                    viewport: 0.0,
                },
            ),
            Self::Pinned => (
                ScrollEdge {
                    region: 0.0,
                    viewport: 0.0,
                },
                ScrollEdge {
                    region: 1.0,
                    viewport: 1.0,
                },
            ),
            Self::Custom { start, end } => (start, end),
        }
    }

    /// Reject non-finite edge fractions.
    pub fn validate(self) -> MotionResult<()> {
        let (start, end) = self.edges();
        if !is_finite_all(&[start.region, start.viewport, end.region, end.viewport]) {
            return Err(MotionError::validation("scroll offsets must be finite"));
        }
        Ok(())
    }

    /// Progress of `geometry` inside a viewport of `viewport_height`.
    ///
    /// With the default offsets this is
    /// `clamp((vh - top) / (vh - (top - bottom)), 0, 1)`.
    pub fn progress(self, geometry: RegionGeometry, viewport_height: f64) -> Progress {
        let (start, end) = self.edges();
        let height = geometry.height();
        let scrolled = -geometry.top;
        let from = start.scroll_distance(height, viewport_height);
        let to = end.scroll_distance(height, viewport_height);
        Progress::new(inverse_lerp(from, to, scrolled))
    }
}

/// Derives section progress from region geometry, one evaluation per scheduled frame.
#[derive(Clone, Debug, Default)]
pub struct ScrollProgressTracker {
    offsets: ScrollOffsets,
    last: Option<Progress>,
}

impl ScrollProgressTracker {
    /// A tracker with the given endpoints.
    pub fn new(offsets: ScrollOffsets) -> Self {
        Self {
            offsets,
            last: None,
        }
    }

    /// Evaluate and remember the progress for this frame.
    pub fn update(&mut self, geometry: RegionGeometry, viewport_height: f64) -> Progress {
        let p = self.offsets.progress(geometry, viewport_height);
        self.last = Some(p);
        p
    }

    /// Progress computed by the most recent [`ScrollProgressTracker::update`].
    pub fn last(&self) -> Option<Progress> {
        self.last
    }

    /// Endpoints in use.
    pub fn offsets(&self) -> ScrollOffsets {
        self.offsets
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/progress.rs"]
mod tests;
