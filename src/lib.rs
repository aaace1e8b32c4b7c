//! Scroll-driven motion for long-form pages.
//!
//! A [`Section`] maps the scroll position of a region to a normalized progress value and fans
//! it out to parallax offsets, progress-bound transforms and a frame-addressable timeline. The
//! page itself stays behind the [`Host`] traits; [`SimulatedHost`] is an in-memory page for tests
//! and offline runs.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub mod animation;
pub mod host;
pub mod motion;
pub mod section;
pub mod sim;

pub use animation::ease::Ease;
pub use animation::range_map::RangeMap;
pub use foundation::core::{ElementId, ElementTransform, FrameIndex, Rect, Vec2};
pub use foundation::error::{MotionError, MotionResult};
pub use host::platform::{
    FrameClock, FrameRequestId, Host, InViewOptions, LayoutReader, ListenerId,
    MotionPreferenceSource, ScrollContainer, ScrollEvents, TimelineHandle, TimelineLoader,
    VisibilityProbe, VisualSink,
};
pub use motion::parallax::{DEFAULT_SPEED, ParallaxTransformer, SETTLE_EPSILON_PX, Smoother};
pub use motion::preference::ReducedMotionGate;
pub use motion::progress::{
    Progress, RegionGeometry, ScrollEdge, ScrollOffsets, ScrollProgressTracker, ScrollRegion,
};
pub use motion::scheduler::FrameScheduler;
pub use motion::timeline::{TimelineScrubber, TimelineState, target_frame};
pub use section::config::{ParallaxTargetConfig, ProgressBinding, SectionConfig, TimelineConfig};
pub use section::lifecycle::{EntryState, FrameReport, Section, TransformWrite};
pub use sim::host::{SimTimeline, SimTimelineStatus, SimulatedHost};
pub use sim::scenario::{LayoutBox, Scenario, SimEvent, SimFrame, SimReport, run_scenario};
