use crate::foundation::core::{ElementId, ElementTransform, FrameIndex, Rect};
use crate::foundation::error::MotionResult;

/// Registration id of a scroll listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub u64);

/// Id of a pending display-refresh callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameRequestId(pub u64);

/// Opaque reference to a loaded (or loading) timeline resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct TimelineHandle(pub u64);

/// Which scroll container a section listens to.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollContainer {
    /// The document scroller.
    #[default]
    Window,
    /// A scrollable element.
    Element(ElementId),
}

/// Options forwarded to the visibility probe.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct InViewOptions {
    /// Report the first positive result only.
    pub once: bool,
    /// Viewport inset as a fraction of its height; negative shrinks the detection box.
    pub margin: f64,
}

impl Default for InViewOptions {
    fn default() -> Self {
        Self {
            once: true,
            margin: -0.1,
        }
    }
}

/// Platform-level reduced-motion preference.
pub trait MotionPreferenceSource {
    /// `Some(true)` when the user asked for reduced motion, `None` when the platform cannot tell.
    fn prefers_reduced_motion(&self) -> Option<bool>;
}

/// Read-only access to layout geometry.
///
/// Implementations must not force layout on every call; sections only read inside a frame
/// callback and write afterwards.
pub trait LayoutReader {
    /// Current viewport height in CSS pixels.
    fn viewport_height(&self) -> f64;
    /// Viewport-relative layout box of `element`, excluding transforms this crate wrote.
    ///
    /// `None` when the element is not attached.
    fn bounding_rect(&self, element: &ElementId) -> Option<Rect>;
}

/// Write side of the visual output.
pub trait VisualSink {
    /// Replace the transform of `element`.
    fn write_transform(&mut self, element: &ElementId, transform: ElementTransform);
}

/// Scroll notification registration.
pub trait ScrollEvents {
    /// Register a passive scroll listener on `container`.
    fn add_scroll_listener(&mut self, container: &ScrollContainer) -> MotionResult<ListenerId>;
    /// Remove a listener registered by [`ScrollEvents::add_scroll_listener`].
    fn remove_scroll_listener(&mut self, id: ListenerId);
}

/// Display-refresh callbacks.
pub trait FrameClock {
    /// Ask for one callback before the next repaint.
    fn request_frame(&mut self) -> FrameRequestId;
    /// Cancel a request that has not fired yet.
    fn cancel_frame(&mut self, id: FrameRequestId);
}

/// Loader for finite, seekable, frame-addressable timelines.
///
/// Loading is asynchronous: [`TimelineLoader::load`] returns a handle immediately and the host
/// later reports readiness through `Section::on_timeline_ready` or
/// `Section::on_timeline_failed`.
pub trait TimelineLoader {
    /// Start loading `source` with autoplay and looping disabled.
    fn load(&mut self, source: &str) -> TimelineHandle;
    /// Pause the timeline at `frame`. Never starts playback.
    fn seek_to(&mut self, handle: TimelineHandle, frame: FrameIndex);
    /// Release the resource.
    fn destroy(&mut self, handle: TimelineHandle);
}

/// Viewport visibility detection.
pub trait VisibilityProbe {
    /// Whether `element` is in view under `options`.
    fn is_in_view(&self, element: &ElementId, options: &InViewOptions) -> bool;
}

/// Everything a section needs from its host.
pub trait Host:
    MotionPreferenceSource
    + LayoutReader
    + VisualSink
    + ScrollEvents
    + FrameClock
    + TimelineLoader
    + VisibilityProbe
{
}

impl<T> Host for T where
    T: MotionPreferenceSource
        + LayoutReader
        + VisualSink
        + ScrollEvents
        + FrameClock
        + TimelineLoader
        + VisibilityProbe
{
}

#[cfg(test)]
#[path = "../../tests/unit/host/platform.rs"]
mod tests;
