use crate::foundation::core::{ElementId, ElementTransform, FrameIndex, Rect};
use crate::foundation::error::{MotionError, MotionResult};
use crate::host::platform::{
    FrameClock, FrameRequestId, InViewOptions, LayoutReader, ListenerId, MotionPreferenceSource,
    ScrollContainer, ScrollEvents, TimelineHandle, TimelineLoader, VisibilityProbe, VisualSink,
};
use crate::section::lifecycle::TransformWrite;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Load status of a simulated timeline resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SimTimelineStatus {
    /// Load in flight.
    Loading,
    /// Loaded with this many frames.
    Ready {
        /// Total frame count.
        total_frames: u64,
    },
    /// Load failed.
    Failed,
    /// Destroyed by its owner.
    Destroyed,
}

/// A timeline resource as seen by the simulated loader.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SimTimeline {
    /// Source identifier it was loaded from.
    pub source: String,
    /// Load status.
    pub status: SimTimelineStatus,
    /// Every pause-seek received, in order.
    pub seeks: Vec<FrameIndex>,
    /// Number of `destroy` calls received.
    pub destroy_calls: u32,
}

impl SimTimeline {
    /// Frame currently shown: the last seek, or the first frame.
    pub fn shown_frame(&self) -> FrameIndex {
        self.seeks.last().copied().unwrap_or(FrameIndex(0))
    }
}

#[derive(Debug)]
struct SimState {
    viewport_width: f64,
    viewport_height: f64,
    scroll_y: f64,
    reduced_motion: Option<bool>,
    layout: BTreeMap<ElementId, Rect>,
    containers: Vec<ScrollContainer>,
    listeners: BTreeMap<ListenerId, ScrollContainer>,
    next_listener: u64,
    pending_frames: Vec<FrameRequestId>,
    cancelled_frames: Vec<FrameRequestId>,
    next_frame: u64,
    transforms: BTreeMap<ElementId, ElementTransform>,
    transform_log: Vec<TransformWrite>,
    timelines: BTreeMap<TimelineHandle, SimTimeline>,
    next_timeline: u64,
}

impl Default for SimState {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            viewport_height: 800.0,
            scroll_y: 0.0,
            reduced_motion: None,
            layout: BTreeMap::new(),
            containers: vec![ScrollContainer::Window],
            listeners: BTreeMap::new(),
            next_listener: 0,
            pending_frames: Vec::new(),
            cancelled_frames: Vec::new(),
            next_frame: 0,
            transforms: BTreeMap::new(),
            transform_log: Vec::new(),
            timelines: BTreeMap::new(),
            next_timeline: 0,
        }
    }
}

/// Deterministic in-memory page for tests, demos and the CLI.
///
/// Cloning yields another handle to the same page, so a test can hand one clone to a
/// [`crate::Section`] and keep another to scroll, fire refreshes and inspect what was written.
/// Layout boxes are stored in document coordinates; [`LayoutReader::bounding_rect`] reports them
/// relative to the current scroll position.
#[derive(Clone, Debug, Default)]
pub struct SimulatedHost {
    state: Rc<RefCell<SimState>>,
}

impl SimulatedHost {
    /// A page with a viewport of `viewport_height` pixels, scrolled to the top.
    pub fn new(viewport_height: f64) -> Self {
        let host = Self::default();
        host.state.borrow_mut().viewport_height = viewport_height;
        host
    }

    /// Answer reduced-motion queries with `pref` (`None`: platform cannot tell).
    pub fn set_reduced_motion(&self, pref: Option<bool>) {
        self.state.borrow_mut().reduced_motion = pref;
    }

    /// Place `element` at document offset `top` with `height`, spanning the viewport width.
    pub fn place(&self, element: impl Into<ElementId>, top: f64, height: f64) {
        let mut s = self.state.borrow_mut();
        let rect = Rect::new(0.0, top, s.viewport_width, top + height);
        s.layout.insert(element.into(), rect);
    }

    /// Detach `element` from the page.
    pub fn remove(&self, element: &ElementId) {
        self.state.borrow_mut().layout.remove(element);
    }

    /// Make `container` available for listener registration.
    pub fn add_scroll_container(&self, container: ScrollContainer) {
        let mut s = self.state.borrow_mut();
        if !s.containers.contains(&container) {
            s.containers.push(container);
        }
    }

    /// Make registration on `container` fail.
    pub fn remove_scroll_container(&self, container: &ScrollContainer) {
        self.state.borrow_mut().containers.retain(|c| c != container);
    }

    /// Move the document scroll position. Listener dispatch is up to the caller.
    pub fn set_scroll(&self, y: f64) {
        self.state.borrow_mut().scroll_y = y;
    }

    /// Current document scroll position.
    pub fn scroll_y(&self) -> f64 {
        self.state.borrow().scroll_y
    }

    /// Drain the frame requests due at the next display refresh, oldest first.
    pub fn take_frame_requests(&self) -> Vec<FrameRequestId> {
        std::mem::take(&mut self.state.borrow_mut().pending_frames)
    }

    /// Number of frame requests waiting for a refresh.
    pub fn pending_frame_count(&self) -> usize {
        self.state.borrow().pending_frames.len()
    }

    /// Requests cancelled before they fired.
    pub fn cancelled_frames(&self) -> Vec<FrameRequestId> {
        self.state.borrow().cancelled_frames.clone()
    }

    /// Number of registered scroll listeners.
    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    /// Transform currently applied to `element` (identity if never written).
    pub fn transform(&self, element: &ElementId) -> ElementTransform {
        self.state
            .borrow()
            .transforms
            .get(element)
            .copied()
            .unwrap_or(ElementTransform::IDENTITY)
    }

    /// Every transform applied to the page, keyed by element.
    pub fn transforms(&self) -> BTreeMap<ElementId, ElementTransform> {
        self.state.borrow().transforms.clone()
    }

    /// Every transform write received, in order.
    pub fn transform_log(&self) -> Vec<TransformWrite> {
        self.state.borrow().transform_log.clone()
    }

    /// Finish loading `handle` with `total_frames` frames.
    pub fn complete_load(&self, handle: TimelineHandle, total_frames: u64) -> MotionResult<()> {
        self.with_loading(handle, |t| {
            t.status = SimTimelineStatus::Ready { total_frames };
        })
    }

    /// Fail the load of `handle`.
    pub fn fail_load(&self, handle: TimelineHandle) -> MotionResult<()> {
        self.with_loading(handle, |t| t.status = SimTimelineStatus::Failed)
    }

    /// Snapshot of the timeline behind `handle`.
    pub fn timeline(&self, handle: TimelineHandle) -> Option<SimTimeline> {
        self.state.borrow().timelines.get(&handle).cloned()
    }

    /// Handles of every timeline ever loaded, oldest first.
    pub fn timeline_handles(&self) -> Vec<TimelineHandle> {
        self.state.borrow().timelines.keys().copied().collect()
    }

    fn with_loading(
        &self,
        handle: TimelineHandle,
        f: impl FnOnce(&mut SimTimeline),
    ) -> MotionResult<()> {
        let mut s = self.state.borrow_mut();
        let Some(t) = s.timelines.get_mut(&handle) else {
            return Err(MotionError::timeline(format!("unknown timeline {handle:?}")));
        };
        if t.status != SimTimelineStatus::Loading {
            return Err(MotionError::timeline(format!(
                "timeline {handle:?} is not loading ({:?})",
                t.status
            )));
        }
        f(t);
        Ok(())
    }
}

impl MotionPreferenceSource for SimulatedHost {
    fn prefers_reduced_motion(&self) -> Option<bool> {
        self.state.borrow().reduced_motion
    }
}

impl LayoutReader for SimulatedHost {
    fn viewport_height(&self) -> f64 {
        self.state.borrow().viewport_height
    }

    fn bounding_rect(&self, element: &ElementId) -> Option<Rect> {
        let s = self.state.borrow();
        s.layout
            .get(element)
            .map(|r| Rect::new(r.x0, r.y0 - s.scroll_y, r.x1, r.y1 - s.scroll_y))
    }
}

impl VisualSink for SimulatedHost {
    fn write_transform(&mut self, element: &ElementId, transform: ElementTransform) {
        let mut s = self.state.borrow_mut();
        s.transforms.insert(element.clone(), transform);
        s.transform_log.push(TransformWrite {
            element: element.clone(),
            transform,
        });
    }
}

impl ScrollEvents for SimulatedHost {
    fn add_scroll_listener(&mut self, container: &ScrollContainer) -> MotionResult<ListenerId> {
        let mut s = self.state.borrow_mut();
        if !s.containers.contains(container) {
            return Err(MotionError::registration(format!(
                "no scrollable container {container:?}"
            )));
        }
        s.next_listener += 1;
        let id = ListenerId(s.next_listener);
        s.listeners.insert(id, container.clone());
        Ok(id)
    }

    fn remove_scroll_listener(&mut self, id: ListenerId) {
        self.state.borrow_mut().listeners.remove(&id);
    }
}

impl FrameClock for SimulatedHost {
    fn request_frame(&mut self) -> FrameRequestId {
        let mut s = self.state.borrow_mut();
        s.next_frame += 1;
        let id = FrameRequestId(s.next_frame);
        s.pending_frames.push(id);
        id
    }

    fn cancel_frame(&mut self, id: FrameRequestId) {
        let mut s = self.state.borrow_mut();
        let before = s.pending_frames.len();
        s.pending_frames.retain(|f| *f != id);
        if s.pending_frames.len() != before {
            s.cancelled_frames.push(id);
        }
    }
}

impl TimelineLoader for SimulatedHost {
    fn load(&mut self, source: &str) -> TimelineHandle {
        let mut s = self.state.borrow_mut();
        s.next_timeline += 1;
        let handle = TimelineHandle(s.next_timeline);
        s.timelines.insert(
            handle,
            SimTimeline {
                source: source.to_owned(),
                status: SimTimelineStatus::Loading,
                seeks: Vec::new(),
                destroy_calls: 0,
            },
        );
        handle
    }

    fn seek_to(&mut self, handle: TimelineHandle, frame: FrameIndex) {
        if let Some(t) = self.state.borrow_mut().timelines.get_mut(&handle) {
            t.seeks.push(frame);
        }
    }

    fn destroy(&mut self, handle: TimelineHandle) {
        if let Some(t) = self.state.borrow_mut().timelines.get_mut(&handle) {
            t.destroy_calls += 1;
            t.status = SimTimelineStatus::Destroyed;
        }
    }
}

impl VisibilityProbe for SimulatedHost {
    fn is_in_view(&self, element: &ElementId, options: &InViewOptions) -> bool {
        let Some(rect) = self.bounding_rect(element) else {
            return false;
        };
        let vh = self.viewport_height();
        let inset = -options.margin * vh;
        rect.y0 < vh - inset && rect.y1 > inset
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sim/host.rs"]
mod tests;
