use crate::foundation::core::FrameIndex;
use crate::host::platform::{TimelineHandle, TimelineLoader};
use crate::motion::progress::Progress;

/// Lifecycle of a scrubbed timeline resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum TimelineState {
    /// Nothing requested yet.
    Unloaded,
    /// Load issued, not ready. A failed load stays here.
    Loading,
    /// Seekable.
    Ready {
        /// Total frame count reported by the loader.
        total_frames: u64,
    },
    /// Released. Terminal.
    Destroyed,
}

/// Target frame for `progress` on a timeline of `total_frames`.
///
/// `round(progress * total_frames)` clamped to `[0, total_frames]`.
pub fn target_frame(progress: Progress, total_frames: u64) -> FrameIndex {
    let raw = (progress.get() * total_frames as f64).round();
    FrameIndex((raw.max(0.0) as u64).min(total_frames))
}

/// Drives a frame-addressable timeline from section progress by pausing it at computed frames.
#[derive(Debug)]
pub struct TimelineScrubber {
    source: String,
    handle: Option<TimelineHandle>,
    state: TimelineState,
    current: Option<FrameIndex>,
    failed: bool,
}

impl TimelineScrubber {
    /// A scrubber for `source` in [`TimelineState::Unloaded`].
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            handle: None,
            state: TimelineState::Unloaded,
            current: None,
            failed: false,
        }
    }

    /// Resource identifier passed to the loader.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Current lifecycle state.
    pub fn state(&self) -> TimelineState {
        self.state
    }

    /// Handle issued by the loader, once loading started. Kept after destruction.
    pub fn handle(&self) -> Option<TimelineHandle> {
        self.handle
    }

    /// Whether the load was reported as failed. The state stays [`TimelineState::Loading`].
    pub fn has_failed(&self) -> bool {
        self.failed
    }

    /// Frame most recently sought to.
    pub fn current_frame(&self) -> Option<FrameIndex> {
        self.current
    }

    /// `Unloaded -> Loading`. Any other state is left untouched.
    pub fn begin_load(&mut self, loader: &mut (impl TimelineLoader + ?Sized)) {
        if self.state != TimelineState::Unloaded {
            return;
        }
        let handle = loader.load(&self.source);
        tracing::debug!(source = %self.source, ?handle, "timeline load started");
        self.handle = Some(handle);
        self.state = TimelineState::Loading;
    }

    /// `Loading -> Ready` when `handle` is the one this scrubber is waiting for.
    ///
    /// Returns whether the transition happened. Notifications for other handles, duplicate
    /// notifications, notifications after a failure and after destruction are ignored.
    pub fn mark_ready(&mut self, handle: TimelineHandle, total_frames: u64) -> bool {
        if self.state != TimelineState::Loading || self.handle != Some(handle) || self.failed {
            tracing::debug!(?handle, state = ?self.state, "ignoring timeline ready notification");
            return false;
        }
        tracing::debug!(?handle, total_frames, "timeline ready");
        self.state = TimelineState::Ready { total_frames };
        true
    }

    /// Record a failed load. The scrubber stays in [`TimelineState::Loading`] for good and
    /// never seeks, even if the same handle later reports ready.
    pub fn mark_failed(&mut self, handle: TimelineHandle, reason: &str) {
        if self.state == TimelineState::Loading && self.handle == Some(handle) && !self.failed {
            tracing::warn!(source = %self.source, ?handle, reason, "timeline failed to load");
            self.failed = true;
        }
    }

    /// Pause the timeline at the frame matching `progress`.
    ///
    /// Only acts in [`TimelineState::Ready`]; otherwise returns `None` without side effects. A
    /// seek to the frame already shown is not re-issued but still reports the target.
    pub fn seek(
        &mut self,
        progress: Progress,
        loader: &mut (impl TimelineLoader + ?Sized),
    ) -> Option<FrameIndex> {
        let TimelineState::Ready { total_frames } = self.state else {
            return None;
        };
        let handle = self.handle?;
        let frame = target_frame(progress, total_frames);
        if self.current != Some(frame) {
            loader.seek_to(handle, frame);
            self.current = Some(frame);
        }
        Some(frame)
    }

    /// `Loading | Ready -> Destroyed`, releasing the handle. Runs the loader's `destroy` at most
    /// once over the scrubber's lifetime.
    pub fn destroy(&mut self, loader: &mut (impl TimelineLoader + ?Sized)) {
        match self.state {
            TimelineState::Destroyed => {}
            TimelineState::Unloaded => self.state = TimelineState::Destroyed,
            TimelineState::Loading | TimelineState::Ready { .. } => {
                if let Some(handle) = self.handle {
                    loader.destroy(handle);
                    tracing::debug!(?handle, "timeline destroyed");
                }
                self.state = TimelineState::Destroyed;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/timeline.rs"]
mod tests;
