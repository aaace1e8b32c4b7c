use crate::host::platform::{FrameClock, FrameRequestId};

/// Coalesces scroll notifications into at most one callback per display refresh.
///
/// The scheduler owns at most one outstanding [`FrameRequestId`]. Requests made while one is
/// pending are dropped; the pending id is cleared as soon as it fires, before the callback runs,
/// so a callback that fails partway never blocks the next frame.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    pending: Option<FrameRequestId>,
    fired: u64,
}

impl FrameScheduler {
    /// An idle scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a frame unless one is already pending. Returns whether a request was issued.
    pub fn schedule(&mut self, clock: &mut (impl FrameClock + ?Sized)) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(clock.request_frame());
        true
    }

    /// Accept the refresh callback for `id`.
    ///
    /// Returns `true` exactly once per issued request; stale or cancelled ids are rejected.
    pub fn fire(&mut self, id: FrameRequestId) -> bool {
        if self.pending != Some(id) {
            return false;
        }
        self.pending = None;
        self.fired += 1;
        true
    }

    /// Cancel the outstanding request, if any.
    pub fn cancel(&mut self, clock: &mut (impl FrameClock + ?Sized)) {
        if let Some(id) = self.pending.take() {
            clock.cancel_frame(id);
        }
    }

    /// Whether a request is outstanding.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Number of callbacks accepted so far.
    pub fn fired_count(&self) -> u64 {
        self.fired
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/scheduler.rs"]
mod tests;
