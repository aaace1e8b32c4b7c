use crate::foundation::core::{ElementId, ElementTransform, FrameIndex, Rect, Vec2};
use crate::foundation::error::MotionResult;
use crate::host::platform::{FrameRequestId, Host, ListenerId, TimelineHandle};
use crate::motion::parallax::{ParallaxTransformer, Smoother};
use crate::motion::preference::ReducedMotionGate;
use crate::motion::progress::{Progress, RegionGeometry, ScrollProgressTracker};
use crate::motion::scheduler::FrameScheduler;
use crate::motion::timeline::{TimelineScrubber, TimelineState};
use crate::section::config::{ProgressBinding, SectionConfig};

/// Result of the one-shot visibility check made at activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryState {
    /// The region was not in view; entry styling stays at its initial state.
    Hidden,
    /// The region was in view; entry styling may play.
    Revealed,
}

/// One transform written during a frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TransformWrite {
    /// Target element.
    pub element: ElementId,
    /// Written transform.
    pub transform: ElementTransform,
}

/// What a single scheduled frame computed and wrote.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct FrameReport {
    /// Section progress; `None` when the region geometry was unavailable.
    pub progress: Option<Progress>,
    /// Frame the timeline was paused at, when it is ready.
    pub timeline_frame: Option<FrameIndex>,
    /// Transforms written this frame, bindings first, then parallax targets.
    pub writes: Vec<TransformWrite>,
    /// Parallax targets skipped because they were outside the viewport.
    pub skipped_offscreen: usize,
    /// Targets (or the region) skipped because the host had no geometry for them.
    pub missing_geometry: usize,
    /// Whether another frame was requested to keep smoothing.
    pub rescheduled: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Active,
    Deactivated,
}

#[derive(Debug)]
struct ParallaxSlot {
    element: ElementId,
    speed: f64,
    smoother: Smoother,
    last: Option<ElementTransform>,
}

#[derive(Debug)]
struct BindingSlot {
    binding: ProgressBinding,
    last: Option<ElementTransform>,
}

impl BindingSlot {
    fn transform_at(&self, progress: Progress) -> ElementTransform {
        let p = progress.get();
        let y = self.binding.translate_y.map_or(0.0, |m| m.sample(p));
        let opacity = self
            .binding
            .opacity
            .map_or(1.0, |m| m.sample(p).clamp(0.0, 1.0));
        ElementTransform {
            translate: Vec2::new(0.0, y),
            opacity,
        }
    }
}

/// A live scroll-driven section: owns every registration made for it and releases them on
/// [`Section::deactivate`] or drop, whichever comes first.
///
/// The host delivers events by calling [`Section::on_scroll`], [`Section::on_frame`],
/// [`Section::on_timeline_ready`] and [`Section::on_timeline_failed`] from its UI loop.
pub struct Section<H: Host> {
    host: H,
    config: SectionConfig,
    gate: ReducedMotionGate,
    entry: EntryState,
    phase: Phase,
    listener: Option<ListenerId>,
    scheduler: FrameScheduler,
    tracker: ScrollProgressTracker,
    parallax: Vec<ParallaxSlot>,
    bindings: Vec<BindingSlot>,
    scrubber: Option<TimelineScrubber>,
}

impl<H: Host> Section<H> {
    /// Validate `config`, acquire host resources and request the initial frame.
    ///
    /// On error every resource acquired so far is released before returning.
    #[tracing::instrument(skip(host, config), fields(region = %config.region))]
    pub fn activate(host: H, config: SectionConfig) -> MotionResult<Self> {
        let gate = ReducedMotionGate::capture(&host);
        config.validate()?;

        let entry = if host.is_in_view(&config.region, &config.entry) {
            EntryState::Revealed
        } else {
            EntryState::Hidden
        };

        let parallax = config
            .parallax
            .iter()
            .map(|t| ParallaxSlot {
                element: t.element.clone(),
                speed: t.speed,
                smoother: Smoother::new(t.damping),
                last: None,
            })
            .collect();
        let bindings = config
            .bindings
            .iter()
            .map(|b| BindingSlot {
                binding: b.clone(),
                last: None,
            })
            .collect();
        let scrubber = config
            .timeline
            .as_ref()
            .map(|t| TimelineScrubber::new(t.source.clone()));

        let mut section = Self {
            host,
            tracker: ScrollProgressTracker::new(config.offsets),
            config,
            gate,
            entry,
            phase: Phase::Active,
            listener: None,
            scheduler: FrameScheduler::new(),
            parallax,
            bindings,
            scrubber,
        };

        if let Some(scrubber) = section.scrubber.as_mut() {
            scrubber.begin_load(&mut section.host);
        }

        if gate.is_motion_suppressed() {
            tracing::debug!("reduced motion requested; section stays at rest");
            return Ok(section);
        }

        // Dropping `section` on failure releases the timeline loaded above.
        let listener = section
            .host
            .add_scroll_listener(&section.config.container)?;
        section.listener = Some(listener);
        section.scheduler.schedule(&mut section.host);

        tracing::debug!(?listener, ?entry, "section activated");
        Ok(section)
    }

    /// Scroll notification. Coalesced into the next display frame.
    ///
    /// Returns whether a new frame was requested.
    pub fn on_scroll(&mut self) -> bool {
        if !self.computes_motion() {
            return false;
        }
        self.scheduler.schedule(&mut self.host)
    }

    /// Display-refresh callback for request `id`.
    ///
    /// Reads all geometry first, then computes progress once and fans it out to bindings, the
    /// timeline and parallax targets. Returns `None` for stale ids, after deactivation and when
    /// motion is suppressed.
    pub fn on_frame(&mut self, id: FrameRequestId) -> Option<FrameReport> {
        if !self.computes_motion() || !self.scheduler.fire(id) {
            return None;
        }

        let viewport_height = self.host.viewport_height();
        let region = self.host.bounding_rect(&self.config.region);
        let binding_rects: Vec<Option<Rect>> = self
            .bindings
            .iter()
            .map(|b| self.host.bounding_rect(&b.binding.element))
            .collect();
        let parallax_rects: Vec<Option<Rect>> = self
            .parallax
            .iter()
            .map(|p| self.host.bounding_rect(&p.element))
            .collect();

        let mut report = FrameReport::default();

        match region {
            Some(rect) => {
                let progress = self
                    .tracker
                    .update(RegionGeometry::from_rect(rect), viewport_height);
                report.progress = Some(progress);

                for (slot, rect) in self.bindings.iter_mut().zip(&binding_rects) {
                    // Bound elements follow progress on or off screen; only detached ones are skipped.
                    if rect.is_none() {
                        tracing::warn!(element = %slot.binding.element, "no geometry for bound element");
                        report.missing_geometry += 1;
                        continue;
                    }
                    let t = slot.transform_at(progress);
                    if slot.last != Some(t) {
                        self.host.write_transform(&slot.binding.element, t);
                        slot.last = Some(t);
                        report.writes.push(TransformWrite {
                            element: slot.binding.element.clone(),
                            transform: t,
                        });
                    }
                }

                if let Some(scrubber) = self.scrubber.as_mut() {
                    report.timeline_frame = scrubber.seek(progress, &mut self.host);
                }
            }
            None => {
                tracing::warn!(region = %self.config.region, "no geometry for scroll region");
                report.missing_geometry += 1;
            }
        }

        let mut settling = false;
        for (slot, rect) in self.parallax.iter_mut().zip(&parallax_rects) {
            let Some(rect) = *rect else {
                tracing::warn!(element = %slot.element, "no geometry for parallax element");
                report.missing_geometry += 1;
                continue;
            };
            if !ParallaxTransformer::is_in_view(rect, viewport_height) {
                report.skipped_offscreen += 1;
                continue;
            }
            let offset = ParallaxTransformer::compute_offset(rect, slot.speed);
            let t = ElementTransform::translate_y(slot.smoother.step(offset));
            settling |= slot.smoother.is_settling();
            if slot.last != Some(t) {
                self.host.write_transform(&slot.element, t);
                slot.last = Some(t);
                report.writes.push(TransformWrite {
                    element: slot.element.clone(),
                    transform: t,
                });
            }
        }

        if settling {
            report.rescheduled = self.scheduler.schedule(&mut self.host);
        }

        tracing::trace!(
            progress = report.progress.map(Progress::get),
            frame = report.timeline_frame.map(|f| f.0),
            writes = report.writes.len(),
            "section frame"
        );
        Some(report)
    }

    /// The timeline behind `handle` finished loading.
    ///
    /// Ignored after deactivation. When motion is allowed a frame is requested so the timeline
    /// catches up with the current scroll position.
    pub fn on_timeline_ready(&mut self, handle: TimelineHandle, total_frames: u64) {
        if self.phase != Phase::Active {
            tracing::debug!(?handle, "discarding timeline completion after deactivation");
            return;
        }
        let Some(scrubber) = self.scrubber.as_mut() else {
            return;
        };
        if scrubber.mark_ready(handle, total_frames) && !self.gate.is_motion_suppressed() {
            self.scheduler.schedule(&mut self.host);
        }
    }

    /// The timeline behind `handle` failed to load. The section keeps showing its first frame.
    pub fn on_timeline_failed(&mut self, handle: TimelineHandle, reason: &str) {
        if self.phase != Phase::Active {
            return;
        }
        if let Some(scrubber) = self.scrubber.as_mut() {
            scrubber.mark_failed(handle, reason);
        }
    }

    /// Release everything acquired in [`Section::activate`]. Idempotent.
    ///
    /// Removes the scroll listener, cancels the pending frame, resets every written transform
    /// to identity and destroys the timeline.
    pub fn deactivate(&mut self) {
        if self.phase == Phase::Deactivated {
            return;
        }
        self.phase = Phase::Deactivated;

        if let Some(id) = self.listener.take() {
            self.host.remove_scroll_listener(id);
        }
        self.scheduler.cancel(&mut self.host);

        let mut reset = 0usize;
        for slot in &mut self.parallax {
            slot.smoother.reset();
            if slot.last.take().is_some() {
                self.host
                    .write_transform(&slot.element, ElementTransform::IDENTITY);
                reset += 1;
            }
        }
        for slot in &mut self.bindings {
            if slot.last.take().is_some() {
                self.host
                    .write_transform(&slot.binding.element, ElementTransform::IDENTITY);
                reset += 1;
            }
        }

        if let Some(scrubber) = self.scrubber.as_mut() {
            scrubber.destroy(&mut self.host);
        }

        tracing::debug!(region = %self.config.region, reset, "section deactivated");
    }

    /// Whether [`Section::deactivate`] has not run yet.
    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    /// Whether the reduced-motion preference captured at activation suppresses motion.
    pub fn is_motion_suppressed(&self) -> bool {
        self.gate.is_motion_suppressed()
    }

    /// Entry visibility captured at activation.
    pub fn entry_state(&self) -> EntryState {
        self.entry
    }

    /// Progress computed by the latest frame.
    pub fn progress(&self) -> Option<Progress> {
        self.tracker.last()
    }

    /// Timeline lifecycle state, when the section has a timeline.
    pub fn timeline_state(&self) -> Option<TimelineState> {
        self.scrubber.as_ref().map(TimelineScrubber::state)
    }

    /// Handle of the section's timeline, once loading started.
    pub fn timeline_handle(&self) -> Option<TimelineHandle> {
        self.scrubber.as_ref().and_then(TimelineScrubber::handle)
    }

    /// Whether a display frame is pending.
    pub fn has_pending_frame(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Configuration the section was activated with.
    pub fn config(&self) -> &SectionConfig {
        &self.config
    }

    /// Borrow the host.
    pub fn host(&self) -> &H {
        &self.host
    }

    fn computes_motion(&self) -> bool {
        self.phase == Phase::Active && !self.gate.is_motion_suppressed()
    }
}

impl<H: Host> Drop for Section<H> {
    fn drop(&mut self) {
        self.deactivate();
    }
}

impl<H: Host> std::fmt::Debug for Section<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Section")
            .field("region", &self.config.region)
            .field("phase", &self.phase)
            .field("motion_suppressed", &self.gate.is_motion_suppressed())
            .field("entry", &self.entry)
            .field("listener", &self.listener)
            .field("progress", &self.tracker.last())
            .field("timeline", &self.timeline_state())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/section/lifecycle.rs"]
mod tests;
