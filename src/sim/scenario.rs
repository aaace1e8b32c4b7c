use crate::foundation::core::{ElementId, ElementTransform};
use crate::foundation::error::{MotionError, MotionResult};
use crate::host::platform::{ScrollContainer, TimelineHandle};
use crate::section::config::SectionConfig;
use crate::section::lifecycle::{EntryState, FrameReport, Section};
use crate::sim::host::{SimTimeline, SimulatedHost};
use std::collections::BTreeMap;

/// Vertical layout box in document coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayoutBox {
    /// Document offset of the top edge.
    pub top: f64,
    /// Box height.
    pub height: f64,
}

/// One scripted host event.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimEvent {
    /// Scroll the document to an offset and notify listeners.
    ScrollTo(f64),
    /// Fire one display refresh.
    Refresh,
    /// Fire refreshes until nothing is pending, at most this many.
    Settle(u32),
    /// Complete the section's timeline load.
    TimelineReady {
        /// Frame count reported by the loaded resource.
        total_frames: u64,
    },
    /// Fail the section's timeline load.
    TimelineFailed {
        /// Failure description.
        reason: String,
    },
    /// Deactivate the section.
    Deactivate,
}

/// A page, a section on it and a script of events.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scenario {
    /// Viewport height in pixels.
    pub viewport_height: f64,
    /// Platform reduced-motion answer; absent means unsupported.
    #[serde(default)]
    pub reduced_motion: Option<bool>,
    /// Element layout boxes.
    pub layout: BTreeMap<ElementId, LayoutBox>,
    /// The section under test.
    pub section: SectionConfig,
    /// Events applied in order after activation.
    pub events: Vec<SimEvent>,
}

/// One computed frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SimFrame {
    /// Index of the event that fired the refresh.
    pub event: usize,
    /// Document scroll offset at the time.
    pub scroll_y: f64,
    /// What the section computed.
    #[serde(flatten)]
    pub report: FrameReport,
}

/// Outcome of [`run_scenario`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SimReport {
    /// Entry visibility captured at activation.
    pub entry: EntryState,
    /// Whether motion was suppressed.
    pub motion_suppressed: bool,
    /// Frames computed during the script, including the activation frame.
    pub frames: Vec<SimFrame>,
    /// Transforms on the page after the script.
    pub transforms: BTreeMap<ElementId, ElementTransform>,
    /// The section's timeline after the script.
    pub timeline: Option<SimTimeline>,
    /// Scroll listeners still registered after the script.
    pub listeners: usize,
}

impl Scenario {
    /// Parse a JSON scenario.
    pub fn from_json(json: &str) -> MotionResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn build_host(&self) -> MotionResult<SimulatedHost> {
        if !(self.viewport_height.is_finite() && self.viewport_height > 0.0) {
            return Err(MotionError::validation("viewport height must be positive"));
        }
        let host = SimulatedHost::new(self.viewport_height);
        host.set_reduced_motion(self.reduced_motion);
        for (id, b) in &self.layout {
            host.place(id.clone(), b.top, b.height);
        }
        if let ScrollContainer::Element(el) = &self.section.container
            && self.layout.contains_key(el)
        {
            host.add_scroll_container(self.section.container.clone());
        }
        Ok(host)
    }
}

/// Activate the scenario's section on a fresh [`SimulatedHost`] and replay its events.
#[tracing::instrument(skip(scenario), fields(region = %scenario.section.region))]
pub fn run_scenario(scenario: &Scenario) -> MotionResult<SimReport> {
    let host = scenario.build_host()?;
    let mut section = Section::activate(host.clone(), scenario.section.clone())?;
    let mut frames = Vec::new();

    let mut refresh = |section: &mut Section<SimulatedHost>, event: usize| -> bool {
        let due = host.take_frame_requests();
        let fired = !due.is_empty();
        for id in due {
            if let Some(report) = section.on_frame(id) {
                frames.push(SimFrame {
                    event,
                    scroll_y: host.scroll_y(),
                    report,
                });
            }
        }
        fired
    };

    // Activation requests an initial frame; it lands on the first refresh like any other.
    for (i, event) in scenario.events.iter().enumerate() {
        match event {
            SimEvent::ScrollTo(y) => {
                host.set_scroll(*y);
                if host.listener_count() > 0 {
                    section.on_scroll();
                }
            }
            SimEvent::Refresh => {
                refresh(&mut section, i);
            }
            SimEvent::Settle(max) => {
                for _ in 0..*max {
                    if !refresh(&mut section, i) {
                        break;
                    }
                }
            }
            SimEvent::TimelineReady { total_frames } => {
                let handle = timeline_handle(&section)?;
                if let Err(err) = host.complete_load(handle, *total_frames) {
                    tracing::debug!(%err, "timeline completed after release");
                }
                section.on_timeline_ready(handle, *total_frames);
            }
            SimEvent::TimelineFailed { reason } => {
                let handle = timeline_handle(&section)?;
                if let Err(err) = host.fail_load(handle) {
                    tracing::debug!(%err, "timeline failed after release");
                }
                section.on_timeline_failed(handle, reason);
            }
            SimEvent::Deactivate => section.deactivate(),
        }
    }

    let report = SimReport {
        entry: section.entry_state(),
        motion_suppressed: section.is_motion_suppressed(),
        frames,
        transforms: host.transforms(),
        timeline: section.timeline_handle().and_then(|h| host.timeline(h)),
        listeners: host.listener_count(),
    };
    tracing::debug!(frames = report.frames.len(), "scenario finished");
    Ok(report)
}

fn timeline_handle(section: &Section<SimulatedHost>) -> MotionResult<TimelineHandle> {
    section
        .timeline_handle()
        .ok_or_else(|| MotionError::validation("scenario section has no loading timeline"))
}

#[cfg(test)]
#[path = "../../tests/unit/sim/scenario.rs"]
mod tests;
