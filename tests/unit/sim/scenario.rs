use super::*;
use crate::foundation::core::FrameIndex;
use crate::sim::host::SimTimelineStatus;

const PINNED_HERO: &str = r#"{
    "viewport_height": 800,
    "layout": {
        "hero": { "top": 1000, "height": 1000 },
        "copy": { "top": 1200, "height": 300 }
    },
    "section": {
        "region": "hero",
        "bindings": [
            { "element": "copy", "opacity": { "input": [0, 1], "output": [1, 0.4] } }
        ],
        "timeline": { "source": "hero.json" }
    },
    "events": [
        { "timeline_ready": { "total_frames": 120 } },
        "refresh",
        { "scroll_to": 1100 },
        { "scroll_to": 1105 },
        "refresh"
    ]
}"#;

#[test]
fn scenario_replays_events_and_reports_frames() {
    let scenario = Scenario::from_json(PINNED_HERO).unwrap();
    let report = run_scenario(&scenario).unwrap();

    assert!(!report.motion_suppressed);
    assert_eq!(report.frames.len(), 2, "initial frame plus one coalesced scroll frame");

    let last = report.frames.last().unwrap();
    assert_eq!(last.event, 4);
    assert_eq!(last.scroll_y, 1105.0);

    let timeline = report.timeline.unwrap();
    assert_eq!(timeline.status, SimTimelineStatus::Ready { total_frames: 120 });
    assert_eq!(report.listeners, 1);
    assert_eq!(
        last.report.timeline_frame,
        Some(timeline.shown_frame()),
        "the reported frame is the one shown"
    );
}

#[test]
fn scenario_at_region_midpoint_lands_on_frame_60() {
    let mut scenario = Scenario::from_json(PINNED_HERO).unwrap();
    scenario.events = vec![
        SimEvent::TimelineReady { total_frames: 120 },
        SimEvent::ScrollTo(1100.0),
        SimEvent::Refresh,
    ];
    let report = run_scenario(&scenario).unwrap();
    let frame = &report.frames[0].report;
    assert_eq!(frame.progress.map(|p| p.get()), Some(0.5));
    assert_eq!(frame.timeline_frame, Some(FrameIndex(60)));
}

#[test]
fn deactivate_event_releases_everything() {
    let mut scenario = Scenario::from_json(PINNED_HERO).unwrap();
    scenario.events.push(SimEvent::Deactivate);
    let report = run_scenario(&scenario).unwrap();
    assert_eq!(report.listeners, 0);
    assert!(report.transforms.values().all(|t| t.is_identity()));
    let timeline = report.timeline.unwrap();
    assert_eq!(timeline.status, SimTimelineStatus::Destroyed);
    assert_eq!(timeline.destroy_calls, 1);
}

#[test]
fn missing_scroll_container_fails_the_run() {
    let mut scenario = Scenario::from_json(PINNED_HERO).unwrap();
    scenario.section.container = ScrollContainer::Element(ElementId::from("absent"));
    let err = run_scenario(&scenario).unwrap_err();
    assert!(matches!(err, MotionError::Registration(_)));
}

#[test]
fn bad_viewport_is_rejected() {
    let mut scenario = Scenario::from_json(PINNED_HERO).unwrap();
    scenario.viewport_height = 0.0;
    assert!(matches!(
        run_scenario(&scenario).unwrap_err(),
        MotionError::Validation(_)
    ));
}
