use super::*;
use crate::animation::range_map::RangeMap;
use crate::host::platform::ScrollContainer;
use crate::section::config::{ParallaxTargetConfig, TimelineConfig};
use crate::sim::host::{SimTimelineStatus, SimulatedHost};

fn hero_page() -> SimulatedHost {
    let host = SimulatedHost::new(800.0);
    host.place("hero", 1000.0, 1000.0);
    host.place("art", 1100.0, 400.0);
    host.place("copy", 1200.0, 300.0);
    host
}

fn hero_config() -> SectionConfig {
    let mut config = SectionConfig::new("hero");
    config.parallax.push(ParallaxTargetConfig::new("art", 0.2));
    config.bindings.push(ProgressBinding {
        element: ElementId::from("copy"),
        translate_y: Some(RangeMap::unit(0.0, -40.0)),
        opacity: None,
    });
    config.timeline = Some(TimelineConfig {
        source: "hero.json".into(),
    });
    config
}

fn fire_all(host: &SimulatedHost, section: &mut Section<SimulatedHost>) -> Vec<FrameReport> {
    host.take_frame_requests()
        .into_iter()
        .filter_map(|id| section.on_frame(id))
        .collect()
}

#[test]
fn activation_registers_once_and_requests_initial_frame() {
    let host = hero_page();
    let section = Section::activate(host.clone(), hero_config()).unwrap();
    assert!(section.is_active());
    assert!(!section.is_motion_suppressed());
    assert_eq!(host.listener_count(), 1);
    assert_eq!(host.pending_frame_count(), 1);
    assert_eq!(section.timeline_state(), Some(TimelineState::Loading));
    assert_eq!(section.entry_state(), EntryState::Hidden);
}

#[test]
fn invalid_config_acquires_nothing() {
    let host = hero_page();
    let mut config = hero_config();
    config.parallax.push(ParallaxTargetConfig::new("copy", 0.1));
    assert!(Section::activate(host.clone(), config).is_err());
    assert_eq!(host.listener_count(), 0);
    assert!(host.timeline_handles().is_empty());
}

#[test]
fn failed_registration_releases_the_timeline() {
    let host = hero_page();
    let mut config = hero_config();
    config.container = ScrollContainer::Element(ElementId::from("panel"));
    let err = Section::activate(host.clone(), config).unwrap_err();
    assert!(matches!(err, crate::MotionError::Registration(_)));
    assert_eq!(host.listener_count(), 0);
    let handles = host.timeline_handles();
    assert_eq!(handles.len(), 1);
    let timeline = host.timeline(handles[0]).unwrap();
    assert_eq!(timeline.status, SimTimelineStatus::Destroyed);
    assert_eq!(timeline.destroy_calls, 1);
}

#[test]
fn reduced_motion_keeps_everything_at_rest() {
    let host = hero_page();
    host.set_reduced_motion(Some(true));
    let mut section = Section::activate(host.clone(), hero_config()).unwrap();
    assert!(section.is_motion_suppressed());
    assert_eq!(host.listener_count(), 0);
    assert_eq!(host.pending_frame_count(), 0);
    assert_eq!(section.timeline_state(), Some(TimelineState::Loading));

    host.set_scroll(1100.0);
    assert!(!section.on_scroll());
    let handle = section.timeline_handle().unwrap();
    host.complete_load(handle, 120).unwrap();
    section.on_timeline_ready(handle, 120);
    assert_eq!(host.pending_frame_count(), 0);
    assert_eq!(section.on_frame(FrameRequestId(1)), None);

    assert!(host.transform_log().is_empty());
    assert!(host.timeline(handle).unwrap().seeks.is_empty());
}

#[test]
fn scroll_bursts_coalesce_into_one_frame() {
    let host = hero_page();
    let mut section = Section::activate(host.clone(), hero_config()).unwrap();
    fire_all(&host, &mut section);

    host.set_scroll(1100.0);
    assert!(section.on_scroll());
    host.set_scroll(1120.0);
    assert!(!section.on_scroll());
    assert!(!section.on_scroll());
    let reports = fire_all(&host, &mut section);
    assert_eq!(reports.len(), 1);
    assert!(!section.has_pending_frame());
}

#[test]
fn frame_fans_progress_out_to_bindings_and_parallax() {
    let host = hero_page();
    let mut section = Section::activate(host.clone(), hero_config()).unwrap();
    host.set_scroll(1100.0);
    let report = fire_all(&host, &mut section).pop().unwrap();

    assert_eq!(report.progress, Some(Progress::new(0.5)));
    assert_eq!(report.timeline_frame, None, "timeline still loading");
    assert_eq!(
        host.transform(&ElementId::from("copy")),
        ElementTransform::translate_y(-20.0)
    );
    // art sits at viewport y = 0 after scrolling 1100
    assert_eq!(
        host.transform(&ElementId::from("art")),
        ElementTransform::translate_y(0.0)
    );
    assert_eq!(report.writes.len(), 2);
    assert_eq!(report.writes[0].element, ElementId::from("copy"));
}

#[test]
fn unchanged_frames_write_nothing() {
    let host = hero_page();
    let mut section = Section::activate(host.clone(), hero_config()).unwrap();
    host.set_scroll(1100.0);
    fire_all(&host, &mut section);
    let writes = host.transform_log().len();

    section.on_scroll();
    let report = fire_all(&host, &mut section).pop().unwrap();
    assert!(report.writes.is_empty());
    assert_eq!(host.transform_log().len(), writes);
}

#[test]
fn timeline_ready_schedules_catch_up_frame() {
    let host = hero_page();
    let mut section = Section::activate(host.clone(), hero_config()).unwrap();
    host.set_scroll(1100.0);
    fire_all(&host, &mut section);

    let handle = section.timeline_handle().unwrap();
    host.complete_load(handle, 120).unwrap();
    section.on_timeline_ready(handle, 120);
    assert_eq!(host.pending_frame_count(), 1);

    let report = fire_all(&host, &mut section).pop().unwrap();
    assert_eq!(report.timeline_frame, Some(FrameIndex(60)));
    assert_eq!(host.timeline(handle).unwrap().seeks, vec![FrameIndex(60)]);
}

#[test]
fn ready_after_failed_load_never_seeks() {
    let host = hero_page();
    let mut section = Section::activate(host.clone(), hero_config()).unwrap();
    let handle = section.timeline_handle().unwrap();
    section.on_timeline_failed(handle, "404");
    fire_all(&host, &mut section);

    section.on_timeline_ready(handle, 120);
    assert_eq!(section.timeline_state(), Some(TimelineState::Loading));
    assert_eq!(host.pending_frame_count(), 0, "no catch-up frame");

    host.set_scroll(1100.0);
    section.on_scroll();
    let report = fire_all(&host, &mut section).pop().unwrap();
    assert_eq!(report.timeline_frame, None);
    assert!(host.timeline(handle).unwrap().seeks.is_empty());
}

#[test]
fn stale_frame_ids_are_ignored() {
    let host = hero_page();
    let mut section = Section::activate(host.clone(), hero_config()).unwrap();
    let due = host.take_frame_requests();
    assert_eq!(section.on_frame(FrameRequestId(999)), None);
    assert!(section.on_frame(due[0]).is_some());
    assert_eq!(section.on_frame(due[0]), None, "fires once");
}

#[test]
fn bindings_follow_progress_off_screen() {
    let host = hero_page();
    let mut section = Section::activate(host.clone(), hero_config()).unwrap();
    host.set_scroll(1100.0);
    fire_all(&host, &mut section);

    host.set_scroll(2600.0);
    section.on_scroll();
    let report = fire_all(&host, &mut section).pop().unwrap();
    assert_eq!(report.progress, Some(Progress::END));
    assert_eq!(
        host.transform(&ElementId::from("copy")),
        ElementTransform::translate_y(-40.0)
    );
    assert_eq!(report.skipped_offscreen, 1, "only the parallax art is skipped");
}

#[test]
fn missing_targets_are_isolated() {
    let host = hero_page();
    let mut section = Section::activate(host.clone(), hero_config()).unwrap();
    host.remove(&ElementId::from("copy"));
    host.set_scroll(1100.0);
    let report = fire_all(&host, &mut section).pop().unwrap();
    assert_eq!(report.missing_geometry, 1);
    assert_eq!(report.writes.len(), 1);
    assert_eq!(report.writes[0].element, ElementId::from("art"));
}

#[test]
fn missing_region_still_drives_parallax() {
    let host = hero_page();
    let mut section = Section::activate(host.clone(), hero_config()).unwrap();
    host.remove(&ElementId::from("hero"));
    host.set_scroll(1000.0);
    let report = fire_all(&host, &mut section).pop().unwrap();
    assert_eq!(report.progress, None);
    assert_eq!(report.missing_geometry, 1);
    assert_eq!(
        host.transform(&ElementId::from("art")),
        ElementTransform::translate_y(-20.0)
    );
}

#[test]
fn damped_parallax_keeps_requesting_frames_until_settled() {
    let host = hero_page();
    let mut config = SectionConfig::new("hero");
    let mut art = ParallaxTargetConfig::new("art", 0.5);
    art.damping = 0.5;
    config.parallax.push(art);
    let mut section = Section::activate(host.clone(), config).unwrap();
    host.set_scroll(900.0);
    fire_all(&host, &mut section);

    host.set_scroll(1100.0);
    section.on_scroll();
    let first = fire_all(&host, &mut section).pop().unwrap();
    assert!(first.rescheduled);

    let mut frames = 0;
    while host.pending_frame_count() > 0 {
        fire_all(&host, &mut section);
        frames += 1;
        assert!(frames < 64, "smoothing never settled");
    }
    assert_eq!(
        host.transform(&ElementId::from("art")),
        ElementTransform::translate_y(0.0)
    );
}

#[test]
fn deactivate_releases_and_is_idempotent() {
    let host = hero_page();
    let mut section = Section::activate(host.clone(), hero_config()).unwrap();
    host.set_scroll(1100.0);
    fire_all(&host, &mut section);
    section.on_scroll();
    let handle = section.timeline_handle().unwrap();

    section.deactivate();
    section.deactivate();
    assert!(!section.is_active());
    assert_eq!(host.listener_count(), 0);
    assert_eq!(host.pending_frame_count(), 0);
    assert_eq!(host.cancelled_frames().len(), 1);
    assert!(host.transforms().values().all(|t| t.is_identity()));
    assert_eq!(host.timeline(handle).unwrap().destroy_calls, 1);

    assert!(!section.on_scroll());
    host.complete_load(handle, 120).unwrap_err();
    section.on_timeline_ready(handle, 120);
    assert_eq!(section.timeline_state(), Some(TimelineState::Destroyed));
    assert_eq!(host.pending_frame_count(), 0);
}

#[test]
fn drop_releases_resources() {
    let host = hero_page();
    let handle = {
        let mut section = Section::activate(host.clone(), hero_config()).unwrap();
        host.set_scroll(1100.0);
        fire_all(&host, &mut section);
        section.timeline_handle().unwrap()
    };
    assert_eq!(host.listener_count(), 0);
    assert!(host.transforms().values().all(|t| t.is_identity()));
    assert_eq!(host.timeline(handle).unwrap().destroy_calls, 1);
}

#[test]
fn entry_is_revealed_when_region_starts_in_view() {
    let host = hero_page();
    host.set_scroll(900.0);
    let section = Section::activate(host, hero_config()).unwrap();
    assert_eq!(section.entry_state(), EntryState::Revealed);
}
