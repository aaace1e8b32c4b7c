use super::*;

#[test]
fn bounding_rect_is_viewport_relative() {
    let host = SimulatedHost::new(800.0);
    host.place("hero", 1000.0, 1000.0);
    host.set_scroll(1400.0);
    let r = host.bounding_rect(&ElementId::from("hero")).unwrap();
    assert_eq!(r.y0, -400.0);
    assert_eq!(r.y1, 600.0);
    assert_eq!(host.bounding_rect(&ElementId::from("missing")), None);
}

#[test]
fn clones_share_one_page() {
    let a = SimulatedHost::new(600.0);
    let mut b = a.clone();
    b.write_transform(&ElementId::from("x"), ElementTransform::translate_y(3.0));
    assert_eq!(
        a.transform(&ElementId::from("x")),
        ElementTransform::translate_y(3.0)
    );
    assert_eq!(a.transform_log().len(), 1);
    assert_eq!(a.transform(&ElementId::from("y")), ElementTransform::IDENTITY);
}

#[test]
fn listener_registration_requires_a_container() {
    let mut host = SimulatedHost::new(800.0);
    let id = host.add_scroll_listener(&ScrollContainer::Window).unwrap();
    assert_eq!(host.listener_count(), 1);
    host.remove_scroll_listener(id);
    assert_eq!(host.listener_count(), 0);

    let panel = ScrollContainer::Element(ElementId::from("panel"));
    let err = host.add_scroll_listener(&panel).unwrap_err();
    assert!(matches!(err, MotionError::Registration(_)));
    host.add_scroll_container(panel.clone());
    assert!(host.add_scroll_listener(&panel).is_ok());
}

#[test]
fn frame_requests_drain_and_cancel() {
    let mut host = SimulatedHost::new(800.0);
    let a = host.request_frame();
    let b = host.request_frame();
    host.cancel_frame(a);
    host.cancel_frame(FrameRequestId(77));
    assert_eq!(host.cancelled_frames(), vec![a]);
    assert_eq!(host.take_frame_requests(), vec![b]);
    assert_eq!(host.pending_frame_count(), 0);
}

#[test]
fn timeline_load_lifecycle() {
    let mut host = SimulatedHost::new(800.0);
    let h = host.load("a.json");
    assert_eq!(host.timeline(h).unwrap().status, SimTimelineStatus::Loading);
    host.complete_load(h, 48).unwrap();
    assert!(host.complete_load(h, 48).is_err(), "already ready");
    host.seek_to(h, FrameIndex(12));
    assert_eq!(host.timeline(h).unwrap().shown_frame(), FrameIndex(12));
    host.destroy(h);
    let t = host.timeline(h).unwrap();
    assert_eq!(t.status, SimTimelineStatus::Destroyed);
    assert_eq!(t.destroy_calls, 1);
    assert!(host.fail_load(TimelineHandle(99)).is_err());
}

#[test]
fn in_view_honours_margin() {
    let host = SimulatedHost::new(1000.0);
    host.place("band", 950.0, 200.0);
    let strict = InViewOptions {
        once: true,
        margin: -0.1,
    };
    let loose = InViewOptions {
        once: true,
        margin: 0.0,
    };
    let band = ElementId::from("band");
    assert!(host.is_in_view(&band, &loose));
    assert!(!host.is_in_view(&band, &strict));
    host.set_scroll(100.0);
    assert!(host.is_in_view(&band, &strict));
}
