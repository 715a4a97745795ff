// Copyright 2025 the Clipmask Authors
// SPDX-License-Identifier: Apache-2.0

//! Whole editing sessions driven through the pointer tool

use clipmask::editing::Modifiers;
use clipmask::tools::DragState;
use clipmask::{
    ClipPathTool, EditSession, EditorSettings, ElementFrame, MemoryStore, MouseDelegate,
    MouseEvent, SegmentType, SessionInput,
};
use kurbo::{Point, Rect};

fn open(frame: ElementFrame) -> (EditSession, MemoryStore) {
    let store = MemoryStore::new();
    let session = EditSession::open(
        SessionInput::new(frame),
        EditorSettings::default(),
        Box::new(store.clone()),
    );
    (session, store)
}

fn assert_close(a: Point, b: Point) {
    assert!(
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9,
        "expected {b:?}, got {a:?}"
    );
}

#[test]
fn default_seed_for_fresh_element() {
    let (session, _) = open(ElementFrame::new("box", 100.0, 100.0));
    let points = session.path().points();
    assert_eq!(points.len(), 4);
    let corners: Vec<_> = points.iter().map(|p| p.point).collect();
    assert_eq!(
        corners,
        [(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)].map(Point::from)
    );
    assert!(points.iter().all(|p| p.segment_type() == SegmentType::Line));
}

#[test]
fn drag_snaps_to_half_width_guide() {
    let (mut session, _) = open(ElementFrame::new("box", 200.0, 100.0));
    let mut tool = ClipPathTool::new();
    let id = session.path().points()[1].id;

    tool.left_down(MouseEvent::at(200.0, 0.0), &mut session);
    assert_eq!(tool.drag_state(), DragState::Point(id));

    let threshold = session.settings.snap_threshold;
    tool.mouse_moved(MouseEvent::at(100.0 + threshold - 1.0, 37.0), &mut session);
    assert_eq!(session.path().get(id).unwrap().point.x, 100.0);
    assert_eq!(session.overlay().active_vertical, Some(100.0));

    tool.mouse_moved(MouseEvent::at(100.0 + threshold + 1.0, 37.0), &mut session);
    assert_eq!(session.path().get(id).unwrap().point.x, 100.0 + threshold + 1.0);
    assert_eq!(session.overlay().active_vertical, None);

    tool.mouse_moved(MouseEvent::at(100.0, 50.0), &mut session);
    tool.left_up(MouseEvent::at(100.0, 50.0), &mut session);
    let overlay = session.overlay();
    assert_eq!(overlay.active_vertical, None);
    assert_eq!(overlay.active_horizontal, None);
    assert!(!tool.is_capturing());
}

#[test]
fn rotated_element_maps_top_left_click_to_bottom_left() {
    let frame = ElementFrame::new("box", 200.0, 100.0).with_rotation(90.0);
    let (mut session, _) = open(frame);
    // A 200x100 box turned a quarter stands 100 wide and 200 tall on screen
    session.set_screen_bounds(Rect::new(10.0, 10.0, 110.0, 210.0));

    assert_close(session.screen_to_local(Point::new(10.0, 10.0)), Point::new(0.0, 100.0));

    let mut tool = ClipPathTool::new();
    let bottom_left = session.path().points()[3].id;
    tool.left_down(MouseEvent::at(11.0, 11.0), &mut session);
    assert_eq!(tool.drag_state(), DragState::Point(bottom_left));
}

#[test]
fn scaled_display_is_compensated() {
    let (mut session, _) = open(ElementFrame::new("box", 200.0, 100.0));
    session.set_screen_bounds(Rect::new(0.0, 0.0, 400.0, 200.0));
    assert_close(session.screen_to_local(Point::new(300.0, 50.0)), Point::new(150.0, 25.0));
}

#[test]
fn click_on_segment_toggles_its_owner_only() {
    let (mut session, store) = open(ElementFrame::new("box", 200.0, 100.0));
    let mut tool = ClipPathTool::new();
    let before = session.path().clone();

    // Right edge runs from point 1 into point 2
    tool.left_down(MouseEvent::at(197.0, 12.0), &mut session);
    tool.left_up(MouseEvent::at(197.0, 12.0), &mut session);

    let after = session.path();
    assert_eq!(after.points()[2].segment_type(), SegmentType::Cubic);
    for i in [0, 1, 3] {
        assert_eq!(after.points()[i], before.points()[i]);
    }
    assert_eq!(store.live_css("box").unwrap().matches('%').count(), 2 * (6 + 3));

    tool.left_down(MouseEvent::at(197.0, 12.0), &mut session);
    assert_eq!(session.path().points()[2].segment_type(), SegmentType::Line);
    assert_eq!(session.path(), &before);
}

#[test]
fn double_click_insert_and_floor() {
    let (mut session, _) = open(ElementFrame::new("box", 200.0, 100.0));
    let mut tool = ClipPathTool::new();

    // Insert on the bottom edge
    tool.double_click(MouseEvent::at(120.0, 103.0), &mut session);
    assert_eq!(session.path().len(), 5);
    let inserted = session.selection.get().unwrap();
    assert_eq!(session.path().get(inserted).unwrap().point, Point::new(120.0, 100.0));

    // Delete down to the floor and one more
    for corner in [(0.0, 0.0), (200.0, 0.0), (120.0, 100.0)] {
        tool.double_click(MouseEvent::new(Point::from(corner)), &mut session);
    }
    assert_eq!(session.path().len(), 3);
    tool.double_click(MouseEvent::at(200.0, 100.0), &mut session);
    assert_eq!(session.path().len(), 3);
}

#[test]
fn double_click_on_closing_segment_appends() {
    let (mut session, _) = open(ElementFrame::new("box", 200.0, 100.0));
    let mut tool = ClipPathTool::new();
    let first = session.path().points()[0];

    // The left edge runs from the last point back into point 0
    tool.double_click(MouseEvent::at(3.0, 40.0), &mut session);

    let points = session.path().points();
    assert_eq!(points.len(), 5);
    assert_eq!(points[0], first);
    assert_close(points[4].point, Point::new(0.0, 40.0));
    assert_eq!(points[4].segment_type(), SegmentType::Line);
    assert_eq!(session.selection.get(), Some(points[4].id));
}

#[test]
fn double_click_on_curve_inserts_on_the_curve() {
    let (mut session, _) = open(ElementFrame::new("box", 200.0, 100.0));
    let mut tool = ClipPathTool::new();
    let owner = session.path().points()[1].id;
    session.set_segment_type(owner, SegmentType::Cubic);

    // The top edge now bows down to y = 15 at its middle
    tool.double_click(MouseEvent::at(100.0, 18.0), &mut session);

    let points = session.path().points();
    assert_eq!(points.len(), 5);
    assert_close(points[1].point, Point::new(100.0, 15.0));
    assert_eq!(points[1].segment_type(), SegmentType::Line);
    assert_eq!(session.selection.get(), Some(points[1].id));
    assert_eq!(points[2].id, owner);
    assert_eq!(points[2].segment_type(), SegmentType::Cubic);
}

#[test]
fn modifiers_do_not_change_hit_behavior() {
    let (mut session, _) = open(ElementFrame::new("box", 200.0, 100.0));
    let mut tool = ClipPathTool::new();
    let mut event = MouseEvent::at(0.0, 100.0);
    event.mods = Modifiers {
        shift: true,
        ..Modifiers::default()
    };
    tool.left_down(event, &mut session);
    assert_eq!(
        tool.drag_state(),
        DragState::Point(session.path().points()[3].id)
    );
}

#[test]
fn close_and_reopen_keeps_curves_and_ids() {
    let frame = ElementFrame::new("box", 200.0, 100.0);
    let (mut session, store) = open(frame.clone());
    let ids: Vec<_> = session.path().points().iter().map(|p| p.id).collect();
    session.set_segment_type(ids[1], SegmentType::Quadratic);
    session.set_segment_type(ids[3], SegmentType::Cubic);
    session.move_point_to(ids[2], Point::new(170.0, 90.0));
    let edited = session.path().clone();

    let commit = session.close();
    assert_eq!(store.committed("box"), Some(commit.clone()));
    assert_eq!(store.live_css("box"), Some(commit.css.clone()));

    let reopened = EditSession::open(
        store.session_input(frame),
        EditorSettings::default(),
        Box::new(store.clone()),
    );
    let restored = reopened.path().points();
    assert_eq!(restored.len(), edited.len());
    for (got, want) in restored.iter().zip(edited.points()) {
        assert_eq!(got.id, want.id);
        assert_eq!(got.segment_type(), want.segment_type());
        assert_close(got.point, want.point);
        if let (Some(a), Some(b)) = (got.control_a(), want.control_a()) {
            assert_close(a, b);
        }
        if let (Some(a), Some(b)) = (got.control_b(), want.control_b()) {
            assert_close(a, b);
        }
    }
    assert_eq!(reopened.live_css(), commit.css);
}

#[test]
fn resize_mid_session_keeps_percentages() {
    let (mut session, store) = open(ElementFrame::new("box", 200.0, 100.0));
    let id = session.path().points()[1].id;
    session.move_point_to(id, Point::new(50.0, 0.0));
    let css = store.live_css("box");

    session.resize(300.0, 300.0);
    assert_eq!(session.path().get(id).unwrap().point, Point::new(75.0, 0.0));
    assert_eq!(store.live_css("box"), css);

    session.resize(0.0, 0.0);
    assert_eq!(session.path().get(id).unwrap().point, Point::new(75.0, 0.0));
    assert_eq!(store.live_css("box"), css);
}

#[test]
fn malformed_css_falls_back_to_rectangle() {
    let store = MemoryStore::new();
    let input = SessionInput::new(ElementFrame::new("box", 50.0, 50.0))
        .with_stored_css("polygon(10px 10px, 20px 20px, 30px 0px)");
    let session = EditSession::open(input, EditorSettings::default(), Box::new(store.clone()));
    assert_eq!(session.path().len(), 4);
    assert_eq!(
        store.live_css("box").as_deref(),
        Some("polygon(0% 0%, 100% 0%, 100% 100%, 0% 100%)")
    );
}
