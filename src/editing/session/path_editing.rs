// Copyright 2025 the Clipmask Authors
// SPDX-License-Identifier: Apache-2.0

//! Path editing methods for EditSession: dragging, segment types,
//! insertion, deletion, nudging and element resize

use super::EditSession;
use crate::editing::snap::SnapGuides;
use crate::model::EntityId;
use crate::path::{HandleRole, PathPoint, SegmentInfo, SegmentType};
use kurbo::{Point, Size, Vec2};

impl EditSession {
    /// Move an anchor to a local position, snapping it to the guidelines.
    ///
    /// The point's own control handles travel with it so the shape of its
    /// incoming curve is kept.
    pub fn move_point_to(&mut self, id: EntityId, local: Point) {
        let target = if self.settings.snap_enabled {
            self.guides.snap(local, self.settings.snap_threshold)
        } else {
            self.guides.clear_active();
            local
        };

        let Some(point) = self.path.get_mut(id) else {
            return;
        };
        let delta = target - point.point;
        point.translate(delta);
        self.notify_changed();
    }

    /// Move one control handle to a local position. Handles never snap.
    pub fn move_handle_to(&mut self, id: EntityId, role: HandleRole, local: Point) {
        let moved = self
            .path
            .get_mut(id)
            .is_some_and(|point| point.set_position(role, local));
        if moved {
            self.notify_changed();
        }
    }

    /// Change the type of the segment owned by `id`
    pub fn set_segment_type(&mut self, id: EntityId, typ: SegmentType) -> bool {
        if !self.path.set_segment_type(id, typ, self.settings.handle_offset) {
            return false;
        }
        tracing::debug!("Segment into {} is now {:?}", id, typ);
        self.notify_changed();
        true
    }

    /// Flip a segment between straight and the configured curve kind
    pub fn toggle_segment(&mut self, owner: EntityId) -> bool {
        let Some(current) = self.path.get(owner).map(PathPoint::segment_type) else {
            return false;
        };
        let next = if current.is_curve() {
            SegmentType::Line
        } else {
            self.settings.toggle_curve
        };
        self.set_segment_type(owner, next)
    }

    /// Change the segment type of the selected point
    pub fn set_selected_segment_type(&mut self, typ: SegmentType) -> bool {
        match self.selection.get() {
            Some(id) => self.set_segment_type(id, typ),
            None => false,
        }
    }

    /// Insert a straight point at `at` on a segment and select it
    pub fn insert_point_on_segment(&mut self, info: &SegmentInfo, at: Point) -> EntityId {
        let point = PathPoint::line(at);
        self.path.insert_point(info.start_index, point);
        self.selection.select(point.id);
        tracing::debug!(
            "Inserted {} between points {} and {}",
            point.id,
            info.start_index,
            info.end_index
        );
        self.notify_changed();
        point.id
    }

    /// Delete a point unless the path is down to three
    pub fn delete_point(&mut self, id: EntityId) -> bool {
        if !self.path.remove_point(id) {
            return false;
        }
        self.selection.remove(&id);
        self.notify_changed();
        true
    }

    /// Delete the selected point, if any
    pub fn delete_selected(&mut self) -> bool {
        match self.selection.get() {
            Some(id) => self.delete_point(id),
            None => false,
        }
    }

    /// Nudge the selected point with the arrow keys
    ///
    /// `dx` and `dy` are directions; the step comes from the settings.
    pub fn nudge_selected(&mut self, dx: f64, dy: f64, shift: bool) {
        let Some(id) = self.selection.get() else {
            return;
        };
        let amount = if shift {
            self.settings.nudge_shift
        } else {
            self.settings.nudge_base
        };
        let Some(point) = self.path.get_mut(id) else {
            return;
        };
        point.translate(Vec2::new(dx * amount, dy * amount));
        self.notify_changed();
    }

    /// The element changed size while the session is open.
    ///
    /// Points and handles are remapped proportionally. An axis reporting a
    /// zero or non-finite size is left as it was; an axis that was zero until
    /// now still holds percentages and is expanded to the new size.
    pub fn resize(&mut self, width: f64, height: f64) {
        let old = self.size();
        let new = Size::new(width, height);
        self.path = self.path.rescaled(old, new);

        if width.is_finite() && width > 0.0 {
            self.frame.width = width;
        }
        if height.is_finite() && height > 0.0 {
            self.frame.height = height;
        }
        self.guides = SnapGuides::new(self.size());
        tracing::debug!(
            "Resized {} to {}x{}",
            self.frame.element_id,
            self.frame.width,
            self.frame.height
        );
        self.notify_changed();
    }
}

#[cfg(test)]
mod tests {
    use crate::editing::session::EditSession;
    use crate::model::ElementFrame;
    use crate::path::{HandleRole, SegmentType};
    use crate::persistence::{MemoryStore, SessionInput};
    use crate::settings::EditorSettings;
    use kurbo::Point;

    fn open(width: f64, height: f64) -> (EditSession, MemoryStore) {
        let store = MemoryStore::new();
        let session = EditSession::open(
            SessionInput::new(ElementFrame::new("el", width, height)),
            EditorSettings::default(),
            Box::new(store.clone()),
        );
        (session, store)
    }

    #[test]
    fn move_point_snaps_within_threshold() {
        let (mut session, _) = open(200.0, 100.0);
        let id = session.path().points()[1].id;
        session.move_point_to(id, Point::new(103.0, 37.0));
        assert_eq!(session.path().get(id).unwrap().point, Point::new(100.0, 37.0));
        assert_eq!(session.guides.active_vertical(), Some(100.0));
        assert_eq!(session.guides.active_horizontal(), None);
    }

    #[test]
    fn move_point_outside_threshold_is_raw() {
        let (mut session, _) = open(200.0, 100.0);
        let id = session.path().points()[1].id;
        session.move_point_to(id, Point::new(106.0, 37.0));
        assert_eq!(session.path().get(id).unwrap().point, Point::new(106.0, 37.0));
        assert_eq!(session.guides.active_vertical(), None);
    }

    #[test]
    fn snapping_can_be_disabled() {
        let (mut session, _) = open(200.0, 100.0);
        session.settings.snap_enabled = false;
        let id = session.path().points()[1].id;
        session.move_point_to(id, Point::new(101.0, 49.0));
        assert_eq!(session.path().get(id).unwrap().point, Point::new(101.0, 49.0));
        assert_eq!(session.guides.active_vertical(), None);
    }

    #[test]
    fn moving_a_point_carries_its_handles() {
        let (mut session, _) = open(200.0, 100.0);
        let id = session.path().points()[2].id;
        session.set_segment_type(id, SegmentType::Cubic);
        let before = *session.path().get(id).unwrap();

        session.move_point_to(id, Point::new(180.0, 80.0));
        let after = session.path().get(id).unwrap();
        let delta = after.point - before.point;
        assert_eq!(after.control_a(), before.control_a().map(|p| p + delta));
        assert_eq!(after.control_b(), before.control_b().map(|p| p + delta));
    }

    #[test]
    fn handles_do_not_snap() {
        let (mut session, _) = open(200.0, 100.0);
        let id = session.path().points()[1].id;
        session.set_segment_type(id, SegmentType::Quadratic);
        session.move_handle_to(id, HandleRole::ControlA, Point::new(101.0, 51.0));
        assert_eq!(
            session.path().get(id).unwrap().control_a(),
            Some(Point::new(101.0, 51.0))
        );
        assert_eq!(session.guides.active_vertical(), None);
    }

    #[test]
    fn toggle_flips_line_and_curve() {
        let (mut session, _) = open(200.0, 100.0);
        let id = session.path().points()[3].id;
        assert!(session.toggle_segment(id));
        assert_eq!(session.path().get(id).unwrap().segment_type(), SegmentType::Cubic);
        assert!(session.toggle_segment(id));
        assert_eq!(session.path().get(id).unwrap().segment_type(), SegmentType::Line);
    }

    #[test]
    fn delete_selected_respects_floor() {
        let (mut session, _) = open(200.0, 100.0);
        let first = session.path().points()[0].id;
        session.selection.select(first);
        assert!(session.delete_selected());
        assert_eq!(session.path().len(), 3);
        assert!(session.selection.is_empty());

        let next = session.path().points()[0].id;
        session.selection.select(next);
        assert!(!session.delete_selected());
        assert_eq!(session.path().len(), 3);
    }

    #[test]
    fn nudge_uses_base_and_shift_steps() {
        let (mut session, _) = open(200.0, 100.0);
        let id = session.path().points()[0].id;
        session.selection.select(id);
        session.nudge_selected(1.0, 0.0, false);
        session.nudge_selected(0.0, 1.0, true);
        assert_eq!(session.path().get(id).unwrap().point, Point::new(1.0, 10.0));
    }

    #[test]
    fn every_edit_pushes_a_preview() {
        let (mut session, store) = open(200.0, 100.0);
        let opened = store.preview_count();
        let id = session.path().points()[1].id;
        session.move_point_to(id, Point::new(150.0, 0.0));
        assert_eq!(store.preview_count(), opened + 1);
        assert_eq!(
            store.live_css("el").as_deref(),
            Some("polygon(0% 0%, 75% 0%, 100% 100%, 0% 100%)")
        );
    }

    #[test]
    fn resize_remaps_proportionally() {
        let (mut session, _) = open(200.0, 100.0);
        let id = session.path().points()[1].id;
        session.move_point_to(id, Point::new(150.0, 0.0));
        session.resize(400.0, 50.0);
        assert_eq!(session.path().get(id).unwrap().point, Point::new(300.0, 0.0));
        assert_eq!(session.frame().width, 400.0);
        assert_eq!(session.guides.vertical()[2], 200.0);
        assert_eq!(
            session.live_css(),
            "polygon(0% 0%, 75% 0%, 100% 100%, 0% 100%)"
        );
    }

    #[test]
    fn resize_to_zero_keeps_axis() {
        let (mut session, _) = open(200.0, 100.0);
        session.resize(0.0, 50.0);
        assert_eq!(session.frame().width, 200.0);
        assert_eq!(session.frame().height, 50.0);
        let far = session.path().points()[2].point;
        assert_eq!(far, Point::new(200.0, 50.0));
    }

    #[test]
    fn resize_after_zero_sized_open_keeps_the_shape() {
        let (mut session, store) = open(0.0, 0.0);
        session.resize(200.0, 100.0);
        assert_eq!(session.path().points()[2].point, Point::new(200.0, 100.0));

        let commit = session.close();
        assert_eq!(commit.css, "polygon(0% 0%, 100% 0%, 100% 100%, 0% 100%)");
        assert_eq!((commit.points[1].x, commit.points[1].y), (100.0, 0.0));
        assert_eq!(store.committed("el"), Some(commit));
    }

    #[test]
    fn nudge_with_non_finite_settings_stays_finite() {
        let store = MemoryStore::new();
        let settings = EditorSettings::from_toml_str("nudge_base = nan\nnudge_shift = inf\n").unwrap();
        let mut session = EditSession::open(
            SessionInput::new(ElementFrame::new("el", 200.0, 100.0)),
            settings,
            Box::new(store.clone()),
        );
        let id = session.path().points()[0].id;
        session.selection.select(id);
        session.nudge_selected(1.0, 0.0, false);
        session.nudge_selected(0.0, 1.0, true);
        assert_eq!(session.path().get(id).unwrap().point, Point::new(1.0, 10.0));
        assert!(!store.live_css("el").unwrap().contains("NaN"));
    }
}
