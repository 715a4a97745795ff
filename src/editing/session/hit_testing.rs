// Copyright 2025 the Clipmask Authors
// SPDX-License-Identifier: Apache-2.0

//! Hit testing methods for EditSession

use super::EditSession;
use crate::editing::hit_test::{self, HitTestResult};
use crate::geometry::CurveHit;
use crate::path::{HandleRole, SegmentInfo};
use kurbo::Point;

/// What a pointer position landed on
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitTarget {
    /// An anchor or one of its control handles
    Point(HitTestResult),
    /// A segment, with the closest position on it
    Segment { info: SegmentInfo, hit: CurveHit },
}

impl EditSession {
    /// Hit test anchors, then segments, at a local position
    pub fn hit_test(&self, local_pos: Point) -> Option<HitTarget> {
        let max_dist = self.settings.hit_radius;
        if let Some(hit) = self.hit_test_point(local_pos, max_dist) {
            return Some(HitTarget::Point(hit));
        }
        self.hit_test_segments(local_pos, max_dist)
            .map(|(info, hit)| HitTarget::Segment { info, hit })
    }

    /// Closest anchor or handle within `max_dist` local pixels
    ///
    /// Anchors are listed before handles so an anchor wins a tie.
    pub fn hit_test_point(&self, local_pos: Point, max_dist: f64) -> Option<HitTestResult> {
        let points = self.path.points();
        let anchors = points
            .iter()
            .map(|pt| (pt.id, HandleRole::Anchor, pt.point));
        let handles = points.iter().flat_map(|pt| {
            [
                pt.control_a().map(|p| (pt.id, HandleRole::ControlA, p)),
                pt.control_b().map(|p| (pt.id, HandleRole::ControlB, p)),
            ]
            .into_iter()
            .flatten()
        });

        let result = hit_test::find_closest(local_pos, anchors.chain(handles), max_dist);

        if let Some(ref hit) = result {
            tracing::debug!(
                "[hit_test_point] Hit {} {:?} at distance {:.2}",
                hit.entity,
                hit.role,
                hit.distance
            );
        }
        result
    }

    /// Closest segment within `max_dist` local pixels
    ///
    /// Returns the segment and the nearest position found on it.
    pub fn hit_test_segments(&self, local_pos: Point, max_dist: f64) -> Option<(SegmentInfo, CurveHit)> {
        let samples = self.settings.hit_curve_samples;
        let mut closest: Option<(SegmentInfo, CurveHit)> = None;

        for info in self.path.iter_segments() {
            let hit = info.segment.nearest(local_pos, samples);
            if hit.distance > max_dist {
                continue;
            }
            if closest.is_none_or(|(_, best)| hit.distance < best.distance) {
                closest = Some((info, hit));
            }
        }

        if let Some((info, hit)) = &closest {
            tracing::debug!(
                "[hit_test_segments] Segment {} -> {} at t={:.3}, distance {:.2}",
                info.start_index,
                info.end_index,
                hit.t,
                hit.distance
            );
        }
        closest
    }
}

#[cfg(test)]
mod tests {
    use crate::editing::session::{EditSession, HitTarget};
    use crate::model::ElementFrame;
    use crate::path::{HandleRole, SegmentType};
    use crate::persistence::{MemoryStore, SessionInput};
    use crate::settings::EditorSettings;
    use kurbo::Point;

    fn session() -> EditSession {
        EditSession::open(
            SessionInput::new(ElementFrame::new("el", 200.0, 100.0)),
            EditorSettings::default(),
            Box::new(MemoryStore::new()),
        )
    }

    #[test]
    fn anchor_hit() {
        let session = session();
        let hit = session.hit_test(Point::new(197.0, 4.0)).unwrap();
        match hit {
            HitTarget::Point(result) => {
                assert_eq!(result.entity, session.path().points()[1].id);
                assert_eq!(result.role, HandleRole::Anchor);
            }
            other => panic!("expected point hit, got {other:?}"),
        }
    }

    #[test]
    fn handle_hit() {
        let mut session = session();
        let id = session.path().points()[1].id;
        session.set_segment_type(id, SegmentType::Quadratic);
        let control = session.path().get(id).unwrap().control_a().unwrap();

        let hit = session
            .hit_test_point(control + kurbo::Vec2::new(1.0, 1.0), 10.0)
            .unwrap();
        assert_eq!(hit.entity, id);
        assert_eq!(hit.role, HandleRole::ControlA);
    }

    #[test]
    fn segment_hit_reports_owner() {
        let session = session();
        // Middle of the bottom edge, owned by point 3
        match session.hit_test(Point::new(100.0, 96.0)) {
            Some(HitTarget::Segment { info, hit }) => {
                assert_eq!(info.end_index, 3);
                assert_eq!(hit.point, Point::new(100.0, 100.0));
                assert!((hit.distance - 4.0).abs() < 1e-9);
            }
            other => panic!("expected segment hit, got {other:?}"),
        }
    }

    #[test]
    fn miss() {
        let session = session();
        assert_eq!(session.hit_test(Point::new(100.0, 50.0)), None);
    }
}
