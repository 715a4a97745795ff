// Copyright 2025 the Clipmask Authors
// SPDX-License-Identifier: Apache-2.0

//! Segments between consecutive anchors, as kurbo curve types

use super::point::{Incoming, PathPoint};
use crate::geometry::{self, CurveHit};
use crate::model::EntityId;
use kurbo::{CubicBez, Line, Point, QuadBez};

/// A single segment of a clip path
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Line(Line),
    Quadratic(QuadBez),
    Cubic(CubicBez),
}

impl Segment {
    /// The segment running from `prev` into `point`
    pub fn between(prev: &PathPoint, point: &PathPoint) -> Self {
        let p0 = prev.point;
        let p1 = point.point;
        match point.incoming {
            Incoming::Line => Segment::Line(Line::new(p0, p1)),
            Incoming::Quadratic { control } => Segment::Quadratic(QuadBez::new(p0, control, p1)),
            Incoming::Cubic {
                control_a,
                control_b,
            } => Segment::Cubic(CubicBez::new(p0, control_a, control_b, p1)),
        }
    }

    pub fn start(&self) -> Point {
        match self {
            Segment::Line(line) => line.p0,
            Segment::Quadratic(quad) => quad.p0,
            Segment::Cubic(cubic) => cubic.p0,
        }
    }

    pub fn end(&self) -> Point {
        match self {
            Segment::Line(line) => line.p1,
            Segment::Quadratic(quad) => quad.p2,
            Segment::Cubic(cubic) => cubic.p3,
        }
    }

    /// Closest position on the segment to `pos`.
    ///
    /// Lines are projected exactly; curves are sampled `samples` times.
    pub fn nearest(&self, pos: Point, samples: usize) -> CurveHit {
        match self {
            Segment::Line(line) => {
                let (point, t) = geometry::project_onto_segment(pos, line.p0, line.p1);
                CurveHit {
                    point,
                    t,
                    distance: pos.distance(point),
                }
            }
            Segment::Quadratic(quad) => {
                let (c0, c1) = geometry::elevate_quadratic(quad.p0, quad.p1, quad.p2);
                geometry::closest_point_on_curve(pos, quad.p0, c0, c1, quad.p2, samples)
            }
            Segment::Cubic(cubic) => geometry::closest_point_on_curve(
                pos, cubic.p0, cubic.p1, cubic.p2, cubic.p3, samples,
            ),
        }
    }

    /// Straight-edge samples after the start point, ending at `end()`
    pub fn flatten(&self) -> Vec<Point> {
        use crate::path::SegmentType;
        match self {
            Segment::Line(line) => {
                geometry::approximate_curve_to_points(line.p0, None, None, line.p1, SegmentType::Line)
            }
            Segment::Quadratic(quad) => geometry::approximate_curve_to_points(
                quad.p0,
                Some(quad.p1),
                None,
                quad.p2,
                SegmentType::Quadratic,
            ),
            Segment::Cubic(cubic) => geometry::approximate_curve_to_points(
                cubic.p0,
                Some(cubic.p1),
                Some(cubic.p2),
                cubic.p3,
                SegmentType::Cubic,
            ),
        }
    }
}

/// A segment plus where it sits in its path
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentInfo {
    pub segment: Segment,
    /// Index of the point the segment starts at
    pub start_index: usize,
    /// Index of the point that owns the segment
    pub end_index: usize,
    /// Id of the owning point
    pub owner: EntityId,
}
