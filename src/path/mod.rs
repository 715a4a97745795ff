// Copyright 2025 the Clipmask Authors
// SPDX-License-Identifier: Apache-2.0

//! Clip path abstraction: the editable representation of an element's mask.
//!
//! A `ClipPath` is a closed loop of at least three anchors. Each anchor owns
//! the segment arriving at it, which may be a line, a quadratic or a cubic.
//! The path is tagged with the coordinate space its numbers are in (`Local`
//! pixels while editing, `Percent` for storage and CSS) so the two cannot be
//! mixed up; conversions always build a new path.

pub mod css;
pub mod point;
pub mod segment;

pub use point::{HandleRole, Incoming, PathPoint, SegmentType};
pub use segment::{Segment, SegmentInfo};

use crate::model::EntityId;
use crate::settings;
use kurbo::{Point, Vec2};
use std::fmt::Debug;
use std::marker::PhantomData;
use thiserror::Error;

// ===== Coordinate spaces =====

/// Marker for the coordinate space a path is expressed in
pub trait Space: Copy + Debug + Default + PartialEq + 'static {
    const NAME: &'static str;
}

/// Element-local pixels, origin at the unrotated top-left corner
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Local;

/// Percentages (0–100) of the element's width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Percent;

impl Space for Local {
    const NAME: &'static str = "local";
}

impl Space for Percent {
    const NAME: &'static str = "percent";
}

// ===== Errors =====

/// Problems building a clip path from external data
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClipPathError {
    #[error("expected a polygon() value, got {0:?}")]
    NotAPolygon(String),

    #[error("invalid coordinate pair {0:?}")]
    InvalidCoordinate(String),

    #[error("unsupported unit in {0:?}; only percentages are accepted")]
    UnsupportedUnit(String),

    #[error("a clip path needs at least {min} points, got {found}", min = settings::path::MIN_POINTS)]
    TooFewPoints { found: usize },

    #[error("point {0} is missing a control handle for its segment type")]
    MissingHandle(u64),

    #[error("point id {0} appears more than once")]
    DuplicateId(u64),
}

// ===== ClipPath =====

/// A closed clip path in coordinate space `S`
#[derive(Debug, Clone, PartialEq)]
pub struct ClipPath<S: Space> {
    points: Vec<PathPoint>,
    space: PhantomData<S>,
}

impl<S: Space> ClipPath<S> {
    /// Build a path from points already in space `S`
    pub fn from_points(points: Vec<PathPoint>) -> Result<Self, ClipPathError> {
        if points.len() < settings::path::MIN_POINTS {
            return Err(ClipPathError::TooFewPoints {
                found: points.len(),
            });
        }
        for (i, pt) in points.iter().enumerate() {
            if points[..i].iter().any(|other| other.id == pt.id) {
                return Err(ClipPathError::DuplicateId(pt.id.raw()));
            }
        }
        Ok(Self::from_points_unchecked(points))
    }

    fn from_points_unchecked(points: Vec<PathPoint>) -> Self {
        Self {
            points,
            space: PhantomData,
        }
    }

    /// A four-point rectangle covering `(0, 0)`–`(width, height)`
    pub fn rectangle(width: f64, height: f64) -> Self {
        Self::from_points_unchecked(vec![
            PathPoint::line(Point::new(0.0, 0.0)),
            PathPoint::line(Point::new(width, 0.0)),
            PathPoint::line(Point::new(width, height)),
            PathPoint::line(Point::new(0.0, height)),
        ])
    }

    /// Get the number of points in this path
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Kept for API symmetry with `len`; false for any valid path
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }

    pub fn get(&self, id: EntityId) -> Option<&PathPoint> {
        self.points.iter().find(|pt| pt.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut PathPoint> {
        self.points.iter_mut().find(|pt| pt.id == id)
    }

    pub fn index_of(&self, id: EntityId) -> Option<usize> {
        self.points.iter().position(|pt| pt.id == id)
    }

    /// Index of the point before `index`, wrapping around the loop
    pub fn previous_index(&self, index: usize) -> usize {
        if index == 0 {
            self.points.len() - 1
        } else {
            index - 1
        }
    }

    /// Whether a point can be removed without going below the floor
    pub fn can_remove(&self) -> bool {
        self.points.len() > settings::path::MIN_POINTS
    }

    /// Iterate over segments ordered by the index of the point that owns
    /// them, so the closing segment (last point into point 0) comes first.
    pub fn iter_segments(&self) -> impl Iterator<Item = SegmentInfo> + '_ {
        (0..self.points.len()).map(move |end_index| {
            let start_index = self.previous_index(end_index);
            let end = &self.points[end_index];
            SegmentInfo {
                segment: Segment::between(&self.points[start_index], end),
                start_index,
                end_index,
                owner: end.id,
            }
        })
    }

    /// The segment owned by the point at `end_index`
    pub fn segment(&self, end_index: usize) -> Option<SegmentInfo> {
        let end = self.points.get(end_index)?;
        let start_index = self.previous_index(end_index);
        Some(SegmentInfo {
            segment: Segment::between(&self.points[start_index], end),
            start_index,
            end_index,
            owner: end.id,
        })
    }

    /// Insert `point` directly after `after_index`.
    ///
    /// An index past the end appends.
    pub fn insert_point(&mut self, after_index: usize, point: PathPoint) {
        let at = (after_index + 1).min(self.points.len());
        self.points.insert(at, point);
    }

    /// Remove a point by id.
    ///
    /// Refused (returns false) when the path is at the three-point floor or
    /// the id is unknown.
    pub fn remove_point(&mut self, id: EntityId) -> bool {
        if !self.can_remove() {
            tracing::debug!("Refusing to remove {}: path is at the point floor", id);
            return false;
        }
        match self.index_of(id) {
            Some(index) => {
                self.points.remove(index);
                true
            }
            None => false,
        }
    }

    /// Change the type of the segment owned by `id`.
    ///
    /// Handles that are still needed are kept; missing ones are synthesized
    /// from the chord to the previous anchor, pushed `offset` units off the
    /// chord. Returns false when `id` is unknown.
    pub fn set_segment_type(&mut self, id: EntityId, typ: SegmentType, offset: f64) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let prev = self.points[self.previous_index(index)].point;
        let point = &mut self.points[index];
        point.incoming = retype(point.incoming, prev, point.point, typ, offset);
        true
    }

    /// Pure form of [`set_segment_type`](Self::set_segment_type)
    pub fn with_segment_type(&self, id: EntityId, typ: SegmentType, offset: f64) -> Self {
        let mut path = self.clone();
        path.set_segment_type(id, typ, offset);
        path
    }

    /// Apply `f` to every anchor and handle, producing a path in space `T`
    pub(crate) fn map_into<T: Space>(&self, f: impl Fn(Point) -> Point) -> ClipPath<T> {
        ClipPath::from_points_unchecked(self.points.iter().map(|pt| pt.map(&f)).collect())
    }

    /// Scale every coordinate by `(sx, sy)` around the origin
    pub fn scaled(&self, sx: f64, sy: f64) -> Self {
        self.map_into(|p| Point::new(p.x * sx, p.y * sy))
    }
}

/// Compute the incoming segment for `typ`, reusing compatible handles
fn retype(current: Incoming, prev: Point, point: Point, typ: SegmentType, offset: f64) -> Incoming {
    let push = chord_normal(prev, point) * offset;
    let third = |t: f64| prev.lerp(point, t) + push;

    match (current, typ) {
        (_, SegmentType::Line) => Incoming::Line,
        (Incoming::Quadratic { control }, SegmentType::Quadratic) => {
            Incoming::Quadratic { control }
        }
        (Incoming::Cubic { control_a, .. }, SegmentType::Quadratic) => Incoming::Quadratic {
            control: control_a,
        },
        (Incoming::Line, SegmentType::Quadratic) => Incoming::Quadratic {
            control: third(0.5),
        },
        (Incoming::Cubic { .. }, SegmentType::Cubic) => current,
        (Incoming::Quadratic { control }, SegmentType::Cubic) => Incoming::Cubic {
            control_a: control,
            control_b: third(2.0 / 3.0),
        },
        (Incoming::Line, SegmentType::Cubic) => Incoming::Cubic {
            control_a: third(1.0 / 3.0),
            control_b: third(2.0 / 3.0),
        },
    }
}

/// Unit normal to the chord `from`–`to`.
///
/// A zero-length chord has no normal; straight up is used instead so new
/// handles still land somewhere finite.
fn chord_normal(from: Point, to: Point) -> Vec2 {
    let chord = to - from;
    let len = chord.hypot();
    if len.is_finite() && len > f64::EPSILON {
        Vec2::new(-chord.y / len, chord.x / len)
    } else {
        Vec2::new(0.0, -1.0)
    }
}
