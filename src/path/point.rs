// Copyright 2025 the Clipmask Authors
// SPDX-License-Identifier: Apache-2.0

//! Anchor points and the segment that arrives at them.
//!
//! Every point owns its *incoming* segment: the edge from the previous point
//! in path order (wrapping from the last point to the first) to this one.
//! The control handles live on the owning point, and the `Incoming` enum
//! makes the handle count follow the segment type by construction.

use crate::model::EntityId;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Shape of the segment arriving at a point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentType {
    Line,
    Quadratic,
    Cubic,
}

impl SegmentType {
    pub fn is_curve(self) -> bool {
        !matches!(self, SegmentType::Line)
    }
}

/// Which part of a point is being addressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleRole {
    /// The anchor itself
    Anchor,
    /// The quadratic control, or the first cubic control
    ControlA,
    /// The second cubic control
    ControlB,
}

/// The incoming segment together with its control handles
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Incoming {
    Line,
    Quadratic { control: Point },
    Cubic { control_a: Point, control_b: Point },
}

impl Incoming {
    pub fn segment_type(&self) -> SegmentType {
        match self {
            Incoming::Line => SegmentType::Line,
            Incoming::Quadratic { .. } => SegmentType::Quadratic,
            Incoming::Cubic { .. } => SegmentType::Cubic,
        }
    }

    /// Build from optional handles, as found in stored data.
    ///
    /// Returns `None` when a handle the type needs is missing.
    pub fn from_parts(
        typ: SegmentType,
        control_a: Option<Point>,
        control_b: Option<Point>,
    ) -> Option<Self> {
        match typ {
            SegmentType::Line => Some(Incoming::Line),
            SegmentType::Quadratic => Some(Incoming::Quadratic {
                control: control_a?,
            }),
            SegmentType::Cubic => Some(Incoming::Cubic {
                control_a: control_a?,
                control_b: control_b?,
            }),
        }
    }
}

/// A single anchor in a clip path
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathPoint {
    pub id: EntityId,
    pub point: Point,
    pub incoming: Incoming,
}

impl PathPoint {
    /// A new straight-edged point with a fresh id
    pub fn line(point: Point) -> Self {
        Self {
            id: EntityId::next(),
            point,
            incoming: Incoming::Line,
        }
    }

    pub fn segment_type(&self) -> SegmentType {
        self.incoming.segment_type()
    }

    /// The quadratic control or first cubic control
    pub fn control_a(&self) -> Option<Point> {
        match self.incoming {
            Incoming::Line => None,
            Incoming::Quadratic { control } => Some(control),
            Incoming::Cubic { control_a, .. } => Some(control_a),
        }
    }

    /// The second cubic control
    pub fn control_b(&self) -> Option<Point> {
        match self.incoming {
            Incoming::Cubic { control_b, .. } => Some(control_b),
            _ => None,
        }
    }

    /// Position of the anchor or one of its handles
    pub fn position(&self, role: HandleRole) -> Option<Point> {
        match role {
            HandleRole::Anchor => Some(self.point),
            HandleRole::ControlA => self.control_a(),
            HandleRole::ControlB => self.control_b(),
        }
    }

    /// Move the anchor or one of its handles.
    ///
    /// Returns false when the point has no such handle.
    pub fn set_position(&mut self, role: HandleRole, pos: Point) -> bool {
        match (role, &mut self.incoming) {
            (HandleRole::Anchor, _) => self.point = pos,
            (HandleRole::ControlA, Incoming::Quadratic { control }) => *control = pos,
            (HandleRole::ControlA, Incoming::Cubic { control_a, .. }) => *control_a = pos,
            (HandleRole::ControlB, Incoming::Cubic { control_b, .. }) => *control_b = pos,
            _ => return false,
        }
        true
    }

    /// Translate the anchor and all of its handles
    pub fn translate(&mut self, delta: Vec2) {
        self.point += delta;
        match &mut self.incoming {
            Incoming::Line => {}
            Incoming::Quadratic { control } => *control += delta,
            Incoming::Cubic {
                control_a,
                control_b,
            } => {
                *control_a += delta;
                *control_b += delta;
            }
        }
    }

    /// Apply `f` to the anchor and every handle, keeping the id
    pub fn map(&self, f: impl Fn(Point) -> Point) -> Self {
        let incoming = match self.incoming {
            Incoming::Line => Incoming::Line,
            Incoming::Quadratic { control } => Incoming::Quadratic {
                control: f(control),
            },
            Incoming::Cubic {
                control_a,
                control_b,
            } => Incoming::Cubic {
                control_a: f(control_a),
                control_b: f(control_b),
            },
        };
        Self {
            id: self.id,
            point: f(self.point),
            incoming,
        }
    }
}
