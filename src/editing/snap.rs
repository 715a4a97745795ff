// Copyright 2025 the Clipmask Authors
// SPDX-License-Identifier: Apache-2.0

//! Quartile guidelines that dragged points snap to.
//!
//! Vertical guides sit at fixed fractions of the element width, horizontal
//! guides at the same fractions of its height. While a point is dragged, each
//! axis snaps to the first guide within the threshold and that guide is
//! reported as active so the overlay can highlight it.

use crate::settings;
use kurbo::{Point, Size};

/// Guideline positions (local pixels) and the currently engaged ones
#[derive(Debug, Clone, PartialEq)]
pub struct SnapGuides {
    vertical: [f64; 5],
    horizontal: [f64; 5],
    active_vertical: Option<f64>,
    active_horizontal: Option<f64>,
}

impl SnapGuides {
    /// Guides for an element of `size`
    pub fn new(size: Size) -> Self {
        let fractions = settings::snap::GUIDE_FRACTIONS;
        Self {
            vertical: fractions.map(|f| f * size.width),
            horizontal: fractions.map(|f| f * size.height),
            active_vertical: None,
            active_horizontal: None,
        }
    }

    /// x positions of the vertical guides
    pub fn vertical(&self) -> &[f64] {
        &self.vertical
    }

    /// y positions of the horizontal guides
    pub fn horizontal(&self) -> &[f64] {
        &self.horizontal
    }

    /// The vertical guide the last snap engaged, if any
    pub fn active_vertical(&self) -> Option<f64> {
        self.active_vertical
    }

    /// The horizontal guide the last snap engaged, if any
    pub fn active_horizontal(&self) -> Option<f64> {
        self.active_horizontal
    }

    /// Snap `point` to guides within `threshold`, updating the active set
    pub fn snap(&mut self, point: Point, threshold: f64) -> Point {
        let (x, vertical) = snap_axis(point.x, &self.vertical, threshold);
        let (y, horizontal) = snap_axis(point.y, &self.horizontal, threshold);
        self.active_vertical = vertical;
        self.active_horizontal = horizontal;
        Point::new(x, y)
    }

    /// Forget the engaged guides (drag ended)
    pub fn clear_active(&mut self) {
        self.active_vertical = None;
        self.active_horizontal = None;
    }
}

/// First guide within `threshold` of `value` wins
fn snap_axis(value: f64, guides: &[f64], threshold: f64) -> (f64, Option<f64>) {
    match guides
        .iter()
        .copied()
        .find(|guide| (value - guide).abs() <= threshold)
    {
        Some(guide) => (guide, Some(guide)),
        None => (value, None),
    }
}
