// Copyright 2025 the Clipmask Authors
// SPDX-License-Identifier: Apache-2.0

//! Conversions between screen pixels, element-local pixels and percentages.
//!
//! Screen coordinates come straight from pointer events. Local coordinates
//! are CSS pixels in the element's own unrotated frame, origin at its
//! top-left corner. Percentages are 0–100 of the element's width and height
//! and are what gets stored.
//!
//! A zero (or non-finite) dimension means "no conversion on this axis":
//! elements briefly report 0×0 during layout and that must not push
//! `Infinity` or `NaN` into the path.

use crate::path::{ClipPath, Local, Percent};
use kurbo::{Point, Rect, Size};

/// True when `dim` can be divided by
fn usable(dim: f64) -> bool {
    dim.is_finite() && dim > 0.0
}

/// Map a pointer position to element-local pixels.
///
/// `bounds` is the element's axis-aligned bounding box on screen, which for a
/// rotated element is larger than the element itself. The display scale is
/// recovered by comparing that box with the box the unscaled rotated element
/// would have, then the pointer is rotated back into the element's axes.
pub fn screen_to_local(
    client: Point,
    bounds: Rect,
    width: f64,
    height: f64,
    rotation_degrees: f64,
) -> Point {
    let center = bounds.center();
    let v = client - center;

    let (sin, cos) = rotation_degrees.to_radians().sin_cos();
    let rotated_width = width * cos.abs() + height * sin.abs();
    let rotated_height = width * sin.abs() + height * cos.abs();

    let scale_x = display_scale(bounds.width(), rotated_width);
    let scale_y = display_scale(bounds.height(), rotated_height);

    // Undo the element's rotation
    let x = v.x * cos + v.y * sin;
    let y = -v.x * sin + v.y * cos;

    Point::new(x / scale_x + width / 2.0, y / scale_y + height / 2.0)
}

/// Ratio of rendered size to theoretical size, 1.0 when undefined
fn display_scale(rendered: f64, theoretical: f64) -> f64 {
    if usable(rendered) && usable(theoretical) {
        rendered / theoretical
    } else {
        1.0
    }
}

/// Local pixels to percentages of `size`
pub fn local_to_percent(point: Point, size: Size) -> Point {
    Point::new(
        to_percent(point.x, size.width),
        to_percent(point.y, size.height),
    )
}

/// Percentages of `size` to local pixels
pub fn percent_to_local(point: Point, size: Size) -> Point {
    Point::new(
        from_percent(point.x, size.width),
        from_percent(point.y, size.height),
    )
}

fn to_percent(value: f64, dim: f64) -> f64 {
    if usable(dim) { value / dim * 100.0 } else { value }
}

fn from_percent(value: f64, dim: f64) -> f64 {
    if usable(dim) { value / 100.0 * dim } else { value }
}

/// Per-axis factors for remapping a path from `old` to `new`.
///
/// An axis whose new size is unusable keeps a factor of 1. An axis whose old
/// size was unusable still holds percentages (see [`percent_to_local`]), so it
/// scales by `new / 100`.
pub fn rescale_factors(old: Size, new: Size) -> (f64, f64) {
    let factor = |o: f64, n: f64| match (usable(o), usable(n)) {
        (true, true) => n / o,
        (false, true) => n / 100.0,
        (_, false) => 1.0,
    };
    (factor(old.width, new.width), factor(old.height, new.height))
}

impl ClipPath<Local> {
    /// Express this path as percentages of `size`
    pub fn to_percent(&self, size: Size) -> ClipPath<Percent> {
        self.map_into(|p| local_to_percent(p, size))
    }

    /// Remap every point and handle proportionally from `old` to `new`
    pub fn rescaled(&self, old: Size, new: Size) -> Self {
        let (sx, sy) = rescale_factors(old, new);
        self.scaled(sx, sy)
    }
}

impl ClipPath<Percent> {
    /// Express this path in local pixels of an element of `size`
    pub fn to_local(&self, size: Size) -> ClipPath<Local> {
        self.map_into(|p| percent_to_local(p, size))
    }
}
