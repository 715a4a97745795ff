// Copyright 2025 the Clipmask Authors
// SPDX-License-Identifier: Apache-2.0

//! Text formats: SVG draw commands and CSS `polygon()` clip paths.
//!
//! CSS `clip-path: polygon()` cannot carry curve data, so curved segments are
//! flattened on the way out and everything parsed back in is a straight
//! line. The exact curves only survive through the stored point format.

use super::{ClipPath, ClipPathError, Percent, PathPoint, Segment, Space};
use crate::settings;
use kurbo::{BezPath, PathEl, Point};

impl<S: Space> ClipPath<S> {
    /// SVG path data for the editor overlay.
    ///
    /// Moves to the first point, then emits one command per segment in path
    /// order, finishing with the segment back into the first point.
    pub fn to_draw_command(&self) -> String {
        let commands: Vec<String> = self
            .to_bezpath()
            .elements()
            .iter()
            .map(|el| match *el {
                PathEl::MoveTo(p) => format!("M{} {}", p.x, p.y),
                PathEl::LineTo(p) => format!("L{} {}", p.x, p.y),
                PathEl::QuadTo(c, p) => format!("Q{} {} {} {}", c.x, c.y, p.x, p.y),
                PathEl::CurveTo(a, b, p) => {
                    format!("C{} {} {} {} {} {}", a.x, a.y, b.x, b.y, p.x, p.y)
                }
                PathEl::ClosePath => "Z".to_string(),
            })
            .collect();
        commands.join(" ")
    }

    /// Convert this path to a kurbo BezPath for rendering
    pub fn to_bezpath(&self) -> BezPath {
        let mut bez = BezPath::new();
        let Some(first) = self.points().first() else {
            return bez;
        };
        bez.move_to(first.point);

        let closing = self.segment(0);
        for info in self.iter_segments().skip(1).chain(closing) {
            match info.segment {
                Segment::Line(line) => bez.line_to(line.p1),
                Segment::Quadratic(quad) => bez.quad_to(quad.p1, quad.p2),
                Segment::Cubic(cubic) => bez.curve_to(cubic.p1, cubic.p2, cubic.p3),
            }
        }
        bez.close_path();
        bez
    }

    /// Straight-edge outline: each segment's samples, in owning-point order
    pub fn flattened(&self) -> Vec<Point> {
        self.iter_segments()
            .flat_map(|info| info.segment.flatten())
            .collect()
    }
}

impl ClipPath<Percent> {
    /// CSS `clip-path` value for this path.
    ///
    /// A path of straight lines yields its anchors verbatim; curved segments
    /// contribute 4 (quadratic) or 6 (cubic) flattened samples each.
    pub fn to_clip_path_css(&self) -> String {
        let pairs: Vec<String> = self
            .flattened()
            .into_iter()
            .map(|p| format!("{}% {}%", format_percent(p.x), format_percent(p.y)))
            .collect();
        format!("polygon({})", pairs.join(", "))
    }

    /// Parse a CSS `polygon()` of percentage pairs.
    ///
    /// Every resulting point is a straight line with a fresh id. An optional
    /// leading fill rule (`nonzero` / `evenodd`) is skipped.
    pub fn from_polygon_css(css: &str) -> Result<Self, ClipPathError> {
        let points = parse_polygon(css)?
            .into_iter()
            .map(PathPoint::line)
            .collect();
        Self::from_points(points)
    }
}

/// Extract the coordinate list from a `polygon(...)` value
pub fn parse_polygon(css: &str) -> Result<Vec<Point>, ClipPathError> {
    let trimmed = css.trim().trim_end_matches(';').trim();
    let body = trimmed
        .get(..8)
        .filter(|head| head.eq_ignore_ascii_case("polygon("))
        .and_then(|_| trimmed[8..].strip_suffix(')'))
        .ok_or_else(|| ClipPathError::NotAPolygon(css.to_string()))?;

    let mut points = Vec::new();
    for (i, pair) in body.split(',').enumerate() {
        let pair = pair.trim();
        if i == 0 && is_fill_rule(pair) {
            continue;
        }
        let mut parts = pair.split_whitespace();
        let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ClipPathError::InvalidCoordinate(pair.to_string()));
        };
        points.push(Point::new(parse_percent(x)?, parse_percent(y)?));
    }
    Ok(points)
}

fn is_fill_rule(token: &str) -> bool {
    token.eq_ignore_ascii_case("nonzero") || token.eq_ignore_ascii_case("evenodd")
}

/// Parse `12.5%` (or a bare `0`) into a number
fn parse_percent(token: &str) -> Result<f64, ClipPathError> {
    let number = match token.strip_suffix('%') {
        Some(number) => number,
        None if token.parse::<f64>().is_ok_and(|v| v == 0.0) => token,
        None if token.parse::<f64>().is_ok() || token.ends_with(char::is_alphabetic) => {
            return Err(ClipPathError::UnsupportedUnit(token.to_string()));
        }
        None => return Err(ClipPathError::InvalidCoordinate(token.to_string())),
    };
    number
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ClipPathError::InvalidCoordinate(token.to_string()))
}

/// Format a percentage for CSS, rounded and without trailing zeros
pub fn format_percent(value: f64) -> String {
    let scale = 10f64.powi(settings::path::PERCENT_PRECISION);
    let rounded = (value * scale).round() / scale;
    // Avoid "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{}", rounded)
}
