// Copyright 2025 the Clipmask Authors
// SPDX-License-Identifier: Apache-2.0

//! Curve math used by hit testing and flattening.
//!
//! Everything here is stateless and works on points in a single coordinate
//! space; callers decide which one. Bezier evaluation uses the Bernstein
//! polynomial directly so that evenly spaced `t` values give the same samples
//! everywhere they are taken.

use crate::path::SegmentType;
use crate::settings;
use kurbo::Point;

/// Nearest sample found on a curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveHit {
    /// The sampled point on the curve
    pub point: Point,
    /// Curve parameter of the sample, in `0.0..=1.0`
    pub t: f64,
    /// Distance from the query point to `point`
    pub distance: f64,
}

/// Evaluate a quadratic bezier at `t`
pub fn evaluate_quadratic(p0: Point, c: Point, p1: Point, t: f64) -> Point {
    let mt = 1.0 - t;
    let a = mt * mt;
    let b = 2.0 * mt * t;
    let d = t * t;
    Point::new(
        a * p0.x + b * c.x + d * p1.x,
        a * p0.y + b * c.y + d * p1.y,
    )
}

/// Evaluate a cubic bezier at `t`
pub fn evaluate_cubic(p0: Point, c0: Point, c1: Point, p1: Point, t: f64) -> Point {
    let mt = 1.0 - t;
    let a = mt * mt * mt;
    let b = 3.0 * mt * mt * t;
    let c = 3.0 * mt * t * t;
    let d = t * t * t;
    Point::new(
        a * p0.x + b * c0.x + c * c1.x + d * p1.x,
        a * p0.y + b * c0.y + c * c1.y + d * p1.y,
    )
}

/// Project `p` onto segment `a`–`b`, clamped to the segment.
///
/// Returns the projected point and its parameter along the segment. A
/// zero-length segment projects everything onto `a`.
pub fn project_onto_segment(p: Point, a: Point, b: Point) -> (Point, f64) {
    let ab = b - a;
    let len_sq = ab.hypot2();
    if len_sq <= f64::EPSILON {
        return (a, 0.0);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (a + ab * t, t)
}

/// Distance from `p` to the closest point of segment `a`–`b`
pub fn distance_point_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let (closest, _) = project_onto_segment(p, a, b);
    p.distance(closest)
}

/// Nearest of `samples + 1` evenly spaced samples on a cubic
pub fn closest_point_on_curve(
    p: Point,
    p0: Point,
    c0: Point,
    c1: Point,
    p1: Point,
    samples: usize,
) -> CurveHit {
    let samples = samples.max(1);
    let mut best = CurveHit {
        point: p0,
        t: 0.0,
        distance: p.distance(p0),
    };

    for i in 1..=samples {
        let t = i as f64 / samples as f64;
        let point = evaluate_cubic(p0, c0, c1, p1, t);
        let distance = p.distance(point);
        if distance < best.distance {
            best = CurveHit { point, t, distance };
        }
    }

    best
}

/// Express a quadratic as the equivalent cubic control pair
pub fn elevate_quadratic(p0: Point, c: Point, p1: Point) -> (Point, Point) {
    let c0 = p0 + (c - p0) * (2.0 / 3.0);
    let c1 = p1 + (c - p1) * (2.0 / 3.0);
    (c0, c1)
}

/// Replace a curved segment with straight-edge samples.
///
/// The start point is not included; the last sample is always `p1`. A line
/// yields just `p1`, a quadratic 4 samples and a cubic 6. Missing control
/// points fall back to points on the chord so the sample count stays fixed.
pub fn approximate_curve_to_points(
    p0: Point,
    c0: Option<Point>,
    c1: Option<Point>,
    p1: Point,
    kind: SegmentType,
) -> Vec<Point> {
    match kind {
        SegmentType::Line => vec![p1],
        SegmentType::Quadratic => {
            let c = c0.unwrap_or_else(|| p0.midpoint(p1));
            let steps = settings::flatten::QUADRATIC_STEPS;
            (1..=steps)
                .map(|i| {
                    if i == steps {
                        p1
                    } else {
                        evaluate_quadratic(p0, c, p1, i as f64 / steps as f64)
                    }
                })
                .collect()
        }
        SegmentType::Cubic => {
            let c0 = c0.unwrap_or_else(|| p0.lerp(p1, 1.0 / 3.0));
            let c1 = c1.unwrap_or_else(|| p0.lerp(p1, 2.0 / 3.0));
            let steps = settings::flatten::CUBIC_STEPS;
            (1..=steps)
                .map(|i| {
                    if i == steps {
                        p1
                    } else {
                        evaluate_cubic(p0, c0, c1, p1, i as f64 / steps as f64)
                    }
                })
                .collect()
        }
    }
}
