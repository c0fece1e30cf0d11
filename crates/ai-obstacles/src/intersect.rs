//! Segment intersection and distance helpers.
//!
//! Obstacle edges are always horizontal or vertical, which lets the merge code use an exact
//! axis-aligned intersection; rays toward a destination are arbitrary and use the general form.

use crate::{Polygon, Vec2};

/// Coordinates closer than this are the same point.
pub const TOLERANCE: f64 = 0.009;

/// `|a - b| < TOLERANCE`, evaluated in double precision.
pub fn within_tolerance(a: f32, b: f32) -> bool {
    (f64::from(a) - f64::from(b)).abs() < TOLERANCE
}

pub fn points_within_tolerance(a: Vec2, b: Vec2) -> bool {
    within_tolerance(a.x, b.x) && within_tolerance(a.y, b.y)
}

fn in_range(v: f32, start: f32, end: f32) -> bool {
    start <= v && v <= end
}

fn is_axis_aligned(segment: (Vec2, Vec2)) -> bool {
    segment.0.x == segment.1.x || segment.0.y == segment.1.y
}

fn normalized(segment: (Vec2, Vec2)) -> (Vec2, Vec2) {
    let (mut start, mut end) = segment;
    if start.x > end.x {
        core::mem::swap(&mut start.x, &mut end.x);
    }
    if start.y > end.y {
        core::mem::swap(&mut start.y, &mut end.y);
    }
    (start, end)
}

/// Crossing point of a horizontal and a vertical segment.
///
/// Both segments must be axis-aligned. Parallel pairs never intersect here, and the ranges are
/// closed so touching at an endpoint counts.
pub fn line_line_intersection(a: (Vec2, Vec2), b: (Vec2, Vec2)) -> Option<Vec2> {
    debug_assert!(is_axis_aligned(a), "segment {a:?} is not axis-aligned");
    debug_assert!(is_axis_aligned(b), "segment {b:?} is not axis-aligned");

    let (a0, a1) = normalized(a);
    let (b0, b1) = normalized(b);

    if a0.x == a1.x
        && b0.y == b1.y
        && in_range(a0.x, b0.x, b1.x)
        && in_range(b0.y, a0.y, a1.y)
    {
        // a vertical, b horizontal
        return Some(Vec2::new(a0.x, b0.y));
    }

    if a0.y == a1.y
        && b0.x == b1.x
        && in_range(a0.y, b0.y, b1.y)
        && in_range(b0.x, a0.x, a1.x)
    {
        // a horizontal, b vertical
        return Some(Vec2::new(b0.x, a0.y));
    }

    None
}

/// Intersection point of segments `a1 -> a2` and `b1 -> b2`.
///
/// Parallel segments report no intersection, collinear overlapping ones and zero-length
/// segments included.
pub fn line_intersection(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> Option<Vec2> {
    let s1 = a2 - a1;
    let s2 = b2 - b1;

    let det = s1.cross(s2);
    if det == 0.0 {
        return None;
    }

    let d = a1 - b1;
    let s = s1.cross(d) / det;
    let t = s2.cross(d) / det;

    if (0.0..=1.0).contains(&s) && (0.0..=1.0).contains(&t) {
        Some(a1 + s1 * t)
    } else {
        None
    }
}

/// Length of an axis-aligned segment: `|dy|` when vertical, `|dx|` otherwise.
pub fn axis_length(a: Vec2, b: Vec2) -> f32 {
    if a.x == b.x {
        (b.y - a.y).abs()
    } else {
        (b.x - a.x).abs()
    }
}

/// Whether `p` lies on `poly`'s outline, within tolerance.
pub fn point_on_outline(p: Vec2, poly: &Polygon) -> bool {
    poly.edges().any(|(a, b)| {
        let (lo, hi) = normalized((a, b));
        if a.x == b.x {
            within_tolerance(p.x, a.x)
                && f64::from(p.y) > f64::from(lo.y) - TOLERANCE
                && f64::from(p.y) < f64::from(hi.y) + TOLERANCE
        } else {
            within_tolerance(p.y, a.y)
                && f64::from(p.x) > f64::from(lo.x) - TOLERANCE
                && f64::from(p.x) < f64::from(hi.x) + TOLERANCE
        }
    })
}

/// Inside-or-on test for an orthogonal polygon.
pub fn point_in_polygon(p: Vec2, poly: &Polygon) -> bool {
    if poly.is_empty() {
        return false;
    }
    if point_on_outline(p, poly) {
        return true;
    }

    // Ray cast toward +x.
    let mut inside = false;
    for (a, b) in poly.edges() {
        if (a.y > p.y) != (b.y > p.y) {
            let x = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
            if p.x < x {
                inside = !inside;
            }
        }
    }
    inside
}
