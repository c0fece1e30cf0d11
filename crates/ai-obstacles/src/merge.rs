//! Boundary-following union of two orthogonal polygons.
//!
//! Polygons are listed clockwise. The walk starts at the first vertex of the polygon whose
//! bounding box has the top-most (then left-most) corner, follows its edges until one of them
//! enters the other polygon, then switches to the other polygon's boundary at the crossing.
//!
//! ```text
//!   0,0 ---> x
//!   |
//!   |                   primary
//!   |      B 0 ----- 1
//!   |        |       |
//!   |  A 0 --I-- 1   |
//!   |    |   |   |   |
//!   |    |   3 --J-- 2
//!   |    |       |
//!   |    3 ----- 2
//!   |               secondary
//!   v y
//! ```
//!
//! Only horizontal and vertical edges are supported.

use crate::intersect::{axis_length, line_line_intersection, point_in_polygon, points_within_tolerance};
use crate::{Polygon, Vec2, Vertex, VertexType};

/// Which input of [`merge_polygons`] ends up holding the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeSide {
    First,
    Second,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Merged {
    pub polygon: Polygon,
    /// Slot that keeps `polygon`; the other input is absorbed.
    pub kept: MergeSide,
}

/// Edge pairings where an edge of the walked polygon enters the other polygon.
fn is_crossing(line: VertexType, edge: VertexType) -> bool {
    use VertexType::*;

    matches!(
        (line, edge),
        (TopRight, TopLeft)
            | (BottomRight, TopRight)
            | (BottomLeft, BottomRight)
            | (TopLeft, BottomLeft)
    )
}

/// Nearest crossing of `line` (tagged `line_kind`) with an edge of `poly`.
///
/// `previous` is the last crossing found by the walk; an edge ending there, or a crossing at
/// the exact same point, is skipped so the walk does not switch back at the same spot. Distance
/// is the axis-aligned span from `line.0`.
pub fn line_polygon_intersection(
    line: (Vec2, Vec2),
    line_kind: VertexType,
    poly: &Polygon,
    previous: Vec2,
) -> Option<(Vec2, usize)> {
    let mut current = previous;
    let mut nearest: Option<(f32, usize)> = None;

    for i in 0..poly.len() {
        let edge = poly.edge(i);
        let Some(point) = line_line_intersection(line, edge) else {
            continue;
        };
        if !is_crossing(line_kind, poly.kind(i)) {
            continue;
        }
        if points_within_tolerance(edge.1, current) || point == current {
            continue;
        }

        let distance = axis_length(line.0, point);
        if nearest.map_or(true, |(best, _)| distance < best) {
            nearest = Some((distance, i));
            current = point;
        }
    }

    nearest.map(|(_, index)| (current, index))
}

/// Merge two polygons whose bounding boxes overlap.
///
/// Returns `None` when the outlines neither interlock nor enclose one another, when the merged
/// outline would exceed `vertex_capacity`, or when the walk fails to close.
pub fn merge_polygons(a: &Polygon, b: &Polygon, vertex_capacity: usize) -> Option<Merged> {
    if a.is_empty() || b.is_empty() {
        return None;
    }

    match walk_union(a, b, vertex_capacity) {
        Walk::Closed(merged) => Some(merged),
        Walk::NoCrossing => absorb_enclosed(a, b),
        Walk::Abandoned => None,
    }
}

enum Walk {
    Closed(Merged),
    NoCrossing,
    Abandoned,
}

fn walk_union(a: &Polygon, b: &Polygon, vertex_capacity: usize) -> Walk {
    let pair = [a, b];
    let a_first = a.rect.y0 < b.rect.y0 || (a.rect.y0 == b.rect.y0 && a.rect.x0 < b.rect.x0);
    let (mut primary, mut secondary) = if a_first { (0, 1) } else { (1, 0) };

    let starting = primary;
    let start_vertex = pair[starting].position(0);
    let max_steps = 2 * (vertex_capacity + a.len() + b.len());

    let mut merged: Vec<Vertex> = Vec::new();
    let mut intersection = Vec2::ZERO;
    let mut add_vertex = true;
    let mut on_intersection = false;
    let mut crossed = false;
    let mut vert_index = 0;

    for _ in 0..max_steps {
        let poly = pair[primary];
        let start = if on_intersection {
            intersection
        } else {
            poly.position(vert_index)
        };
        let end = poly.position(poly.next_index(vert_index));
        let kind = poly.kind(vert_index);

        if add_vertex {
            if merged.len() >= vertex_capacity {
                tracing::warn!(vertex_capacity, "merged outline exceeds vertex capacity");
                return Walk::Abandoned;
            }
            merged.push(Vertex::new(start, kind));
        }
        add_vertex = true;

        match line_polygon_intersection((start, end), kind, pair[secondary], intersection) {
            Some((point, index)) => {
                intersection = point;
                if points_within_tolerance(point, start) {
                    // The crossing is the vertex just added; it is re-added from the other side.
                    add_vertex = false;
                    merged.pop();
                }
                vert_index = index;
                on_intersection = true;
                crossed = true;
                core::mem::swap(&mut primary, &mut secondary);
            }
            None => {
                vert_index = pair[primary].next_index(vert_index);
                on_intersection = false;
            }
        }

        if pair[primary].position(vert_index) == start_vertex {
            if !crossed {
                return Walk::NoCrossing;
            }
            if merged.len() < 4 {
                // Coincident outlines collapse; let the containment check decide.
                return Walk::NoCrossing;
            }
            let kept = if starting == 0 {
                MergeSide::First
            } else {
                MergeSide::Second
            };
            return Walk::Closed(Merged {
                polygon: Polygon {
                    rect: a.rect.merge(&b.rect),
                    vertices: merged,
                },
                kept,
            });
        }
    }

    tracing::warn!(max_steps, "merge walk did not return to its start vertex");
    Walk::Abandoned
}

fn encloses(outer: &Polygon, inner: &Polygon) -> bool {
    inner
        .vertices
        .iter()
        .all(|v| point_in_polygon(v.position, outer))
}

fn absorb_enclosed(a: &Polygon, b: &Polygon) -> Option<Merged> {
    if encloses(a, b) {
        Some(Merged {
            polygon: a.clone(),
            kept: MergeSide::First,
        })
    } else if encloses(b, a) {
        Some(Merged {
            polygon: b.clone(),
            kept: MergeSide::Second,
        })
    } else {
        None
    }
}
