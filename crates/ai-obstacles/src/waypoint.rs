//! Next-waypoint search around obstacle polygons.
//!
//! The search walks from the origin toward the destination. Whenever the remaining segment is
//! blocked it detours around the nearest blocking polygon (clockwise or counter-clockwise,
//! whichever is walkable and shorter) and continues from the end of the detour. The assembled
//! path is then pruned to the farthest point visible in a straight line from the origin.

use crate::intersect::{axis_length, line_intersection, points_within_tolerance};
use crate::{Obstacles, Polygon, Vec2, Vec3, VertexType, WalkableArea};

/// Result of [`Obstacles::find_next_waypoint`].
///
/// On failure `position` is the origin (or the chosen point at the origin's altitude when the
/// floor lookup fails) and the caller should not move this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub position: Vec3,
    pub success: bool,
}

impl Waypoint {
    fn stay(from: Vec3) -> Self {
        Self {
            position: from,
            success: false,
        }
    }
}

/// Per-search state. A polygon blocks a traversal at most once.
#[derive(Debug)]
struct SearchContext {
    visited: Vec<bool>,
    depth: usize,
}

impl SearchContext {
    fn new(polygon_count: usize) -> Self {
        Self {
            visited: vec![false; polygon_count],
            depth: 0,
        }
    }
}

/// Where a ray crosses a polygon's outline.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Hit {
    /// Edge index (edge `i` starts at vertex `i`).
    vertex_index: usize,
    distance: f32,
    position: Vec2,
}

#[derive(Debug, Clone, Copy)]
struct Blocker {
    index: usize,
    near: Hit,
    far: Hit,
}

#[derive(Debug, Default)]
struct Detour {
    points: Vec<Vec2>,
    blocked: bool,
}

impl Detour {
    fn push(&mut self, p: Vec2, area: &dyn WalkableArea) {
        if area.find_walkbox(p.x, p.y).is_none() {
            self.blocked = true;
        }
        self.points.push(p);
    }

    fn length(&self) -> f32 {
        self.points
            .windows(2)
            .map(|w| axis_length(w[0], w[1]))
            .sum()
    }
}

fn find_intersection_nearest(poly: &Polygon, from: Vec2, to: Vec2) -> Option<Hit> {
    find_intersection_by(poly, from, to, |candidate, best| candidate < best)
}

fn find_intersection_farthest(poly: &Polygon, from: Vec2, to: Vec2) -> Option<Hit> {
    find_intersection_by(poly, from, to, |candidate, best| candidate > best)
}

fn find_intersection_by(
    poly: &Polygon,
    from: Vec2,
    to: Vec2,
    better: impl Fn(f32, f32) -> bool,
) -> Option<Hit> {
    let mut best: Option<Hit> = None;
    for (i, (a, b)) in poly.edges().enumerate() {
        let Some(position) = line_intersection(from, to, a, b) else {
            continue;
        };
        let distance = from.distance(position);
        if best.map_or(true, |hit| better(distance, hit.distance)) {
            best = Some(Hit {
                vertex_index: i,
                distance,
                position,
            });
        }
    }
    best
}

fn build_negative_path(poly: &Polygon, near: &Hit, far: &Hit, area: &dyn WalkableArea) -> Detour {
    let mut detour = Detour::default();
    detour.push(near.position, area);

    let mut i = near.vertex_index;
    loop {
        detour.push(poly.position(i), area);
        i = poly.prev_index(i);
        if i == far.vertex_index {
            break;
        }
    }

    detour.push(far.position, area);
    detour
}

fn build_positive_path(poly: &Polygon, near: &Hit, far: &Hit, area: &dyn WalkableArea) -> Detour {
    let mut detour = Detour::default();
    detour.push(near.position, area);

    let mut i = poly.next_index(near.vertex_index);
    loop {
        detour.push(poly.position(i), area);
        if i == far.vertex_index {
            break;
        }
        i = poly.next_index(i);
    }

    detour.push(far.position, area);
    detour
}

/// Whether a segment leaving a vertex with incoming tag `prev` and own tag `kind` turns into
/// the polygon.
fn vertices_can_intersect(prev: VertexType, kind: VertexType, from: Vec2, to: Vec2) -> bool {
    use VertexType::*;

    let (x0, y0, x1, y1) = (from.x, from.y, to.x, to.y);
    match (prev, kind) {
        // convex corners
        (TopLeft, TopRight) => x0 > x1 && y0 < y1,
        (TopRight, BottomRight) => x0 > x1 && y0 > y1,
        (BottomRight, BottomLeft) => x0 < x1 && y0 > y1,
        (BottomLeft, TopLeft) => x0 < x1 && y0 < y1,
        // concave corners
        (TopRight, TopLeft) => x0 > x1 || y0 < y1,
        (BottomRight, TopRight) => x0 > x1 || y0 > y1,
        (BottomLeft, BottomRight) => x0 < x1 || y0 > y1,
        (TopLeft, BottomLeft) => x0 < x1 || y0 < y1,
        _ => false,
    }
}

impl Obstacles {
    /// Next point an actor at `from` should walk to on its way to `to`.
    ///
    /// Never fails hard: when no path point is reachable the actor is told to stay at `from`.
    pub fn find_next_waypoint(
        &mut self,
        from: Vec3,
        to: Vec3,
        area: &dyn WalkableArea,
    ) -> Waypoint {
        self.path.clear();

        let mut ctx = SearchContext::new(self.polygons.len());
        let target = to.xz();
        let mut current = from.xz();

        loop {
            let Some(blocker) = self.find_blocking_polygon(current, target, &ctx.visited) else {
                self.push_path(&[target]);
                break;
            };
            ctx.visited[blocker.index] = true;
            ctx.depth += 1;

            let pushed = if blocker.near.distance == 0.0 && blocker.far.distance == 0.0 {
                // Only touching the polygon at the current point.
                self.push_path(&[blocker.near.position])
            } else {
                let detour = self.choose_detour(&blocker, area);
                self.push_path(&detour.points)
            };
            if !pushed {
                break;
            }

            match self.path.last() {
                Some(&last) => current = last,
                None => break,
            }
        }

        let waypoint = self.find_farthest_available_path_vertex(from, area);
        tracing::debug!(
            ?from,
            ?to,
            next = ?waypoint.position,
            success = waypoint.success,
            detours = ctx.depth,
            path_len = self.path.len(),
            "waypoint search"
        );
        waypoint
    }

    fn push_path(&mut self, points: &[Vec2]) -> bool {
        if self.path.len() + points.len() > self.config.path_capacity {
            tracing::warn!(
                capacity = self.config.path_capacity,
                len = self.path.len(),
                extra = points.len(),
                "waypoint path buffer full"
            );
            return false;
        }
        self.path.extend_from_slice(points);
        true
    }

    /// Unvisited polygon whose nearest crossing with `from -> to` is closest to `from`.
    fn find_blocking_polygon(&self, from: Vec2, to: Vec2, visited: &[bool]) -> Option<Blocker> {
        let mut best: Option<Blocker> = None;
        for (index, poly) in self.polygons.iter().enumerate() {
            let Some(poly) = poly else {
                continue;
            };
            if visited[index] {
                continue;
            }
            let Some(near) = find_intersection_nearest(poly, from, to) else {
                continue;
            };
            let Some(far) = find_intersection_farthest(poly, from, to) else {
                continue;
            };
            if best.map_or(true, |b| near.distance < b.near.distance) {
                best = Some(Blocker { index, near, far });
            }
        }
        best
    }

    fn choose_detour(&self, blocker: &Blocker, area: &dyn WalkableArea) -> Detour {
        let Some(poly) = self.polygons[blocker.index].as_ref() else {
            return Detour::default();
        };
        let negative = build_negative_path(poly, &blocker.near, &blocker.far, area);
        let positive = build_positive_path(poly, &blocker.near, &blocker.far, area);

        let negative_length = negative.length();
        let positive_length = positive.length();

        let use_negative = match (negative.blocked, positive.blocked) {
            (true, false) => false,
            (false, true) => true,
            _ => negative_length <= positive_length,
        };

        tracing::trace!(
            polygon = blocker.index,
            negative_length,
            negative_blocked = negative.blocked,
            positive_length,
            positive_blocked = positive.blocked,
            use_negative,
            "detour around obstacle"
        );

        if use_negative {
            negative
        } else {
            positive
        }
    }

    fn vertex_index_within_tolerance(&self, p: Vec2) -> Option<(usize, usize)> {
        self.find_polygon_vertex_within_tolerance(p.x, p.y)
            .map(|(id, vertex)| (id.index(), vertex))
    }

    /// Farthest assembled path point with an unobstructed line from `from`.
    fn find_farthest_available_path_vertex(
        &self,
        from: Vec3,
        area: &dyn WalkableArea,
    ) -> Waypoint {
        if self.path.is_empty() {
            return Waypoint::stay(from);
        }

        let origin = from.xz();
        let origin_vertex = self.vertex_index_within_tolerance(origin);
        let origin_turn = origin_vertex.and_then(|(p, v)| {
            self.polygons[p]
                .as_ref()
                .map(|poly| (poly.kind(poly.prev_index(v)), poly.kind(v)))
        });

        let farthest = self
            .path
            .iter()
            .rposition(|&target| self.is_visible(origin, target, origin_vertex, origin_turn));

        let Some(index) = farthest else {
            tracing::debug!(?from, "no path point visible from origin");
            return Waypoint::stay(from);
        };

        let p = self.path[index];
        match area.altitude_at(p.x, p.y) {
            Some(altitude) => Waypoint {
                position: Vec3::new(p.x, altitude, p.y),
                success: true,
            },
            None => {
                tracing::warn!(x = p.x, z = p.y, "waypoint is off the walkable area");
                Waypoint {
                    position: Vec3::new(p.x, from.y, p.y),
                    success: false,
                }
            }
        }
    }

    fn is_visible(
        &self,
        origin: Vec2,
        target: Vec2,
        origin_vertex: Option<(usize, usize)>,
        origin_turn: Option<(VertexType, VertexType)>,
    ) -> bool {
        let target_vertex = self.vertex_index_within_tolerance(target);
        let origin_polygon = origin_vertex.map(|(p, _)| p);

        for (pi, poly) in self.polygons.iter().enumerate() {
            let Some(poly) = poly else {
                continue;
            };

            for j in 0..poly.len() {
                let (a, b) = poly.edge(j);
                let Some(hit) = line_intersection(origin, target, a, b) else {
                    continue;
                };

                // A proper crossing away from both ends and from the edge's corners blocks.
                if !(points_within_tolerance(hit, origin)
                    || points_within_tolerance(hit, target)
                    || points_within_tolerance(hit, a)
                    || points_within_tolerance(hit, b))
                {
                    return false;
                }

                if let Some((hit_polygon, hit_vertex)) = self.vertex_index_within_tolerance(hit) {
                    if let Some((prev, kind)) = origin_turn {
                        if vertices_can_intersect(prev, kind, origin, target) {
                            return false;
                        }
                    }

                    if target_vertex == Some((pi, hit_vertex))
                        || origin_vertex == Some((pi, hit_vertex))
                    {
                        continue;
                    }

                    let Some(corner) = self.polygons[hit_polygon].as_ref() else {
                        continue;
                    };
                    let prev = corner.prev_index(hit_vertex);
                    if vertices_can_intersect(corner.kind(prev), corner.kind(hit_vertex), hit, target)
                    {
                        return false;
                    }
                } else {
                    let at_origin = points_within_tolerance(hit, origin);
                    if origin_polygon == Some(pi) || at_origin {
                        if origin_vertex.is_some() || !at_origin {
                            return false;
                        }

                        let leaves_inward = match poly.kind(j) {
                            VertexType::TopLeft => hit.y < target.y,
                            VertexType::TopRight => hit.x > target.x,
                            VertexType::BottomRight => hit.y > target.y,
                            VertexType::BottomLeft => hit.x < target.x,
                        };
                        if leaves_inward {
                            return false;
                        }
                    }
                }
            }
        }

        true
    }
}
