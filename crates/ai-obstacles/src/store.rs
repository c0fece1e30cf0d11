use crate::intersect::points_within_tolerance;
use crate::merge::{merge_polygons, MergeSide};
use crate::{ObstacleConfig, Polygon, PolygonId, Rect, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Obstacle polygons of the current scene.
///
/// Slots are fixed in number; `None` marks a free slot. The store also owns the backup array
/// used by save games and temporary layouts, and the scratch path of the last waypoint search.
#[derive(Debug, Clone)]
pub struct Obstacles {
    pub(crate) config: ObstacleConfig,
    pub(crate) polygons: Vec<Option<Polygon>>,
    pub(crate) polygons_backup: Vec<Option<Polygon>>,
    pub(crate) path: Vec<Vec2>,
    pub(crate) backup: bool,
    pub(crate) count: usize,
}

/// Value copy of the present polygons, in slot order.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Snapshot {
    pub polygons: Vec<(PolygonId, Polygon)>,
}

impl Default for Obstacles {
    fn default() -> Self {
        Self::new(ObstacleConfig::default())
    }
}

impl Obstacles {
    pub fn new(config: ObstacleConfig) -> Self {
        Self {
            config,
            polygons: vec![None; config.polygon_capacity],
            polygons_backup: vec![None; config.polygon_capacity],
            path: Vec::with_capacity(config.path_capacity),
            backup: false,
            count: 0,
        }
    }

    pub fn config(&self) -> &ObstacleConfig {
        &self.config
    }

    /// Drop every polygon, the path, and the backup state. Called on scene change.
    pub fn clear(&mut self) {
        self.polygons.fill(None);
        self.path.clear();
        self.backup = false;
        self.count = 0;
    }

    pub fn find_empty_polygon(&self) -> Option<PolygonId> {
        self.polygons
            .iter()
            .position(Option::is_none)
            .map(PolygonId::from_index)
    }

    /// Store an obstacle rectangle and merge it with every polygon it overlaps.
    ///
    /// The rectangle is grown by the configured margin first. Returns the slot it was stored in
    /// (it may have been merged into another slot since), or `None` when every slot is taken, in
    /// which case the obstacle is dropped.
    pub fn add(&mut self, mut rect: Rect) -> Option<PolygonId> {
        let Some(id) = self.find_empty_polygon() else {
            tracing::warn!(
                capacity = self.config.polygon_capacity,
                ?rect,
                "no free obstacle slot, dropping obstacle"
            );
            return None;
        };

        rect.expand(self.config.obstacle_margin);
        rect.trunc_2_decimals();
        self.polygons[id.index()] = Some(Polygon::from_rect(rect));

        while self.merge_one_overlap() {}

        Some(id)
    }

    /// Merge the first overlapping pair found. Any merge changes bounding boxes, so callers
    /// rescan from the start after a success.
    fn merge_one_overlap(&mut self) -> bool {
        let n = self.polygons.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let (Some(a), Some(b)) = (&self.polygons[i], &self.polygons[j]) else {
                    continue;
                };
                if a.is_empty() || b.is_empty() || !a.rect.overlaps(&b.rect) {
                    continue;
                }

                let Some(merged) = merge_polygons(a, b, self.config.polygon_vertex_capacity)
                else {
                    continue;
                };

                let (kept, absorbed) = match merged.kept {
                    MergeSide::First => (i, j),
                    MergeSide::Second => (j, i),
                };
                tracing::debug!(
                    kept,
                    absorbed,
                    vertices = merged.polygon.len(),
                    "merged obstacle polygons"
                );
                self.polygons[kept] = Some(merged.polygon);
                self.polygons[absorbed] = None;
                return true;
            }
        }
        false
    }

    pub fn polygon(&self, id: PolygonId) -> Option<&Polygon> {
        self.polygons.get(id.index()).and_then(Option::as_ref)
    }

    /// Present polygons in slot order.
    pub fn polygons(&self) -> impl Iterator<Item = (PolygonId, &Polygon)> + '_ {
        self.polygons
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.as_ref().map(|p| (PolygonId::from_index(i), p)))
    }

    pub fn present_count(&self) -> usize {
        self.polygons.iter().filter(|p| p.is_some()).count()
    }

    /// Points of the last assembled detour path.
    pub fn path(&self) -> &[Vec2] {
        &self.path
    }

    pub fn has_backup(&self) -> bool {
        self.backup
    }

    /// Number of polygons held by the backup array.
    pub fn backup_count(&self) -> usize {
        self.count
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            polygons: self
                .polygons()
                .map(|(id, poly)| (id, poly.clone()))
                .collect(),
        }
    }

    /// Polygon and vertex index of a vertex exactly at `(x, z)`.
    pub fn find_polygon_vertex(&self, x: f32, z: f32) -> Option<(PolygonId, usize)> {
        let target = Vec2::new(x, z);
        self.find_vertex(|p| p == target)
    }

    /// Polygon and vertex index of a vertex within tolerance of `(x, z)`.
    pub fn find_polygon_vertex_within_tolerance(
        &self,
        x: f32,
        z: f32,
    ) -> Option<(PolygonId, usize)> {
        let target = Vec2::new(x, z);
        self.find_vertex(|p| points_within_tolerance(p, target))
    }

    fn find_vertex(&self, matches: impl Fn(Vec2) -> bool) -> Option<(PolygonId, usize)> {
        self.polygons().find_map(|(id, poly)| {
            poly.vertices
                .iter()
                .position(|v| matches(v.position))
                .map(|j| (id, j))
        })
    }

    /// Move the present polygons, compacted, into the backup array.
    ///
    /// The live store is left empty: every slot receives the absent backup entry that follows
    /// the copied polygons. This matches the layout existing save games were written with.
    pub fn backup(&mut self) {
        self.polygons_backup.fill(None);

        let mut count = 0;
        for poly in self.polygons.iter().flatten() {
            self.polygons_backup[count] = Some(poly.clone());
            count += 1;
        }

        let filler = self.polygons_backup.get(count).cloned().flatten();
        self.polygons.fill(filler);

        tracing::debug!(count, "backed up obstacle polygons");
        self.count = count;
        self.backup = true;
    }

    /// Replace the live polygons with the backup array.
    pub fn restore(&mut self) {
        self.polygons.clone_from(&self.polygons_backup);
    }
}
