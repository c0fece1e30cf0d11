use crate::Rect;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier of a walkable floor region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WalkboxId(pub u32);

/// Floor-plan lookups the waypoint search depends on.
pub trait WalkableArea {
    /// Region containing `(x, z)`, or `None` when the point is off the floor.
    fn find_walkbox(&self, x: f32, z: f32) -> Option<WalkboxId>;

    /// Floor altitude at `(x, z)`, or `None` when the point is off the floor.
    fn altitude_at(&self, x: f32, z: f32) -> Option<f32>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Walkbox {
    pub rect: Rect,
    pub altitude: f32,
}

/// Floor made of axis-aligned rectangles, each at a constant altitude.
///
/// Overlapping boxes resolve to the first one listed.
#[derive(Debug, Clone, Default)]
pub struct RectWalkboxes {
    boxes: Vec<Walkbox>,
}

impl RectWalkboxes {
    pub fn new(boxes: Vec<Walkbox>) -> Self {
        Self { boxes }
    }

    /// Single flat floor covering `rect`.
    pub fn flat(rect: Rect, altitude: f32) -> Self {
        Self::new(vec![Walkbox { rect, altitude }])
    }

    pub fn boxes(&self) -> &[Walkbox] {
        &self.boxes
    }

    fn find(&self, x: f32, z: f32) -> Option<(usize, &Walkbox)> {
        self.boxes
            .iter()
            .enumerate()
            .find(|(_, b)| b.rect.contains(x, z))
    }
}

impl WalkableArea for RectWalkboxes {
    fn find_walkbox(&self, x: f32, z: f32) -> Option<WalkboxId> {
        self.find(x, z).map(|(i, _)| WalkboxId(i as u32))
    }

    fn altitude_at(&self, x: f32, z: f32) -> Option<f32> {
        self.find(x, z).map(|(_, b)| b.altitude)
    }
}
