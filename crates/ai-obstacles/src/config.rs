#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Capacities and collision margin of an obstacle store.
///
/// The capacities are part of the save format: a snapshot can only be loaded by a store built
/// with the same values.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ObstacleConfig {
    /// Number of polygon slots.
    pub polygon_capacity: usize,
    /// Maximum vertices of a single (merged) polygon.
    pub polygon_vertex_capacity: usize,
    /// Maximum points in the assembled detour path.
    pub path_capacity: usize,
    /// Distance every obstacle rectangle is grown by before it is stored.
    pub obstacle_margin: f32,
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            polygon_capacity: 100,
            polygon_vertex_capacity: 160,
            path_capacity: 150,
            obstacle_margin: 12.0,
        }
    }
}
