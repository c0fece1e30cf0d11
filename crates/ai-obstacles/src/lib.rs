//! Obstacle avoidance geometry for walking actors.
//!
//! Rectangular obstacles are grown by the actor's collision margin, merged into orthogonal
//! polygons, and queried once per movement tick for the next waypoint toward a destination.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod config;
pub mod debug;
pub mod error;
pub mod intersect;
pub mod math;
pub mod merge;
pub mod persist;
pub mod polygon;
pub mod rect;
pub mod store;
pub mod walkbox;
pub mod waypoint;

pub use config::ObstacleConfig;
pub use debug::DebugRenderer;
pub use error::{ObstacleError, Result};
pub use intersect::{within_tolerance, TOLERANCE};
pub use math::{Vec2, Vec3};
pub use persist::{SaveFileReader, SaveFileWriter, SaveReader, SaveWriter};
pub use polygon::{Polygon, PolygonId, Vertex, VertexType};
pub use rect::Rect;
pub use store::{Obstacles, Snapshot};
pub use walkbox::{RectWalkboxes, WalkableArea, Walkbox, WalkboxId};
pub use waypoint::Waypoint;
