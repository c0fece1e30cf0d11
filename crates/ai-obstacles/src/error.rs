use thiserror::Error;

/// Errors surfaced by the obstacle store.
///
/// Geometry queries never fail; only save-game I/O does.
#[derive(Debug, Error)]
pub enum ObstacleError {
    #[error("save stream I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("backup holds {count} polygons, capacity is {capacity}")]
    BackupCount { count: i32, capacity: usize },

    #[error("polygon {index} has {count} vertices, capacity is {capacity}")]
    VertexCount {
        index: usize,
        count: i32,
        capacity: usize,
    },

    #[error("path holds {size} points, capacity is {capacity}")]
    PathSize { size: i32, capacity: usize },

    #[error("unknown vertex type {0}")]
    InvalidVertexType(i32),
}

pub type Result<T> = std::result::Result<T, ObstacleError>;
