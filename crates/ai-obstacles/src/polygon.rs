use crate::{ObstacleError, Rect, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Corner role a vertex played in the rectangle it came from.
///
/// The tag survives merges and drives both the merge crossing rules and the visibility turn test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VertexType {
    BottomLeft,
    TopLeft,
    TopRight,
    BottomRight,
}

impl VertexType {
    /// Save-file encoding.
    pub fn to_i32(self) -> i32 {
        match self {
            VertexType::BottomLeft => 0,
            VertexType::TopLeft => 1,
            VertexType::TopRight => 2,
            VertexType::BottomRight => 3,
        }
    }
}

impl TryFrom<i32> for VertexType {
    type Error = ObstacleError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(VertexType::BottomLeft),
            1 => Ok(VertexType::TopLeft),
            2 => Ok(VertexType::TopRight),
            3 => Ok(VertexType::BottomRight),
            other => Err(ObstacleError::InvalidVertexType(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    pub position: Vec2,
    pub kind: VertexType,
}

impl Vertex {
    pub const fn new(position: Vec2, kind: VertexType) -> Self {
        Self { position, kind }
    }
}

/// Slot index into the obstacle store.
///
/// Stable for as long as the polygon is present; a merge keeps one of the two input slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PolygonId(pub u32);

impl PolygonId {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }
}

/// Orthogonal obstacle outline, listed clockwise.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Polygon {
    /// Bounding box.
    pub rect: Rect,
    pub vertices: Vec<Vertex>,
}

impl Polygon {
    /// Four-corner outline starting at `(x0, y0)`.
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            rect,
            vertices: vec![
                Vertex::new(Vec2::new(rect.x0, rect.y0), VertexType::TopLeft),
                Vertex::new(Vec2::new(rect.x1, rect.y0), VertexType::TopRight),
                Vertex::new(Vec2::new(rect.x1, rect.y1), VertexType::BottomRight),
                Vertex::new(Vec2::new(rect.x0, rect.y1), VertexType::BottomLeft),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn position(&self, index: usize) -> Vec2 {
        self.vertices[index].position
    }

    pub fn kind(&self, index: usize) -> VertexType {
        self.vertices[index].kind
    }

    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.vertices.len()
    }

    pub fn prev_index(&self, index: usize) -> usize {
        (index + self.vertices.len() - 1) % self.vertices.len()
    }

    /// Edge `index` runs from vertex `index` to the following vertex.
    pub fn edge(&self, index: usize) -> (Vec2, Vec2) {
        (self.position(index), self.position(self.next_index(index)))
    }

    pub fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        (0..self.vertices.len()).map(move |i| self.edge(i))
    }
}
