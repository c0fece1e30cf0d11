//! Save-game persistence of the obstacle backup and the last path.
//!
//! Field order is the wire format:
//!
//! ```text
//! bool  backup flag
//! int   backed-up polygon count
//! per backed-up polygon:
//!   bool   present
//!   int    vertex count
//!   float  rect x0, y0, x1, y1
//!   vec2   vertices          (polygon vertex capacity entries, zero padded)
//!   int    vertex types      (polygon vertex capacity entries, zero padded)
//! vec2  path points          (path capacity entries, zero padded)
//! int   path size
//! ```

use std::io::{Read, Write};

use crate::{ObstacleError, Obstacles, Polygon, Rect, Result, Vec2, Vertex, VertexType};

pub trait SaveWriter {
    fn write_bool(&mut self, v: bool) -> Result<()>;
    fn write_int(&mut self, v: i32) -> Result<()>;
    fn write_float(&mut self, v: f32) -> Result<()>;

    fn write_vec2(&mut self, v: Vec2) -> Result<()> {
        self.write_float(v.x)?;
        self.write_float(v.y)
    }
}

pub trait SaveReader {
    fn read_bool(&mut self) -> Result<bool>;
    fn read_int(&mut self) -> Result<i32>;
    fn read_float(&mut self) -> Result<f32>;

    fn read_vec2(&mut self) -> Result<Vec2> {
        let x = self.read_float()?;
        let y = self.read_float()?;
        Ok(Vec2::new(x, y))
    }
}

/// Little-endian save stream: bools and ints as 32-bit integers, floats as IEEE-754 singles.
#[derive(Debug)]
pub struct SaveFileWriter<W> {
    inner: W,
}

impl<W: Write> SaveFileWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> SaveWriter for SaveFileWriter<W> {
    fn write_bool(&mut self, v: bool) -> Result<()> {
        self.write_int(i32::from(v))
    }

    fn write_int(&mut self, v: i32) -> Result<()> {
        self.inner.write_all(&v.to_le_bytes())?;
        Ok(())
    }

    fn write_float(&mut self, v: f32) -> Result<()> {
        self.inner.write_all(&v.to_le_bytes())?;
        Ok(())
    }
}

#[derive(Debug)]
pub struct SaveFileReader<R> {
    inner: R,
}

impl<R: Read> SaveFileReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    fn read_word(&mut self) -> Result<[u8; 4]> {
        let mut buf = [0u8; 4];
        self.inner.read_exact(&mut buf)?;
        Ok(buf)
    }
}

impl<R: Read> SaveReader for SaveFileReader<R> {
    fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_int()? != 0)
    }

    fn read_int(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_word()?))
    }

    fn read_float(&mut self) -> Result<f32> {
        Ok(f32::from_le_bytes(self.read_word()?))
    }
}

fn to_count(len: usize) -> i32 {
    i32::try_from(len).unwrap_or(i32::MAX)
}

fn checked_count(value: i32, capacity: usize) -> Option<usize> {
    usize::try_from(value).ok().filter(|&n| n <= capacity)
}

impl Obstacles {
    /// Write the backup array and the path buffer.
    pub fn save(&self, f: &mut impl SaveWriter) -> Result<()> {
        let vertex_capacity = self.config.polygon_vertex_capacity;

        f.write_bool(self.backup)?;
        f.write_int(to_count(self.count))?;
        for slot in &self.polygons_backup[..self.count] {
            let empty = Polygon::default();
            let poly = slot.as_ref().unwrap_or(&empty);

            f.write_bool(slot.is_some())?;
            f.write_int(to_count(poly.len()))?;
            f.write_float(poly.rect.x0)?;
            f.write_float(poly.rect.y0)?;
            f.write_float(poly.rect.x1)?;
            f.write_float(poly.rect.y1)?;
            for j in 0..vertex_capacity {
                let v = poly.vertices.get(j).map_or(Vec2::ZERO, |v| v.position);
                f.write_vec2(v)?;
            }
            for j in 0..vertex_capacity {
                let kind = poly.vertices.get(j).map_or(0, |v| v.kind.to_i32());
                f.write_int(kind)?;
            }
        }

        for i in 0..self.config.path_capacity {
            f.write_vec2(self.path.get(i).copied().unwrap_or(Vec2::ZERO))?;
        }
        f.write_int(to_count(self.path.len()))?;
        Ok(())
    }

    /// Read what [`Obstacles::save`] wrote. The live polygons become a copy of the loaded
    /// backup array.
    ///
    /// The stream is read completely before anything is replaced; on error the store is left
    /// untouched.
    pub fn load(&mut self, f: &mut impl SaveReader) -> Result<()> {
        let capacity = self.config.polygon_capacity;
        let vertex_capacity = self.config.polygon_vertex_capacity;

        let backup = f.read_bool()?;
        let raw_count = f.read_int()?;
        let count = checked_count(raw_count, capacity).ok_or(ObstacleError::BackupCount {
            count: raw_count,
            capacity,
        })?;

        let mut polygons_backup: Vec<Option<Polygon>> = vec![None; capacity];
        for (index, slot) in polygons_backup.iter_mut().take(count).enumerate() {
            let present = f.read_bool()?;
            let raw_vertices = f.read_int()?;
            let vertex_count = checked_count(raw_vertices, vertex_capacity).ok_or(
                ObstacleError::VertexCount {
                    index,
                    count: raw_vertices,
                    capacity: vertex_capacity,
                },
            )?;
            let rect = Rect::new(
                f.read_float()?,
                f.read_float()?,
                f.read_float()?,
                f.read_float()?,
            );

            let mut positions = Vec::with_capacity(vertex_count);
            for j in 0..vertex_capacity {
                let p = f.read_vec2()?;
                if j < vertex_count {
                    positions.push(p);
                }
            }
            let mut vertices = Vec::with_capacity(vertex_count);
            for j in 0..vertex_capacity {
                let raw_kind = f.read_int()?;
                if j < vertex_count {
                    vertices.push(Vertex::new(positions[j], VertexType::try_from(raw_kind)?));
                }
            }

            if present {
                *slot = Some(Polygon { rect, vertices });
            }
        }

        let mut path = Vec::with_capacity(self.config.path_capacity);
        for _ in 0..self.config.path_capacity {
            path.push(f.read_vec2()?);
        }
        let raw_size = f.read_int()?;
        let size = checked_count(raw_size, self.config.path_capacity).ok_or(
            ObstacleError::PathSize {
                size: raw_size,
                capacity: self.config.path_capacity,
            },
        )?;
        path.truncate(size);

        tracing::debug!(backup, count, path_len = size, "loaded obstacle state");

        self.polygons.clone_from(&polygons_backup);
        self.polygons_backup = polygons_backup;
        self.path = path;
        self.backup = backup;
        self.count = count;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_encodes_little_endian_words() {
        let mut w = SaveFileWriter::new(Vec::new());
        w.write_bool(true).expect("write");
        w.write_int(-2).expect("write");
        w.write_float(1.5).expect("write");
        let bytes = w.into_inner();
        assert_eq!(
            bytes,
            vec![1, 0, 0, 0, 0xFE, 0xFF, 0xFF, 0xFF, 0, 0, 0xC0, 0x3F]
        );

        let mut r = SaveFileReader::new(bytes.as_slice());
        assert!(r.read_bool().expect("read"));
        assert_eq!(r.read_int().expect("read"), -2);
        assert_eq!(r.read_float().expect("read"), 1.5);
        assert!(matches!(r.read_int(), Err(ObstacleError::Io(_))));
    }
}
