use std::fmt;

use glam::{Vec2, Vec3};

#[derive(Debug, Clone, Default)]
pub struct Polygon {
    pub vertex_indices: Vec<usize>,
    pub texture_vertex_indices: Option<Vec<usize>>,
    pub normal_indices: Option<Vec<usize>>,
    /// Record line the polygon was read from. Diagnostics only.
    pub line: usize,
}

impl Polygon {
    pub fn new(vertex_indices: Vec<usize>) -> Self {
        Polygon {
            vertex_indices,
            ..Default::default()
        }
    }

    pub fn with_texture_indices(mut self, indices: Vec<usize>) -> Self {
        self.texture_vertex_indices = Some(indices);
        self
    }

    pub fn with_normal_indices(mut self, indices: Vec<usize>) -> Self {
        self.normal_indices = Some(indices);
        self
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }
}

// `line` is not part of a polygon's identity.
impl PartialEq for Polygon {
    fn eq(&self, other: &Self) -> bool {
        self.vertex_indices == other.vertex_indices
            && self.texture_vertex_indices == other.texture_vertex_indices
            && self.normal_indices == other.normal_indices
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    pub vertices: Vec<Vec3>,
    pub texture_vertices: Vec<Vec2>,
    pub normals: Vec<Vec3>,
    pub polygons: Vec<Polygon>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Vertex,
    Texture,
    Normal,
}

impl IndexKind {
    fn plural(self) -> &'static str {
        match self {
            IndexKind::Vertex => "vertices",
            IndexKind::Texture => "texture vertices",
            IndexKind::Normal => "normals",
        }
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            IndexKind::Vertex => "vertex",
            IndexKind::Texture => "texture",
            IndexKind::Normal => "normal",
        };
        f.write_str(name)
    }
}

/// A polygon index pointing past the end of the list it refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexFault {
    pub kind: IndexKind,
    /// 0-based, as stored.
    pub index: usize,
    pub line: usize,
}

impl fmt::Display for IndexFault {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} index {} exceeds the number of {} in the file (polygon on line {})",
            self.kind,
            self.index + 1,
            self.kind.plural(),
            self.line
        )
    }
}

impl Model {
    pub fn new() -> Self {
        Model::default()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
            && self.texture_vertices.is_empty()
            && self.normals.is_empty()
            && self.polygons.is_empty()
    }

    /// First out-of-range reference, scanning polygons in order and, within
    /// a polygon, vertices before texture vertices before normals.
    pub fn validate_indices(&self) -> Option<IndexFault> {
        for polygon in &self.polygons {
            let lists = [
                (IndexKind::Vertex, Some(&polygon.vertex_indices), self.vertices.len()),
                (
                    IndexKind::Texture,
                    polygon.texture_vertex_indices.as_ref(),
                    self.texture_vertices.len(),
                ),
                (IndexKind::Normal, polygon.normal_indices.as_ref(), self.normals.len()),
            ];

            for (kind, indices, len) in lists.iter() {
                let indices = match indices {
                    Some(indices) => indices,
                    None => continue,
                };
                if let Some(&index) = indices.iter().find(|&&i| i >= *len) {
                    return Some(IndexFault {
                        kind: *kind,
                        index,
                        line: polygon.line,
                    });
                }
            }
        }
        None
    }
}
