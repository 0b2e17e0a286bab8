use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::error::{ObjError, Result};
use crate::model::{Model, Polygon};

fn check_polygon(polygon: &Polygon, ordinal: usize) -> Result<()> {
    let corners = polygon.vertex_indices.len();

    if corners < 3 {
        return Err(ObjError::invalid_argument(format!(
            "polygon {} has {} vertices, at least 3 are required",
            ordinal, corners
        )));
    }

    let optional = [
        ("texture vertex", polygon.texture_vertex_indices.as_ref()),
        ("normal", polygon.normal_indices.as_ref()),
    ];
    for (name, indices) in optional.iter() {
        if let Some(indices) = indices {
            if indices.len() != corners {
                return Err(ObjError::invalid_argument(format!(
                    "polygon {} has {} vertex indices but {} {} indices",
                    ordinal,
                    corners,
                    indices.len(),
                    name
                )));
            }
        }
    }

    Ok(())
}

/// Rejects hand-built models the reader could never have produced.
/// An empty model is valid.
fn check_model(model: &Model) -> Result<()> {
    for (ordinal, polygon) in model.polygons.iter().enumerate() {
        check_polygon(polygon, ordinal)?;
    }

    match model.validate_indices() {
        Some(fault) => Err(ObjError::invalid_argument(fault.to_string())),
        None => Ok(()),
    }
}

fn face_line(polygon: &Polygon) -> String {
    let mut line = String::from("f");
    let v = &polygon.vertex_indices;

    match (&polygon.texture_vertex_indices, &polygon.normal_indices) {
        (None, None) => {
            for i in v {
                let _ = write!(line, " {}", i + 1);
            }
        }
        (Some(vt), None) => {
            for (i, t) in v.iter().zip(vt) {
                let _ = write!(line, " {}/{}", i + 1, t + 1);
            }
        }
        (None, Some(vn)) => {
            for (i, n) in v.iter().zip(vn) {
                let _ = write!(line, " {}//{}", i + 1, n + 1);
            }
        }
        (Some(vt), Some(vn)) => {
            for ((i, t), n) in v.iter().zip(vt).zip(vn) {
                let _ = write!(line, " {}/{}/{}", i + 1, t + 1, n + 1);
            }
        }
    }

    line
}

fn render(model: &Model) -> String {
    let mut output = String::new();

    for v in &model.vertices {
        let _ = writeln!(output, "v {:?} {:?} {:?}", v.x, v.y, v.z);
    }

    for vt in &model.texture_vertices {
        let _ = writeln!(output, "vt {:?} {:?}", vt.x, vt.y);
    }

    for vn in &model.normals {
        let _ = writeln!(output, "vn {:?} {:?} {:?}", vn.x, vn.y, vn.z);
    }

    for polygon in &model.polygons {
        output.push_str(&face_line(polygon));
        output.push('\n');
    }

    output
}

fn require_model(model: Option<&Model>) -> Result<&Model> {
    model.ok_or_else(|| ObjError::invalid_argument("model must not be absent"))
}

/// Serializes a model to OBJ text. `None` stands for "no model loaded" and
/// is rejected.
///
/// Polygons whose texture or normal list is shorter than the vertex list
/// are rejected with `InvalidArgument`. The reader produces such polygons
/// from face records that mix element shapes (`f 1/1 2 3`), so those
/// documents parse but cannot be written back.
pub fn serialize_obj(model: Option<&Model>) -> Result<String> {
    let model = require_model(model)?;
    if model.is_empty() {
        return Ok(String::new());
    }
    check_model(model)?;

    Ok(render(model))
}

/// Writes a model to any byte sink. Shared by the file entry point.
pub fn write_obj<W: Write>(model: &Model, out: &mut W) -> Result<()> {
    check_model(model)?;

    out.write_all(render(model).as_bytes())
        .map_err(|e| ObjError::io("cannot write OBJ data", e))
}

/// Writes a model to `path`, creating or truncating the file.
///
/// Arguments are checked before anything touches the filesystem.
pub fn write_obj_file<P: AsRef<Path>>(model: Option<&Model>, path: Option<P>) -> Result<()> {
    let model = require_model(model)?;
    let path = match path {
        Some(ref path) => path.as_ref(),
        None => return Err(ObjError::invalid_argument("path must not be absent")),
    };
    let blank = path.as_os_str().is_empty()
        || path.to_str().map_or(false, |s| s.trim().is_empty());
    if blank {
        return Err(ObjError::invalid_argument("path must not be blank"));
    }
    check_model(model)?;

    let text = render(model);
    let file = File::create(path)
        .map_err(|e| ObjError::io(format!("cannot create {}", path.display()), e))?;
    let mut w = BufWriter::new(file);
    w.write_all(text.as_bytes())
        .and_then(|_| w.flush())
        .map_err(|e| ObjError::io(format!("cannot write {}", path.display()), e))?;

    debug!(path = %path.display(), bytes = text.len(), "wrote OBJ file");
    Ok(())
}
