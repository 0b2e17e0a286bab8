use std::convert::TryFrom;
use std::fs;
use std::path::Path;

use glam::{Vec2, Vec3};
use nom::character::complete::i64 as integer;
use nom::combinator::all_consuming;
use nom::number::complete::float;
use nom::IResult;
use tracing::{debug, trace, warn};

use crate::error::{ObjError, Result};
use crate::model::{IndexKind, Model, Polygon};

const VERTEX_TOKEN: &str = "v";
const TEXTURE_TOKEN: &str = "vt";
const NORMAL_TOKEN: &str = "vn";
const FACE_TOKEN: &str = "f";

/*
    Basic Parsers
*/

fn float_value(input: &str) -> IResult<&str, f32> {
    all_consuming(float)(input)
}

fn index_value(input: &str) -> IResult<&str, i64> {
    all_consuming(integer)(input)
}

fn float_field(field: &str, line: usize) -> Result<f32> {
    float_value(field)
        .map(|(_, value)| value)
        .map_err(|_| ObjError::format(line, "failed to parse float value"))
}

/// Parses a 1-based index sub-field and returns it 0-based.
fn index_field(field: &str, kind: IndexKind, line: usize) -> Result<usize> {
    let (_, value) =
        index_value(field).map_err(|_| ObjError::format(line, "failed to parse int value"))?;

    if value < 1 {
        return Err(ObjError::format(
            line,
            format!("{} index must be >= 1", kind),
        ));
    }

    usize::try_from(value - 1).map_err(|_| ObjError::format(line, "failed to parse int value"))
}

fn optional_index_field(field: &str, kind: IndexKind, line: usize) -> Result<Option<usize>> {
    if field.is_empty() {
        Ok(None)
    } else {
        index_field(field, kind, line).map(Some)
    }
}

/*
    Vertex
*/

fn parse_vertex(fields: &[&str], line: usize) -> Result<Vec3> {
    if fields.len() != 3 {
        return Err(ObjError::format(line, "wrong number of vertex fields"));
    }

    Ok(Vec3::new(
        float_field(fields[0], line)?,
        float_field(fields[1], line)?,
        float_field(fields[2], line)?,
    ))
}

/*
    Texture Coordinates
*/

fn parse_texture_vertex(fields: &[&str], line: usize) -> Result<Vec2> {
    if fields.len() != 2 {
        return Err(ObjError::format(line, "wrong number of texture vertex fields"));
    }

    Ok(Vec2::new(
        float_field(fields[0], line)?,
        float_field(fields[1], line)?,
    ))
}

/*
    Vertex Normals
*/

fn parse_normal(fields: &[&str], line: usize) -> Result<Vec3> {
    if fields.len() != 3 {
        return Err(ObjError::format(line, "wrong number of normal fields"));
    }

    Ok(Vec3::new(
        float_field(fields[0], line)?,
        float_field(fields[1], line)?,
        float_field(fields[2], line)?,
    ))
}

/*
    Face
*/

#[derive(Debug, PartialEq)]
struct FaceElement {
    vertex: usize,
    texture: Option<usize>,
    normal: Option<usize>,
}

// v | v/vt | v/vt/vn | v//vn
fn parse_face_element(word: &str, line: usize) -> Result<FaceElement> {
    let parts: Vec<&str> = word.split('/').collect();

    match parts.as_slice() {
        [v] => Ok(FaceElement {
            vertex: index_field(v, IndexKind::Vertex, line)?,
            texture: None,
            normal: None,
        }),
        [v, vt] => Ok(FaceElement {
            vertex: index_field(v, IndexKind::Vertex, line)?,
            texture: Some(index_field(vt, IndexKind::Texture, line)?),
            normal: None,
        }),
        [v, vt, vn] => Ok(FaceElement {
            vertex: index_field(v, IndexKind::Vertex, line)?,
            texture: optional_index_field(vt, IndexKind::Texture, line)?,
            normal: optional_index_field(vn, IndexKind::Normal, line)?,
        }),
        _ => Err(ObjError::format(line, "invalid face-element size")),
    }
}

/// Elements are parsed independently, so one record may mix element
/// shapes. Texture and normal indices are kept only from the elements that
/// supplied them.
fn parse_face(fields: &[&str], line: usize) -> Result<Polygon> {
    let mut vertex_indices = Vec::with_capacity(fields.len());
    let mut texture_indices = Vec::new();
    let mut normal_indices = Vec::new();

    for word in fields {
        let element = parse_face_element(word, line)?;
        vertex_indices.push(element.vertex);
        texture_indices.extend(element.texture);
        normal_indices.extend(element.normal);
    }

    if vertex_indices.len() < 3 {
        return Err(ObjError::format(
            line,
            "polygon must have at least 3 vertices",
        ));
    }

    Ok(Polygon {
        vertex_indices,
        texture_vertex_indices: Some(texture_indices).filter(|i| !i.is_empty()),
        normal_indices: Some(normal_indices).filter(|i| !i.is_empty()),
        line,
    })
}

/*
    Document
*/

fn check_model(model: &Model) -> Result<()> {
    if model.vertices.is_empty() {
        return Err(ObjError::format(0, "file contains no vertices"));
    }

    if model.polygons.is_empty() {
        return Err(ObjError::format(0, "file contains no polygons"));
    }

    match model.validate_indices() {
        Some(fault) => Err(ObjError::format(fault.line, fault.to_string())),
        None => Ok(()),
    }
}

fn read_model(data: &str) -> Result<Model> {
    let mut model = Model::new();

    // Only recognized records advance the line number reported in errors.
    let mut line = 0;

    for (physical, raw) in data.lines().enumerate() {
        let mut words = raw.split_whitespace();
        let token = match words.next() {
            Some(token) => token,
            None => continue,
        };
        let fields: Vec<&str> = words.collect();

        match token {
            VERTEX_TOKEN => {
                line += 1;
                model.vertices.push(parse_vertex(&fields, line)?);
            }
            TEXTURE_TOKEN => {
                line += 1;
                model.texture_vertices.push(parse_texture_vertex(&fields, line)?);
            }
            NORMAL_TOKEN => {
                line += 1;
                model.normals.push(parse_normal(&fields, line)?);
            }
            FACE_TOKEN => {
                line += 1;
                model.polygons.push(parse_face(&fields, line)?);
            }
            _ => {
                trace!(record = token, line = physical + 1, "ignoring unsupported record");
            }
        }
    }

    check_model(&model)?;
    Ok(model)
}

/// Parses a complete OBJ document held in memory.
///
/// Stops at the first malformed record. No partial model is returned.
pub fn parse_obj(data: &str) -> Result<Model> {
    let model = read_model(data).map_err(|err| {
        warn!(error = %err, "rejected OBJ document");
        err
    })?;

    debug!(
        vertices = model.vertices.len(),
        texture_vertices = model.texture_vertices.len(),
        normals = model.normals.len(),
        polygons = model.polygons.len(),
        "parsed OBJ document"
    );

    Ok(model)
}

/// Reads the whole file into memory, then parses it with [`parse_obj`].
pub fn read_obj_file<P: AsRef<Path>>(path: P) -> Result<Model> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)
        .map_err(|e| ObjError::io(format!("cannot read {}", path.display()), e))?;

    parse_obj(&data)
}
