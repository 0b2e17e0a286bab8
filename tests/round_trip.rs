use std::fs;

use glam::Vec3;
use objmesh::{parse_obj, read_obj_file, serialize_obj, write_obj_file, Model, ObjError, Polygon};
use proptest::prelude::*;

fn normals_triangle() -> Model {
    Model {
        vertices: vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ],
        texture_vertices: Vec::new(),
        normals: vec![Vec3::Z, Vec3::Z, Vec3::Z],
        polygons: vec![Polygon::new(vec![0, 1, 2]).with_normal_indices(vec![0, 1, 2])],
    }
}

#[test]
fn test_normals_only_face_round_trips() {
    let model = normals_triangle();

    let text = serialize_obj(Some(&model)).unwrap();
    assert!(text.lines().any(|line| line == "f 1//1 2//2 3//3"));

    let parsed = parse_obj(&text).unwrap();
    assert_eq!(parsed.vertices, model.vertices);
    assert_eq!(parsed.normals, model.normals);
    assert_eq!(parsed.polygons[0].vertex_indices, vec![0, 1, 2]);
    assert_eq!(parsed.polygons[0].texture_vertex_indices, None);
    assert_eq!(parsed.polygons[0].normal_indices, Some(vec![0, 1, 2]));
}

#[test]
fn test_cube_is_idempotent() {
    let first = parse_obj(include_str!("../assets/cube.obj")).unwrap();
    let second = parse_obj(&serialize_obj(Some(&first)).unwrap()).unwrap();

    assert_eq!(first, second);
    assert_eq!(second.polygons[0].line, 19);
}

// Faces mixing element shapes parse, but their partial attribute lists
// cannot be written back.
#[test]
fn test_mixed_face_is_not_serializable() {
    let model = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nf 1/1 2 3\n").unwrap();
    assert_eq!(model.polygons[0].texture_vertex_indices, Some(vec![0]));

    let err = serialize_obj(Some(&model)).unwrap_err();
    assert!(matches!(err, ObjError::InvalidArgument { .. }));
}

#[test]
fn test_write_and_read_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("triangle.obj");
    let model = normals_triangle();

    write_obj_file(Some(&model), Some(&path)).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text, serialize_obj(Some(&model)).unwrap());

    let loaded = read_obj_file(&path).unwrap();
    assert_eq!(loaded.vertices, model.vertices);
    assert_eq!(loaded.polygons[0].normal_indices, Some(vec![0, 1, 2]));
}

#[test]
fn test_read_missing_file() {
    let dir = tempfile::tempdir().unwrap();

    let err = read_obj_file(dir.path().join("missing.obj")).unwrap_err();
    assert!(matches!(err, ObjError::Io { .. }));
}

#[test]
fn test_write_into_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no").join("such").join("dir.obj");

    let err = write_obj_file(Some(&normals_triangle()), Some(&path)).unwrap_err();
    assert!(matches!(err, ObjError::Io { .. }));
}

#[test]
fn test_invalid_model_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.obj");
    let mut model = normals_triangle();
    model.polygons[0].vertex_indices[2] = 9;

    let err = write_obj_file(Some(&model), Some(&path)).unwrap_err();
    assert!(matches!(err, ObjError::InvalidArgument { .. }));
    assert!(!path.exists());
}

fn finite() -> impl Strategy<Value = f32> {
    any::<f32>().prop_filter("finite", |f| f.is_finite())
}

fn face_record() -> impl Strategy<Value = String> {
    // vertex count, with textures, with normals
    (3usize..6, any::<bool>(), any::<bool>(), prop::collection::vec(1usize..=4, 5)).prop_map(
        |(corners, textured, with_normals, indices)| {
            let mut line = String::from("f");
            for &i in indices.iter().take(corners) {
                line.push(' ');
                line.push_str(&match (textured, with_normals) {
                    (false, false) => format!("{}", i),
                    (true, false) => format!("{}/{}", i, i),
                    (false, true) => format!("{}//{}", i, i),
                    (true, true) => format!("{}/{}/{}", i, i, i),
                });
            }
            line
        },
    )
}

proptest! {
    #[test]
    fn prop_vertex_floats_parse_exactly(x in finite(), y in finite(), z in finite()) {
        let text = format!("v {:?} {:?} {:?}\nf 1 1 1\n", x, y, z);
        let model = parse_obj(&text).unwrap();
        prop_assert_eq!(model.vertices[0], Vec3::new(x, y, z));
    }

    #[test]
    fn prop_parse_serialize_is_idempotent(
        coords in prop::collection::vec(finite(), 12),
        faces in prop::collection::vec(face_record(), 1..5),
    ) {
        let mut text = String::new();
        for v in coords.chunks(3) {
            text.push_str(&format!("v {:?} {:?} {:?}\n", v[0], v[1], v[2]));
            text.push_str(&format!("vt {:?} {:?}\n", v[0], v[1]));
            text.push_str(&format!("vn {:?} {:?} {:?}\n", v[0], v[1], v[2]));
        }
        for face in &faces {
            text.push_str(face);
            text.push('\n');
        }

        let first = parse_obj(&text).unwrap();
        let second = parse_obj(&serialize_obj(Some(&first)).unwrap()).unwrap();

        prop_assert_eq!(first, second);
    }
}
