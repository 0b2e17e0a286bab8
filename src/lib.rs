//! Reader and writer for the `v`/`vt`/`vn`/`f` subset of Wavefront OBJ.
//!
//! ```no_run
//! let model = objmesh::read_obj_file("cube.obj")?;
//! let text = objmesh::serialize_obj(Some(&model))?;
//! # Ok::<(), objmesh::ObjError>(())
//! ```

mod error;
mod obj;
mod writer;
pub mod model;

pub use self::error::{ObjError, Result};
pub use self::model::{IndexFault, IndexKind, Model, Polygon};
pub use self::obj::{parse_obj, read_obj_file};
pub use self::writer::{serialize_obj, write_obj, write_obj_file};
