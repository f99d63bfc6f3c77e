//! Wavefront OBJ/MTL scene loading.
//!
//! One synchronous parse pass turns a mesh file plus its material
//! libraries into a [`Scene`]: a deduplicated vertex buffer, per-group
//! triangle-index lists and a named material table, ready for GPU upload
//! by whatever renders it.

pub mod error;
pub mod material;
pub mod mesh;
pub mod obj;
mod tokenizer;

pub use error::{Attribute, SceneError, SceneResult};
pub use material::{Material, load_material_lib_from_path, load_material_lib_from_str};
pub use mesh::{Group, MeshVertex, Scene};
pub use obj::{load_scene_from_path, load_scene_from_str};
