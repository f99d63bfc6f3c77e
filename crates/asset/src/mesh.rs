//! CPU-side scene representation produced by the loaders.

use std::collections::HashMap;

use crate::material::Material;

/// Vertex with position/normal/uv. Values are in object space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

/// Named run of triangles sharing one material snapshot.
///
/// `indices` is a flattened triangle list into [`Scene::vertices`]; its
/// length is always a multiple of 3. The material is whatever the last
/// `usemtl` before this group was flushed resolved to.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Group {
    pub material: Material,
    pub indices: Vec<u32>,
}

impl Group {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Fully parsed scene: deduplicated vertices plus per-group index lists
/// and the material table collected from `mtllib` directives.
///
/// Vertex order is dedup discovery order; every index stored in every
/// group is a valid slot into `vertices`.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub vertices: Vec<MeshVertex>,
    pub groups: HashMap<String, Group>,
    pub materials: HashMap<String, Material>,
}

impl Scene {
    /// Total triangles across all groups.
    pub fn triangle_count(&self) -> usize {
        self.groups.values().map(Group::triangle_count).sum()
    }

    /// Returns `true` if the scene holds at least one vertex and one triangle.
    pub fn is_valid(&self) -> bool {
        !self.vertices.is_empty() && self.triangle_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_scene_is_not_valid() {
        assert!(!Scene::default().is_valid());
    }

    #[test]
    fn triangle_count_sums_groups() {
        let mut scene = Scene::default();
        scene.vertices.push(MeshVertex::default());
        scene.groups.insert(
            "a".to_string(),
            Group {
                material: Material::default(),
                indices: vec![0, 0, 0, 0, 0, 0],
            },
        );
        scene.groups.insert(
            "b".to_string(),
            Group {
                material: Material::default(),
                indices: vec![0, 0, 0],
            },
        );
        assert_eq!(scene.triangle_count(), 3);
        assert!(scene.is_valid());
    }
}
