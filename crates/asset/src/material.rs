//! Material records and the MTL library parser.
//!
//! A library is parsed in one pass with an open-accumulator: `newmtl`
//! commits the previous material and starts a fresh one, and whatever is
//! open at end of input is committed too. Texture paths are resolved
//! against the directory of the MTL file that named them. The loader does
//! not check that referenced textures exist; that is the consumer's
//! problem.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::mem;
use std::path::{Path, PathBuf};

use crate::error::{SceneError, SceneResult};
use crate::tokenizer::{logical_lines, parse_floats};

/// Surface description collected from an MTL library.
///
/// `Default` is the all-zero material with no texture paths; it is also
/// what a `usemtl` naming an undeclared material resolves to.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Material {
    /// Specular color (`Ks`).
    pub glossiness: [f32; 3],
    /// Specular exponent (`Ns`).
    pub roughness: f32,
    /// Ambient texture (`map_Ka`), resolved relative to the MTL file.
    pub albedo: Option<PathBuf>,
    /// Alpha-mask texture (`map_d`), resolved relative to the MTL file.
    pub transparency: Option<PathBuf>,
}

/// Parse a material library from a file path.
pub fn load_material_lib_from_path(
    path: impl AsRef<Path>,
) -> SceneResult<HashMap<String, Material>> {
    let path = path.as_ref();
    log::debug!("Loading material library from {:?}", path);
    let file = File::open(path).map_err(|e| SceneError::io(path, e))?;
    let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    parse_material_lib(BufReader::new(file), path, &base_dir)
}

/// Parse a material library from a string, resolving texture paths
/// against `base_dir`.
pub fn load_material_lib_from_str(
    contents: &str,
    base_dir: impl AsRef<Path>,
) -> SceneResult<HashMap<String, Material>> {
    let base_dir = base_dir.as_ref();
    parse_material_lib(io::Cursor::new(contents), base_dir, base_dir)
}

fn parse_material_lib<R: BufRead>(
    reader: R,
    source: &Path,
    base_dir: &Path,
) -> SceneResult<HashMap<String, Material>> {
    let mut materials = HashMap::new();
    let mut name = String::new();
    let mut current = Material::default();

    for item in logical_lines(reader) {
        let (line_no, line) = item.map_err(|e| SceneError::io(source, e))?;
        let mut parts = line.split_whitespace();
        let Some(tag) = parts.next() else { continue };

        match tag {
            "newmtl" => {
                if !name.is_empty() {
                    materials.insert(mem::take(&mut name), mem::take(&mut current));
                }
                name = parts.next().unwrap_or_default().to_string();
                current = Material::default();
            }
            "Ks" => current.glossiness = parse_floats(&mut parts, tag, line_no, &line)?,
            "Ns" => {
                let [n] = parse_floats(&mut parts, tag, line_no, &line)?;
                current.roughness = n;
            }
            "map_Ka" => {
                if let Some(texture) = parts.next() {
                    current.albedo = Some(base_dir.join(texture));
                }
            }
            "map_d" => {
                if let Some(texture) = parts.next() {
                    current.transparency = Some(base_dir.join(texture));
                }
            }
            // Kd/Ka/d/illum and anything else are ignored.
            _ => {}
        }
    }

    // Commit the open material, even when no `newmtl` was ever seen; a
    // library without one installs its values under the empty name.
    materials.insert(name, current);
    Ok(materials)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_two_materials_with_trailing_commit() {
        let src = r#"
            # test library
            newmtl red
            Ks 1.0 0.0 0.0
            Ns 20
            map_Ka red.png
            newmtl blue
            Ks 0.0 0.0 1.0
            Ns 5
        "#;
        let materials = load_material_lib_from_str(src, "assets").expect("parse mtl");
        assert_eq!(materials.len(), 2);

        let red = &materials["red"];
        assert_eq!(red.glossiness, [1.0, 0.0, 0.0]);
        assert_eq!(red.roughness, 20.0);
        assert_eq!(red.albedo, Some(Path::new("assets").join("red.png")));
        assert_eq!(red.transparency, None);

        let blue = &materials["blue"];
        assert_eq!(blue.glossiness, [0.0, 0.0, 1.0]);
        assert_eq!(blue.roughness, 5.0);
    }

    #[test]
    fn newmtl_resets_the_accumulator() {
        let src = "newmtl a\nKs 1 1 1\nmap_d mask.png\nnewmtl b\nNs 3\n";
        let materials = load_material_lib_from_str(src, ".").expect("parse mtl");
        let b = &materials["b"];
        assert_eq!(b.glossiness, [0.0, 0.0, 0.0]);
        assert_eq!(b.transparency, None);
        assert_eq!(b.roughness, 3.0);
    }

    #[test]
    fn library_without_newmtl_commits_under_empty_name() {
        let src = "Ks 0.5 0.5 0.5\n";
        let materials = load_material_lib_from_str(src, ".").expect("parse mtl");
        assert_eq!(materials.len(), 1);
        assert_eq!(materials[""].glossiness, [0.5, 0.5, 0.5]);
    }

    #[test]
    fn unknown_tags_are_ignored() {
        let src = "newmtl m\nKd 1 1 1\nillum 2\nd 0.5\n";
        let materials = load_material_lib_from_str(src, ".").expect("parse mtl");
        assert_eq!(materials["m"], Material::default());
    }

    #[test]
    fn malformed_ks_is_fatal() {
        let err = load_material_lib_from_str("newmtl m\nKs 1.0 oops 0.0\n", ".").unwrap_err();
        assert!(matches!(
            err,
            SceneError::MalformedAttribute { ref tag, line: 2, .. } if tag == "Ks"
        ));
    }

    #[test]
    fn missing_library_file_reports_the_path() {
        let err = load_material_lib_from_path("definitely/not/here.mtl").unwrap_err();
        assert!(matches!(
            err,
            SceneError::Io { ref path, .. } if path.ends_with("here.mtl")
        ));
    }
}
