//! Wavefront OBJ parser producing a deduplicated, indexed scene.
//!
//! One synchronous pass over the file: `v`/`vn`/`vt` lines grow the
//! attribute stores, `f` lines resolve their corners against them and are
//! fan-triangulated into the current group, `g`/`usemtl` drive the group
//! accumulator and `mtllib` triggers a nested, blocking parse of the named
//! material library. The first malformed line aborts the whole load.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::mem;
use std::path::{Path, PathBuf};

use crate::error::{Attribute, SceneError, SceneResult};
use crate::material;
use crate::mesh::{Group, MeshVertex, Scene};
use crate::tokenizer::{logical_lines, parse_floats};

/// Load an OBJ scene from a file path. `mtllib` directives are resolved
/// relative to the file's directory.
pub fn load_scene_from_path(path: impl AsRef<Path>) -> SceneResult<Scene> {
    let path = path.as_ref();
    log::info!("Loading OBJ scene from {:?}", path);
    let file = File::open(path).map_err(|e| SceneError::io(path, e))?;
    let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    let scene = ObjParser::new(base_dir).parse(BufReader::new(file), path)?;
    log::info!(
        "Loaded scene: {} vertices, {} triangles, {} groups, {} materials",
        scene.vertices.len(),
        scene.triangle_count(),
        scene.groups.len(),
        scene.materials.len()
    );
    Ok(scene)
}

/// Parse an OBJ scene from a string. `mtllib` directives are resolved
/// relative to `base_dir`.
pub fn load_scene_from_str(contents: &str, base_dir: impl AsRef<Path>) -> SceneResult<Scene> {
    let base_dir = base_dir.as_ref();
    ObjParser::new(base_dir.to_path_buf()).parse(io::Cursor::new(contents), base_dir)
}

/// Resolved `(position, texcoord, normal)` triplet of one face corner.
/// `None` means the component was omitted (or written as `0`) in the
/// source grammar and the vertex field takes its fallback value.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
struct VertexKey {
    position: usize,
    texcoord: Option<usize>,
    normal: Option<usize>,
}

/// One corner as written, before index resolution.
#[derive(Clone, Copy, Debug)]
struct RawCorner {
    position: i32,
    texcoord: Option<i32>,
    normal: Option<i32>,
}

/// Single-pass parser state: attribute stores, the dedup map and the
/// currently accumulating group, threaded through the line loop.
struct ObjParser {
    base_dir: PathBuf,
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    texcoords: Vec<[f32; 2]>,
    dedup: HashMap<VertexKey, u32>,
    scene: Scene,
    group_name: String,
    group: Group,
}

impl ObjParser {
    fn new(base_dir: PathBuf) -> Self {
        Self {
            base_dir,
            positions: Vec::new(),
            normals: Vec::new(),
            texcoords: Vec::new(),
            dedup: HashMap::new(),
            scene: Scene::default(),
            group_name: String::new(),
            group: Group::default(),
        }
    }

    fn parse<R: BufRead>(mut self, reader: R, source: &Path) -> SceneResult<Scene> {
        for item in logical_lines(reader) {
            let (line_no, line) = item.map_err(|e| SceneError::io(source, e))?;
            let mut parts = line.split_whitespace();
            let Some(tag) = parts.next() else { continue };

            match tag {
                "v" => self
                    .positions
                    .push(parse_floats(&mut parts, tag, line_no, &line)?),
                "vn" => self
                    .normals
                    .push(parse_floats(&mut parts, tag, line_no, &line)?),
                "vt" => self
                    .texcoords
                    .push(parse_floats(&mut parts, tag, line_no, &line)?),
                "f" => self.face(parts, line_no)?,
                "g" => self.start_group(parts.next().unwrap_or_default()),
                "usemtl" => {
                    // An undeclared name resolves to the zero material; a
                    // later `mtllib` does not retroactively fix it.
                    let name = parts.next().unwrap_or_default();
                    self.group.material =
                        self.scene.materials.get(name).cloned().unwrap_or_default();
                }
                "mtllib" => {
                    if let Some(name) = parts.next() {
                        let mtl_path = self.base_dir.join(name);
                        log::debug!("Resolving material library {:?}", mtl_path);
                        let parsed = material::load_material_lib_from_path(&mtl_path)?;
                        self.scene.materials.extend(parsed);
                    }
                }
                // o/s/l/vp and anything else are ignored.
                _ => {}
            }
        }

        // The in-progress group is committed at end of input, implicit
        // empty-named group included.
        let Self {
            mut scene,
            group_name,
            group,
            ..
        } = self;
        scene.groups.insert(group_name, group);
        Ok(scene)
    }

    /// Commit the open group (named groups only) and start a fresh one
    /// carrying the last-seen material snapshot. Indices accumulated under
    /// the implicit empty name are discarded here; they survive only when
    /// no `g` line ever appears.
    fn start_group(&mut self, new_name: &str) {
        let fresh = Group {
            material: self.group.material.clone(),
            indices: Vec::new(),
        };
        let finished = mem::replace(&mut self.group, fresh);
        let old_name = mem::replace(&mut self.group_name, new_name.to_string());
        if !old_name.is_empty() {
            self.scene.groups.insert(old_name, finished);
        }
    }

    fn face(&mut self, parts: std::str::SplitWhitespace<'_>, line_no: usize) -> SceneResult<()> {
        let mut corners: Vec<u32> = Vec::new();
        for token in parts {
            let raw = parse_corner(token, line_no)?;
            let key = self.resolve(raw, line_no)?;
            corners.push(self.vertex_slot(key));
        }

        if corners.len() < 3 {
            return Err(SceneError::DegenerateFace {
                line: line_no,
                count: corners.len(),
            });
        }

        // Fan triangulation from the first corner, winding preserved.
        for i in 1..corners.len() - 1 {
            self.group.indices.push(corners[0]);
            self.group.indices.push(corners[i]);
            self.group.indices.push(corners[i + 1]);
        }
        Ok(())
    }

    /// Turn signed 1-based/relative indices into checked 0-based ones.
    /// A zero or omitted texcoord/normal stays absent and is never
    /// bounds-checked.
    fn resolve(&self, raw: RawCorner, line: usize) -> SceneResult<VertexKey> {
        let position = resolve_index(raw.position, self.positions.len(), Attribute::Position, line)?;
        let texcoord = match raw.texcoord.filter(|&v| v != 0) {
            Some(v) => Some(resolve_index(v, self.texcoords.len(), Attribute::Texcoord, line)?),
            None => None,
        };
        let normal = match raw.normal.filter(|&v| v != 0) {
            Some(v) => Some(resolve_index(v, self.normals.len(), Attribute::Normal, line)?),
            None => None,
        };
        Ok(VertexKey {
            position,
            texcoord,
            normal,
        })
    }

    /// Dedup lookup: the first occurrence of a triplet materializes a
    /// vertex, repeats anywhere later in the file reuse its slot.
    fn vertex_slot(&mut self, key: VertexKey) -> u32 {
        if let Some(&slot) = self.dedup.get(&key) {
            return slot;
        }
        let vertex = MeshVertex::new(
            self.positions[key.position],
            key.normal.map(|i| self.normals[i]).unwrap_or([0.0; 3]),
            key.texcoord.map(|i| self.texcoords[i]).unwrap_or([0.0; 2]),
        );
        let slot = self.scene.vertices.len() as u32;
        self.scene.vertices.push(vertex);
        self.dedup.insert(key, slot);
        slot
    }
}

/// Parse one face corner token: `p`, `p/t`, `p/t/n` or `p//n` with signed
/// integers. Anything else is a grammar error.
fn parse_corner(token: &str, line: usize) -> SceneResult<RawCorner> {
    let grammar = || SceneError::MalformedFaceGrammar {
        token: token.to_string(),
        line,
    };

    let segments: Vec<&str> = token.split('/').collect();
    let (pos, tex, nrm) = match segments.as_slice() {
        [p] => (*p, None, None),
        [p, t] => {
            if t.is_empty() {
                return Err(grammar());
            }
            (*p, Some(*t), None)
        }
        [p, t, n] => {
            if n.is_empty() {
                return Err(grammar());
            }
            let tex = if t.is_empty() { None } else { Some(*t) };
            (*p, tex, Some(*n))
        }
        _ => return Err(grammar()),
    };

    let position = pos.parse::<i32>().map_err(|_| grammar())?;
    let texcoord = match tex {
        Some(t) => Some(t.parse::<i32>().map_err(|_| grammar())?),
        None => None,
    };
    let normal = match nrm {
        Some(n) => Some(n.parse::<i32>().map_err(|_| grammar())?),
        None => None,
    };
    Ok(RawCorner {
        position,
        texcoord,
        normal,
    })
}

/// Negative indices count back from the end of the store; positive ones
/// are 1-based. The resolved 0-based index must fall inside the store.
fn resolve_index(raw: i32, len: usize, attribute: Attribute, line: usize) -> SceneResult<usize> {
    let resolved = if raw < 0 {
        len as i64 + raw as i64
    } else {
        raw as i64 - 1
    };
    if resolved < 0 || resolved >= len as i64 {
        return Err(SceneError::IndexOutOfRange {
            attribute,
            value: raw,
            line,
        });
    }
    Ok(resolved as usize)
}
