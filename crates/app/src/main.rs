//! Scene inspector: loads an OBJ scene and reports what came out of the
//! parser. Useful for eyeballing assets without firing up a renderer.

use anyhow::{Context, Result, bail};

fn parse_flag(name: &str) -> bool {
    std::env::args().skip(1).any(|arg| arg == name)
}

fn parse_path_arg() -> Option<String> {
    std::env::args().skip(1).find(|arg| !arg.starts_with("--"))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(path) = parse_path_arg() else {
        bail!("usage: app <model.obj> [--groups] [--materials]");
    };
    let show_groups = parse_flag("--groups");
    let show_materials = parse_flag("--materials");

    let scene = asset::load_scene_from_path(&path)
        .with_context(|| format!("failed to load scene from '{path}'"))?;

    println!(
        "{path}: {} vertices, {} triangles, {} groups, {} materials",
        scene.vertices.len(),
        scene.triangle_count(),
        scene.groups.len(),
        scene.materials.len()
    );

    if show_groups {
        for (name, group) in &scene.groups {
            let label = if name.is_empty() { "(unnamed)" } else { name };
            println!("  group {label}: {} triangles", group.triangle_count());
        }
    }

    if show_materials {
        for (name, material) in &scene.materials {
            let label = if name.is_empty() { "(unnamed)" } else { name };
            println!(
                "  material {label}: Ks {:?}, Ns {}, albedo {:?}, mask {:?}",
                material.glossiness, material.roughness, material.albedo, material.transparency
            );
        }
    }

    log::info!("Done.");
    Ok(())
}
