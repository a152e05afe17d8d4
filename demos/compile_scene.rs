//! Compiles a JSON scene description and prints what came out.
//!
//! ```text
//! cargo run --example compile_scene -- path/to/scene.json [asset_dir]
//! ```

use std::path::PathBuf;

use anyhow::Context;
use scene_compiler::{CompilerSettings, RenderNode, SceneCompiler, SceneDescription};

fn print_tree(node: &RenderNode, depth: usize) {
    let mut tags = Vec::new();
    if let Some(mesh) = &node.mesh {
        tags.push(format!(
            "mesh({} tris, {})",
            mesh.geometry.triangle_count(),
            mesh.material.shader_name()
        ));
    }
    if node.light.is_some() {
        tags.push("light".to_string());
    }
    if let Some(lod) = &node.lod {
        tags.push(format!("lod({} levels)", lod.len()));
    }
    if node.cast_shadow {
        tags.push("casts".to_string());
    }
    if node.receive_shadow {
        tags.push("receives".to_string());
    }

    println!("{}{} {}", "  ".repeat(depth), node.name, tags.join(" "));
    for child in &node.children {
        print_tree(child, depth + 1);
    }
    if let Some(lod) = &node.lod {
        for level in lod.levels() {
            print_tree(&level.node, depth + 1);
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let path = PathBuf::from(args.next().context("usage: compile_scene <scene.json> [asset_dir]")?);
    let asset_dir = args
        .next()
        .map(PathBuf::from)
        .or_else(|| path.parent().map(PathBuf::from))
        .unwrap_or_default();

    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("reading {}", path.display()))?;
    let description = SceneDescription::from_json_str(&json)?;

    let compiler = SceneCompiler::new(CompilerSettings::default().with_asset_dir(&asset_dir));
    let scene = compiler.compile(&description)?;

    print_tree(&scene.root, 0);
    println!();
    println!("nodes compiled: {}", scene.report.nodes_compiled);
    for diagnostic in &scene.report.diagnostics {
        println!("  skipped: {diagnostic}");
    }

    let bounds = scene.root.bounding_box();
    if !bounds.is_empty() {
        println!("bounds: {} .. {}", bounds.min, bounds.max);
    }
    Ok(())
}
