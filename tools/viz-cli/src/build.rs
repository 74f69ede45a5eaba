//! Mesh building from manifest entries

use anyhow::{Context, Result};
use glam::{UVec3, Vec3};
use std::path::{Path, PathBuf};
use tracing::info;

use viz_geometry::{
    Mesh, MeshApply, SphereCluster, Weld, compute_angle_weighted_normals, generate_icosphere,
    read_obj, try_generate_box, write_obj,
};

use crate::manifest::{MeshEntry, ShapeSpec, VizManifest};

/// Generate the mesh for one manifest entry
///
/// OBJ paths are resolved against `manifest_dir`.
pub fn build_mesh(entry: &MeshEntry, manifest_dir: &Path) -> Result<Mesh> {
    let mut mesh = match &entry.shape {
        ShapeSpec::Icosphere {
            subdivisions,
            radius,
        } => generate_icosphere(*subdivisions, *radius),
        ShapeSpec::Box { size, segments } => {
            try_generate_box(Vec3::from_array(*size), UVec3::from_array(*segments))
                .with_context(|| format!("Failed to generate box '{}'", entry.id))?
        }
        ShapeSpec::Obj { path } => {
            let path = manifest_dir.join(path);
            let mut mesh =
                read_obj(&path).with_context(|| format!("Failed to read {}", path.display()))?;
            estimate_outward_normals(&mut mesh);
            mesh
        }
        ShapeSpec::Cluster { count, seed } => SphereCluster {
            count: *count,
            seed: *seed,
            ..SphereCluster::default()
        }
        .generate(),
    };

    if entry.weld {
        mesh.apply(Weld);
        estimate_outward_normals(&mut mesh);
    }

    mesh.validate()
        .with_context(|| format!("Mesh '{}' failed validation", entry.id))?;

    Ok(mesh)
}

/// Replace the normals with angle-weighted estimates facing the
/// counter-clockwise side of each triangle
///
/// The estimator points normals away from the side a triangle winds
/// counter-clockwise from, so it is fed every cell with reversed winding. The
/// mesh's own cells are left untouched.
pub fn estimate_outward_normals(mesh: &mut Mesh) {
    let reversed: Vec<u32> = mesh.cells.iter().flat_map(|&[a, b, c]| [a, c, b]).collect();
    let flat = compute_angle_weighted_normals(&reversed, mesh.positions_flat());
    mesh.normals = flat.chunks_exact(3).map(Vec3::from_slice).collect();
}

/// Write a mesh to an OBJ file, creating parent directories as needed
pub fn write_mesh(mesh: &Mesh, path: &Path, name: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }

    write_obj(mesh, path, name).with_context(|| format!("Failed to write {}", path.display()))
}

/// Build every mesh in a manifest
///
/// Output goes to `output_override` if given, otherwise to the manifest's
/// `output_dir` (relative to `manifest_dir`), otherwise to `manifest_dir`.
/// Returns the written file paths in manifest order.
pub fn build_all(
    manifest: &VizManifest,
    manifest_dir: &Path,
    output_override: Option<&Path>,
) -> Result<Vec<PathBuf>> {
    manifest.validate()?;

    let output_dir = match (output_override, &manifest.output_dir) {
        (Some(dir), _) => dir.to_path_buf(),
        (None, Some(dir)) => manifest_dir.join(dir),
        (None, None) => manifest_dir.to_path_buf(),
    };

    let mut written = Vec::with_capacity(manifest.meshes.len());
    for entry in &manifest.meshes {
        let mesh = build_mesh(entry, manifest_dir)?;
        let path = output_dir.join(entry.output_file());
        write_mesh(&mesh, &path, &entry.id)?;

        info!(
            "  {} ({}): {} vertices, {} triangles",
            entry.id,
            entry.shape.kind(),
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        written.push(path);
    }

    Ok(written)
}
