//! Mesh combining utilities
//!
//! Functions for merging multiple meshes into a single mesh.

use glam::{Mat4, Vec2};

use crate::modifiers::{MeshModifier, Transform};
use crate::normals::DEFAULT_NORMAL;
use crate::types::Mesh;

/// Combine multiple meshes into one
///
/// Merges multiple meshes by concatenating their vertex and cell data. Cell
/// indices are offset by the number of vertices appended before each mesh.
/// If any mesh has UVs (or normals), the output has them for every vertex:
/// meshes without UVs get zero UVs and meshes without normals get `(1, 0, 0)`.
///
/// # Example
/// ```no_run
/// use viz_geometry::*;
///
/// let crate_box = generate_box(Vec3::ONE, UVec3::ONE);
/// let ball = generate_icosphere(2, 0.5);
///
/// let combined = combine(&[&crate_box, &ball]);
/// ```
pub fn combine(meshes: &[&Mesh]) -> Mesh {
    let mut result = Mesh::new();

    let total_vertices: usize = meshes.iter().map(|m| m.positions.len()).sum();
    let total_cells: usize = meshes.iter().map(|m| m.cells.len()).sum();
    let has_any_uvs = meshes.iter().any(|m| !m.uvs.is_empty());
    let has_any_normals = meshes.iter().any(|m| !m.normals.is_empty());

    result.positions.reserve(total_vertices);
    result.cells.reserve(total_cells);
    if has_any_uvs {
        result.uvs.reserve(total_vertices);
    }
    if has_any_normals {
        result.normals.reserve(total_vertices);
    }

    for mesh in meshes {
        if mesh.positions.is_empty() {
            continue;
        }

        let vertex_offset = result.positions.len() as u32;

        result.positions.extend_from_slice(&mesh.positions);

        if has_any_uvs {
            if mesh.uvs.is_empty() {
                result.uvs.resize(result.positions.len(), Vec2::ZERO);
            } else {
                result.uvs.extend_from_slice(&mesh.uvs);
            }
        }

        if has_any_normals {
            if mesh.normals.is_empty() {
                result.normals.resize(result.positions.len(), DEFAULT_NORMAL);
            } else {
                result.normals.extend_from_slice(&mesh.normals);
            }
        }

        result
            .cells
            .extend(mesh.cells.iter().map(|cell| cell.map(|i| i + vertex_offset)));
    }

    result
}

/// Combine multiple meshes with per-mesh transforms
///
/// Applies a transformation matrix to a copy of each mesh before combining
/// them. The same mesh may appear several times with different matrices.
pub fn combine_transformed(meshes: &[(&Mesh, Mat4)]) -> Mesh {
    let transformed_meshes: Vec<Mesh> = meshes
        .iter()
        .map(|(mesh, matrix)| {
            let mut transformed = (*mesh).clone();
            Transform::from_matrix(*matrix).apply(&mut transformed);
            transformed
        })
        .collect();

    let mesh_refs: Vec<&Mesh> = transformed_meshes.iter().collect();
    combine(&mesh_refs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boxes::generate_box;
    use crate::icosphere::generate_icosphere;
    use glam::{UVec3, Vec3};

    #[test]
    fn test_combine_empty() {
        let result = combine(&[]);
        assert_eq!(result.positions.len(), 0);
        assert_eq!(result.cells.len(), 0);
    }

    #[test]
    fn test_combine_index_offset() {
        let mesh1 = generate_box(Vec3::ONE, UVec3::ONE);
        let mesh2 = generate_icosphere(1, 1.0);

        let combined = combine(&[&mesh1, &mesh2]);

        assert_eq!(combined.positions.len(), mesh1.positions.len() + mesh2.positions.len());
        assert_eq!(combined.cells.len(), mesh1.cells.len() + mesh2.cells.len());
        assert_eq!(combined.cells[mesh1.cells.len()], mesh2.cells[0].map(|i| i + 24));
        assert!(combined.validate().is_ok());
    }

    #[test]
    fn test_combine_pads_missing_uvs() {
        let with_uvs = generate_box(Vec3::ONE, UVec3::ONE);
        let without_uvs = generate_icosphere(0, 1.0);

        let combined = combine(&[&without_uvs, &with_uvs]);

        assert_eq!(combined.uvs.len(), combined.positions.len());
        assert!(combined.uvs[..12].iter().all(|uv| *uv == Vec2::ZERO));
        assert_eq!(&combined.uvs[12..], &with_uvs.uvs[..]);
        assert!(combined.validate().is_ok());
    }

    #[test]
    fn test_combine_pads_missing_normals() {
        let mut bare = Mesh::new();
        bare.positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
        bare.cells = vec![[0, 1, 2]];
        let sphere = generate_icosphere(0, 1.0);

        let combined = combine(&[&sphere, &bare]);

        assert_eq!(combined.normals.len(), 15);
        assert!(combined.normals[12..].iter().all(|n| *n == DEFAULT_NORMAL));
    }

    #[test]
    fn test_combine_single_mesh_is_unchanged() {
        let mesh = generate_box(Vec3::ONE, UVec3::splat(2));
        assert_eq!(combine(&[&mesh]), mesh);
    }

    #[test]
    fn test_combine_transformed() {
        let mesh = generate_box(Vec3::ONE, UVec3::ONE);

        let combined = combine_transformed(&[
            (&mesh, Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0))),
            (&mesh, Mat4::from_translation(Vec3::new(-1.0, 0.0, 0.0))),
        ]);

        assert_eq!(combined.positions.len(), mesh.positions.len() * 2);

        let (min, max) = combined.bounds().unwrap();
        assert!((min.x + 1.5).abs() < 1e-6);
        assert!((max.x - 1.5).abs() < 1e-6);
    }
}
