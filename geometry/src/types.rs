//! Mesh type
//!
//! Shared output type of every generator and modifier.

use std::fmt;

use bytemuck::cast_slice;
use glam::{Vec2, Vec3};

use crate::error::GeometryError;
use crate::normals::compute_angle_weighted_normals;

/// One triangle as three vertex indices (counter-clockwise front face)
pub type Cell = [u32; 3];

/// Indexed triangle mesh
///
/// `uvs` and `normals` are either empty or parallel to `positions`. Every index
/// in `cells` must be less than `positions.len()`; [`Mesh::validate`] checks both
/// rules.
///
/// The `*_flat` accessors expose the attribute arrays as contiguous scalars in
/// the layout a GPU upload expects (3 floats per position/normal, 2 per UV,
/// 3 `u32` per cell) without copying.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions
    pub positions: Vec<Vec3>,
    /// Texture coordinates (empty if the mesh has none)
    pub uvs: Vec<Vec2>,
    /// Vertex normals (empty until generated or estimated)
    pub normals: Vec<Vec3>,
    /// Triangles
    pub cells: Vec<Cell>,
}

impl Mesh {
    /// Create an empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get triangle count
    pub fn triangle_count(&self) -> usize {
        self.cells.len()
    }

    /// Append a vertex position and return its index
    pub fn push_position(&mut self, position: Vec3) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        index
    }

    /// Append a triangle
    pub fn push_cell(&mut self, a: u32, b: u32, c: u32) {
        self.cells.push([a, b, c]);
    }

    /// Check that attributes are parallel and every index is in range
    pub fn validate(&self) -> Result<(), GeometryError> {
        let expected = self.positions.len();

        if !self.uvs.is_empty() && self.uvs.len() != expected {
            return Err(GeometryError::AttributeLength {
                attribute: "uvs",
                len: self.uvs.len(),
                expected,
            });
        }

        if !self.normals.is_empty() && self.normals.len() != expected {
            return Err(GeometryError::AttributeLength {
                attribute: "normals",
                len: self.normals.len(),
                expected,
            });
        }

        for (cell_index, cell) in self.cells.iter().enumerate() {
            if let Some(&index) = cell.iter().find(|&&i| i as usize >= expected) {
                return Err(GeometryError::IndexOutOfBounds {
                    cell: cell_index,
                    index,
                    vertex_count: expected,
                });
            }
        }

        Ok(())
    }

    /// Positions as `[x, y, z, x, y, z, ...]`
    pub fn positions_flat(&self) -> &[f32] {
        cast_slice(&self.positions)
    }

    /// UVs as `[u, v, u, v, ...]`
    pub fn uvs_flat(&self) -> &[f32] {
        cast_slice(&self.uvs)
    }

    /// Normals as `[x, y, z, x, y, z, ...]`
    pub fn normals_flat(&self) -> &[f32] {
        cast_slice(&self.normals)
    }

    /// Cells as `[a, b, c, a, b, c, ...]`
    pub fn cells_flat(&self) -> &[u32] {
        cast_slice(&self.cells)
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` for an empty mesh
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.positions.first()?;
        Some(
            self.positions
                .iter()
                .fold((first, first), |(min, max), &p| (min.min(p), max.max(p))),
        )
    }

    /// Replace the normals with angle-weighted estimates from the current cells
    pub fn compute_angle_weighted_normals(&mut self) {
        let flat = compute_angle_weighted_normals(self.cells_flat(), self.positions_flat());
        self.normals = flat.chunks_exact(3).map(Vec3::from_slice).collect();
    }
}

impl fmt::Display for Mesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mesh {{ {} vertices, {} cells, uvs: {}, normals: {} }}",
            self.vertex_count(),
            self.triangle_count(),
            if self.uvs.is_empty() { "no" } else { "yes" },
            if self.normals.is_empty() { "no" } else { "yes" },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Mesh {
        let mut mesh = Mesh::new();
        let a = mesh.push_position(Vec3::new(0.0, 0.0, 0.0));
        let b = mesh.push_position(Vec3::new(1.0, 0.0, 0.0));
        let c = mesh.push_position(Vec3::new(0.0, 1.0, 0.0));
        mesh.push_cell(a, b, c);
        mesh
    }

    #[test]
    fn test_validate_accepts_well_formed_mesh() {
        assert!(triangle().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_index() {
        let mut mesh = triangle();
        mesh.push_cell(0, 1, 3);

        match mesh.validate() {
            Err(GeometryError::IndexOutOfBounds {
                cell,
                index,
                vertex_count,
            }) => {
                assert_eq!(cell, 1);
                assert_eq!(index, 3);
                assert_eq!(vertex_count, 3);
            }
            other => panic!("expected IndexOutOfBounds, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_short_normals() {
        let mut mesh = triangle();
        mesh.normals = vec![Vec3::Z; 2];

        assert!(matches!(
            mesh.validate(),
            Err(GeometryError::AttributeLength {
                attribute: "normals",
                ..
            })
        ));
    }

    #[test]
    fn test_flat_views_are_contiguous() {
        let mut mesh = triangle();
        mesh.uvs = vec![Vec2::ZERO, Vec2::X, Vec2::Y];

        assert_eq!(
            mesh.positions_flat(),
            &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]
        );
        assert_eq!(mesh.uvs_flat(), &[0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
        assert_eq!(mesh.cells_flat(), &[0, 1, 2]);
        assert!(mesh.normals_flat().is_empty());
    }

    #[test]
    fn test_bounds() {
        assert_eq!(Mesh::new().bounds(), None);

        let (min, max) = triangle().bounds().unwrap();
        assert_eq!(min, Vec3::ZERO);
        assert_eq!(max, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_compute_normals_fills_every_vertex() {
        let mut mesh = triangle();
        mesh.compute_angle_weighted_normals();

        assert_eq!(mesh.normals.len(), 3);
        for n in &mesh.normals {
            assert!((*n - Vec3::NEG_Z).length() < 1e-6);
        }
    }

    #[test]
    fn test_display_summary() {
        let text = triangle().to_string();
        assert_eq!(text, "Mesh { 3 vertices, 1 cells, uvs: no, normals: no }");
    }
}
