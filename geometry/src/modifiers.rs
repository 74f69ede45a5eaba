//! Mesh modifiers
//!
//! Modifiers operate on a [`Mesh`] in place. Use the `MeshApply` extension trait
//! for method chaining:
//! ```no_run
//! use viz_geometry::*;
//!
//! let mut mesh = generate_box(Vec3::ONE, UVec3::ONE);
//! mesh.apply(Weld)
//!     .apply(Subdivide { iterations: 2 })
//!     .apply(Transform::scale(1.0, 2.0, 1.0))
//!     .apply(AngleWeightedNormals);
//! ```

use std::collections::BTreeMap;

use glam::{Mat4, Vec2, Vec3};
use hashbrown::HashMap;

use crate::math::VectorKey;
use crate::types::{Cell, Mesh};

/// Trait for mesh modifiers
pub trait MeshModifier {
    /// Apply this modifier to a mesh, modifying it in place
    fn apply(&self, mesh: &mut Mesh);
}

/// Extension trait for fluent modifier application
pub trait MeshApply {
    /// Apply a modifier and return `&mut Self` for chaining
    fn apply<M: MeshModifier>(&mut self, modifier: M) -> &mut Self;
}

impl MeshApply for Mesh {
    fn apply<M: MeshModifier>(&mut self, modifier: M) -> &mut Self {
        modifier.apply(self);
        self
    }
}

/// Transform mesh vertices and normals using a 4x4 matrix
///
/// Normals are transformed using the inverse-transpose so non-uniform scaling
/// keeps them perpendicular to the surface, then renormalized.
#[derive(Debug, Clone, Copy)]
pub struct Transform {
    matrix: Mat4,
}

impl Transform {
    /// Create an identity transform (no change)
    pub fn identity() -> Self {
        Self {
            matrix: Mat4::IDENTITY,
        }
    }

    /// Create a translation transform
    pub fn translate(x: f32, y: f32, z: f32) -> Self {
        Self {
            matrix: Mat4::from_translation(Vec3::new(x, y, z)),
        }
    }

    /// Create a non-uniform scale transform
    pub fn scale(x: f32, y: f32, z: f32) -> Self {
        Self {
            matrix: Mat4::from_scale(Vec3::new(x, y, z)),
        }
    }

    /// Create a rotation around the Y axis (in degrees)
    pub fn rotate_y(degrees: f32) -> Self {
        Self {
            matrix: Mat4::from_rotation_y(degrees.to_radians()),
        }
    }

    /// Create a transform from a custom 4x4 matrix
    pub fn from_matrix(matrix: Mat4) -> Self {
        Self { matrix }
    }
}

impl MeshModifier for Transform {
    fn apply(&self, mesh: &mut Mesh) {
        let normal_matrix = self.matrix.inverse().transpose();

        for position in &mut mesh.positions {
            *position = self.matrix.transform_point3(*position);
        }

        for normal in &mut mesh.normals {
            *normal = normal_matrix.transform_vector3(*normal).normalize_or_zero();
        }
    }
}

/// Subdivide every triangle into four using edge midpoints
///
/// For each triangle `(a, b, c)` the midpoints `ab`, `bc`, `ca` are created once
/// per shared edge and the triangle is replaced by
/// `(a, ab, ca)`, `(b, bc, ab)`, `(c, ca, bc)`, `(ab, bc, ca)`.
///
/// Midpoint UVs are averaged and midpoint normals are the normalized average of
/// the edge's normals. Vertices: roughly x2 per iteration; triangles: x4.
#[derive(Debug, Clone, Copy)]
pub struct Subdivide {
    /// Number of subdivision iterations
    pub iterations: u32,
}

impl Default for Subdivide {
    fn default() -> Self {
        Self { iterations: 1 }
    }
}

impl MeshModifier for Subdivide {
    fn apply(&self, mesh: &mut Mesh) {
        for _ in 0..self.iterations {
            subdivide_once(mesh);
        }
    }
}

/// Perform a single subdivision pass
///
/// Midpoints are keyed on the sorted pair of vertex indices forming the edge, so
/// both triangles sharing an edge resolve to the same new vertex regardless of
/// how their coordinates round.
pub(crate) fn subdivide_once(mesh: &mut Mesh) {
    let has_uvs = !mesh.uvs.is_empty();
    let has_normals = !mesh.normals.is_empty();

    type EdgeKey = (u32, u32);
    fn make_edge_key(a: u32, b: u32) -> EdgeKey {
        if a < b { (a, b) } else { (b, a) }
    }

    /// Get or create the midpoint vertex of the edge `a -> b`
    fn get_or_create_midpoint(
        mesh: &mut Mesh,
        edge_midpoints: &mut HashMap<EdgeKey, u32>,
        a: u32,
        b: u32,
        has_uvs: bool,
        has_normals: bool,
    ) -> u32 {
        let edge = make_edge_key(a, b);
        if let Some(&index) = edge_midpoints.get(&edge) {
            return index;
        }

        let (ia, ib) = (a as usize, b as usize);
        let index = mesh.positions.len() as u32;

        let position = mesh.positions[ia].lerp(mesh.positions[ib], 0.5);
        mesh.positions.push(position);

        if has_uvs {
            let uv = mesh.uvs[ia].lerp(mesh.uvs[ib], 0.5);
            mesh.uvs.push(uv);
        }

        if has_normals {
            let normal = (mesh.normals[ia] + mesh.normals[ib]).normalize_or(mesh.normals[ia]);
            mesh.normals.push(normal);
        }

        edge_midpoints.insert(edge, index);
        index
    }

    // Every edge is shared by at most two triangles in a closed mesh
    let mut edge_midpoints: HashMap<EdgeKey, u32> =
        HashMap::with_capacity(mesh.cells.len() * 3 / 2);
    let old_cells = std::mem::take(&mut mesh.cells);
    mesh.cells.reserve(old_cells.len() * 4);

    for [a, b, c] in old_cells {
        let ab = get_or_create_midpoint(mesh, &mut edge_midpoints, a, b, has_uvs, has_normals);
        let bc = get_or_create_midpoint(mesh, &mut edge_midpoints, b, c, has_uvs, has_normals);
        let ca = get_or_create_midpoint(mesh, &mut edge_midpoints, c, a, has_uvs, has_normals);

        mesh.cells.push([a, ab, ca]);
        mesh.cells.push([b, bc, ab]);
        mesh.cells.push([c, ca, bc]);
        mesh.cells.push([ab, bc, ca]);
    }
}

/// Replace normals with angle-weighted estimates
///
/// Counter-clockwise triangles get normals pointing away from the side they are
/// seen counter-clockwise from. See
/// [`compute_angle_weighted_normals`](crate::compute_angle_weighted_normals).
#[derive(Debug, Clone, Copy, Default)]
pub struct AngleWeightedNormals;

impl MeshModifier for AngleWeightedNormals {
    fn apply(&self, mesh: &mut Mesh) {
        mesh.compute_angle_weighted_normals();
    }
}

/// Merge vertices with identical positions
///
/// Positions must match exactly (`-0.0` and `0.0` count as equal). The first
/// vertex at a position keeps its UV and normal; later duplicates are dropped
/// and cells are remapped. Vertex order otherwise follows first occurrence.
///
/// Welding a box joins its six panels into one closed surface, at the cost of
/// the per-face normals and UVs along the seams.
#[derive(Debug, Clone, Copy, Default)]
pub struct Weld;

impl MeshModifier for Weld {
    fn apply(&self, mesh: &mut Mesh) {
        let has_uvs = !mesh.uvs.is_empty();
        let has_normals = !mesh.normals.is_empty();

        let mut first_index: BTreeMap<VectorKey, u32> = BTreeMap::new();
        let mut remap = Vec::with_capacity(mesh.positions.len());

        let mut positions = Vec::new();
        let mut uvs: Vec<Vec2> = Vec::new();
        let mut normals: Vec<Vec3> = Vec::new();

        for (i, &position) in mesh.positions.iter().enumerate() {
            let index = *first_index.entry(VectorKey::new(position)).or_insert_with(|| {
                positions.push(position);
                if has_uvs {
                    uvs.push(mesh.uvs[i]);
                }
                if has_normals {
                    normals.push(mesh.normals[i]);
                }
                (positions.len() - 1) as u32
            });
            remap.push(index);
        }

        mesh.cells = mesh
            .cells
            .iter()
            .map(|cell| -> Cell { cell.map(|i| remap[i as usize]) })
            .collect();
        mesh.positions = positions;
        mesh.uvs = uvs;
        mesh.normals = normals;
    }
}
