//! Icosphere generation
//!
//! Starts from a regular icosahedron, splits every face into four per
//! subdivision pass, then projects the vertices onto the sphere.

use glam::Vec3;
use tracing::{debug, warn};

use crate::modifiers::subdivide_once;
use crate::types::Mesh;

/// Icosphere parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IcosphereInitializer {
    /// Number of subdivision passes (each multiplies the triangle count by 4)
    pub subdivisions: u32,
    /// Final sphere radius
    pub radius: f32,
}

impl Default for IcosphereInitializer {
    fn default() -> Self {
        Self {
            subdivisions: 0,
            radius: 1.0,
        }
    }
}

impl IcosphereInitializer {
    pub fn with_subdivisions(mut self, subdivisions: u32) -> Self {
        self.subdivisions = subdivisions;
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn generate(&self) -> Mesh {
        generate_icosphere(self.subdivisions, self.radius)
    }
}

/// The 20 faces of the base icosahedron, counter-clockwise from outside
const ICOSAHEDRON_CELLS: [[u32; 3]; 20] = [
    // Around vertex 0
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    // Adjacent faces
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    // Around vertex 3
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    // Adjacent faces
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// Build the unnormalized icosahedron: three orthogonal golden rectangles
fn icosahedron() -> Mesh {
    let t = 0.5 + 5.0_f32.sqrt() / 2.0;

    let positions = vec![
        Vec3::new(-1.0, t, 0.0),
        Vec3::new(1.0, t, 0.0),
        Vec3::new(-1.0, -t, 0.0),
        Vec3::new(1.0, -t, 0.0),
        Vec3::new(0.0, -1.0, t),
        Vec3::new(0.0, 1.0, t),
        Vec3::new(0.0, -1.0, -t),
        Vec3::new(0.0, 1.0, -t),
        Vec3::new(t, 0.0, -1.0),
        Vec3::new(t, 0.0, 1.0),
        Vec3::new(-t, 0.0, -1.0),
        Vec3::new(-t, 0.0, 1.0),
    ];

    Mesh {
        positions,
        cells: ICOSAHEDRON_CELLS.to_vec(),
        ..Mesh::default()
    }
}

/// Generate an icosphere with smooth normals
///
/// # Arguments
/// * `subdivisions` - Number of subdivision passes
/// * `radius` - Sphere radius
///
/// # Returns
/// Mesh with `10 * 4^n + 2` vertices and `20 * 4^n` triangles, unit normals and
/// no UVs. With `subdivisions = 0` this is the icosahedron itself.
///
/// A zero or negative radius is not rejected: the result is collapsed or turned
/// inside out, and normals still point outward.
pub fn generate_icosphere(subdivisions: u32, radius: f32) -> Mesh {
    if radius <= 0.0 {
        warn!("generate_icosphere: radius {} is not positive, mesh will be degenerate", radius);
    }

    let mut mesh = icosahedron();

    for _ in 0..subdivisions {
        subdivide_once(&mut mesh);
    }

    // Project the faceted solid back onto the unit sphere
    for position in &mut mesh.positions {
        *position = position.normalize();
    }

    mesh.normals = mesh.positions.clone();

    if radius != 1.0 {
        for position in &mut mesh.positions {
            *position *= radius;
        }
    }

    debug!(
        "generate_icosphere: {} subdivisions -> {} vertices, {} triangles",
        subdivisions,
        mesh.vertex_count(),
        mesh.triangle_count()
    );

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashbrown::HashMap;

    #[test]
    fn test_base_icosahedron() {
        let mesh = generate_icosphere(0, 1.0);

        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.triangle_count(), 20);
        assert!(mesh.uvs.is_empty());
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_vertex_and_triangle_counts() {
        for (subdivisions, vertices, triangles) in [(1, 42, 80), (2, 162, 320), (3, 642, 1280)] {
            let mesh = generate_icosphere(subdivisions, 1.0);
            assert_eq!(mesh.vertex_count(), vertices);
            assert_eq!(mesh.triangle_count(), triangles);
        }
    }

    #[test]
    fn test_vertices_lie_on_radius() {
        for radius in [0.25, 1.0, 3.5] {
            for subdivisions in 0..4 {
                let mesh = generate_icosphere(subdivisions, radius);
                for p in &mesh.positions {
                    assert!((p.length() - radius).abs() < 1e-4 * radius.max(1.0));
                }
            }
        }
    }

    #[test]
    fn test_normals_are_unit_radial() {
        let mesh = generate_icosphere(2, 2.0);

        assert_eq!(mesh.normals.len(), mesh.positions.len());
        for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
            assert!((n.length() - 1.0).abs() < 1e-5);
            assert!((*p / 2.0 - *n).length() < 1e-5);
        }
    }

    #[test]
    fn test_every_edge_shared_by_two_triangles() {
        let mesh = generate_icosphere(3, 1.0);

        let mut edges: HashMap<(u32, u32), usize> = HashMap::new();
        for cell in &mesh.cells {
            for k in 0..3 {
                let (a, b) = (cell[k], cell[(k + 1) % 3]);
                *edges.entry((a.min(b), a.max(b))).or_insert(0) += 1;
            }
        }

        assert_eq!(edges.len(), mesh.triangle_count() * 3 / 2);
        assert!(edges.values().all(|&count| count == 2));
    }

    #[test]
    fn test_faces_point_outward() {
        let mesh = generate_icosphere(2, 1.0);

        for cell in &mesh.cells {
            let [a, b, c] = cell.map(|i| mesh.positions[i as usize]);
            let face_normal = (b - a).cross(c - a);
            assert!(face_normal.dot(a + b + c) > 0.0);
        }
    }

    #[test]
    fn test_initializer_defaults() {
        let init = IcosphereInitializer::default();
        assert_eq!(init.subdivisions, 0);
        assert_eq!(init.radius, 1.0);

        let mesh = init.with_subdivisions(1).with_radius(0.5).generate();
        assert_eq!(mesh.vertex_count(), 42);
        assert!((mesh.positions[0].length() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_radius_is_accepted() {
        let mesh = generate_icosphere(1, 0.0);
        assert!(mesh.positions.iter().all(|p| *p == Vec3::ZERO));
        assert!(mesh.normals.iter().all(|n| (n.length() - 1.0).abs() < 1e-5));
    }
}
