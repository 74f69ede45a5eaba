//! Sphere cluster scene
//!
//! One large icosphere with many small icospheres scattered over its surface,
//! merged into a single mesh.

use glam::{Mat4, Vec3};
use tracing::debug;

use crate::combine::combine_transformed;
use crate::icosphere::generate_icosphere;
use crate::random::{random_pow, random_spherical, seeded_rng};
use crate::types::Mesh;

/// Parameters for the sphere cluster
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereCluster {
    /// Number of small spheres
    pub count: u32,
    /// Radius of the central sphere (small spheres sit on its surface)
    pub big_radius: f32,
    pub small_radius_min: f32,
    pub small_radius_max: f32,
    pub big_subdivisions: u32,
    pub small_subdivisions: u32,
    /// PRNG seed for placement and sizes
    pub seed: u64,
}

impl Default for SphereCluster {
    fn default() -> Self {
        Self {
            count: 75,
            big_radius: 0.9,
            small_radius_min: 0.02,
            small_radius_max: 0.15,
            big_subdivisions: 3,
            small_subdivisions: 2,
            seed: 0,
        }
    }
}

impl SphereCluster {
    /// Generate the merged cluster mesh
    ///
    /// Small sphere radii are drawn with a cubic bias towards
    /// `small_radius_min`. The result depends only on the parameters.
    pub fn generate(&self) -> Mesh {
        let mut rng = seeded_rng(self.seed);

        let big = generate_icosphere(self.big_subdivisions, self.big_radius);
        let small = generate_icosphere(self.small_subdivisions, 1.0);

        let mut parts = Vec::with_capacity(self.count as usize + 1);
        parts.push((&big, Mat4::IDENTITY));

        for _ in 0..self.count {
            let position = random_spherical(&mut rng, self.big_radius, Vec3::ZERO);
            let radius = random_pow(&mut rng, self.small_radius_min, self.small_radius_max, 3);
            parts.push((
                &small,
                Mat4::from_translation(position) * Mat4::from_scale(Vec3::splat(radius)),
            ));
        }

        let mesh = combine_transformed(&parts);

        debug!(
            "SphereCluster: {} spheres -> {} vertices, {} triangles",
            self.count + 1,
            mesh.vertex_count(),
            mesh.triangle_count()
        );

        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_counts() {
        let cluster = SphereCluster {
            count: 5,
            big_subdivisions: 1,
            small_subdivisions: 0,
            ..SphereCluster::default()
        };
        let mesh = cluster.generate();

        assert_eq!(mesh.vertex_count(), 42 + 5 * 12);
        assert_eq!(mesh.triangle_count(), 80 + 5 * 20);
        assert_eq!(mesh.normals.len(), mesh.vertex_count());
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_cluster_is_deterministic() {
        let cluster = SphereCluster {
            count: 10,
            seed: 99,
            ..SphereCluster::default()
        };
        assert_eq!(cluster.generate(), cluster.generate());

        let other = SphereCluster { seed: 100, ..cluster };
        assert_ne!(cluster.generate(), other.generate());
    }

    #[test]
    fn test_small_spheres_sit_on_big_sphere() {
        let cluster = SphereCluster {
            count: 20,
            big_subdivisions: 0,
            small_subdivisions: 0,
            ..SphereCluster::default()
        };
        let mesh = cluster.generate();

        // Small sphere vertices stay within max radius of the big sphere's surface
        for p in &mesh.positions[12..] {
            let distance = p.length();
            assert!(distance <= cluster.big_radius + cluster.small_radius_max + 1e-4);
            assert!(distance >= cluster.big_radius - cluster.small_radius_max - 1e-4);
        }
    }
}
