//! Angle-weighted vertex normal estimation
//!
//! Smooth normals for meshes that do not carry their own, e.g. meshes read from
//! OBJ files. Each triangle contributes its face normal to its three vertices,
//! weighted by the interior angle at that vertex, so a vertex shared by one wide
//! and many thin triangles is not dominated by the thin ones.

use glam::Vec3;
use tracing::debug;

/// Triangles with an edge shorter than this contribute nothing
const MIN_EDGE_LENGTH: f32 = 0.000001;

/// Accumulated normals shorter than this are replaced by [`DEFAULT_NORMAL`]
const MIN_NORMAL_LENGTH: f32 = 0.00000008;

/// Normal written for vertices that received no usable contribution
pub const DEFAULT_NORMAL: Vec3 = Vec3::X;

/// Compute angle-weighted normals from flat index and position buffers
///
/// # Arguments
/// * `cells` - Vertex indices, three per triangle (a trailing partial triangle is ignored)
/// * `positions` - Vertex positions, three floats per vertex
///
/// # Returns
/// One unit normal per vertex, flattened the same way as `positions`.
///
/// Face normals are `(b - a) × (b - c)`, so a triangle wound counter-clockwise
/// when seen from a viewer yields normals pointing away from that viewer.
/// Reverse the winding of each cell to get the opposite orientation.
///
/// Degenerate triangles (an edge shorter than 1e-6, or colinear vertices) are
/// skipped. Vertices left without a contribution get `(1, 0, 0)`. Indices must
/// be in range for `positions`; this is not checked beyond slice indexing.
pub fn compute_angle_weighted_normals(cells: &[u32], positions: &[f32]) -> Vec<f32> {
    let vertex_count = positions.len() / 3;
    let mut sums = vec![Vec3::ZERO; vertex_count];
    let mut skipped = 0usize;

    let position = |index: u32| Vec3::from_slice(&positions[index as usize * 3..]);

    for cell in cells.chunks_exact(3) {
        let (ia, ib, ic) = (cell[0], cell[1], cell[2]);
        let (a, b, c) = (position(ia), position(ib), position(ic));

        let ab = a.distance(b);
        let bc = b.distance(c);
        let ca = c.distance(a);

        if ab.min(bc).min(ca) < MIN_EDGE_LENGTH {
            skipped += 1;
            continue;
        }

        // ab x bc with bc = b - c: counter-clockwise triangles face away from the viewer
        let normal = (b - a).cross(b - c).normalize_or_zero();
        if normal == Vec3::ZERO {
            skipped += 1;
            continue;
        }

        // Half-angle at each vertex from the inradius: tan(A/2) = r / (s - a)
        let s = 0.5 * (ab + bc + ca);
        let r = ((s - ab) * (s - bc) * (s - ca) / s).max(0.0).sqrt();

        sums[ia as usize] += r.atan2(s - bc) * normal;
        sums[ib as usize] += r.atan2(s - ca) * normal;
        sums[ic as usize] += r.atan2(s - ab) * normal;
    }

    if skipped > 0 {
        debug!("compute_angle_weighted_normals: skipped {} degenerate triangles", skipped);
    }

    let mut normals = Vec::with_capacity(vertex_count * 3);
    for sum in sums {
        let length = sum.length();
        let normal = if length < MIN_NORMAL_LENGTH {
            DEFAULT_NORMAL
        } else {
            sum / length
        };
        normals.extend_from_slice(&normal.to_array());
    }

    // Keep the output exactly as long as the input, even with a partial trailing vertex
    normals.resize(positions.len(), 0.0);
    normals
}
