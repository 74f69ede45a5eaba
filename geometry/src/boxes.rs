//! Segmented box generation
//!
//! A box is assembled from six flat grid panels. Each panel is generated in 2D,
//! centered at the origin, then placed on its face of the box:
//!
//! ```text
//!        +Y  -Z
//!         |  /
//!         | /
//!  -X ----+----- +X
//!        /|
//!       / |
//!     +Z  -Y
//! ```
//!
//! Faces do not share vertices, so each keeps a flat normal and its own UVs.

use glam::{UVec3, Vec2, Vec3};
use tracing::debug;

use crate::error::GeometryError;
use crate::types::{Cell, Mesh};

/// Box parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxInitializer {
    /// Extent along each axis
    pub size: Vec3,
    /// Grid cells per panel edge along each axis (each at least 1)
    pub segments: UVec3,
}

impl Default for BoxInitializer {
    fn default() -> Self {
        Self {
            size: Vec3::ONE,
            segments: UVec3::ONE,
        }
    }
}

impl BoxInitializer {
    pub fn with_size(mut self, x: f32, y: f32, z: f32) -> Self {
        self.size = Vec3::new(x, y, z);
        self
    }

    pub fn with_segments(mut self, x: u32, y: u32, z: u32) -> Self {
        self.segments = UVec3::new(x, y, z);
        self
    }

    /// Generate the box
    ///
    /// # Panics
    /// Panics if any segment count is zero or the box needs more than `u32::MAX` vertices.
    pub fn generate(&self) -> Mesh {
        generate_box(self.size, self.segments)
    }

    /// Generate the box, reporting zero or oversized segment counts as an error
    pub fn try_generate(&self) -> Result<Mesh, GeometryError> {
        try_generate_box(self.size, self.segments)
    }
}

/// Size and subdivision of one flat panel
#[derive(Debug, Clone, Copy)]
struct PanelConfig {
    width: f32,
    height: f32,
    segments_x: u32,
    segments_y: u32,
}

/// One face of the box, before and after placement in 3D
#[derive(Debug, Clone)]
struct Panel {
    positions_2d: Vec<Vec2>,
    positions: Vec<Vec3>,
    cells: Vec<Cell>,
    uvs: Vec<Vec2>,
    normals: Vec<Vec3>,
    vertex_count: u32,
}

/// Grid points row by row, from the bottom row (`-height/2`) up
fn generate_grid(config: &PanelConfig) -> Vec<Vec<Vec2>> {
    let step_x = config.width / config.segments_x as f32;
    let step_y = config.height / config.segments_y as f32;
    let half_x = config.width / 2.0;
    let half_y = config.height / 2.0;

    (0..=config.segments_y)
        .map(|i| {
            let y = step_y * i as f32 - half_y;
            (0..=config.segments_x)
                .map(|j| Vec2::new(step_x * j as f32 - half_x, y))
                .collect()
        })
        .collect()
}

fn cell_index(config: &PanelConfig, x: u32, y: u32) -> u32 {
    (config.segments_x + 1) * y + x
}

/// Two triangles per grid quad
fn generate_cells(config: &PanelConfig) -> Vec<Cell> {
    let mut cells =
        Vec::with_capacity(config.segments_x as usize * config.segments_y as usize * 2);

    for x in 0..config.segments_x {
        for y in 0..config.segments_y {
            //   d __ c
            //    |  |
            //    |__|
            //   a    b
            let a = cell_index(config, x, y);
            let b = cell_index(config, x + 1, y);
            let c = cell_index(config, x + 1, y + 1);
            let d = cell_index(config, x, y + 1);

            cells.push([a, b, c]);
            cells.push([c, d, a]);
        }
    }

    cells
}

/// Map panel-local coordinates into [0, 1]
fn generate_uvs(positions: &[Vec2], config: &PanelConfig) -> Vec<Vec2> {
    positions
        .iter()
        .map(|p| Vec2::new(p.x / config.width + 0.5, p.y / config.height + 0.5))
        .collect()
}

fn generate_panel(config: PanelConfig) -> Panel {
    let positions_2d: Vec<Vec2> = generate_grid(&config).into_iter().flatten().collect();

    Panel {
        uvs: generate_uvs(&positions_2d, &config),
        cells: generate_cells(&config),
        vertex_count: (config.segments_x + 1) * (config.segments_y + 1),
        positions_2d,
        positions: Vec::new(),
        normals: Vec::new(),
    }
}

impl Panel {
    /// Place the panel in 3D and give every vertex the face normal
    fn place(mut self, normal: Vec3, map: impl Fn(Vec2) -> Vec3) -> Self {
        self.positions = self.positions_2d.iter().map(|&p| map(p)).collect();
        self.normals = vec![normal; self.positions.len()];
        self
    }
}

/// Build the six placed panels in merge order: +Z, -Z, +X, -X, +Y, -Y
fn generate_box_panels(size: Vec3, segments: UVec3) -> [Panel; 6] {
    let half = size / 2.0;

    let z_panel = generate_panel(PanelConfig {
        width: size.x,
        height: size.y,
        segments_x: segments.x,
        segments_y: segments.y,
    });
    let x_panel = generate_panel(PanelConfig {
        width: size.z,
        height: size.y,
        segments_x: segments.z,
        segments_y: segments.y,
    });
    let y_panel = generate_panel(PanelConfig {
        width: size.x,
        height: size.z,
        segments_x: segments.x,
        segments_y: segments.z,
    });

    // Each mapping keeps the panel's triangles counter-clockwise seen from outside
    #[rustfmt::skip]
    let panels = [
        z_panel.clone().place(Vec3::Z,     |p| Vec3::new(    p.x,     p.y,  half.z)),
        z_panel        .place(Vec3::NEG_Z, |p| Vec3::new(    p.x,    -p.y, -half.z)),
        x_panel.clone().place(Vec3::X,     |p| Vec3::new( half.x,    -p.y,     p.x)),
        x_panel        .place(Vec3::NEG_X, |p| Vec3::new(-half.x,     p.y,     p.x)),
        y_panel.clone().place(Vec3::Y,     |p| Vec3::new(    p.x,  half.y,    -p.y)),
        y_panel        .place(Vec3::NEG_Y, |p| Vec3::new(    p.x, -half.y,     p.y)),
    ];

    panels
}

/// Shift each panel's local indices by the vertices of the panels before it
fn offset_cell_indices(panels: &mut [Panel]) {
    let mut offset = 0;

    for panel in panels {
        for cell in &mut panel.cells {
            for index in cell {
                *index += offset;
            }
        }
        offset += panel.vertex_count;
    }
}

fn check_segments(segments: UVec3) -> Result<(), GeometryError> {
    for (axis, value) in [('x', segments.x), ('y', segments.y), ('z', segments.z)] {
        if value == 0 {
            return Err(GeometryError::InvalidSegments { axis, value });
        }
    }

    let count = box_vertex_count(segments);
    if count > u32::MAX as u128 {
        return Err(GeometryError::TooManyVertices { segments, count });
    }
    Ok(())
}

/// Vertices of all six panels, wide enough for any `u32` segment counts
fn box_vertex_count(segments: UVec3) -> u128 {
    let [x, y, z] = segments.to_array().map(|s| s as u128 + 1);
    2 * (x * y + z * y + x * z)
}

/// Generate a box centered at the origin
///
/// # Arguments
/// * `size` - Extent along X, Y and Z
/// * `segments` - Grid cells per panel edge along X, Y and Z
///
/// # Returns
/// Mesh with positions, UVs, per-face normals and cells. The +Z and -Z panels
/// have `(segments.x + 1) * (segments.y + 1)` vertices, the ±X panels
/// `(segments.z + 1) * (segments.y + 1)` and the ±Y panels
/// `(segments.x + 1) * (segments.z + 1)`.
///
/// # Panics
/// Panics if any segment count is zero, or if the box would need more
/// vertices than `u32` indices can address. Use [`try_generate_box`] to get an
/// error instead.
pub fn generate_box(size: Vec3, segments: UVec3) -> Mesh {
    match try_generate_box(size, segments) {
        Ok(mesh) => mesh,
        Err(err) => panic!("generate_box: {}", err),
    }
}

/// Generate a box centered at the origin, rejecting zero or oversized segment counts
pub fn try_generate_box(size: Vec3, segments: UVec3) -> Result<Mesh, GeometryError> {
    check_segments(segments)?;

    let mut panels = generate_box_panels(size, segments);
    offset_cell_indices(&mut panels);

    let total_vertices: usize = panels.iter().map(|p| p.positions.len()).sum();
    let total_cells: usize = panels.iter().map(|p| p.cells.len()).sum();

    let mut mesh = Mesh::new();
    mesh.positions.reserve(total_vertices);
    mesh.uvs.reserve(total_vertices);
    mesh.normals.reserve(total_vertices);
    mesh.cells.reserve(total_cells);

    for panel in panels {
        mesh.positions.extend(panel.positions);
        mesh.uvs.extend(panel.uvs);
        mesh.normals.extend(panel.normals);
        mesh.cells.extend(panel.cells);
    }

    debug!(
        "generate_box: size={} segments={} -> {} vertices, {} triangles",
        size,
        segments,
        mesh.vertex_count(),
        mesh.triangle_count()
    );

    Ok(mesh)
}
