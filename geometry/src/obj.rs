//! Wavefront OBJ export and import
//!
//! Export writes every attribute the mesh has. Import reads positions and faces
//! only; normals of imported meshes are expected to be estimated afterwards with
//! [`AngleWeightedNormals`](crate::AngleWeightedNormals).

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use glam::Vec3;
use tracing::{debug, info};

use crate::error::GeometryError;
use crate::types::Mesh;

/// Write a mesh to an OBJ file
pub fn write_obj(mesh: &Mesh, path: &Path, name: &str) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_obj_to(&mut writer, mesh, name)?;
    writer.flush()?;

    info!(
        "Wrote {}: {} vertices, {} triangles",
        path.display(),
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(())
}

/// Write a mesh as OBJ text to any writer
///
/// Face references use `v`, `v/vt`, `v//vn` or `v/vt/vn` depending on which
/// attributes are present. Indices are 1-based.
pub fn write_obj_to<W: Write>(writer: &mut W, mesh: &Mesh, name: &str) -> io::Result<()> {
    writeln!(writer, "# {} vertices, {} triangles", mesh.vertex_count(), mesh.triangle_count())?;
    writeln!(writer, "o {}", name)?;

    for p in &mesh.positions {
        writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?;
    }
    for uv in &mesh.uvs {
        writeln!(writer, "vt {} {}", uv.x, uv.y)?;
    }
    for n in &mesh.normals {
        writeln!(writer, "vn {} {} {}", n.x, n.y, n.z)?;
    }

    let has_uvs = !mesh.uvs.is_empty();
    let has_normals = !mesh.normals.is_empty();

    for cell in &mesh.cells {
        write!(writer, "f")?;
        for &index in cell {
            let i = index + 1;
            match (has_uvs, has_normals) {
                (true, true) => write!(writer, " {}/{}/{}", i, i, i)?,
                (true, false) => write!(writer, " {}/{}", i, i)?,
                (false, true) => write!(writer, " {}//{}", i, i)?,
                (false, false) => write!(writer, " {}", i)?,
            }
        }
        writeln!(writer)?;
    }

    Ok(())
}

/// Read positions and faces from an OBJ file
pub fn read_obj(path: &Path) -> Result<Mesh, GeometryError> {
    let file = File::open(path)?;
    let mesh = parse_obj(BufReader::new(file))?;

    debug!(
        "Read {}: {} vertices, {} triangles",
        path.display(),
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// Parse OBJ text into a mesh of positions and triangles
///
/// Polygons are fan-triangulated around their first vertex. Face references may
/// carry texture/normal indices (`1/2/3`), which are ignored, and may be
/// negative (relative to the last vertex read). Other record types are skipped.
pub fn parse_obj<R: BufRead>(reader: R) -> Result<Mesh, GeometryError> {
    let mut mesh = Mesh::new();

    for (line_index, line) in reader.lines().enumerate() {
        let line_number = line_index + 1;
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("v") => {
                let mut coords = [0.0f32; 3];
                for coord in &mut coords {
                    let token = parts.next().ok_or_else(|| parse_error(line_number, "vertex needs 3 coordinates"))?;
                    *coord = token
                        .parse()
                        .map_err(|_| parse_error(line_number, format!("invalid coordinate '{}'", token)))?;
                }
                mesh.positions.push(Vec3::from_array(coords));
            }
            Some("f") => {
                let indices = parts
                    .map(|token| resolve_index(token, mesh.positions.len(), line_number))
                    .collect::<Result<Vec<u32>, GeometryError>>()?;

                if indices.len() < 3 {
                    return Err(parse_error(line_number, "face needs at least 3 vertices"));
                }

                for k in 1..indices.len() - 1 {
                    mesh.push_cell(indices[0], indices[k], indices[k + 1]);
                }
            }
            _ => {}
        }
    }

    Ok(mesh)
}

/// Resolve one face reference (`v`, `v/vt`, `v//vn`, `v/vt/vn`) to a 0-based index
fn resolve_index(token: &str, vertex_count: usize, line: usize) -> Result<u32, GeometryError> {
    let position = token.split('/').next().unwrap_or(token);
    let value: i64 = position
        .parse()
        .map_err(|_| parse_error(line, format!("invalid face index '{}'", token)))?;

    let resolved = if value < 0 {
        vertex_count as i64 + value
    } else {
        value - 1
    };

    if value == 0 || resolved < 0 || resolved >= vertex_count as i64 {
        return Err(parse_error(
            line,
            format!("face index {} out of range ({} vertices)", value, vertex_count),
        ));
    }

    Ok(resolved as u32)
}

fn parse_error(line: usize, message: impl Into<String>) -> GeometryError {
    GeometryError::ObjParse {
        line,
        message: message.into(),
    }
}
