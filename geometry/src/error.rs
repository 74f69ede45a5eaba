//! Error type for the checked parts of the geometry API

/// Errors reported by mesh validation, box generation and OBJ I/O.
///
/// The generators themselves are total: they only fail through the `try_`
/// variants when a precondition is violated.
#[derive(Debug, thiserror::Error)]
pub enum GeometryError {
    /// A box segment count was zero
    #[error("{axis} segments must be at least 1 (got {value})")]
    InvalidSegments { axis: char, value: u32 },

    /// A box needs more vertices than `u32` cell indices can address
    #[error("box with segments {segments} needs {count} vertices, more than u32 indices can address")]
    TooManyVertices { segments: glam::UVec3, count: u128 },

    /// A cell references a vertex that does not exist
    #[error("cell {cell} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfBounds {
        cell: usize,
        index: u32,
        vertex_count: usize,
    },

    /// A per-vertex attribute is not parallel to the positions
    #[error("{attribute} has {len} entries but the mesh has {expected} vertices")]
    AttributeLength {
        attribute: &'static str,
        len: usize,
        expected: usize,
    },

    /// Malformed OBJ input
    #[error("OBJ line {line}: {message}")]
    ObjParse { line: usize, message: String },

    /// Underlying I/O failure
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
