//! viz-cli library
//!
//! Manifest parsing and mesh building used by the `viz` binary.

pub mod build;
pub mod manifest;

pub use build::{build_all, build_mesh, estimate_outward_normals, write_mesh};
pub use manifest::{MeshEntry, ShapeSpec, VizManifest};
