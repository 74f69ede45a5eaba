//! Procedural geometry for viz
//!
//! Generates indexed triangle meshes (icospheres and segmented boxes), estimates
//! smooth vertex normals, and provides the modifiers, combining and OBJ I/O used
//! by the `viz` tool.
//!
//! Every generator returns a fresh [`Mesh`] owned by the caller. Nothing in this
//! crate holds global state: randomness always comes from a generator passed in
//! by the caller.
//!
//! # Example
//! ```no_run
//! use viz_geometry::*;
//!
//! let mut ball = generate_icosphere(2, 0.5);
//! ball.apply(Transform::translate(0.0, 1.0, 0.0));
//!
//! let floor = generate_box(Vec3::new(4.0, 0.1, 4.0), UVec3::new(4, 1, 4));
//!
//! let scene = combine(&[&ball, &floor]);
//! write_obj(&scene, "scene.obj".as_ref(), "scene")?;
//! # Ok::<(), std::io::Error>(())
//! ```

mod boxes;
mod combine;
mod error;
mod icosphere;
mod math;
mod modifiers;
mod normals;
mod obj;
mod random;
mod scene;
mod types;

pub use boxes::{BoxInitializer, generate_box, try_generate_box};
pub use combine::{combine, combine_transformed};
pub use error::GeometryError;
pub use icosphere::{IcosphereInitializer, generate_icosphere};
pub use math::{Mat4, UVec3, Vec2, Vec3, VectorKey};
pub use modifiers::{AngleWeightedNormals, MeshApply, MeshModifier, Subdivide, Transform, Weld};
pub use normals::{DEFAULT_NORMAL, compute_angle_weighted_normals};
pub use obj::{parse_obj, read_obj, write_obj, write_obj_to};
pub use random::{random_pow, random_range, random_spherical, seeded_rng};
pub use scene::SphereCluster;
pub use types::{Cell, Mesh};
