//! viz.toml manifest parsing
//!
//! A manifest lists the meshes to build, one `[[meshes]]` table per output.

use anyhow::{Context, Result};
use hashbrown::HashSet;
use serde::Deserialize;
use std::path::Path;

use viz_geometry::SphereCluster;

/// viz.toml manifest structure
#[derive(Debug, Deserialize)]
pub struct VizManifest {
    /// Output directory, relative to the manifest (default: the manifest's directory)
    pub output_dir: Option<String>,
    #[serde(default)]
    pub meshes: Vec<MeshEntry>,
}

/// One mesh to build
#[derive(Debug, Clone, Deserialize)]
pub struct MeshEntry {
    pub id: String,
    /// Output file name inside the output directory (default: `<id>.obj`)
    pub output: Option<String>,
    /// Merge coincident vertices and re-estimate normals after generation
    #[serde(default)]
    pub weld: bool,
    #[serde(flatten)]
    pub shape: ShapeSpec,
}

/// Mesh source, selected by the `kind` key
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ShapeSpec {
    Icosphere {
        #[serde(default = "default_subdivisions")]
        subdivisions: u32,
        #[serde(default = "default_radius")]
        radius: f32,
    },
    Box {
        #[serde(default = "default_size")]
        size: [f32; 3],
        #[serde(default = "default_segments")]
        segments: [u32; 3],
    },
    /// External OBJ file, path relative to the manifest. Normals are re-estimated.
    Obj { path: String },
    Cluster {
        #[serde(default = "default_count")]
        count: u32,
        #[serde(default)]
        seed: u64,
    },
}

fn default_subdivisions() -> u32 {
    2
}

fn default_radius() -> f32 {
    1.0
}

fn default_size() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

fn default_segments() -> [u32; 3] {
    [1, 1, 1]
}

fn default_count() -> u32 {
    SphereCluster::default().count
}

impl MeshEntry {
    /// Output file name for this entry
    pub fn output_file(&self) -> String {
        self.output.clone().unwrap_or_else(|| format!("{}.obj", self.id))
    }
}

impl ShapeSpec {
    pub fn kind(&self) -> &'static str {
        match self {
            ShapeSpec::Icosphere { .. } => "icosphere",
            ShapeSpec::Box { .. } => "box",
            ShapeSpec::Obj { .. } => "obj",
            ShapeSpec::Cluster { .. } => "cluster",
        }
    }
}

impl VizManifest {
    /// Load manifest from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse manifest from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse viz.toml")
    }

    /// Validate manifest entries
    pub fn validate(&self) -> Result<()> {
        if self.meshes.is_empty() {
            anyhow::bail!("viz.toml has no [[meshes]] entries");
        }

        let mut ids = HashSet::new();
        for entry in &self.meshes {
            if entry.id.is_empty() {
                anyhow::bail!("Mesh entry with empty id in viz.toml");
            }
            if !ids.insert(entry.id.as_str()) {
                anyhow::bail!("Duplicate mesh id '{}' in viz.toml", entry.id);
            }

            if let ShapeSpec::Box { segments, .. } = &entry.shape {
                for (axis, &value) in ["x", "y", "z"].iter().zip(segments) {
                    if value == 0 {
                        anyhow::bail!(
                            "Invalid segments for '{}': {} segments must be at least 1",
                            entry.id,
                            axis
                        );
                    }
                }
            }
        }

        Ok(())
    }
}
