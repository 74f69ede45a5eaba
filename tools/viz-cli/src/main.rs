//! viz - procedural mesh tool
//!
//! Generates icospheres, boxes and sphere clusters as OBJ files, re-estimates
//! normals of existing OBJ meshes, and builds every mesh listed in a viz.toml
//! manifest.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use viz_cli::{VizManifest, build_all, estimate_outward_normals, write_mesh};
use viz_geometry::{BoxInitializer, IcosphereInitializer, MeshApply, SphereCluster, Weld, read_obj};

#[derive(Parser)]
#[command(name = "viz")]
#[command(about = "Procedural mesh tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an icosphere
    Icosphere {
        /// Subdivision passes over the icosahedron
        #[arg(short, long, default_value_t = 2)]
        subdivisions: u32,

        /// Sphere radius
        #[arg(short, long, default_value_t = 1.0)]
        radius: f32,

        /// Output .obj file
        #[arg(short, long, default_value = "icosphere.obj")]
        output: PathBuf,
    },

    /// Generate a segmented box
    Box {
        /// Extent along X, Y and Z
        #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], default_values_t = [1.0, 1.0, 1.0])]
        size: Vec<f32>,

        /// Grid cells per panel edge along X, Y and Z
        #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], default_values_t = [1, 1, 1])]
        segments: Vec<u32>,

        /// Merge coincident panel vertices and smooth the normals
        #[arg(long)]
        weld: bool,

        /// Output .obj file
        #[arg(short, long, default_value = "box.obj")]
        output: PathBuf,
    },

    /// Re-estimate angle-weighted normals for an OBJ mesh
    Normals {
        /// Input .obj file
        input: PathBuf,

        /// Output .obj file (default: <input>.smooth.obj)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Merge coincident vertices before estimating normals
        #[arg(long)]
        weld: bool,
    },

    /// Generate the sphere cluster scene
    Cluster {
        /// Number of small spheres
        #[arg(short, long, default_value_t = 75)]
        count: u32,

        /// Random seed for placement and sizes
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Output .obj file
        #[arg(short, long, default_value = "cluster.obj")]
        output: PathBuf,
    },

    /// Build meshes from a manifest file
    Build {
        /// Path to viz.toml manifest
        #[arg(default_value = "viz.toml")]
        manifest: PathBuf,

        /// Output directory (overrides manifest)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate manifest without building
    Check {
        /// Path to viz.toml manifest
        #[arg(default_value = "viz.toml")]
        manifest: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Icosphere {
            subdivisions,
            radius,
            output,
        } => {
            let mesh = IcosphereInitializer::default()
                .with_subdivisions(subdivisions)
                .with_radius(radius)
                .generate();
            write_mesh(&mesh, &output, "icosphere")?;
        }

        Commands::Box {
            size,
            segments,
            weld,
            output,
        } => {
            let mut mesh = BoxInitializer::default()
                .with_size(size[0], size[1], size[2])
                .with_segments(segments[0], segments[1], segments[2])
                .try_generate()?;
            if weld {
                mesh.apply(Weld);
                estimate_outward_normals(&mut mesh);
            }
            write_mesh(&mesh, &output, "box")?;
        }

        Commands::Normals {
            input,
            output,
            weld,
        } => {
            let output = output.unwrap_or_else(|| input.with_extension("smooth.obj"));
            tracing::info!("Estimating normals {:?} -> {:?}", input, output);

            let mut mesh =
                read_obj(&input).with_context(|| format!("Failed to read {}", input.display()))?;
            if weld {
                mesh.apply(Weld);
            }
            estimate_outward_normals(&mut mesh);

            let name = input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("mesh")
                .to_string();
            write_mesh(&mesh, &output, &name)?;
        }

        Commands::Cluster {
            count,
            seed,
            output,
        } => {
            let mesh = SphereCluster {
                count,
                seed,
                ..SphereCluster::default()
            }
            .generate();
            write_mesh(&mesh, &output, "cluster")?;
        }

        Commands::Build { manifest, output } => {
            tracing::info!("Building meshes from {:?}", manifest);
            let config = VizManifest::load(&manifest)?;
            let manifest_dir = manifest.parent().unwrap_or_else(|| std::path::Path::new("."));
            let written = build_all(&config, manifest_dir, output.as_deref())?;
            tracing::info!("Build complete! {} meshes written", written.len());
        }

        Commands::Check { manifest } => {
            tracing::info!("Checking manifest {:?}", manifest);
            let config = VizManifest::load(&manifest)?;
            config.validate()?;
            tracing::info!("Manifest is valid! {} meshes", config.meshes.len());
        }
    }

    Ok(())
}
