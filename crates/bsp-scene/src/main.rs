//! Builds a random BSP scene, verifies it and runs segment queries against it.

use std::process::ExitCode;
use std::time::Instant;

use bsp_partition::{BspTree, GeometryError};
use bsp_scene::random::random_segment;
use bsp_scene::{random_polygons, shapes, verify_tree, ConfigError, InvariantViolation, SceneConfig};
use clap::Parser;
use log::{debug, error, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;

/// Generate random polygons, partition them and query the tree.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of random polygons
    #[arg(long, default_value_t = 200)]
    polygons: usize,

    /// Seed for the generator; drawn at random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Lower bound of the scene box on every axis
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    min: f64,

    /// Upper bound of the scene box on every axis
    #[arg(long, default_value_t = 500.0, allow_hyphen_values = true)]
    max: f64,

    /// Largest in-plane offset of a vertex from its polygon's anchor
    #[arg(long, default_value_t = 2.0)]
    extent: f64,

    /// Vertices added around each anchor (2 gives triangles)
    #[arg(long, default_value_t = 2)]
    extra_vertices: usize,

    /// Number of random segment queries to run
    #[arg(long, default_value_t = 1000)]
    queries: usize,

    /// Also insert the demo cube scene
    #[arg(long)]
    cubes: bool,
}

impl Args {
    fn scene_config(&self) -> SceneConfig {
        SceneConfig {
            polygons: self.polygons,
            min: self.min,
            max: self.max,
            extent: self.extent,
            extra_vertices: self.extra_vertices,
        }
    }
}

#[derive(Debug, Error)]
enum RunError {
    #[error("invalid scene configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("tree verification failed: {0}")]
    Invariant(#[from] InvariantViolation),
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(&Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), RunError> {
    let seed = args.seed.unwrap_or_else(rand::random);
    info!("seed {seed}");
    let mut rng = StdRng::seed_from_u64(seed);

    let config = args.scene_config();
    let mut polygons = random_polygons(&mut rng, &config)?;
    if args.cubes {
        polygons.extend(shapes::demo_scene()?);
    }
    let inserted = polygons.len();

    let started = Instant::now();
    let tree = BspTree::from_polygons(polygons)?;
    info!(
        "built tree in {:?}: {} nodes, height {}",
        started.elapsed(),
        tree.len(),
        tree.height()
    );

    verify_tree(&tree)?;
    info!("tree invariants hold");

    let mut hits = 0;
    for i in 0..args.queries {
        let segment = random_segment(&mut rng, &config);
        if let Some(hit) = tree.trace(&segment) {
            debug!("query {i}: hit node {} at t={}", hit.node, hit.t);
            hits += 1;
        }
    }

    println!("polygons inserted : {inserted}");
    println!("polygons stored   : {}", tree.polygon_count());
    println!("at root           : {}", tree.root_polygons_count());
    println!("nodes             : {}", tree.len());
    println!("height            : {}", tree.height());
    println!("segment hits      : {hits}/{}", args.queries);

    Ok(())
}
