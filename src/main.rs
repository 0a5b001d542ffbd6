use std::path::PathBuf;

use anyhow::{ ensure, Context, Result };
use clap::Parser;
use log::{ info, LevelFilter };

use sphere_tracer::consts::{ CANVAS_HEIGHT, CANVAS_WIDTH, NUM_THREADS,
    OUT_FILE, REFLECTION_RECURSION_DEPTH };
use sphere_tracer::parallel::parallel_render;
use sphere_tracer::scene::Scene;

/// Render a scene of spheres with Blinn-Phong shading, hard shadows and
/// mirror reflections.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Number of worker threads.
    #[clap(short, long, default_value_t = NUM_THREADS)]
    threads: usize,

    /// Image width in pixels.
    #[clap(short, long, default_value_t = CANVAS_WIDTH)]
    width: usize,

    /// Image height in pixels.
    #[clap(short = 'H', long, default_value_t = CANVAS_HEIGHT)]
    height: usize,

    /// Maximum number of reflection bounces per pixel.
    #[clap(short, long)]
    depth: Option<usize>,

    /// Output image; `.ppm` is written as text PPM, otherwise PNG.
    #[clap(short, long, default_value = OUT_FILE)]
    output: PathBuf,

    /// JSON scene description. Uses the built-in scene if absent.
    #[clap(short, long)]
    scene: Option<PathBuf>,

    /// Extra randomly placed spheres, for a heavier workload.
    #[clap(long, default_value_t = 0)]
    random_spheres: usize,

    /// Seed for `--random-spheres`.
    #[clap(long, default_value_t = 0)]
    seed: u64,

    /// More output (-v info, -vv debug, -vvv trace).
    #[clap(short, long, parse(from_occurrences))]
    verbose: u64,
}

fn init_logging(verbose: u64) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    // RUST_LOG, when set, wins over the -v flags
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    ensure!(args.threads > 0, "--threads must be at least 1");
    ensure!(args.width > 0 && args.height > 0,
        "image size must be positive, got {}x{}", args.width, args.height);

    let mut scene = match &args.scene {
        Some(path) => Scene::load(path, args.width, args.height)?,
        None => Scene::default_scene(args.width, args.height,
            REFLECTION_RECURSION_DEPTH),
    };

    if let Some(depth) = args.depth {
        scene.max_depth = depth;
    }

    if args.random_spheres > 0 {
        scene.add_random_spheres(args.random_spheres, args.seed);
    }

    let (canvas, stats) = parallel_render(&scene, args.threads)?;
    println!("Render finished in {:.3} seconds.", stats.elapsed.as_secs_f64());

    canvas.save(&args.output)
        .with_context(|| format!("saving render to {}", args.output.display()))?;
    info!("Saved render to {}.", args.output.display());

    Ok(())
}
