use atoll::config::{load_params, save_params};
use atoll::{AtollResult, ParamsBuilder, World};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Clone)]
#[command(name = "atoll")]
#[command(about = "Generate an island with its rivers, town, temple and docks")]
struct Args {
    /// Params file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for reproducible generation
    #[arg(long)]
    seed: Option<u64>,

    /// Grid side length in cells
    #[arg(long)]
    size: Option<u32>,

    /// Noise frequency (0.01-0.3, smaller = broader features)
    #[arg(long)]
    noise_scale: Option<f64>,

    /// Minimum island height; anything lower becomes sea
    #[arg(long)]
    threshold: Option<f64>,

    /// Number of smoothing passes
    #[arg(long)]
    smooth: Option<u32>,

    /// Erosion strength (0.0-1.0)
    #[arg(long)]
    erosion_rate: Option<f64>,

    /// Number of erosion rounds
    #[arg(long)]
    erosion_iterations: Option<u32>,

    /// Steepest climb per cell a temple road may take
    #[arg(long)]
    max_slope: Option<f32>,

    /// Write the effective params back to the config file
    #[arg(long)]
    save_config: bool,
}

fn main() -> AtollResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let base = load_params(args.config.as_deref())?;
    let params = ParamsBuilder::new(base)
        .seed(args.seed)
        .grid_size(args.size)
        .noise_scale(args.noise_scale)
        .island_threshold(args.threshold)
        .smooth_iterations(args.smooth)
        .erosion(args.erosion_rate, args.erosion_iterations)
        .max_road_slope(args.max_slope)
        .build()?;

    if args.save_config {
        let path = save_params(&params, args.config.as_deref())?;
        println!("Params saved to: {}", path.display());
    }

    let world = World::generate(&params)?;
    print_world_summary(&world);
    Ok(())
}

fn print_world_summary(world: &World) {
    let total = (world.size() as usize).pow(2);
    let ocean = world.ocean_cell_count();

    println!("Island summary:");
    println!("  Grid: {0}x{0} ({total} cells)", world.size());
    println!("  Open sea: {ocean} cells, land and lakes: {} cells", total - ocean);
    println!("  Largest water accumulation: {}", world.max_accumulation());
    println!("  Town square: {}", world.town_square());

    match (world.temple(), world.temple_path()) {
        (Some(temple), Some(path)) => {
            println!("  Temple: {temple}, road of {} cells", path.len())
        }
        _ => println!("  Temple: none"),
    }
    match (world.docks(), world.docks_path()) {
        (Some(docks), Some(path)) => {
            println!("  Docks: {docks}, road of {} cells", path.len())
        }
        _ => println!("  Docks: none"),
    }
}
