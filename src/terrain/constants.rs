/// Constants for island generation
/// Heights at or below this are sea level
pub const SEA_LEVEL_EPSILON: f32 = 0.001;

/// Steepest descents flatter than this make a cell a sink
pub const SLOPE_TOLERANCE: f32 = 1e-6;

/// Slope assigned to any step into sea-level water
pub const OCEAN_FORCED_SLOPE: f32 = 1.0;

/// Smoothing kernel: centre weight, each of the eight neighbours weighs 1
pub const SMOOTH_CENTER_WEIGHT: f32 = 3.0;
pub const SMOOTH_DIVISOR: f32 = 11.0;

/// Noise source settings
pub const NOISE_OCTAVES: usize = 4;
pub const NOISE_PERSISTENCE: f64 = 0.5;

/// Depth removed from the wettest cell per erosion round at `erosion_rate = 1`
pub const EROSION_DEPTH_SCALE: f32 = 0.05;

/// Landmark placement defaults
pub const DEFAULT_TEMPLE_MIN_RADIUS: u32 = 5;
pub const DEFAULT_TEMPLE_MAX_RADIUS: u32 = 10;

/// Pathfinding constants
pub const MAX_PATH_ATTEMPTS: u32 = 5;
pub const DEFAULT_MAX_ROAD_SLOPE: f32 = 0.1;
/// Fixed-point scale for A* costs, which must be `Ord`
pub const PATH_COST_SCALE: f64 = 1_000_000.0;
