//! Island terrain and drainage: height synthesis, smoothing, ocean
//! classification, flow routing, water accumulation and erosion.

pub mod accumulation;
pub mod constants;
pub mod erosion;
pub mod flow;
pub mod grid;
pub mod heightfield;
pub mod ocean;

pub use accumulation::{WaterAccumulation, accumulate_water, max_accumulation};
pub use erosion::{ErosionSimulator, Hydrology};
pub use flow::{FlowDirection, FlowGrid, compute_flow_directions, downstream};
pub use grid::{Grid, HeightMap, OceanMask, Point};
pub use heightfield::{island_noise, smooth_heightmap, synthesize_heightmap};
pub use ocean::{classify_ocean, is_sea_level, ocean_seed};
