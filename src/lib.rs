pub mod cancel;
pub mod config;
pub mod errors;
pub mod settlement;
pub mod terrain;
pub mod world;

// Selective re-exports for external consumers

pub use cancel::CancelFlag;
pub use config::{GenerationParams, ParamsBuilder};
pub use errors::{AtollError, AtollResult, PathTarget};
pub use terrain::{FlowDirection, Grid, HeightMap, OceanMask, Point};
pub use world::World;
