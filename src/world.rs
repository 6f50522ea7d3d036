use crate::cancel::CancelFlag;
use crate::config::GenerationParams;
use crate::errors::{AtollError, AtollResult};
use crate::settlement::{
    connect_docks, connect_temple, find_docks_site, place_town_square, temple_candidates,
};
use crate::terrain::{
    ErosionSimulator, FlowGrid, HeightMap, OceanMask, Point, WaterAccumulation, classify_ocean,
    island_noise, max_accumulation, ocean_seed, smooth_heightmap, synthesize_heightmap,
};
use rand::SeedableRng;
use rand_pcg::Pcg64;

/// One finished island.
///
/// Built in a single pass by [`World::generate`] and never modified
/// afterwards; regenerating yields a new value.
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    heightmap: HeightMap,
    ocean_tiles: OceanMask,
    flow_directions: FlowGrid,
    water_accumulation: WaterAccumulation,
    water_level: f64,
    town_square: Point,
    temple: Option<Point>,
    docks: Option<Point>,
    temple_path: Option<Vec<Point>>,
    docks_path: Option<Vec<Point>>,
}

struct Landmarks {
    town_square: Point,
    temple: Option<Point>,
    docks: Option<Point>,
    temple_path: Option<Vec<Point>>,
    docks_path: Option<Vec<Point>>,
}

impl World {
    pub fn generate(params: &GenerationParams) -> AtollResult<Self> {
        Self::generate_with_cancel(params, &CancelFlag::new())
    }

    /// Run the whole pipeline, checking `cancel` before every stage and
    /// between erosion rounds.
    pub fn generate_with_cancel(params: &GenerationParams, cancel: &CancelFlag) -> AtollResult<Self> {
        params.validate_params()?;
        tracing::info!(
            seed = params.seed,
            grid_size = params.grid_size,
            "generating island"
        );

        cancel.checkpoint("synthesize")?;
        let noise = island_noise(params.seed);
        let raw = synthesize_heightmap(params, &noise);
        tracing::debug!(size = raw.size(), "height field synthesized");

        cancel.checkpoint("smooth")?;
        let smoothed = smooth_heightmap(&raw, params.smooth_iterations);
        tracing::debug!(iterations = params.smooth_iterations, "height field smoothed");

        let erosion =
            ErosionSimulator::new(params.erosion_rate as f32, params.erosion_iterations);
        let hydrology = erosion.run(smoothed, cancel)?;

        cancel.checkpoint("ocean")?;
        let ocean_tiles = classify_ocean(
            &hydrology.heightmap,
            ocean_seed(hydrology.heightmap.size()),
        );
        tracing::debug!(
            ocean_cells = ocean_tiles.cells().iter().filter(|&&ocean| ocean).count(),
            "ocean classified"
        );

        cancel.checkpoint("landmarks")?;
        let landmarks = place_landmarks(params, &hydrology.heightmap, &ocean_tiles, cancel)?;

        let world = Self {
            heightmap: hydrology.heightmap,
            ocean_tiles,
            flow_directions: hydrology.flow,
            water_accumulation: hydrology.accumulation,
            water_level: params.water_level,
            town_square: landmarks.town_square,
            temple: landmarks.temple,
            docks: landmarks.docks,
            temple_path: landmarks.temple_path,
            docks_path: landmarks.docks_path,
        };
        tracing::info!(
            town_square = %world.town_square,
            temple = world.temple.is_some(),
            docks = world.docks.is_some(),
            "island generated"
        );
        Ok(world)
    }

    pub fn heightmap(&self) -> &HeightMap {
        &self.heightmap
    }

    pub fn ocean_tiles(&self) -> &OceanMask {
        &self.ocean_tiles
    }

    pub fn flow_directions(&self) -> &FlowGrid {
        &self.flow_directions
    }

    pub fn water_accumulation(&self) -> &WaterAccumulation {
        &self.water_accumulation
    }

    /// Render hint carried over from the params
    pub fn water_level(&self) -> f64 {
        self.water_level
    }

    pub fn town_square(&self) -> Point {
        self.town_square
    }

    pub fn temple(&self) -> Option<Point> {
        self.temple
    }

    pub fn docks(&self) -> Option<Point> {
        self.docks
    }

    pub fn temple_path(&self) -> Option<&[Point]> {
        self.temple_path.as_deref()
    }

    pub fn docks_path(&self) -> Option<&[Point]> {
        self.docks_path.as_deref()
    }

    pub fn size(&self) -> u32 {
        self.heightmap.size()
    }

    pub fn ocean_cell_count(&self) -> usize {
        self.ocean_tiles.cells().iter().filter(|&&ocean| ocean).count()
    }

    pub fn max_accumulation(&self) -> u32 {
        max_accumulation(&self.water_accumulation)
    }
}

fn place_landmarks(
    params: &GenerationParams,
    heightmap: &HeightMap,
    ocean: &OceanMask,
    cancel: &CancelFlag,
) -> AtollResult<Landmarks> {
    let mut rng = Pcg64::seed_from_u64(params.seed);
    let town_square = place_town_square(heightmap, params.island_threshold_f32(), &mut rng)?;
    tracing::debug!(%town_square, "town square placed");

    cancel.checkpoint("temple")?;
    let candidates = temple_candidates(
        heightmap,
        town_square,
        params.temple_min_radius,
        params.temple_max_radius,
    );
    let (temple, temple_path) = if candidates.is_empty() {
        tracing::debug!("no ground above the town square, temple skipped");
        (None, None)
    } else {
        match recover_path(connect_temple(
            heightmap,
            town_square,
            &candidates,
            params.max_road_slope,
        ))? {
            Some((temple, path)) => (Some(temple), Some(path)),
            None => (None, None),
        }
    };

    cancel.checkpoint("docks")?;
    let (docks, docks_path) = match find_docks_site(ocean, town_square) {
        Some(site) => match recover_path(connect_docks(heightmap, ocean, town_square))? {
            Some(path) => (Some(site), Some(path)),
            None => (None, None),
        },
        None => {
            tracing::debug!("no open sea, docks skipped");
            (None, None)
        }
    };

    Ok(Landmarks {
        town_square,
        temple,
        docks,
        temple_path,
        docks_path,
    })
}

/// A road that cannot be built leaves its landmark out instead of failing
fn recover_path<T>(result: AtollResult<T>) -> AtollResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(error @ AtollError::PathNotFound { .. }) => {
            tracing::warn!(%error, "landmark dropped");
            Ok(None)
        }
        Err(error) => Err(error),
    }
}
