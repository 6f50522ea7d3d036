use super::accumulation::{WaterAccumulation, accumulate_water, max_accumulation};
use super::constants::EROSION_DEPTH_SCALE;
use super::flow::{FlowGrid, compute_flow_directions};
use super::grid::HeightMap;
use super::ocean::is_sea_level;
use crate::cancel::CancelFlag;
use crate::errors::AtollResult;

/// Heightmap together with the drainage derived from it
#[derive(Debug, Clone, PartialEq)]
pub struct Hydrology {
    pub heightmap: HeightMap,
    pub flow: FlowGrid,
    pub accumulation: WaterAccumulation,
}

impl Hydrology {
    /// Route flow and accumulate water for `heightmap`
    pub fn derive(heightmap: HeightMap) -> Self {
        let flow = compute_flow_directions(&heightmap);
        let accumulation = accumulate_water(&flow);
        Self {
            heightmap,
            flow,
            accumulation,
        }
    }
}

/// Lowers terrain along wet flow paths, re-deriving drainage every round
#[derive(Debug, Clone)]
pub struct ErosionSimulator {
    pub erosion_rate: f32,
    pub iterations: u32,
}

impl ErosionSimulator {
    pub fn new(erosion_rate: f32, iterations: u32) -> Self {
        Self {
            erosion_rate,
            iterations,
        }
    }

    /// Depth removed from a land cell with accumulation `water` in a round
    /// whose wettest cell holds `max_water`
    pub fn erosion_depth(&self, water: u32, max_water: u32) -> f32 {
        if water == 0 || max_water == 0 {
            return 0.0;
        }
        let wetness = (water as f32 / max_water as f32).sqrt();
        self.erosion_rate * EROSION_DEPTH_SCALE * wetness
    }

    /// One erosion round: a new heightmap, never higher and never below 0
    pub fn erode(&self, hydrology: &Hydrology) -> HeightMap {
        let max_water = max_accumulation(&hydrology.accumulation);
        let mut eroded = hydrology.heightmap.clone();

        for (cell, &height) in hydrology.heightmap.iter() {
            if is_sea_level(height) {
                continue;
            }
            let depth = self.erosion_depth(hydrology.accumulation[cell], max_water);
            eroded[cell] = (height - depth).max(0.0);
        }

        eroded
    }

    /// Run every round, replacing the whole grid set each time.
    /// The returned drainage always matches the returned heightmap.
    pub fn run(&self, heightmap: HeightMap, cancel: &CancelFlag) -> AtollResult<Hydrology> {
        let mut current = Hydrology::derive(heightmap);

        for round in 0..self.iterations {
            cancel.checkpoint("erosion")?;
            let eroded = self.erode(&current);
            current = Hydrology::derive(eroded);
            tracing::debug!(
                round,
                max_accumulation = max_accumulation(&current.accumulation),
                "erosion round complete"
            );
        }

        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationParams;
    use crate::terrain::flow::downstream;
    use crate::terrain::grid::{Grid, Point};
    use crate::terrain::heightfield::{island_noise, smooth_heightmap, synthesize_heightmap};

    fn test_island() -> HeightMap {
        let params = GenerationParams {
            grid_size: 36,
            island_threshold: 0.2,
            ..Default::default()
        };
        smooth_heightmap(&synthesize_heightmap(&params, &island_noise(77)), 1)
    }

    #[test]
    fn test_depth_increases_with_water() {
        let simulator = ErosionSimulator::new(0.5, 1);
        assert_eq!(simulator.erosion_depth(0, 10), 0.0);
        let low = simulator.erosion_depth(2, 10);
        let high = simulator.erosion_depth(8, 10);
        assert!(low > 0.0 && high > low);
        assert!((simulator.erosion_depth(10, 10) - 0.5 * EROSION_DEPTH_SCALE).abs() < 1e-7);
    }

    #[test]
    fn test_heights_never_increase_across_rounds() {
        let simulator = ErosionSimulator::new(1.0, 1);
        let cancel = CancelFlag::new();
        let mut previous = test_island();

        for _ in 0..4 {
            let next = simulator.run(previous.clone(), &cancel).unwrap().heightmap;
            for (cell, &height) in next.iter() {
                assert!(height <= previous[cell]);
                assert!(height >= 0.0);
            }
            previous = next;
        }
    }

    #[test]
    fn test_never_below_zero_with_extreme_rate() {
        // Shallow land that a single round would cut through
        let heightmap = Grid::from_rows(vec![
            vec![0.0, 0.0, 0.0, 0.0],
            vec![0.0, 0.02, 0.01, 0.0],
            vec![0.0, 0.03, 0.02, 0.0],
            vec![0.0, 0.0, 0.0, 0.0],
        ])
        .unwrap();
        let hydrology = ErosionSimulator::new(1.0, 5)
            .run(heightmap, &CancelFlag::new())
            .unwrap();
        assert!(hydrology.heightmap.cells().iter().all(|&h| h >= 0.0));
    }

    #[test]
    fn test_drainage_matches_final_heightmap() {
        let hydrology = ErosionSimulator::new(0.8, 3)
            .run(test_island(), &CancelFlag::new())
            .unwrap();
        let rederived = Hydrology::derive(hydrology.heightmap.clone());
        assert_eq!(hydrology, rederived);

        for (cell, _) in hydrology.flow.iter() {
            if let Some(target) = downstream(&hydrology.flow, cell) {
                assert!(hydrology.heightmap[target] <= hydrology.heightmap[cell]);
            }
        }
    }

    #[test]
    fn test_zero_rate_leaves_terrain() {
        let island = test_island();
        let hydrology = ErosionSimulator::new(0.0, 3)
            .run(island.clone(), &CancelFlag::new())
            .unwrap();
        assert_eq!(hydrology.heightmap, island);
    }

    #[test]
    fn test_sea_cells_untouched() {
        let island = test_island();
        let hydrology = ErosionSimulator::new(1.0, 2)
            .run(island.clone(), &CancelFlag::new())
            .unwrap();
        assert_eq!(hydrology.heightmap[Point::new(0, 0)], 0.0);
        assert_eq!(island[Point::new(0, 0)], 0.0);
    }

    #[test]
    fn test_cancelled_between_rounds() {
        let cancel = CancelFlag::new();
        cancel.cancel();
        let result = ErosionSimulator::new(0.5, 2).run(test_island(), &cancel);
        assert!(result.is_err());
    }
}
