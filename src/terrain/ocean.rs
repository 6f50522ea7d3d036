use super::constants::SEA_LEVEL_EPSILON;
use super::grid::{Grid, HeightMap, OceanMask, Point};
use std::collections::VecDeque;

/// Corner the ocean flood starts from
pub fn ocean_seed(size: u32) -> Point {
    Point::new(size.saturating_sub(1), 0)
}

pub fn is_sea_level(height: f32) -> bool {
    height <= SEA_LEVEL_EPSILON
}

/// Flood-fill sea-level cells 4-connected to `seed`.
///
/// Zero-height cells walled in by land (inland lakes) stay unmarked, so the
/// mask answers "is this tile open sea" rather than "is this tile water".
pub fn classify_ocean(heightmap: &HeightMap, seed: Point) -> OceanMask {
    let mut ocean = Grid::filled(heightmap.size(), false);
    if !heightmap.contains(seed) || !is_sea_level(heightmap[seed]) {
        return ocean;
    }

    let mut queue = VecDeque::new();
    ocean[seed] = true;
    queue.push_back(seed);

    while let Some(cell) = queue.pop_front() {
        for neighbor in heightmap.neighbors4(cell) {
            if !ocean[neighbor] && is_sea_level(heightmap[neighbor]) {
                ocean[neighbor] = true;
                queue.push_back(neighbor);
            }
        }
    }

    ocean
}

/// Every cell of the mask that is open sea, row by row
pub fn ocean_cells(ocean: &OceanMask) -> Vec<Point> {
    ocean
        .iter()
        .filter_map(|(point, &is_ocean)| is_ocean.then_some(point))
        .collect()
}
