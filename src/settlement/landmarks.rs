use crate::errors::{AtollError, AtollResult};
use crate::terrain::{HeightMap, OceanMask, Point};
use rand::Rng;

/// Pick the town square uniformly among cells strictly above `threshold`
pub fn place_town_square(
    heightmap: &HeightMap,
    threshold: f32,
    rng: &mut impl Rng,
) -> AtollResult<Point> {
    let land_tiles: Vec<Point> = heightmap
        .iter()
        .filter_map(|(point, &height)| (height > threshold).then_some(point))
        .collect();

    if land_tiles.is_empty() {
        return Err(AtollError::NoLandAvailable);
    }

    let index = rng.gen_range(0..land_tiles.len());
    Ok(land_tiles[index])
}

/// Cells with `min_radius <= distance <= max_radius` from `center`, row by row
pub fn annulus(size: u32, center: Point, min_radius: u32, max_radius: u32) -> Vec<Point> {
    let min_sq = (min_radius as u64).pow(2);
    let max_sq = (max_radius as u64).pow(2);
    let reach = max_radius as i64;

    let mut cells = Vec::new();
    for dy in -reach..=reach {
        for dx in -reach..=reach {
            let distance_sq = (dx * dx + dy * dy) as u64;
            if distance_sq < min_sq || distance_sq > max_sq {
                continue;
            }
            if let Some(point) = center.offset(dx as i32, dy as i32, size) {
                cells.push(point);
            }
        }
    }
    cells
}

/// Temple sites in the annulus that rise above the town square, highest first.
/// Equal heights keep scan order.
pub fn temple_candidates(
    heightmap: &HeightMap,
    town_square: Point,
    min_radius: u32,
    max_radius: u32,
) -> Vec<Point> {
    let town_height = heightmap[town_square];
    let mut candidates: Vec<Point> = annulus(heightmap.size(), town_square, min_radius, max_radius)
        .into_iter()
        .filter(|&point| heightmap[point] > town_height)
        .collect();

    candidates.sort_by(|a, b| heightmap[*b].total_cmp(&heightmap[*a]));
    candidates
}

/// Highest point of the annulus, or the town square itself when nothing is higher
pub fn find_temple_site(
    heightmap: &HeightMap,
    town_square: Point,
    min_radius: u32,
    max_radius: u32,
) -> Point {
    temple_candidates(heightmap, town_square, min_radius, max_radius)
        .first()
        .copied()
        .unwrap_or(town_square)
}

/// Open-sea cell closest to the town square by Manhattan distance
pub fn find_docks_site(ocean: &OceanMask, town_square: Point) -> Option<Point> {
    ocean
        .iter()
        .filter(|&(_, &is_ocean)| is_ocean)
        .map(|(point, _)| point)
        .min_by_key(|point| point.manhattan_distance(&town_square))
}
