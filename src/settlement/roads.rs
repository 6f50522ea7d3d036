use crate::errors::{AtollError, AtollResult, PathTarget};
use crate::terrain::constants::{MAX_PATH_ATTEMPTS, PATH_COST_SCALE};
use crate::terrain::{HeightMap, OceanMask, Point, is_sea_level};
use pathfinding::prelude::astar;
use std::collections::HashMap;

/// A* road search over the 8-connected grid.
///
/// Each step costs its planar length plus the absolute height change, so
/// roads prefer gentle ground. With `max_slope` set, steps whose
/// `|Δh| / length` exceeds it are not walkable at all.
pub struct RoadPathfinder<'a> {
    heightmap: &'a HeightMap,
    max_slope: Option<f32>,
}

impl<'a> RoadPathfinder<'a> {
    pub fn new(heightmap: &'a HeightMap, max_slope: Option<f32>) -> Self {
        Self {
            heightmap,
            max_slope,
        }
    }

    fn successors(&self, point: Point) -> Vec<(Point, u64)> {
        let here = self.heightmap[point] as f64;
        self.heightmap
            .neighbors8(point)
            .filter_map(|neighbor| {
                let step = point.euclidean_distance(&neighbor);
                let climb = (self.heightmap[neighbor] as f64 - here).abs();

                if let Some(max_slope) = self.max_slope {
                    if climb / step > max_slope as f64 {
                        return None;
                    }
                }

                let cost = ((step + climb) * PATH_COST_SCALE).ceil() as u64;
                Some((neighbor, cost))
            })
            .collect()
    }

    fn distance_estimate(distance: f64) -> u64 {
        (distance * PATH_COST_SCALE).floor() as u64
    }

    /// Cheapest walkable road from `start` to `goal`, both ends included
    pub fn find_temple_path(&self, start: Point, goal: Point) -> Option<Vec<Point>> {
        astar(
            &start,
            |&point| self.successors(point),
            |point| Self::distance_estimate(point.euclidean_distance(&goal)),
            |point| *point == goal,
        )
        .map(|(path, _cost)| path)
    }

    /// Cheapest walkable road from `start` to the first sea-level cell reached.
    ///
    /// The heuristic is the distance to the nearest open-sea cell. Only coastal
    /// sea cells can be nearest to a point outside the sea, so only those are
    /// scanned, and each estimate is cached per cell.
    pub fn find_docks_path(&self, start: Point, ocean: &OceanMask) -> Option<Vec<Point>> {
        let coast: Vec<Point> = ocean
            .iter()
            .filter(|&(point, &is_ocean)| is_ocean && ocean.neighbors4(point).any(|n| !ocean[n]))
            .map(|(point, _)| point)
            .collect();
        let mut estimates: HashMap<Point, u64> = HashMap::new();

        astar(
            &start,
            |&point| self.successors(point),
            |point| {
                *estimates.entry(*point).or_insert_with(|| {
                    if ocean[*point] {
                        return 0;
                    }
                    let nearest = coast
                        .iter()
                        .map(|sea| point.euclidean_distance(sea))
                        .fold(f64::INFINITY, f64::min);
                    if nearest.is_finite() {
                        Self::distance_estimate(nearest)
                    } else {
                        0
                    }
                })
            },
            |point| is_sea_level(self.heightmap[*point]),
        )
        .map(|(path, _cost)| path)
    }
}

/// Road from the town square to the temple, retrying against the next-best
/// temple site whenever the current one is cut off by steep ground.
/// Returns the temple that was reached with its road.
pub fn connect_temple(
    heightmap: &HeightMap,
    town_square: Point,
    candidates: &[Point],
    max_slope: f32,
) -> AtollResult<(Point, Vec<Point>)> {
    let pathfinder = RoadPathfinder::new(heightmap, Some(max_slope));
    let mut attempts = 0;

    for &temple in candidates.iter().take(MAX_PATH_ATTEMPTS as usize) {
        attempts += 1;
        if let Some(path) = pathfinder.find_temple_path(town_square, temple) {
            tracing::debug!(%temple, attempts, length = path.len(), "temple road found");
            return Ok((temple, path));
        }
        tracing::debug!(%temple, attempt = attempts, "temple unreachable, trying next site");
    }

    Err(AtollError::PathNotFound {
        target: PathTarget::Temple,
        start: town_square,
        attempts,
    })
}

/// Road from the town square down to the sea.
///
/// The goal already accepts any sea-level cell, so a failed search cannot
/// succeed on a retry against the same heightmap; one attempt is made.
pub fn connect_docks(
    heightmap: &HeightMap,
    ocean: &OceanMask,
    town_square: Point,
) -> AtollResult<Vec<Point>> {
    let pathfinder = RoadPathfinder::new(heightmap, None);
    pathfinder
        .find_docks_path(town_square, ocean)
        .ok_or(AtollError::PathNotFound {
            target: PathTarget::Docks,
            start: town_square,
            attempts: 1,
        })
}
