use super::constants::{OCEAN_FORCED_SLOPE, SLOPE_TOLERANCE};
use super::grid::{Grid, HeightMap, Point};
use super::ocean::is_sea_level;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// One of the eight downstream directions a cell can drain towards.
///
/// Codes follow the fixed neighbour table, clockwise from north-west
/// (`+y` is south):
/// ```text
/// 0 1 2
/// 7 . 3
/// 6 5 4
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum FlowDirection {
    NorthWest,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
}

impl FlowDirection {
    /// Iteration order used for tie-breaking: first found wins
    pub const ALL: [FlowDirection; 8] = [
        FlowDirection::NorthWest,
        FlowDirection::North,
        FlowDirection::NorthEast,
        FlowDirection::East,
        FlowDirection::SouthEast,
        FlowDirection::South,
        FlowDirection::SouthWest,
        FlowDirection::West,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    pub fn offset(self) -> (i32, i32) {
        match self {
            FlowDirection::NorthWest => (-1, -1),
            FlowDirection::North => (0, -1),
            FlowDirection::NorthEast => (1, -1),
            FlowDirection::East => (1, 0),
            FlowDirection::SouthEast => (1, 1),
            FlowDirection::South => (0, 1),
            FlowDirection::SouthWest => (-1, 1),
            FlowDirection::West => (-1, 0),
        }
    }

    /// The neighbour this direction points at, if it is inside a grid of `size`
    pub fn step(self, from: Point, size: u32) -> Option<Point> {
        let (dx, dy) = self.offset();
        from.offset(dx, dy, size)
    }
}

/// Downstream direction per cell; `None` for sea cells and sinks
pub type FlowGrid = Grid<Option<FlowDirection>>;

/// Slope used to rank a step; sea-level neighbours always win with a forced maximum
fn descent_slope(heightmap: &HeightMap, from: Point, to: Point) -> f32 {
    let target = heightmap[to];
    if is_sea_level(target) {
        OCEAN_FORCED_SLOPE
    } else {
        heightmap[from] - target
    }
}

/// Steepest-descent direction for a single land cell, or `None` for a sink
pub fn route_cell(heightmap: &HeightMap, cell: Point) -> Option<FlowDirection> {
    let size = heightmap.size();
    let mut best: Option<(FlowDirection, f32)> = None;

    for direction in FlowDirection::ALL {
        let Some(neighbor) = direction.step(cell, size) else {
            continue;
        };
        let slope = descent_slope(heightmap, cell, neighbor);
        if best.is_none_or(|(_, max_slope)| slope > max_slope) {
            best = Some((direction, slope));
        }
    }

    match best {
        Some((direction, slope)) if slope >= SLOPE_TOLERANCE => Some(direction),
        _ => None,
    }
}

/// Assign every land cell its steepest-descent neighbour.
///
/// A cell whose best slope is under the tolerance is a sink (local basin)
/// and gets no outflow, so flats never route in circles.
pub fn compute_flow_directions(heightmap: &HeightMap) -> FlowGrid {
    Grid::from_fn(heightmap.size(), |cell| {
        if is_sea_level(heightmap[cell]) {
            None
        } else {
            route_cell(heightmap, cell)
        }
    })
}

/// Cell a routed cell drains into
pub fn downstream(flow: &FlowGrid, cell: Point) -> Option<Point> {
    let direction = (*flow.get(cell)?)?;
    direction.step(cell, flow.size())
}

/// Number of land cells without an outflow
pub fn count_sinks(heightmap: &HeightMap, flow: &FlowGrid) -> usize {
    heightmap
        .iter()
        .filter(|&(cell, &height)| !is_sea_level(height) && flow[cell].is_none())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_island() -> HeightMap {
        Grid::from_rows(vec![
            vec![0.0, 0.0, 0.0, 0.0],
            vec![0.0, 1.0, 1.0, 0.0],
            vec![0.0, 1.0, 1.0, 0.0],
            vec![0.0, 0.0, 0.0, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_direction_codes_round_trip_table() {
        for (code, direction) in FlowDirection::ALL.iter().enumerate() {
            assert_eq!(direction.code() as usize, code);
            assert_eq!(FlowDirection::from_code(code as u8), Some(*direction));
        }
        assert_eq!(FlowDirection::from_code(8), None);
    }

    #[test]
    fn test_square_island_drains_into_sea() {
        let heightmap = square_island();
        let flow = compute_flow_directions(&heightmap);

        for (x, y) in [(1, 1), (2, 1), (1, 2), (2, 2)] {
            let cell = Point::new(x, y);
            let target = downstream(&flow, cell).expect("land cell should drain");
            assert_eq!(heightmap[target], 0.0, "{cell} should drain into the sea");
        }

        // NW is first in the table, so the top-left block cell goes north-west
        assert_eq!(flow[Point::new(1, 1)], Some(FlowDirection::NorthWest));
        // Every neighbour of (2,2) that is sea ties at 1.0; the first sea neighbour wins
        assert_eq!(flow[Point::new(2, 2)], Some(FlowDirection::NorthEast));
    }

    #[test]
    fn test_sea_cells_have_no_direction() {
        let flow = compute_flow_directions(&square_island());
        assert_eq!(flow[Point::new(0, 0)], None);
        assert_eq!(flow[Point::new(3, 2)], None);
    }

    #[test]
    fn test_flat_plateau_is_sink() {
        let heightmap = Grid::filled(3, 0.5f32);
        let flow = compute_flow_directions(&heightmap);
        assert_eq!(flow[Point::new(1, 1)], None);
        assert_eq!(count_sinks(&heightmap, &flow), 9);
    }

    #[test]
    fn test_steepest_land_neighbor_chosen() {
        let heightmap = Grid::from_rows(vec![
            vec![0.9, 0.8, 0.9],
            vec![0.9, 0.7, 0.6],
            vec![0.9, 0.3, 0.9],
        ])
        .unwrap();
        let flow = compute_flow_directions(&heightmap);
        assert_eq!(flow[Point::new(1, 1)], Some(FlowDirection::South));
    }

    #[test]
    fn test_downstream_never_higher() {
        let heightmap = Grid::from_fn(12, |p| {
            let dx = p.x as f32 - 6.0;
            let dy = p.y as f32 - 5.0;
            (1.0 - (dx * dx + dy * dy).sqrt() / 7.0).max(0.0) + (p.x % 3) as f32 * 0.01
        });
        let flow = compute_flow_directions(&heightmap);

        for (cell, direction) in flow.iter() {
            if direction.is_some() {
                let target = downstream(&flow, cell).unwrap();
                assert!(heightmap[target] <= heightmap[cell]);
            } else if !is_sea_level(heightmap[cell]) {
                // Sinks have no neighbour lower by more than the tolerance
                for neighbor in heightmap.neighbors8(cell) {
                    assert!(!is_sea_level(heightmap[neighbor]));
                    assert!(heightmap[cell] - heightmap[neighbor] < SLOPE_TOLERANCE);
                }
            }
        }
    }
}
