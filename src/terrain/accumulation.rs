use super::flow::{FlowGrid, downstream};
use super::grid::{Grid, Point};

/// Upstream cell count per cell
pub type WaterAccumulation = Grid<u32>;

/// Route one unit of rain from every routed cell down its flow chain.
///
/// A cell's value is the number of other cells whose chain passes through
/// it. Rather than walking each chain separately, cells are visited in
/// upstream-first order so each downstream neighbour receives its inflow's
/// resolved total plus one, once.
pub fn accumulate_water(flow: &FlowGrid) -> WaterAccumulation {
    let size = flow.size();
    let mut accumulation = Grid::filled(size, 0u32);

    let mut upstream_count = Grid::filled(size, 0u32);
    for (cell, _) in flow.iter() {
        if let Some(target) = downstream(flow, cell) {
            upstream_count[target] += 1;
        }
    }

    let mut ready: Vec<Point> = upstream_count
        .iter()
        .filter_map(|(cell, &count)| (count == 0).then_some(cell))
        .collect();
    let mut resolved = 0usize;

    while let Some(cell) = ready.pop() {
        resolved += 1;
        if let Some(target) = downstream(flow, cell) {
            accumulation[target] += accumulation[cell] + 1;
            upstream_count[target] -= 1;
            if upstream_count[target] == 0 {
                ready.push(target);
            }
        }
    }

    let total = flow.cells().len();
    if resolved < total {
        // Only possible if directions form a loop, which descent-only routing rules out
        tracing::warn!(
            unresolved = total - resolved,
            "flow directions contain a cycle; those cells keep partial accumulation"
        );
    }

    accumulation
}

/// Largest accumulation on the grid
pub fn max_accumulation(accumulation: &WaterAccumulation) -> u32 {
    accumulation.cells().iter().copied().max().unwrap_or(0)
}
