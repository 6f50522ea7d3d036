use super::constants::{NOISE_OCTAVES, NOISE_PERSISTENCE, SMOOTH_CENTER_WEIGHT, SMOOTH_DIVISOR};
use super::grid::{Grid, HeightMap, Point};
use crate::config::GenerationParams;
use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

/// Fresh coherent-noise source for one generation run
pub fn island_noise(seed: u64) -> Fbm<Perlin> {
    // Perlin takes a 32-bit seed; fold the high half in so nearby u64 seeds still differ
    let folded = (seed ^ (seed >> 32)) as u32;
    Fbm::<Perlin>::new(folded)
        .set_octaves(NOISE_OCTAVES)
        .set_persistence(NOISE_PERSISTENCE)
}

/// Map raw noise output from [-1, 1] into [0, 1]
fn normalized_noise(noise: &impl NoiseFn<f64, 2>, x: f64, y: f64) -> f64 {
    ((noise.get([x, y]) + 1.0) * 0.5).clamp(0.0, 1.0)
}

/// Raw island shape: noise minus a radial falloff, with everything below
/// the island threshold flattened to sea level
pub fn synthesize_heightmap(params: &GenerationParams, noise: &impl NoiseFn<f64, 2>) -> HeightMap {
    let size = params.grid_size;
    let center = size as f64 / 2.0;
    let max_distance = (center * center * 2.0).sqrt() * params.max_distance_factor;

    Grid::from_fn(size, |point| {
        let x = point.x as f64;
        let y = point.y as f64;

        let noise_value = normalized_noise(noise, x * params.noise_scale, y * params.noise_scale);
        let distance = ((x - center).powi(2) + (y - center).powi(2)).sqrt();
        let normalized_distance = if max_distance > 0.0 {
            distance / max_distance
        } else {
            0.0
        };

        let island_shape = (noise_value - normalized_distance).clamp(0.0, 1.0);
        if island_shape < params.island_threshold {
            0.0
        } else {
            island_shape as f32
        }
    })
}

/// Apply `iterations` passes of the 3×3 weighted average (centre 3, neighbours 1, over 11).
/// Border cells keep their values; each pass reads only the previous pass.
pub fn smooth_heightmap(heightmap: &HeightMap, iterations: u32) -> HeightMap {
    let size = heightmap.size();
    let mut current = heightmap.clone();
    if size < 3 {
        return current;
    }

    for _ in 0..iterations {
        let previous = current.clone();
        for y in 1..size - 1 {
            for x in 1..size - 1 {
                let center = Point::new(x, y);
                let neighbor_sum: f32 = previous.neighbors8(center).map(|p| previous[p]).sum();
                current[center] =
                    (previous[center] * SMOOTH_CENTER_WEIGHT + neighbor_sum) / SMOOTH_DIVISOR;
            }
        }
    }

    current
}
