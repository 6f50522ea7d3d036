use super::GenerationParams;
use crate::errors::AtollResult;

/// Overlays optional overrides on a base set of params, then validates
pub struct ParamsBuilder {
    params: GenerationParams,
}

impl ParamsBuilder {
    pub fn new(base: GenerationParams) -> Self {
        Self { params: base }
    }

    pub fn seed(mut self, seed: Option<u64>) -> Self {
        if let Some(seed) = seed {
            self.params.seed = seed;
        }
        self
    }

    pub fn grid_size(mut self, grid_size: Option<u32>) -> Self {
        if let Some(grid_size) = grid_size {
            self.params.grid_size = grid_size;
        }
        self
    }

    pub fn noise_scale(mut self, noise_scale: Option<f64>) -> Self {
        if let Some(noise_scale) = noise_scale {
            self.params.noise_scale = noise_scale;
        }
        self
    }

    pub fn island_threshold(mut self, threshold: Option<f64>) -> Self {
        if let Some(threshold) = threshold {
            self.params.island_threshold = threshold;
        }
        self
    }

    pub fn max_distance_factor(mut self, factor: Option<f64>) -> Self {
        if let Some(factor) = factor {
            self.params.max_distance_factor = factor;
        }
        self
    }

    pub fn smooth_iterations(mut self, iterations: Option<u32>) -> Self {
        if let Some(iterations) = iterations {
            self.params.smooth_iterations = iterations;
        }
        self
    }

    pub fn erosion(mut self, rate: Option<f64>, iterations: Option<u32>) -> Self {
        if let Some(rate) = rate {
            self.params.erosion_rate = rate;
        }
        if let Some(iterations) = iterations {
            self.params.erosion_iterations = iterations;
        }
        self
    }

    pub fn max_road_slope(mut self, slope: Option<f32>) -> Self {
        if let Some(slope) = slope {
            self.params.max_road_slope = slope;
        }
        self
    }

    pub fn build(self) -> AtollResult<GenerationParams> {
        self.params.validate_params()?;
        Ok(self.params)
    }
}
