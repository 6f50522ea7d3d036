use crate::errors::{AtollError, AtollResult};
use crate::terrain::constants::{
    DEFAULT_MAX_ROAD_SLOPE, DEFAULT_TEMPLE_MAX_RADIUS, DEFAULT_TEMPLE_MIN_RADIUS,
};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Inputs for one island generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
#[validate(schema(function = "validate_temple_radii"))]
pub struct GenerationParams {
    /// Seeds both the noise source and landmark selection
    pub seed: u64,
    #[validate(range(min = 0.01, max = 0.3))]
    pub noise_scale: f64,
    #[validate(range(min = 1, max = 800))]
    pub grid_size: u32,
    #[validate(range(min = 0.0, max = 1.0))]
    pub island_threshold: f64,
    /// Passed through to the World for renderers
    pub water_level: f64,
    #[validate(range(min = 0.5, max = 2.0))]
    pub max_distance_factor: f64,
    #[validate(range(min = 0, max = 10))]
    pub smooth_iterations: u32,
    #[validate(range(min = 0.0, max = 1.0))]
    pub erosion_rate: f64,
    #[validate(range(min = 1, max = 50))]
    pub erosion_iterations: u32,
    #[validate(range(min = 1, max = 400))]
    pub temple_min_radius: u32,
    #[validate(range(min = 1, max = 400))]
    pub temple_max_radius: u32,
    #[validate(range(min = 0.0))]
    pub max_road_slope: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            seed: 0,
            noise_scale: 0.1,
            grid_size: 400,
            island_threshold: 0.5,
            water_level: 0.0,
            max_distance_factor: 1.0,
            smooth_iterations: 1,
            erosion_rate: 0.1,
            erosion_iterations: 3,
            temple_min_radius: DEFAULT_TEMPLE_MIN_RADIUS,
            temple_max_radius: DEFAULT_TEMPLE_MAX_RADIUS,
            max_road_slope: DEFAULT_MAX_ROAD_SLOPE,
        }
    }
}

fn validate_temple_radii(params: &GenerationParams) -> Result<(), ValidationError> {
    if params.temple_min_radius > params.temple_max_radius {
        let mut error = ValidationError::new("temple_radii");
        error.message = Some("temple_min_radius must not exceed temple_max_radius".into());
        return Err(error);
    }
    Ok(())
}

impl GenerationParams {
    /// Check every range, reporting all offending fields at once
    pub fn validate_params(&self) -> AtollResult<()> {
        // NaN slips through range checks
        let floats = [
            ("noise_scale", self.noise_scale),
            ("island_threshold", self.island_threshold),
            ("water_level", self.water_level),
            ("max_distance_factor", self.max_distance_factor),
            ("erosion_rate", self.erosion_rate),
            ("max_road_slope", self.max_road_slope as f64),
        ];
        if let Some((field, _)) = floats.iter().find(|(_, value)| value.is_nan()) {
            return Err(AtollError::InvalidParams {
                reason: format!("{field}: must be a number"),
            });
        }

        self.validate().map_err(|validation_errors| {
            let mut details = validation_errors
                .field_errors()
                .iter()
                .map(|(field, errors)| {
                    let error_msgs: Vec<String> = errors
                        .iter()
                        .map(|e| match &e.message {
                            Some(message) => message.to_string(),
                            None => e.code.to_string(),
                        })
                        .collect();
                    format!("{field}: {}", error_msgs.join(", "))
                })
                .collect::<Vec<String>>();
            details.sort();

            AtollError::InvalidParams {
                reason: details.join("; "),
            }
        })
    }

    pub fn island_threshold_f32(&self) -> f32 {
        self.island_threshold as f32
    }
}
