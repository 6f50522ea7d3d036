use crate::terrain::Point;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtollError {
    // Generation errors
    #[error("Invalid generation parameters: {reason}")]
    InvalidParams { reason: String },

    #[error("No land tiles available to place the town square")]
    NoLandAvailable,

    #[error("No path to {target} found after {attempts} attempts from {start}")]
    PathNotFound {
        target: PathTarget,
        start: Point,
        attempts: u32,
    },

    #[error("Generation cancelled before stage '{stage}'")]
    Cancelled { stage: &'static str },

    // Config-related errors
    #[error("Failed to get config directory")]
    ConfigDirNotFound,

    #[error("Failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize config: {0}")]
    SerializationFailed(#[from] toml::ser::Error),

    #[error("Failed to deserialize config: {0}")]
    DeserializationFailed(#[from] toml::de::Error),
}

/// Which road a failed search was trying to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum PathTarget {
    #[display("temple")]
    Temple,
    #[display("docks")]
    Docks,
}

/// Result type alias for all operations
pub type AtollResult<T> = Result<T, AtollError>;
