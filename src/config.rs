use crate::errors::{AtollError, AtollResult};
use std::fs;
use std::path::{Path, PathBuf};

pub mod builder;
pub mod params;

pub use builder::ParamsBuilder;
pub use params::GenerationParams;

/// Default location of the params file, `<config dir>/atoll/config.toml`
pub fn get_config_path() -> AtollResult<PathBuf> {
    let mut path = dirs::config_dir().ok_or(AtollError::ConfigDirNotFound)?;
    path.push("atoll");
    path.push("config.toml");
    Ok(path)
}

/// Load params from `path`, or from the default location when `None`.
/// A missing file yields the defaults; a malformed one is an error.
pub fn load_params(path: Option<&Path>) -> AtollResult<GenerationParams> {
    let config_path = match path {
        Some(path) => path.to_path_buf(),
        None => get_config_path()?,
    };

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "no config file, using defaults");
        return Ok(GenerationParams::default());
    }

    let contents = fs::read_to_string(&config_path)?;
    let params = toml::from_str::<GenerationParams>(&contents)?;
    params.validate_params()?;
    Ok(params)
}

pub fn save_params(params: &GenerationParams, path: Option<&Path>) -> AtollResult<PathBuf> {
    let config_path = match path {
        Some(path) => path.to_path_buf(),
        None => get_config_path()?,
    };

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let contents = toml::to_string_pretty(params)?;
    fs::write(&config_path, contents)?;
    Ok(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("atoll-config-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = scratch_path("does-not-exist.toml");
        let params = load_params(Some(&path)).unwrap();
        assert_eq!(params, GenerationParams::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch_path("saved.toml");
        let params = GenerationParams {
            seed: 4242,
            grid_size: 96,
            erosion_rate: 0.25,
            ..Default::default()
        };

        let written = save_params(&params, Some(&path)).unwrap();
        assert_eq!(written, path);

        let loaded = load_params(Some(&path)).unwrap();
        assert_eq!(loaded, params);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let path = scratch_path("malformed.toml");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "grid_size = \"big\"").unwrap();

        let err = load_params(Some(&path)).unwrap_err();
        assert!(matches!(err, AtollError::DeserializationFailed(_)));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_out_of_range_file_is_rejected() {
        let path = scratch_path("out-of-range.toml");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "grid_size = 5000").unwrap();

        let err = load_params(Some(&path)).unwrap_err();
        assert!(matches!(err, AtollError::InvalidParams { .. }));

        let _ = fs::remove_file(&path);
    }
}
