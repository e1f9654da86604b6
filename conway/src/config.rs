//! Configuration for a Game of Life session.
//!
//! Loaded from YAML; every section and field falls back to its default.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{ConfigError, LifeError};
use crate::grid::{DEFAULT_SEED_DENSITY, MAX_CELLS};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifeConfig {
    pub field: FieldConfig,
    pub render: RenderConfig,
    pub simulation: SimulationConfig,
}

/// Field dimensions as entered by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub width: i64,
    pub height: i64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 50,
        }
    }
}

/// Canvas appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Edge length of one cell in pixels
    pub cell_size: f32,
    pub live_color: [u8; 3],
    pub dead_color: [u8; 3],
    pub grid_color: [u8; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cell_size: 10.0,
            live_color: [0, 0, 0],
            dead_color: [255, 255, 255],
            grid_color: [0xcc, 0xcc, 0xcc],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Probability of a cell starting alive when seeding randomly
    pub seed_density: f64,
    /// Delay between frames while running
    pub frame_interval_ms: u64,
    /// Fixed RNG seed for reproducible runs
    pub rng_seed: Option<u64>,
    /// Start with random reseed mode on
    pub random_reseed: bool,
    /// Generations remembered for cycle reporting (0 disables)
    pub cycle_history: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed_density: DEFAULT_SEED_DENSITY,
            frame_interval_ms: 16,
            rng_seed: None,
            random_reseed: false,
            cycle_history: 10,
        }
    }
}

impl SimulationConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

impl LifeConfig {
    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: LifeConfig = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_dimensions(self.field.width, self.field.height)?;
        let density = self.simulation.seed_density;
        if !(0.0..=1.0).contains(&density) {
            return Err(LifeError::InvalidDensity(density).into());
        }
        let cell_size = self.render.cell_size;
        if !(cell_size > 0.0 && cell_size.is_finite()) {
            return Err(LifeError::InvalidCellSize(cell_size).into());
        }
        if self.simulation.frame_interval_ms == 0 {
            return Err(ConfigError::ZeroFrameInterval);
        }
        Ok(())
    }
}

/// Convert user-entered dimensions to a valid field size.
pub fn validate_dimensions(width: i64, height: i64) -> Result<(usize, usize), LifeError> {
    if width <= 0 || height <= 0 {
        return Err(LifeError::InvalidDimension { width, height });
    }
    let too_large = || LifeError::InvalidDimension { width, height };
    let w = usize::try_from(width).map_err(|_| too_large())?;
    let h = usize::try_from(height).map_err(|_| too_large())?;
    let cells = w.checked_mul(h).ok_or_else(too_large)?;
    if cells > MAX_CELLS {
        return Err(too_large());
    }
    Ok((w, h))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(LifeConfig::default().validate().is_ok());
    }

    #[test]
    fn yaml_roundtrip_keeps_values() {
        let mut config = LifeConfig::default();
        config.field.width = 80;
        config.simulation.rng_seed = Some(42);
        let yaml = serde_yaml::to_string(&config).unwrap();
        let loaded: LifeConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn partial_yaml_uses_defaults() {
        let config: LifeConfig = serde_yaml::from_str("field:\n  width: 12\n").unwrap();
        assert_eq!(config.field.width, 12);
        assert_eq!(config.field.height, 50);
        assert_eq!(config.render.cell_size, 10.0);
    }

    #[test]
    fn rejects_bad_values() {
        let mut config = LifeConfig::default();
        config.field.height = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid(LifeError::InvalidDimension { .. }))
        ));

        let mut config = LifeConfig::default();
        config.simulation.seed_density = 1.5;
        assert!(config.validate().is_err());

        let mut config = LifeConfig::default();
        config.simulation.frame_interval_ms = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroFrameInterval)));
    }

    #[test]
    fn validate_dimensions_rejects_non_positive() {
        assert_eq!(validate_dimensions(3, 4), Ok((3, 4)));
        assert_eq!(
            validate_dimensions(-1, 4),
            Err(LifeError::InvalidDimension { width: -1, height: 4 })
        );
    }

    #[test]
    fn validate_dimensions_rejects_oversized_fields() {
        assert_eq!(
            validate_dimensions(1 << 40, 1 << 20),
            Err(LifeError::InvalidDimension { width: 1 << 40, height: 1 << 20 })
        );
        assert!(validate_dimensions(i64::MAX, i64::MAX).is_err());
        assert!(validate_dimensions(4097, 4096).is_err());
        assert_eq!(validate_dimensions(4096, 4096), Ok((4096, 4096)));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = LifeConfig::load("/nonexistent/conway.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
