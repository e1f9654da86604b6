// error.rs - Error types for the Game of Life core

use std::path::PathBuf;
use thiserror::Error;

/// Input rejected at the Controls → core boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LifeError {
    #[error("field dimensions must be positive, got {width}x{height}")]
    InvalidDimension { width: i64, height: i64 },
    #[error("could not parse {field:?} as a field dimension")]
    UnparsableDimension { field: String },
    #[error("cell ({x}, {y}) lies outside the {width}x{height} field")]
    OutOfRangeToggle {
        x: i64,
        y: i64,
        width: usize,
        height: usize,
    },
    #[error("seed density {0} must be between 0.0 and 1.0")]
    InvalidDensity(f64),
    #[error("cell size {0} must be positive")]
    InvalidCellSize(f32),
}

/// Failure loading or saving a [`crate::LifeConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid configuration: {0}")]
    Invalid(#[from] LifeError),
    #[error("frame interval must be at least 1ms")]
    ZeroFrameInterval,
}
