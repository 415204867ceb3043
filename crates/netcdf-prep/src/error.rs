//! Error types for artifact preparation.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using PrepError.
pub type PrepResult<T> = Result<T, PrepError>;

/// Errors that can occur while preparing an artifact.
#[derive(Debug, Error)]
pub enum PrepError {
    #[error("NetCDF error: {0}")]
    Netcdf(#[from] netcdf::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("missing variable '{variable}' in {path}")]
    MissingVariable { variable: String, path: PathBuf },

    #[error("cannot decode time units '{0}'")]
    TimeUnits(String),

    #[error("no projection information and no EPSG code supplied")]
    MissingProjection,

    #[error("unsupported EPSG code {0} (expected a NAD83/WGS84 UTM code)")]
    UnsupportedEpsg(u32),
}
