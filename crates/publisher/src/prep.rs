//! The artifact-preparation seam.
//!
//! The driver only sees [`ArtifactPrep`]; the real implementation delegates
//! to the `netcdf-prep` crate, tests substitute a canned artifact.

use std::collections::HashMap;
use std::path::PathBuf;

use chrono::NaiveDate;
use netcdf_prep::{PrepError, VarFilter};

use crate::tables::{COORDINATE_VARS, MODELED_KEEP_VARS};

/// What kind of artifact is being prepared.
#[derive(Debug, Clone)]
pub enum PrepKind {
    /// Static topographic data; only the basin mask variable is dropped.
    Topo,
    /// Model output: fixed keep-list, optional basin mask file.
    Modeled { mask: Option<PathBuf> },
}

/// One preparation request.
#[derive(Debug, Clone)]
pub struct PrepRequest {
    pub source: PathBuf,
    /// Scratch directory for the reduced copy.
    pub work_dir: PathBuf,
    pub kind: PrepKind,
    /// EPSG code to tag on when the artifact has no projection variable.
    pub projection: Option<u32>,
}

/// A reduced artifact ready for transfer and publication.
#[derive(Debug, Clone)]
pub struct PreparedArtifact {
    pub path: PathBuf,
    /// Acquisition date (from the time coordinate for model output, today
    /// for topographic data).
    pub date: NaiveDate,
    /// All variables in the reduced copy, coordinates included.
    pub variables: Vec<String>,
    /// (min, max) per publishable variable, when computable.
    pub ranges: HashMap<String, (f64, f64)>,
}

impl PreparedArtifact {
    /// The variables that become layers: everything except coordinates.
    pub fn layer_variables(&self) -> Vec<String> {
        self.variables
            .iter()
            .filter(|name| !COORDINATE_VARS.contains(&name.as_str()))
            .cloned()
            .collect()
    }

    pub fn range(&self, variable: &str) -> Option<(f64, f64)> {
        self.ranges.get(variable).copied()
    }

    /// File name of the reduced artifact (same as the source's).
    pub fn basename(&self) -> Option<String> {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
    }
}

/// Transform collaborator contract.
pub trait ArtifactPrep: Send + Sync {
    fn prepare(&self, request: &PrepRequest) -> Result<PreparedArtifact, PrepError>;
}

/// Real implementation over the `netcdf-prep` crate.
pub struct NetcdfPrep;

impl ArtifactPrep for NetcdfPrep {
    fn prepare(&self, request: &PrepRequest) -> Result<PreparedArtifact, PrepError> {
        let basename = request.source.file_name().ok_or_else(|| {
            PrepError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("source path {} has no file name", request.source.display()),
            ))
        })?;
        let dest = request.work_dir.join(basename);

        let filter = match &request.kind {
            PrepKind::Topo => VarFilter::Exclude(vec!["mask".to_string()]),
            PrepKind::Modeled { .. } => VarFilter::KeepOnly(
                MODELED_KEEP_VARS.iter().map(|s| s.to_string()).collect(),
            ),
        };
        let mask = match &request.kind {
            PrepKind::Modeled { mask } => mask.as_deref(),
            PrepKind::Topo => None,
        };

        let output = netcdf_prep::prepare_copy(&request.source, &dest, &filter, mask)?;

        if !output.has_projection {
            let code = request.projection.ok_or(PrepError::MissingProjection)?;
            netcdf_prep::tag_utm_projection(&dest, code)?;
        }

        let date = match &request.kind {
            PrepKind::Modeled { .. } => {
                output.date.ok_or_else(|| PrepError::MissingVariable {
                    variable: "time".to_string(),
                    path: request.source.clone(),
                })?
            }
            PrepKind::Topo => chrono::Local::now().date_naive(),
        };

        Ok(PreparedArtifact {
            path: output.path,
            date,
            variables: output.variables,
            ranges: output.ranges,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_variables_exclude_coordinates() {
        let artifact = PreparedArtifact {
            path: PathBuf::from("/tmp/snow.nc"),
            date: NaiveDate::from_ymd_opt(2020, 1, 19).unwrap(),
            variables: vec![
                "time".to_string(),
                "x".to_string(),
                "y".to_string(),
                "projection".to_string(),
                "specific_mass".to_string(),
                "thickness".to_string(),
            ],
            ranges: HashMap::new(),
        };

        assert_eq!(
            artifact.layer_variables(),
            vec!["specific_mass".to_string(), "thickness".to_string()]
        );
    }

    #[test]
    fn test_basename_follows_source_name() {
        let artifact = PreparedArtifact {
            path: PathBuf::from("/tmp/work/snow.nc"),
            date: NaiveDate::from_ymd_opt(2020, 1, 19).unwrap(),
            variables: Vec::new(),
            ranges: HashMap::new(),
        };

        assert_eq!(artifact.basename().as_deref(), Some("snow.nc"));
    }
}
