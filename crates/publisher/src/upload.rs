//! The top-level upload driver.
//!
//! Sequences one upload end to end: transform → layer-set check → workspace →
//! transfer → store → layers. Blocking on the operator, the transform, the
//! transfer and the catalog all happens strictly in order; nothing runs
//! concurrently within an upload and uploads are expected to run one at a
//! time.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::{info, warn};

use geoserver_client::{exists, probe, CatalogApi};
use netcdf_prep::PrepError;

use crate::config::{PublishConfig, UploadContext};
use crate::confirm::Confirm;
use crate::error::{PublishError, PublishResult};
use crate::orchestrator::{CreateOutcome, Orchestrator};
use crate::prep::{ArtifactPrep, PrepKind, PrepRequest, PreparedArtifact};
use crate::tables::internal_layer_name;
use crate::transfer::Transfer;

/// Kind of data being published.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadType {
    Flight,
    Topo,
    Shapefile,
    Modeled,
}

impl FromStr for UploadType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "flight" => Ok(UploadType::Flight),
            "topo" => Ok(UploadType::Topo),
            "shapefile" => Ok(UploadType::Shapefile),
            "modeled" => Ok(UploadType::Modeled),
            other => Err(format!(
                "invalid upload type '{}', expected flight, topo, shapefile or modeled",
                other
            )),
        }
    }
}

impl fmt::Display for UploadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UploadType::Flight => "flight",
            UploadType::Topo => "topo",
            UploadType::Shapefile => "shapefile",
            UploadType::Modeled => "modeled",
        };
        write!(f, "{}", name)
    }
}

/// One upload request.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub source: PathBuf,
    /// Basin name; becomes the (lower-cased) workspace name.
    pub basin: String,
    pub upload_type: UploadType,
    /// EPSG code used when the artifact carries no projection variable.
    pub projection: Option<u32>,
    /// Basin mask file for modeled uploads.
    pub mask: Option<PathBuf>,
}

/// Terminal state of one upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Published {
        workspace: String,
        store: String,
        /// Layers created by this run (already-published layers are skipped).
        layers: Vec<String>,
    },
    /// The operator declined a confirmation prompt; nothing further was done.
    Declined,
    /// Accepted but unimplemented upload type; no remote mutation happened.
    Unimplemented(UploadType),
}

/// Drives one upload across all collaborators.
pub struct Uploader<'a> {
    pub catalog: &'a dyn CatalogApi,
    pub confirm: &'a dyn Confirm,
    pub prep: &'a dyn ArtifactPrep,
    pub transfer: &'a dyn Transfer,
    pub config: &'a PublishConfig,
}

impl<'a> Uploader<'a> {
    pub async fn upload(&self, request: &UploadRequest) -> PublishResult<UploadOutcome> {
        match request.upload_type {
            UploadType::Flight | UploadType::Shapefile => {
                warn!(
                    upload_type = %request.upload_type,
                    "Upload type is not developed yet, nothing submitted"
                );
                return Ok(UploadOutcome::Unimplemented(request.upload_type));
            }
            UploadType::Topo | UploadType::Modeled => {}
        }

        // Workspace names are lower-cased on the catalog.
        let basin = request.basin.to_lowercase();

        let prepared = self.prepare_artifact(request)?;
        let layer_variables = prepared.layer_variables();
        if layer_variables.is_empty() {
            return Err(PublishError::EmptyLayerSet(prepared.path.clone()));
        }

        let basename = prepared.basename().ok_or_else(|| {
            PublishError::Prep(PrepError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("artifact path {} has no file name", prepared.path.display()),
            )))
        })?;

        info!(
            basin = %basin,
            artifact = %prepared.path.display(),
            layers = layer_variables.len(),
            date = %prepared.date,
            "Starting upload"
        );

        let orchestrator = Orchestrator {
            catalog: self.catalog,
            confirm: self.confirm,
            on_exists: self.config.on_exists,
        };

        let workspace = probe(self.catalog, &basin, None, None).await?;
        if workspace.workspace.is_none() {
            if orchestrator.create_workspace(&basin).await? == CreateOutcome::Declined {
                return Ok(UploadOutcome::Declined);
            }
        }

        let remote_path = format!(
            "{}/{}/{}",
            self.config.data_root.trim_end_matches('/'),
            basin,
            basename
        );
        self.transfer.copy(&prepared.path, &remote_path).await?;

        let ctx = UploadContext {
            basin: basin.clone(),
            date: prepared.date,
        };

        let store = store_name(&basin, &basename, request.upload_type);
        let description = match request.upload_type {
            UploadType::Topo => Some(format!("Topographic data for {}", basin)),
            UploadType::Modeled => Some(format!("Snow model output for {}", basin)),
            UploadType::Flight | UploadType::Shapefile => None,
        };

        if orchestrator
            .create_store(&ctx, &store, &basename, description)
            .await?
            == CreateOutcome::Declined
        {
            return Ok(UploadOutcome::Declined);
        }

        let mut created = Vec::new();
        for variable in &layer_variables {
            let layer = internal_layer_name(variable, &ctx.date);

            if exists(self.catalog, &ctx.basin, Some(&store), Some(&layer)).await? {
                info!(workspace = %ctx.basin, layer = %layer, "Layer already published, skipping");
                continue;
            }

            match orchestrator
                .create_layer(&ctx, &store, variable, prepared.range(variable))
                .await?
            {
                CreateOutcome::Declined => return Ok(UploadOutcome::Declined),
                _ => created.push(layer),
            }
        }

        info!(
            workspace = %ctx.basin,
            store = %store,
            created = created.len(),
            "Upload complete"
        );

        Ok(UploadOutcome::Published {
            workspace: ctx.basin,
            store,
            layers: created,
        })
    }

    /// Run the transform, resolving a missing projection interactively when
    /// the gate allows it.
    fn prepare_artifact(&self, request: &UploadRequest) -> PublishResult<PreparedArtifact> {
        let kind = match request.upload_type {
            UploadType::Modeled => PrepKind::Modeled {
                mask: request.mask.clone(),
            },
            _ => PrepKind::Topo,
        };

        let prep_request = PrepRequest {
            source: request.source.clone(),
            work_dir: self.config.work_dir.clone(),
            kind,
            projection: request.projection,
        };

        match self.prep.prepare(&prep_request) {
            Ok(prepared) => Ok(prepared),
            Err(PrepError::MissingProjection) => {
                let answer = self.confirm.prompt_value(
                    "The artifact carries no projection. Enter an EPSG code to tag it with",
                )?;
                let code = answer
                    .and_then(|value| value.trim().parse::<u32>().ok())
                    .ok_or_else(|| PublishError::MissingProjection {
                        file: request.source.clone(),
                    })?;

                let retry = PrepRequest {
                    projection: Some(code),
                    ..prep_request
                };
                Ok(self.prep.prepare(&retry)?)
            }
            Err(other) => Err(other.into()),
        }
    }
}

/// Store naming: topographic data always lands in `<basin>_topo`, model
/// output in `<basin>_<artifact stem>`.
fn store_name(basin: &str, basename: &str, upload_type: UploadType) -> String {
    match upload_type {
        UploadType::Topo => format!("{}_topo", basin),
        _ => {
            let stem = basename.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(basename);
            format!("{}_{}", basin, stem)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_type_parsing() {
        assert_eq!("topo".parse::<UploadType>().unwrap(), UploadType::Topo);
        assert_eq!("Modeled".parse::<UploadType>().unwrap(), UploadType::Modeled);
        assert_eq!("FLIGHT".parse::<UploadType>().unwrap(), UploadType::Flight);
        assert!("lidar".parse::<UploadType>().is_err());
    }

    #[test]
    fn test_store_name_rules() {
        assert_eq!(store_name("brb", "topo_50m.nc", UploadType::Topo), "brb_topo");
        assert_eq!(
            store_name("kings", "snow.nc", UploadType::Modeled),
            "kings_snow"
        );
        assert_eq!(
            store_name("kings", "snow", UploadType::Modeled),
            "kings_snow"
        );
    }
}
