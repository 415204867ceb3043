//! Resource creation in dependency order.
//!
//! Workspace, then coverage store, then coverages. Each creation is gated on
//! the confirmation collaborator and re-probes remote state first where the
//! workflow demands it. Per resource the lifecycle is
//! absent → (confirm) → creating → created; an existing store is terminal
//! under the default [`OnExists::Fail`] policy.

use tracing::{info, warn};

use geoserver_client::{
    probe, CatalogApi, CoveragePayload, CoverageStorePayload, WorkspacePayload,
};

use crate::config::{OnExists, UploadContext};
use crate::confirm::Confirm;
use crate::error::{PublishError, PublishResult};
use crate::style::assign_style;
use crate::tables::{internal_layer_name, layer_title};

/// What happened to one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    /// Resource already existed and policy allowed reusing it.
    Skipped,
    /// The operator declined the confirmation prompt.
    Declined,
}

/// Creates catalog resources for one upload session.
pub struct Orchestrator<'a> {
    pub catalog: &'a dyn CatalogApi,
    pub confirm: &'a dyn Confirm,
    pub on_exists: OnExists,
}

impl<'a> Orchestrator<'a> {
    /// Create the basin workspace.
    pub async fn create_workspace(&self, name: &str) -> PublishResult<CreateOutcome> {
        let message = format!(
            "Workspace {} does not exist on the catalog. Do you want to create it?",
            name
        );
        if !self.confirm.confirm(&message)? {
            info!(workspace = %name, "Workspace creation declined");
            return Ok(CreateOutcome::Declined);
        }

        info!(workspace = %name, "Creating workspace");
        self.catalog
            .create_workspace(&WorkspacePayload::new(name))
            .await?;
        Ok(CreateOutcome::Created)
    }

    /// Create the NetCDF coverage store backing this upload.
    ///
    /// Re-probes existence first; what an existing store means is decided by
    /// the [`OnExists`] policy.
    pub async fn create_store(
        &self,
        ctx: &UploadContext,
        store: &str,
        artifact_basename: &str,
        description: Option<String>,
    ) -> PublishResult<CreateOutcome> {
        let probed = probe(self.catalog, &ctx.basin, Some(store), None).await?;

        if probed.store.is_some() {
            match self.on_exists {
                OnExists::Fail => {
                    return Err(PublishError::StoreExists {
                        workspace: ctx.basin.clone(),
                        store: store.to_string(),
                    });
                }
                OnExists::Skip => {
                    info!(workspace = %ctx.basin, store = %store, "Store already exists, reusing it");
                    return Ok(CreateOutcome::Skipped);
                }
                OnExists::Recreate => {
                    warn!(workspace = %ctx.basin, store = %store, "Store already exists, deleting it first");
                    self.catalog
                        .delete_coverage_store(&ctx.basin, store, true)
                        .await?;
                }
            }
        }

        let message = format!(
            "Store {} does not exist in workspace {}. Do you want to create it?",
            store, ctx.basin
        );
        if !self.confirm.confirm(&message)? {
            info!(workspace = %ctx.basin, store = %store, "Store creation declined");
            return Ok(CreateOutcome::Declined);
        }

        info!(workspace = %ctx.basin, store = %store, "Creating coverage store");
        let payload =
            CoverageStorePayload::netcdf(store, &ctx.basin, artifact_basename, description);
        self.catalog
            .create_coverage_store(&ctx.basin, &payload)
            .await?;
        Ok(CreateOutcome::Created)
    }

    /// Create one coverage (layer) and style it.
    ///
    /// Styling is a mandatory second request after creation: the catalog's
    /// structured coverage-modify path does not reliably persist the default
    /// style, so it is forced with a direct layer update.
    pub async fn create_layer(
        &self,
        ctx: &UploadContext,
        store: &str,
        variable: &str,
        range: Option<(f64, f64)>,
    ) -> PublishResult<CreateOutcome> {
        let name = internal_layer_name(variable, &ctx.date);
        let title = layer_title(&ctx.basin, &ctx.date, variable);

        let message = format!(
            "Layer {} does not exist in store {}. Do you want to create it?",
            name, store
        );
        if !self.confirm.confirm(&message)? {
            info!(workspace = %ctx.basin, layer = %name, "Layer creation declined");
            return Ok(CreateOutcome::Declined);
        }

        info!(
            workspace = %ctx.basin,
            store = %store,
            layer = %name,
            title = %title,
            "Creating layer"
        );
        let payload = CoveragePayload::new(&name, variable, &ctx.basin, store, &title, range);
        self.catalog
            .create_coverage(&ctx.basin, store, &payload)
            .await?;

        let style = assign_style(&name);
        info!(workspace = %ctx.basin, layer = %name, style = %style, "Assigning default style");
        self.catalog
            .set_default_style(&ctx.basin, &name, style)
            .await?;

        Ok(CreateOutcome::Created)
    }
}
