//! The catalog seam.
//!
//! Everything above the wire talks to this trait. The HTTP implementation is
//! [`crate::GsCatalog`]; tests substitute an in-memory catalog.

use async_trait::async_trait;

use crate::error::ClientResult;
use crate::rest::{
    CoveragePayload, CoverageStorePayload, ResourceRef, WorkspacePayload,
};

/// Read and mutate the catalog's workspace → store → coverage tree.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// List every workspace on the catalog.
    async fn list_workspaces(&self) -> ClientResult<Vec<ResourceRef>>;

    /// List the coverage stores of one workspace.
    async fn list_coverage_stores(&self, workspace: &str) -> ClientResult<Vec<ResourceRef>>;

    /// List the coverages published under one store.
    async fn list_coverages(&self, workspace: &str, store: &str) -> ClientResult<Vec<ResourceRef>>;

    /// Create a workspace.
    async fn create_workspace(&self, payload: &WorkspacePayload) -> ClientResult<()>;

    /// Create a coverage store inside a workspace.
    async fn create_coverage_store(
        &self,
        workspace: &str,
        payload: &CoverageStorePayload,
    ) -> ClientResult<()>;

    /// Create a coverage (layer) inside a store.
    async fn create_coverage(
        &self,
        workspace: &str,
        store: &str,
        payload: &CoveragePayload,
    ) -> ClientResult<()>;

    /// Force a layer's default style by name.
    ///
    /// This is a separate follow-up request after coverage creation; the
    /// structured coverage-modify path does not reliably persist this field.
    async fn set_default_style(
        &self,
        workspace: &str,
        layer: &str,
        style: &str,
    ) -> ClientResult<()>;

    /// Delete a coverage store, optionally recursing into its coverages.
    async fn delete_coverage_store(
        &self,
        workspace: &str,
        store: &str,
        recurse: bool,
    ) -> ClientResult<()>;
}
