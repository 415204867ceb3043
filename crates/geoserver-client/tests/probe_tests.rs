//! Tests for the existence prober against an in-memory catalog.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use geoserver_client::{
    exists, probe, CatalogApi, ClientError, ClientResult, CoveragePayload, CoverageStorePayload,
    ResourceRef, WorkspacePayload,
};

/// In-memory catalog tree. Deeper lookups on levels the prober should have
/// short-circuited are recorded so tests can assert they never happened.
#[derive(Default)]
struct FakeCatalog {
    workspaces: Vec<String>,
    stores: HashMap<String, Vec<String>>,
    coverages: HashMap<(String, String), Vec<String>>,
    store_lookups: Mutex<Vec<String>>,
    coverage_lookups: Mutex<Vec<String>>,
}

impl FakeCatalog {
    fn with_workspace(mut self, name: &str) -> Self {
        self.workspaces.push(name.to_string());
        self
    }

    fn with_store(mut self, workspace: &str, store: &str) -> Self {
        self.stores
            .entry(workspace.to_string())
            .or_default()
            .push(store.to_string());
        self
    }

    fn with_coverage(mut self, workspace: &str, store: &str, coverage: &str) -> Self {
        self.coverages
            .entry((workspace.to_string(), store.to_string()))
            .or_default()
            .push(coverage.to_string());
        self
    }

    fn store_lookup_count(&self) -> usize {
        self.store_lookups.lock().unwrap().len()
    }

    fn coverage_lookup_count(&self) -> usize {
        self.coverage_lookups.lock().unwrap().len()
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn list_workspaces(&self) -> ClientResult<Vec<ResourceRef>> {
        Ok(self
            .workspaces
            .iter()
            .map(|name| ResourceRef::named(name.clone()))
            .collect())
    }

    async fn list_coverage_stores(&self, workspace: &str) -> ClientResult<Vec<ResourceRef>> {
        self.store_lookups
            .lock()
            .unwrap()
            .push(workspace.to_string());
        Ok(self
            .stores
            .get(workspace)
            .map(|names| names.iter().map(|n| ResourceRef::named(n.clone())).collect())
            .unwrap_or_default())
    }

    async fn list_coverages(&self, workspace: &str, store: &str) -> ClientResult<Vec<ResourceRef>> {
        self.coverage_lookups
            .lock()
            .unwrap()
            .push(format!("{}:{}", workspace, store));
        Ok(self
            .coverages
            .get(&(workspace.to_string(), store.to_string()))
            .map(|names| names.iter().map(|n| ResourceRef::named(n.clone())).collect())
            .unwrap_or_default())
    }

    async fn create_workspace(&self, _payload: &WorkspacePayload) -> ClientResult<()> {
        unreachable!("prober must never mutate the catalog")
    }

    async fn create_coverage_store(
        &self,
        _workspace: &str,
        _payload: &CoverageStorePayload,
    ) -> ClientResult<()> {
        unreachable!("prober must never mutate the catalog")
    }

    async fn create_coverage(
        &self,
        _workspace: &str,
        _store: &str,
        _payload: &CoveragePayload,
    ) -> ClientResult<()> {
        unreachable!("prober must never mutate the catalog")
    }

    async fn set_default_style(
        &self,
        _workspace: &str,
        _layer: &str,
        _style: &str,
    ) -> ClientResult<()> {
        unreachable!("prober must never mutate the catalog")
    }

    async fn delete_coverage_store(
        &self,
        _workspace: &str,
        _store: &str,
        _recurse: bool,
    ) -> ClientResult<()> {
        unreachable!("prober must never mutate the catalog")
    }
}

// ============================================================================
// Short-circuiting
// ============================================================================

#[tokio::test]
async fn test_absent_workspace_short_circuits_deeper_lookups() {
    let catalog = FakeCatalog::default().with_workspace("brb");

    let found = exists(&catalog, "kings", Some("kings_snow"), Some("SWE20200119"))
        .await
        .unwrap();

    assert!(!found);
    assert_eq!(catalog.store_lookup_count(), 0);
    assert_eq!(catalog.coverage_lookup_count(), 0);
}

#[tokio::test]
async fn test_absent_store_short_circuits_coverage_lookup() {
    let catalog = FakeCatalog::default()
        .with_workspace("brb")
        .with_store("brb", "brb_topo");

    let found = exists(&catalog, "brb", Some("brb_snow"), Some("SWE20200119"))
        .await
        .unwrap();

    assert!(!found);
    assert_eq!(catalog.store_lookup_count(), 1);
    assert_eq!(catalog.coverage_lookup_count(), 0);
}

// ============================================================================
// Matching rules
// ============================================================================

#[tokio::test]
async fn test_workspace_match_is_case_insensitive() {
    let catalog = FakeCatalog::default().with_workspace("brb");

    assert!(exists(&catalog, "BRB", None, None).await.unwrap());
    assert!(exists(&catalog, "Brb", None, None).await.unwrap());
    assert!(!exists(&catalog, "kings", None, None).await.unwrap());
}

#[tokio::test]
async fn test_store_match_is_case_sensitive() {
    let catalog = FakeCatalog::default()
        .with_workspace("brb")
        .with_store("brb", "brb_snow");

    assert!(exists(&catalog, "brb", Some("brb_snow"), None).await.unwrap());
    assert!(!exists(&catalog, "brb", Some("BRB_SNOW"), None).await.unwrap());
}

#[tokio::test]
async fn test_full_path_probe_finds_all_levels() {
    let catalog = FakeCatalog::default()
        .with_workspace("brb")
        .with_store("brb", "brb_snow")
        .with_coverage("brb", "brb_snow", "SWE20200119");

    let result = probe(&catalog, "brb", Some("brb_snow"), Some("SWE20200119"))
        .await
        .unwrap();

    assert_eq!(result.workspace.unwrap().name, "brb");
    assert_eq!(result.store.unwrap().name, "brb_snow");
    assert_eq!(result.layer.unwrap().name, "SWE20200119");
}

#[tokio::test]
async fn test_missing_layer_reported_without_failing() {
    let catalog = FakeCatalog::default()
        .with_workspace("brb")
        .with_store("brb", "brb_snow")
        .with_coverage("brb", "brb_snow", "depth20200119");

    let result = probe(&catalog, "brb", Some("brb_snow"), Some("SWE20200119"))
        .await
        .unwrap();

    assert!(result.workspace.is_some());
    assert!(result.store.is_some());
    assert!(result.layer.is_none());
}

// ============================================================================
// Invalid argument combinations
// ============================================================================

#[tokio::test]
async fn test_layer_without_store_is_invalid() {
    let catalog = FakeCatalog::default().with_workspace("brb");

    let err = probe(&catalog, "brb", None, Some("SWE20200119"))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::InvalidArgument(_)));
    // Rejected before any request went out.
    assert_eq!(catalog.store_lookup_count(), 0);
    assert_eq!(catalog.coverage_lookup_count(), 0);
}
