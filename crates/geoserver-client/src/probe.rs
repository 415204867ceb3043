//! Resource existence probing.
//!
//! One traversal of the workspace → store → coverage tree with a typed result
//! per level. A missing intermediate level short-circuits the deeper lookups:
//! no store request is issued for an absent workspace, and no coverage
//! request for an absent store.

use crate::api::CatalogApi;
use crate::error::{ClientError, ClientResult};
use crate::rest::ResourceRef;

/// What the traversal found at each requested level.
///
/// A level that was not requested stays `None`; so does a requested level
/// that was not found. [`ResourceProbe::all_found`] distinguishes the two by
/// re-checking against what was asked for.
#[derive(Debug, Default)]
pub struct ResourceProbe {
    pub workspace: Option<ResourceRef>,
    pub store: Option<ResourceRef>,
    pub layer: Option<ResourceRef>,
}

/// Walk the catalog tree for `workspace`, and optionally one of its stores
/// and one of that store's coverages.
///
/// Workspace names match case-insensitively (the catalog lower-cases them on
/// creation); store and coverage names match exactly. Requesting a layer
/// without naming its store is an invalid-argument error rather than a guess
/// about which store to search.
pub async fn probe(
    catalog: &dyn CatalogApi,
    workspace: &str,
    store: Option<&str>,
    layer: Option<&str>,
) -> ClientResult<ResourceProbe> {
    if layer.is_some() && store.is_none() {
        return Err(ClientError::InvalidArgument(
            "a layer probe requires its store name".to_string(),
        ));
    }

    let found_workspace = catalog
        .list_workspaces()
        .await?
        .into_iter()
        .find(|w| w.name.eq_ignore_ascii_case(workspace));

    let mut result = ResourceProbe {
        workspace: found_workspace,
        ..ResourceProbe::default()
    };

    let ws_name = match &result.workspace {
        Some(ws) => ws.name.clone(),
        None => return Ok(result),
    };

    let store_name = match store {
        Some(name) => name,
        None => return Ok(result),
    };

    result.store = catalog
        .list_coverage_stores(&ws_name)
        .await?
        .into_iter()
        .find(|s| s.name == store_name);

    if result.store.is_none() {
        return Ok(result);
    }

    if let Some(layer_name) = layer {
        result.layer = catalog
            .list_coverages(&ws_name, store_name)
            .await?
            .into_iter()
            .find(|c| c.name == layer_name);
    }

    Ok(result)
}

/// True only if every requested level exists.
pub async fn exists(
    catalog: &dyn CatalogApi,
    workspace: &str,
    store: Option<&str>,
    layer: Option<&str>,
) -> ClientResult<bool> {
    let result = probe(catalog, workspace, store, layer).await?;

    Ok(result.workspace.is_some()
        && (store.is_none() || result.store.is_some())
        && (layer.is_none() || result.layer.is_some()))
}
