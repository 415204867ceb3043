//! Request and response payloads for the GeoServer REST resource tree.
//!
//! Response types mirror the documented JSON shapes
//! (`workspaces.workspace[]`, `coverageStores.coverageStore[]`,
//! `coverages.coverage[]`). GeoServer serializes an *empty* collection as the
//! empty string rather than `[]`, so every list wrapper decodes through
//! [`MaybeList`].

use serde::{Deserialize, Serialize};

/// A named entry in the catalog's resource tree.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResourceRef {
    pub name: String,
    #[serde(default)]
    pub href: Option<String>,
}

impl ResourceRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            href: None,
        }
    }
}

/// A collection that GeoServer renders as `""` when empty.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum MaybeList<T> {
    Present(T),
    Empty(String),
}

impl<T> MaybeList<T> {
    pub(crate) fn into_option(self) -> Option<T> {
        match self {
            MaybeList::Present(inner) => Some(inner),
            MaybeList::Empty(_) => None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct WorkspacesResponse {
    pub workspaces: MaybeList<WorkspaceItems>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WorkspaceItems {
    pub workspace: Vec<ResourceRef>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WorkspaceDetailResponse {
    pub workspace: WorkspaceDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WorkspaceDetail {
    #[allow(dead_code)]
    pub name: String,
    /// Href of the workspace's coverage-store collection.
    #[serde(rename = "coverageStores", default)]
    pub coverage_stores: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CoverageStoresResponse {
    #[serde(rename = "coverageStores")]
    pub coverage_stores: MaybeList<CoverageStoreItems>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CoverageStoreItems {
    #[serde(rename = "coverageStore")]
    pub coverage_store: Vec<ResourceRef>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CoveragesResponse {
    pub coverages: MaybeList<CoverageItems>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CoverageItems {
    pub coverage: Vec<ResourceRef>,
}

// ============================================================================
// Creation payloads
// ============================================================================

/// `POST {base}/workspaces` body.
#[derive(Debug, Serialize)]
pub struct WorkspacePayload {
    workspace: WorkspaceBody,
}

#[derive(Debug, Serialize)]
struct WorkspaceBody {
    name: String,
    enabled: bool,
}

impl WorkspacePayload {
    pub fn new(name: &str) -> Self {
        Self {
            workspace: WorkspaceBody {
                name: name.to_string(),
                enabled: true,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.workspace.name
    }
}

/// `POST {base}/workspaces/{ws}/coveragestores.json` body for a NetCDF store.
#[derive(Debug, Serialize)]
pub struct CoverageStorePayload {
    #[serde(rename = "coverageStore")]
    coverage_store: CoverageStoreBody,
}

#[derive(Debug, Serialize)]
struct CoverageStoreBody {
    name: String,
    #[serde(rename = "type")]
    store_type: &'static str,
    enabled: bool,
    #[serde(rename = "_default")]
    default: bool,
    workspace: NameOnly,
    configure: &'static str,
    /// `file:` URL relative to the catalog's data root.
    url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

#[derive(Debug, Serialize)]
struct NameOnly {
    name: String,
}

impl CoverageStorePayload {
    /// Build a NetCDF store payload whose backing file lives at
    /// `<data root>/<workspace>/<basename>` on the catalog host.
    pub fn netcdf(
        name: &str,
        workspace: &str,
        artifact_basename: &str,
        description: Option<String>,
    ) -> Self {
        Self {
            coverage_store: CoverageStoreBody {
                name: name.to_string(),
                store_type: "NetCDF",
                enabled: true,
                default: false,
                workspace: NameOnly {
                    name: workspace.to_string(),
                },
                configure: "all",
                url: format!("file:{}/{}", workspace, artifact_basename),
                description,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.coverage_store.name
    }
}

/// Inclusive value range advertised on a coverage dimension.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct NumberRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Serialize)]
struct CoverageDimension {
    name: String,
    range: NumberRange,
}

#[derive(Debug, Serialize)]
struct CoverageDimensions {
    #[serde(rename = "coverageDimension")]
    coverage_dimension: Vec<CoverageDimension>,
}

/// `POST {base}/workspaces/{ws}/coveragestores/{store}/coverages.json` body.
#[derive(Debug, Serialize)]
pub struct CoveragePayload {
    coverage: CoverageBody,
}

#[derive(Debug, Serialize)]
struct CoverageBody {
    name: String,
    #[serde(rename = "nativeName")]
    native_name: String,
    #[serde(rename = "nativeCoverageName")]
    native_coverage_name: String,
    store: NameOnly,
    enabled: bool,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<CoverageDimensions>,
}

impl CoveragePayload {
    pub fn new(
        name: &str,
        native_variable: &str,
        workspace: &str,
        store: &str,
        title: &str,
        range: Option<(f64, f64)>,
    ) -> Self {
        let dimensions = range.map(|(min, max)| CoverageDimensions {
            coverage_dimension: vec![CoverageDimension {
                name: native_variable.to_string(),
                range: NumberRange { min, max },
            }],
        });

        Self {
            coverage: CoverageBody {
                name: name.to_string(),
                native_name: native_variable.to_string(),
                native_coverage_name: native_variable.to_string(),
                store: NameOnly {
                    name: format!("{}:{}", workspace, store),
                },
                enabled: true,
                title: title.to_string(),
                dimensions,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.coverage.name
    }
}

/// `PUT {base}/layers/{ws}:{layer}.json` body forcing the default style.
#[derive(Debug, Serialize)]
pub struct StyleUpdatePayload {
    layer: LayerStyleBody,
}

#[derive(Debug, Serialize)]
struct LayerStyleBody {
    #[serde(rename = "defaultStyle")]
    default_style: NameOnly,
}

impl StyleUpdatePayload {
    pub fn new(style: &str) -> Self {
        Self {
            layer: LayerStyleBody {
                default_style: NameOnly {
                    name: style.to_string(),
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_workspace_payload_shape() {
        let payload = WorkspacePayload::new("brb");
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({"workspace": {"name": "brb", "enabled": true}})
        );
    }

    #[test]
    fn test_store_payload_url_relative_to_data_root() {
        let payload = CoverageStorePayload::netcdf("brb_snow", "brb", "snow.nc", None);
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(value["coverageStore"]["type"], "NetCDF");
        assert_eq!(value["coverageStore"]["configure"], "all");
        assert_eq!(value["coverageStore"]["url"], "file:brb/snow.nc");
        assert_eq!(value["coverageStore"]["workspace"]["name"], "brb");
        assert_eq!(value["coverageStore"]["_default"], false);
        assert!(value["coverageStore"].get("description").is_none());
    }

    #[test]
    fn test_coverage_payload_qualifies_store_name() {
        let payload = CoveragePayload::new(
            "SWE20200119",
            "specific_mass",
            "brb",
            "brb_snow",
            "Brb 2020-01-19 Swe",
            Some((0.0, 812.5)),
        );
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(value["coverage"]["store"]["name"], "brb:brb_snow");
        assert_eq!(value["coverage"]["nativeName"], "specific_mass");
        assert_eq!(value["coverage"]["nativeCoverageName"], "specific_mass");
        let dim = &value["coverage"]["dimensions"]["coverageDimension"][0];
        assert_eq!(dim["name"], "specific_mass");
        assert_eq!(dim["range"]["min"], 0.0);
        assert_eq!(dim["range"]["max"], 812.5);
    }

    #[test]
    fn test_coverage_payload_omits_dimensions_without_range() {
        let payload = CoveragePayload::new("depth", "thickness", "brb", "brb_snow", "t", None);
        let value = serde_json::to_value(&payload).unwrap();
        assert!(value["coverage"].get("dimensions").is_none());
    }

    #[test]
    fn test_style_update_payload_shape() {
        let value = serde_json::to_value(StyleUpdatePayload::new("dynamic_default")).unwrap();
        assert_eq!(value["layer"]["defaultStyle"]["name"], "dynamic_default");
    }

    #[test]
    fn test_empty_collection_decodes_as_none() {
        // GeoServer emits "" instead of an empty array.
        let parsed: WorkspacesResponse = serde_json::from_str(r#"{"workspaces": ""}"#).unwrap();
        assert!(parsed.workspaces.into_option().is_none());
    }

    #[test]
    fn test_populated_collection_decodes() {
        let parsed: WorkspacesResponse = serde_json::from_str(
            r#"{"workspaces": {"workspace": [
                {"name": "brb", "href": "http://gs/rest/workspaces/brb.json"},
                {"name": "kings"}
            ]}}"#,
        )
        .unwrap();
        let items = parsed.workspaces.into_option().unwrap().workspace;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "brb");
        assert_eq!(
            items[0].href.as_deref(),
            Some("http://gs/rest/workspaces/brb.json")
        );
        assert_eq!(items[1].href, None);
    }
}
