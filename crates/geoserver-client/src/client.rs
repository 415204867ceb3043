//! HTTP implementation of [`CatalogApi`] over the GeoServer REST API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::api::CatalogApi;
use crate::error::{ClientError, ClientResult};
use crate::rest::{
    CoveragePayload, CoverageStorePayload, CoverageStoresResponse, CoveragesResponse, ResourceRef,
    StyleUpdatePayload, WorkspaceDetailResponse, WorkspacePayload, WorkspacesResponse,
};

/// Connection parameters for one catalog endpoint.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// REST root, e.g. `https://geoserver.example.com/geoserver/rest`.
    pub base_url: String,
    pub username: String,
    pub password: String,
}

/// Basic-auth JSON client for one GeoServer instance.
///
/// One instance is shared by all publication components for the lifetime of
/// an upload session; it holds no state beyond connection parameters.
pub struct GsCatalog {
    http: Client,
    base_url: String,
    username: String,
    password: String,
}

impl GsCatalog {
    pub fn new(config: CatalogConfig) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(120))
            .connect_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            username: config.username,
            password: config.password,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn check(
        response: Response,
        method: &'static str,
        url: &str,
    ) -> ClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ClientError::Status {
            method,
            url: url.to_string(),
            status: status.as_u16(),
            body,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> ClientResult<T> {
        debug!(url = %url, "GET");
        let response = self
            .http
            .get(url)
            .basic_auth(&self.username, Some(&self.password))
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let body = Self::check(response, "GET", url).await?.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Format {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    async fn post_json<B: Serialize>(&self, url: &str, body: &B) -> ClientResult<()> {
        debug!(url = %url, "POST");
        let response = self
            .http
            .post(url)
            .basic_auth(&self.username, Some(&self.password))
            .json(body)
            .send()
            .await?;

        Self::check(response, "POST", url).await?;
        Ok(())
    }

    async fn put_json<B: Serialize>(&self, url: &str, body: &B) -> ClientResult<()> {
        debug!(url = %url, "PUT");
        let response = self
            .http
            .put(url)
            .basic_auth(&self.username, Some(&self.password))
            .json(body)
            .send()
            .await?;

        Self::check(response, "PUT", url).await?;
        Ok(())
    }

    async fn delete(&self, url: &str) -> ClientResult<()> {
        debug!(url = %url, "DELETE");
        let response = self
            .http
            .delete(url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await?;

        Self::check(response, "DELETE", url).await?;
        Ok(())
    }
}

#[async_trait]
impl CatalogApi for GsCatalog {
    async fn list_workspaces(&self) -> ClientResult<Vec<ResourceRef>> {
        let url = self.url("workspaces.json");
        let response: WorkspacesResponse = self.get_json(&url).await?;
        Ok(response
            .workspaces
            .into_option()
            .map(|items| items.workspace)
            .unwrap_or_default())
    }

    async fn list_coverage_stores(&self, workspace: &str) -> ClientResult<Vec<ResourceRef>> {
        // Follow the workspace detail's coverageStores href when it is
        // advertised; older servers omit it.
        let detail_url = self.url(&format!("workspaces/{}.json", workspace));
        let detail: WorkspaceDetailResponse = self.get_json(&detail_url).await?;

        let stores_url = detail
            .workspace
            .coverage_stores
            .unwrap_or_else(|| self.url(&format!("workspaces/{}/coveragestores.json", workspace)));

        let response: CoverageStoresResponse = self.get_json(&stores_url).await?;
        Ok(response
            .coverage_stores
            .into_option()
            .map(|items| items.coverage_store)
            .unwrap_or_default())
    }

    async fn list_coverages(&self, workspace: &str, store: &str) -> ClientResult<Vec<ResourceRef>> {
        let url = self.url(&format!(
            "workspaces/{}/coveragestores/{}/coverages.json",
            workspace, store
        ));
        let response: CoveragesResponse = self.get_json(&url).await?;
        Ok(response
            .coverages
            .into_option()
            .map(|items| items.coverage)
            .unwrap_or_default())
    }

    async fn create_workspace(&self, payload: &WorkspacePayload) -> ClientResult<()> {
        let url = self.url("workspaces.json");
        self.post_json(&url, payload).await
    }

    async fn create_coverage_store(
        &self,
        workspace: &str,
        payload: &CoverageStorePayload,
    ) -> ClientResult<()> {
        let url = self.url(&format!("workspaces/{}/coveragestores.json", workspace));
        self.post_json(&url, payload).await
    }

    async fn create_coverage(
        &self,
        workspace: &str,
        store: &str,
        payload: &CoveragePayload,
    ) -> ClientResult<()> {
        let url = self.url(&format!(
            "workspaces/{}/coveragestores/{}/coverages.json",
            workspace, store
        ));
        self.post_json(&url, payload).await
    }

    async fn set_default_style(
        &self,
        workspace: &str,
        layer: &str,
        style: &str,
    ) -> ClientResult<()> {
        let url = self.url(&format!("layers/{}:{}.json", workspace, layer));
        self.put_json(&url, &StyleUpdatePayload::new(style)).await
    }

    async fn delete_coverage_store(
        &self,
        workspace: &str,
        store: &str,
        recurse: bool,
    ) -> ClientResult<()> {
        let url = self.url(&format!(
            "workspaces/{}/coveragestores/{}.json?recurse={}",
            workspace, store, recurse
        ));
        self.delete(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join_trims_slashes() {
        let catalog = GsCatalog::new(CatalogConfig {
            base_url: "http://gs.example.com/geoserver/rest/".to_string(),
            username: "admin".to_string(),
            password: "secret".to_string(),
        })
        .unwrap();

        assert_eq!(
            catalog.url("/workspaces.json"),
            "http://gs.example.com/geoserver/rest/workspaces.json"
        );
    }
}
