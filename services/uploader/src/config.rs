//! Credential file loading.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Contents of the protected credentials JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    /// REST root of the catalog, e.g. `https://host/geoserver/rest`.
    pub url: String,
    pub username: String,
    pub password: String,
    /// Data directory the catalog server reads `file:` store URLs from.
    pub data_root: String,
    /// Host to scp artifacts to; omit when the catalog shares this
    /// machine's filesystem.
    #[serde(default)]
    pub remote_host: Option<String>,
    /// Identity file for the ssh/scp transfer.
    #[serde(default)]
    pub ssh_identity: Option<PathBuf>,
}

impl Credentials {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read credentials file {}", path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse credentials file {}", path.display()))
    }
}
