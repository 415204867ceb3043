//! Error types for the publication crate.

use std::path::PathBuf;

use thiserror::Error;

use crate::transfer::TransferError;

/// Result type alias using PublishError.
pub type PublishResult<T> = Result<T, PublishError>;

/// Errors that can abort an upload.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("catalog request failed: {0}")]
    Catalog(#[from] geoserver_client::ClientError),

    #[error("artifact preparation failed: {0}")]
    Prep(#[from] netcdf_prep::PrepError),

    #[error("transfer failed: {0}")]
    Transfer(#[from] TransferError),

    #[error("store '{store}' already exists in workspace '{workspace}'")]
    StoreExists { workspace: String, store: String },

    #[error("no publishable variables in {0}")]
    EmptyLayerSet(PathBuf),

    #[error("no projection in {file} and no usable EPSG code supplied")]
    MissingProjection { file: PathBuf },

    #[error("confirmation prompt failed: {0}")]
    Prompt(#[from] std::io::Error),
}
