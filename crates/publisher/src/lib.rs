//! Basin data publication.
//!
//! Drives the multi-step workflow that takes a local netCDF artifact and
//! publishes it onto a GeoServer catalog:
//!
//! 1. ensure the basin workspace exists
//! 2. reduce/mask/tag the artifact (see `netcdf-prep`)
//! 3. transfer the artifact next to the catalog's data root
//! 4. create the coverage store, then each missing layer in dependency order
//! 5. style every created layer
//!
//! Steps are not transactional: a failure partway leaves the catalog
//! partially published, and re-running is the recovery path (subject to the
//! [`config::OnExists`] policy for the store). Every external collaborator
//! sits behind a trait (`CatalogApi`, [`prep::ArtifactPrep`],
//! [`transfer::Transfer`], [`confirm::Confirm`]) so the whole driver is
//! testable without a server.

pub mod config;
pub mod confirm;
pub mod error;
pub mod orchestrator;
pub mod prep;
pub mod style;
pub mod tables;
pub mod transfer;
pub mod upload;

// Re-exports
pub use config::{OnExists, PublishConfig, UploadContext};
pub use confirm::{AssumeYes, Confirm, StdinConfirm};
pub use error::{PublishError, PublishResult};
pub use orchestrator::{CreateOutcome, Orchestrator};
pub use prep::{ArtifactPrep, NetcdfPrep, PrepKind, PrepRequest, PreparedArtifact};
pub use transfer::{LocalCopy, ScpTransfer, Transfer, TransferError};
pub use upload::{UploadOutcome, UploadRequest, UploadType, Uploader};
