//! GeoServer REST catalog client.
//!
//! Provides a typed view of the small slice of the GeoServer REST API that
//! basin publication needs:
//!
//! - listing workspaces, coverage stores and coverages
//! - creating workspaces, NetCDF coverage stores and coverages
//! - forcing a layer's default style
//!
//! The [`CatalogApi`] trait is the seam between callers and the wire: the
//! publication driver and orchestrator only ever see the trait, so tests can
//! substitute an in-memory catalog. [`GsCatalog`] is the HTTP implementation
//! over basic-auth JSON requests.

pub mod api;
pub mod client;
pub mod error;
pub mod probe;
pub mod rest;

// Re-exports
pub use api::CatalogApi;
pub use client::{CatalogConfig, GsCatalog};
pub use error::{ClientError, ClientResult};
pub use probe::{exists, probe, ResourceProbe};
pub use rest::{
    CoveragePayload, CoverageStorePayload, NumberRange, ResourceRef, StyleUpdatePayload,
    WorkspacePayload,
};
