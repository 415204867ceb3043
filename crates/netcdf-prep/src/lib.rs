//! NetCDF artifact preparation.
//!
//! A source artifact is never published as-is: it is copied into a reduced
//! form first (dropping unwanted variables, masking to the basin boundary)
//! and, when the copy carries no projection variable, tagged with UTM
//! grid-mapping metadata derived from an EPSG code. The copy also yields the
//! metadata publication needs: the variable list, per-variable value ranges,
//! and the acquisition date decoded from the time coordinate.
//!
//! The source file is opened read-only and never mutated.

pub mod error;
pub mod projection;
pub mod transform;

pub use error::{PrepError, PrepResult};
pub use projection::{utm_mapping_from_epsg, UtmMapping};
pub use transform::{prepare_copy, tag_utm_projection, PrepOutput, VarFilter, COORDINATE_VARS};
