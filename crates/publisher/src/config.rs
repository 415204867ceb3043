//! Publication configuration and per-upload context.

use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;

/// Policy for a store that already exists on the catalog.
///
/// The historical behavior is `Fail`: re-uploading over an existing store
/// aborts loudly and the operator resolves the collision by hand. `Skip`
/// reuses the store and still publishes missing layers; `Recreate` deletes
/// the store (recursively) and builds it fresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnExists {
    #[default]
    Fail,
    Skip,
    Recreate,
}

impl FromStr for OnExists {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fail" => Ok(OnExists::Fail),
            "skip" => Ok(OnExists::Skip),
            "recreate" => Ok(OnExists::Recreate),
            other => Err(format!(
                "invalid on-exists policy '{}', expected fail, skip or recreate",
                other
            )),
        }
    }
}

/// Session-wide publication settings.
#[derive(Debug, Clone)]
pub struct PublishConfig {
    /// Data directory the catalog server reads `file:` store URLs from.
    pub data_root: String,
    /// Local scratch directory for prepared artifact copies.
    pub work_dir: PathBuf,
    /// What to do when the target store already exists.
    pub on_exists: OnExists,
}

impl PublishConfig {
    pub fn new(data_root: impl Into<String>) -> Self {
        Self {
            data_root: data_root.into(),
            work_dir: std::env::temp_dir(),
            on_exists: OnExists::default(),
        }
    }
}

/// Values threaded through every step of one upload.
///
/// Replaces the ad-hoc driver attributes of the original tooling: the basin
/// and acquisition date are fixed once after the transform and passed
/// explicitly from then on.
#[derive(Debug, Clone)]
pub struct UploadContext {
    /// Lower-cased basin name; also the workspace name.
    pub basin: String,
    /// Acquisition date of the artifact.
    pub date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_on_exists_parses_case_insensitively() {
        assert_eq!("fail".parse::<OnExists>().unwrap(), OnExists::Fail);
        assert_eq!("Skip".parse::<OnExists>().unwrap(), OnExists::Skip);
        assert_eq!("RECREATE".parse::<OnExists>().unwrap(), OnExists::Recreate);
        assert!("merge".parse::<OnExists>().is_err());
    }

    #[test]
    fn test_default_policy_is_fail() {
        assert_eq!(OnExists::default(), OnExists::Fail);
    }
}
