//! Artifact transfer to the catalog host.
//!
//! The prepared artifact must land under the catalog's data root before the
//! store referencing it is created. [`ScpTransfer`] copies over ssh;
//! [`LocalCopy`] is the same-host fallback for installs where the catalog
//! reads the same filesystem.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info};

/// A failed artifact transfer.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransferError(pub String);

/// Copy a local artifact to a path the catalog server can read.
#[async_trait]
pub trait Transfer: Send + Sync {
    async fn copy(&self, local: &Path, remote: &str) -> Result<(), TransferError>;
}

/// Copy via `scp`, creating the remote directory first.
pub struct ScpTransfer {
    pub host: String,
    pub identity: Option<PathBuf>,
}

impl ScpTransfer {
    pub fn new(host: impl Into<String>, identity: Option<PathBuf>) -> Self {
        Self {
            host: host.into(),
            identity,
        }
    }

    async fn run(&self, program: &str, args: &[String]) -> Result<(), TransferError> {
        debug!(program = %program, args = ?args, "Running transfer command");

        let output = Command::new(program)
            .args(args)
            .output()
            .await
            .map_err(|e| TransferError(format!("failed to spawn {}: {}", program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TransferError(format!(
                "{} exited with {}: {}",
                program,
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl Transfer for ScpTransfer {
    async fn copy(&self, local: &Path, remote: &str) -> Result<(), TransferError> {
        let remote_dir = Path::new(remote)
            .parent()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| ".".to_string());

        let mut ssh_args = Vec::new();
        if let Some(identity) = &self.identity {
            ssh_args.push("-i".to_string());
            ssh_args.push(identity.display().to_string());
        }
        ssh_args.push(self.host.clone());
        ssh_args.push(format!("mkdir -p {}", remote_dir));
        self.run("ssh", &ssh_args).await?;

        let mut scp_args = Vec::new();
        if let Some(identity) = &self.identity {
            scp_args.push("-i".to_string());
            scp_args.push(identity.display().to_string());
        }
        scp_args.push(local.display().to_string());
        scp_args.push(format!("{}:{}", self.host, remote));
        self.run("scp", &scp_args).await?;

        info!(local = %local.display(), host = %self.host, remote = %remote, "Transferred artifact");
        Ok(())
    }
}

/// Same-host fallback: plain filesystem copy into the data root.
pub struct LocalCopy;

#[async_trait]
impl Transfer for LocalCopy {
    async fn copy(&self, local: &Path, remote: &str) -> Result<(), TransferError> {
        let remote_path = Path::new(remote);

        if let Some(parent) = remote_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| TransferError(format!("mkdir {} failed: {}", parent.display(), e)))?;
        }

        tokio::fs::copy(local, remote_path).await.map_err(|e| {
            TransferError(format!(
                "copy {} -> {} failed: {}",
                local.display(),
                remote,
                e
            ))
        })?;

        info!(local = %local.display(), remote = %remote, "Copied artifact");
        Ok(())
    }
}
