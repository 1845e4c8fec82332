//! RAII ephemeral clone.

use crate::error::{NodeError, Result};
use crate::git;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, warn};

const CLONE_PREFIX: &str = "codeprompt-";

/// A shallow checkout that lives in its own temporary directory.
///
/// When dropped, the directory and everything in it is deleted.
/// If deletion fails, a warning is logged but no panic occurs.
#[derive(Debug)]
pub struct EphemeralClone {
    /// Owning temporary directory; `None` once closed.
    dir: Option<TempDir>,

    /// Working tree inside `dir`.
    checkout: PathBuf,
}

impl EphemeralClone {
    /// Clone `branch` of `url` into a fresh directory under `root`.
    ///
    /// With no `root`, the system temp directory is used. The scratch
    /// directory is removed again when the clone itself fails.
    pub fn create(root: Option<&Path>, url: &str, branch: &str) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(CLONE_PREFIX);

        let dir = match root {
            Some(root) => {
                std::fs::create_dir_all(root).map_err(|e| {
                    NodeError::ConfigError(format!(
                        "failed to create clone root '{}': {}",
                        root.display(),
                        e
                    ))
                })?;
                builder.tempdir_in(root)?
            }
            None => builder.tempdir()?,
        };

        let checkout = dir.path().join(repo_stem(url));
        let clone = Self {
            dir: Some(dir),
            checkout,
        };

        debug!(url = %url, branch = %branch, dest = %clone.checkout.display(), "cloning repository");
        git::clone_repository(url, branch, &clone.checkout)?;
        Ok(clone)
    }

    /// Root of the cloned working tree.
    pub fn path(&self) -> &Path {
        &self.checkout
    }

    /// Delete the clone now, reporting failure instead of logging it.
    pub fn close(mut self) -> Result<()> {
        match self.dir.take() {
            Some(dir) => {
                let location = dir.path().to_path_buf();
                dir.close().map_err(|e| removal_error(&location, e))
            }
            None => Ok(()),
        }
    }
}

fn removal_error(location: &Path, e: std::io::Error) -> NodeError {
    NodeError::Io(std::io::Error::new(
        e.kind(),
        format!("failed to remove clone '{}': {}", location.display(), e),
    ))
}

impl Drop for EphemeralClone {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take() {
            let location = dir.path().to_path_buf();
            if let Err(e) = dir.close() {
                warn!(path = %location.display(), error = %e, "failed to remove clone");
            }
        }
    }
}

/// Directory name for a checkout of `url`: its last segment without extension.
pub fn repo_stem(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches(['/', '\\']);
    let last = trimmed.rsplit(['/', '\\', ':']).next().unwrap_or(trimmed);

    let stem = Path::new(last)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    if stem.is_empty() || stem == "." || stem == ".." {
        "repository".to_string()
    } else {
        stem
    }
}
