//! Downloaded archive on local storage

use std::fs::File;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::warn;

use crate::gateway::error::GatewayError;

/// Temporary file holding a fetched package archive
///
/// The file is removed when the handle is dropped unless the caller detaches
/// it with [`ArtifactHandle::keep`] or moves it with [`ArtifactHandle::persist`].
#[derive(Debug)]
pub struct ArtifactHandle {
    file: NamedTempFile,
    bytes_written: u64,
}

impl ArtifactHandle {
    pub(crate) fn new(file: NamedTempFile, bytes_written: u64) -> Self {
        Self {
            file,
            bytes_written,
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Open file positioned at the start of the archive
    pub fn as_file(&self) -> &File {
        self.file.as_file()
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    pub fn into_temp_file(self) -> NamedTempFile {
        self.file
    }

    /// Disable automatic deletion; the caller owns the file from now on
    pub fn keep(self) -> Result<(File, PathBuf), GatewayError> {
        self.file
            .keep()
            .map_err(|e| GatewayError::TempStorage(e.error))
    }

    /// Move the archive to `path`, replacing any existing file
    pub fn persist(self, path: &Path) -> Result<(), GatewayError> {
        match self.file.persist(path) {
            Ok(_) => Ok(()),
            // rename fails across filesystems; fall back to copying
            Err(e) => {
                warn!("Failed to move {:?} to {:?}: {}", e.file.path(), path, e.error);
                std::fs::copy(e.file.path(), path).map_err(|source| GatewayError::Persist {
                    path: path.to_path_buf(),
                    source,
                })?;
                Ok(())
            }
        }
    }
}
