//! Saving downloaded packages outside the temporary directory

use std::path::{Path, PathBuf};

use tracing::info;

use crate::gateway::error::GatewayError;
use crate::gateway::traits::Gateway;

/// Download a package and hand its archive over to the caller
///
/// With `output` the archive is moved there; otherwise the temporary file is
/// kept in place. Returns the final location of the archive.
pub async fn save_package(
    gateway: &dyn Gateway,
    package_name: &str,
    version: &str,
    output: Option<&Path>,
) -> Result<PathBuf, GatewayError> {
    let handle = gateway.download_package(package_name, version).await?;
    let size = handle.bytes_written();

    let path = match output {
        Some(path) => {
            handle.persist(path)?;
            path.to_path_buf()
        }
        None => handle.keep()?.1,
    };

    info!(
        "Saved {}@{} ({} bytes) to {:?}",
        package_name, version, size, path
    );
    Ok(path)
}
