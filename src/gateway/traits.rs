//! Gateway trait for resolving and downloading packages

#[cfg(test)]
use mockall::automock;

use crate::gateway::artifact::ArtifactHandle;
use crate::gateway::error::GatewayError;
use crate::version::types::ResolvedVersion;

/// Trait for registries packages can be downloaded from
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Gateway: Send + Sync {
    /// Resolves `~> version` for a package without downloading it
    async fn resolve_package(
        &self,
        package_name: &str,
        version: &str,
    ) -> Result<ResolvedVersion, GatewayError>;

    /// Resolves `~> version` for a package and downloads its archive
    ///
    /// # Returns
    /// * `Ok(ArtifactHandle)` - Temporary `.tar` file holding the archive
    /// * `Err(GatewayError)` - The first failure of any stage, unchanged
    async fn download_package(
        &self,
        package_name: &str,
        version: &str,
    ) -> Result<ArtifactHandle, GatewayError>;
}
