//! npm registry gateway
//!
//! Fetches a package's metadata document, resolves the requested version and
//! streams the matching tarball into a temporary file.

use std::io::{Seek, Write};
use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info, warn};
use url::Url;

use crate::config::{ConfigError, GatewayConfig, USER_AGENT};
use crate::gateway::artifact::ArtifactHandle;
use crate::gateway::auth::authorize;
use crate::gateway::error::GatewayError;
use crate::gateway::traits::Gateway;
use crate::version::resolver::resolve;
use crate::version::types::{PackageMetadata, ResolvedVersion};

/// Gateway to an npm-compatible registry
#[derive(Debug, Clone)]
pub struct NpmGateway {
    client: reqwest::Client,
    registry_url: Url,
    authorization: String,
    /// Directory for downloaded archives; the system temp dir when unset
    temp_dir: Option<PathBuf>,
}

impl NpmGateway {
    /// Creates a gateway around an already configured HTTP client
    ///
    /// The registry URL must be usable as a base (`https://host/path`), since
    /// package names are appended to its path.
    pub fn new(
        client: reqwest::Client,
        registry_url: Url,
        authorization: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        if registry_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidRegistryUrl {
                url: registry_url.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            });
        }

        Ok(Self {
            client,
            registry_url,
            authorization: authorization.into(),
            temp_dir: None,
        })
    }

    /// Stores downloaded archives in `dir` instead of the system temp dir
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    /// Creates a gateway from configuration, forcing the registry onto https
    pub fn from_config(config: &GatewayConfig) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidRegistryUrl {
            url: config.registry_url.clone(),
            reason,
        };

        let mut registry_url =
            Url::parse(&config.registry_url).map_err(|e| invalid(e.to_string()))?;
        registry_url.set_scheme("https").map_err(|_| {
            invalid(format!(
                "scheme '{}' cannot be upgraded to https",
                registry_url.scheme()
            ))
        })?;

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(ConfigError::HttpClient)?;

        Self::new(client, registry_url, config.authorization.clone())
    }

    pub fn registry_url(&self) -> &Url {
        &self.registry_url
    }

    /// Metadata endpoint for a package: the registry URL plus the name as one path segment
    ///
    /// Scoped names keep their slash encoded: `@types/node` -> `@types%2Fnode`
    pub fn package_url(&self, package_name: &str) -> Url {
        let mut url = self.registry_url.clone();
        // `new` only accepts base URLs, so the segments are always available
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(package_name);
        }
        url
    }

    /// Fetches the full metadata document of a package
    pub async fn fetch_metadata(
        &self,
        package_name: &str,
    ) -> Result<PackageMetadata, GatewayError> {
        let url = self.package_url(package_name);
        debug!("Fetching metadata for {} from {}", package_name, url);

        let response = authorize(self.client.get(url.clone()), &self.authorization)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound(package_name.to_string()));
        }

        if !status.is_success() {
            warn!("npm registry returned status {}: {}", status, url);
            return Err(GatewayError::UnexpectedStatus {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                GatewayError::Network(e)
            } else {
                GatewayError::ResponseRead {
                    url: url.to_string(),
                    source: e,
                }
            }
        })?;

        serde_json::from_slice(&body).map_err(|e| {
            warn!("Failed to parse npm registry response: {}", e);
            GatewayError::Decode {
                package: package_name.to_string(),
                source: e,
            }
        })
    }

    /// Streams an artifact into a fresh `.tar` temporary file
    ///
    /// The body is written chunk by chunk, so memory use does not grow with
    /// the archive size. The returned file is positioned at its start.
    pub async fn fetch_artifact(
        &self,
        artifact_url: &str,
    ) -> Result<ArtifactHandle, GatewayError> {
        debug!("Downloading artifact from {}", artifact_url);

        let mut response = authorize(self.client.get(artifact_url), &self.authorization)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Artifact download returned status {}: {}", status, artifact_url);
            return Err(GatewayError::UnexpectedStatus {
                url: artifact_url.to_string(),
                status,
            });
        }

        let mut builder = tempfile::Builder::new();
        builder.prefix("npm-").suffix(".tar");
        let mut file = match self.temp_dir.as_deref() {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(GatewayError::TempStorage)?;

        let copy_error = |source: std::io::Error| GatewayError::StreamCopy {
            url: artifact_url.to_string(),
            source,
        };

        // Only the current chunk is held in memory
        let mut bytes_written: u64 = 0;
        while let Some(chunk) = response.chunk().await.map_err(|e| {
            if e.is_timeout() {
                GatewayError::Network(e)
            } else {
                copy_error(std::io::Error::other(e))
            }
        })? {
            file.write_all(&chunk).map_err(copy_error)?;
            bytes_written += chunk.len() as u64;
        }

        file.flush().map_err(copy_error)?;
        file.rewind().map_err(copy_error)?;

        debug!("Downloaded {} bytes to {:?}", bytes_written, file.path());
        Ok(ArtifactHandle::new(file, bytes_written))
    }

    /// Fetches metadata and picks the version matching `~> version`
    pub async fn resolve_package(
        &self,
        package_name: &str,
        version: &str,
    ) -> Result<ResolvedVersion, GatewayError> {
        let metadata = self.fetch_metadata(package_name).await?;
        let resolved = resolve(&metadata, version)?;
        info!(
            "Resolved {}@{} to {}",
            package_name, version, resolved.version
        );
        Ok(resolved)
    }

    /// Resolves `~> version` for a package and downloads its tarball
    pub async fn download_package(
        &self,
        package_name: &str,
        version: &str,
    ) -> Result<ArtifactHandle, GatewayError> {
        debug!(
            name = package_name,
            package_version = version,
            "downloading package from npm"
        );
        let resolved = self.resolve_package(package_name, version).await?;
        self.fetch_artifact(&resolved.tarball).await
    }
}

#[async_trait::async_trait]
impl Gateway for NpmGateway {
    async fn resolve_package(
        &self,
        package_name: &str,
        version: &str,
    ) -> Result<ResolvedVersion, GatewayError> {
        NpmGateway::resolve_package(self, package_name, version).await
    }

    async fn download_package(
        &self,
        package_name: &str,
        version: &str,
    ) -> Result<ArtifactHandle, GatewayError> {
        NpmGateway::download_package(self, package_name, version).await
    }
}
