//! Registry document types shared by the resolver and the gateway

use std::collections::HashMap;

use serde::Deserialize;

/// Full per-package record returned by the registry metadata endpoint
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct PackageMetadata {
    #[serde(default)]
    pub name: Option<String>,
    /// Every published version keyed by its raw version string
    #[serde(default)]
    pub versions: HashMap<String, VersionDescriptor>,
}

impl PackageMetadata {
    /// Returns the raw version strings, in no particular order
    pub fn version_strings(&self) -> Vec<String> {
        self.versions.keys().cloned().collect()
    }
}

impl FromIterator<(String, VersionDescriptor)> for PackageMetadata {
    fn from_iter<I: IntoIterator<Item = (String, VersionDescriptor)>>(iter: I) -> Self {
        Self {
            name: None,
            versions: iter.into_iter().collect(),
        }
    }
}

/// Metadata of one published version
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct VersionDescriptor {
    pub dist: DistInfo,
}

impl VersionDescriptor {
    pub fn new(tarball: impl Into<String>) -> Self {
        Self {
            dist: DistInfo {
                tarball: tarball.into(),
            },
        }
    }

    /// Location of the distributable archive
    pub fn tarball(&self) -> &str {
        &self.dist.tarball
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DistInfo {
    pub tarball: String,
}

/// Outcome of resolving a constraint against a metadata document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    pub version: String,
    pub tarball: String,
}
