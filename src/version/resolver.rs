//! Constraint resolution over a package's published versions

use semver::Version;
use tracing::{debug, error};

use crate::version::constraint::PessimisticConstraint;
use crate::version::error::ResolveError;
use crate::version::types::{PackageMetadata, ResolvedVersion, VersionDescriptor};

/// Select the highest published version satisfying `~> constraint`
///
/// Every key of `metadata.versions` must be a valid semantic version. A single
/// malformed key aborts the resolution with [`ResolveError::MalformedVersion`]
/// even if other keys would have matched.
///
/// # Returns
/// * `Ok(ResolvedVersion)` - The matching version and its tarball location
/// * `Err(ResolveError::NoMatchingVersion)` - Carries the requested constraint
///   and every version considered, newest first
pub fn resolve(
    metadata: &PackageMetadata,
    constraint: &str,
) -> Result<ResolvedVersion, ResolveError> {
    let candidates = sorted_candidates(metadata)?;
    let pessimistic = PessimisticConstraint::parse(constraint)?;

    debug!(
        "Resolving {} against {} published versions",
        pessimistic,
        candidates.len()
    );

    let matched = candidates
        .iter()
        .find(|(parsed, _, _)| pessimistic.matches(parsed));

    match matched {
        Some((_, raw, descriptor)) => Ok(ResolvedVersion {
            version: raw.to_string(),
            tarball: descriptor.tarball().to_string(),
        }),
        None => {
            let versions: Vec<String> = candidates
                .into_iter()
                .map(|(_, raw, _)| raw.to_string())
                .collect();
            error!(
                package_version = constraint,
                versions = ?versions,
                "unable to find acceptable version"
            );
            Err(ResolveError::NoMatchingVersion {
                constraint: constraint.to_string(),
                versions,
            })
        }
    }
}

/// Parse every version key and sort newest first
///
/// Keys are parsed strictly: registries publish full semantic versions, so
/// partial (`1.0`) or prefixed (`v1.0.0`) keys are reported as malformed
/// rather than normalized. Only the caller's constraint accepts those forms.
fn sorted_candidates(
    metadata: &PackageMetadata,
) -> Result<Vec<(Version, &str, &VersionDescriptor)>, ResolveError> {
    let mut keys: Vec<(&String, &VersionDescriptor)> = metadata.versions.iter().collect();
    // Stable order so the first malformed key reported does not depend on hashing
    keys.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut candidates = keys
        .into_iter()
        .map(|(raw, descriptor)| {
            Version::parse(raw)
                .map(|parsed| (parsed, raw.as_str(), descriptor))
                .map_err(|source| ResolveError::MalformedVersion {
                    version: raw.clone(),
                    source,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    candidates.sort_by(|(a, _, _), (b, _, _)| b.cmp(a));

    Ok(candidates)
}
