//! Pessimistic ("~>") version constraint
//!
//! A constraint accepts any version greater than or equal to the given one
//! that does not cross the boundary above its least-significant specified
//! segment:
//! - `~> 1.2.3` - `>=1.2.3 <1.3.0`
//! - `~> 1.2` - `>=1.2.0 <2.0.0`
//! - `~> 1` - `>=1.0.0` (nothing to pin)
//!
//! Pre-release versions only match a constraint that carries a pre-release
//! on the same `major.minor.patch`.

use std::cmp::Ordering;
use std::fmt;

use semver::{BuildMetadata, Prerelease, Version};

use crate::version::error::ResolveError;

const MAX_SEGMENTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PessimisticConstraint {
    /// Lower bound with unspecified segments padded with zero
    lower: Version,
    /// Number of segments given by the caller (1..=3)
    specified: usize,
}

impl PessimisticConstraint {
    /// Compile a caller-supplied version string such as `1.2`, `v1.2.3` or `2.0.0-rc.1`
    pub fn parse(constraint: &str) -> Result<Self, ResolveError> {
        let malformed = |reason: String| ResolveError::MalformedConstraint {
            constraint: constraint.to_string(),
            reason,
        };

        let spec = constraint.trim();
        let spec = spec.strip_prefix('v').unwrap_or(spec);
        if spec.is_empty() {
            return Err(malformed("empty version".to_string()));
        }

        let spec = match spec.split_once('+') {
            Some((rest, build)) => {
                if build.is_empty() {
                    return Err(malformed("empty build metadata".to_string()));
                }
                BuildMetadata::new(build).map_err(|e| malformed(e.to_string()))?;
                rest
            }
            None => spec,
        };

        let (core, pre) = match spec.split_once('-') {
            Some((_, "")) => return Err(malformed("empty pre-release".to_string())),
            Some((core, pre)) => {
                let pre = Prerelease::new(pre).map_err(|e| malformed(e.to_string()))?;
                (core, pre)
            }
            None => (spec, Prerelease::EMPTY),
        };

        let segments = core
            .split('.')
            .map(|segment| {
                segment
                    .parse::<u64>()
                    .map_err(|_| malformed(format!("invalid segment '{}'", segment)))
            })
            .collect::<Result<Vec<u64>, _>>()?;

        if segments.len() > MAX_SEGMENTS {
            return Err(malformed(format!(
                "expected at most {} segments, got {}",
                MAX_SEGMENTS,
                segments.len()
            )));
        }

        let segment = |i: usize| segments.get(i).copied().unwrap_or(0);
        let mut lower = Version::new(segment(0), segment(1), segment(2));
        lower.pre = pre;

        Ok(Self {
            lower,
            specified: segments.len(),
        })
    }

    /// Lower bound of the accepted range
    pub fn lower_bound(&self) -> &Version {
        &self.lower
    }

    /// Check if a version satisfies this constraint
    pub fn matches(&self, version: &Version) -> bool {
        let lower = &self.lower;

        match (lower.pre.is_empty(), version.pre.is_empty()) {
            // Stable constraints never pick up pre-releases
            (true, false) => return false,
            // Pre-release constraints only match pre-releases of the same release
            (false, true) => return false,
            (false, false) => {
                if (version.major, version.minor, version.patch)
                    != (lower.major, lower.minor, lower.patch)
                {
                    return false;
                }
            }
            (true, true) => {}
        }

        if version.cmp_precedence(lower) == Ordering::Less {
            return false;
        }

        let pinned = self.specified - 1;
        let actual = [version.major, version.minor, version.patch];
        let expected = [lower.major, lower.minor, lower.patch];
        actual[..pinned] == expected[..pinned]
    }
}

impl fmt::Display for PessimisticConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let segments = [self.lower.major, self.lower.minor, self.lower.patch];
        let core = segments[..self.specified]
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(".");
        if self.lower.pre.is_empty() {
            write!(f, "~> {}", core)
        } else {
            write!(f, "~> {}-{}", core, self.lower.pre)
        }
    }
}
