use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Malformed version '{version}': {source}")]
    MalformedVersion {
        version: String,
        #[source]
        source: semver::Error,
    },

    #[error("Malformed constraint '{constraint}': {reason}")]
    MalformedConstraint { constraint: String, reason: String },

    #[error("Unable to find acceptable version for provided: {constraint} (available: {versions:?})")]
    NoMatchingVersion {
        constraint: String,
        versions: Vec<String>,
    },
}
