//! Registry access layer
//!
//! Fetches package metadata and archives from an npm-compatible registry.
//! Every request carries the configured bearer credential.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Metadata   │────▶│  Resolver   │────▶│  Artifact   │
//! │  (fetch)    │     │  (~> match) │     │ (stream to  │
//! └─────────────┘     └─────────────┘     │  temp file) │
//!                                         └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`npm`]: npm registry gateway (metadata, resolution, download)
//! - [`traits`]: `Gateway` trait for substituting the registry
//! - [`artifact`]: Handle to a downloaded archive
//! - [`auth`]: Request authorization
//! - [`download`]: Saving archives to their final location
//! - [`error`]: Error types for registry operations

pub mod artifact;
pub mod auth;
pub mod download;
pub mod error;
pub mod npm;
pub mod traits;

pub use artifact::ArtifactHandle;
pub use error::GatewayError;
pub use npm::NpmGateway;
pub use traits::Gateway;
