//! Version resolution layer
//!
//! Turns a package's published version map and a caller-supplied version into
//! the single artifact location to download.
//!
//! # Modules
//!
//! - [`constraint`]: Pessimistic (`~>`) constraint parsing and matching
//! - [`resolver`]: Picks the highest published version satisfying a constraint
//! - [`error`]: Error types for resolution
//! - [`types`]: Registry metadata document types

pub mod constraint;
pub mod error;
pub mod resolver;
pub mod types;
