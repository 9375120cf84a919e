//! Resolve npm packages against a pessimistic version constraint and
//! download their archives from an authenticated registry.

pub mod config;
pub mod gateway;
pub mod logging;
pub mod version;
