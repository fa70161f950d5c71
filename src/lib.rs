//! # distguard
//!
//! Keeps a build plugin's shared output directory honest.
//!
//! Before a plugin writes transformed output into a distribution directory,
//! `validate_dist` checks whether that directory was last validated under the
//! same configuration. If anything changed (prefix, directories, reserved
//! names or the validator version) the directory is purged and the new
//! configuration is recorded in `<cacheDir>/ncm-meta/manifest.json`.
//!
//! - **All-or-nothing**: a stale dist dir is emptied completely
//! - **Cache shell survives**: a top-level `cache` directory is emptied, not removed
//! - **Tolerant reads**: a missing or corrupt manifest simply means "stale"

pub mod cli;
pub mod common;
pub mod guard;

pub use common::config::DistConfig;
pub use common::errors::{GuardError, GuardResult};
pub use guard::{inspect, validate_dist, validate_dist_with, Outcome};

/// Version of the validation logic, recorded in every manifest.
/// Bumping the crate version invalidates every previously validated dist dir.
pub const VALIDATOR_VERSION: &str = env!("CARGO_PKG_VERSION");
