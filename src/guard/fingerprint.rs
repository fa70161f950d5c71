use std::collections::HashSet;
use std::fmt;

use super::manifest::{ManifestRead, StoredManifest};
use crate::common::config::DistConfig;

/// Why a dist directory is considered stale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaleReason {
    NoManifest,
    CorruptManifest,
    PrefixChanged,
    CacheDirChanged,
    DistDirChanged,
    ReservedNamesChanged,
    VersionChanged,
}

impl fmt::Display for StaleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StaleReason::NoManifest => write!(f, "no previous manifest"),
            StaleReason::CorruptManifest => write!(f, "previous manifest is unreadable"),
            StaleReason::PrefixChanged => write!(f, "prefix changed"),
            StaleReason::CacheDirChanged => write!(f, "cacheDir changed"),
            StaleReason::DistDirChanged => write!(f, "distDir changed"),
            StaleReason::ReservedNamesChanged => write!(f, "reservedNames changed"),
            StaleReason::VersionChanged => write!(f, "validator version changed"),
        }
    }
}

/// Comparison of the live configuration against the stored manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Staleness {
    Fresh,
    Stale(StaleReason),
}

impl Staleness {
    pub fn is_stale(&self) -> bool {
        matches!(self, Staleness::Stale(_))
    }

    pub fn reason(&self) -> Option<StaleReason> {
        match self {
            Staleness::Fresh => None,
            Staleness::Stale(reason) => Some(*reason),
        }
    }
}

/// Decide whether the dist directory was validated under `config` and
/// `version`. Missing and corrupt manifests are always stale.
pub fn compare(config: &DistConfig, version: &str, previous: &ManifestRead) -> Staleness {
    let stored = match previous {
        ManifestRead::Absent => return Staleness::Stale(StaleReason::NoManifest),
        ManifestRead::Corrupt(_) => return Staleness::Stale(StaleReason::CorruptManifest),
        ManifestRead::Present(stored) => stored,
    };

    match first_mismatch(config, version, stored) {
        Some(reason) => Staleness::Stale(reason),
        None => Staleness::Fresh,
    }
}

fn first_mismatch(config: &DistConfig, version: &str, stored: &StoredManifest) -> Option<StaleReason> {
    if stored.prefix.as_deref() != Some(config.prefix.as_str()) {
        return Some(StaleReason::PrefixChanged);
    }
    // Raw comparison: "/d/" and "/d" are different configurations
    if stored.cache_dir.as_ref().map(|p| p.as_os_str()) != Some(config.cache_dir.as_os_str()) {
        return Some(StaleReason::CacheDirChanged);
    }
    if stored.dist_dir.as_ref().map(|p| p.as_os_str()) != Some(config.dist_dir.as_os_str()) {
        return Some(StaleReason::DistDirChanged);
    }
    if !same_names(stored.reserved_names.as_deref(), &config.reserved_names) {
        return Some(StaleReason::ReservedNamesChanged);
    }
    if stored.version.as_deref() != Some(version) {
        return Some(StaleReason::VersionChanged);
    }
    None
}

/// Order-independent: same length, and membership holds in both directions
fn same_names(stored: Option<&[String]>, current: &[String]) -> bool {
    let Some(stored) = stored else {
        return false;
    };
    if stored.len() != current.len() {
        return false;
    }
    let stored_set: HashSet<&str> = stored.iter().map(String::as_str).collect();
    let current_set: HashSet<&str> = current.iter().map(String::as_str).collect();
    current_set.iter().all(|name| stored_set.contains(name))
        && stored_set.iter().all(|name| current_set.contains(name))
}
