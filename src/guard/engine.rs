use serde::Serialize;

use super::fingerprint::{self, StaleReason, Staleness};
use super::manifest::{self, ManifestRead};
use super::notice::{ConsoleNotifier, Notice, Notify};
use super::purger::{self, PurgeReport};
use crate::common::config::DistConfig;
use crate::common::errors::{GuardResult, IoResultExt};

/// What a single validation did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Required directories missing; nothing touched
    Skipped,
    /// Manifest matched; manifest rewritten, nothing deleted
    Fresh,
    /// Manifest did not match; dist purged, then manifest rewritten
    Stale {
        #[serde(serialize_with = "serialize_reason")]
        reason: StaleReason,
        report: PurgeReport,
    },
}

fn serialize_reason<S: serde::Serializer>(reason: &StaleReason, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(reason)
}

impl Outcome {
    pub fn purged(&self) -> bool {
        matches!(self, Outcome::Stale { .. })
    }
}

/// Read-only view of where a dist directory stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inspection {
    pub manifest: ManifestRead,
    pub staleness: Staleness,
}

/// Validate `config.dist_dir` against the last recorded configuration,
/// printing notifications to the console.
pub fn validate_dist(config: &DistConfig, version: &str) -> GuardResult<Outcome> {
    validate_dist_with(config, version, &ConsoleNotifier)
}

/// Validate the dist directory, purging it if the configuration or the
/// validator version changed since the last run.
///
/// The manifest is rewritten on every non-skipped run, stale or not, so it
/// always records the last configuration that was checked.
///
/// Callers must make sure only one build runs against a given
/// cache/dist pair at a time; nothing here locks.
pub fn validate_dist_with(
    config: &DistConfig,
    version: &str,
    notifier: &dyn Notify,
) -> GuardResult<Outcome> {
    if !config.has_required_dirs() {
        notifier.notify(&Notice::MissingDirs);
        tracing::info!("cacheDir or distDir missing, skipping dist validation");
        return Ok(Outcome::Skipped);
    }

    let manifest_dir = manifest::manifest_dir(&config.cache_dir);
    let manifest_path = manifest::manifest_path(&config.cache_dir);

    let previous = manifest::read(&manifest_path);
    let staleness = fingerprint::compare(config, version, &previous);

    let outcome = match staleness {
        Staleness::Fresh => {
            tracing::info!(dist = %config.dist_dir.display(), "dist dir is up to date");
            Outcome::Fresh
        }
        Staleness::Stale(reason) => {
            notifier.notify(&Notice::Cleaning(reason));
            let report = purger::purge_dist(&config.dist_dir)?;
            notifier.notify(&Notice::Cleaned);
            tracing::info!(
                dist = %config.dist_dir.display(),
                %reason,
                files = report.files_removed,
                dirs = report.dirs_removed,
                bytes = report.bytes_freed,
                "dist dir purged"
            );
            Outcome::Stale { reason, report }
        }
    };

    std::fs::create_dir_all(&manifest_dir).at_path(&manifest_dir)?;
    manifest::write(&manifest_path, config, version)?;

    Ok(outcome)
}

/// Compare without purging or writing anything
pub fn inspect(config: &DistConfig, version: &str) -> Option<Inspection> {
    if !config.has_required_dirs() {
        return None;
    }

    let manifest = manifest::read(&manifest::manifest_path(&config.cache_dir));
    let staleness = fingerprint::compare(config, version, &manifest);
    Some(Inspection {
        manifest,
        staleness,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::notice::CollectingNotifier;
    use tempfile::TempDir;

    fn setup() -> (TempDir, DistConfig) {
        let root = TempDir::new().unwrap();
        let cache = root.path().join("cache-root");
        let dist = root.path().join("dist");
        std::fs::create_dir_all(&dist).unwrap();
        let config = DistConfig {
            cache_dir: cache,
            dist_dir: dist,
            prefix: "ncm-".into(),
            reserved_names: vec!["btn".into(), "card".into()],
        };
        (root, config)
    }

    #[test]
    fn test_skip_touches_nothing() {
        let (_root, mut config) = setup();
        config.dist_dir = Default::default();
        let notifier = CollectingNotifier::new();

        let outcome = validate_dist_with(&config, "2", &notifier).unwrap();

        assert_eq!(outcome, Outcome::Skipped);
        assert_eq!(notifier.notices(), vec![Notice::MissingDirs]);
        assert!(!config.cache_dir.exists());
    }

    #[test]
    fn test_notices_on_stale() {
        let (_root, config) = setup();
        let notifier = CollectingNotifier::new();

        validate_dist_with(&config, "2", &notifier).unwrap();

        assert_eq!(
            notifier.notices(),
            vec![Notice::Cleaning(StaleReason::NoManifest), Notice::Cleaned]
        );
    }

    #[test]
    fn test_second_run_is_fresh_and_silent() {
        let (_root, config) = setup();
        validate_dist_with(&config, "2", &CollectingNotifier::new()).unwrap();

        std::fs::write(config.dist_dir.join("new.js"), "x").unwrap();
        let notifier = CollectingNotifier::new();
        let outcome = validate_dist_with(&config, "2", &notifier).unwrap();

        assert_eq!(outcome, Outcome::Fresh);
        assert!(notifier.notices().is_empty());
        assert!(config.dist_dir.join("new.js").exists());
    }

    #[test]
    fn test_inspect_is_read_only() {
        let (_root, config) = setup();
        std::fs::write(config.dist_dir.join("a.js"), "x").unwrap();

        let inspection = inspect(&config, "2").unwrap();

        assert_eq!(inspection.manifest, ManifestRead::Absent);
        assert_eq!(inspection.staleness, Staleness::Stale(StaleReason::NoManifest));
        assert!(config.dist_dir.join("a.js").exists());
        assert!(!manifest::manifest_path(&config.cache_dir).exists());
    }

    #[test]
    fn test_inspect_skips_incomplete_config() {
        let (_root, mut config) = setup();
        config.cache_dir = Default::default();
        assert!(inspect(&config, "2").is_none());
    }

    #[test]
    fn test_outcome_json() {
        let outcome = Outcome::Stale {
            reason: StaleReason::PrefixChanged,
            report: PurgeReport::default(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "stale");
        assert_eq!(json["reason"], "prefix changed");
        assert_eq!(json["report"]["files_removed"], 0);
    }
}
