use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::common::config::DistConfig;
use crate::common::errors::{GuardError, GuardResult, IoResultExt};

/// Subdirectory of the cache dir that holds guard metadata
pub const MANIFEST_DIR_NAME: &str = "ncm-meta";

/// File name of the fingerprint inside `MANIFEST_DIR_NAME`
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// Fingerprint written after every successful validation.
///
/// Field for field this is the `DistConfig` it was written from, plus the
/// version of the validation logic that checked it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistManifest<'a> {
    #[serde(flatten)]
    pub config: &'a DistConfig,
    pub version: &'a str,
}

/// A manifest as read back from disk.
///
/// Every field is optional: a field missing from the file compares
/// unequal to anything in the live configuration. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredManifest {
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,

    #[serde(default)]
    pub dist_dir: Option<PathBuf>,

    #[serde(default)]
    pub prefix: Option<String>,

    #[serde(default)]
    pub reserved_names: Option<Vec<String>>,

    #[serde(default)]
    pub version: Option<String>,
}

/// Result of trying to load a previous manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestRead {
    /// No manifest on disk (first run)
    Absent,
    /// File exists but could not be read or parsed
    Corrupt(String),
    /// A parsed manifest
    Present(StoredManifest),
}

impl ManifestRead {
    pub fn stored(&self) -> Option<&StoredManifest> {
        match self {
            ManifestRead::Present(stored) => Some(stored),
            _ => None,
        }
    }
}

/// `<cache_dir>/ncm-meta`
pub fn manifest_dir(cache_dir: &Path) -> PathBuf {
    cache_dir.join(MANIFEST_DIR_NAME)
}

/// `<cache_dir>/ncm-meta/manifest.json`
pub fn manifest_path(cache_dir: &Path) -> PathBuf {
    manifest_dir(cache_dir).join(MANIFEST_FILE_NAME)
}

/// Load the manifest at `path`. Never fails: missing and broken files are
/// reported as `Absent` and `Corrupt` so the caller can treat both as
/// "no baseline".
pub fn read(path: &Path) -> ManifestRead {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no previous manifest");
            return ManifestRead::Absent;
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "manifest unreadable");
            return ManifestRead::Corrupt(e.to_string());
        }
    };

    match serde_json::from_str::<StoredManifest>(&contents) {
        Ok(stored) => ManifestRead::Present(stored),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "manifest is not valid JSON");
            ManifestRead::Corrupt(e.to_string())
        }
    }
}

/// Write `config` plus `version` to `path`, creating the parent directory
pub fn write(path: &Path, config: &DistConfig, version: &str) -> GuardResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).at_path(parent)?;
    }

    let manifest = DistManifest { config, version };
    let json = serde_json::to_string_pretty(&manifest).map_err(|e| GuardError::Serialize {
        path: path.to_path_buf(),
        source: e,
    })?;
    std::fs::write(path, json).at_path(path)?;

    tracing::debug!(path = %path.display(), version, "manifest written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> DistConfig {
        DistConfig::new("/c", "/d", "ncm-", &["btn", "card"])
    }

    #[test]
    fn test_paths() {
        let cache = Path::new("/c");
        assert_eq!(manifest_dir(cache), PathBuf::from("/c/ncm-meta"));
        assert_eq!(
            manifest_path(cache),
            PathBuf::from("/c/ncm-meta/manifest.json")
        );
    }

    #[test]
    fn test_read_absent() {
        let dir = TempDir::new().unwrap();
        assert_eq!(read(&dir.path().join("manifest.json")), ManifestRead::Absent);
    }

    #[test]
    fn test_read_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("manifest.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(read(&path), ManifestRead::Corrupt(_)));
    }

    #[test]
    fn test_read_directory_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("manifest.json");
        std::fs::create_dir(&path).unwrap();
        assert!(matches!(read(&path), ManifestRead::Corrupt(_)));
    }

    #[test]
    fn test_write_creates_parent_and_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = manifest_path(dir.path());
        write(&path, &sample(), "2").unwrap();

        let stored = read(&path);
        let stored = stored.stored().expect("manifest should parse");
        assert_eq!(stored.cache_dir, Some(PathBuf::from("/c")));
        assert_eq!(stored.dist_dir, Some(PathBuf::from("/d")));
        assert_eq!(stored.prefix.as_deref(), Some("ncm-"));
        assert_eq!(
            stored.reserved_names,
            Some(vec!["btn".to_string(), "card".to_string()])
        );
        assert_eq!(stored.version.as_deref(), Some("2"));
    }

    #[test]
    fn test_written_json_shape() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("manifest.json");
        write(&path, &sample(), "2").unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 5);
        assert_eq!(value["cacheDir"], "/c");
        assert_eq!(value["distDir"], "/d");
        assert_eq!(value["prefix"], "ncm-");
        assert_eq!(value["reservedNames"], serde_json::json!(["btn", "card"]));
        assert_eq!(value["version"], "2");
    }

    #[test]
    fn test_unknown_and_missing_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("manifest.json");
        std::fs::write(&path, r#"{"prefix":"x-","extra":true}"#).unwrap();

        let read = read(&path);
        let stored = read.stored().unwrap();
        assert_eq!(stored.prefix.as_deref(), Some("x-"));
        assert!(stored.version.is_none());
        assert!(stored.reserved_names.is_none());
    }

    #[test]
    fn test_write_into_file_parent_fails() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("ncm-meta");
        std::fs::write(&blocker, "not a dir").unwrap();

        let err = write(&blocker.join("manifest.json"), &sample(), "2").unwrap_err();
        assert!(matches!(err, GuardError::Io { .. }));
    }
}
