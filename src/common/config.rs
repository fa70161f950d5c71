use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::errors::{GuardError, GuardResult, IoResultExt};

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "distguard.toml";

/// Configuration a build plugin hands to the guard on every invocation.
///
/// Serialized with camelCase keys, which is also the shape of the
/// fingerprint stored in the manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistConfig {
    /// Directory holding the plugin's own cache (and the manifest)
    pub cache_dir: PathBuf,

    /// Shared distribution directory the plugin writes into
    pub dist_dir: PathBuf,

    /// Prefix prepended to generated class names
    pub prefix: String,

    /// Names the minifier must never generate
    pub reserved_names: Vec<String>,
}

impl DistConfig {
    pub fn new(
        cache_dir: impl Into<PathBuf>,
        dist_dir: impl Into<PathBuf>,
        prefix: impl Into<String>,
        reserved_names: &[&str],
    ) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            dist_dir: dist_dir.into(),
            prefix: prefix.into(),
            reserved_names: reserved_names.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Both directories must be set before anything touches the disk
    pub fn has_required_dirs(&self) -> bool {
        !self.cache_dir.as_os_str().is_empty() && !self.dist_dir.as_os_str().is_empty()
    }
}

/// On-disk TOML form of the configuration. Every key is optional so
/// command-line flags can fill in or override whatever is missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub cache_dir: Option<String>,

    #[serde(default)]
    pub dist_dir: Option<String>,

    #[serde(default)]
    pub prefix: Option<String>,

    #[serde(default)]
    pub reserved_names: Option<Vec<String>>,

    /// Logic version override; normally the crate version is used
    #[serde(default)]
    pub version: Option<String>,
}

impl ConfigFile {
    /// Load a config file, failing if it is unreadable or malformed
    pub fn load(path: &Path) -> GuardResult<Self> {
        let contents = std::fs::read_to_string(path).at_path(path)?;
        toml::from_str(&contents).map_err(|e| GuardError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load the file if it exists, otherwise an empty config
    pub fn load_or_default(path: &Path) -> GuardResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Resolve into a `DistConfig`. Missing directories stay empty so the
    /// guard can report the misconfiguration itself.
    pub fn into_dist_config(self) -> DistConfig {
        DistConfig {
            cache_dir: self
                .cache_dir
                .map(|p| expand_home(&p))
                .unwrap_or_default(),
            dist_dir: self
                .dist_dir
                .map(|p| expand_home(&p))
                .unwrap_or_default(),
            prefix: self.prefix.unwrap_or_default(),
            reserved_names: self.reserved_names.unwrap_or_default(),
        }
    }
}

/// Expand a leading `~` to the home directory
pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" || path.starts_with("~/") {
        if let Some(home) = dirs::home_dir() {
            return match path.strip_prefix("~/") {
                Some(rest) => home.join(rest),
                None => home,
            };
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_dirs() {
        assert!(DistConfig::new("/c", "/d", "", &[]).has_required_dirs());
        assert!(!DistConfig::new("/c", "", "", &[]).has_required_dirs());
        assert!(!DistConfig::new("", "/d", "", &[]).has_required_dirs());
    }

    #[test]
    fn test_camel_case_json() {
        let config = DistConfig::new("/c", "/d", "ncm-", &["btn"]);
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["cacheDir"], "/c");
        assert_eq!(json["distDir"], "/d");
        assert_eq!(json["reservedNames"][0], "btn");
    }

    #[test]
    fn test_parse_partial_toml() {
        let file: ConfigFile = toml::from_str(
            r#"
            dist_dir = "out"
            reserved_names = ["btn", "card"]
            "#,
        )
        .unwrap();
        let config = file.into_dist_config();
        assert_eq!(config.dist_dir, PathBuf::from("out"));
        assert!(config.cache_dir.as_os_str().is_empty());
        assert_eq!(config.reserved_names, vec!["btn", "card"]);
        assert!(!config.has_required_dirs());
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "cache_dir = [").unwrap();
        let err = ConfigFile::load(&path).unwrap_err();
        assert!(matches!(err, GuardError::Config { .. }));
    }

    #[test]
    fn test_load_or_default_missing() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = ConfigFile::load_or_default(&dir.path().join("nope.toml")).unwrap();
        assert!(file.cache_dir.is_none());
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/abs/path"), PathBuf::from("/abs/path"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/build"), home.join("build"));
        }
    }
}
