use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use crate::common::config::{expand_home, ConfigFile, DistConfig, DEFAULT_CONFIG_FILE};
use crate::common::errors::GuardResult;
use crate::VALIDATOR_VERSION;

/// distguard — purge a build's dist directory when its configuration changes
#[derive(Parser, Debug)]
#[command(
    name = "distguard",
    version,
    about = "Purge stale build output when the plugin configuration changes",
    long_about = "distguard compares the current class-name minifier configuration against the\n\
                   manifest recorded in <cache-dir>/ncm-meta/manifest.json and empties the dist\n\
                   directory when they differ. A top-level 'cache' directory is emptied, not removed.",
    after_help = "EXAMPLES:\n  \
        distguard check --cache-dir .cache --dist-dir .next      Validate and purge if stale\n  \
        distguard check --reserved btn,card --prefix ncm-        Override reserved names and prefix\n  \
        distguard status --format json                           Report staleness without deleting\n  \
        distguard --config build/distguard.toml check            Read settings from a TOML file"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// TOML config file (defaults to ./distguard.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Cache directory; the manifest lives in <DIR>/ncm-meta
    #[arg(long, global = true, value_name = "DIR")]
    pub cache_dir: Option<String>,

    /// Distribution directory to guard
    #[arg(long, global = true, value_name = "DIR")]
    pub dist_dir: Option<String>,

    /// Class-name prefix
    #[arg(long, global = true)]
    pub prefix: Option<String>,

    /// Reserved class names, comma separated
    #[arg(long, global = true, value_delimiter = ',', value_name = "NAMES")]
    pub reserved: Option<Vec<String>>,

    /// Override the validator version recorded in the manifest
    #[arg(long, global = true, value_name = "VERSION")]
    pub logic_version: Option<String>,

    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode — minimal output
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate the dist directory, purging it if the configuration changed
    Check,

    /// Show whether the dist directory is stale, without changing anything
    Status,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    Quiet,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

impl Cli {
    /// Build the configuration from the config file, then apply flag overrides.
    /// Returns the configuration and the validator version to record.
    pub fn resolve(&self) -> GuardResult<(DistConfig, String)> {
        let file = match &self.config {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::load_or_default(Path::new(DEFAULT_CONFIG_FILE))?,
        };

        let version = self
            .logic_version
            .clone()
            .or_else(|| file.version.clone())
            .unwrap_or_else(|| VALIDATOR_VERSION.to_string());

        let mut config = file.into_dist_config();
        if let Some(dir) = &self.cache_dir {
            config.cache_dir = expand_home(dir);
        }
        if let Some(dir) = &self.dist_dir {
            config.dist_dir = expand_home(dir);
        }
        if let Some(prefix) = &self.prefix {
            config.prefix = prefix.clone();
        }
        if let Some(names) = &self.reserved {
            config.reserved_names = names.iter().filter(|n| !n.is_empty()).cloned().collect();
        }

        Ok((config, version))
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet || matches!(self.format, OutputFormat::Quiet)
    }
}
