use colored::*;
use serde::Serialize;
use std::path::Path;

use crate::common::format::{format_count, format_path, format_size, format_size_colored};
use crate::guard::{Inspection, ManifestRead, Notice, Outcome};

#[derive(Serialize)]
struct CheckJson<'a> {
    #[serde(flatten)]
    outcome: &'a Outcome,
    manifest_path: Option<String>,
    notices: Vec<String>,
}

#[derive(Serialize)]
struct StatusJson {
    dist_dir: String,
    manifest_path: String,
    manifest: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    manifest_error: Option<String>,
    stale: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

/// Print the result of `check` in human-readable format
pub fn print_check_result(outcome: &Outcome, manifest_path: Option<&Path>) {
    println!();
    match outcome {
        Outcome::Skipped => {
            println!(
                "  {} Nothing checked: both --cache-dir and --dist-dir are required.",
                "⚠".yellow()
            );
        }
        Outcome::Fresh => {
            println!(
                "  {} Dist folder matches the recorded configuration.",
                "✓".green()
            );
        }
        Outcome::Stale { reason, report } => {
            println!(
                "  {} Dist folder was stale ({}).",
                "✗".red(),
                reason.to_string().yellow()
            );
            if report.is_empty() {
                println!("    {} Nothing to remove.", "→".dimmed());
            } else {
                println!(
                    "    {} Removed {} and {}, freed {}",
                    "→".dimmed(),
                    format_count(report.files_removed, "file", "files").cyan(),
                    format_count(report.dirs_removed, "directory", "directories").cyan(),
                    format_size_colored(report.bytes_freed),
                );
            }
            if report.cache_preserved {
                println!(
                    "    {} Kept the '{}' directory (emptied)",
                    "→".dimmed(),
                    crate::guard::RESERVED_CACHE_DIR
                );
            }
        }
    }

    if let Some(path) = manifest_path {
        println!("  📄 Manifest: {}", format_path(path).dimmed());
    }
    println!();
}

/// Print the result of `check` as JSON
pub fn print_check_json(outcome: &Outcome, manifest_path: Option<&Path>, notices: &[Notice]) {
    let doc = CheckJson {
        outcome,
        manifest_path: manifest_path.map(|p| p.display().to_string()),
        notices: notices.iter().map(|n| n.to_string()).collect(),
    };
    match serde_json::to_string_pretty(&doc) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing results: {}", e),
    }
}

/// Print a minimal one-line summary of `check`
pub fn print_check_quiet(outcome: &Outcome) {
    match outcome {
        Outcome::Skipped => println!("skipped"),
        Outcome::Fresh => println!("fresh"),
        Outcome::Stale { report, .. } => println!(
            "stale  {}  {}",
            report.files_removed,
            format_size(report.bytes_freed)
        ),
    }
}

/// Print `status` in human-readable format
pub fn print_status(inspection: &Inspection, dist_dir: &Path, manifest_path: &Path) {
    println!();
    println!("  Dist folder:  {}", format_path(dist_dir).cyan());
    match &inspection.manifest {
        ManifestRead::Absent => {
            println!("  Manifest:     {}", "none recorded yet".dimmed());
        }
        ManifestRead::Corrupt(details) => {
            println!(
                "  Manifest:     {} {}",
                "unreadable".red(),
                format!("({})", details).dimmed()
            );
        }
        ManifestRead::Present(stored) => {
            println!("  Manifest:     {}", format_path(manifest_path));
            if let Some(version) = &stored.version {
                println!("  Recorded by:  v{}", version);
            }
        }
    }

    match inspection.staleness.reason() {
        None => println!("  {} Up to date, next check will keep the dist folder.", "✓".green()),
        Some(reason) => println!(
            "  {} Stale ({}), next check will purge the dist folder.",
            "✗".red(),
            reason.to_string().yellow()
        ),
    }
    println!();
}

/// Print `status` as JSON
pub fn print_status_json(inspection: &Inspection, dist_dir: &Path, manifest_path: &Path) {
    let (manifest, manifest_error) = match &inspection.manifest {
        ManifestRead::Absent => ("absent", None),
        ManifestRead::Corrupt(details) => ("corrupt", Some(details.clone())),
        ManifestRead::Present(_) => ("present", None),
    };
    let doc = StatusJson {
        dist_dir: dist_dir.display().to_string(),
        manifest_path: manifest_path.display().to_string(),
        manifest,
        manifest_error,
        stale: inspection.staleness.is_stale(),
        reason: inspection.staleness.reason().map(|r| r.to_string()),
    };
    match serde_json::to_string_pretty(&doc) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing status: {}", e),
    }
}
