use serde::Serialize;
use std::path::Path;
use walkdir::WalkDir;

use crate::common::errors::{GuardError, GuardResult, IoResultExt};

/// Top-level directory whose contents are purged but whose shell is kept.
/// Other processes may hold handles to it, so it must keep existing.
pub const RESERVED_CACHE_DIR: &str = "cache";

/// Report from purging a dist directory
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct PurgeReport {
    /// Files (and symlinks) removed, including those inside removed directories
    pub files_removed: usize,
    /// Directories removed, including nested ones
    pub dirs_removed: usize,
    /// Logical size of everything removed
    pub bytes_freed: u64,
    /// Whether a `cache` directory was emptied in place
    pub cache_preserved: bool,
}

impl PurgeReport {
    fn add(&mut self, tally: Tally) {
        self.files_removed += tally.files;
        self.dirs_removed += tally.dirs;
        self.bytes_freed += tally.bytes;
    }

    pub fn is_empty(&self) -> bool {
        self.files_removed == 0 && self.dirs_removed == 0
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    files: usize,
    dirs: usize,
    bytes: u64,
}

/// Purge the top level of `dist_dir`.
///
/// - files and symlinks are unlinked
/// - a directory named `cache` is emptied but kept
/// - any other directory is removed recursively
///
/// Errors abort immediately; entries already removed stay removed.
/// A missing `dist_dir` is treated as already empty.
pub fn purge_dist(dist_dir: &Path) -> GuardResult<PurgeReport> {
    let mut report = PurgeReport::default();

    match std::fs::symlink_metadata(dist_dir) {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(dist = %dist_dir.display(), "dist dir does not exist, nothing to purge");
            return Ok(report);
        }
        Err(e) => return Err(GuardError::io(dist_dir, e)),
    }

    for entry in std::fs::read_dir(dist_dir).at_path(dist_dir)? {
        let entry = entry.at_path(dist_dir)?;
        let path = entry.path();
        // lstat: a symlink to a directory is removed as a link
        let metadata = std::fs::symlink_metadata(&path).at_path(&path)?;

        if !metadata.is_dir() {
            std::fs::remove_file(&path).at_path(&path)?;
            tracing::debug!(path = %path.display(), "removed file");
            report.add(Tally {
                files: 1,
                dirs: 0,
                bytes: metadata.len(),
            });
        } else if entry.file_name() == RESERVED_CACHE_DIR {
            report.add(empty_dir(&path)?);
            report.cache_preserved = true;
            tracing::debug!(path = %path.display(), "emptied reserved cache dir");
        } else {
            report.add(remove_tree(&path)?);
        }
    }

    Ok(report)
}

/// Remove every direct child of `dir`, leaving `dir` itself in place
fn empty_dir(dir: &Path) -> GuardResult<Tally> {
    let mut tally = Tally::default();

    for entry in std::fs::read_dir(dir).at_path(dir)? {
        let path = entry.at_path(dir)?.path();
        let metadata = std::fs::symlink_metadata(&path).at_path(&path)?;

        if metadata.is_dir() {
            let removed = remove_tree(&path)?;
            tally.files += removed.files;
            tally.dirs += removed.dirs;
            tally.bytes += removed.bytes;
        } else {
            std::fs::remove_file(&path).at_path(&path)?;
            tally.files += 1;
            tally.bytes += metadata.len();
        }
    }

    Ok(tally)
}

/// Remove a directory and everything under it
fn remove_tree(dir: &Path) -> GuardResult<Tally> {
    let tally = measure(dir);
    std::fs::remove_dir_all(dir).at_path(dir)?;
    tracing::debug!(path = %dir.display(), files = tally.files, "removed directory");
    Ok(tally)
}

/// Count what is about to be removed. Unreadable entries are skipped;
/// they will surface as errors from the removal itself.
fn measure(dir: &Path) -> Tally {
    let mut tally = Tally::default();

    for entry in WalkDir::new(dir).follow_links(false).into_iter().filter_map(|e| e.ok()) {
        if entry.file_type().is_dir() {
            tally.dirs += 1;
        } else {
            tally.files += 1;
            if let Ok(metadata) = entry.metadata() {
                tally.bytes += metadata.len();
            }
        }
    }

    tally
}
