use std::cell::RefCell;
use std::fmt;

use super::fingerprint::StaleReason;

/// Prefix on every console notification
pub const NOTICE_PREFIX: &str = "distguard";

/// Human-facing notifications emitted while validating a dist directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// `cacheDir` or `distDir` not configured; nothing was checked
    MissingDirs,
    /// Configuration changed, purge about to start
    Cleaning(StaleReason),
    /// Purge finished
    Cleaned,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::MissingDirs => write!(
                f,
                "{}: Failed to check the dist folder because cacheDir or distDir is not specified",
                NOTICE_PREFIX
            ),
            Notice::Cleaning(reason) => write!(
                f,
                "{}: Changes found in package configuration ({}). Cleaning the dist folder...",
                NOTICE_PREFIX, reason
            ),
            Notice::Cleaned => write!(
                f,
                "{}: Changes found in package configuration. Dist folder cleared",
                NOTICE_PREFIX
            ),
        }
    }
}

/// Where notifications go
pub trait Notify {
    fn notify(&self, notice: &Notice);
}

/// Prints notifications to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notify for ConsoleNotifier {
    fn notify(&self, notice: &Notice) {
        println!("{}", notice);
    }
}

/// Drops every notification
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl Notify for SilentNotifier {
    fn notify(&self, _notice: &Notice) {}
}

/// Keeps notifications in memory, for callers that render them later
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    notices: RefCell<Vec<Notice>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }
}

impl Notify for CollectingNotifier {
    fn notify(&self, notice: &Notice) {
        self.notices.borrow_mut().push(notice.clone());
    }
}
