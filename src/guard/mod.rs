pub mod engine;
pub mod fingerprint;
pub mod manifest;
pub mod notice;
pub mod purger;

pub use engine::{inspect, validate_dist, validate_dist_with, Inspection, Outcome};
pub use fingerprint::{StaleReason, Staleness};
pub use manifest::{ManifestRead, StoredManifest};
pub use notice::{CollectingNotifier, ConsoleNotifier, Notice, Notify, SilentNotifier};
pub use purger::{purge_dist, PurgeReport, RESERVED_CACHE_DIR};
