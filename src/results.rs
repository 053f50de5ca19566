use std::time::Duration;

use crate::error::LsError;

/// The outcome of a completed listing.
///
/// Every recoverable error has already been written to the sink as a
/// diagnostic by the time this is returned; `errors` keeps them for callers
/// that want to act on them.
pub struct Results {
    /// Targets that existed and were listed (or attempted).
    pub targets: usize,

    /// Lines emitted for entries and file targets. Headers, blank
    /// separators and diagnostics are not counted.
    pub entries: usize,

    /// Localized failures, in the order they were reported.
    pub errors: Vec<LsError>,

    /// Traversal counters.
    pub stats: ListingStats,
}

impl Results {
    /// A run succeeds as long as at least one target resolved. Individual
    /// directory or entry failures do not change that.
    pub fn is_success(&self) -> bool {
        self.targets > 0
    }
}

/// Counters for a completed listing.
#[derive(Debug, Default, Clone, Copy)]
pub struct ListingStats {
    /// Non-directory entries enumerated (regular files, symlinks, others).
    pub files: usize,

    /// Directory entries enumerated.
    pub dirs: usize,

    /// Wall-clock time from resolution to the last line.
    pub duration: Duration,
}
