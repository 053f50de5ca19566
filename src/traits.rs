use std::io;
use std::path::Path;
use std::time::SystemTime;

use crate::entry::{DirectoryEntry, EntryKind, RawStat};
use crate::error::LsError;

/// What a probe of a top-level path found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathProbe {
    /// The path is a directory once symlinks are followed.
    pub is_dir: bool,

    /// The path's own type, symlinks not followed.
    pub kind: EntryKind,
}

/// Where directory contents come from.
///
/// [`LocalFs`](crate::LocalFs) reads the real filesystem. Tests wrap it to
/// inject failures for chosen paths, which is how a permission-denied
/// directory is exercised without relying on the running user's privileges.
///
/// # Ordering and filtering
///
/// Implementations return children in whatever order the backing store
/// yields them and must not filter hidden names. The enumerator owns both
/// policies, so every source lists identically.
///
/// # Example
///
/// ```rust
/// use std::path::Path;
/// use lsx::{DirectoryEntry, EntryKind, LsError, PathProbe, Source};
///
/// struct Fixed(Vec<&'static str>);
///
/// impl Source for Fixed {
///     fn read_dir(&self, dir: &Path, depth: usize) -> Result<Vec<DirectoryEntry>, LsError> {
///         Ok(self.0.iter()
///             .map(|name| DirectoryEntry::new(dir.join(name), *name, EntryKind::File, depth))
///             .collect())
///     }
///
///     fn probe(&self, _path: &Path) -> Option<PathProbe> {
///         Some(PathProbe { is_dir: true, kind: EntryKind::Dir })
///     }
/// }
/// ```
pub trait Source {
    /// List the direct children of `dir`, tagging each with `depth`.
    ///
    /// Return [`LsError::DirectoryAccess`] when the directory itself cannot
    /// be read.
    fn read_dir(&self, dir: &Path, depth: usize) -> Result<Vec<DirectoryEntry>, LsError>;

    /// Classify a top-level path. `None` means it does not exist.
    fn probe(&self, path: &Path) -> Option<PathProbe>;
}

/// The OS lookups long mode depends on.
///
/// Kept narrow so tests can substitute fixed owners, groups and timestamps
/// without touching global state.
pub trait MetadataProvider {
    /// Link-aware stat: a symlink reports itself, not its target.
    fn lstat(&self, path: &Path) -> io::Result<RawStat>;

    /// User name for `uid`, if one is mapped.
    fn owner_name(&self, uid: u32) -> Option<String>;

    /// Group name for `gid`, if one is mapped.
    fn group_name(&self, gid: u32) -> Option<String>;

    /// Render a modification time as `Mon DD HH:MM`.
    fn format_mtime(&self, modified: SystemTime) -> String;
}
