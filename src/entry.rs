use std::path::PathBuf;
use std::time::SystemTime;

/// One direct child of a listed directory, as produced by the enumerator.
///
/// Entries carry only what enumeration learns for free: the name, the
/// link-level file type, and the position in the traversal. Metadata is
/// fetched later by the formatter, and only when the display mode needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Full path to the entry, built from the listed directory's path.
    pub path: PathBuf,

    /// The entry's file name.
    pub name: String,

    /// The entry's type, without following symlinks.
    pub kind: EntryKind,

    /// Nesting level in tree mode. Direct children of a target = 0.
    pub depth: usize,

    /// Whether this is the final sibling in its directory.
    /// Tree rendering picks the corner glyph from this.
    pub is_last: bool,
}

impl DirectoryEntry {
    /// Build an entry at `depth`. `is_last` is filled in by the enumerator
    /// once all siblings are known.
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>, kind: EntryKind, depth: usize) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            kind,
            depth,
            is_last: false,
        }
    }

    /// Names starting with `.` are hidden unless `show_all` is set.
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

/// The kind of a listed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A regular file.
    File,

    /// A directory.
    Dir,

    /// A symbolic link.
    Symlink,

    /// Anything else (device files, pipes, sockets, etc.).
    Other,
}

/// The raw result of an `lstat` probe, before owner/group names are looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawStat {
    pub mode:     u32,
    pub nlink:    u64,
    pub uid:      u32,
    pub gid:      u32,
    pub size:     u64,
    pub modified: SystemTime,
}

/// Metadata shown in long mode, with ids already resolved to names.
///
/// `owner` and `group` hold the numeric id as a string when the id has no
/// name mapping. `size` is always the exact byte count; scaling to
/// human-readable units happens only at display time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryMetadata {
    pub mode:     u32,
    pub nlink:    u64,
    pub owner:    String,
    pub group:    String,
    pub size:     u64,
    pub modified: SystemTime,
}
