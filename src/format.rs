use std::path::Path;

use crate::category::FileCategory;
use crate::entry::{DirectoryEntry, EntryKind, EntryMetadata};
use crate::error::LsError;
use crate::traits::MetadataProvider;

/// Size suffixes above plain bytes, in 1024 steps.
const UNITS: [&str; 5] = ["KB", "MB", "GB", "TB", "PB"];

/// Indentation added per tree level.
pub const TREE_INDENT: &str = "    ";
pub const TREE_TEE: &str = "├── ";
pub const TREE_CORNER: &str = "└── ";

// ---------------------------------------------------------------------------
// DisplayMode
// ---------------------------------------------------------------------------

/// How each entry is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Name only.
    Short,

    /// Permission string, links, owner, group, size, mtime, name.
    Long,

    /// Name behind an indented branch glyph.
    Tree,

    /// Long row behind an indented branch glyph.
    TreeLong,
}

impl DisplayMode {
    pub fn from_flags(long: bool, tree: bool) -> Self {
        match (long, tree) {
            (false, false) => Self::Short,
            (true, false)  => Self::Long,
            (false, true)  => Self::Tree,
            (true, true)   => Self::TreeLong,
        }
    }

    pub fn is_long(self) -> bool {
        matches!(self, Self::Long | Self::TreeLong)
    }

    pub fn is_tree(self) -> bool {
        matches!(self, Self::Tree | Self::TreeLong)
    }

    /// The same mode without tree decoration. Used for file targets, which
    /// have no siblings to draw branches between.
    pub fn flat(self) -> Self {
        Self::from_flags(self.is_long(), false)
    }
}

// ---------------------------------------------------------------------------
// Formatter
// ---------------------------------------------------------------------------

/// Turns entries into output lines.
///
/// Metadata is fetched per entry, and only for long modes (or for the
/// execute bit when icons are on). A failed fetch becomes an
/// [`LsError::EntryMetadata`] for that entry alone.
pub struct Formatter<'a> {
    provider:       &'a dyn MetadataProvider,
    human_readable: bool,
    icons:          bool,
}

impl<'a> Formatter<'a> {
    pub fn new(provider: &'a dyn MetadataProvider, human_readable: bool, icons: bool) -> Self {
        Self {
            provider,
            human_readable,
            icons,
        }
    }

    /// Render one entry in `mode`.
    ///
    /// # Errors
    ///
    /// [`LsError::EntryMetadata`] when a long mode needs `lstat` and it
    /// fails. No name-only fallback line is produced in that case.
    pub fn format(&self, entry: &DirectoryEntry, mode: DisplayMode) -> Result<String, LsError> {
        let body = if mode.is_long() {
            let meta = self.metadata(&entry.path)?;
            let name = self.display_name(entry, Some(meta.mode));
            self.long_row(&meta, &name)
        } else {
            self.display_name(entry, self.probe_mode(entry))
        };

        if mode.is_tree() {
            Ok(format!("{}{body}", tree_prefix(entry.depth, entry.is_last)))
        } else {
            Ok(body)
        }
    }

    /// `lstat` the path and resolve owner and group names, falling back to
    /// the numeric ids when no name is mapped.
    pub fn metadata(&self, path: &Path) -> Result<EntryMetadata, LsError> {
        let raw = self
            .provider
            .lstat(path)
            .map_err(|e| LsError::entry_metadata(path, &e))?;

        let owner = self
            .provider
            .owner_name(raw.uid)
            .unwrap_or_else(|| raw.uid.to_string());
        let group = self
            .provider
            .group_name(raw.gid)
            .unwrap_or_else(|| raw.gid.to_string());

        Ok(EntryMetadata {
            mode:     raw.mode,
            nlink:    raw.nlink,
            owner,
            group,
            size:     raw.size,
            modified: raw.modified,
        })
    }

    fn long_row(&self, meta: &EntryMetadata, name: &str) -> String {
        let size = if self.human_readable {
            human_size(meta.size)
        } else {
            format!("{:>6}", meta.size)
        };

        format!(
            "{} {:>2} {} {} {} {} {}",
            mode_string(meta.mode),
            meta.nlink,
            meta.owner,
            meta.group,
            size,
            self.provider.format_mtime(meta.modified),
            name,
        )
    }

    fn display_name(&self, entry: &DirectoryEntry, mode: Option<u32>) -> String {
        if !self.icons {
            return entry.name.clone();
        }
        let icon = FileCategory::classify(&entry.name, entry.kind, mode).icon();
        format!("{icon} {}", entry.name)
    }

    /// Permission bits for icon selection in short modes. Only plain
    /// files can land in the executable category, so nothing else is probed.
    fn probe_mode(&self, entry: &DirectoryEntry) -> Option<u32> {
        if !self.icons || entry.kind != EntryKind::File || entry.is_hidden() {
            return None;
        }
        self.provider.lstat(&entry.path).ok().map(|raw| raw.mode)
    }
}

// ---------------------------------------------------------------------------
// Pure helpers
// ---------------------------------------------------------------------------

/// Scale a byte count for display.
///
/// Below 1024 the count is printed as-is with a `B` suffix (`"  0B"`,
/// `"1023B"`). From 1024 up the largest unit with a value of at least one
/// is used, one decimal place, eight columns wide (`"   1.5KB"`).
///
/// PB is the largest unit, so values of 10000 PB and more (only reachable
/// near `u64::MAX`) widen the field instead of being truncated.
pub fn human_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes:>3}B");
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{value:>6.1}{}", UNITS[unit])
}

/// Ten-character `ls` permission string, e.g. `drwxr-xr-x`.
///
/// Setuid, setgid and sticky bits show as `s`/`S` and `t`/`T` in the
/// execute slots. An unrecognized file type renders as `-`.
pub fn mode_string(mode: u32) -> String {
    let kind = match mode & 0o170000 {
        0o040000 => 'd',
        0o120000 => 'l',
        0o020000 => 'c',
        0o060000 => 'b',
        0o010000 => 'p',
        0o140000 => 's',
        _        => '-',
    };

    let mut s = String::with_capacity(10);
    s.push(kind);

    s.push(flag(mode, 0o400, 'r'));
    s.push(flag(mode, 0o200, 'w'));
    s.push(exec(mode, 0o100, 0o4000, 's'));

    s.push(flag(mode, 0o040, 'r'));
    s.push(flag(mode, 0o020, 'w'));
    s.push(exec(mode, 0o010, 0o2000, 's'));

    s.push(flag(mode, 0o004, 'r'));
    s.push(flag(mode, 0o002, 'w'));
    s.push(exec(mode, 0o001, 0o1000, 't'));

    s
}

fn flag(mode: u32, bit: u32, c: char) -> char {
    if mode & bit != 0 { c } else { '-' }
}

/// Execute slot, overlaid with a special bit. Uppercase = special bit set
/// without execute.
fn exec(mode: u32, exec_bit: u32, special_bit: u32, special: char) -> char {
    match (mode & special_bit != 0, mode & exec_bit != 0) {
        (true, true)   => special,
        (true, false)  => special.to_ascii_uppercase(),
        (false, true)  => 'x',
        (false, false) => '-',
    }
}

/// Indentation plus branch glyph for an entry at `depth`.
pub fn tree_prefix(depth: usize, is_last: bool) -> String {
    let glyph = if is_last { TREE_CORNER } else { TREE_TEE };
    format!("{}{glyph}", TREE_INDENT.repeat(depth))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_size_boundaries() {
        assert_eq!(human_size(0), "  0B");
        assert_eq!(human_size(1023), "1023B");
        assert_eq!(human_size(1024), "   1.0KB");
        assert_eq!(human_size(1536), "   1.5KB");
        assert_eq!(human_size(1024u64.pow(2)), "   1.0MB");
        assert_eq!(human_size(1024u64.pow(4)), "   1.0TB");
    }

    #[test]
    fn human_size_tops_out_at_petabytes() {
        assert_eq!(human_size(1024u64.pow(5)), "   1.0PB");
        assert_eq!(human_size(2048 * 1024u64.pow(5)), "2048.0PB");
        assert_eq!(human_size(9999 * 1024u64.pow(5)), "9999.0PB");
    }

    #[test]
    fn human_size_widens_past_four_digit_petabytes() {
        assert_eq!(human_size(u64::MAX), "16384.0PB");
    }

    #[test]
    fn scaled_sizes_are_eight_columns() {
        for bytes in [1024, 10 * 1024, 999 * 1024, 5 * 1024u64.pow(3), 123 * 1024u64.pow(4)] {
            assert_eq!(human_size(bytes).chars().count(), 8, "bytes = {bytes}");
        }
    }

    #[test]
    fn mode_string_types_and_permissions() {
        assert_eq!(mode_string(0o040755), "drwxr-xr-x");
        assert_eq!(mode_string(0o100644), "-rw-r--r--");
        assert_eq!(mode_string(0o120777), "lrwxrwxrwx");
        assert_eq!(mode_string(0o010600), "prw-------");
        assert_eq!(mode_string(0), "----------");
    }

    #[test]
    fn mode_string_special_bits() {
        assert_eq!(mode_string(0o104755), "-rwsr-xr-x");
        assert_eq!(mode_string(0o104644), "-rwSr--r--");
        assert_eq!(mode_string(0o102755), "-rwxr-sr-x");
        assert_eq!(mode_string(0o041777), "drwxrwxrwt");
        assert_eq!(mode_string(0o041776), "drwxrwxrwT");
    }

    #[test]
    fn tree_prefix_indents_per_level() {
        assert_eq!(tree_prefix(0, false), "├── ");
        assert_eq!(tree_prefix(0, true), "└── ");
        assert_eq!(tree_prefix(2, true), "        └── ");
    }

    #[test]
    fn display_mode_flags() {
        assert_eq!(DisplayMode::from_flags(true, true), DisplayMode::TreeLong);
        assert_eq!(DisplayMode::TreeLong.flat(), DisplayMode::Long);
        assert_eq!(DisplayMode::Tree.flat(), DisplayMode::Short);
        assert!(!DisplayMode::Short.is_long());
    }
}
