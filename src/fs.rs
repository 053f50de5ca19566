use std::fs::{self, FileType};
use std::io;
use std::os::unix::fs::MetadataExt;
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Local};
use ignore::WalkBuilder;
use nix::unistd::{Gid, Group, Uid, User};
use tracing::debug;

use crate::entry::{DirectoryEntry, EntryKind, RawStat};
use crate::error::LsError;
use crate::traits::{MetadataProvider, PathProbe, Source};

/// `strftime` pattern for the long-mode timestamp column.
pub const MTIME_FORMAT: &str = "%b %d %H:%M";

// ---------------------------------------------------------------------------
// LocalFs
// ---------------------------------------------------------------------------

/// The real filesystem: directory reads, `lstat`, passwd/group lookups and
/// local-time formatting.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl Source for LocalFs {
    fn read_dir(&self, dir: &Path, depth: usize) -> Result<Vec<DirectoryEntry>, LsError> {
        // One level, no filters: hidden-name and sort policy belong to the
        // enumerator, not to the walker.
        let mut builder = WalkBuilder::new(dir);
        builder
            .standard_filters(false)
            .ignore(false)
            .parents(false)
            .hidden(false)
            .follow_links(false)
            .same_file_system(false)
            .max_depth(Some(1));

        let mut children = Vec::new();
        for res in builder.build() {
            let entry = res.map_err(|e| map_ignore_error(dir, e))?;

            // Skip the directory itself
            if entry.depth() == 0 {
                continue;
            }

            let kind = entry.file_type().map(kind_of).unwrap_or(EntryKind::Other);
            // Lossy only for display; the path keeps the raw bytes
            let name = entry.file_name().to_string_lossy().into_owned();

            children.push(DirectoryEntry::new(entry.into_path(), name, kind, depth));
        }

        Ok(children)
    }

    fn probe(&self, path: &Path) -> Option<PathProbe> {
        let link_meta = fs::symlink_metadata(path).ok()?;
        // A dangling symlink exists but is not a directory
        let is_dir = fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false);

        Some(PathProbe {
            is_dir,
            kind: kind_of(link_meta.file_type()),
        })
    }
}

impl MetadataProvider for LocalFs {
    fn lstat(&self, path: &Path) -> io::Result<RawStat> {
        let meta = fs::symlink_metadata(path)?;
        Ok(RawStat {
            mode:     meta.mode(),
            nlink:    meta.nlink(),
            uid:      meta.uid(),
            gid:      meta.gid(),
            size:     meta.size(),
            modified: meta.modified()?,
        })
    }

    fn owner_name(&self, uid: u32) -> Option<String> {
        match User::from_uid(Uid::from_raw(uid)) {
            Ok(user) => user.map(|u| u.name),
            Err(errno) => {
                debug!(uid, %errno, "user lookup failed");
                None
            }
        }
    }

    fn group_name(&self, gid: u32) -> Option<String> {
        match Group::from_gid(Gid::from_raw(gid)) {
            Ok(group) => group.map(|g| g.name),
            Err(errno) => {
                debug!(gid, %errno, "group lookup failed");
                None
            }
        }
    }

    fn format_mtime(&self, modified: SystemTime) -> String {
        DateTime::<Local>::from(modified).format(MTIME_FORMAT).to_string()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn kind_of(ft: FileType) -> EntryKind {
    if ft.is_symlink() {
        EntryKind::Symlink
    } else if ft.is_dir() {
        EntryKind::Dir
    } else if ft.is_file() {
        EntryKind::File
    } else {
        EntryKind::Other
    }
}

/// Any walk failure while reading `dir` is reported against `dir`.
fn map_ignore_error(dir: &Path, e: ignore::Error) -> LsError {
    match e.io_error() {
        Some(io_err) => LsError::directory_access(dir, io_err),
        None => LsError::DirectoryAccess {
            path:    dir.to_path_buf(),
            message: e.to_string(),
        },
    }
}
