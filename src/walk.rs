use std::ffi::OsStr;
use std::path::Path;
use std::vec;

use tracing::debug;

use crate::entry::{DirectoryEntry, EntryKind};
use crate::error::LsError;
use crate::traits::Source;

// ---------------------------------------------------------------------------
// enumerate()
// ---------------------------------------------------------------------------

/// Start listing `dir`.
///
/// The directory's own children are read up front, so a directory that
/// cannot be opened fails here with [`LsError::DirectoryAccess`] and the
/// caller can move on to its next target.
///
/// With `recursive` set the returned walk descends into every child
/// directory (never into symlinks) depth-first, pre-order: a directory's
/// children follow its own line immediately.
pub fn enumerate<'a>(
    source:    &'a dyn Source,
    dir:       &Path,
    show_all:  bool,
    recursive: bool,
) -> Result<DirWalk<'a>, LsError> {
    let top = siblings(source, dir, 0, show_all)?;
    Ok(DirWalk {
        source,
        show_all,
        recursive,
        stack:    vec![top.into_iter()],
        deferred: None,
    })
}

/// Read, filter and sort the children of one directory.
///
/// Hidden names are dropped unless `show_all`; the survivors are ordered by
/// their raw file name bytes and the final one is flagged `is_last`.
fn siblings(
    source:   &dyn Source,
    dir:      &Path,
    depth:    usize,
    show_all: bool,
) -> Result<Vec<DirectoryEntry>, LsError> {
    let mut children = source.read_dir(dir, depth)?;
    children.retain(|e| show_all || !e.is_hidden());
    children.sort_by(|a, b| sort_key(a).cmp(sort_key(b)));

    if let Some(last) = children.last_mut() {
        last.is_last = true;
    }

    Ok(children)
}

fn sort_key(entry: &DirectoryEntry) -> &OsStr {
    entry
        .path
        .file_name()
        .unwrap_or_else(|| OsStr::new(&entry.name))
}

// ---------------------------------------------------------------------------
// DirWalk
// ---------------------------------------------------------------------------

/// Lazy iterator over a directory listing.
///
/// Each level's siblings are materialized before any of them is yielded,
/// which is what lets an entry know whether it is the last at its depth.
/// Nested directories are only read once the walk reaches them.
///
/// An unreadable nested directory yields one `Err` right after that
/// directory's own entry; the walk then carries on with its siblings.
pub struct DirWalk<'a> {
    source:    &'a dyn Source,
    show_all:  bool,
    recursive: bool,
    stack:     Vec<vec::IntoIter<DirectoryEntry>>,
    deferred:  Option<LsError>,
}

impl Iterator for DirWalk<'_> {
    type Item = Result<DirectoryEntry, LsError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(err) = self.deferred.take() {
            return Some(Err(err));
        }

        loop {
            let level = self.stack.last_mut()?;
            let Some(entry) = level.next() else {
                self.stack.pop();
                continue;
            };

            if self.recursive && entry.kind == EntryKind::Dir {
                match siblings(self.source, &entry.path, entry.depth + 1, self.show_all) {
                    Ok(children) => {
                        if !children.is_empty() {
                            self.stack.push(children.into_iter());
                        }
                    }
                    Err(err) => {
                        debug!(path = %entry.path.display(), "nested directory unreadable");
                        self.deferred = Some(err);
                    }
                }
            }

            return Some(Ok(entry));
        }
    }
}
