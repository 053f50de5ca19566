use std::path::PathBuf;

use crate::entry::EntryKind;
use crate::traits::Source;

/// What a target turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Directory,
    File,
    Missing,
}

/// One path the caller asked to list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingTarget {
    /// The path exactly as given.
    pub path: PathBuf,

    /// Classification with symlinks followed.
    pub kind: TargetKind,

    /// The path's own type, symlinks not followed. `Other` when missing.
    pub entry_kind: EntryKind,
}

/// Classify `paths` in order. No paths means the current directory.
pub fn resolve(paths: &[PathBuf], source: &dyn Source) -> Vec<ListingTarget> {
    if paths.is_empty() {
        return resolve(&[PathBuf::from(".")], source);
    }

    paths
        .iter()
        .map(|path| match source.probe(path) {
            Some(probe) => ListingTarget {
                path:       path.clone(),
                kind:       if probe.is_dir { TargetKind::Directory } else { TargetKind::File },
                entry_kind: probe.kind,
            },
            None => ListingTarget {
                path:       path.clone(),
                kind:       TargetKind::Missing,
                entry_kind: EntryKind::Other,
            },
        })
        .collect()
}
