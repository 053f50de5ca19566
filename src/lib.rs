//! # lsx
//!
//! Directory listing with long, tree, and icon views, an `ls` you can embed.
//!
//! lsx owns the listing pipeline: resolving targets, enumerating directories
//! (flat or as a depth-first tree), formatting each entry, and reporting
//! per-entry failures without stopping. Where entries and metadata come
//! from is pluggable through [`Source`] and [`MetadataProvider`]; where the
//! output goes is a [`Sink`].
//!
//! # Quick Start
//!
//! ```rust
//! use std::path::Path;
//! use lsx::{DirectoryEntry, EntryKind, LsError, PathProbe, Source, Transcript};
//!
//! // A minimal in-memory source for demonstration
//! struct NameSource(Vec<&'static str>);
//!
//! impl Source for NameSource {
//!     fn read_dir(&self, dir: &Path, depth: usize) -> Result<Vec<DirectoryEntry>, LsError> {
//!         Ok(self.0.iter()
//!             .map(|name| DirectoryEntry::new(dir.join(name), *name, EntryKind::File, depth))
//!             .collect())
//!     }
//!
//!     fn probe(&self, _path: &Path) -> Option<PathProbe> {
//!         Some(PathProbe { is_dir: true, kind: EntryKind::Dir })
//!     }
//! }
//!
//! let mut out = Transcript::default();
//! let results = lsx::listing()
//!     .source(NameSource(vec!["b.txt", ".hidden", "a.txt"]))
//!     .run(&mut out)
//!     .unwrap();
//!
//! assert_eq!(out.stdout(), ["a.txt", "b.txt"]);
//! assert_eq!(results.entries, 2);
//! ```
//!
//! # Display modes
//!
//! - short: names only
//! - [`long`](ListingBuilder::long): `drwxr-xr-x  2 owner group   4096 Jan 01 00:00 name`
//! - [`tree`](ListingBuilder::tree): `├── name`, nested levels indented four columns
//! - tree + long: the long row behind the branch glyph
//!
//! [`human_readable`](ListingBuilder::human_readable) and
//! [`icons`](ListingBuilder::icons) refine any of them.

#![forbid(unsafe_code)]

mod builder;
mod category;
mod engine;
mod entry;
mod error;
mod format;
mod fs;
mod output;
mod resolver;
mod results;
mod traits;
mod walk;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::ListingBuilder;
pub use category::FileCategory;
pub use entry::{DirectoryEntry, EntryKind, EntryMetadata, RawStat};
pub use error::{LsError, describe_io};
pub use format::{DisplayMode, Formatter, human_size, mode_string, tree_prefix};
pub use fs::{LocalFs, MTIME_FORMAT};
pub use output::{Line, Sink, StdSink, Transcript};
pub use resolver::{ListingTarget, TargetKind, resolve};
pub use results::{ListingStats, Results};
pub use traits::{MetadataProvider, PathProbe, Source};
pub use walk::{DirWalk, enumerate};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Create a new [`ListingBuilder`] to configure and run a listing.
pub fn listing() -> ListingBuilder {
    ListingBuilder::default()
}
