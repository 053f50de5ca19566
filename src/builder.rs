use std::path::PathBuf;

use crate::engine::{EngineOptions, ListingOptions, run};
use crate::error::LsError;
use crate::fs::LocalFs;
use crate::output::Sink;
use crate::resolver::resolve;
use crate::results::Results;
use crate::traits::{MetadataProvider, Source};

// ---------------------------------------------------------------------------
// ListingBuilder
// ---------------------------------------------------------------------------

/// Entry point for configuring and running a listing.
///
/// Created via [`lsx::listing()`](crate::listing). Configure with chained
/// builder methods, then call [`run()`](ListingBuilder::run) with a [`Sink`].
///
/// # Example
///
/// ```rust,no_run
/// use lsx::Transcript;
///
/// let mut out = Transcript::default();
/// let results = lsx::listing()
///     .path("src")
///     .long(true)
///     .human_readable(true)
///     .run(&mut out)?;
///
/// assert!(results.is_success());
/// # Ok::<(), lsx::LsError>(())
/// ```
pub struct ListingBuilder {
    paths:    Vec<PathBuf>,
    options:  ListingOptions,
    source:   Box<dyn Source>,
    metadata: Box<dyn MetadataProvider>,
}

impl Default for ListingBuilder {
    fn default() -> Self {
        Self {
            paths:    Vec::new(),
            options:  ListingOptions::default(),
            source:   Box::new(LocalFs),
            metadata: Box::new(LocalFs),
        }
    }
}

impl ListingBuilder {
    // ── Targets ───────────────────────────────────────────────────────────

    /// Add one target. Targets are listed in the order they are added.
    /// With none at all, the current directory is listed.
    pub fn path(mut self, p: impl Into<PathBuf>) -> Self {
        self.paths.push(p.into());
        self
    }

    /// Add several targets.
    pub fn paths<I, P>(mut self, ps: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.paths.extend(ps.into_iter().map(Into::into));
        self
    }

    // ── Display ───────────────────────────────────────────────────────────

    /// Long format: permissions, link count, owner, group, size, mtime.
    pub fn long(mut self, yes: bool) -> Self {
        self.options.long = yes;
        self
    }

    /// Include entries whose names start with `.`.
    pub fn show_all(mut self, yes: bool) -> Self {
        self.options.show_all = yes;
        self
    }

    /// Recurse into subdirectories and draw them as a tree.
    /// Combines with [`long()`](ListingBuilder::long).
    pub fn tree(mut self, yes: bool) -> Self {
        self.options.tree = yes;
        self
    }

    /// Show long-mode sizes scaled to B/KB/MB/GB/TB/PB.
    pub fn human_readable(mut self, yes: bool) -> Self {
        self.options.human_readable = yes;
        self
    }

    /// Prefix names with a glyph for their file category.
    pub fn icons(mut self, yes: bool) -> Self {
        self.options.icons = yes;
        self
    }

    // ── Collaborators ─────────────────────────────────────────────────────

    /// Replace where directory contents come from. Defaults to [`LocalFs`].
    pub fn source(mut self, s: impl Source + 'static) -> Self {
        self.source = Box::new(s);
        self
    }

    /// Replace the stat and owner/group/time lookups. Defaults to [`LocalFs`].
    pub fn metadata(mut self, m: impl MetadataProvider + 'static) -> Self {
        self.metadata = Box::new(m);
        self
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Resolve the targets and list them into `sink`.
    ///
    /// # Errors
    ///
    /// Only [`LsError::Output`], when the sink refuses a write. Missing
    /// targets, unreadable directories and failed `lstat` calls are written
    /// as diagnostics and collected into [`Results::errors`].
    pub fn run(self, sink: &mut dyn Sink) -> Result<Results, LsError> {
        let targets = resolve(&self.paths, self.source.as_ref());

        let opts = EngineOptions {
            config:   self.options,
            source:   self.source.as_ref(),
            metadata: self.metadata.as_ref(),
        };

        run(&targets, &opts, sink)
    }
}
