use std::time::Instant;

use tracing::{debug, trace};

use crate::entry::{DirectoryEntry, EntryKind};
use crate::error::LsError;
use crate::format::{DisplayMode, Formatter};
use crate::output::Sink;
use crate::resolver::{ListingTarget, TargetKind};
use crate::results::{ListingStats, Results};
use crate::traits::{MetadataProvider, Source};
use crate::walk::enumerate;

// ---------------------------------------------------------------------------
// ListingOptions
// ---------------------------------------------------------------------------

/// Display switches passed from the builder to the engine.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct ListingOptions {
    pub long:           bool,
    pub show_all:       bool,
    pub tree:           bool,
    pub human_readable: bool,
    pub icons:          bool,
}

impl ListingOptions {
    pub fn mode(&self) -> DisplayMode {
        DisplayMode::from_flags(self.long, self.tree)
    }
}

// ---------------------------------------------------------------------------
// Engine options
// ---------------------------------------------------------------------------

/// Internal options passed from the builder to `run()`.
pub(crate) struct EngineOptions<'a> {
    pub config:   ListingOptions,
    pub source:   &'a dyn Source,
    pub metadata: &'a dyn MetadataProvider,
}

// ---------------------------------------------------------------------------
// run()
// ---------------------------------------------------------------------------

/// List every target in order, writing to `sink`.
///
/// Failures stay local: a missing target, an unreadable directory or an
/// entry whose metadata cannot be read produces one diagnostic in place and
/// the run moves on. Only a failing sink aborts.
pub(crate) fn run(
    targets: &[ListingTarget],
    opts:    &EngineOptions<'_>,
    sink:    &mut dyn Sink,
) -> Result<Results, LsError> {
    let start = Instant::now();
    let mut state = Run {
        formatter: Formatter::new(opts.metadata, opts.config.human_readable, opts.config.icons),
        mode:      opts.config.mode(),
        sink,
        results:   Results {
            targets: 0,
            entries: 0,
            errors:  Vec::new(),
            stats:   ListingStats::default(),
        },
    };

    let multiple = targets.len() > 1;

    for target in targets {
        debug!(path = %target.path.display(), kind = ?target.kind, "listing target");

        if multiple {
            state.line(&format!("{}:", target.path.display()))?;
        }

        match target.kind {
            TargetKind::Missing => {
                state.report(LsError::TargetNotFound {
                    path: target.path.clone(),
                })?;
            }
            TargetKind::File => {
                state.results.targets += 1;
                let entry = file_entry(target);
                state.entry(&entry, state.mode.flat())?;
            }
            TargetKind::Directory => {
                state.results.targets += 1;
                state.directory(target, opts)?;
            }
        }

        if multiple {
            state.line("")?;
        }
    }

    let mut results = state.results;
    results.stats.duration = start.elapsed();
    Ok(results)
}

/// Mutable state for one run.
struct Run<'a, 's> {
    formatter: Formatter<'a>,
    mode:      DisplayMode,
    sink:      &'s mut dyn Sink,
    results:   Results,
}

impl Run<'_, '_> {
    fn directory(&mut self, target: &ListingTarget, opts: &EngineOptions<'_>) -> Result<(), LsError> {
        let walk = match enumerate(opts.source, &target.path, opts.config.show_all, opts.config.tree) {
            Ok(walk) => walk,
            Err(err) => return self.report(err),
        };

        for item in walk {
            match item {
                Ok(entry) => {
                    match entry.kind {
                        EntryKind::Dir => self.results.stats.dirs += 1,
                        _              => self.results.stats.files += 1,
                    }
                    self.entry(&entry, self.mode)?;
                }
                Err(err) => self.report(err)?,
            }
        }

        Ok(())
    }

    fn entry(&mut self, entry: &DirectoryEntry, mode: DisplayMode) -> Result<(), LsError> {
        match self.formatter.format(entry, mode) {
            Ok(line) => {
                trace!(path = %entry.path.display(), "formatted");
                self.results.entries += 1;
                self.line(&line)
            }
            Err(err) => self.report(err),
        }
    }

    fn line(&mut self, text: &str) -> Result<(), LsError> {
        self.sink.line(text).map_err(LsError::Output)
    }

    /// Write the diagnostic for a recoverable error and keep it.
    fn report(&mut self, err: LsError) -> Result<(), LsError> {
        debug!(error = %err, "recovered");
        self.sink.diagnostic(&err.diagnostic()).map_err(LsError::Output)?;
        self.results.errors.push(err);
        Ok(())
    }
}

/// A non-directory target shown as a single entry under its own name.
fn file_entry(target: &ListingTarget) -> DirectoryEntry {
    let name = target
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| target.path.display().to_string());

    let mut entry = DirectoryEntry::new(target.path.clone(), name, target.entry_kind, 0);
    entry.is_last = true;
    entry
}
