use std::io::{self, Stderr, Stdout, Write};

/// Where a listing is written.
///
/// Normal lines and diagnostics travel separately (stdout and stderr for the
/// CLI) but are handed over in traversal order, so an error line for an
/// entry is always emitted between its neighbours' lines.
pub trait Sink {
    /// One listing line: a header, an entry, or a blank separator.
    fn line(&mut self, text: &str) -> io::Result<()>;

    /// One `ls: ...` diagnostic.
    fn diagnostic(&mut self, text: &str) -> io::Result<()>;
}

// ---------------------------------------------------------------------------
// StdSink
// ---------------------------------------------------------------------------

/// Writes lines to one writer and diagnostics to another.
pub struct StdSink<O, E> {
    out: O,
    err: E,
}

impl<O: Write, E: Write> StdSink<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }
}

impl StdSink<Stdout, Stderr> {
    /// The process's standard output and error.
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> Sink for StdSink<O, E> {
    fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")
    }

    fn diagnostic(&mut self, text: &str) -> io::Result<()> {
        // Keep stdout ahead of the diagnostic when both reach one terminal
        self.out.flush()?;
        writeln!(self.err, "{text}")
    }
}

// ---------------------------------------------------------------------------
// Transcript
// ---------------------------------------------------------------------------

/// One recorded line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Out(String),
    Err(String),
}

/// Records both streams in a single ordered list.
#[derive(Debug, Default)]
pub struct Transcript {
    pub lines: Vec<Line>,
}

impl Transcript {
    /// Listing lines only, in order.
    pub fn stdout(&self) -> Vec<&str> {
        self.lines
            .iter()
            .filter_map(|l| match l {
                Line::Out(s) => Some(s.as_str()),
                Line::Err(_) => None,
            })
            .collect()
    }

    /// Diagnostics only, in order.
    pub fn stderr(&self) -> Vec<&str> {
        self.lines
            .iter()
            .filter_map(|l| match l {
                Line::Err(s) => Some(s.as_str()),
                Line::Out(_) => None,
            })
            .collect()
    }
}

impl Sink for Transcript {
    fn line(&mut self, text: &str) -> io::Result<()> {
        self.lines.push(Line::Out(text.to_owned()));
        Ok(())
    }

    fn diagnostic(&mut self, text: &str) -> io::Result<()> {
        self.lines.push(Line::Err(text.to_owned()));
        Ok(())
    }
}
