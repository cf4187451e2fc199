// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! StarTeam history log parsing
//!
//! The log produced by `stcmd hist` is a sequence of file blocks:
//!
//! ```text
//! History for: foo.txt
//! ----------------------------
//! Branch Revision: 1.2
//! Author: alice Date: 2006-01-01 10:00:00
//! fix bug
//! =============================================================================
//! ```
//!
//! Each block holds one or more revisions separated by a dashed rule and ends
//! with a rule of `=` characters. The scanner is a four-state machine fed one
//! line at a time. Completed revision blocks are offered to an [`EntryStore`],
//! which merges revisions sharing author, minute and comment into one
//! [`ChangeEntry`].

use std::io::BufRead;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::entry::{ChangeEntry, EntryBuilder};
use crate::error::LogError;
use crate::store::{Admission, EntryStore, Rejection};
use crate::window::{DateFormat, DateWindow};

/// Marks the start of a file block
pub const START_FILE: &str = "History for: ";
/// Marks the end of a file block
pub const END_FILE: &str =
    "=============================================================================";
/// Marks the start of a revision block
pub const START_REVISION: &str = "----------------------------";
/// Precedes the revision id
pub const REVISION_TAG: &str = "Branch Revision: ";
/// Starts the author line
pub const AUTHOR_TAG: &str = "Author: ";
/// Separates the author from the date on the author line
pub const DATE_TAG: &str = " Date: ";

/// What the scanner expects to see next
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum State {
    /// A `History for: ` header
    #[default]
    GetFile,
    /// A `Branch Revision: ` line, or the end of the file block
    GetRevision,
    /// An `Author: ... Date: ...` line
    GetAuthor,
    /// Comment text, a revision separator, or the end of the file block
    GetComment,
}

/// Parser configuration
#[derive(Debug, Clone, Default)]
pub struct ParserOptions {
    /// Acceptance window for entry dates
    pub window: Option<DateWindow>,
    /// How dates on author lines are parsed
    pub date_format: DateFormat,
    /// Accept entries regardless of the window
    pub ignore_range: bool,
}

impl ParserOptions {
    /// Create options with no window and the standard date formats
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Only accept entries from the last `days` days, counted from now
    ///
    /// # Errors
    ///
    /// Returns `LogError::InvalidRange` if `days` is not a whole number.
    pub fn range(self, days: &str) -> Result<Self, LogError> {
        self.range_at(days, Utc::now())
    }

    /// Only accept entries from the last `days` days, counted from `now`
    ///
    /// # Errors
    ///
    /// Returns `LogError::InvalidRange` if `days` is not a whole number.
    pub fn range_at(mut self, days: &str, now: DateTime<Utc>) -> Result<Self, LogError> {
        self.window = DateWindow::from_range(days, now)?;
        Ok(self)
    }

    /// Parse dates with a custom `strftime` pattern
    ///
    /// # Errors
    ///
    /// Returns `LogError::InvalidDateFormat` if the pattern is invalid.
    pub fn date_format(mut self, pattern: &str) -> Result<Self, LogError> {
        self.date_format = DateFormat::custom(pattern)?;
        Ok(self)
    }

    /// Accept entries of any date even when a range is set
    #[must_use]
    pub fn ignore_range(mut self, ignore: bool) -> Self {
        self.ignore_range = ignore;
        self
    }

    fn effective_window(&self) -> Option<DateWindow> {
        if self.ignore_range { None } else { self.window }
    }
}

/// Counters collected during a parse
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseSummary {
    /// Lines read from the input
    pub lines: usize,
    /// Revision blocks offered to the store
    pub blocks: usize,
    /// Change entries in the result
    pub entries: usize,
    /// Blocks folded into an existing entry
    pub merged: usize,
    /// Blocks dropped for lack of an author line
    pub missing_author: usize,
    /// Blocks dropped because the date could not be parsed
    pub missing_date: usize,
    /// Blocks dropped by the date window
    pub out_of_window: usize,
    /// Input ended inside a file block, losing the block in flight
    pub unterminated: bool,
}

impl ParseSummary {
    /// Total blocks that did not reach the result
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.missing_author + self.missing_date + self.out_of_window
    }

    fn record(&mut self, admission: Admission) {
        self.blocks += 1;
        match admission {
            Admission::Inserted => {}
            Admission::Merged => self.merged += 1,
            Admission::Rejected(Rejection::MissingAuthor) => self.missing_author += 1,
            Admission::Rejected(Rejection::MissingDate) => self.missing_date += 1,
            Admission::Rejected(Rejection::OutOfWindow) => self.out_of_window += 1,
        }
    }
}

/// Change entries together with the parse counters
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    /// Entries, newest first
    pub entries: Vec<ChangeEntry>,
    /// Counters for the run
    pub summary: ParseSummary,
}

/// A configured StarTeam history parser
///
/// The parser itself holds only configuration; every call to
/// [`LogParser::parse`] gets its own scan state and store.
#[derive(Debug, Clone, Default)]
pub struct LogParser {
    options: ParserOptions,
}

impl LogParser {
    /// Create a parser with the given options
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    /// Replace the parser options
    pub fn configure(&mut self, options: ParserOptions) {
        self.options = options;
    }

    /// Current options
    #[must_use]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parse a history log into change entries, newest first
    ///
    /// # Errors
    ///
    /// Returns `LogError::Io` if reading the stream fails. Malformed content
    /// never fails the parse; it is dropped.
    pub fn parse<R: BufRead>(&self, reader: R) -> Result<Vec<ChangeEntry>, LogError> {
        Ok(self.parse_with_summary(reader)?.entries)
    }

    /// Parse a history log held in memory
    ///
    /// Lines are split exactly as [`LogParser::parse`] splits them.
    #[must_use]
    pub fn parse_str(&self, input: &str) -> Vec<ChangeEntry> {
        let mut scan = Scan::new(&self.options);
        for chunk in input.split_inclusive('\n') {
            split_terminators(chunk).for_each(|line| scan.feed(line));
        }
        scan.finish().entries
    }

    /// Parse a history log, also returning the parse counters
    ///
    /// A line ends at `\n`, `\r\n` or a lone `\r`.
    ///
    /// # Errors
    ///
    /// Returns `LogError::Io` if reading the stream fails.
    pub fn parse_with_summary<R: BufRead>(&self, mut reader: R) -> Result<ParseOutcome, LogError> {
        let mut scan = Scan::new(&self.options);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let chunk = String::from_utf8_lossy(&buf);
            split_terminators(&chunk).for_each(|line| scan.feed(line));
        }
        Ok(scan.finish())
    }
}

/// Split a `\n`-terminated chunk into lines, treating a lone `\r` as a line end
fn split_terminators(chunk: &str) -> impl Iterator<Item = &str> {
    let chunk = chunk.strip_suffix('\n').unwrap_or(chunk);
    let chunk = chunk.strip_suffix('\r').unwrap_or(chunk);
    chunk.split('\r')
}

/// State of one parse run
struct Scan<'a> {
    date_format: &'a DateFormat,
    state: State,
    current: EntryBuilder,
    store: EntryStore,
    summary: ParseSummary,
}

impl<'a> Scan<'a> {
    fn new(options: &'a ParserOptions) -> Self {
        Self {
            date_format: &options.date_format,
            state: State::GetFile,
            current: EntryBuilder::default(),
            store: EntryStore::with_window(options.effective_window()),
            summary: ParseSummary::default(),
        }
    }

    fn feed(&mut self, line: &str) {
        self.summary.lines += 1;
        self.state = match self.state {
            State::GetFile => self.on_file(line),
            State::GetRevision => self.on_revision(line),
            State::GetAuthor => self.on_author(line),
            State::GetComment => self.on_comment(line),
        };
    }

    fn on_file(&mut self, line: &str) -> State {
        match line.strip_prefix(START_FILE) {
            Some(name) => {
                self.current = EntryBuilder::for_file(name);
                State::GetRevision
            }
            None => State::GetFile,
        }
    }

    fn on_revision(&mut self, line: &str) -> State {
        if let Some(pos) = line.find(REVISION_TAG) {
            self.current.set_revision(&line[pos + REVISION_TAG.len()..]);
            State::GetAuthor
        } else if line.starts_with(END_FILE) {
            self.flush(EntryBuilder::default());
            State::GetFile
        } else {
            State::GetRevision
        }
    }

    fn on_author(&mut self, line: &str) -> State {
        let Some(rest) = line.strip_prefix(AUTHOR_TAG) else {
            return State::GetAuthor;
        };
        match rest.find(DATE_TAG) {
            Some(pos) => {
                let date = self.parse_date(&rest[pos + DATE_TAG.len()..]);
                self.current.set_author(&rest[..pos], date);
            }
            None => {
                warn!(line = self.summary.lines, "Author line without a date");
                self.current.set_author(rest, None);
            }
        }
        State::GetComment
    }

    fn on_comment(&mut self, line: &str) -> State {
        if line.starts_with(START_REVISION) {
            let next = self.current.next_revision();
            self.flush(next);
            State::GetRevision
        } else if line.starts_with(END_FILE) {
            self.flush(EntryBuilder::default());
            State::GetFile
        } else {
            self.current.push_comment_line(line);
            State::GetComment
        }
    }

    fn parse_date(&self, text: &str) -> Option<DateTime<Utc>> {
        let date = self.date_format.parse(text);
        if date.is_none() {
            warn!(line = self.summary.lines, date = %text.trim(), "Unparseable date");
        }
        date
    }

    /// Offer the block in flight to the store and start `next`
    fn flush(&mut self, next: EntryBuilder) {
        let block = std::mem::replace(&mut self.current, next);
        let file = block.file_name().to_string();
        let admission = self.store.admit(block);
        debug!(file = %file, ?admission, "Flushed revision block");
        self.summary.record(admission);
    }

    fn finish(mut self) -> ParseOutcome {
        if self.state != State::GetFile {
            self.summary.unterminated = true;
            debug!(
                state = ?self.state,
                file = %self.current.file_name(),
                "Input ended inside a file block; discarding it"
            );
        }
        self.summary.entries = self.store.len();
        info!(
            lines = self.summary.lines,
            entries = self.summary.entries,
            merged = self.summary.merged,
            dropped = self.summary.dropped(),
            "Parsed history log"
        );
        ParseOutcome {
            entries: self.store.into_entries(),
            summary: self.summary,
        }
    }
}
