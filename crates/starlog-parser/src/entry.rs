// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Change entry types and the in-flight entry builder

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp layout used in dedup keys (minute resolution)
pub const KEY_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M";

/// One file revision touched by a change
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRevision {
    /// File name as printed after `History for: `
    pub name: String,
    /// Revision id as printed after `Branch Revision: `
    pub revision: String,
}

impl FileRevision {
    /// Create a file revision with no revision id yet
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            revision: String::new(),
        }
    }

    /// Set the revision id
    #[must_use]
    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        self.revision = revision.into();
        self
    }
}

/// A logical change: one author, timestamp and comment across one or more files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEntry {
    /// Author name
    pub author: String,
    /// Change timestamp
    pub date: DateTime<Utc>,
    /// Comment text, one `\n`-terminated line per log line
    pub comment: String,
    /// Files touched, in the order their revision blocks were read
    pub files: Vec<FileRevision>,
}

impl ChangeEntry {
    /// Dedup and ordering key: minute timestamp, author, then comment
    #[must_use]
    pub fn key(&self) -> String {
        format!(
            "{}{}{}",
            self.date.format(KEY_TIMESTAMP_FORMAT),
            self.author,
            self.comment
        )
    }

    /// Get the first line of the comment
    #[must_use]
    pub fn subject(&self) -> &str {
        self.comment.lines().next().unwrap_or("")
    }

    /// Number of file revisions in this change
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

/// Why a flushed block did not become a change entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Incomplete {
    /// No `Author: ` line was read for the block
    MissingAuthor,
    /// The author line carried no usable date
    MissingDate,
}

/// Accumulates the fields of the revision block currently being read
#[derive(Debug, Clone, Default)]
pub struct EntryBuilder {
    file: FileRevision,
    author: Option<String>,
    date: Option<DateTime<Utc>>,
    comment: String,
}

impl EntryBuilder {
    /// Start a block for the named file
    #[must_use]
    pub fn for_file(name: impl Into<String>) -> Self {
        Self {
            file: FileRevision::new(name),
            ..Default::default()
        }
    }

    /// Start the next revision block of the same file
    #[must_use]
    pub fn next_revision(&self) -> Self {
        Self::for_file(self.file.name.clone())
    }

    /// Name of the file this block belongs to
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file.name
    }

    /// Record the revision id
    pub fn set_revision(&mut self, revision: &str) {
        self.file.revision = revision.to_string();
    }

    /// Record the author and the parsed date (if any)
    pub fn set_author(&mut self, author: &str, date: Option<DateTime<Utc>>) {
        self.author = Some(author.to_string());
        self.date = date;
    }

    /// Append one comment line
    pub fn push_comment_line(&mut self, line: &str) {
        self.comment.push_str(line);
        self.comment.push('\n');
    }

    /// Finish the block, attaching its file revision to the entry
    ///
    /// # Errors
    ///
    /// Returns the reason the block cannot become an entry when the author
    /// or the date is missing.
    pub fn build(self) -> Result<ChangeEntry, Incomplete> {
        let author = self.author.ok_or(Incomplete::MissingAuthor)?;
        let date = self.date.ok_or(Incomplete::MissingDate)?;
        Ok(ChangeEntry {
            author,
            date,
            comment: self.comment,
            files: vec![self.file],
        })
    }
}
