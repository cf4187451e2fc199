// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Deduplicating, ordered store of change entries
//!
//! Entries are keyed by [`ChangeEntry::key`]. A second entry with the same key
//! is folded into the first by appending its files, which is how one commit
//! spanning several files is reassembled from per-file revision blocks.

use std::collections::BTreeMap;

use crate::entry::{ChangeEntry, EntryBuilder, Incomplete};
use crate::window::DateWindow;

/// Why a flushed block was not stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The block had no author line
    MissingAuthor,
    /// The author line had no parseable date
    MissingDate,
    /// The date fell outside the lookback window
    OutOfWindow,
}

impl From<Incomplete> for Rejection {
    fn from(value: Incomplete) -> Self {
        match value {
            Incomplete::MissingAuthor => Self::MissingAuthor,
            Incomplete::MissingDate => Self::MissingDate,
        }
    }
}

/// Result of offering a block to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// A new entry was created
    Inserted,
    /// The files were appended to an existing entry
    Merged,
    /// Nothing was stored
    Rejected(Rejection),
}

/// Change entries keyed by minute timestamp, author and comment
#[derive(Debug, Clone, Default)]
pub struct EntryStore {
    window: Option<DateWindow>,
    entries: BTreeMap<String, ChangeEntry>,
}

impl EntryStore {
    /// Create a store that accepts entries of any date
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that only accepts entries inside `window`
    #[must_use]
    pub fn with_window(window: Option<DateWindow>) -> Self {
        Self {
            window,
            entries: BTreeMap::new(),
        }
    }

    /// Finish a block and store it, merging with an equal-keyed entry
    pub fn admit(&mut self, builder: EntryBuilder) -> Admission {
        match builder.build() {
            Ok(entry) => self.insert(entry),
            Err(incomplete) => Admission::Rejected(incomplete.into()),
        }
    }

    /// Store a complete entry, merging with an equal-keyed entry
    pub fn insert(&mut self, entry: ChangeEntry) -> Admission {
        if let Some(window) = &self.window {
            if !window.contains(entry.date) {
                return Admission::Rejected(Rejection::OutOfWindow);
            }
        }

        let key = entry.key();
        match self.entries.get_mut(&key) {
            Some(existing) => {
                existing.files.extend(entry.files);
                Admission::Merged
            }
            None => {
                self.entries.insert(key, entry);
                Admission::Inserted
            }
        }
    }

    /// Number of stored entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the store, returning entries in descending key order
    #[must_use]
    pub fn into_entries(self) -> Vec<ChangeEntry> {
        self.entries.into_values().rev().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::FileRevision;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use similar_asserts::assert_eq;

    fn at(hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2006, 1, 1, hour, minute, second).unwrap()
    }

    fn entry(file: &str, rev: &str, date: DateTime<Utc>, comment: &str) -> ChangeEntry {
        ChangeEntry {
            author: "alice".to_string(),
            date,
            comment: comment.to_string(),
            files: vec![FileRevision::new(file).with_revision(rev)],
        }
    }

    #[test]
    fn test_insert_new_entry() {
        let mut store = EntryStore::new();
        assert_eq!(store.insert(entry("a.txt", "1.1", at(10, 0, 0), "x\n")), Admission::Inserted);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_same_minute_merges_files() {
        let mut store = EntryStore::new();
        store.insert(entry("a.txt", "1.1", at(10, 0, 5), "x\n"));
        let admission = store.insert(entry("b.txt", "1.7", at(10, 0, 55), "x\n"));
        assert_eq!(admission, Admission::Merged);

        let entries = store.into_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].files,
            vec![
                FileRevision::new("a.txt").with_revision("1.1"),
                FileRevision::new("b.txt").with_revision("1.7"),
            ]
        );
        // The first entry's exact timestamp is kept
        assert_eq!(entries[0].date, at(10, 0, 5));
    }

    #[test]
    fn test_different_comment_does_not_merge() {
        let mut store = EntryStore::new();
        store.insert(entry("a.txt", "1.1", at(10, 0, 0), "x\n"));
        store.insert(entry("b.txt", "1.1", at(10, 0, 0), "y\n"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_entries_newest_first() {
        let mut store = EntryStore::new();
        store.insert(entry("a.txt", "1.1", at(9, 0, 0), "x\n"));
        store.insert(entry("a.txt", "1.3", at(11, 0, 0), "x\n"));
        store.insert(entry("a.txt", "1.2", at(10, 0, 0), "x\n"));

        let revisions: Vec<String> = store
            .into_entries()
            .into_iter()
            .map(|e| e.files[0].revision.clone())
            .collect();
        assert_eq!(revisions, ["1.3", "1.2", "1.1"].map(String::from).to_vec());
    }

    #[test]
    fn test_window_rejects_outside() {
        let now = at(12, 0, 0);
        let mut store = EntryStore::with_window(Some(DateWindow::lookback(1, now)));
        let old = entry("a.txt", "1.1", now - Duration::days(2), "x\n");
        let future = entry("a.txt", "1.2", now + Duration::days(2), "x\n");
        let recent = entry("a.txt", "1.3", now - Duration::hours(3), "x\n");

        assert_eq!(store.insert(old), Admission::Rejected(Rejection::OutOfWindow));
        assert_eq!(store.insert(future), Admission::Rejected(Rejection::OutOfWindow));
        assert_eq!(store.insert(recent), Admission::Inserted);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_admit_incomplete_block() {
        let mut store = EntryStore::new();
        let builder = EntryBuilder::for_file("a.txt");
        assert_eq!(
            store.admit(builder),
            Admission::Rejected(Rejection::MissingAuthor)
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_admit_complete_block() {
        let mut store = EntryStore::new();
        let mut builder = EntryBuilder::for_file("a.txt");
        builder.set_revision("1.4");
        builder.set_author("alice", Some(at(10, 0, 0)));
        assert_eq!(store.admit(builder), Admission::Inserted);
    }
}
