// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! starlog-parser: StarTeam history log processing
//!
//! This library crate turns the text printed by StarTeam's history command
//! into change entries: one per author, minute and comment, each listing the
//! file revisions it touched.

#![warn(missing_docs)]

//! # Example
//!
//! ```
//! use starlog_parser::{LogParser, ParserOptions};
//!
//! let log = "\
//! History for: foo.txt
//! ----------------------------
//! Branch Revision: 1.2
//! Author: alice Date: 2006-01-01 10:00:00
//! fix bug
//! =============================================================================
//! ";
//!
//! let parser = LogParser::new(ParserOptions::new());
//! let entries = parser.parse(log.as_bytes()).expect("parse log");
//!
//! assert_eq!(entries.len(), 1);
//! assert_eq!(entries[0].author, "alice");
//! assert_eq!(entries[0].files[0].revision, "1.2");
//! ```

pub mod entry;
pub mod error;
pub mod parser;
pub mod store;
pub mod window;

pub use entry::{ChangeEntry, EntryBuilder, FileRevision};
pub use error::LogError;
pub use parser::{LogParser, ParseOutcome, ParseSummary, ParserOptions, State};
pub use store::{Admission, EntryStore, Rejection};
pub use window::{DateFormat, DateWindow};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::entry::{ChangeEntry, FileRevision};
    pub use crate::error::LogError;
    pub use crate::parser::{LogParser, ParserOptions};
}
