// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for the history log parser
//!
//! Arbitrary bytes go straight into the reader-based parser, so invalid
//! UTF-8 and missing end markers are covered too.

#![no_main]

use libfuzzer_sys::fuzz_target;

use starlog_parser::LogParser;

fuzz_target!(|data: &[u8]| {
    let parser = LogParser::default();

    // Content problems must never surface as errors or panics
    let outcome = parser
        .parse_with_summary(data)
        .expect("in-memory reads cannot fail");

    assert_eq!(outcome.entries.len(), outcome.summary.entries);
    for entry in &outcome.entries {
        assert!(!entry.files.is_empty());
    }
});
