// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for starlog-parser

use thiserror::Error;

/// Errors that can occur while configuring the parser or reading a log
#[derive(Debug, Error)]
pub enum LogError {
    /// Error reading the log stream
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Lookback range is not a non-negative whole number of days
    #[error("Invalid date range: {value:?} is not a number of days")]
    InvalidRange {
        /// The range value as supplied by the caller
        value: String,
    },

    /// Date format string rejected by the formatter
    #[error("Invalid date format: {format:?}")]
    InvalidDateFormat {
        /// The format string as supplied by the caller
        format: String,
    },
}
