// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Date parsing and the lookback acceptance window
//!
//! StarTeam prints dates in the locale of the machine that produced the log,
//! usually followed by a time-zone abbreviation. Dates are read as naive local
//! times and treated as UTC.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Duration, NaiveDateTime, Utc};

use crate::error::LogError;

/// Formats tried, in order, when no custom format is configured
pub const DEFAULT_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%y %I:%M:%S %p",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%y %I:%M %p",
];

/// How the text after ` Date: ` is turned into a timestamp
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DateFormat {
    /// Try each of [`DEFAULT_DATE_FORMATS`]
    #[default]
    Standard,
    /// A single caller-supplied `strftime` pattern
    Custom(String),
}

impl DateFormat {
    /// Build a custom format, rejecting patterns with invalid specifiers
    ///
    /// # Errors
    ///
    /// Returns `LogError::InvalidDateFormat` if the pattern is empty or
    /// contains a specifier chrono does not understand.
    pub fn custom(pattern: &str) -> Result<Self, LogError> {
        let invalid = pattern.trim().is_empty()
            || StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error));
        if invalid {
            return Err(LogError::InvalidDateFormat {
                format: pattern.to_string(),
            });
        }
        Ok(Self::Custom(pattern.to_string()))
    }

    /// Parse a date, returning `None` if no format matches
    #[must_use]
    pub fn parse(&self, text: &str) -> Option<DateTime<Utc>> {
        let text = text.trim();
        self.parse_exact(text).or_else(|| {
            // Retry without a trailing zone abbreviation such as "EDT"
            let (head, zone) = text.rsplit_once(char::is_whitespace)?;
            if zone.chars().all(|c| c.is_ascii_alphabetic()) {
                self.parse_exact(head.trim_end())
            } else {
                None
            }
        })
    }

    fn parse_exact(&self, text: &str) -> Option<DateTime<Utc>> {
        let parsed = match self {
            Self::Standard => DEFAULT_DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok()),
            Self::Custom(fmt) => NaiveDateTime::parse_from_str(text, fmt).ok(),
        };
        parsed.map(|naive| naive.and_utc())
    }
}

/// Acceptance range for entry dates, inclusive at both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    /// Earliest accepted date
    pub before: DateTime<Utc>,
    /// Latest accepted date
    pub after: DateTime<Utc>,
}

impl DateWindow {
    /// Window covering the last `days` days up to one day past `now`
    ///
    /// Bounds that fall outside the representable date range are clamped to
    /// its ends, so a huge lookback simply has no lower limit.
    #[must_use]
    pub fn lookback(days: i64, now: DateTime<Utc>) -> Self {
        let before = Duration::try_days(days)
            .and_then(|span| now.checked_sub_signed(span))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let after = Duration::try_days(1)
            .and_then(|span| now.checked_add_signed(span))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self { before, after }
    }

    /// Parse a lookback given as a string of whole days
    ///
    /// An empty string means no window.
    ///
    /// # Errors
    ///
    /// Returns `LogError::InvalidRange` if the value is not a non-negative integer.
    pub fn from_range(value: &str, now: DateTime<Utc>) -> Result<Option<Self>, LogError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let days: i64 = trimmed.parse().map_err(|_| LogError::InvalidRange {
            value: value.to_string(),
        })?;
        if days < 0 {
            return Err(LogError::InvalidRange {
                value: value.to_string(),
            });
        }
        Ok(Some(Self::lookback(days, now)))
    }

    /// Check whether a date falls inside the window
    #[must_use]
    pub fn contains(&self, date: DateTime<Utc>) -> bool {
        !(date < self.before || date > self.after)
    }
}
