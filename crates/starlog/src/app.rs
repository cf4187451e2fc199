//! The starlog run loop: parse a history log and write the report

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use starlog_parser::{LogParser, ParseSummary};
use tracing::{info, warn};

use crate::config::Config;
use crate::report;

/// Parse the log from `reader` and write the rendered report to `writer`
///
/// # Errors
///
/// Returns an error if the options are invalid, the log cannot be read,
/// or the report cannot be written.
pub fn run<R: BufRead, W: Write>(config: &Config, reader: R, mut writer: W) -> Result<ParseSummary> {
    let parser = LogParser::new(config.parser_options()?);
    let outcome = parser
        .parse_with_summary(reader)
        .context("Failed to read history log")?;

    let summary = outcome.summary;
    if summary.unterminated {
        warn!("History log ended inside a file block; its last revision was discarded");
    }
    if summary.missing_date > 0 {
        warn!(
            count = summary.missing_date,
            "Revisions dropped because their date could not be parsed"
        );
    }

    let rendered = report::render(&outcome.entries, config.format)
        .context("Failed to render report")?;
    writer
        .write_all(rendered.as_bytes())
        .context("Failed to write report")?;
    writer.flush().context("Failed to write report")?;

    info!(
        entries = summary.entries,
        revisions = summary.blocks,
        dropped = summary.dropped(),
        "Change log written"
    );
    Ok(summary)
}
