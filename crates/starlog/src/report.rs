//! Report rendering for change entries

use starlog_parser::ChangeEntry;

use crate::config::OutputFormat;

/// Render entries in the requested format
///
/// # Errors
///
/// Returns `serde_json::Error` if JSON serialization fails.
pub fn render(entries: &[ChangeEntry], format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(render_text(entries)),
        OutputFormat::Json => render_json(entries),
    }
}

/// Render entries as an indented listing, one paragraph per change
///
/// ```text
/// 2006-01-01 10:00  alice
///     fix bug
///     - foo.txt 1.2
/// ```
#[must_use]
pub fn render_text(entries: &[ChangeEntry]) -> String {
    let mut out = String::new();
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!(
            "{}  {}\n",
            entry.date.format("%Y-%m-%d %H:%M"),
            entry.author
        ));
        for line in entry.comment.lines() {
            out.push_str(&format!("    {line}\n"));
        }
        for file in &entry.files {
            out.push_str(&format!("    - {} {}\n", file.name, file.revision));
        }
    }
    out
}

/// Render entries as a pretty-printed JSON array
///
/// # Errors
///
/// Returns `serde_json::Error` if serialization fails.
pub fn render_json(entries: &[ChangeEntry]) -> Result<String, serde_json::Error> {
    let mut json = serde_json::to_string_pretty(entries)?;
    json.push('\n');
    Ok(json)
}
