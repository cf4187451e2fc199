//! Configuration for the starlog command
//!
//! This module provides the command-line options and turns them into the
//! parser options, input source and logging level used by a run.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use starlog_parser::{LogError, ParserOptions};

/// Starlog - change log extraction from StarTeam history output
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "starlog")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// StarTeam history log to read
    ///
    /// Reads from stdin when omitted or `-`.
    pub input: Option<PathBuf>,

    /// Only report changes from the last DAYS days
    ///
    /// Changes dated more than one day in the future are dropped as well.
    #[arg(short, long, value_name = "DAYS", env = "STARLOG_RANGE")]
    pub range: Option<String>,

    /// strftime pattern for the dates printed on author lines
    ///
    /// Defaults to trying ISO-style and US locale formats.
    #[arg(short, long, value_name = "PATTERN", env = "STARLOG_DATE_FORMAT")]
    pub date_format: Option<String>,

    /// Report changes of any date even when --range is set
    #[arg(long, default_value = "false")]
    pub ignore_range: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable verbose logging (debug level)
    ///
    /// Logs every revision block as it is merged or dropped.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

/// How change entries are printed
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable listing
    #[default]
    Text,
    /// Pretty-printed JSON array
    Json,
}

/// Where the history log is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Standard input
    Stdin,
    /// A file on disk
    File(PathBuf),
}

impl Config {
    /// Get the input source, treating a missing path or `-` as stdin
    #[must_use]
    pub fn input_source(&self) -> InputSource {
        match &self.input {
            Some(path) if path.as_os_str() != "-" => InputSource::File(path.clone()),
            _ => InputSource::Stdin,
        }
    }

    /// Build the parser options from the range and date format flags
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidOption` if the range is not a number of
    /// days or the date format is not a valid pattern.
    pub fn parser_options(&self) -> Result<ParserOptions, ConfigError> {
        let mut options = ParserOptions::new().ignore_range(self.ignore_range);
        if let Some(ref range) = self.range {
            options = options.range(range)?;
        }
        if let Some(ref pattern) = self.date_format {
            options = options.date_format(pattern)?;
        }
        Ok(options)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input path is specified but doesn't exist or is not a file
    /// - The range or date format is invalid
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let InputSource::File(path) = self.input_source() {
            if !path.exists() {
                return Err(ConfigError::InputNotFound(path));
            }
            if !path.is_file() {
                return Err(ConfigError::InputNotFile(path));
            }
        }

        self.parser_options()?;
        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Input path not found
    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    /// Input path is not a regular file
    #[error("Input path is not a file: {0}")]
    InputNotFile(PathBuf),

    /// Range or date format rejected by the parser
    #[error("Invalid option: {0}")]
    InvalidOption(#[from] LogError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.input.is_none());
        assert!(config.range.is_none());
        assert!(config.date_format.is_none());
        assert!(!config.ignore_range);
        assert_eq!(config.format, OutputFormat::Text);
        assert!(!config.verbose);
        assert!(!config.quiet);
    }

    #[test]
    fn test_input_source_default_is_stdin() {
        assert_eq!(Config::default().input_source(), InputSource::Stdin);
    }

    #[test]
    fn test_input_source_dash_is_stdin() {
        let config = Config {
            input: Some(PathBuf::from("-")),
            ..Default::default()
        };
        assert_eq!(config.input_source(), InputSource::Stdin);
    }

    #[test]
    fn test_input_source_file() {
        let config = Config {
            input: Some(PathBuf::from("history.log")),
            ..Default::default()
        };
        assert_eq!(
            config.input_source(),
            InputSource::File(PathBuf::from("history.log"))
        );
    }

    #[test]
    fn test_parser_options_default() {
        let options = Config::default().parser_options().expect("options");
        assert!(options.window.is_none());
        assert!(!options.ignore_range);
    }

    #[test]
    fn test_parser_options_with_range() {
        let config = Config {
            range: Some("14".to_string()),
            ignore_range: true,
            ..Default::default()
        };
        let options = config.parser_options().expect("options");
        assert!(options.window.is_some());
        assert!(options.ignore_range);
    }

    #[test]
    fn test_parser_options_empty_range_means_no_window() {
        let config = Config {
            range: Some(String::new()),
            ..Default::default()
        };
        let options = config.parser_options().expect("options");
        assert!(options.window.is_none());
    }

    #[test]
    fn test_parser_options_bad_range() {
        let config = Config {
            range: Some("two weeks".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            config.parser_options(),
            Err(ConfigError::InvalidOption(LogError::InvalidRange { .. }))
        ));
    }

    #[test]
    fn test_log_level_default() {
        assert_eq!(Config::default().log_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_log_level_verbose() {
        let config = Config {
            verbose: true,
            ..Default::default()
        };
        assert_eq!(config.log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_log_level_quiet() {
        let config = Config {
            quiet: true,
            ..Default::default()
        };
        assert_eq!(config.log_level(), tracing::Level::WARN);
    }

    #[test]
    fn test_validate_nonexistent_input() {
        let config = Config {
            input: Some(PathBuf::from("/nonexistent/path/12345.log")),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InputNotFound(_))
        ));
    }

    #[test]
    fn test_validate_directory_input() {
        let config = Config {
            input: Some(std::env::temp_dir()),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InputNotFile(_))));
    }

    #[test]
    fn test_validate_stdin() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
