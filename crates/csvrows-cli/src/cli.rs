//! CLI argument definitions for csvrows.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use csvrows_ingest::{DEFAULT_DELIMITER, DEFAULT_QUALIFIER, Dialect};

#[derive(Parser)]
#[command(
    name = "csvrows",
    version,
    about = "Parse a delimited text file and print each row as header/value pairs",
    long_about = "Parse a delimited text file and print each row as header/value pairs.\n\n\
                  The first non-blank line is the header. Quoted fields may contain the\n\
                  delimiter, doubled qualifiers and line breaks."
)]
pub struct Cli {
    /// Path to the delimited text file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Field delimiter (a single character).
    #[arg(value_name = "DELIMITER", default_value_t = DEFAULT_DELIMITER)]
    pub delimiter: char,

    /// Text qualifier used to quote fields (a single character).
    #[arg(value_name = "QUALIFIER", default_value_t = DEFAULT_QUALIFIER)]
    pub qualifier: char,

    /// Output format for parsed rows.
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormatArg,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Prefix log lines with timestamps.
    #[arg(long = "log-timestamps")]
    pub log_timestamps: bool,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// The dialect selected by the positional arguments.
    pub fn dialect(&self) -> Dialect {
        Dialect::new(self.delimiter, self.qualifier)
    }
}

/// Row output choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Text,
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["csvrows", "data.csv"]).unwrap();
        assert_eq!(cli.file, PathBuf::from("data.csv"));
        assert_eq!(cli.dialect(), Dialect::default());
        assert_eq!(cli.format, OutputFormatArg::Text);
        assert!(!cli.log_timestamps);
    }

    #[test]
    fn test_log_timestamps_flag() {
        let cli = Cli::try_parse_from(["csvrows", "--log-timestamps", "data.csv"]).unwrap();
        assert!(cli.log_timestamps);
    }

    #[test]
    fn test_positional_dialect() {
        let cli = Cli::try_parse_from(["csvrows", "data.txt", ";", "'"]).unwrap();
        assert_eq!(cli.dialect(), Dialect::new(';', '\''));
    }

    #[test]
    fn test_multi_char_delimiter_is_rejected() {
        assert!(Cli::try_parse_from(["csvrows", "data.csv", "::"]).is_err());
    }

    #[test]
    fn test_format_flag() {
        let cli = Cli::try_parse_from(["csvrows", "--format", "json", "data.csv"]).unwrap();
        assert_eq!(cli.format, OutputFormatArg::Json);
    }
}
