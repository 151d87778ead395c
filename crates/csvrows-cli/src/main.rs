//! csvrows command-line entry point.

use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use csvrows_cli::logging::{LogConfig, LogFormat, init_logging};
use csvrows_cli::render::{render_json, render_table, render_text};
use csvrows_ingest::parse_path;
use tracing::level_filters::LevelFilter;

mod cli;

use crate::cli::{Cli, LogFormatArg, LogLevelArg, OutputFormatArg};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> Result<()> {
    let dialect = cli.dialect();
    let document = parse_path(&cli.file, dialect)?;
    tracing::info!(
        path = %cli.file.display(),
        columns = document.header().len(),
        rows = document.len(),
        warnings = document.diagnostics().len(),
        "parsed"
    );

    match cli.format {
        OutputFormatArg::Text => print!("{}", render_text(&document)),
        OutputFormatArg::Table => println!("{}", render_table(&document)),
        OutputFormatArg::Json => {
            let json = render_json(&document).context("failed to serialize document")?;
            println!("{json}");
        }
    }
    Ok(())
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level_filter = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };

    let mut config = LogConfig::default()
        .with_level_filter(level_filter)
        .with_timestamps(cli.log_timestamps)
        .with_format(format)
        .with_ansi(with_ansi)
        .with_log_file(cli.log_file.clone());
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    config
}
