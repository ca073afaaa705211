//! colsplit: pick columns from a CSV file and export them.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use colsplit_cli::logging::{LogConfig, LogFormat, init_logging};
use colsplit_cli::settings::load_settings;
use colsplit_output::OutputError;
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_columns, run_config, run_copy, run_export};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let (settings, settings_path) = load_settings(cli.config.as_deref());
    let result = match &cli.command {
        Command::Columns(args) => run_columns(args),
        Command::Export(args) => run_export(args, &settings).map(|_| ()),
        Command::Copy(args) => run_copy(args, &settings).map(|_| ()),
        Command::Config(args) => run_config(args, &settings, settings_path.as_deref()),
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            report(&error);
            1
        }
    };
    std::process::exit(exit_code);
}

/// Empty selections and clipboard refusals are warnings, everything else an
/// error.
fn report(error: &anyhow::Error) {
    match error.downcast_ref::<OutputError>() {
        Some(OutputError::NoSelection) => {
            eprintln!("warning: no columns selected (use --all, --filter or --column)");
        }
        Some(warning) if warning.is_warning() => eprintln!("warning: {warning}"),
        _ => eprintln!("error: {error:#}"),
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
