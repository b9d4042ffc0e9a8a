//! `cpass` command-line tool.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use cpass_cli::logging::{LogConfig, LogFormat, init_logging};
use cpass_persistence::PersistenceError;
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod progress;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let taxonomy_dir = cli.taxonomy_dir.as_deref();
    let result = match &cli.command {
        Command::Taxonomy(args) => commands::run_taxonomy(taxonomy_dir, args),
        Command::Columns(args) => commands::run_columns(args),
        Command::Match(args) => commands::run_match(taxonomy_dir, args, cli.log_data),
        Command::Onboard(args) => commands::run_onboard(taxonomy_dir, args, cli.log_data),
        Command::Certify(args) => commands::run_certify(taxonomy_dir, args),
        Command::Doctor => commands::run_doctor(taxonomy_dir),
    };
    let exit_code = match result {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            if let Some(hint) = error
                .downcast_ref::<PersistenceError>()
                .and_then(PersistenceError::suggestion)
            {
                eprintln!("hint: {hint}");
            }
            1
        }
    };
    std::process::exit(exit_code);
}

/// `--log-level` wins over `-v`/`-q`; with neither, `RUST_LOG` may override
/// the default level.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level = match cli.log_level {
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
    let ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    let mut config = LogConfig::default()
        .with_level(level)
        .with_format(format)
        .with_log_file(cli.log_file.clone())
        .with_log_data(cli.log_data);
    config.use_env_filter = cli.log_level.is_none() && !cli.verbosity.is_present();
    config.with_ansi = ansi;
    config
}
