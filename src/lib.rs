//! edfaudit - annotation and timing audit for folders of EDF recordings.
//!
//! Walks a folder tree, reads every recording's annotations and start/end
//! times, and writes them to per-folder spreadsheet sheets together with a
//! timeline plot of when recordings were running.

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod recording;

use clap::Parser;
use cli::{AuditArgs, Cli, Command};
use config::{
    Config, DefaultsConfig, OutputFormat, config_file_path, load_default_config,
    save_default_config, validate_config,
};
use output::{CsvSink, ExportSink, XlsxSink, plot};
use pipeline::{BatchOptions, BatchReport, run_batch};
use recording::EdfReader;
use std::path::Path;
use tracing::{error, info, warn};

pub use error::{Error, Result};

/// Main entry point for the edfaudit CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.audit.verbose, cli.audit.quiet);

    if let Some(command) = cli.command {
        return handle_command(command);
    }

    let config = load_default_config()?;
    validate_config(&config)?;

    let root = match cli.root {
        Some(root) => root,
        None => match cli::prompt_for_root(std::io::stdin().lock(), std::io::stderr())? {
            Some(root) => root,
            None => {
                info!("No root folder given, nothing to do");
                return Ok(());
            }
        },
    };

    audit_directory(&root, &cli.audit, &config).map(|_| ())
}

/// Merge command-line arguments over config defaults.
pub fn resolve_options(args: &AuditArgs, defaults: &DefaultsConfig) -> BatchOptions {
    BatchOptions {
        extension: args
            .extension
            .clone()
            .unwrap_or_else(|| defaults.extension.clone()),
        encoding: args.encoding.unwrap_or(defaults.encoding),
        timeline_rate: args.timeline_rate.unwrap_or(defaults.timeline_rate),
        export_every: args.export_every.unwrap_or(defaults.export_every),
        sheet_name: args
            .sheet_name
            .clone()
            .or_else(|| defaults.sheet_name.clone()),
        format: args.format.unwrap_or(defaults.format),
        progress_enabled: !args.no_progress && !args.quiet,
    }
}

/// Audit every recording under `root`, write the workbooks and the timeline plot.
pub fn audit_directory(root: &Path, args: &AuditArgs, config: &Config) -> Result<BatchReport> {
    let options = resolve_options(args, &config.defaults);

    info!(
        "Auditing {} (format {}, exporting every {} file(s))",
        root.display(),
        options.format,
        options.export_every
    );

    let mut sink: Box<dyn ExportSink> = match options.format {
        OutputFormat::Xlsx => Box::new(XlsxSink::new()),
        OutputFormat::Csv => Box::new(CsvSink::new(config.defaults.csv_bom && !args.no_csv_bom)),
    };

    let report = run_batch(root, &options, &EdfReader, sink.as_mut())?;

    if config.defaults.plot && !args.no_plot {
        write_timeline(&report);
    }

    info!(
        "Complete: {} found, {} processed, {} skipped, {} annotations in {:.2}s",
        report.discovered,
        report.processed,
        report.skipped.len(),
        report.annotations.len(),
        report.duration_secs
    );

    if !report.skipped.is_empty() {
        warn!("{} file(s) could not be read", report.skipped.len());
    }
    if !report.export_failures.is_empty() {
        warn!(
            "{} running export(s) failed; final workbooks were written",
            report.export_failures.len()
        );
    }

    Ok(report)
}

fn write_timeline(report: &BatchReport) {
    match plot::write_timeline_html(&report.paths.timeline, &report.root_name, &report.timeline) {
        Ok(true) => info!(
            "Timeline ({} points) written to {}",
            report.timeline.len(),
            report.paths.timeline.display()
        ),
        Ok(false) => warn!("Timeline is empty, plot not written"),
        Err(e) => error!(
            "Failed to write timeline {}: {}",
            report.paths.timeline.display(),
            error::display_chain(&e)
        ),
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    fmt().with_writer(std::io::stderr).with_env_filter(filter).init();
}

fn handle_command(command: Command) -> Result<()> {
    match command {
        Command::Config { action } => handle_config_command(action),
    }
}

#[allow(clippy::print_stdout)]
fn handle_config_command(action: cli::ConfigAction) -> Result<()> {
    use cli::ConfigAction;

    match action {
        ConfigAction::Init => {
            let path = config_file_path()?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                let saved_path = save_default_config(&Config::default())?;
                println!("Created configuration file: {}", saved_path.display());
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_default_config()?;
            let text = toml::to_string_pretty(&config)
                .map_err(|e| Error::ConfigSerialize { source: e })?;
            print!("{text}");
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", config_file_path()?.display());
            Ok(())
        }
    }
}
