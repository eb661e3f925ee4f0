//! CLI argument definitions.

use super::validators::{parse_export_every, parse_extension, parse_timeline_rate};
use crate::config::OutputFormat;
use crate::recording::TextEncoding;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Collect annotations and recording intervals from a tree of EDF files.
#[derive(Debug, Parser)]
#[command(name = "edfaudit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Root folder to scan recursively (prompted for when omitted).
    pub root: Option<PathBuf>,

    /// Options for an audit run.
    #[command(flatten)]
    pub audit: AuditArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for an audit run. Unset options fall back to the config file.
#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct AuditArgs {
    /// Recording file extension, without the dot.
    #[arg(short, long, value_parser = parse_extension, env = "EDFAUDIT_EXTENSION")]
    pub extension: Option<String>,

    /// Encoding of annotation text.
    #[arg(long, value_enum, env = "EDFAUDIT_ENCODING")]
    pub encoding: Option<TextEncoding>,

    /// Timeline density in points per second.
    #[arg(short = 'r', long, value_parser = parse_timeline_rate, env = "EDFAUDIT_TIMELINE_RATE")]
    pub timeline_rate: Option<f64>,

    /// Rewrite the workbooks after every N successful files.
    #[arg(short = 'n', long, value_parser = parse_export_every, env = "EDFAUDIT_EXPORT_EVERY")]
    pub export_every: Option<usize>,

    /// Workbook format.
    #[arg(short, long, value_enum, env = "EDFAUDIT_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Name of the running annotation sheet (default: root folder name).
    #[arg(short, long, env = "EDFAUDIT_SHEET_NAME")]
    pub sheet_name: Option<String>,

    /// Do not write the timeline plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Do not prefix CSV output with a byte order mark.
    #[arg(long)]
    pub no_csv_bom: bool,

    /// Hide the progress spinner.
    #[arg(long)]
    pub no_progress: bool,

    /// Only print warnings and errors.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_root_only() {
        let cli = Cli::try_parse_from(["edfaudit", "/data/study"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.root, Some(PathBuf::from("/data/study")));
        assert!(cli.audit.timeline_rate.is_none());
    }

    #[test]
    fn test_cli_parse_without_root() {
        let cli = Cli::try_parse_from(["edfaudit"]).unwrap();
        assert!(cli.root.is_none());
    }

    #[test]
    fn test_cli_parse_with_options() {
        let cli = Cli::try_parse_from([
            "edfaudit",
            "/data",
            "--timeline-rate",
            "2.5",
            "-n",
            "10",
            "--format",
            "csv",
            "--encoding",
            "utf8",
            "--sheet-name",
            "night",
            "--no-plot",
            "-q",
        ])
        .unwrap();
        assert_eq!(cli.audit.timeline_rate, Some(2.5));
        assert_eq!(cli.audit.export_every, Some(10));
        assert_eq!(cli.audit.format, Some(OutputFormat::Csv));
        assert_eq!(cli.audit.encoding, Some(TextEncoding::Utf8));
        assert_eq!(cli.audit.sheet_name.as_deref(), Some("night"));
        assert!(cli.audit.no_plot);
        assert!(cli.audit.quiet);
    }

    #[test]
    fn test_cli_rejects_zero_export_every() {
        assert!(Cli::try_parse_from(["edfaudit", "/data", "--export-every", "0"]).is_err());
    }

    #[test]
    fn test_cli_rejects_negative_rate() {
        assert!(Cli::try_parse_from(["edfaudit", "/data", "--timeline-rate=-1"]).is_err());
    }

    #[test]
    fn test_cli_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["edfaudit", "/data", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_cli_parse_config_subcommand() {
        let cli = Cli::try_parse_from(["edfaudit", "config", "show"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Config {
                action: ConfigAction::Show
            })
        ));
    }
}
