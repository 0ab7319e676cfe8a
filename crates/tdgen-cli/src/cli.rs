//! CLI argument definitions for the test data generator.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::builder::RangedU64ValueParser;
use clap::{Args, ColorChoice, Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tdgen_model::UniverseMode;
use tracing::level_filters::LevelFilter;

use crate::logging::{LogConfig, LogFormat};

#[derive(Parser)]
#[command(
    name = "tdgen",
    version,
    about = "Generate combined test data CSV files from master data tables",
    long_about = "Generate combined test data CSV files from master data tables.\n\n\
                  Reads the CSV tables of a master data directory (customers, flags,\n\
                  seats, prices), samples NUM_RECORDS rows with stable per-customer\n\
                  attributes and non-repeating seat combinations, removes duplicates,\n\
                  sorts by customer and writes a timestamped CSV file."
)]
pub struct Cli {
    #[command(flatten)]
    pub generate: GenerateArgs,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Logging configuration with consistent precedence: `--log-level`,
    /// then `-v`/`-q`, then `RUST_LOG`, then the default `warn`.
    pub fn log_config(&self) -> LogConfig {
        let explicit = self.verbosity.is_present() || self.log_level.is_some();
        let level_filter = self
            .log_level
            .map_or_else(|| self.verbosity.tracing_level_filter(), LevelFilter::from);
        let with_ansi = match self.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.log_file.is_none() && io::stderr().is_terminal(),
        };
        LogConfig::default()
            .with_level_filter(level_filter)
            .with_env_filter(!explicit)
            .with_format(self.log_format.into())
            .with_ansi(with_ansi)
            .with_log_file(self.log_file.clone())
    }
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Number of records to generate before deduplication.
    #[arg(
        value_name = "NUM_RECORDS",
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub num_records: usize,

    /// Directory containing the master data CSV files
    /// (default: $TDGEN_MASTER_DIR, else ./master_data).
    #[arg(long = "master-dir", value_name = "DIR")]
    pub master_dir: Option<PathBuf>,

    /// Directory the output file is written to.
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Output file name prefix; the timestamp and `.csv` are appended.
    #[arg(
        long = "output-prefix",
        value_name = "PREFIX",
        default_value = "generated_combined_data"
    )]
    pub output_prefix: String,

    /// Seed for the random number generator (random when omitted).
    #[arg(long = "seed", value_name = "SEED")]
    pub seed: Option<u64>,

    /// How the seat combination universe is built.
    #[arg(long = "universe", value_enum, default_value = "observed")]
    pub universe: UniverseArg,

    /// Include `grade` in seat combinations.
    ///
    /// A drawn combination's grade then replaces the customer's assigned
    /// grade on that record.
    #[arg(long = "seat-grade")]
    pub seat_grade: bool,

    /// Flag value whose records get no seat.
    #[arg(long = "no-seat-flag", value_name = "VALUE", default_value = "0")]
    pub no_seat_flag: String,

    /// Output columns identifying duplicate records
    /// (default: customerNo,grade,price_type).
    #[arg(long = "dedupe-key", value_name = "COLUMN", value_delimiter = ',')]
    pub dedupe_keys: Vec<String>,

    /// Column of the customers table holding the customer identifier.
    #[arg(
        long = "customer-column",
        value_name = "COLUMN",
        default_value = "customerNo"
    )]
    pub customer_column: String,

    /// Generate and report without writing the output file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Hide the progress bar.
    #[arg(long = "no-progress")]
    pub no_progress: bool,
}

/// CLI seat universe choices.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum UniverseArg {
    /// Distinct combinations present in the seats table.
    Observed,
    /// Cartesian product of each seat column's distinct values.
    CrossProduct,
}

impl From<UniverseArg> for UniverseMode {
    fn from(value: UniverseArg) -> Self {
        match value {
            UniverseArg::Observed => UniverseMode::Observed,
            UniverseArg::CrossProduct => UniverseMode::CrossProduct,
        }
    }
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

impl From<LogLevelArg> for LevelFilter {
    fn from(value: LogLevelArg) -> Self {
        match value {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["tdgen", "10"]).unwrap();
        let args = cli.generate;
        assert_eq!(args.num_records, 10);
        assert_eq!(args.output_dir, PathBuf::from("."));
        assert_eq!(args.output_prefix, "generated_combined_data");
        assert_eq!(args.no_seat_flag, "0");
        assert!(args.dedupe_keys.is_empty());
        assert!(args.seed.is_none());
        assert!(matches!(args.universe, UniverseArg::Observed));
    }

    #[test]
    fn zero_records_rejected() {
        assert!(Cli::try_parse_from(["tdgen", "0"]).is_err());
        assert!(Cli::try_parse_from(["tdgen", "-3"]).is_err());
        assert!(Cli::try_parse_from(["tdgen", "ten"]).is_err());
        assert!(Cli::try_parse_from(["tdgen"]).is_err());
    }

    #[test]
    fn dedupe_keys_split_on_commas_and_repeat() {
        let cli = Cli::try_parse_from([
            "tdgen",
            "5",
            "--dedupe-key",
            "customerNo,flag",
            "--dedupe-key",
            "seat",
            "--universe",
            "cross-product",
        ])
        .unwrap();
        assert_eq!(cli.generate.dedupe_keys, ["customerNo", "flag", "seat"]);
        assert!(matches!(cli.generate.universe, UniverseArg::CrossProduct));
    }

    #[test]
    fn log_level_flag_disables_env_filter() {
        let cli = Cli::try_parse_from(["tdgen", "1", "--log-level", "debug"]).unwrap();
        let config = cli.log_config();
        assert_eq!(config.level_filter, LevelFilter::DEBUG);
        assert!(!config.use_env_filter);
    }

    #[test]
    fn verbosity_flags_map_to_levels() {
        let quiet = Cli::try_parse_from(["tdgen", "1"]).unwrap().log_config();
        assert_eq!(quiet.level_filter, LevelFilter::WARN);
        assert!(quiet.use_env_filter);

        let verbose = Cli::try_parse_from(["tdgen", "1", "-vv"]).unwrap().log_config();
        assert_eq!(verbose.level_filter, LevelFilter::DEBUG);
        assert!(!verbose.use_env_filter);
    }

    #[test]
    fn log_file_and_format() {
        let cli = Cli::try_parse_from([
            "tdgen",
            "1",
            "--log-format",
            "json",
            "--log-file",
            "run.log",
            "--color",
            "never",
        ])
        .unwrap();
        let config = cli.log_config();
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.log_file, Some(PathBuf::from("run.log")));
        assert!(!config.with_ansi);
    }
}
