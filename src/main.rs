// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, Context};
use log::{warn, info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use std::fs::File;
use std::io::BufReader;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::app_config::Config;
use app_controller::{Controller, RunOptions};

mod app_config;
mod app_controller;
mod corpus;
mod datasets;
mod errors;
mod file_utils;
mod merge;
mod report;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Merge a gharib gloss dataset into the corpus
    ApplyGharib(ApplyArgs),

    /// Merge a companion-video mapping dataset into the corpus
    ApplyVideos(ApplyArgs),

    /// Harvest existing gloss annotations into a dataset file
    Extract(ExtractArgs),

    /// Generate shell completions for gharib
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ApplyArgs {
    /// Reference dataset file (JSON array of records)
    #[arg(value_name = "DATASET")]
    dataset: PathBuf,

    /// Corpus directory (overrides the config file)
    #[arg(long)]
    corpus: Option<PathBuf>,

    /// Report counts without writing any document back
    #[arg(long)]
    dry_run: bool,

    /// Write a machine-readable JSON run report to this path
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ExtractArgs {
    /// Output dataset file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Corpus directory (overrides the config file)
    #[arg(long)]
    corpus: Option<PathBuf>,
}

/// gharib - Quran-corpus annotation merge tool
///
/// Maintains the per-surah JSON corpus of a Quran-reading application by
/// merging external annotation datasets (rare-word glosses, companion
/// videos) into it, keyed by (surah, verse).
#[derive(Parser, Debug)]
#[command(name = "gharib")]
#[command(version = "1.0.0")]
#[command(about = "Quran-corpus annotation merge tool")]
#[command(long_about = "gharib merges external annotation datasets into a per-surah JSON corpus.

EXAMPLES:
    gharib apply-gharib gharib-extended.json        # Merge glosses using default config
    gharib apply-gharib data.json --dry-run         # Count matches without writing
    gharib apply-videos episodes.json --corpus data/surahs
    gharib extract harvested.json                   # Corpus annotations -> dataset file
    gharib completions bash > gharib.bash           # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically.

EXIT STATUS:
    0 on completion, even when individual documents were skipped; nonzero when
    the corpus directory cannot be opened, a dataset cannot be loaded, or an
    extract output cannot be written.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Marker for log level
    fn get_marker_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "✗ ",
            Level::Warn => "⚠ ",
            Level::Info => " ",
            Level::Debug => "· ",
            Level::Trace => "· ",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let marker = Self::get_marker_for_level(record.level());

            let mut stderr = std::io::stderr();
            let color = match record.level() {
                Level::Error => "\x1B[1;31m",
                Level::Warn => "\x1B[1;33m",
                Level::Info => "\x1B[1;32m",
                Level::Debug => "\x1B[1;36m",
                Level::Trace => "\x1B[1;35m",
            };
            let _ = writeln!(
                stderr,
                "{}{} {}{}\x1B[0m",
                color, now, marker, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle completions before touching any configuration
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "gharib", &mut std::io::stdout());
        return Ok(());
    }

    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &cli.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(config_log_level.to_level_filter());
    }

    // Load or create configuration
    let mut config = load_or_create_config(&cli.config_path, cli.log_level.as_ref())?;

    // Apply per-command corpus override before validation
    match &cli.command {
        Commands::ApplyGharib(args) | Commands::ApplyVideos(args) => {
            if let Some(corpus) = &args.corpus {
                config.corpus_dir = corpus.display().to_string();
            }
        }
        Commands::Extract(args) => {
            if let Some(corpus) = &args.corpus {
                config.corpus_dir = corpus.display().to_string();
            }
        }
        Commands::Completions { .. } => {}
    }

    // Validate the configuration after loading and overriding
    config.validate()
        .context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if cli.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    // Create controller
    let controller = Controller::with_config(config)?;

    match &cli.command {
        Commands::ApplyGharib(args) => {
            let report = controller.run_apply_gharib(&args.dataset, &run_options(args))?;
            if !report.errors.is_empty() {
                info!("{} document(s) could not be processed", report.errors.len());
            }
        }
        Commands::ApplyVideos(args) => {
            let report = controller.run_apply_videos(&args.dataset, &run_options(args))?;
            if !report.errors.is_empty() {
                info!("{} document(s) could not be processed", report.errors.len());
            }
        }
        Commands::Extract(args) => {
            controller.run_extract(&args.output)?;
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}

fn run_options(args: &ApplyArgs) -> RunOptions {
    RunOptions {
        dry_run: args.dry_run,
        report_path: args.report.clone(),
    }
}

/// Load the configuration file, creating a default one when it is missing
fn load_or_create_config(config_path: &str, log_level: Option<&CliLogLevel>) -> Result<Config> {
    let config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let mut config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        // Update log level in config if specified via command line
        if let Some(log_level) = log_level {
            config.log_level = log_level.clone().into();
        }

        config
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let mut config = Config::default();

        // Apply command line log level to default config if specified
        if let Some(log_level) = log_level {
            config.log_level = log_level.clone().into();
        }

        // Save default config
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    Ok(config)
}
