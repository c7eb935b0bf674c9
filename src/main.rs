// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::app_controller::TranslationPipeline;
use crate::file_utils::FileManager;

mod app_config;
mod app_controller;
mod document;
mod errors;
mod extraction;
mod file_utils;
mod generation;
mod language_utils;
mod providers;
mod translation;

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

fn to_level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate documents while preserving their format (default command)
    #[command(alias = "translate")]
    Translate(TranslateArgs),

    /// List the languages the configured backend supports
    Languages {
        /// Path to the configuration file
        #[arg(short, long, default_value = "conf.json")]
        config_path: String,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Input document or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Source language code, or "auto" to detect
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code
    #[arg(short, long)]
    target_language: Option<String>,

    /// Path to the configuration file
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Log level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
#[command(name = "doctran", author, version, about = "Translate documents without losing their format", long_about = None)]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input document or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Source language code, or "auto" to detect
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code
    #[arg(short, long)]
    target_language: Option<String>,

    /// Path to the configuration file
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Log level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

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

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[0m",
            Level::Debug => "\x1B[36m",
            Level::Trace => "\x1B[90m",
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
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} [{}] {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Languages { config_path }) => run_languages(&config_path).await,
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let input_path = cli
                .input_path
                .ok_or_else(|| anyhow!("INPUT_PATH is required when no subcommand is specified"))?;

            let translate_args = TranslateArgs {
                input_path,
                source_language: cli.source_language,
                target_language: cli.target_language,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_translate(translate_args).await
        }
    }
}

/// Load the config file, creating a default one when it does not exist
fn load_or_create_config(config_path: &str) -> Result<Config> {
    if Path::new(config_path).exists() {
        Config::from_file(config_path)
    } else {
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(config_path, config_json).context(format!(
            "Failed to write default config to file: {}",
            config_path
        ))?;
        Ok(config)
    }
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(to_level_filter(&config_log_level));
    }

    let mut config = load_or_create_config(&options.config_path)?;

    // Override config with CLI options if provided
    if let Some(source_lang) = &options.source_language {
        config.source_language = source_lang.clone();
    }
    if let Some(target_lang) = &options.target_language {
        config.target_language = target_lang.clone();
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    config
        .validate()
        .context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(to_level_filter(&config.log_level));
    }

    let source = normalize_source(&config.source_language)?;
    let target = language_utils::normalize_language_code(&config.target_language)
        .context("Invalid target language")?;

    let pipeline = TranslationPipeline::new(config);

    if options.input_path.is_file() {
        let path = pipeline
            .translate_file(&options.input_path, source.as_deref(), &target)
            .await
            .map_err(|e| anyhow!("{}", e))?;
        info!("Translated document written to {}", path.display());
        return Ok(());
    }

    if !FileManager::dir_exists(&options.input_path) {
        return Err(anyhow!(
            "Input path does not exist: {}",
            options.input_path.display()
        ));
    }

    run_batch(&pipeline, &options.input_path, source.as_deref(), &target).await
}

/// Translate every supported document under a directory
///
/// Per-file failures are logged and counted; the rest of the batch keeps
/// going.
async fn run_batch(
    pipeline: &TranslationPipeline,
    dir: &Path,
    source: Option<&str>,
    target: &str,
) -> Result<()> {
    let documents = FileManager::find_documents(dir)?;
    if documents.is_empty() {
        warn!("No translatable documents found in {}", dir.display());
        return Ok(());
    }

    let progress_bar = ProgressBar::new(documents.len() as u64);
    let template_result = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
        .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress_bar.set_style(template_result);

    info!(
        "Translating {} document(s) from {}",
        documents.len(),
        dir.display()
    );

    let mut failures = 0usize;
    for document in &documents {
        progress_bar.set_message(
            document
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
        );
        match pipeline.translate_file(document, source, target).await {
            Ok(path) => debug!("Wrote {}", path.display()),
            Err(e) => {
                failures += 1;
                error!("Failed to translate {}: {}", document.display(), e);
            }
        }
        progress_bar.inc(1);
    }
    progress_bar.finish_with_message("done");

    if failures > 0 {
        return Err(anyhow!(
            "{}/{} document(s) failed to translate",
            failures,
            documents.len()
        ));
    }
    info!("Translated {} document(s)", documents.len());
    Ok(())
}

async fn run_languages(config_path: &str) -> Result<()> {
    let config = load_or_create_config(config_path)?;
    config
        .validate()
        .context("Configuration validation failed")?;

    let pipeline = TranslationPipeline::new(config);
    let languages = pipeline
        .list_languages()
        .await
        .map_err(|e| anyhow!("{}", e))?;

    for language in languages {
        println!("{}\t{}", language.code, language.name);
    }
    Ok(())
}

/// Resolve the configured source language into a pipeline argument
///
/// "auto" means detection, expressed as `None` toward the pipeline.
fn normalize_source(source: &str) -> Result<Option<String>> {
    let normalized =
        language_utils::normalize_language_code(source).context("Invalid source language")?;
    if normalized == "auto" {
        Ok(None)
    } else {
        Ok(Some(normalized))
    }
}
