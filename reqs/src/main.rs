// reqs/src/main.rs
use std::fs;
use std::process;

use clap::Parser;
use colored::Colorize;
use reqs_common::cache::Cache;
use reqs_common::config::{Config, CATALOG_CACHE_FILENAME};
use tracing::level_filters::LevelFilter;
use tracing::{debug, error, warn};
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

mod cli;
mod manifest;
mod shell;

use cli::CliArgs;

fn init_logging(config: &Config, verbose_level: u8) {
    let level_filter = match verbose_level {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let max_log_level = level_filter.into_level().unwrap_or(tracing::Level::INFO);

    let env_filter = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .with_env_var("REQS_LOG")
        .from_env_lossy();

    let log_dir = config.logs_dir();
    if verbose_level == 0 {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .without_time()
            .try_init();
        return;
    }

    if let Err(e) = fs::create_dir_all(&log_dir) {
        eprintln!(
            "{} Failed to create log directory {}: {}",
            "Error:".red().bold(),
            log_dir.display(),
            e
        );
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .without_time()
            .try_init();
        return;
    }

    let file_appender = tracing_appender::rolling::daily(&log_dir, "reqs.log");
    let (non_blocking_appender, guard) = tracing_appender::non_blocking(file_appender);

    let stderr_writer = std::io::stderr.with_max_level(max_log_level);
    let file_writer = non_blocking_appender.with_max_level(max_log_level);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(stderr_writer.and(file_writer))
        .with_ansi(true)
        .without_time()
        .try_init();

    Box::leak(Box::new(guard)); // Keep guard alive

    debug!(
        "Verbose logging enabled. Writing logs to: {}/reqs.log",
        log_dir.display()
    );
}

// A missing catalog is fetched on first lookup; only an old one is worth a warning.
fn warn_if_catalog_stale(config: &Config) {
    if !config.catalog_cache_path().exists() {
        debug!("No cached catalog yet; it will be fetched on first lookup.");
        return;
    }
    match Cache::new(config).and_then(|cache| cache.is_cache_valid(CATALOG_CACHE_FILENAME)) {
        Ok(true) => debug!("Availability catalog is fresh."),
        Ok(false) => warn!(
            "Availability catalog is older than {}; run 'reqs update' to refresh it.",
            humantime::format_duration(config.catalog_ttl)
        ),
        Err(e) => warn!("Could not inspect catalog cache: {}", e),
    }
}

fn main() {
    let cli_args = CliArgs::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: Could not load config: {:#}", "Error".red().bold(), e);
            process::exit(1);
        }
    };

    init_logging(&config, cli_args.verbose);

    if cli_args.command.uses_catalog() {
        warn_if_catalog_stale(&config);
    } else {
        debug!("Skipping catalog freshness check for command: {:?}", cli_args.command);
    }

    if let Err(e) = cli_args.command.run(&config) {
        error!("Command failed: {:#}", e);
        eprintln!("{}: {:#}", "Error".red().bold(), e);
        process::exit(1);
    }

    debug!("Command completed successfully.");
}
