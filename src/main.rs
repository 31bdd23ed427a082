//! CLI entry point for the Lighthouse summary tool.
//!
//! Reads every Lighthouse JSON report in a directory and writes one
//! timestamped CSV summarising the sustainability audits.

use anyhow::{Context, Result};
use clap::Parser;
use lighthouse_summary::aggregate::{DEFAULT_INPUT_DIR, aggregate};
use lighthouse_summary::clock::SystemClock;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "lighthouse_summary")]
#[command(about = "Summarise Lighthouse sustainability audit reports into a CSV", long_about = None)]
struct Cli {
    /// Directory containing the Lighthouse JSON reports
    #[arg(short, long, default_value = DEFAULT_INPUT_DIR)]
    input_dir: PathBuf,

    /// Directory the summary CSV is written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let _file_guard = init_logging();

    let cli = Cli::parse();

    let path = aggregate(&cli.input_dir, &cli.output_dir, &SystemClock).inspect_err(|e| {
        error!(kind = e.kind(), error = %e, "Summary run failed");
    })?;

    let file_name = path
        .file_name()
        .and_then(OsStr::to_str)
        .context("summary path has no file name")?;
    println!("output completed: {file_name}");

    Ok(())
}

/// Logging setup: stderr for warnings, plus a JSON rolling log file when
/// `LOG_FILE_PATH` is set.
fn init_logging() -> Option<WorkerGuard> {
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(
            env_filter("RUST_LOG", "warn"),
        );

    let (json_layer, guard) = match std::env::var("LOG_FILE_PATH") {
        Ok(log_file_path) => {
            let log_file_path = Path::new(&log_file_path);
            let log_dir = log_file_path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let log_file_name = log_file_path
                .file_name()
                .unwrap_or(OsStr::new("lighthouse_summary.log"));

            let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

            let layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_writer(non_blocking_file)
                .with_filter(env_filter("RUST_LOG_JSON", "debug"));
            (Some(layer), Some(guard))
        }
        Err(_) => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    guard
}

/// Filter from the env var `var`, or `default` when it is unset or invalid.
fn env_filter(var: &str, default: &str) -> EnvFilter {
    EnvFilter::try_from_env(var).unwrap_or_else(|_| EnvFilter::new(default))
}
