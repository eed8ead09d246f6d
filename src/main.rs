#![allow(clippy::missing_errors_doc)] // Internal functions don't need # Errors docs
#![allow(clippy::module_name_repetitions)] // e.g., NotificationArgs in cli module is fine
#![allow(clippy::doc_markdown)] // Don't require backticks around macOS, UUID, etc.

//! notification-sender - schedule a local desktop notification
//!
//! Usage:
//!   notification-sender <title> <subtitle> <body>
//!
//! The notification fires once, five seconds after the call. Any other
//! argument count prints `Invalid arguments`.

mod cli;
mod config;
mod errors;
mod notify;

use color_eyre::Result;
use config::Config;
use notify::{DesktopDelivery, NotificationDelivery};
use std::ffi::OsString;
use std::io::Write;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Validate the argument list and hand the notification to `delivery`.
///
/// Only write failures on `out` are returned; wrong argument counts and
/// delivery errors are reported on `out`.
async fn run<I, D, W>(args: I, delivery: &D, out: &mut W) -> std::io::Result<()>
where
    I: IntoIterator<Item = OsString>,
    D: NotificationDelivery + ?Sized,
    W: Write,
{
    let Some(parsed) = cli::parse_args(args) else {
        tracing::warn!("Expected exactly 3 arguments: title, subtitle, body");
        return writeln!(out, "{}", cli::INVALID_ARGUMENTS);
    };

    notify::schedule(delivery, &parsed.title, &parsed.subtitle, &parsed.body, out).await
}

/// Setup file logging with rotation
///
/// Returns `None` when the log directory is unusable; the program then runs
/// without a log. The guard must stay alive until exit to flush the writer.
fn init_logging(config: &Config) -> Option<WorkerGuard> {
    // Console output is reserved for the user-facing lines
    std::fs::create_dir_all(&config.log_dir).ok()?;

    let file_appender =
        tracing_appender::rolling::daily(&config.log_dir, "notification-sender.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let log_filter = format!("notification_sender={}", config.log_level);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&log_filter))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .init();

    Some(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let config = Config::from_env();
    let _guard = init_logging(&config);
    tracing::debug!(?config, "Starting notification-sender");

    let delivery = DesktopDelivery::new(&config);
    let mut stdout = std::io::stdout().lock();
    let written = run(std::env::args_os(), &delivery, &mut stdout).await;
    report_output_failure(written.and_then(|()| stdout.flush()));

    Ok(())
}

/// A closed or broken stdout is logged, never turned into a failing exit
fn report_output_failure(result: std::io::Result<()>) {
    if let Err(e) = result {
        tracing::warn!(error = %e, "Could not write to stdout");
    }
}
