//! Logging Infrastructure
//!
//! Structured logging to stderr, or to a daily rolling file when a log
//! directory is configured.

use std::path::Path;

/// Initialize the logger with optional file output
///
/// Output goes to stderr so it does not interleave with the interactive
/// prompt on stdout. A missing log directory is created; if that fails the
/// logger falls back to stderr.
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level.parse().unwrap_or(tracing::Level::INFO))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if std::fs::create_dir_all(log_path).is_ok()
            && let Some(dir_str) = log_path.to_str()
        {
            let file_appender = tracing_appender::rolling::daily(dir_str, "tag-station");
            subscriber
                .with_ansi(false)
                .with_writer(file_appender)
                .init();
            return;
        }
    }

    subscriber.with_writer(std::io::stderr).init();
}
