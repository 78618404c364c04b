use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_DIRECTIVE: &str = "company_importer=info";

#[derive(Debug, Clone, Default)]
pub struct LoggingOptions {
    /// When set, JSON logs are also written to a daily-rolling file here
    pub log_dir: Option<PathBuf>,
    /// Raise the crate's level to debug
    pub verbose: bool,
}

/// Initializes console logging, plus file logging when a directory is given.
///
/// Keep the returned guard alive for the whole run so file logs get flushed.
pub fn init_logging(options: &LoggingOptions) -> Option<WorkerGuard> {
    let directive = if options.verbose {
        "company_importer=debug"
    } else {
        DEFAULT_DIRECTIVE
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    let console_layer = fmt::layer().with_target(false).with_writer(std::io::stdout);

    let (file_layer, guard) = match &options.log_dir {
        Some(dir) => match fs::create_dir_all(dir) {
            Ok(()) => {
                let file_appender = tracing_appender::rolling::daily(dir, "company-importer.log");
                let (writer, guard) = tracing_appender::non_blocking(file_appender);
                (Some(fmt::layer().json().with_writer(writer)), Some(guard))
            }
            Err(e) => {
                eprintln!("Could not create log directory {}: {}", dir.display(), e);
                (None, None)
            }
        },
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    guard
}
