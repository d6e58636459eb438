use crate::domain::model::TimestampFormat;
use crate::domain::ports::Storage;
use chrono::Local;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("delivery_filter=debug,info"))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("delivery_filter=info"))
    }
}

// Diagnostics go to stderr so they never interleave with the prompts on stdout.
pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

pub fn init_json_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .init();
}

/// The user-facing activity log: one `<timestamp>: <message>` line per event,
/// appended to a text file.
#[derive(Debug, Clone)]
pub struct ActivityLog<S: Storage> {
    storage: S,
    path: String,
    format: TimestampFormat,
}

impl<S: Storage> ActivityLog<S> {
    pub fn new(storage: S, path: impl Into<String>, format: TimestampFormat) -> Self {
        Self {
            storage,
            path: path.into(),
            format,
        }
    }

    /// Appends one entry. Never fails; a write problem is reported through
    /// tracing and dropped.
    pub fn log(&self, message: impl AsRef<str>) {
        let message = message.as_ref();
        tracing::debug!("activity: {}", message);

        let stamp = self.format.format(&Local::now().naive_local());
        let line = format!("{}: {}\n", stamp, message);
        if let Err(e) = self.storage.append_file(&self.path, line.as_bytes()) {
            tracing::warn!("Could not append to activity log {}: {}", self.path, e);
        }
    }
}
