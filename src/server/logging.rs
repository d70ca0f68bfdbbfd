use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding an optional log file path.
pub const LOG_FILE_ENV: &str = "VIZQUIZ_LOG";

/// Initialize tracing.
///
/// Logs go to stderr unless `VIZQUIZ_LOG` names a file path, in which case
/// they go to `{path}.{timestamp}.{pid}` so concurrent instances never share
/// a file. `RUST_LOG` controls the filter (default `info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file = std::env::var(LOG_FILE_ENV).ok().and_then(|log_path| {
        let pid = std::process::id();
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let unique_path = format!("{}.{}.{}", log_path, timestamp, pid);

        match std::fs::File::create(&unique_path) {
            Ok(file) => Some(file),
            Err(e) => {
                eprintln!("Warning: Failed to create log file {}: {}", unique_path, e);
                None
            }
        }
    });

    match file {
        Some(file) => {
            let file_layer = fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_target(true)
                .with_level(true)
                .with_timer(UtcTime::rfc_3339());
            tracing_subscriber::registry()
                .with(filter)
                .with(file_layer)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true)
                .with_timer(UtcTime::rfc_3339())
                .init();
        }
    }
}
