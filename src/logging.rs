//! Tracing subscriber setup for the binary

use std::path::Path;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_DIRECTIVE: &str = "npm_gateway=info";

/// Install the global subscriber
///
/// Logs go to stderr, or are appended to `log_file` when given. The returned
/// guard must be held until exit so buffered file output is flushed.
pub fn init(log_file: Option<&Path>) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = env_filter(std::env::var("RUST_LOG").ok());

    match log_file {
        Some(path) => {
            let dir = path.parent().unwrap_or_else(|| Path::new("."));
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {:?}", dir))?;
            let file_name = path
                .file_name()
                .with_context(|| format!("Log path {:?} has no file name", path))?;

            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .try_init()?;
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr).without_time())
                .try_init()?;
            Ok(None)
        }
    }
}

fn env_filter(rust_log: Option<String>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_filter_defaults_to_crate_info() {
        assert_eq!(env_filter(None).to_string(), DEFAULT_DIRECTIVE);
    }

    #[test]
    fn env_filter_ignores_blank_rust_log() {
        assert_eq!(env_filter(Some("  ".to_string())).to_string(), DEFAULT_DIRECTIVE);
    }

    #[test]
    fn env_filter_uses_rust_log_when_set() {
        assert_eq!(
            env_filter(Some("npm_gateway=debug".to_string())).to_string(),
            "npm_gateway=debug"
        );
    }
}
