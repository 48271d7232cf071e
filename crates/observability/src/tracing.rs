//! Tracing subscriber construction.
//!
//! Callers get a [`Dispatch`] they can hand to a store, so several stores (or
//! test harnesses) in one process each log to their own sink.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing::Dispatch;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

use crate::logging::{LogConfig, LogFormat, LogTarget};

#[derive(Debug, thiserror::Error)]
pub enum ObservabilityError {
    #[error("failed to open log file {}: {source}", .path.display())]
    OpenLogFile {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid log filter {directive:?}: {reason}")]
    Filter { directive: String, reason: String },
}

/// Build a dispatcher for `config` without installing it anywhere.
pub fn build_dispatch(config: &LogConfig) -> Result<Dispatch, ObservabilityError> {
    let filter = EnvFilter::try_new(&config.filter).map_err(|e| ObservabilityError::Filter {
        directive: config.filter.clone(),
        reason: e.to_string(),
    })?;

    let dispatch = match &config.target {
        LogTarget::Stderr => make_dispatch(filter, config.format, std::io::stderr, true),
        LogTarget::File(path) => {
            let file = open_log_file(path)?;
            make_dispatch(filter, config.format, Mutex::new(file), false)
        }
    };
    Ok(dispatch)
}

/// Build a dispatcher and install it as the process-wide default.
///
/// Safe to call multiple times: the first installed subscriber stays global,
/// later dispatchers are still returned for direct use.
pub fn init(config: &LogConfig) -> Result<Dispatch, ObservabilityError> {
    let dispatch = build_dispatch(config)?;
    let _ = tracing::dispatcher::set_global_default(dispatch.clone());
    Ok(dispatch)
}

fn open_log_file(path: &Path) -> Result<File, ObservabilityError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| ObservabilityError::OpenLogFile {
            path: path.to_path_buf(),
            source,
        })
}

fn make_dispatch<W>(filter: EnvFilter, format: LogFormat, writer: W, ansi: bool) -> Dispatch
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .with_ansi(ansi);

    match format {
        LogFormat::Text => Dispatch::new(builder.finish()),
        LogFormat::Json => Dispatch::new(builder.json().finish()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn log_to(
        dir: &TempDir,
        config: impl FnOnce(LogConfig) -> LogConfig,
    ) -> (Dispatch, std::path::PathBuf) {
        let path = dir.path().join("test.log");
        let dispatch = build_dispatch(&config(LogConfig::file(&path))).unwrap();
        (dispatch, path)
    }

    #[test]
    fn text_records_carry_level_and_message() {
        let dir = TempDir::new().unwrap();
        let (dispatch, path) = log_to(&dir, |c| c);

        tracing::dispatcher::with_default(&dispatch, || {
            tracing::info!("Added 3 of apple");
            tracing::warn!("Attempted to remove non-existent item: pear");
        });

        let contents = std::fs::read_to_string(path).unwrap();
        assert!(contents.contains("INFO"));
        assert!(contents.contains("Added 3 of apple"));
        assert!(contents.contains("WARN"));
        assert!(contents.contains("non-existent item: pear"));
    }

    #[test]
    fn json_format_emits_structured_records() {
        let dir = TempDir::new().unwrap();
        let (dispatch, path) = log_to(&dir, |c| c.with_format(LogFormat::Json));

        tracing::dispatcher::with_default(&dispatch, || tracing::error!("Invalid JSON format"));

        let contents = std::fs::read_to_string(path).unwrap();
        assert!(contents.contains("\"level\":\"ERROR\""));
        assert!(contents.contains("\"message\":\"Invalid JSON format\""));
        assert!(contents.contains("\"timestamp\""));
    }

    #[test]
    fn filter_drops_records_below_threshold() {
        let dir = TempDir::new().unwrap();
        let (dispatch, path) = log_to(&dir, |c| c.with_filter("warn"));

        tracing::dispatcher::with_default(&dispatch, || {
            tracing::info!("quiet");
            tracing::warn!("loud");
        });

        let contents = std::fs::read_to_string(path).unwrap();
        assert!(!contents.contains("quiet"));
        assert!(contents.contains("loud"));
    }

    #[test]
    fn file_target_appends() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("append.log");
        std::fs::write(&path, "existing line\n").unwrap();

        let dispatch = build_dispatch(&LogConfig::file(&path)).unwrap();
        tracing::dispatcher::with_default(&dispatch, || tracing::info!("new line"));

        let contents = std::fs::read_to_string(path).unwrap();
        assert!(contents.starts_with("existing line\n"));
        assert!(contents.contains("new line"));
    }

    #[test]
    fn unopenable_log_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let config = LogConfig::file(dir.path().join("missing").join("x.log"));
        let err = build_dispatch(&config).unwrap_err();
        assert!(matches!(err, ObservabilityError::OpenLogFile { .. }));
    }

    #[test]
    fn bad_filter_directive_is_reported() {
        let config = LogConfig::stderr().with_filter("stockkeep=notalevel");
        let err = build_dispatch(&config).unwrap_err();
        assert!(matches!(err, ObservabilityError::Filter { .. }));
    }
}
