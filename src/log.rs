// src/log.rs
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::Uptime;

use crate::config::consts::{LOG_FILE, STORE_DIR};

/// Environment variable holding the log filter, e.g. `TNS_LOG=tns_scrape=debug`.
pub const LOG_ENV: &str = "TNS_LOG";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogTarget {
    /// Warnings and worse on stderr unless the filter says otherwise.
    Stderr,
    /// Everything down to debug, appended to `.store/debug.log`.
    File,
    /// Append to a specific file.
    Path(PathBuf),
}

pub fn log_file_path() -> PathBuf {
    PathBuf::from(STORE_DIR).join(LOG_FILE)
}

fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the global subscriber. Lines carry the time since start, like
/// `[00:00:01.234]`. A second call is a no-op.
pub fn init(target: LogTarget) -> std::io::Result<()> {
    init_with(target, "warn")
}

/// Like [`init`], with the stderr filter used when `TNS_LOG` is unset.
pub fn init_with(target: LogTarget, stderr_default: &str) -> std::io::Result<()> {
    let builder = tracing_subscriber::fmt().with_timer(Uptime::default());

    let path = match target {
        LogTarget::Stderr => {
            let _ = builder
                .with_env_filter(filter(stderr_default))
                .with_writer(std::io::stderr)
                .try_init();
            return Ok(());
        }
        LogTarget::File => log_file_path(),
        LogTarget::Path(p) => p,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    let _ = builder
        .with_env_filter(filter("debug"))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

/// Run `f` under a scoped info-level subscriber and return what it logged.
#[cfg(test)]
pub(crate) fn capture<F: FnOnce()>(f: F) -> String {
    use std::io::Write;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Sink(Arc<Mutex<Vec<u8>>>);

    impl Write for Sink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let sink = Sink::default();
    let writer = sink.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .without_time()
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    let bytes = sink.0.lock().unwrap().clone();
    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_target_creates_parent_and_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("logs").join("debug.log");
        init(LogTarget::Path(path.clone())).unwrap();
        init(LogTarget::Path(path.clone())).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn default_log_file_lives_in_store() {
        assert_eq!(log_file_path(), PathBuf::from(".store").join("debug.log"));
    }
}
