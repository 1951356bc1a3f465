// =============================================================================
// Logging
// =============================================================================
// tracing + tracing-subscriber. The terminal is owned by the UI, so logs go
// to a file, without ANSI colors.
// =============================================================================

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, EnvFilter};

use crate::error::Result;

/// Install the global subscriber, appending to `file`.
///
/// # Environment
/// - `RUST_LOG`: filter directive, overrides `level`
///   (e.g. `RUST_LOG=kiosk_tui=debug`)
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// kiosk_tui::logging::init("info", Path::new("kiosk.log")).unwrap();
/// ```
pub fn init(level: &str, file: &Path) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let writer = OpenOptions::new().create(true).append(true).open(file)?;

    // A second init keeps the first subscriber.
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(writer))
        .with_ansi(false)
        .with_target(true)
        .with_thread_names(true)
        .try_init();
    Ok(())
}

/// Subscriber for tests, captured by the test harness.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_creates_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kiosk.log");
        init("info", &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_unwritable_log_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(init("info", &dir.path().join("missing").join("kiosk.log")).is_err());
    }
}
